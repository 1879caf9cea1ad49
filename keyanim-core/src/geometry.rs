use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A discrete grid position. Bounds only exist relative to a display.
///
/// Coordinates are held as `i64` so that any `i32` anchor plus any `i32`
/// pixel offset, moved one cell per frame, stays exact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Component-wise addition. Wraps at the `i64` bounds rather than panicking.
    pub fn translate(self, delta: Point) -> Point {
        Point::new(self.x.wrapping_add(delta.x), self.y.wrapping_add(delta.y))
    }

    /// Reduce both components into `0..width` and `0..height`.
    /// Uses Euclidean remainder so negative coordinates wrap from the far edge.
    /// `width` and `height` must be positive; `PhysicalDisplay::new` enforces this.
    pub fn wrap(self, width: i32, height: i32) -> Point {
        Point::new(
            self.x.rem_euclid(i64::from(width)),
            self.y.rem_euclid(i64::from(height)),
        )
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x.into(), y.into())
    }
}

/// An RGB colour, one byte per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Colour {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Colour {
    pub const BLACK: Colour = Colour::new(0x00, 0x00, 0x00);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Lowercase `rrggbb`, as the lighting driver expects it.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl FromStr for Colour {
    type Err = Error;

    /// Accepts `rrggbb` or `#rrggbb`, either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidColour(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| Error::InvalidColour(s.to_string()))
        };
        Ok(Colour::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hex_is_lowercase_and_zero_padded() {
        assert_eq!(Colour::new(0xff, 0xa5, 0x00).to_hex(), "ffa500");
        assert_eq!(Colour::new(1, 2, 3).to_hex(), "010203");
        assert_eq!(Colour::new(0xff, 0xbb, 0x99).to_string(), "ffbb99");
    }

    #[test]
    fn parses_hex_colours() {
        assert_eq!("ffbb99".parse::<Colour>().unwrap(), Colour::new(0xff, 0xbb, 0x99));
        assert_eq!("#00FF00".parse::<Colour>().unwrap(), Colour::new(0, 0xff, 0));
        assert!(matches!("fff".parse::<Colour>(), Err(Error::InvalidColour(_))));
        assert!(matches!("gg0000".parse::<Colour>(), Err(Error::InvalidColour(_))));
        assert!(matches!("+f0000".parse::<Colour>(), Err(Error::InvalidColour(_))));
    }

    #[test]
    fn wrap_handles_negative_and_overflowing_coordinates() {
        assert_eq!(Point::new(-1, 7).wrap(20, 6), Point::new(19, 1));
        assert_eq!(Point::new(20, 6).wrap(20, 6), Point::new(0, 0));
        assert_eq!(Point::new(-41, -13).wrap(20, 6), Point::new(19, 5));
        assert_eq!(Point::new(3, 4).wrap(20, 6), Point::new(3, 4));
    }

    #[test]
    fn translate_adds_components() {
        assert_eq!(Point::new(2, -3).translate(Point::new(-5, 4)), Point::new(-3, 1));
    }

    #[test]
    fn translate_past_i32_range_stays_exact() {
        // one step right of the largest i32 anchor
        let edge = Point::from((i32::MAX, 0));
        let moved = edge.translate(Point::new(1, 0));
        assert_eq!(moved, Point::new(i64::from(i32::MAX) + 1, 0));
        // 2147483648 = 107374182 * 20 + 8
        assert_eq!(moved.wrap(20, 6), Point::new(8, 0));

        let low = Point::from((i32::MIN, i32::MIN)).translate(Point::from((i32::MIN, -1)));
        assert_eq!(low.wrap(20, 6), Point::new(4, 3));
    }

    proptest! {
        #[test]
        fn wrap_is_bounded_and_idempotent(
            x in -10_000i64..10_000,
            y in -10_000i64..10_000,
            w in 1i32..64,
            h in 1i32..64,
        ) {
            let once = Point::new(x, y).wrap(w, h);
            prop_assert!(once.x >= 0 && once.x < i64::from(w));
            prop_assert!(once.y >= 0 && once.y < i64::from(h));
            prop_assert_eq!(once.wrap(w, h), once);
        }
    }
}
