use crate::geometry::{Colour, Point};

/// A coloured point in the coordinate space of its sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pixel {
    pub point: Point,
    pub colour: Colour,
}

impl Pixel {
    pub const fn new(point: Point, colour: Colour) -> Self {
        Self { point, colour }
    }
}

/// An ordered set of pixels relative to the sprite origin (0,0).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sprite {
    pixels: Vec<Pixel>,
}

impl Sprite {
    pub fn new(pixels: Vec<Pixel>) -> Self {
        Self { pixels }
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// A copy of this sprite shifted by `origin`. Pixel order and colours are kept.
    pub fn translate(&self, origin: Point) -> Sprite {
        let pixels = self
            .pixels
            .iter()
            .map(|p| Pixel::new(p.point.translate(origin), p.colour))
            .collect();
        Sprite { pixels }
    }
}

impl FromIterator<Pixel> for Sprite {
    fn from_iter<I: IntoIterator<Item = Pixel>>(iter: I) -> Self {
        Sprite::new(iter.into_iter().collect())
    }
}

/// A unit step on the grid. Up is towards row 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn delta(self) -> Point {
        match self {
            Direction::Left => Point::new(-1, 0),
            Direction::Right => Point::new(1, 0),
            Direction::Up => Point::new(0, -1),
            Direction::Down => Point::new(0, 1),
        }
    }
}

/// A sprite placed on the grid by a movable top-left anchor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimatedSprite {
    sprite: Sprite,
    anchor: Point,
}

impl AnimatedSprite {
    pub fn new(sprite: Sprite, anchor: Point) -> Self {
        Self { sprite, anchor }
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.anchor = self.anchor.translate(Point::from((dx, dy)));
    }

    pub fn step(&mut self, direction: Direction) {
        self.anchor = self.anchor.translate(direction.delta());
    }

    pub fn move_left(&mut self) {
        self.step(Direction::Left);
    }

    pub fn move_right(&mut self) {
        self.step(Direction::Right);
    }

    pub fn move_up(&mut self) {
        self.step(Direction::Up);
    }

    pub fn move_down(&mut self) {
        self.step(Direction::Down);
    }

    /// The sprite in absolute grid coordinates for the current anchor.
    pub fn project(&self) -> Sprite {
        self.sprite.translate(self.anchor)
    }
}
