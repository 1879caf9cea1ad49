//! Text protocol consumed by the lighting driver (`g810-led -pp`).
//!
//! One frame is a reset, one line per lit target, and a commit:
//!
//! ```text
//! a 000000
//! k escape ffbb99
//! g fkeys ff0000
//! c
//! ```

use std::fmt;

use crate::geometry::Colour;
use crate::layout::Key;

/// One line of the driver protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Directive<'a> {
    /// Set every light to one colour.
    All(Colour),
    /// Set a key or a key group.
    Set(&'a Key, Colour),
    /// Apply the frame.
    Commit,
}

impl fmt::Display for Directive<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::All(colour) => write!(f, "a {colour}"),
            Directive::Set(key, colour) => write!(f, "{} {} {colour}", key.directive(), key.name()),
            Directive::Commit => f.write_str("c"),
        }
    }
}

/// Directives for a full frame: clear to black, set each light in order, commit.
pub fn frame_directives<'a>(
    lights: impl IntoIterator<Item = (&'a Key, Colour)>,
) -> impl Iterator<Item = Directive<'a>> {
    std::iter::once(Directive::All(Colour::BLACK))
        .chain(lights.into_iter().map(|(key, colour)| Directive::Set(key, colour)))
        .chain(std::iter::once(Directive::Commit))
}

/// Render a frame as newline-terminated protocol text.
pub fn encode_frame<'a>(lights: impl IntoIterator<Item = (&'a Key, Colour)>) -> String {
    let mut out = String::new();
    for directive in frame_directives(lights) {
        out.push_str(&directive.to_string());
        out.push('\n');
    }
    out
}
