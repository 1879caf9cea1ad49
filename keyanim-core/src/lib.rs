pub mod compose;
pub mod display;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod protocol;
pub mod sprite;
pub mod view;

pub use compose::PhysicalDisplay;
pub use display::VirtualDisplay;
pub use driver::{CommandDriver, LightDriver, WriterDriver};
pub use error::{Error, Result};
pub use geometry::{Colour, Point};
pub use layout::{Key, PixelMapper, Target};
pub use sprite::{AnimatedSprite, Direction, Pixel, Sprite};
pub use view::View;
