use std::collections::HashMap;

use log::trace;

use crate::error::{Error, Result};
use crate::geometry::Colour;
use crate::layout::{Key, PixelMapper};
use crate::protocol;
use crate::sprite::Sprite;

/// The lit state of the physical keyboard for one frame.
///
/// Built fresh for every frame; nothing carries over between frames.
/// Lights keep the position of their first write so serialization is
/// deterministic, while later writes overwrite the colour.
#[derive(Debug)]
pub struct PhysicalDisplay<'m> {
    width: i32,
    height: i32,
    mapper: &'m PixelMapper,
    lights: Vec<(Key, Colour)>,
    index: HashMap<Key, usize>,
}

impl<'m> PhysicalDisplay<'m> {
    pub fn new(width: i32, height: i32, mapper: &'m PixelMapper) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            mapper,
            lights: Vec::new(),
            index: HashMap::new(),
        })
    }

    /// A display sized to the mapper's own grid.
    pub fn for_mapper(mapper: &'m PixelMapper) -> Self {
        // PixelMapper guarantees positive dimensions
        Self {
            width: mapper.width(),
            height: mapper.height(),
            mapper,
            lights: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn mapper(&self) -> &'m PixelMapper {
        self.mapper
    }

    /// Set one target. Overwrites any earlier colour for the same key this frame.
    pub fn light(&mut self, key: Key, colour: Colour) {
        match self.index.get(&key) {
            Some(&i) => self.lights[i].1 = colour,
            None => {
                self.index.insert(key.clone(), self.lights.len());
                self.lights.push((key, colour));
            }
        }
    }

    /// Merge sprites into the frame. Later sprites, and later pixels within a
    /// sprite, win on collision. Pixels over cells with no light are dropped.
    pub fn compose<'s>(&mut self, sprites: impl IntoIterator<Item = &'s Sprite>) {
        for sprite in sprites {
            for pixel in sprite.pixels() {
                // Wrap into the grid first, then look up the light under it
                let point = pixel.point.wrap(self.width, self.height);
                match self.mapper.resolve(point) {
                    Some(key) => self.light(key.clone(), pixel.colour),
                    None => trace!("no light at ({}, {})", point.x, point.y),
                }
            }
        }
    }

    pub fn get(&self, key: &Key) -> Option<Colour> {
        self.index.get(key).map(|&i| self.lights[i].1)
    }

    /// Lit targets in first-write order.
    pub fn lights(&self) -> impl Iterator<Item = (&Key, Colour)> {
        self.lights.iter().map(|(key, colour)| (key, *colour))
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Protocol text for this frame.
    pub fn serialize(&self) -> String {
        protocol::encode_frame(self.lights())
    }
}
