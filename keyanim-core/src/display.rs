use crate::sprite::{AnimatedSprite, Direction, Sprite};

/// Owns every animated sprite. Insertion order is z-order: later sprites
/// are composited on top.
#[derive(Clone, Debug, Default)]
pub struct VirtualDisplay {
    sprites: Vec<AnimatedSprite>,
    drift: Direction,
}

impl VirtualDisplay {
    pub fn new(drift: Direction) -> Self {
        Self {
            sprites: Vec::new(),
            drift,
        }
    }

    pub fn add_sprite(&mut self, sprite: AnimatedSprite) {
        self.sprites.push(sprite);
    }

    pub fn sprites(&self) -> &[AnimatedSprite] {
        &self.sprites
    }

    /// Advance one animation step: every sprite moves one cell in the drift direction.
    pub fn tick(&mut self) {
        for sprite in &mut self.sprites {
            sprite.step(self.drift);
        }
    }

    /// All sprites in absolute coordinates, in insertion order.
    pub fn project(&self) -> Vec<Sprite> {
        self.sprites.iter().map(AnimatedSprite::project).collect()
    }
}
