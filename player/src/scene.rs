use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use keyanim_core::{AnimatedSprite, Colour, Pixel, Point, Sprite};

/// A scene file: sprites listed bottom to top.
///
/// ```toml
/// [[sprite]]
/// anchor = [4, 2]
/// pixels = [
///   { x = 0, y = 0, colour = "ff0000" },
///   { x = 1, y = 0, colour = "#00ff00" },
/// ]
/// ```
#[derive(Deserialize)]
struct SceneFile {
    #[serde(default, rename = "sprite")]
    sprites: Vec<SpriteEntry>,
}

#[derive(Deserialize)]
struct SpriteEntry {
    #[serde(default)]
    anchor: (i32, i32),
    pixels: Vec<PixelEntry>,
}

#[derive(Deserialize)]
struct PixelEntry {
    x: i32,
    y: i32,
    colour: String,
}

pub fn parse_scene(source: &str) -> anyhow::Result<Vec<AnimatedSprite>> {
    let scene: SceneFile = toml::from_str(source).context("malformed scene file")?;
    scene
        .sprites
        .into_iter()
        .enumerate()
        .map(|(i, entry)| -> anyhow::Result<AnimatedSprite> {
            let pixels = entry
                .pixels
                .into_iter()
                .map(|p| -> anyhow::Result<Pixel> {
                    let colour = p
                        .colour
                        .parse::<Colour>()
                        .with_context(|| format!("sprite {i}: pixel ({}, {})", p.x, p.y))?;
                    Ok(Pixel::new(Point::from((p.x, p.y)), colour))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            Ok(AnimatedSprite::new(Sprite::new(pixels), entry.anchor.into()))
        })
        .collect()
}

pub fn load_scene(path: &Path) -> anyhow::Result<Vec<AnimatedSprite>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_scene(&source).with_context(|| format!("in {}", path.display()))
}
