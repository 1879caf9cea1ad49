//! Grid-cell to physical-key tables.
//!
//! A layout is a TOML artifact describing one keyboard model: its grid size and,
//! for every cell, the lighting target under it. Built-in layouts are compiled
//! in; others can be loaded from disk without touching the compositor.

use std::fmt;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::geometry::Point;

/// Marks a cell with no light under it.
pub const NO_TARGET: &str = "-";
/// Prefix marking a named key group rather than a single key.
pub const GROUP_PREFIX: char = '@';

static EMPTY_CELL: Target = Target::NoTarget;

const G810: &str = include_str!("../layouts/g810.toml");

/// Built-in layouts by model name.
pub const BUILTIN_MODELS: &[(&str, &str)] = &[("g810", G810)];

/// A lighting target as named by the external driver.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Key {
    name: String,
    group: bool,
}

impl Key {
    pub fn key(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: false,
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_group(&self) -> bool {
        self.group
    }

    /// Protocol directive letter: `k` for a key, `g` for a group.
    pub fn directive(&self) -> char {
        if self.group {
            'g'
        } else {
            'k'
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group {
            write!(f, "{GROUP_PREFIX}{}", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// What sits under one grid cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Key(Key),
    NoTarget,
}

impl Target {
    fn parse(cell: &str) -> Result<Self> {
        let cell = cell.trim();
        if cell == NO_TARGET {
            return Ok(Target::NoTarget);
        }
        let key = match cell.strip_prefix(GROUP_PREFIX) {
            Some(group) => Key::group(group),
            None => Key::key(cell),
        };
        if key.name().is_empty() || key.name().contains(char::is_whitespace) {
            return Err(Error::Layout(format!("bad cell name `{cell}`")));
        }
        Ok(Target::Key(key))
    }

    pub fn key(&self) -> Option<&Key> {
        match self {
            Target::Key(key) => Some(key),
            Target::NoTarget => None,
        }
    }
}

#[derive(Deserialize)]
struct LayoutFile {
    #[serde(default)]
    model: Option<String>,
    width: i32,
    height: i32,
    rows: Vec<Vec<String>>,
}

/// Immutable map from in-bounds grid points to lighting targets.
#[derive(Clone, Debug)]
pub struct PixelMapper {
    model: String,
    width: i32,
    height: i32,
    // row-major, width * height entries
    cells: Vec<Target>,
}

impl PixelMapper {
    /// A table of the given size where only `entries` are lit; every other cell
    /// is recorded as `NoTarget`.
    pub fn from_entries(
        width: i32,
        height: i32,
        entries: impl IntoIterator<Item = (Point, Key)>,
    ) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let mut cells = vec![Target::NoTarget; width as usize * height as usize];
        for (point, key) in entries {
            let Some(i) = cell_index(width, height, point) else {
                return Err(Error::Layout(format!(
                    "{key} at ({}, {}) lies outside {width}x{height}",
                    point.x, point.y
                )));
            };
            cells[i] = Target::Key(key);
        }
        Ok(Self {
            model: "custom".to_string(),
            width,
            height,
            cells,
        })
    }

    /// Parse a TOML layout table.
    pub fn from_toml(source: &str) -> Result<Self> {
        let file: LayoutFile =
            toml::from_str(source).map_err(|e| Error::Layout(e.to_string()))?;
        if file.width <= 0 || file.height <= 0 {
            return Err(Error::InvalidDimensions {
                width: file.width,
                height: file.height,
            });
        }
        if file.rows.len() != file.height as usize {
            return Err(Error::Layout(format!(
                "expected {} rows, found {}",
                file.height,
                file.rows.len()
            )));
        }

        let mut cells = Vec::with_capacity(file.width as usize * file.height as usize);
        for (y, row) in file.rows.iter().enumerate() {
            if row.len() != file.width as usize {
                return Err(Error::Layout(format!(
                    "row {y} has {} cells, expected {}",
                    row.len(),
                    file.width
                )));
            }
            for cell in row {
                cells.push(Target::parse(cell)?);
            }
        }

        Ok(Self {
            model: file.model.unwrap_or_else(|| "custom".to_string()),
            width: file.width,
            height: file.height,
            cells,
        })
    }

    /// Load a compiled-in layout by model name.
    pub fn builtin(model: &str) -> Result<Self> {
        let (_, source) = BUILTIN_MODELS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(model))
            .ok_or_else(|| Error::UnknownModel(model.to_string()))?;
        Self::from_toml(source)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// The target under `point`. Points outside the table resolve to `NoTarget`.
    pub fn target(&self, point: Point) -> &Target {
        match cell_index(self.width, self.height, point) {
            Some(i) => &self.cells[i],
            None => &EMPTY_CELL,
        }
    }

    /// The key under `point`, if any. Callers pass already-wrapped points.
    pub fn resolve(&self, point: Point) -> Option<&Key> {
        self.target(point).key()
    }
}

/// Row-major index of `point` in a `width` x `height` table, if it lies inside.
fn cell_index(width: i32, height: i32, point: Point) -> Option<usize> {
    let (w, h) = (i64::from(width), i64::from(height));
    if point.x < 0 || point.x >= w || point.y < 0 || point.y >= h {
        return None;
    }
    usize::try_from(point.y * w + point.x).ok()
}
