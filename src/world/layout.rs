//! World Layouts
//!
//! Abstract representation of the initial game world: a rectangular matrix
//! of material codes, row-major, validated once at construction so the grid
//! builder never sees a malformed world.

use serde::{Deserialize, Serialize};

use crate::error::WorldError;
use crate::world::material::Material;

/// The 20x20 starting world: a leaf canopy over a wood trunk, a grass line,
/// a dirt body, and stone veins near the floor.
pub const DEFAULT_WORLD: [[u8; 20]; 20] = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 3, 3, 3, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 3, 3, 3, 3, 3, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 3, 3, 3, 3, 3, 3, 3, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 3, 3, 3, 3, 3, 3, 3, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 5, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 5, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 5, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [4, 4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [4, 4, 4, 4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 4, 1, 1, 1, 1],
    [4, 4, 4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 4, 4, 1, 1, 1],
];

/// A validated rectangular world description.
///
/// Invariants held after construction: at least one row and one column,
/// every row the same width, every code a known [`Material`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct WorldLayout {
    codes: Vec<Vec<u8>>,
}

impl WorldLayout {
    /// Validate a code matrix into a layout.
    pub fn new(codes: Vec<Vec<u8>>) -> Result<Self, WorldError> {
        if codes.is_empty() || codes[0].is_empty() {
            return Err(WorldError::invalid_layout(
                "world needs at least one row and one column",
            ));
        }
        let width = codes[0].len();
        for (row, row_codes) in codes.iter().enumerate() {
            if row_codes.len() != width {
                return Err(WorldError::invalid_layout(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    row_codes.len(),
                    width
                )));
            }
            for (col, &code) in row_codes.iter().enumerate() {
                if Material::from_code(code).is_none() {
                    return Err(WorldError::invalid_layout(format!(
                        "unknown material code {} at row {}, col {}",
                        code, row, col
                    )));
                }
            }
        }
        Ok(Self { codes })
    }

    /// Parse a layout from a JSON array of arrays of codes.
    pub fn from_json(json: &str) -> Result<Self, WorldError> {
        let codes: Vec<Vec<u8>> = serde_json::from_str(json)
            .map_err(|e| WorldError::invalid_layout(e.to_string()))?;
        Self::new(codes)
    }

    pub fn height(&self) -> usize {
        self.codes.len()
    }

    pub fn width(&self) -> usize {
        self.codes[0].len()
    }

    /// Material at a layout position. Positions come from iterating the
    /// layout's own dimensions, so the lookups are always in bounds.
    pub fn material_at(&self, row: usize, col: usize) -> Material {
        Material::from_code(self.codes[row][col])
            .unwrap_or(Material::Empty)
    }
}

impl Default for WorldLayout {
    fn default() -> Self {
        Self {
            codes: DEFAULT_WORLD.iter().map(|row| row.to_vec()).collect(),
        }
    }
}

impl TryFrom<Vec<Vec<u8>>> for WorldLayout {
    type Error = WorldError;

    fn try_from(codes: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Self::new(codes)
    }
}

impl From<WorldLayout> for Vec<Vec<u8>> {
    fn from(layout: WorldLayout) -> Self {
        layout.codes
    }
}
