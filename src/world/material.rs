//! Block Materials
//!
//! The substance a grid cell contains, including the absence-state
//! [`Material::Empty`], and the numeric code table world layouts are
//! written in.

use serde::{Deserialize, Serialize};
use static_assertions::const_assert_eq;

/// Number of distinct materials, including `Empty`.
pub const MATERIAL_COUNT: usize = 7;

/// Layout code table, indexed by code value.
pub const MATERIAL_CODES: [Material; MATERIAL_COUNT] = [
    Material::Empty,
    Material::Dirt,
    Material::Grass,
    Material::Leaves,
    Material::Stone,
    Material::Wood,
    Material::Sand,
];

const_assert_eq!(MATERIAL_CODES.len(), MATERIAL_COUNT);

/// What a grid cell is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    /// Absence of material: minable-into and drop-receiving.
    Empty,
    Dirt,
    Grass,
    Leaves,
    Stone,
    Wood,
    /// Loose material; falls when the cell below is empty.
    Sand,
}

impl Material {
    /// Translate a layout code. Unknown codes return `None`; the layout
    /// validator turns that into an `InvalidLayout` error with context.
    pub fn from_code(code: u8) -> Option<Self> {
        MATERIAL_CODES.get(code as usize).copied()
    }

    /// The layout code this material is written as.
    pub fn code(self) -> u8 {
        match self {
            Material::Empty => 0,
            Material::Dirt => 1,
            Material::Grass => 2,
            Material::Leaves => 3,
            Material::Stone => 4,
            Material::Wood => 5,
            Material::Sand => 6,
        }
    }

    /// Loose materials are subject to gravity.
    pub fn is_loose(self) -> bool {
        matches!(self, Material::Sand)
    }

    /// Anything except `Empty` counts as solid for support checks.
    pub fn is_solid(self) -> bool {
        self != Material::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_roundtrip() {
        for (code, material) in MATERIAL_CODES.iter().enumerate() {
            assert_eq!(material.code() as usize, code);
            assert_eq!(Material::from_code(code as u8), Some(*material));
        }
    }

    #[test]
    fn unknown_code_is_none() {
        assert_eq!(Material::from_code(7), None);
        assert_eq!(Material::from_code(255), None);
    }

    #[test]
    fn only_sand_is_loose() {
        for material in MATERIAL_CODES {
            assert_eq!(material.is_loose(), material == Material::Sand);
        }
    }

    #[test]
    fn empty_is_not_solid() {
        assert!(!Material::Empty.is_solid());
        assert!(Material::Stone.is_solid());
    }
}
