//! World Model
//!
//! Materials, layouts, and the block grid itself.

pub mod grid;
pub mod layout;
pub mod material;

pub use grid::{BlockCell, BlockChange, GridPos, WorldGrid};
pub use layout::{DEFAULT_WORLD, WorldLayout};
pub use material::{MATERIAL_CODES, MATERIAL_COUNT, Material};
