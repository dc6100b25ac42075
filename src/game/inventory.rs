//! Inventory
//!
//! Pocket-stack inventory: every mined material pushes a pocket, the
//! inventory tool pops the newest one. `Empty` is the sentinel for a drained
//! stack and is never stored as a pocket itself.

use crate::world::Material;

/// LIFO holder of collected materials.
#[derive(Debug, Default)]
pub struct Inventory {
    pockets: Vec<Material>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The material that would be placed next; `Empty` when nothing is held.
    pub fn peek(&self) -> Material {
        self.pockets.last().copied().unwrap_or(Material::Empty)
    }

    /// Pocket a mined material. Storing `Empty` is a no-op.
    pub fn store(&mut self, material: Material) {
        if material != Material::Empty {
            self.pockets.push(material);
        }
    }

    /// Take the newest pocket out, reverting to `Empty` once drained.
    pub fn release(&mut self) -> Material {
        self.pockets.pop().unwrap_or(Material::Empty)
    }

    pub fn is_empty(&self) -> bool {
        self.pockets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pockets.len()
    }

    /// Drop everything. Used on new game.
    pub fn reset(&mut self) {
        self.pockets.clear();
    }
}
