//! World Grid
//!
//! The 2D collection of block cells. Owns adjacency queries and the single
//! mutation point for cell material; every real material change is recorded
//! in a drainable change log so the presentation layer can mirror the grid
//! without the core knowing how it renders.

use serde::{Deserialize, Serialize};

use crate::error::WorldError;
use crate::world::layout::WorldLayout;
use crate::world::material::Material;

/// A fixed position in the world grid. Row 0 is the top of the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The cell directly above, or `None` at the top row.
    pub fn above(self) -> Option<GridPos> {
        self.row.checked_sub(1).map(|row| GridPos::new(row, self.col))
    }

    /// The cell directly below, or `None` at the grid floor.
    pub fn below(self, height: usize) -> Option<GridPos> {
        let row = self.row + 1;
        (row < height).then(|| GridPos::new(row, self.col))
    }
}

/// One addressable cell: its material and where it sits.
///
/// Cells are created once at world build and never reallocated; only the
/// material mutates, and only through [`WorldGrid::set_material`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockCell {
    material: Material,
    pos: GridPos,
}

impl BlockCell {
    pub fn material(&self) -> Material {
        self.material
    }

    pub fn pos(&self) -> GridPos {
        self.pos
    }
}

/// A recorded material change, in the order it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockChange {
    pub pos: GridPos,
    pub material: Material,
}

/// The fixed-size world of block cells.
pub struct WorldGrid {
    cells: Vec<BlockCell>,
    height: usize,
    width: usize,
    changes: Vec<BlockChange>,
}

impl WorldGrid {
    /// Allocate one cell per layout entry. The layout is validated at its
    /// own construction, so building cannot fail.
    pub fn build(layout: &WorldLayout) -> Self {
        let height = layout.height();
        let width = layout.width();
        let mut cells = Vec::with_capacity(height * width);
        for row in 0..height {
            for col in 0..width {
                cells.push(BlockCell {
                    material: layout.material_at(row, col),
                    pos: GridPos::new(row, col),
                });
            }
        }
        Self {
            cells,
            height,
            width,
            changes: Vec::new(),
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    fn index(&self, pos: GridPos) -> Result<usize, WorldError> {
        if pos.row >= self.height || pos.col >= self.width {
            return Err(WorldError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                height: self.height,
                width: self.width,
            });
        }
        Ok(pos.row * self.width + pos.col)
    }

    /// Bounds-checked cell access.
    pub fn get(&self, pos: GridPos) -> Result<&BlockCell, WorldError> {
        let idx = self.index(pos)?;
        Ok(&self.cells[idx])
    }

    /// Material at a position.
    pub fn material(&self, pos: GridPos) -> Result<Material, WorldError> {
        Ok(self.get(pos)?.material)
    }

    /// Mutate a cell's material in place. The single point of truth for
    /// material change; no-op writes (same material) are not logged.
    pub fn set_material(
        &mut self,
        pos: GridPos,
        material: Material,
    ) -> Result<(), WorldError> {
        let idx = self.index(pos)?;
        if self.cells[idx].material != material {
            self.cells[idx].material = material;
            self.changes.push(BlockChange { pos, material });
        }
        Ok(())
    }

    /// The in-bounds orthogonal neighbors: at most 4, fewer at edges and
    /// corners. Diagonals are excluded by definition.
    pub fn neighbors4(&self, pos: GridPos) -> Result<Vec<&BlockCell>, WorldError> {
        self.index(pos)?;
        let mut neighbors = Vec::with_capacity(4);
        if let Some(above) = pos.above() {
            neighbors.push(self.get(above)?);
        }
        if let Some(below) = pos.below(self.height) {
            neighbors.push(self.get(below)?);
        }
        if let Some(col) = pos.col.checked_sub(1) {
            neighbors.push(self.get(GridPos::new(pos.row, col))?);
        }
        if pos.col + 1 < self.width {
            neighbors.push(self.get(GridPos::new(pos.row, pos.col + 1))?);
        }
        Ok(neighbors)
    }

    /// True iff any orthogonal neighbor holds solid material. Gates whether
    /// a placed block counts as physically supported.
    pub fn has_solid_neighbor(&self, pos: GridPos) -> Result<bool, WorldError> {
        Ok(self
            .neighbors4(pos)?
            .iter()
            .any(|cell| cell.material.is_solid()))
    }

    /// Take all material changes recorded since the last drain.
    pub fn drain_changes(&mut self) -> Vec<BlockChange> {
        std::mem::take(&mut self.changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_grid() -> WorldGrid {
        // 3x3: dirt floor, stone center, sand top-left
        let layout =
            WorldLayout::new(vec![vec![6, 0, 0], vec![0, 4, 0], vec![1, 1, 1]])
                .unwrap();
        WorldGrid::build(&layout)
    }

    #[test]
    fn build_translates_every_code() {
        let grid = small_grid();
        assert_eq!(grid.material(GridPos::new(0, 0)).unwrap(), Material::Sand);
        assert_eq!(grid.material(GridPos::new(1, 1)).unwrap(), Material::Stone);
        assert_eq!(grid.material(GridPos::new(2, 2)).unwrap(), Material::Dirt);
        assert_eq!(grid.material(GridPos::new(0, 1)).unwrap(), Material::Empty);
    }

    #[test]
    fn out_of_bounds_fails_loudly() {
        let grid = small_grid();
        let err = grid.get(GridPos::new(3, 0)).unwrap_err();
        assert!(matches!(err, WorldError::OutOfBounds { row: 3, .. }));
        assert!(grid.get(GridPos::new(0, 3)).is_err());
    }

    #[test]
    fn neighbor_counts_by_position() {
        let grid = small_grid();
        assert_eq!(grid.neighbors4(GridPos::new(0, 0)).unwrap().len(), 2);
        assert_eq!(grid.neighbors4(GridPos::new(0, 1)).unwrap().len(), 3);
        assert_eq!(grid.neighbors4(GridPos::new(1, 1)).unwrap().len(), 4);
    }

    #[test]
    fn neighbors_are_orthogonal_only() {
        let grid = small_grid();
        let neighbors = grid.neighbors4(GridPos::new(1, 1)).unwrap();
        let positions: Vec<GridPos> = neighbors.iter().map(|c| c.pos()).collect();
        assert!(positions.contains(&GridPos::new(0, 1)));
        assert!(positions.contains(&GridPos::new(2, 1)));
        assert!(positions.contains(&GridPos::new(1, 0)));
        assert!(positions.contains(&GridPos::new(1, 2)));
    }

    #[test]
    fn solid_neighbor_gate() {
        let grid = small_grid();
        // (0, 1) touches sand on the left and stone below
        assert!(grid.has_solid_neighbor(GridPos::new(0, 1)).unwrap());
        // (0, 2) touches only empties
        assert!(!grid.has_solid_neighbor(GridPos::new(0, 2)).unwrap());
    }

    #[test]
    fn set_material_logs_real_changes_only() {
        let mut grid = small_grid();
        let pos = GridPos::new(0, 1);
        grid.set_material(pos, Material::Empty).unwrap(); // already empty
        grid.set_material(pos, Material::Wood).unwrap();
        let changes = grid.drain_changes();
        assert_eq!(
            changes,
            vec![BlockChange {
                pos,
                material: Material::Wood
            }]
        );
        assert!(grid.drain_changes().is_empty());
    }

    #[test]
    fn set_material_out_of_bounds_is_rejected() {
        let mut grid = small_grid();
        assert!(grid
            .set_material(GridPos::new(9, 9), Material::Dirt)
            .is_err());
    }
}
