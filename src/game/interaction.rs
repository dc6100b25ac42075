//! Click Interaction
//!
//! The click protocol: resolve the active tool, validate it against the
//! clicked cell, apply the tool effect, and trigger the gravity checks that
//! follow a mutation.

use log::debug;

use crate::config::{GameConfig, PlacementPolicy};
use crate::error::WorldError;
use crate::game::inventory::Inventory;
use crate::game::tools::{ActiveToolState, ToolKind};
use crate::physics::FallingBlockSimulator;
use crate::world::{GridPos, Material, WorldGrid};

/// Why a click was rejected. Rejections flash the tool and change nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The clicked material is outside the tool's usage table.
    ToolMismatch,
    /// Placement into a cell with no solid orthogonal neighbor, under the
    /// `RequireSupport` policy.
    NoSupport,
}

/// Result of one click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// No tool active; nothing happened.
    Ignored,
    /// The tool may not act here; a rejection flash was started.
    Rejected {
        tool: ToolKind,
        reason: RejectReason,
    },
    /// A block was mined into the inventory.
    Mined { material: Material },
    /// Held material was placed. Placing with nothing held writes `Empty`,
    /// which is a legal no-visible-effect placement.
    Placed { material: Material },
}

/// Orchestrates clicks against the grid, tools, inventory, and simulator.
pub struct InteractionController {
    placement: PlacementPolicy,
    flash_ticks: u64,
}

impl InteractionController {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            placement: config.placement,
            flash_ticks: config.flash_ticks,
        }
    }

    /// Apply one click at `pos` at tick `now`.
    pub fn click(
        &self,
        pos: GridPos,
        grid: &mut WorldGrid,
        tools: &mut ActiveToolState,
        inventory: &mut Inventory,
        simulator: &mut FallingBlockSimulator,
        now: u64,
    ) -> Result<ClickOutcome, WorldError> {
        let Some(tool) = tools.active() else {
            return Ok(ClickOutcome::Ignored);
        };
        let material = grid.material(pos)?;

        if !tool.allows(material) {
            debug!("{:?} rejected on {:?} at {:?}", tool, material, pos);
            tools.flash_rejection(tool, now, self.flash_ticks);
            return Ok(ClickOutcome::Rejected {
                tool,
                reason: RejectReason::ToolMismatch,
            });
        }

        if tool == ToolKind::Inventory {
            self.place(pos, grid, tools, inventory, simulator, now)
        } else {
            self.mine(pos, material, grid, inventory, simulator, now)
        }
    }

    fn place(
        &self,
        pos: GridPos,
        grid: &mut WorldGrid,
        tools: &mut ActiveToolState,
        inventory: &mut Inventory,
        simulator: &mut FallingBlockSimulator,
        now: u64,
    ) -> Result<ClickOutcome, WorldError> {
        if self.placement == PlacementPolicy::RequireSupport
            && !grid.has_solid_neighbor(pos)?
        {
            debug!("placement at {:?} rejected: no solid neighbor", pos);
            tools.flash_rejection(ToolKind::Inventory, now, self.flash_ticks);
            return Ok(ClickOutcome::Rejected {
                tool: ToolKind::Inventory,
                reason: RejectReason::NoSupport,
            });
        }

        let held = inventory.release();
        grid.set_material(pos, held)?;
        if held.is_loose() {
            simulator.drop_block(grid, pos, now)?;
        }
        debug!("placed {:?} at {:?}", held, pos);
        Ok(ClickOutcome::Placed { material: held })
    }

    fn mine(
        &self,
        pos: GridPos,
        material: Material,
        grid: &mut WorldGrid,
        inventory: &mut Inventory,
        simulator: &mut FallingBlockSimulator,
        now: u64,
    ) -> Result<ClickOutcome, WorldError> {
        inventory.store(material);
        grid.set_material(pos, Material::Empty)?;
        // Removing support may leave loose material hanging above.
        simulator.check_falling_above(grid, pos, now)?;
        debug!("mined {:?} at {:?}", material, pos);
        Ok(ClickOutcome::Mined { material })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::WorldLayout;

    struct Fixture {
        grid: WorldGrid,
        tools: ActiveToolState,
        inventory: Inventory,
        simulator: FallingBlockSimulator,
        controller: InteractionController,
    }

    impl Fixture {
        fn new(codes: Vec<Vec<u8>>, config: GameConfig) -> Self {
            let layout = WorldLayout::new(codes).unwrap();
            Self {
                grid: WorldGrid::build(&layout),
                tools: ActiveToolState::new(),
                inventory: Inventory::new(),
                simulator: FallingBlockSimulator::new(config.drop_delay_ticks),
                controller: InteractionController::new(&config),
            }
        }

        fn click(&mut self, row: usize, col: usize) -> ClickOutcome {
            self.controller
                .click(
                    GridPos::new(row, col),
                    &mut self.grid,
                    &mut self.tools,
                    &mut self.inventory,
                    &mut self.simulator,
                    0,
                )
                .unwrap()
        }
    }

    fn fixture(codes: Vec<Vec<u8>>) -> Fixture {
        Fixture::new(codes, GameConfig::default())
    }

    #[test]
    fn click_without_a_tool_is_ignored() {
        let mut f = fixture(vec![vec![1]]);
        assert_eq!(f.click(0, 0), ClickOutcome::Ignored);
        assert_eq!(f.grid.material(GridPos::new(0, 0)).unwrap(), Material::Dirt);
    }

    #[test]
    fn pickaxe_on_dirt_flashes_and_changes_nothing() {
        let mut f = fixture(vec![vec![1]]);
        f.tools.select(ToolKind::Pickaxe);
        let outcome = f.click(0, 0);
        assert_eq!(
            outcome,
            ClickOutcome::Rejected {
                tool: ToolKind::Pickaxe,
                reason: RejectReason::ToolMismatch
            }
        );
        assert_eq!(f.grid.material(GridPos::new(0, 0)).unwrap(), Material::Dirt);
        assert!(f.inventory.is_empty());
        assert_eq!(f.tools.flashing(), Some(ToolKind::Pickaxe));
    }

    #[test]
    fn mining_tool_on_empty_cell_is_a_mismatch() {
        let mut f = fixture(vec![vec![0]]);
        f.tools.select(ToolKind::Shovel);
        assert!(matches!(
            f.click(0, 0),
            ClickOutcome::Rejected {
                reason: RejectReason::ToolMismatch,
                ..
            }
        ));
    }

    #[test]
    fn shovel_mines_grass_into_the_inventory() {
        let mut f = fixture(vec![vec![2]]);
        f.tools.select(ToolKind::Shovel);
        assert_eq!(
            f.click(0, 0),
            ClickOutcome::Mined {
                material: Material::Grass
            }
        );
        assert_eq!(
            f.grid.material(GridPos::new(0, 0)).unwrap(),
            Material::Empty
        );
        assert_eq!(f.inventory.peek(), Material::Grass);
    }

    #[test]
    fn placement_roundtrip_restores_the_block() {
        // Mine stone, then place it into the vacated cell.
        let mut f = fixture(vec![vec![4, 1]]);
        f.tools.select(ToolKind::Pickaxe);
        f.click(0, 0);
        f.tools.select(ToolKind::Inventory);
        assert_eq!(
            f.click(0, 0),
            ClickOutcome::Placed {
                material: Material::Stone
            }
        );
        assert_eq!(
            f.grid.material(GridPos::new(0, 0)).unwrap(),
            Material::Stone
        );
        assert_eq!(f.inventory.peek(), Material::Empty);
    }

    #[test]
    fn inventory_tool_on_solid_cell_is_a_mismatch() {
        let mut f = fixture(vec![vec![4]]);
        f.tools.select(ToolKind::Inventory);
        assert!(matches!(
            f.click(0, 0),
            ClickOutcome::Rejected {
                reason: RejectReason::ToolMismatch,
                ..
            }
        ));
    }

    #[test]
    fn unsupported_placement_is_rejected_under_the_gate() {
        // Center cell of an all-empty 3x3 has no solid neighbor.
        let mut f = fixture(vec![vec![0; 3], vec![0; 3], vec![0; 3]]);
        f.inventory.store(Material::Stone);
        f.tools.select(ToolKind::Inventory);
        let outcome = f.click(1, 1);
        assert_eq!(
            outcome,
            ClickOutcome::Rejected {
                tool: ToolKind::Inventory,
                reason: RejectReason::NoSupport
            }
        );
        // The held material stays held.
        assert_eq!(f.inventory.peek(), Material::Stone);
    }

    #[test]
    fn unrestricted_policy_places_anywhere() {
        let config = GameConfig {
            placement: PlacementPolicy::Unrestricted,
            ..GameConfig::default()
        };
        let mut f = Fixture::new(vec![vec![0; 3], vec![0; 3], vec![0; 3]], config);
        f.inventory.store(Material::Stone);
        f.tools.select(ToolKind::Inventory);
        assert_eq!(
            f.click(1, 1),
            ClickOutcome::Placed {
                material: Material::Stone
            }
        );
    }

    #[test]
    fn empty_handed_placement_has_no_visible_effect() {
        let mut f = fixture(vec![vec![0, 4]]);
        f.tools.select(ToolKind::Inventory);
        assert_eq!(
            f.click(0, 0),
            ClickOutcome::Placed {
                material: Material::Empty
            }
        );
        assert!(f.grid.drain_changes().is_empty());
    }

    #[test]
    fn placing_sand_schedules_a_drop() {
        // Sand placed next to stone with a hole below starts falling.
        let mut f = fixture(vec![vec![0, 4], vec![0, 4]]);
        f.inventory.store(Material::Sand);
        f.tools.select(ToolKind::Inventory);
        f.click(0, 0);
        assert!(!f.simulator.is_idle());
    }

    #[test]
    fn mining_under_sand_triggers_the_above_check() {
        let mut f = fixture(vec![vec![6], vec![1]]);
        f.tools.select(ToolKind::Shovel);
        f.click(1, 0);
        assert!(!f.simulator.is_idle());
        let mut now = 0;
        while !f.simulator.is_idle() {
            now += 1;
            f.simulator.tick(&mut f.grid, now).unwrap();
        }
        assert_eq!(
            f.grid.material(GridPos::new(1, 0)).unwrap(),
            Material::Sand
        );
        assert_eq!(
            f.grid.material(GridPos::new(0, 0)).unwrap(),
            Material::Empty
        );
    }
}
