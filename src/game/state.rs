//! Game State
//!
//! Central session object wiring the grid, tool selection, inventory, and
//! gravity simulator behind the discrete inputs a presentation layer feeds
//! in: tool choices, block clicks, clock ticks, and reset. Everything the
//! presentation needs to mirror is published through a drainable event log.

use log::info;

use crate::config::GameConfig;
use crate::error::WorldError;
use crate::game::interaction::{ClickOutcome, InteractionController, RejectReason};
use crate::game::inventory::Inventory;
use crate::game::tools::{ActiveToolState, ToolKind};
use crate::physics::FallingBlockSimulator;
use crate::world::{GridPos, Material, WorldGrid, WorldLayout};

/// Notification for the presentation layer, in the order things happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A cell's material changed; update its visual tag.
    BlockChanged { pos: GridPos, material: Material },
    /// The active tool changed (`None` = deselected).
    ToolSelected { tool: Option<ToolKind> },
    /// A click was rejected; start the tool's error flash.
    ToolRejected {
        tool: ToolKind,
        reason: RejectReason,
    },
    /// The rejection flash interval elapsed; clear the visual.
    ToolFlashCleared { tool: ToolKind },
    /// The inventory's next-to-place material changed.
    InventoryChanged { held: Material },
    /// The world was rebuilt from its initial layout; re-read the grid.
    WorldReset,
}

/// One game session: world, tools, inventory, physics, and the tick clock.
pub struct GameState {
    config: GameConfig,
    layout: WorldLayout,
    grid: WorldGrid,
    tools: ActiveToolState,
    inventory: Inventory,
    simulator: FallingBlockSimulator,
    controller: InteractionController,
    clock: u64,
    events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(WorldLayout::default(), GameConfig::default())
    }
}

impl GameState {
    pub fn new(layout: WorldLayout, config: GameConfig) -> Self {
        let grid = WorldGrid::build(&layout);
        info!(
            "new game: {}x{} world, placement {:?}",
            grid.height(),
            grid.width(),
            config.placement
        );
        Self {
            grid,
            tools: ActiveToolState::new(),
            inventory: Inventory::new(),
            simulator: FallingBlockSimulator::new(config.drop_delay_ticks),
            controller: InteractionController::new(&config),
            clock: 0,
            events: Vec::new(),
            layout,
            config,
        }
    }

    pub fn grid(&self) -> &WorldGrid {
        &self.grid
    }

    pub fn active_tool(&self) -> Option<ToolKind> {
        self.tools.active()
    }

    pub fn held_material(&self) -> Material {
        self.inventory.peek()
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// True when no falling block is in flight.
    pub fn is_settled(&self) -> bool {
        self.simulator.is_idle()
    }

    /// Handle a "tool chosen" input event (toggle semantics).
    pub fn select_tool(&mut self, tool: ToolKind) {
        let active = self.tools.select(tool);
        self.events.push(GameEvent::ToolSelected { tool: active });
    }

    /// Handle a click on a grid position.
    pub fn click(&mut self, pos: GridPos) -> Result<ClickOutcome, WorldError> {
        let held_before = self.inventory.peek();
        let outcome = self.controller.click(
            pos,
            &mut self.grid,
            &mut self.tools,
            &mut self.inventory,
            &mut self.simulator,
            self.clock,
        )?;
        if let ClickOutcome::Rejected { tool, reason } = outcome {
            self.events.push(GameEvent::ToolRejected { tool, reason });
        }
        self.publish_block_changes();
        let held = self.inventory.peek();
        if held != held_before {
            self.events.push(GameEvent::InventoryChanged { held });
        }
        Ok(outcome)
    }

    /// Advance the clock one tick: run due fall steps and expire the
    /// rejection flash.
    pub fn tick(&mut self) -> Result<(), WorldError> {
        self.clock += 1;
        self.simulator.tick(&mut self.grid, self.clock)?;
        self.publish_block_changes();
        if let Some(tool) = self.tools.clear_expired_flash(self.clock) {
            self.events.push(GameEvent::ToolFlashCleared { tool });
        }
        Ok(())
    }

    /// Tick until every cascade has landed. `max_ticks` bounds the loop
    /// against a contract bug; returns the ticks spent.
    pub fn settle(&mut self, max_ticks: u64) -> Result<u64, WorldError> {
        let mut spent = 0;
        while !self.is_settled() && spent < max_ticks {
            self.tick()?;
            spent += 1;
        }
        Ok(spent)
    }

    /// New game: rebuild the world from the original layout, clear tool
    /// selection and inventory, and cancel in-flight cascades so nothing
    /// leaks into the fresh session.
    pub fn reset(&mut self) {
        info!("reset: rebuilding world from initial layout");
        self.simulator.cancel_all();
        self.grid = WorldGrid::build(&self.layout);
        self.tools.reset();
        self.inventory.reset();
        self.clock = 0;
        self.events.push(GameEvent::WorldReset);
    }

    /// Take all pending presentation events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn publish_block_changes(&mut self) {
        for change in self.grid.drain_changes() {
            self.events.push(GameEvent::BlockChanged {
                pos: change.pos,
                material: change.material,
            });
        }
    }
}
