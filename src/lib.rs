//! Minegrid
//!
//! Interaction and physics core for a 2D block-mining sandbox: a fixed-size
//! grid of typed blocks, a single-selection tool set, a pocket inventory,
//! a click protocol that mines or places material, and delay-driven gravity
//! for loose blocks. Rendering stays external; the core publishes every
//! change through a drainable event log.
//!
//! # Modules
//!
//! - [`world`] - Materials, layouts, and the block grid
//! - [`game`] - Tools, inventory, click interaction, and session state
//! - [`physics`] - The falling-block simulator and its task scheduler
//! - [`config`] - Tunable gameplay parameters
//!
//! # Example
//!
//! ```
//! use minegrid::{GameState, GridPos, Material, ToolKind};
//!
//! let mut game = GameState::default();
//! game.select_tool(ToolKind::Shovel);
//! game.click(GridPos::new(15, 3))?; // mine a grass block
//! assert_eq!(game.held_material(), Material::Grass);
//!
//! // Drive the clock so any triggered falls play out.
//! game.settle(64)?;
//! for event in game.drain_events() {
//!     // feed the renderer
//!     let _ = event;
//! }
//! # Ok::<(), minegrid::WorldError>(())
//! ```

pub mod config;
pub mod error;
pub mod game;
pub mod physics;
pub mod world;

pub use config::{GameConfig, PlacementPolicy};
pub use error::WorldError;
pub use game::{ClickOutcome, GameEvent, GameState, RejectReason, ToolKind};
pub use physics::{CascadeId, FallEvent, FallingBlockSimulator};
pub use world::{GridPos, Material, WorldGrid, WorldLayout};
