//! Game Systems
//!
//! Tools, inventory, the click protocol, and the session state that ties
//! them to the world grid and physics.

pub mod interaction;
pub mod inventory;
pub mod state;
pub mod tools;

pub use interaction::{ClickOutcome, InteractionController, RejectReason};
pub use inventory::Inventory;
pub use state::{GameEvent, GameState};
pub use tools::{ActiveToolState, ToolKind};
