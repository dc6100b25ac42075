//! Physics
//!
//! Gravity for loose material, driven by an explicit delayed-task queue.

pub mod gravity;
pub mod scheduler;

pub use gravity::{FallEvent, FallingBlockSimulator};
pub use scheduler::{CascadeId, DropScheduler, FallStep};
