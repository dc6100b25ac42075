//! Game Configuration
//!
//! Tunable gameplay parameters. Loadable from JSON so a host can ship its
//! own balance without recompiling; `Default` matches the reference world.

use serde::{Deserialize, Serialize};

/// Whether the inventory tool may place material into unsupported cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementPolicy {
    /// Any empty cell accepts a placement.
    Unrestricted,
    /// Placement requires at least one solid orthogonal neighbor.
    RequireSupport,
}

/// Central configuration for a game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Support rule applied when placing material from the inventory.
    pub placement: PlacementPolicy,
    /// Ticks between each one-row step of a falling block.
    pub drop_delay_ticks: u64,
    /// Ticks a tool stays visually flagged after a rejected click.
    pub flash_ticks: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            placement: PlacementPolicy::RequireSupport,
            drop_delay_ticks: 1,
            flash_ticks: 8,
        }
    }
}
