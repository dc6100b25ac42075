//! Tools
//!
//! Tool kinds, the static tool-to-material usage table, and the single
//! global selection state with its timed rejection flash.

use serde::{Deserialize, Serialize};

use crate::world::Material;

/// The selectable tools. `Inventory` is the placement tool; the rest mine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    Pickaxe,
    Axe,
    Shovel,
    Inventory,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Pickaxe,
        ToolKind::Axe,
        ToolKind::Shovel,
        ToolKind::Inventory,
    ];

    /// The fixed set of materials this tool may act on. Static configuration;
    /// never mutated at runtime.
    pub fn allows(self, material: Material) -> bool {
        match self {
            ToolKind::Pickaxe => matches!(material, Material::Stone),
            ToolKind::Axe => matches!(material, Material::Wood | Material::Leaves),
            ToolKind::Shovel => matches!(
                material,
                Material::Dirt | Material::Grass | Material::Sand
            ),
            ToolKind::Inventory => matches!(material, Material::Empty),
        }
    }

    pub fn is_mining(self) -> bool {
        self != ToolKind::Inventory
    }
}

#[derive(Debug, Clone, Copy)]
struct ToolFlash {
    tool: ToolKind,
    until: u64,
}

/// The single global tool selection, plus the transient rejection flash.
///
/// Exactly one tool (or none) is active at a time. Selecting the active tool
/// again deselects it; selecting another replaces it.
#[derive(Debug, Default)]
pub struct ActiveToolState {
    active: Option<ToolKind>,
    flash: Option<ToolFlash>,
}

impl ActiveToolState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle-select a tool and return the new active tool.
    pub fn select(&mut self, tool: ToolKind) -> Option<ToolKind> {
        self.active = if self.active == Some(tool) {
            None
        } else {
            Some(tool)
        };
        self.active
    }

    pub fn active(&self) -> Option<ToolKind> {
        self.active
    }

    /// Mark a tool as rejected until `now + duration` ticks.
    pub fn flash_rejection(&mut self, tool: ToolKind, now: u64, duration: u64) {
        self.flash = Some(ToolFlash {
            tool,
            until: now + duration,
        });
    }

    /// The tool currently flashing a rejection, if any.
    pub fn flashing(&self) -> Option<ToolKind> {
        self.flash.map(|f| f.tool)
    }

    /// Clear the flash once its deadline passes, returning the tool whose
    /// flash just ended.
    pub fn clear_expired_flash(&mut self, now: u64) -> Option<ToolKind> {
        if let Some(flash) = self.flash
            && now >= flash.until
        {
            self.flash = None;
            return Some(flash.tool);
        }
        None
    }

    /// Back to no selection, no flash. Used on new game.
    pub fn reset(&mut self) {
        self.active = None;
        self.flash = None;
    }
}
