//! Error Types
//!
//! Failures in the world core are either build-time layout problems or
//! grid-contract violations. Tool rejections are not errors; they come back
//! as [`ClickOutcome::Rejected`](crate::game::interaction::ClickOutcome).

/// Errors raised by world construction and grid access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// Malformed initial world description. Fatal at build time; no partial
    /// world is produced.
    #[error("invalid world layout: {reason}")]
    InvalidLayout { reason: String },

    /// Grid access outside the world dimensions. A contract violation by the
    /// caller; never clamped.
    #[error("position ({row}, {col}) is outside the {height}x{width} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },
}

impl WorldError {
    pub(crate) fn invalid_layout(reason: impl Into<String>) -> Self {
        Self::InvalidLayout {
            reason: reason.into(),
        }
    }
}
