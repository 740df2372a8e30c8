//! Setup-time errors
//!
//! Nothing in the per-frame path returns these; a bad configuration stops the
//! game from starting instead.

use thiserror::Error;

use crate::sim::EntityKind;

/// Errors raised while building the simulation from its configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("texture '{key}' for {kind} is not in the atlas")]
    MissingTexture { kind: EntityKind, key: String },
    #[error("player texture '{key}' is not in the atlas")]
    MissingPlayerTexture { key: String },
    #[error("shot spec nests {depth} levels deep (max {max})")]
    ShotTooDeep { depth: usize, max: usize },
    #[error("fire binding for slot {slot} has a non-positive interval")]
    InvalidFireInterval { slot: u8 },
    #[error("fire slot {slot} is out of range (max {max})")]
    InvalidFireSlot { slot: u8, max: u8 },
    #[error("{kind} pool must start with at least one instance")]
    InvalidPool { kind: EntityKind },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
