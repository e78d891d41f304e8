// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::types::Ticks;

#[derive(Error, Debug)]
pub enum LabError {
    /// The problem definition is malformed; no simulation can be built.
    #[error("Invalid instance: {0}")]
    InvalidInstance(String),

    /// `step` was called after the episode reached `Done`.
    #[error("Simulation already terminated after {steps} steps")]
    TerminalState { steps: u64 },

    /// The action does not name a currently eligible operation. State is
    /// untouched.
    #[error("Ineligible action {action} at t={time}: {reason}")]
    IneligibleAction {
        action: String,
        time: Ticks,
        reason: String,
    },

    /// Internal consistency is broken; the episode must be aborted.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A replayed episode diverged from the recorded history.
    #[error("Replay diverged from recorded history at step {step}")]
    ReplayMismatch { step: u64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LabError {
    /// Whether the error leaves the episode in a state the caller can keep
    /// driving.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LabError::TerminalState { .. }
                | LabError::IneligibleAction { .. }
                | LabError::Serialization(_)
        )
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, LabError>;
