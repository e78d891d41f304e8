// src/sim/step_result.rs

use crate::sim::state::TerminationReason;
use crate::types::{OperationId, Ticks};

/// Structured result of a single successful `Simulation::step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Index of the step that just ran (0-based).
    pub step_index: u64,
    /// Operation that was dispatched.
    pub operation: OperationId,
    /// Simulated time after advancing to the next decision point.
    pub time: Ticks,
    /// Whether the episode is now over.
    pub done: bool,
    /// Why it is over, when `done` is set.
    pub reason: Option<TerminationReason>,
}
