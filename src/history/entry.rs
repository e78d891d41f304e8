// src/history/entry.rs

use serde::{Deserialize, Serialize};

use crate::sim::{Action, SimStatus};
use crate::types::{MachineId, OperationId, Ticks};

/// What a successful step actually did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The action as submitted by the caller.
    pub action: Action,
    /// The operation it resolved to.
    pub operation: OperationId,
    pub machine: MachineId,
    /// Dispatch time.
    pub start: Ticks,
    /// Scheduled completion time.
    pub end: Ticks,
}

/// Compact view of the simulation right after a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSummary {
    pub status: SimStatus,
    pub time: Ticks,
    /// Operation occupying each machine, indexed by machine id.
    pub machines: Vec<Option<OperationId>>,
    /// Index of the next operation to dispatch, per job. Equal to the job's
    /// length once every operation of the job was dispatched.
    pub next_operation: Vec<usize>,
    /// Number of completed operations.
    pub completed: usize,
}

/// One immutable line of the episode log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub step_index: u64,
    pub simulation_time: Ticks,
    pub action_taken: ActionRecord,
    pub state: StateSummary,
}
