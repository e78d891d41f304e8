// src/sim/action.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{JobId, OperationId};

/// Caller decision for one step.
///
/// Every variant resolves to exactly one operation, which must be eligible
/// at the current simulated time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Position in the eligible list, which is sorted by `(job, index)`.
    Index(usize),
    /// The next operation of this job.
    Job(JobId),
    /// This exact operation.
    Operation(OperationId),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Index(i) => write!(f, "index({i})"),
            Action::Job(j) => write!(f, "job({j})"),
            Action::Operation(op) => write!(f, "operation({op})"),
        }
    }
}
