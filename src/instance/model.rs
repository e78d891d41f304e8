// src/instance/model.rs

use serde::{Deserialize, Serialize};

use crate::types::Ticks;

/// Raw problem definition as read from an instance file.
///
/// ```toml
/// name = "ft-2x2"
/// machines = ["M1", "M2"]
///
/// [[jobs]]
/// name = "J0"
/// operations = [
///     { machine = "M1", duration = 1 },
///     { machine = "M2", duration = 1 },
/// ]
///
/// [[jobs]]
/// name = "J1"
/// operations = [
///     { machine = "M2", duration = 1 },
///     { machine = "M1", duration = 1, after = [{ job = "J0", operation = 0 }] },
/// ]
/// ```
///
/// Nothing here is checked; [`Instance::build`](super::Instance::build)
/// performs the validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawInstance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Machine names; an operation refers to its machine by name.
    pub machines: Vec<String>,

    pub jobs: Vec<RawJob>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawJob {
    pub name: String,

    /// Operations in precedence order: operation `k` follows `k - 1`.
    pub operations: Vec<RawOperation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawOperation {
    pub machine: String,

    /// Processing time; must be positive.
    pub duration: Ticks,

    /// Extra predecessors in other jobs, on top of the job chain.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub after: Vec<OperationRef>,
}

/// Reference to an operation by job name and position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperationRef {
    pub job: String,
    pub operation: usize,
}

impl RawOperation {
    pub fn new(machine: impl Into<String>, duration: Ticks) -> Self {
        Self {
            machine: machine.into(),
            duration,
            after: Vec::new(),
        }
    }
}
