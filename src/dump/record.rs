// src/dump/record.rs

use serde::{Deserialize, Serialize};

use crate::errors::{LabError, Result};
use crate::history::HistoryEntry;
use crate::instance::{Instance, RawInstance};
use crate::types::LogLevel;

/// The exact top-level key set of a persisted dump.
pub const DUMP_KEYS: [&str; 3] = ["state_history", "instance", "loglevel"];

/// Borrowed view of an episode, ready to serialize.
///
/// Holds references only; building one copies nothing.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DumpRecord<'a> {
    pub state_history: &'a [HistoryEntry],
    pub instance: &'a Instance,
    pub loglevel: LogLevel,
}

/// Combine history, instance and verbosity into a dump record.
///
/// Pure: the same inputs always give the same record. Fails when there is
/// nothing to report.
pub fn dump<'a>(
    history: &'a [HistoryEntry],
    instance: &'a Instance,
    loglevel: LogLevel,
) -> Result<DumpRecord<'a>> {
    if history.is_empty() {
        return Err(LabError::Serialization(
            "history is empty; step the simulation before dumping".to_string(),
        ));
    }

    Ok(DumpRecord {
        state_history: history,
        instance,
        loglevel,
    })
}

/// A dump read back from disk.
///
/// The instance comes back as its raw definition; rebuild it with
/// [`Instance::build`] to step again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OwnedDump {
    pub state_history: Vec<HistoryEntry>,
    pub instance: RawInstance,
    pub loglevel: LogLevel,
}
