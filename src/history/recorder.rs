// src/history/recorder.rs

use tracing::trace;

use crate::errors::{LabError, Result};
use crate::history::entry::{ActionRecord, HistoryEntry, StateSummary};
use crate::types::Ticks;

/// Append-only log of successful steps.
///
/// The owning [`Simulation`](crate::sim::Simulation) only hands out `&History`,
/// so callers can read but never append or clear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    ///
    /// Step indices must be strictly increasing and time must not go
    /// backwards; anything else is a stepper defect.
    pub fn record(
        &mut self,
        step_index: u64,
        time: Ticks,
        action: ActionRecord,
        state: StateSummary,
    ) -> Result<()> {
        if let Some(last) = self.entries.last() {
            if step_index <= last.step_index {
                return Err(LabError::InvariantViolation(format!(
                    "history step index {step_index} does not follow {}",
                    last.step_index
                )));
            }
            if time < last.simulation_time {
                return Err(LabError::InvariantViolation(format!(
                    "history time {time} at step {step_index} precedes t={}",
                    last.simulation_time
                )));
            }
        }

        trace!(step = step_index, time, operation = %action.operation, "history: recorded step");

        self.entries.push(HistoryEntry {
            step_index,
            simulation_time: time,
            action_taken: action,
            state,
        });
        Ok(())
    }

    /// Recorded entries in step order.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    /// Drop every entry. Meant for an episode reset.
    pub fn reset(&mut self) {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
