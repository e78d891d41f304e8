// src/dump/replay.rs

use tracing::{debug, info};

use crate::dump::record::OwnedDump;
use crate::errors::{LabError, Result};
use crate::sim::{SimOptions, SimStatus, Simulation};

/// Re-run the recorded actions against a fresh simulation and check that
/// every re-derived entry matches the recorded one.
///
/// Returns the replayed simulation on success.
pub fn replay(dump: &OwnedDump) -> Result<Simulation> {
    let operation_count = dump
        .instance
        .jobs
        .iter()
        .map(|job| job.operations.len())
        .sum::<usize>();

    // A dump cut short by a step budget must be replayed with the same budget
    // so the final entry reports `Done` again.
    let budget_hit = dump.state_history.last().is_some_and(|last| {
        last.state.status == SimStatus::Done && last.state.completed < operation_count
    });
    let options = SimOptions {
        max_steps: budget_hit.then_some(dump.state_history.len() as u64),
        loglevel: dump.loglevel,
    };

    let mut sim = Simulation::from_raw(dump.instance.clone(), options)?;

    for expected in dump.state_history.iter() {
        sim.step(expected.action_taken.action)
            .map_err(|err| match err {
                LabError::IneligibleAction { .. } | LabError::TerminalState { .. } => {
                    debug!(error = %err, step = expected.step_index, "recorded action rejected on replay");
                    LabError::ReplayMismatch {
                        step: expected.step_index,
                    }
                }
                other => other,
            })?;
        let actual = sim.history().last().ok_or_else(|| {
            LabError::InvariantViolation("step succeeded without a history entry".to_string())
        })?;
        if actual != expected {
            debug!(?expected, ?actual, "replay diverged");
            return Err(LabError::ReplayMismatch {
                step: expected.step_index,
            });
        }
    }

    info!(steps = dump.state_history.len(), "replay matched recorded history");
    Ok(sim)
}
