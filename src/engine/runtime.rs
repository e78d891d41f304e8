// src/engine/runtime.rs

//! Async shell that rolls out several independent episodes in parallel.
//!
//! Each episode gets its own [`Simulation`] (state + history) over the same
//! shared `Arc<Instance>`, and runs on Tokio's blocking pool since stepping
//! is pure CPU work.

use std::sync::Arc;

use tracing::{debug, info};

use crate::engine::core::{EpisodeOutcome, EpisodeRunner};
use crate::engine::policy::ActionSource;
use crate::errors::{Error, LabError, Result};
use crate::instance::Instance;
use crate::sim::{SimOptions, Simulation};

/// Run `episodes` episodes, each driven by its own clone of `policy`.
///
/// Outcomes are returned in submission order. The first failing episode's
/// error is returned.
pub async fn run_episodes<P>(
    instance: Arc<Instance>,
    options: SimOptions,
    policy: P,
    episodes: usize,
) -> Result<Vec<EpisodeOutcome>>
where
    P: ActionSource + Clone + 'static,
{
    info!(episodes, "rolling out episodes");

    let handles: Vec<_> = (0..episodes)
        .map(|episode| {
            let instance = Arc::clone(&instance);
            let policy = policy.clone();
            tokio::task::spawn_blocking(move || {
                debug!(episode, "episode worker started");
                EpisodeRunner::new(Simulation::new(instance, options), policy).run()
            })
        })
        .collect();

    let mut outcomes = Vec::with_capacity(episodes);
    for handle in handles {
        let outcome = handle.await.map_err(Error::from)??;
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

/// Check that every outcome recorded exactly the same history as the first.
///
/// Fails with [`LabError::ReplayMismatch`] at the first differing step.
pub fn ensure_identical_histories(outcomes: &[EpisodeOutcome]) -> Result<()> {
    let Some((first, rest)) = outcomes.split_first() else {
        return Ok(());
    };
    let reference = first.simulation.history().entries();

    for outcome in rest {
        let entries = outcome.simulation.history().entries();
        let diverged = reference
            .iter()
            .zip(entries.iter())
            .position(|(a, b)| a != b)
            .or_else(|| (reference.len() != entries.len()).then(|| reference.len().min(entries.len())));

        if let Some(step) = diverged {
            return Err(LabError::ReplayMismatch { step: step as u64 });
        }
    }

    debug!(episodes = outcomes.len(), "all episode histories identical");
    Ok(())
}
