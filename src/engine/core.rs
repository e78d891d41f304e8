// src/engine/core.rs

//! Pure, synchronous driving loop.
//!
//! An [`EpisodeRunner`] repeatedly asks its [`ActionSource`] for an action and
//! feeds it to [`Simulation::step`] until the episode is done. It performs no
//! IO and can be stepped manually, so an episode can be inspected or cloned
//! between steps.

use tracing::{debug, info};

use crate::engine::policy::ActionSource;
use crate::errors::Result;
use crate::sim::{Simulation, StepResult, TerminationReason};
use crate::types::Ticks;

/// Final state of one driven episode.
#[derive(Debug, Clone)]
pub struct EpisodeOutcome {
    pub steps: u64,
    pub time: Ticks,
    /// `None` when the action source ran dry before the episode ended.
    pub reason: Option<TerminationReason>,
    pub simulation: Simulation,
}

#[derive(Debug, Clone)]
pub struct EpisodeRunner<P: ActionSource> {
    sim: Simulation,
    policy: P,
}

impl<P: ActionSource> EpisodeRunner<P> {
    pub fn new(sim: Simulation, policy: P) -> Self {
        Self { sim, policy }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    /// Run a single step.
    ///
    /// Returns `Ok(None)` when the episode is already done or the action
    /// source has nothing left.
    pub fn step(&mut self) -> Result<Option<StepResult>> {
        if self.sim.is_done() {
            return Ok(None);
        }
        let Some(action) = self.policy.next_action(&self.sim) else {
            debug!(
                steps = self.sim.state().steps_taken(),
                "action source exhausted before episode end"
            );
            return Ok(None);
        };
        self.sim.step(action).map(Some)
    }

    /// Step until done (or until the action source stops).
    pub fn run(mut self) -> Result<EpisodeOutcome> {
        info!(
            instance = self.sim.instance().name().unwrap_or("<unnamed>"),
            operations = self.sim.instance().operation_count(),
            "episode started"
        );

        while self.step()?.is_some() {}

        Ok(EpisodeOutcome {
            steps: self.sim.state().steps_taken(),
            time: self.sim.now(),
            reason: self.sim.state().termination(),
            simulation: self.sim,
        })
    }
}
