// src/sim/simulation.rs

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::dump::{self, DumpRecord};
use crate::errors::{LabError, Result};
use crate::history::{ActionRecord, History};
use crate::instance::{Instance, RawInstance};
use crate::sim::action::Action;
use crate::sim::state::{SimState, SimStatus, TerminationReason};
use crate::sim::step_result::StepResult;
use crate::types::{LogLevel, OperationId, Ticks};

/// Construction-time parameters of a simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimOptions {
    /// Stop after this many successful steps, even if operations remain.
    pub max_steps: Option<u64>,
    /// Verbosity marker carried into dumps.
    pub loglevel: LogLevel,
}

/// One episode over a shared [`Instance`].
///
/// Owns its [`SimState`] and [`History`] exclusively; both are only exposed
/// by shared reference. Cloning a simulation yields an independent
/// checkpoint that shares nothing mutable with its source.
#[derive(Debug, Clone)]
pub struct Simulation {
    instance: Arc<Instance>,
    options: SimOptions,
    state: SimState,
    history: History,
}

impl Simulation {
    pub fn new(instance: Arc<Instance>, options: SimOptions) -> Self {
        let state = Self::initial_state(&instance, &options);
        Self {
            instance,
            options,
            state,
            history: History::new(),
        }
    }

    /// Validate `raw` and start a simulation over it.
    pub fn from_raw(raw: RawInstance, options: SimOptions) -> Result<Self> {
        let instance = Instance::build(raw)?;
        Ok(Self::new(Arc::new(instance), options))
    }

    fn initial_state(instance: &Instance, options: &SimOptions) -> SimState {
        let mut state = SimState::new(instance);
        if options.max_steps == Some(0) {
            state.terminate(TerminationReason::StepBudgetExhausted);
        }
        state
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// Shared handle to the instance, e.g. to start a sibling episode.
    pub fn shared_instance(&self) -> Arc<Instance> {
        Arc::clone(&self.instance)
    }

    pub fn loglevel(&self) -> LogLevel {
        self.options.loglevel
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn status(&self) -> SimStatus {
        self.state.status()
    }

    pub fn is_done(&self) -> bool {
        self.state.status() == SimStatus::Done
    }

    pub fn now(&self) -> Ticks {
        self.state.now()
    }

    pub fn eligible_operations(&self) -> Vec<OperationId> {
        self.state.eligible_operations(&self.instance)
    }

    /// Go back to `Ready`: zero time, nothing dispatched, empty history.
    pub fn reset(&mut self) {
        self.state = Self::initial_state(&self.instance, &self.options);
        self.history.reset();
        debug!("simulation reset");
    }

    /// Build the dump record for everything recorded so far.
    ///
    /// An aborted episode has nothing valid to report.
    pub fn dump(&self) -> Result<DumpRecord<'_>> {
        if let Some(reason) = self.state.abort_reason() {
            return Err(LabError::Serialization(format!(
                "episode was aborted, refusing to dump: {reason}"
            )));
        }
        dump::dump(self.history.entries(), &self.instance, self.options.loglevel)
    }

    /// Dispatch the operation selected by `action` and advance time to the
    /// next decision point.
    ///
    /// On `TerminalState` or `IneligibleAction` nothing has changed, so the
    /// caller may retry. `InvariantViolation` aborts the episode: every later
    /// `step` fails and `dump` refuses until [`reset`](Self::reset).
    pub fn step(&mut self, action: Action) -> Result<StepResult> {
        if let Some(reason) = self.state.abort_reason() {
            return Err(LabError::InvariantViolation(format!(
                "episode was aborted: {reason}"
            )));
        }

        let result = self.apply(action);
        if let Err(LabError::InvariantViolation(reason)) = &result {
            self.abort(reason.clone());
        }
        result
    }

    /// Abort the episode after a fatal condition.
    ///
    /// The state is left as it was for inspection, but the episode can no
    /// longer step or dump.
    pub fn abort(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        error!(
            steps = self.state.steps_taken(),
            time = self.state.now(),
            %reason,
            "episode aborted"
        );
        self.state.abort(reason);
    }

    fn apply(&mut self, action: Action) -> Result<StepResult> {
        if self.state.termination().is_some() {
            return Err(LabError::TerminalState {
                steps: self.state.steps_taken(),
            });
        }

        let op_id = match self.resolve_action(action) {
            Ok(op) => op,
            Err(err) => {
                warn!(%action, time = self.state.now(), error = %err, "rejected action");
                return Err(err);
            }
        };

        let (machine, duration) = match self.instance.operation(op_id) {
            Some(op) => (op.machine, op.duration),
            None => {
                return Err(LabError::InvariantViolation(format!(
                    "resolved operation {op_id} is missing from the instance"
                )));
            }
        };

        let step_index = self.state.steps_taken();
        let start = self.state.now();
        let end = start.checked_add(duration).ok_or_else(|| {
            LabError::InvariantViolation(format!("completion time of {op_id} overflows"))
        })?;

        self.state.start(op_id, machine, end)?;
        debug!(
            step = step_index,
            time = start,
            job = op_id.job,
            operation = op_id.index,
            machine,
            end,
            "dispatched operation"
        );

        self.advance_to_decision_point()?;
        self.state.finish_step();

        if self.state.completed_count() == self.instance.operation_count() {
            self.state.terminate(TerminationReason::Completed);
        } else if self
            .options
            .max_steps
            .is_some_and(|max| self.state.steps_taken() >= max)
        {
            self.state.terminate(TerminationReason::StepBudgetExhausted);
        }

        self.state.verify(&self.instance)?;

        let time = self.state.now();
        self.history.record(
            step_index,
            time,
            ActionRecord {
                action,
                operation: op_id,
                machine,
                start,
                end,
            },
            self.state.summary(),
        )?;

        let reason = self.state.termination();
        if let Some(reason) = reason {
            info!(
                steps = self.state.steps_taken(),
                time,
                ?reason,
                "episode finished"
            );
        }

        Ok(StepResult {
            step_index,
            operation: op_id,
            time,
            done: reason.is_some(),
            reason,
        })
    }

    /// Map `action` to an eligible operation without touching any state.
    fn resolve_action(&self, action: Action) -> Result<OperationId> {
        let eligible = self.eligible_operations();

        let op = match action {
            Action::Index(i) => {
                return eligible.get(i).copied().ok_or_else(|| {
                    self.ineligible(
                        action,
                        format!("index {i} out of range ({} eligible)", eligible.len()),
                    )
                });
            }
            Action::Job(job) => {
                let Some(job_def) = self.instance.job(job) else {
                    return Err(self.ineligible(action, format!("unknown job {job}")));
                };
                let next = self.state.next_operation(job).unwrap_or(0);
                if next >= job_def.operations.len() {
                    return Err(self.ineligible(
                        action,
                        format!("job {job} has no operations left to dispatch"),
                    ));
                }
                OperationId::new(job, next)
            }
            Action::Operation(op) => {
                if self.instance.operation(op).is_none() {
                    return Err(self.ineligible(action, format!("unknown operation {op}")));
                }
                op
            }
        };

        if eligible.contains(&op) {
            Ok(op)
        } else {
            Err(self.ineligible(action, self.ineligibility_reason(op)))
        }
    }

    fn ineligibility_reason(&self, op: OperationId) -> String {
        let next = self.state.next_operation(op.job).unwrap_or(0);
        if op.index < next {
            return format!("operation {op} was already dispatched");
        }
        if op.index > next {
            return format!("operation {op} waits for J{}.{next}", op.job);
        }
        if let Some(pred) = self
            .instance
            .predecessors(op)
            .into_iter()
            .find(|pred| !self.state.is_completed(*pred))
        {
            return format!("predecessor {pred} of {op} has not completed");
        }
        if let Some(busy) = self
            .instance
            .operation(op)
            .and_then(|o| self.state.machine(o.machine))
        {
            return format!(
                "machine of {op} is busy with {} until t={}",
                busy.operation, busy.finishes_at
            );
        }
        format!("operation {op} is not eligible")
    }

    fn ineligible(&self, action: Action, reason: String) -> LabError {
        LabError::IneligibleAction {
            action: action.to_string(),
            time: self.state.now(),
            reason,
        }
    }

    /// Move time forward only while nothing can be dispatched.
    fn advance_to_decision_point(&mut self) -> Result<()> {
        loop {
            if self.state.completed_count() == self.instance.operation_count() {
                return Ok(());
            }
            if !self.state.eligible_operations(&self.instance).is_empty() {
                return Ok(());
            }

            let Some(next) = self.state.next_completion_time() else {
                return Err(LabError::InvariantViolation(format!(
                    "deadlock at t={}: nothing eligible, nothing running, {} of {} operations completed",
                    self.state.now(),
                    self.state.completed_count(),
                    self.instance.operation_count()
                )));
            };

            self.state.advance_to(next)?;
            let finished = self.state.complete_finished();
            debug!(time = next, ?finished, "advanced to next completion");
        }
    }
}
