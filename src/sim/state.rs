// src/sim/state.rs

//! Mutable per-episode snapshot.
//!
//! Every mutator is `pub(crate)`: only the stepper in
//! [`simulation`](super::simulation) changes a [`SimState`]. Callers get
//! `&SimState` and the read-only accessors.

use serde::{Deserialize, Serialize};

use crate::errors::{LabError, Result};
use crate::history::StateSummary;
use crate::instance::Instance;
use crate::types::{JobId, MachineId, OperationId, Ticks};

/// Coarse lifecycle of an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimStatus {
    /// Constructed or reset; no step taken yet.
    Ready,
    /// At least one step taken, not terminated.
    Running,
    /// Every operation completed, or the step budget ran out.
    Done,
    /// A fatal error left the episode unusable. Only `reset` recovers.
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    Completed,
    StepBudgetExhausted,
}

/// An operation currently occupying a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunningOperation {
    pub operation: OperationId,
    pub started_at: Ticks,
    pub finishes_at: Ticks,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimState {
    now: Ticks,
    /// Indexed by machine id.
    machines: Vec<Option<RunningOperation>>,
    /// Next operation index to dispatch, per job.
    next_operation: Vec<usize>,
    /// Completion time per operation, `[job][index]`.
    completed: Vec<Vec<Option<Ticks>>>,
    completed_count: usize,
    steps_taken: u64,
    termination: Option<TerminationReason>,
    aborted: Option<String>,
}

impl SimState {
    pub fn new(instance: &Instance) -> Self {
        Self {
            now: 0,
            machines: vec![None; instance.machines().len()],
            next_operation: vec![0; instance.jobs().len()],
            completed: instance
                .jobs()
                .iter()
                .map(|job| vec![None; job.operations.len()])
                .collect(),
            completed_count: 0,
            steps_taken: 0,
            termination: None,
            aborted: None,
        }
    }

    pub fn now(&self) -> Ticks {
        self.now
    }

    pub fn status(&self) -> SimStatus {
        if self.aborted.is_some() {
            SimStatus::Aborted
        } else if self.termination.is_some() {
            SimStatus::Done
        } else if self.steps_taken == 0 {
            SimStatus::Ready
        } else {
            SimStatus::Running
        }
    }

    pub fn termination(&self) -> Option<TerminationReason> {
        self.termination
    }

    /// Why the episode was aborted, if it was.
    pub fn abort_reason(&self) -> Option<&str> {
        self.aborted.as_deref()
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    pub fn completed_count(&self) -> usize {
        self.completed_count
    }

    pub fn machine(&self, machine: MachineId) -> Option<&RunningOperation> {
        self.machines.get(machine).and_then(|slot| slot.as_ref())
    }

    pub fn machines(&self) -> &[Option<RunningOperation>] {
        &self.machines
    }

    pub fn is_machine_free(&self, machine: MachineId) -> bool {
        self.machine(machine).is_none()
    }

    pub fn next_operation(&self, job: JobId) -> Option<usize> {
        self.next_operation.get(job).copied()
    }

    pub fn completion_time(&self, op: OperationId) -> Option<Ticks> {
        self.completed.get(op.job)?.get(op.index).copied().flatten()
    }

    pub fn is_completed(&self, op: OperationId) -> bool {
        self.completion_time(op).is_some()
    }

    /// Whether `op` may be dispatched right now: it is its job's next
    /// operation, every predecessor has completed, and its machine is free.
    pub fn is_eligible(&self, instance: &Instance, op: OperationId) -> bool {
        let Some(operation) = instance.operation(op) else {
            return false;
        };
        self.next_operation(op.job) == Some(op.index)
            && self.is_machine_free(operation.machine)
            && instance
                .predecessors(op)
                .iter()
                .all(|pred| self.is_completed(*pred))
    }

    /// Eligible operations in ascending `(job, index)` order.
    pub fn eligible_operations(&self, instance: &Instance) -> Vec<OperationId> {
        instance
            .jobs()
            .iter()
            .filter_map(|job| {
                let next = self.next_operation.get(job.id).copied()?;
                let op = OperationId::new(job.id, next);
                self.is_eligible(instance, op).then_some(op)
            })
            .collect()
    }

    /// Earliest completion among running operations.
    pub fn next_completion_time(&self) -> Option<Ticks> {
        self.machines
            .iter()
            .flatten()
            .map(|running| running.finishes_at)
            .min()
    }

    pub fn summary(&self) -> StateSummary {
        StateSummary {
            status: self.status(),
            time: self.now,
            machines: self
                .machines
                .iter()
                .map(|slot| slot.map(|running| running.operation))
                .collect(),
            next_operation: self.next_operation.clone(),
            completed: self.completed_count,
        }
    }

    pub(crate) fn start(
        &mut self,
        op: OperationId,
        machine: MachineId,
        finishes_at: Ticks,
    ) -> Result<RunningOperation> {
        let slot = self.machines.get_mut(machine).ok_or_else(|| {
            LabError::InvariantViolation(format!("operation {op} targets unknown machine {machine}"))
        })?;
        if let Some(busy) = slot {
            return Err(LabError::InvariantViolation(format!(
                "machine {machine} already runs {} when starting {op}",
                busy.operation
            )));
        }

        let running = RunningOperation {
            operation: op,
            started_at: self.now,
            finishes_at,
        };
        *slot = Some(running);
        self.next_operation[op.job] = op.index + 1;
        Ok(running)
    }

    pub(crate) fn advance_to(&mut self, time: Ticks) -> Result<()> {
        if time < self.now {
            return Err(LabError::InvariantViolation(format!(
                "time would move backwards from {} to {time}",
                self.now
            )));
        }
        self.now = time;
        Ok(())
    }

    /// Complete every operation finishing exactly now, in ascending machine
    /// order, and free their machines.
    pub(crate) fn complete_finished(&mut self) -> Vec<OperationId> {
        let now = self.now;
        let mut finished = Vec::new();

        for slot in self.machines.iter_mut() {
            if let Some(running) = *slot {
                if running.finishes_at == now {
                    *slot = None;
                    self.completed[running.operation.job][running.operation.index] = Some(now);
                    self.completed_count += 1;
                    finished.push(running.operation);
                }
            }
        }

        finished
    }

    pub(crate) fn finish_step(&mut self) {
        self.steps_taken += 1;
    }

    pub(crate) fn terminate(&mut self, reason: TerminationReason) {
        self.termination = Some(reason);
    }

    pub(crate) fn abort(&mut self, reason: String) {
        self.aborted = Some(reason);
    }

    /// Cross-check the bookkeeping after a step.
    pub(crate) fn verify(&self, instance: &Instance) -> Result<()> {
        for (machine, slot) in self.machines.iter().enumerate() {
            let Some(running) = slot else { continue };
            let op = instance.operation(running.operation).ok_or_else(|| {
                LabError::InvariantViolation(format!(
                    "machine {machine} runs unknown operation {}",
                    running.operation
                ))
            })?;
            if op.machine != machine {
                return Err(LabError::InvariantViolation(format!(
                    "operation {} runs on machine {machine} but belongs to machine {}",
                    running.operation, op.machine
                )));
            }
            if running.finishes_at <= self.now {
                return Err(LabError::InvariantViolation(format!(
                    "operation {} should have completed at t={} (now t={})",
                    running.operation, running.finishes_at, self.now
                )));
            }
        }

        let counted: usize = self.completed.iter().flatten().filter(|t| t.is_some()).count();
        if counted != self.completed_count {
            return Err(LabError::InvariantViolation(format!(
                "completed count {} disagrees with {counted} completed operations",
                self.completed_count
            )));
        }

        Ok(())
    }
}
