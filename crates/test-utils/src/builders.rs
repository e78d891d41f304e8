#![allow(dead_code)]

use jobshop_lab::instance::{Instance, OperationRef, RawInstance, RawJob, RawOperation};
use jobshop_lab::types::Ticks;

/// Builder for `RawInstance` / `Instance` to simplify test setup.
pub struct InstanceBuilder {
    raw: RawInstance,
}

impl InstanceBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawInstance {
                name: None,
                machines: Vec::new(),
                jobs: Vec::new(),
            },
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.raw.name = Some(name.to_string());
        self
    }

    pub fn with_machine(mut self, name: &str) -> Self {
        self.raw.machines.push(name.to_string());
        self
    }

    pub fn with_machines(mut self, names: &[&str]) -> Self {
        self.raw
            .machines
            .extend(names.iter().map(|n| n.to_string()));
        self
    }

    pub fn with_job(mut self, job: RawJob) -> Self {
        self.raw.jobs.push(job);
        self
    }

    /// The unvalidated definition.
    pub fn raw(self) -> RawInstance {
        self.raw
    }

    pub fn build(self) -> Instance {
        Instance::build(self.raw).expect("Failed to build valid instance from builder")
    }
}

impl Default for InstanceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `RawJob`.
pub struct JobBuilder {
    job: RawJob,
}

impl JobBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            job: RawJob {
                name: name.to_string(),
                operations: Vec::new(),
            },
        }
    }

    /// Append an operation on `machine`.
    pub fn op(mut self, machine: &str, duration: Ticks) -> Self {
        self.job.operations.push(RawOperation::new(machine, duration));
        self
    }

    /// Add a cross-job predecessor to the most recently added operation.
    pub fn after(mut self, job: &str, operation: usize) -> Self {
        let last = self
            .job
            .operations
            .last_mut()
            .expect("after() needs a preceding op()");
        last.after.push(OperationRef {
            job: job.to_string(),
            operation,
        });
        self
    }

    pub fn build(self) -> RawJob {
        self.job
    }
}
