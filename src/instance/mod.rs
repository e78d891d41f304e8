// src/instance/mod.rs

//! Immutable description of a job-shop problem.
//!
//! - [`model`] holds the raw, serde-backed definition.
//! - [`validate`] turns a [`RawInstance`] into an [`Instance`] or explains
//!   why it cannot.
//! - [`graph`] keeps the resolved cross-job precedence edges.
//!
//! An [`Instance`] never changes after construction, so it can be wrapped in
//! an `Arc` and shared by any number of simulations.

pub mod graph;
pub mod model;
pub mod validate;

use std::collections::HashMap;

use serde::{Serialize, Serializer};

pub use graph::PrecedenceGraph;
pub use model::{OperationRef, RawInstance, RawJob, RawOperation};

use crate::errors::Result;
use crate::types::{JobId, MachineId, OperationId, Ticks};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    pub id: MachineId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub id: OperationId,
    pub machine: MachineId,
    pub duration: Ticks,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub name: String,
    pub operations: Vec<Operation>,
}

impl Job {
    /// Sum of all operation durations.
    pub fn total_work(&self) -> Ticks {
        self.operations.iter().map(|op| op.duration).sum()
    }
}

/// Validated, index-resolved scheduling problem.
#[derive(Debug, Clone)]
pub struct Instance {
    definition: RawInstance,
    machines: Vec<Machine>,
    jobs: Vec<Job>,
    graph: PrecedenceGraph,
    machine_index: HashMap<String, MachineId>,
    operation_count: usize,
}

impl Instance {
    /// Validate `raw` and build the instance.
    pub fn build(raw: RawInstance) -> Result<Self> {
        Self::try_from(raw)
    }

    /// Assemble an instance from already-resolved parts. Only called by
    /// `validate` after every check passed.
    pub(crate) fn new_unchecked(
        definition: RawInstance,
        machines: Vec<Machine>,
        jobs: Vec<Job>,
        graph: PrecedenceGraph,
    ) -> Self {
        let machine_index = machines
            .iter()
            .map(|m| (m.name.clone(), m.id))
            .collect();
        let operation_count = jobs.iter().map(|j| j.operations.len()).sum();

        Self {
            definition,
            machines,
            jobs,
            graph,
            machine_index,
            operation_count,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.definition.name.as_deref()
    }

    /// The definition this instance was built from.
    pub fn definition(&self) -> &RawInstance {
        &self.definition
    }

    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn job(&self, id: JobId) -> Option<&Job> {
        self.jobs.get(id)
    }

    pub fn machine_id(&self, name: &str) -> Option<MachineId> {
        self.machine_index.get(name).copied()
    }

    pub fn operation(&self, id: OperationId) -> Option<&Operation> {
        self.jobs.get(id.job)?.operations.get(id.index)
    }

    /// Every operation, in ascending `(job, index)` order.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.jobs.iter().flat_map(|job| job.operations.iter())
    }

    pub fn operation_count(&self) -> usize {
        self.operation_count
    }

    pub fn precedence(&self) -> &PrecedenceGraph {
        &self.graph
    }

    /// Job predecessor plus any cross-job predecessors of `id`.
    pub fn predecessors(&self, id: OperationId) -> Vec<OperationId> {
        self.graph.predecessors_of(id)
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.definition == other.definition
    }
}

impl Eq for Instance {}

/// An instance serializes as its definition, so a dumped instance can be fed
/// back into [`Instance::build`].
impl Serialize for Instance {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.definition.serialize(serializer)
    }
}
