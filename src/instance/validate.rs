// src/instance/validate.rs

use std::collections::{HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::errors::{LabError, Result};
use crate::instance::graph::PrecedenceGraph;
use crate::instance::model::{RawInstance, RawJob};
use crate::instance::{Instance, Job, Machine, Operation};
use crate::types::{MachineId, OperationId, Ticks};

impl TryFrom<RawInstance> for Instance {
    type Error = LabError;

    fn try_from(raw: RawInstance) -> std::result::Result<Self, Self::Error> {
        ensure_has_jobs(&raw)?;
        let machines = resolve_machines(&raw)?;
        let machine_index: HashMap<&str, MachineId> = machines
            .iter()
            .map(|m| (m.name.as_str(), m.id))
            .collect();
        let job_index = index_jobs(&raw)?;

        let mut jobs = Vec::with_capacity(raw.jobs.len());
        for (job_id, job) in raw.jobs.iter().enumerate() {
            jobs.push(resolve_job(job_id, job, &machine_index)?);
        }
        ensure_total_work_fits(&jobs)?;

        let graph = resolve_precedence(&raw, &job_index)?;
        validate_acyclic(&raw, &jobs, &graph)?;

        Ok(Instance::new_unchecked(raw, machines, jobs, graph))
    }
}

fn invalid(msg: impl Into<String>) -> LabError {
    LabError::InvalidInstance(msg.into())
}

fn ensure_has_jobs(raw: &RawInstance) -> Result<()> {
    if raw.jobs.is_empty() {
        return Err(invalid("instance must contain at least one job"));
    }
    Ok(())
}

fn resolve_machines(raw: &RawInstance) -> Result<Vec<Machine>> {
    if raw.machines.is_empty() {
        return Err(invalid("instance must declare at least one machine"));
    }

    let mut seen = HashSet::new();
    let mut machines = Vec::with_capacity(raw.machines.len());
    for (id, name) in raw.machines.iter().enumerate() {
        if !seen.insert(name.as_str()) {
            return Err(invalid(format!("machine '{name}' is declared more than once")));
        }
        machines.push(Machine {
            id,
            name: name.clone(),
        });
    }
    Ok(machines)
}

fn index_jobs(raw: &RawInstance) -> Result<HashMap<&str, usize>> {
    let mut index = HashMap::with_capacity(raw.jobs.len());
    for (id, job) in raw.jobs.iter().enumerate() {
        if index.insert(job.name.as_str(), id).is_some() {
            return Err(invalid(format!("job '{}' is declared more than once", job.name)));
        }
    }
    Ok(index)
}

fn resolve_job(
    job_id: usize,
    job: &RawJob,
    machine_index: &HashMap<&str, MachineId>,
) -> Result<Job> {
    if job.operations.is_empty() {
        return Err(invalid(format!("job '{}' has no operations", job.name)));
    }

    let mut operations = Vec::with_capacity(job.operations.len());
    for (index, op) in job.operations.iter().enumerate() {
        let machine = machine_index.get(op.machine.as_str()).copied().ok_or_else(|| {
            invalid(format!(
                "job '{}' operation {} references unknown machine '{}'",
                job.name, index, op.machine
            ))
        })?;

        if op.duration == 0 {
            return Err(invalid(format!(
                "job '{}' operation {} has non-positive duration",
                job.name, index
            )));
        }

        operations.push(Operation {
            id: OperationId::new(job_id, index),
            machine,
            duration: op.duration,
        });
    }

    Ok(Job {
        id: job_id,
        name: job.name.clone(),
        operations,
    })
}

// The clock never passes the sum of all durations, so this bounds every
// completion time the stepper can compute.
fn ensure_total_work_fits(jobs: &[Job]) -> Result<()> {
    jobs.iter()
        .flat_map(|job| job.operations.iter())
        .try_fold(0 as Ticks, |total, op| total.checked_add(op.duration))
        .map(|_| ())
        .ok_or_else(|| invalid("total processing time of all operations overflows the clock"))
}

fn resolve_precedence(raw: &RawInstance, job_index: &HashMap<&str, usize>) -> Result<PrecedenceGraph> {
    let mut after = Vec::with_capacity(raw.jobs.len());

    for (job_id, job) in raw.jobs.iter().enumerate() {
        let mut per_op = Vec::with_capacity(job.operations.len());
        for (index, op) in job.operations.iter().enumerate() {
            let mut deps = Vec::with_capacity(op.after.len());
            for dep in op.after.iter() {
                let dep_job = job_index.get(dep.job.as_str()).copied().ok_or_else(|| {
                    invalid(format!(
                        "job '{}' operation {} has unknown job '{}' in `after`",
                        job.name, index, dep.job
                    ))
                })?;
                if dep.operation >= raw.jobs[dep_job].operations.len() {
                    return Err(invalid(format!(
                        "job '{}' operation {} has unknown operation {}[{}] in `after`",
                        job.name, index, dep.job, dep.operation
                    )));
                }
                let dep_id = OperationId::new(dep_job, dep.operation);
                if dep_id == OperationId::new(job_id, index) {
                    return Err(invalid(format!(
                        "job '{}' operation {} cannot depend on itself in `after`",
                        job.name, index
                    )));
                }
                deps.push(dep_id);
            }
            per_op.push(deps);
        }
        after.push(per_op);
    }

    Ok(PrecedenceGraph::new(after))
}

fn validate_acyclic(raw: &RawInstance, jobs: &[Job], graph: &PrecedenceGraph) -> Result<()> {
    // Edge direction: predecessor -> operation.
    let mut dag: DiGraphMap<OperationId, ()> = DiGraphMap::new();

    for job in jobs {
        for op in job.operations.iter() {
            dag.add_node(op.id);
        }
    }

    for job in jobs {
        for op in job.operations.iter() {
            for pred in graph.predecessors_of(op.id) {
                dag.add_edge(pred, op.id, ());
            }
        }
    }

    match toposort(&dag, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => {
            let node = cycle.node_id();
            Err(invalid(format!(
                "cyclic precedence involving job '{}' operation {}",
                raw.jobs[node.job].name, node.index
            )))
        }
    }
}
