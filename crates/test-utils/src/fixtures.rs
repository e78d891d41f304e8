//! Canonical instances shared by the integration tests.

use std::sync::Arc;

use jobshop_lab::instance::{Instance, RawInstance};

use crate::builders::{InstanceBuilder, JobBuilder};

/// Two jobs on two machines, unit durations:
/// `J0 = M1 -> M2`, `J1 = M2 -> M1`.
pub fn two_by_two_raw() -> RawInstance {
    InstanceBuilder::new()
        .named("2x2")
        .with_machines(&["M1", "M2"])
        .with_job(JobBuilder::new("J0").op("M1", 1).op("M2", 1).build())
        .with_job(JobBuilder::new("J1").op("M2", 1).op("M1", 1).build())
        .raw()
}

pub fn two_by_two() -> Arc<Instance> {
    Arc::new(Instance::build(two_by_two_raw()).expect("2x2 fixture is valid"))
}

/// Three jobs competing for three machines with uneven durations.
pub fn three_by_three_raw() -> RawInstance {
    InstanceBuilder::new()
        .named("3x3")
        .with_machines(&["M0", "M1", "M2"])
        .with_job(JobBuilder::new("A").op("M0", 3).op("M1", 2).op("M2", 2).build())
        .with_job(JobBuilder::new("B").op("M0", 2).op("M2", 1).op("M1", 4).build())
        .with_job(JobBuilder::new("C").op("M1", 4).op("M2", 3).build())
        .raw()
}

pub fn three_by_three() -> Arc<Instance> {
    Arc::new(Instance::build(three_by_three_raw()).expect("3x3 fixture is valid"))
}

/// Like the 2x2 fixture, but `J1`'s second operation also waits for `J0`'s
/// second one.
pub fn cross_job_raw() -> RawInstance {
    InstanceBuilder::new()
        .named("cross")
        .with_machines(&["M1", "M2"])
        .with_job(JobBuilder::new("J0").op("M1", 1).op("M2", 2).build())
        .with_job(
            JobBuilder::new("J1")
                .op("M2", 1)
                .op("M1", 1)
                .after("J0", 1)
                .build(),
        )
        .raw()
}

pub fn cross_job() -> Arc<Instance> {
    Arc::new(Instance::build(cross_job_raw()).expect("cross-job fixture is valid"))
}
