#![allow(dead_code)]

pub use jobshop_lab_test_utils::{init_tracing, with_timeout};

use jobshop_lab::sim::{Action, Simulation};
use jobshop_lab::StepResult;

/// Step with `Action::Index(0)` until done, returning every result.
pub fn run_canonical(sim: &mut Simulation) -> Vec<StepResult> {
    let mut results = Vec::new();
    while !sim.is_done() {
        results.push(sim.step(Action::Index(0)).expect("canonical step must succeed"));
    }
    results
}
