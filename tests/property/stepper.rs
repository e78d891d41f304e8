use std::sync::Arc;

use jobshop_lab::errors::LabError;
use jobshop_lab::instance::{Instance, RawInstance};
use jobshop_lab::sim::{Action, SimOptions, Simulation, TerminationReason};
use jobshop_lab_test_utils::builders::{InstanceBuilder, JobBuilder};
use proptest::prelude::*;

/// Per job: list of `(machine, duration, optional cross-job predecessor)`.
type JobSpec = Vec<(usize, u64, Option<(usize, usize)>)>;

// Strategy to generate a valid instance.
// Acyclicity holds because cross-job edges only point from a lower job index
// to a higher one, and job chains only point forward within a job.
fn instance_strategy() -> impl Strategy<Value = RawInstance> {
    (1..=4usize, 1..=4usize).prop_flat_map(|(num_machines, num_jobs)| {
        let op = (0..num_machines, 1..=5u64, any::<Option<(usize, usize)>>());
        let job = proptest::collection::vec(op, 1..=4);
        proptest::collection::vec(job, num_jobs)
            .prop_map(move |jobs: Vec<JobSpec>| build_raw(num_machines, &jobs))
    })
}

fn build_raw(num_machines: usize, jobs: &[JobSpec]) -> RawInstance {
    let machines: Vec<String> = (0..num_machines).map(|m| format!("M{m}")).collect();
    let mut builder = InstanceBuilder::new().with_machines(
        &machines.iter().map(|m| m.as_str()).collect::<Vec<_>>(),
    );

    for (j, ops) in jobs.iter().enumerate() {
        let mut job = JobBuilder::new(&format!("J{j}"));
        for (machine, duration, cross) in ops.iter() {
            job = job.op(&machines[*machine], *duration);
            // Sanitize: only reference earlier jobs.
            if let Some((dep_job, dep_op)) = cross {
                if j > 0 {
                    let dep_job = dep_job % j;
                    let dep_op = dep_op % jobs[dep_job].len();
                    job = job.after(&format!("J{dep_job}"), dep_op);
                }
            }
        }
        builder = builder.with_job(job.build());
    }

    builder.raw()
}

fn new_sim(raw: &RawInstance) -> Simulation {
    let instance = Instance::build(raw.clone()).expect("generated instance is valid");
    Simulation::new(Arc::new(instance), SimOptions::default())
}

/// Step with `choices[i] % eligible` until done.
fn run_with_choices(sim: &mut Simulation, choices: &[u8]) -> Result<(), TestCaseError> {
    let mut i = 0;
    while !sim.is_done() {
        let eligible = sim.eligible_operations().len();
        prop_assert!(eligible > 0, "not done but nothing eligible at t={}", sim.now());
        let choice = choices.get(i).copied().unwrap_or(0) as usize % eligible;
        sim.step(Action::Index(choice))
            .map_err(|e| TestCaseError::fail(format!("step failed: {e}")))?;
        i += 1;
    }
    Ok(())
}

proptest! {
    #[test]
    fn episode_ends_after_one_step_per_operation(
        raw in instance_strategy(),
        choices in proptest::collection::vec(any::<u8>(), 0..20),
    ) {
        let mut sim = new_sim(&raw);
        run_with_choices(&mut sim, &choices)?;

        let total = sim.instance().operation_count();
        prop_assert_eq!(sim.history().len(), total);
        prop_assert_eq!(sim.state().steps_taken() as usize, total);
        prop_assert_eq!(sim.state().termination(), Some(TerminationReason::Completed));

        // No job can finish faster than its own total work.
        let longest_job = sim.instance().jobs().iter().map(|j| j.total_work()).max().unwrap_or(0);
        prop_assert!(sim.now() >= longest_job);
    }

    #[test]
    fn simulated_time_never_decreases(
        raw in instance_strategy(),
        choices in proptest::collection::vec(any::<u8>(), 0..20),
    ) {
        let mut sim = new_sim(&raw);
        run_with_choices(&mut sim, &choices)?;

        let times: Vec<u64> = sim.history().iter().map(|e| e.simulation_time).collect();
        prop_assert!(times.windows(2).all(|w| w[0] <= w[1]), "times: {:?}", times);

        for entry in sim.history().iter() {
            prop_assert!(entry.action_taken.start <= entry.simulation_time);
            prop_assert!(entry.action_taken.end > entry.action_taken.start);
        }
    }

    #[test]
    fn identical_action_sequences_give_identical_dumps(
        raw in instance_strategy(),
        choices in proptest::collection::vec(any::<u8>(), 0..20),
    ) {
        let mut a = new_sim(&raw);
        let mut b = new_sim(&raw);
        run_with_choices(&mut a, &choices)?;
        run_with_choices(&mut b, &choices)?;

        let dump_a = a.dump().unwrap().to_json_string().unwrap();
        let dump_b = b.dump().unwrap().to_json_string().unwrap();
        prop_assert_eq!(dump_a, dump_b);
    }

    #[test]
    fn ineligible_actions_change_nothing(
        raw in instance_strategy(),
        choices in proptest::collection::vec(any::<u8>(), 0..20),
    ) {
        let mut sim = new_sim(&raw);
        let mut i = 0;

        while !sim.is_done() {
            let eligible = sim.eligible_operations();
            let state_before = sim.state().clone();
            let history_before = sim.history().clone();

            let out_of_range = sim.step(Action::Index(eligible.len()));
            let is_ineligible = matches!(out_of_range, Err(LabError::IneligibleAction { .. }));
            prop_assert!(is_ineligible);

            let blocked = sim
                .instance()
                .operations()
                .map(|op| op.id)
                .find(|id| !eligible.contains(id));
            if let Some(blocked) = blocked {
                let result = sim.step(Action::Operation(blocked));
                let is_ineligible = matches!(result, Err(LabError::IneligibleAction { .. }));
                prop_assert!(is_ineligible);
            }

            prop_assert_eq!(sim.state(), &state_before);
            prop_assert_eq!(sim.history(), &history_before);

            let choice = choices.get(i).copied().unwrap_or(0) as usize % eligible.len();
            sim.step(Action::Index(choice))
                .map_err(|e| TestCaseError::fail(format!("step failed: {e}")))?;
            i += 1;
        }
    }

    #[test]
    fn step_budget_caps_history_length(
        raw in instance_strategy(),
        budget in 1..6u64,
    ) {
        let instance = Instance::build(raw).expect("generated instance is valid");
        let total = instance.operation_count() as u64;
        let options = SimOptions { max_steps: Some(budget), ..SimOptions::default() };
        let mut sim = Simulation::new(Arc::new(instance), options);

        run_with_choices(&mut sim, &[])?;

        prop_assert_eq!(sim.history().len() as u64, budget.min(total));
        let expected = if budget < total {
            TerminationReason::StepBudgetExhausted
        } else {
            TerminationReason::Completed
        };
        prop_assert_eq!(sim.state().termination(), Some(expected));
    }
}
