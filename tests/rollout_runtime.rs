mod common;
use crate::common::{init_tracing, with_timeout};

use std::error::Error;
use std::sync::Arc;

use jobshop_lab::engine::{
    EpisodeRunner, FixedIndex, Scripted, ensure_identical_histories, run_episodes,
};
use jobshop_lab::errors::LabError;
use jobshop_lab::sim::{Action, SimOptions, Simulation, TerminationReason};
use jobshop_lab::types::OperationId;
use jobshop_lab_test_utils::fixtures;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn runner_drives_episode_to_completion() -> TestResult {
    init_tracing();

    let sim = Simulation::new(fixtures::two_by_two(), SimOptions::default());
    let outcome = EpisodeRunner::new(sim, FixedIndex(0)).run()?;

    assert_eq!(outcome.steps, 4);
    assert_eq!(outcome.time, 2);
    assert_eq!(outcome.reason, Some(TerminationReason::Completed));
    assert_eq!(outcome.simulation.history().len(), 4);
    Ok(())
}

#[test]
fn runner_surfaces_ineligible_fixed_index() {
    // After the first dispatch only one operation is eligible, so index 1
    // falls out of range on the second step.
    let sim = Simulation::new(fixtures::two_by_two(), SimOptions::default());
    let result = EpisodeRunner::new(sim, FixedIndex(1)).run();

    assert!(matches!(result, Err(LabError::IneligibleAction { .. })));
}

#[test]
fn scripted_runner_stops_when_script_runs_out() -> TestResult {
    let script = Scripted::new([
        Action::Job(1),
        Action::Operation(OperationId::new(0, 0)),
    ]);
    let sim = Simulation::new(fixtures::two_by_two(), SimOptions::default());
    let mut runner = EpisodeRunner::new(sim, script);

    assert!(runner.step()?.is_some());
    assert!(runner.step()?.is_some());
    assert!(runner.step()?.is_none());
    assert!(!runner.simulation().is_done());

    let outcome = runner.run()?;
    assert_eq!(outcome.steps, 2);
    assert_eq!(outcome.reason, None);
    Ok(())
}

#[tokio::test]
async fn parallel_rollouts_share_instance_and_agree() -> TestResult {
    with_timeout(async {
        init_tracing();

        let instance = fixtures::three_by_three();
        let outcomes =
            run_episodes(Arc::clone(&instance), SimOptions::default(), FixedIndex(0), 4).await?;

        assert_eq!(outcomes.len(), 4);
        for outcome in &outcomes {
            assert_eq!(outcome.reason, Some(TerminationReason::Completed));
            assert_eq!(outcome.steps as usize, instance.operation_count());
        }
        ensure_identical_histories(&outcomes)?;

        // Episodes hold the one shared instance, not copies.
        assert_eq!(Arc::strong_count(&instance), 1 + outcomes.len());
        Ok(())
    })
    .await
}

#[tokio::test]
async fn diverging_histories_are_reported() -> TestResult {
    with_timeout(async {
        let instance = fixtures::two_by_two();
        let mut outcomes =
            run_episodes(Arc::clone(&instance), SimOptions::default(), FixedIndex(0), 1).await?;

        let sibling = outcomes[0].simulation.shared_instance();
        assert!(Arc::ptr_eq(&sibling, &instance));

        let other = EpisodeRunner::new(
            Simulation::new(sibling, SimOptions::default()),
            Scripted::new([Action::Job(1), Action::Index(0), Action::Index(0), Action::Index(0)]),
        )
        .run()?;
        outcomes.push(other);

        match ensure_identical_histories(&outcomes) {
            Err(LabError::ReplayMismatch { step }) => assert_eq!(step, 0),
            other => panic!("Expected ReplayMismatch, got: {:?}", other),
        }
        Ok(())
    })
    .await
}
