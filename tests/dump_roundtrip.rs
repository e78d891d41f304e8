mod common;
use crate::common::{init_tracing, run_canonical};

use std::collections::BTreeSet;

use jobshop_lab::dump::{self, DUMP_KEYS};
use jobshop_lab::errors::LabError;
use jobshop_lab::sim::{Action, SimOptions, Simulation};
use jobshop_lab::types::LogLevel;
use jobshop_lab_test_utils::fixtures;
use tempfile::tempdir;

fn expected_keys() -> BTreeSet<String> {
    DUMP_KEYS.iter().map(|k| k.to_string()).collect()
}

#[test]
fn dump_before_any_step_is_a_serialization_error() {
    init_tracing();

    let sim = Simulation::new(fixtures::two_by_two(), SimOptions::default());

    match sim.dump() {
        Err(err @ LabError::Serialization(_)) => assert!(err.is_recoverable()),
        other => panic!("Expected Serialization error, got: {:?}", other),
    }
}

#[test]
fn persisted_dump_has_exactly_three_keys_and_all_steps() {
    let options = SimOptions {
        loglevel: LogLevel::Warn,
        ..SimOptions::default()
    };
    let mut sim = Simulation::new(fixtures::two_by_two(), options);
    run_canonical(&mut sim);
    assert_eq!(sim.loglevel(), LogLevel::Warn);

    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/out/dump.json");
    sim.dump().unwrap().write_to_path(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(dump::top_level_keys(&value), expected_keys());
    assert_eq!(value["state_history"].as_array().unwrap().len(), 4);
    assert_eq!(value["loglevel"], "warn");
    assert_eq!(value["instance"]["machines"][1], "M2");

    let loaded = dump::load_dump(&path).unwrap();
    assert_eq!(loaded.state_history, sim.history().entries());
    assert_eq!(&loaded.instance, sim.instance().definition());
    assert_eq!(loaded.loglevel, LogLevel::Warn);
}

#[test]
fn partial_episode_dump_has_as_many_entries_as_steps() {
    let mut sim = Simulation::new(fixtures::three_by_three(), SimOptions::default());
    sim.step(Action::Index(0)).unwrap();
    sim.step(Action::Index(0)).unwrap();

    let value = sim.dump().unwrap().to_value().unwrap();
    assert_eq!(value["state_history"].as_array().unwrap().len(), 2);
}

#[test]
fn dump_is_deterministic_for_identical_action_sequences() {
    let run = || {
        let mut sim = Simulation::new(fixtures::three_by_three(), SimOptions::default());
        run_canonical(&mut sim);
        sim.dump().unwrap().to_json_string().unwrap()
    };

    assert_eq!(run(), run());
}

#[test]
fn dump_function_borrows_history_without_copying() {
    let mut sim = Simulation::new(fixtures::two_by_two(), SimOptions::default());
    run_canonical(&mut sim);

    let record = dump::dump(sim.history().entries(), sim.instance(), LogLevel::Debug).unwrap();
    assert!(std::ptr::eq(record.state_history, sim.history().entries()));
    assert!(std::ptr::eq(record.instance, sim.instance()));
}

#[test]
fn parse_rejects_extra_or_missing_keys() {
    let mut sim = Simulation::new(fixtures::two_by_two(), SimOptions::default());
    run_canonical(&mut sim);
    let mut value = sim.dump().unwrap().to_value().unwrap();

    value["extra"] = serde_json::json!(1);
    assert!(matches!(
        dump::parse_dump(&value.to_string()),
        Err(LabError::Serialization(_))
    ));

    let obj = value.as_object_mut().unwrap();
    obj.remove("extra");
    obj.remove("loglevel");
    assert!(matches!(
        dump::parse_dump(&value.to_string()),
        Err(LabError::Serialization(_))
    ));
}

#[test]
fn replay_reproduces_the_recorded_history() {
    let mut sim = Simulation::new(fixtures::cross_job(), SimOptions::default());
    run_canonical(&mut sim);
    let json = sim.dump().unwrap().to_json_string().unwrap();

    let parsed = dump::parse_dump(&json).unwrap();
    let replayed = dump::replay(&parsed).unwrap();

    assert_eq!(replayed.history(), sim.history());
    assert!(replayed.is_done());
}

#[test]
fn replay_honours_a_step_budget_cut() {
    let options = SimOptions {
        max_steps: Some(3),
        ..SimOptions::default()
    };
    let mut sim = Simulation::new(fixtures::three_by_three(), options);
    run_canonical(&mut sim);
    assert_eq!(sim.history().len(), 3);

    let parsed = dump::parse_dump(&sim.dump().unwrap().to_json_string().unwrap()).unwrap();
    let replayed = dump::replay(&parsed).unwrap();
    assert!(replayed.is_done());
    assert_eq!(replayed.history(), sim.history());
}

#[test]
fn tampered_dump_fails_replay() {
    let mut sim = Simulation::new(fixtures::two_by_two(), SimOptions::default());
    run_canonical(&mut sim);

    let mut parsed = dump::parse_dump(&sim.dump().unwrap().to_json_string().unwrap()).unwrap();
    parsed.state_history[2].simulation_time = 7;

    match dump::replay(&parsed) {
        Err(LabError::ReplayMismatch { step }) => assert_eq!(step, 2),
        other => panic!("Expected ReplayMismatch, got: {:?}", other.map(|s| s.history().len())),
    }
}
