// src/lib.rs

pub mod cli;
pub mod config;
pub mod dump;
pub mod engine;
pub mod errors;
pub mod history;
pub mod instance;
pub mod logging;
pub mod sim;
pub mod types;

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{LabConfig, load_config, load_instance};
use crate::engine::{FixedIndex, ensure_identical_histories, run_episodes};
use crate::errors::{LabError, Result};
use crate::instance::Instance;

pub use crate::instance::RawInstance;
pub use crate::sim::{Action, SimOptions, SimStatus, Simulation, StepResult};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config + instance loading
/// - parallel episode rollouts with a fixed-index driver
/// - the determinism cross-check between rollouts
/// - writing the dump of the first episode
pub async fn run(args: CliArgs) -> Result<()> {
    if let Some(dump_path) = args.verify.as_deref() {
        return verify_dump(dump_path);
    }

    let cfg = load_config(&args.config, args.output.as_deref())?;
    let instance = Arc::new(load_instance(&cfg.instance_path)?);

    if args.dry_run {
        print_dry_run(&cfg, &instance);
        return Ok(());
    }

    let outcomes = run_episodes(
        Arc::clone(&instance),
        cfg.sim_options(),
        FixedIndex(cfg.driver.action_index),
        cfg.driver.episodes,
    )
    .await?;
    ensure_identical_histories(&outcomes)?;

    let first = outcomes.first().ok_or_else(|| {
        LabError::InvariantViolation("rollout produced no episodes".to_string())
    })?;
    first.simulation.dump()?.write_to_path(&cfg.dump_path)?;

    info!(
        steps = first.steps,
        time = first.time,
        reason = ?first.reason,
        "run complete"
    );
    println!(
        "{} steps, t={}, {:?}; dump written to {}",
        first.steps,
        first.time,
        first.simulation.status(),
        cfg.dump_path.display()
    );
    Ok(())
}

/// Replay a persisted dump and report whether it reproduces.
fn verify_dump(path: &Path) -> Result<()> {
    let dump = dump::load_dump(path)?;
    let sim = dump::replay(&dump)?;
    println!(
        "{}: {} steps replayed identically (t={})",
        path.display(),
        sim.history().len(),
        sim.now()
    );
    Ok(())
}

/// Simple dry-run output: print machines, jobs and operations.
fn print_dry_run(cfg: &LabConfig, instance: &Instance) {
    println!("jobshop-lab dry-run");
    println!("  instance = {}", cfg.instance_path.display());
    println!("  max_steps = {:?}", cfg.max_steps);
    println!("  loglevel = {}", cfg.loglevel);
    println!("  action_index = {}", cfg.driver.action_index);
    println!("  episodes = {}", cfg.driver.episodes);
    println!("  dump = {}", cfg.dump_path.display());
    println!();

    println!("machines ({}):", instance.machines().len());
    for machine in instance.machines() {
        println!("  - {}", machine.name);
    }

    println!("jobs ({}):", instance.jobs().len());
    for job in instance.jobs() {
        println!("  - {} (total work {})", job.name, job.total_work());
        for op in job.operations.iter() {
            let machine = &instance.machines()[op.machine].name;
            println!("      [{}] {} for {}", op.id.index, machine, op.duration);
            for pred in instance.precedence().extra_predecessors_of(op.id) {
                if let Some(pred_job) = instance.job(pred.job) {
                    println!("          after {}[{}]", pred_job.name, pred.index);
                }
            }
        }
    }

    if !instance.precedence().has_extra_edges() {
        println!("(no cross-job precedence)");
    }

    debug!("dry-run complete (no stepping)");
}
