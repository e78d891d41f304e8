// src/sim/mod.rs

//! Simulation state and the stepper.
//!
//! - [`state`] holds the mutable snapshot (time, machines, job cursors).
//! - [`action`] is the caller's per-step decision.
//! - [`simulation`] owns state + history and implements `step`.
//! - [`step_result`] is what a successful step returns.

pub mod action;
pub mod simulation;
pub mod state;
pub mod step_result;

pub use action::Action;
pub use simulation::{SimOptions, Simulation};
pub use state::{RunningOperation, SimState, SimStatus, TerminationReason};
pub use step_result::StepResult;
