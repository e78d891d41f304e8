// src/engine/mod.rs

//! Driving loop around the stepper.
//!
//! The pure, synchronous loop lives in [`core`]; the async shell that runs
//! several episodes in parallel is in [`runtime`]. [`policy`] decides which
//! action each step submits.

pub mod core;
pub mod policy;
pub mod runtime;

pub use self::core::{EpisodeOutcome, EpisodeRunner};
pub use policy::{ActionSource, FixedIndex, Scripted};
pub use runtime::{ensure_identical_histories, run_episodes};
