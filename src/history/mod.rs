// src/history/mod.rs

//! Append-only record of every successful step.
//!
//! - [`entry`] defines the immutable entry types that end up in a dump.
//! - [`recorder`] holds the [`History`] log itself.

pub mod entry;
pub mod recorder;

pub use entry::{ActionRecord, HistoryEntry, StateSummary};
pub use recorder::History;
