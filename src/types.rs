// src/types.rs

//! Small shared types used across the instance model, the stepper and the
//! dump format.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Simulated time, in abstract ticks.
pub type Ticks = u64;

/// Index of a job inside its [`Instance`](crate::instance::Instance).
pub type JobId = usize;

/// Index of a machine inside its [`Instance`](crate::instance::Instance).
pub type MachineId = usize;

/// Position of an operation: `(job, index within job)`.
///
/// Ordering is lexicographic, which is exactly the canonical tie-break
/// order used for the eligible list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OperationId {
    pub job: JobId,
    pub index: usize,
}

impl OperationId {
    pub const fn new(job: JobId, index: usize) -> Self {
        Self { job, index }
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "J{}.{}", self.job, self.index)
    }
}

/// Verbosity marker.
///
/// Drives the tracing subscriber on the CLI and is carried verbatim into
/// every dump as the `loglevel` key. It never changes what the history
/// records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[serde(alias = "warning")]
    #[value(alias = "warning")]
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!(
                "invalid log level: {other} (expected error, warn, info, debug or trace)"
            )),
        }
    }
}
