// src/config/model.rs

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::sim::SimOptions;
use crate::types::LogLevel;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [simulation]
/// instance = "instances/ft-2x2.toml"
/// max_steps = 100
/// loglevel = "info"
///
/// [driver]
/// action_index = 0
/// episodes = 1
///
/// [output]
/// dump = "out/dump.json"
/// ```
///
/// Only `simulation.instance` is required.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    pub simulation: SimulationSection,

    #[serde(default)]
    pub driver: DriverSection,

    #[serde(default)]
    pub output: OutputSection,
}

/// `[simulation]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationSection {
    /// Instance definition file (`.json`, otherwise TOML). Relative paths are
    /// resolved against the config file's directory.
    pub instance: PathBuf,

    /// Optional step budget; the episode ends after this many steps.
    #[serde(default)]
    pub max_steps: Option<u64>,

    /// Verbosity marker written into the dump.
    #[serde(default)]
    pub loglevel: LogLevel,
}

/// `[driver]` section: how the CLI picks actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DriverSection {
    /// Index into the eligible list submitted at every step.
    #[serde(default)]
    pub action_index: usize,

    /// Number of independent episodes to roll out.
    #[serde(default = "default_episodes")]
    pub episodes: usize,
}

fn default_episodes() -> usize {
    1
}

impl Default for DriverSection {
    fn default() -> Self {
        Self {
            action_index: 0,
            episodes: default_episodes(),
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    #[serde(default = "default_dump_path")]
    pub dump: PathBuf,
}

fn default_dump_path() -> PathBuf {
    PathBuf::from("dump.json")
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dump: default_dump_path(),
        }
    }
}

/// Validated configuration with resolved paths.
#[derive(Debug, Clone)]
pub struct LabConfig {
    pub instance_path: PathBuf,
    pub max_steps: Option<u64>,
    pub loglevel: LogLevel,
    pub driver: DriverSection,
    pub dump_path: PathBuf,
}

impl LabConfig {
    /// Assemble from a raw config whose values were already checked.
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            instance_path: raw.simulation.instance,
            max_steps: raw.simulation.max_steps,
            loglevel: raw.simulation.loglevel,
            driver: raw.driver,
            dump_path: raw.output.dump,
        }
    }

    pub fn sim_options(&self) -> SimOptions {
        SimOptions {
            max_steps: self.max_steps,
            loglevel: self.loglevel,
        }
    }

    /// Resolve relative paths against `base`.
    pub fn with_base_dir(mut self, base: &Path) -> Self {
        self.instance_path = resolve(base, &self.instance_path);
        self.dump_path = resolve(base, &self.dump_path);
        self
    }

    /// Override the dump destination.
    pub fn with_output(mut self, output: Option<&Path>) -> Self {
        if let Some(path) = output {
            self.dump_path = path.to_path_buf();
        }
        self
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
