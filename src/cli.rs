// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::Parser;

use crate::config::default_config_path;
pub use crate::types::LogLevel;

/// Command-line arguments for `jobshop-lab`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "jobshop-lab",
    version,
    about = "Step a job-shop simulation to completion and dump its history.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `JobShopLab.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Where to write the dump; overrides `[output].dump`.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `JOBSHOP_LAB_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Load config and instance, print the instance, but don't step.
    #[arg(long)]
    pub dry_run: bool,

    /// Replay an existing dump and check it reproduces exactly.
    #[arg(long, value_name = "DUMP", conflicts_with = "dry_run")]
    pub verify: Option<PathBuf>,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
