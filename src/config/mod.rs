// src/config/mod.rs

//! Configuration loading for the CLI driver.
//!
//! - Define the TOML-backed data model (`model.rs`).
//! - Load config and instance files from disk (`loader.rs`).
//! - Validate basic value constraints (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_config, load_from_path, load_instance, load_raw_instance};
pub use model::{DriverSection, LabConfig, OutputSection, RawConfigFile, SimulationSection};
pub use validate::validate_raw_config;
