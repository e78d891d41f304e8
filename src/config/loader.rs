// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{LabConfig, RawConfigFile};
use crate::errors::Result;
use crate::instance::{Instance, RawInstance};

/// Load a configuration file and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; use [`load_config`] for
/// validation and path resolution.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let contents = fs::read_to_string(path.as_ref())?;
    let config: RawConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Load, validate and resolve a configuration file.
///
/// Relative paths inside the file are resolved against its directory.
/// `output`, when given, replaces `[output].dump`.
pub fn load_config(path: impl AsRef<Path>, output: Option<&Path>) -> Result<LabConfig> {
    let path = path.as_ref();
    let raw = load_from_path(path)?;
    let config = LabConfig::try_from(raw)?
        .with_base_dir(&config_root_dir(path))
        .with_output(output);

    debug!(
        instance = %config.instance_path.display(),
        dump = %config.dump_path.display(),
        "loaded config"
    );
    Ok(config)
}

/// Read an instance definition; `.json` files are JSON, everything else is
/// TOML.
pub fn load_raw_instance(path: impl AsRef<Path>) -> Result<RawInstance> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let raw = if is_json {
        serde_json::from_str(&contents)?
    } else {
        toml::from_str(&contents)?
    };
    Ok(raw)
}

/// Read and validate an instance definition.
pub fn load_instance(path: impl AsRef<Path>) -> Result<Instance> {
    Instance::build(load_raw_instance(path)?)
}

/// Default config location: `JobShopLab.toml` in the working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("JobShopLab.toml")
}

/// Directory relative config paths are resolved against.
///
/// A bare file name (parent = "") resolves against the working directory.
fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}
