// src/config/validate.rs

use crate::config::model::{LabConfig, RawConfigFile};
use crate::errors::{LabError, Result};

impl TryFrom<RawConfigFile> for LabConfig {
    type Error = LabError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(LabConfig::new_unchecked(raw))
    }
}

pub fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_simulation(cfg)?;
    validate_driver(cfg)?;
    Ok(())
}

fn validate_simulation(cfg: &RawConfigFile) -> Result<()> {
    if cfg.simulation.instance.as_os_str().is_empty() {
        return Err(LabError::Config(
            "[simulation].instance must name an instance file".to_string(),
        ));
    }

    if cfg.simulation.max_steps == Some(0) {
        return Err(LabError::Config(
            "[simulation].max_steps must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn validate_driver(cfg: &RawConfigFile) -> Result<()> {
    if cfg.driver.episodes == 0 {
        return Err(LabError::Config(
            "[driver].episodes must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}
