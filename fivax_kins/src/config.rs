//! TOML configuration loader with validation.
//!
//! Loads a [`KinsConfig`] and checks bounds plus that the configured module
//! name is registered.

use std::path::Path;

use fivax_common::config::{ConfigError, ConfigLoader};
use fivax_common::kinematics::config::KinsConfig;
use tracing::info;

use crate::module;

/// Load and validate the service configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<KinsConfig, ConfigError> {
    let config = KinsConfig::load(path)?;
    validate_config(&config)?;
    info!(
        path = %path.display(),
        module = %config.kinematics.module,
        cycle_time_us = config.cycle.cycle_time_us,
        "configuration loaded"
    );
    Ok(config)
}

/// Load config from a TOML string (for testing).
pub fn load_config_from_str(content: &str) -> Result<KinsConfig, ConfigError> {
    let config = KinsConfig::from_toml(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Bounds checks plus module-name resolution.
pub fn validate_config(config: &KinsConfig) -> Result<(), ConfigError> {
    config.validate()?;
    module::lookup(&config.kinematics.module)
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
    Ok(())
}
