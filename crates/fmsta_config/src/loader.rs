//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::RunConfig;
use std::path::Path;

/// Loads and validates a `RunConfig` from a TOML file on disk.
pub fn load_config(path: &Path) -> Result<RunConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `RunConfig` from a TOML string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<RunConfig, ConfigError> {
    let config: RunConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &RunConfig) -> Result<(), ConfigError> {
    if !(config.balance_factor > 0.0 && config.balance_factor < 1.0) {
        return Err(ConfigError::ValidationError(
            "balance_factor must be in (0.0, 1.0)".to_string(),
        ));
    }
    if config.max_passes == 0 {
        return Err(ConfigError::ValidationError(
            "max_passes must be at least 1".to_string(),
        ));
    }
    if config.threshold_schedule.step >= 0 {
        return Err(ConfigError::ValidationError(
            "threshold_schedule.step must be negative".to_string(),
        ));
    }
    if config.threshold_schedule.floor > config.threshold_schedule.start {
        return Err(ConfigError::ValidationError(
            "threshold_schedule.floor must not exceed threshold_schedule.start".to_string(),
        ));
    }
    if config.clock_margin <= 0.0 {
        return Err(ConfigError::ValidationError(
            "clock_margin must be positive".to_string(),
        ));
    }
    Ok(())
}
