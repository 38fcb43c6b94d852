//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::CloggerConfig;
use crate::config::validation::validate_config;
use crate::error::ConfigError;

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<CloggerConfig, ConfigError> {
    let config: CloggerConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<CloggerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    tracing::debug!(
        path = ?path,
        logger = %config.name,
        variables = config.variables.len(),
        "Configuration loaded"
    );
    Ok(config)
}
