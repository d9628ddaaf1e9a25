//! Application configuration loading from config.toml
//!
//! Every table and key is optional. A missing file means "use the built-in defaults"; a file
//! that exists but cannot be read, parsed or validated stops the service from starting.

use crate::{
    config::server::{ServerConfig, port_from_env},
    core::flat_budget::FlatBudgetDefaults,
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable pointing at an alternative config file.
pub const CONFIG_PATH_ENV_VAR: &str = "ENVELOPE_API_CONFIG";

/// Config file used when [`CONFIG_PATH_ENV_VAR`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listener settings
    pub server: ServerConfig,
    /// Defaults for the flat budget summary
    pub flat_budget: FlatBudgetDefaults,
}

/// Parses and validates configuration from TOML text.
///
/// # Errors
/// Returns an error if:
/// - The TOML syntax is invalid or a value has the wrong type
/// - The flat budget defaults contain a negative or non-finite amount
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.flat_budget.validate().map_err(|e| Error::Config {
        message: format!("Invalid [flat_budget] defaults: {e}"),
    })?;
    Ok(config)
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or [`parse_config`] rejects it.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;
    parse_config(&contents)
}

/// Loads configuration from `path`, falling back to defaults when the file does not exist.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    if path_ref.exists() {
        load_config(path_ref)
    } else {
        info!(
            "No configuration file at {:?}; using built-in defaults.",
            path_ref
        );
        Ok(AppConfig::default())
    }
}

/// Loads the service configuration the way the binary does at startup.
///
/// The file path comes from [`CONFIG_PATH_ENV_VAR`] (default [`DEFAULT_CONFIG_PATH`]), and the
/// `PORT` environment variable overrides the configured port.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var(CONFIG_PATH_ENV_VAR)
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

    let mut config = load_config_or_default(&path)?;
    config.server = config
        .server
        .with_port_override(port_from_env().as_deref())?;

    info!(
        "Configuration loaded: listening on {}, {} default expense categories.",
        config.server.bind_address(),
        config.flat_budget.expenses.len()
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [server]
            host = "127.0.0.1"
            port = 8081

            [flat_budget]
            allowance = 1200.0

            [flat_budget.expenses]
            rent = 800.0
            food = 500.0
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.server.bind_address(), "127.0.0.1:8081");
        assert_eq!(config.flat_budget.allowance, 1200.0);
        assert_eq!(config.flat_budget.expenses.len(), 2);
        assert_eq!(config.flat_budget.expenses["rent"], 800.0);
        assert!(config.flat_budget.summary().remaining < 0.0);
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.flat_budget.allowance, 1650.0);
    }

    #[test]
    fn test_parse_rejects_negative_defaults() {
        let toml_str = r"
            [flat_budget]
            allowance = -10.0
        ";
        assert!(matches!(parse_config(toml_str), Err(Error::Config { .. })));

        let toml_str = r"
            [flat_budget.expenses]
            groceries = -1.0
        ";
        assert!(matches!(parse_config(toml_str), Err(Error::Config { .. })));
    }

    #[test]
    fn test_parse_rejects_bad_types() {
        let toml_str = r#"
            [server]
            port = "eighty"
        "#;
        assert!(matches!(parse_config(toml_str), Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_config_or_default("definitely/not/here/config.toml").unwrap();
        assert_eq!(config, AppConfig::default());

        let result = load_config("definitely/not/here/config.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_shipped_config_file_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_PATH);
        let config = load_config(path).unwrap();
        assert_eq!(config.flat_budget, FlatBudgetDefaults::default());
    }
}
