//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ClientConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `credentials.app_id`.
pub const APP_ID_ENV_VAR: &str = "TRADERA_APP_ID";
/// Environment variable overriding `credentials.app_key`.
pub const APP_KEY_ENV_VAR: &str = "TRADERA_APP_KEY";
/// Environment variable overriding `credentials.sandbox` (`0`/`1`/`true`/`false`).
pub const SANDBOX_ENV_VAR: &str = "TRADERA_SANDBOX";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
///
/// Credentials from the process environment take precedence over the file.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content, |name| std::env::var(name).ok())
}

/// Parse, apply overrides from `lookup`, and validate.
pub fn parse_config<F>(content: &str, lookup: F) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config: ClientConfig = toml::from_str(content)?;
    apply_env_overrides(&mut config, lookup);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn apply_env_overrides<F>(config: &mut ClientConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(app_id) = lookup(APP_ID_ENV_VAR) {
        config.credentials.app_id = app_id;
    }
    if let Some(app_key) = lookup(APP_KEY_ENV_VAR) {
        config.credentials.app_key = app_key;
    }
    if let Some(raw) = lookup(SANDBOX_ENV_VAR) {
        match raw.trim() {
            "1" | "true" => config.credentials.sandbox = true,
            "0" | "false" => config.credentials.sandbox = false,
            other => tracing::warn!(
                value = %other,
                "Ignoring unrecognised {} value",
                SANDBOX_ENV_VAR
            ),
        }
    }
}
