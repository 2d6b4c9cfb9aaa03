//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Credentials are present
//! - Endpoint URLs parse and use http(s)
//! - Timeouts are non-zero
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::ClientConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("{0} must not be empty")]
    Missing(&'static str),

    /// An endpoint is not an absolute http(s) URL.
    #[error("endpoint {name} is invalid: {reason}")]
    InvalidEndpoint { name: &'static str, reason: String },

    /// A timeout is zero.
    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.credentials.app_id.trim().is_empty() {
        errors.push(ValidationError::Missing("credentials.app_id"));
    }
    if config.credentials.app_key.trim().is_empty() {
        errors.push(ValidationError::Missing("credentials.app_key"));
    }

    for (name, raw) in [
        ("search_service", &config.endpoints.search_service),
        ("buyer_service", &config.endpoints.buyer_service),
        ("public_service", &config.endpoints.public_service),
    ] {
        if let Err(reason) = check_endpoint(raw) {
            errors.push(ValidationError::InvalidEndpoint { name, reason });
        }
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.connect_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_endpoint(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}
