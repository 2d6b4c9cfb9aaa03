//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the marketplace client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Application credentials (app id, app key, sandbox flag).
    pub credentials: CredentialsConfig,

    /// Service endpoint URLs.
    pub endpoints: EndpointConfig,

    /// Transport timeouts.
    pub timeouts: TimeoutConfig,

    /// Protocol-level settings embedded in each envelope.
    pub protocol: ProtocolConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Application credentials.
///
/// The app key is normally supplied through `TRADERA_APP_KEY` rather than
/// written to disk.
#[derive(Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Application id issued by the marketplace.
    pub app_id: String,

    /// Application key issued by the marketplace.
    pub app_key: String,

    /// Route requests to the remote test environment.
    pub sandbox: bool,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("app_id", &self.app_id)
            .field("app_key", &"<redacted>")
            .field("sandbox", &self.sandbox)
            .finish()
    }
}

/// Endpoint URL for each service role.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Search service (listing search).
    pub search_service: String,

    /// Buyer service (bid placement).
    pub buyer_service: String,

    /// Public service (token exchange).
    pub public_service: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            search_service: "https://api.tradera.com/v3/searchservice.asmx".to_string(),
            buyer_service: "https://api.tradera.com/v3/buyerservice.asmx".to_string(),
            public_service: "https://api.tradera.com/v3/publicservice.asmx".to_string(),
        }
    }
}

/// Timeout configuration for the HTTP transport.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Settings carried in the configuration header of every envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Maximum age in seconds of cached results the remote service may return.
    pub max_result_age: u32,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self { max_result_age: 60 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, for development.
    Pretty,
    /// One JSON object per line, for log aggregation.
    Json,
}
