//! Operation and construction errors.

use serde::Serialize;
use thiserror::Error;

/// Coarse classification of a [`ClientError`], for callers mapping errors to
/// their own responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Transport,
    Parse,
    Unauthorized,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Parse => "parse",
            ErrorKind::Unauthorized => "unauthorized",
        }
    }
}

/// Errors returned by the façade operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The remote call failed or answered with a non-success status.
    #[error("Transport error: {message}")]
    Transport {
        /// HTTP status, absent when no response was received.
        status: Option<u16>,
        message: String,
        /// Raw response body, kept for diagnostics.
        body: Option<String>,
    },

    /// The response could not be interpreted.
    #[error("Parse error: {message}")]
    Parse {
        message: String,
        body: Option<String>,
    },

    /// An authorized operation was attempted without a session.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl ClientError {
    pub fn transport(status: Option<u16>, message: impl Into<String>, body: Option<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
            body,
        }
    }

    pub fn parse(message: impl Into<String>, body: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Transport { .. } => ErrorKind::Transport,
            ClientError::Parse { .. } => ErrorKind::Parse,
            ClientError::Unauthorized(_) => ErrorKind::Unauthorized,
        }
    }

    /// HTTP status of a transport error, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// The remote payload associated with the error, if any.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            ClientError::Transport { body, .. } | ClientError::Parse { body, .. } => {
                body.as_deref()
            }
            ClientError::Unauthorized(_) => None,
        }
    }
}

/// Result type for façade operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised while constructing a client from configuration.
#[derive(Debug, Error)]
pub enum BuildError {
    /// An endpoint URL did not parse.
    #[error("Invalid {name} endpoint '{url}': {source}")]
    InvalidEndpoint {
        name: &'static str,
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
