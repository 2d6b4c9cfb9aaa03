//! Request dispatch subsystem.
//!
//! # Responsibilities
//! - POST one envelope to one endpoint with the operation's `SOAPAction`
//! - Classify the outcome: raw body on success, transport error otherwise
//!
//! # Design Decisions
//! - Exactly one network call per dispatch; no retries here
//! - Timeouts come from the configured HTTP client
//! - The `Dispatcher` trait is the seam tests use to count and inspect calls

use async_trait::async_trait;
use url::Url;

use crate::client::error::ClientError;

pub mod http;

pub use http::HttpDispatcher;

/// Content type of every request body.
pub const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Sends envelopes to the remote service.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Send `envelope` to `endpoint` and return the raw response body.
    async fn dispatch(
        &self,
        endpoint: &Url,
        soap_action: &str,
        envelope: String,
    ) -> Result<String, ClientError>;
}
