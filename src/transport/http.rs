//! Reqwest-backed dispatcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::client::error::ClientError;
use crate::config::schema::TimeoutConfig;
use crate::normalize::tree::{parse_document, Node};
use crate::transport::{Dispatcher, SOAP_CONTENT_TYPE};

const PREVIEW_CHAR_LIMIT: usize = 160;

/// Dispatcher performing HTTP POST requests.
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
    client: Client,
}

impl HttpDispatcher {
    /// Build a dispatcher with explicit connect and request timeouts.
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.request_secs))
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Dispatcher for HttpDispatcher {
    async fn dispatch(
        &self,
        endpoint: &Url,
        soap_action: &str,
        envelope: String,
    ) -> Result<String, ClientError> {
        tracing::debug!(
            endpoint = %endpoint,
            soap_action = %soap_action,
            bytes = envelope.len(),
            "Dispatching envelope"
        );

        let response = self
            .client
            .post(endpoint.clone())
            .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
            .header("SOAPAction", soap_action)
            .body(envelope)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| map_body_error(status, e))?;
        if !status.is_success() {
            let error = map_status_error(status, body);
            tracing::error!(
                endpoint = %endpoint,
                status = status.as_u16(),
                error = %error,
                "Remote call failed"
            );
            return Err(error);
        }

        Ok(body)
    }
}

fn map_transport_error(error: reqwest::Error) -> ClientError {
    let message = if error.is_timeout() {
        format!("request timed out: {}", error)
    } else {
        error.to_string()
    };
    ClientError::transport(error.status().map(|s| s.as_u16()), message, None)
}

fn map_body_error(status: StatusCode, error: reqwest::Error) -> ClientError {
    ClientError::transport(
        Some(status.as_u16()),
        format!("status {}: failed to read response body: {}", status.as_u16(), error),
        None,
    )
}

fn map_status_error(status: StatusCode, body: String) -> ClientError {
    let detail = fault_string(&body).unwrap_or_else(|| body_preview(&body));
    let message = if detail.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), detail)
    };
    ClientError::transport(Some(status.as_u16()), message, Some(body))
}

/// `faultstring` of a SOAP fault body, if the body is one.
fn fault_string(body: &str) -> Option<String> {
    let document = parse_document(body).ok()?;
    match document.path(&["Envelope", "Body", "Fault", "faultstring"]) {
        Some(Node::Text(text)) => Some(text.clone()),
        _ => None,
    }
}

fn body_preview(body: &str) -> String {
    let compact = body.split_whitespace().collect::<Vec<_>>().join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{}...", preview)
    } else {
        preview
    }
}
