//! Response normalization subsystem.
//!
//! # Data Flow
//! ```text
//! raw response body
//!     → tree.rs (generic nested node tree; parse failure is fatal)
//!     → locate Envelope/Body/<Op>Response/<Op>Result (missing ⇒ empty result)
//!     → cardinality.rs (lone mapping | list | absent ⇒ ordered sequence)
//!     → coerce.rs + records.rs (typed records, per-item failures dropped)
//! ```
//!
//! # Design Decisions
//! - Shape ambiguity is resolved in exactly one function (`repeated`)
//! - Coercions are named functions with fixed defaults
//! - One malformed item never discards its siblings

pub mod cardinality;
pub mod coerce;
pub mod records;
pub mod tree;

use crate::client::error::{ClientError, ClientResult};
use crate::client::types::{BidOutcome, SearchPage, TokenGrant};
use crate::protocol::Operation;
use tree::{parse_document, Node};

/// Normalize a `SearchAdvanced` response.
pub fn search_response(body: &str) -> ClientResult<SearchPage> {
    normalize(Operation::SearchAdvanced, body, records::search_page)
}

/// Normalize a `Buy` response.
pub fn bid_response(body: &str) -> ClientResult<BidOutcome> {
    normalize(Operation::Buy, body, records::bid_outcome)
}

/// Normalize a `FetchToken` response.
pub fn token_response(body: &str) -> ClientResult<TokenGrant> {
    normalize(Operation::FetchToken, body, records::token_grant)
}

fn normalize<T>(
    operation: Operation,
    body: &str,
    build: impl FnOnce(Option<&Node>) -> T,
) -> ClientResult<T> {
    let document = parse_document(body).map_err(|e| {
        ClientError::parse(
            format!("{} response: {}", operation.name(), e),
            Some(body.to_string()),
        )
    })?;

    let soap_body = document.path(&["Envelope", "Body"]);
    if let Some(fault) = soap_body.and_then(|b| b.get("Fault")) {
        let reason = fault
            .get("faultstring")
            .and_then(Node::text)
            .unwrap_or("unspecified fault");
        return Err(ClientError::parse(
            format!("{} response is a SOAP fault: {}", operation.name(), reason),
            Some(body.to_string()),
        ));
    }

    let result = soap_body
        .and_then(|b| b.get(operation.response_element()))
        .and_then(|r| r.get(operation.result_element()));
    if result.is_none() {
        tracing::debug!(
            operation = operation.label(),
            "Result node absent, treating as empty"
        );
    }

    Ok(build(result))
}
