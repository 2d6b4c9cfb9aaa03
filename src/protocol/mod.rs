//! SOAP wire protocol.
//!
//! # Data Flow
//! ```text
//! Façade call (search / place_bid / fetch_token)
//!     → operation.rs (body payload, SOAPAction, service role)
//!     → envelope.rs (authentication + configuration [+ authorization] headers)
//!     → transport (one POST)
//! ```
//!
//! # Design Decisions
//! - Envelopes are plain string templates; the schema is fixed and small
//! - Only the application credentials are escaped

pub mod envelope;
pub mod operation;

pub use envelope::EnvelopeBuilder;
pub use operation::{Operation, ServiceRole, API_NAMESPACE};
