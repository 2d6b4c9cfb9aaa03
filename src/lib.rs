//! Client for the Tradera SOAP marketplace API.
//!
//! Searches listings, places bids, and exchanges a login secret for a user
//! session token.
//!
//! ```text
//!   caller ──▶ client (façade) ──▶ protocol (envelope) ──▶ transport (POST)
//!                 ▲                                             │
//!                 └──────────── normalize (typed records) ◀─────┘
//! ```

pub mod client;
pub mod config;
pub mod normalize;
pub mod observability;
pub mod protocol;
pub mod session;
pub mod transport;

pub use client::{ClientError, ErrorKind, MarketplaceClient, SearchCriteria};
pub use config::ClientConfig;
pub use session::{Credentials, Session};
