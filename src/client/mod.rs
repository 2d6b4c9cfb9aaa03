//! Operation façade subsystem.
//!
//! # Data Flow
//! ```text
//! search(criteria) / place_bid(item, amount) / fetch_token(secret)
//!     → session check (place_bid only, before any I/O)
//!     → protocol (payload + envelope)
//!     → transport (one POST)
//!     → normalize (typed result)
//!     → fetch_token success: session replaced
//! ```
//!
//! # Design Decisions
//! - Every operation returns a typed value or exactly one `ClientError`
//! - No retries; the caller owns retry policy
//! - Token expiration is carried as data and not enforced

pub mod error;
pub mod facade;
pub mod types;

pub use error::{BuildError, ClientError, ClientResult, ErrorKind};
pub use facade::{Endpoints, MarketplaceClient};
pub use types::{
    BidOutcome, ListingItem, ListingStatus, SearchCriteria, SearchPage, TokenGrant,
};
