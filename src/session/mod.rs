//! Session state subsystem.
//!
//! # Data Flow
//! ```text
//! ClientConfig.credentials
//!     → Credentials (immutable for the client's lifetime)
//!
//! FetchToken result (or explicit override)
//!     → Session (user id + token, replaced as a whole)
//!     → read by the envelope builder for authorized operations
//! ```
//!
//! # Design Decisions
//! - A session is an `Option<Session>`: fully unset or fully set, never partial
//! - Replacing a session needs `&mut` access to the owning client, so one
//!   client instance maps to one end-user identity
//! - No network or parsing logic lives here

pub mod state;

pub use state::{Credentials, Session, SessionState};
