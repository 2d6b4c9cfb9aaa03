//! Application credentials and per-client user authorization.

use serde::{Deserialize, Serialize};

use crate::config::schema::CredentialsConfig;

/// Application identity sent in every envelope.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    app_id: String,
    app_key: String,
    sandbox: bool,
}

impl Credentials {
    /// Create credentials for one client instance.
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>, sandbox: bool) -> Self {
        Self {
            app_id: app_id.into(),
            app_key: app_key.into(),
            sandbox,
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    pub fn sandbox(&self) -> bool {
        self.sandbox
    }
}

impl From<&CredentialsConfig> for Credentials {
    fn from(config: &CredentialsConfig) -> Self {
        Self::new(config.app_id.clone(), config.app_key.clone(), config.sandbox)
    }
}

// The app key never reaches logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("app_key", &"<redacted>")
            .field("sandbox", &self.sandbox)
            .finish()
    }
}

/// An end-user authorization obtained from a token exchange.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Remote user id.
    pub user_id: u64,
    /// Opaque session token.
    pub token: String,
    /// Expiration as reported by the remote service. Carried, never parsed.
    #[serde(default)]
    pub expiration: Option<String>,
}

impl Session {
    pub fn new(user_id: u64, token: impl Into<String>) -> Self {
        Self {
            user_id,
            token: token.into(),
            expiration: None,
        }
    }

    /// Both a user id and a non-blank token are present.
    pub fn is_usable(&self) -> bool {
        self.user_id != 0 && !self.token.trim().is_empty()
    }

    /// Attach the remote expiration string.
    pub fn with_expiration(mut self, expiration: impl Into<String>) -> Self {
        self.expiration = Some(expiration.into());
        self
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("token", &"<redacted>")
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// The current (optional) session of one client.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    session: Option<Session>,
}

impl SessionState {
    /// Start with no session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any prior session as a whole.
    pub fn set_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    pub fn has_session(&self) -> bool {
        self.session().is_some()
    }

    /// The current session, if it can authorize a call.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref().filter(|session| session.is_usable())
    }
}
