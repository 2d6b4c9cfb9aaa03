//! Marketplace client façade.
//!
//! # Responsibilities
//! - Expose search, bid placement and token exchange
//! - Wire envelope building, dispatch and normalization per operation
//! - Own the client's session (set by token exchange or explicitly)

use std::time::Instant;

use url::Url;

use crate::client::error::{BuildError, ClientError, ClientResult};
use crate::client::types::{BidOutcome, SearchCriteria, SearchPage, TokenGrant};
use crate::config::schema::{ClientConfig, EndpointConfig};
use crate::normalize;
use crate::observability::metrics;
use crate::protocol::operation::{buy_payload, fetch_token_payload, search_payload};
use crate::protocol::{EnvelopeBuilder, Operation, ServiceRole};
use crate::session::{Credentials, Session, SessionState};
use crate::transport::{Dispatcher, HttpDispatcher};

/// Parsed endpoint URL for each service role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub search: Url,
    pub buyer: Url,
    pub public: Url,
}

impl Endpoints {
    pub fn from_config(config: &EndpointConfig) -> Result<Self, BuildError> {
        Ok(Self {
            search: parse_endpoint("search", &config.search_service)?,
            buyer: parse_endpoint("buyer", &config.buyer_service)?,
            public: parse_endpoint("public", &config.public_service)?,
        })
    }

    pub fn for_role(&self, role: ServiceRole) -> &Url {
        match role {
            ServiceRole::Search => &self.search,
            ServiceRole::Buyer => &self.buyer,
            ServiceRole::Public => &self.public,
        }
    }
}

fn parse_endpoint(name: &'static str, raw: &str) -> Result<Url, BuildError> {
    Url::parse(raw).map_err(|source| BuildError::InvalidEndpoint {
        name,
        url: raw.to_string(),
        source,
    })
}

/// Client for the marketplace SOAP API.
///
/// One instance carries one end-user session. Use one instance per identity.
pub struct MarketplaceClient<D = HttpDispatcher> {
    dispatcher: D,
    envelopes: EnvelopeBuilder,
    endpoints: Endpoints,
    state: SessionState,
}

impl MarketplaceClient<HttpDispatcher> {
    /// Build a client with an HTTP dispatcher from validated configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, BuildError> {
        let dispatcher = HttpDispatcher::new(&config.timeouts)?;
        let endpoints = Endpoints::from_config(&config.endpoints)?;
        let credentials = Credentials::from(&config.credentials);

        tracing::info!(
            app_id = %credentials.app_id(),
            sandbox = credentials.sandbox(),
            search_endpoint = %endpoints.search,
            "Marketplace client initialized"
        );

        Ok(Self::new(
            dispatcher,
            credentials,
            endpoints,
            config.protocol.max_result_age,
        ))
    }
}

impl<D: Dispatcher> MarketplaceClient<D> {
    pub fn new(
        dispatcher: D,
        credentials: Credentials,
        endpoints: Endpoints,
        max_result_age: u32,
    ) -> Self {
        Self {
            dispatcher,
            envelopes: EnvelopeBuilder::new(credentials, max_result_age),
            endpoints,
            state: SessionState::new(),
        }
    }

    /// Replace the current session, e.g. with one restored by the caller.
    pub fn set_session(&mut self, session: Session) {
        self.state.set_session(session);
    }

    pub fn has_session(&self) -> bool {
        self.state.has_session()
    }

    pub fn session(&self) -> Option<&Session> {
        self.state.session()
    }

    pub fn credentials(&self) -> &Credentials {
        self.envelopes.credentials()
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Search listings. Always anonymous.
    pub async fn search(&self, criteria: &SearchCriteria) -> ClientResult<SearchPage> {
        let operation = Operation::SearchAdvanced;
        let start = Instant::now();

        let result = match self.call(operation, &search_payload(criteria)).await {
            Ok(body) => normalize::search_response(&body),
            Err(e) => Err(e),
        };

        if let Ok(page) = &result {
            tracing::info!(
                total_items = page.total_items,
                returned = page.items.len(),
                page = criteria.page_number,
                "Search completed"
            );
        }
        observe(operation, start, result)
    }

    /// Place a bid on `item_id`.
    ///
    /// Fails with an unauthorized error, without any network call, when no
    /// session is set.
    pub async fn place_bid(&self, item_id: u64, amount: u64) -> ClientResult<BidOutcome> {
        let operation = Operation::Buy;
        let start = Instant::now();

        if !self.has_session() {
            return observe(
                operation,
                start,
                Err(ClientError::Unauthorized(
                    "user token not set; authentication required for bidding".to_string(),
                )),
            );
        }

        let result = match self.call(operation, &buy_payload(item_id, amount)).await {
            Ok(body) => normalize::bid_response(&body),
            Err(e) => Err(e),
        };

        if let Ok(outcome) = &result {
            tracing::info!(
                item_id,
                amount,
                status = %outcome.status,
                success = outcome.success,
                "Bid placed"
            );
        }
        observe(operation, start, result)
    }

    /// Exchange `secret_key` for a user token.
    ///
    /// On success the client's session is replaced with the granted one.
    pub async fn fetch_token(&mut self, secret_key: &str) -> ClientResult<TokenGrant> {
        let operation = Operation::FetchToken;
        let start = Instant::now();

        let result = match self.call(operation, &fetch_token_payload(secret_key)).await {
            Ok(body) => normalize::token_response(&body),
            Err(e) => Err(e),
        };

        if let Ok(grant) = &result {
            match grant.user_id {
                Some(user_id) if grant.success => {
                    let mut session = Session::new(user_id, grant.token.clone());
                    if !grant.expiration.is_empty() {
                        session = session.with_expiration(grant.expiration.clone());
                    }
                    self.state.set_session(session);
                    tracing::info!(
                        user_id,
                        expiration = %grant.expiration,
                        "Session established"
                    );
                }
                _ => tracing::warn!("Token exchange returned no usable token"),
            }
        }
        observe(operation, start, result)
    }

    async fn call(&self, operation: Operation, payload: &str) -> ClientResult<String> {
        let envelope = self.envelopes.build(
            payload,
            operation.requires_authorization(),
            self.state.session(),
        );
        let endpoint = self.endpoints.for_role(operation.service());
        self.dispatcher
            .dispatch(endpoint, operation.soap_action(), envelope)
            .await
    }
}

fn observe<T>(operation: Operation, start: Instant, result: ClientResult<T>) -> ClientResult<T> {
    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => {
            tracing::warn!(operation = operation.label(), error = %e, "Operation failed");
            e.kind().as_str()
        }
    };
    metrics::record_operation(operation.label(), outcome, start);
    result
}

impl<D> std::fmt::Debug for MarketplaceClient<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketplaceClient")
            .field("credentials", self.envelopes.credentials())
            .field("endpoints", &self.endpoints)
            .field("session", &self.state.session())
            .finish()
    }
}
