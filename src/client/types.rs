//! Request and result types of the façade operations.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Status string the remote service reports for an accepted bid.
pub const BID_ACCEPTED_STATUS: &str = "Bought";

/// Parameters of a listing search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
    /// Free-text keywords.
    pub keywords: Option<String>,
    /// Category id, 0 for all categories.
    pub category_id: u64,
    /// Also match keywords against listing descriptions.
    pub search_in_description: bool,
    pub price_minimum: Option<u64>,
    pub price_maximum: Option<u64>,
    /// Listing type filter (e.g. `Auction`, `PureBuyItNow`, `ShopItem`).
    pub item_type: Option<String>,
    pub item_status: Option<String>,
    pub items_per_page: u32,
    /// Page number, starting from 1.
    pub page_number: u32,
    /// Remote sort order name.
    pub order_by: String,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            keywords: None,
            category_id: 0,
            search_in_description: true,
            price_minimum: None,
            price_maximum: None,
            item_type: None,
            item_status: None,
            items_per_page: 25,
            page_number: 1,
            order_by: "EndDateAscending".to_string(),
        }
    }
}

impl SearchCriteria {
    /// Criteria matching `keywords` with every other field defaulted.
    pub fn keywords(keywords: impl Into<String>) -> Self {
        Self {
            keywords: Some(keywords.into()),
            ..Self::default()
        }
    }
}

/// Whether a listing is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Active,
    Ended,
}

impl ListingStatus {
    pub fn from_ended(is_ended: bool) -> Self {
        if is_ended {
            ListingStatus::Ended
        } else {
            ListingStatus::Active
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ListingStatus::Active => "active",
            ListingStatus::Ended => "ended",
        }
    }
}

/// A normalized search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingItem {
    pub id: u64,
    pub title: String,
    pub description: String,
    /// Highest bid so far, 0 when there is none.
    pub current_price: u64,
    pub buy_now_price: Option<u64>,
    pub seller_id: u64,
    pub seller_alias: String,
    /// End of the listing, always at a `+00:00` offset.
    pub end_date: Option<DateTime<FixedOffset>>,
    pub next_bid: Option<u64>,
    pub has_bids: bool,
    pub is_ended: bool,
    pub item_type: String,
    pub url: String,
    pub category_id: u64,
    pub bid_count: u64,
    pub thumbnail_url: String,
    pub image_urls: Vec<String>,
    pub status: ListingStatus,
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    pub total_items: u64,
    pub total_pages: u64,
    pub items: Vec<ListingItem>,
    /// Errors reported by the remote service alongside the result.
    pub errors: Vec<String>,
}

/// Result of a bid placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidOutcome {
    /// Remote status string.
    pub status: String,
    pub next_bid: Option<u64>,
    /// True iff `status` is the accepted-bid sentinel.
    pub success: bool,
}

impl BidOutcome {
    pub fn new(status: String, next_bid: Option<u64>) -> Self {
        let success = status == BID_ACCEPTED_STATUS;
        Self {
            status,
            next_bid,
            success,
        }
    }
}

/// Result of a token exchange.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGrant {
    pub user_id: Option<u64>,
    pub token: String,
    /// Opaque expiration string as sent by the remote service.
    pub expiration: String,
    /// True iff both user id and token were present.
    pub success: bool,
}

impl TokenGrant {
    pub fn new(user_id: Option<u64>, token: String, expiration: String) -> Self {
        let success = user_id.is_some() && !token.is_empty();
        Self {
            user_id,
            token,
            expiration,
            success,
        }
    }
}

impl std::fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenGrant")
            .field("user_id", &self.user_id)
            .field("token", &"<redacted>")
            .field("expiration", &self.expiration)
            .field("success", &self.success)
            .finish()
    }
}
