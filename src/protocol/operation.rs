//! Operation catalogue and body payloads.
//!
//! Payload values are embedded verbatim. Callers must pass values that are
//! safe inside XML text (no `<`, `&`).

use crate::client::types::SearchCriteria;

/// Namespace of every operation and header element.
pub const API_NAMESPACE: &str = "http://api.tradera.com";

/// Which remote service an operation is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceRole {
    Search,
    Buyer,
    Public,
}

/// The remote operations this client speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SearchAdvanced,
    Buy,
    FetchToken,
}

impl Operation {
    /// Remote operation name.
    pub fn name(self) -> &'static str {
        match self {
            Operation::SearchAdvanced => "SearchAdvanced",
            Operation::Buy => "Buy",
            Operation::FetchToken => "FetchToken",
        }
    }

    /// Value of the `SOAPAction` transport header.
    pub fn soap_action(self) -> &'static str {
        match self {
            Operation::SearchAdvanced => "http://api.tradera.com/SearchAdvanced",
            Operation::Buy => "http://api.tradera.com/Buy",
            Operation::FetchToken => "http://api.tradera.com/FetchToken",
        }
    }

    pub fn service(self) -> ServiceRole {
        match self {
            Operation::SearchAdvanced => ServiceRole::Search,
            Operation::Buy => ServiceRole::Buyer,
            Operation::FetchToken => ServiceRole::Public,
        }
    }

    /// Whether the envelope carries the user's authorization block.
    pub fn requires_authorization(self) -> bool {
        matches!(self, Operation::Buy)
    }

    /// Element wrapping the result inside the response body.
    pub fn response_element(self) -> &'static str {
        match self {
            Operation::SearchAdvanced => "SearchAdvancedResponse",
            Operation::Buy => "BuyResponse",
            Operation::FetchToken => "FetchTokenResponse",
        }
    }

    pub fn result_element(self) -> &'static str {
        match self {
            Operation::SearchAdvanced => "SearchAdvancedResult",
            Operation::Buy => "BuyResult",
            Operation::FetchToken => "FetchTokenResult",
        }
    }

    /// Label used in logs and metrics.
    pub fn label(self) -> &'static str {
        match self {
            Operation::SearchAdvanced => "search",
            Operation::Buy => "place_bid",
            Operation::FetchToken => "fetch_token",
        }
    }
}

/// `SearchAdvanced` body.
pub fn search_payload(criteria: &SearchCriteria) -> String {
    format!(
        r#"<SearchAdvanced xmlns="{ns}">
      <request>
        <SearchWords>{words}</SearchWords>
        <CategoryId>{category}</CategoryId>
        <SearchInDescription>{in_description}</SearchInDescription>
        {price_min}
        {price_max}
        <ItemType>{item_type}</ItemType>
        <ItemStatus>{item_status}</ItemStatus>
        <ItemsPerPage>{per_page}</ItemsPerPage>
        <PageNumber>{page}</PageNumber>
        <OrderBy>{order_by}</OrderBy>
      </request>
    </SearchAdvanced>"#,
        ns = API_NAMESPACE,
        words = criteria.keywords.as_deref().unwrap_or_default(),
        category = criteria.category_id,
        in_description = criteria.search_in_description,
        price_min = nillable("PriceMinimum", criteria.price_minimum),
        price_max = nillable("PriceMaximum", criteria.price_maximum),
        item_type = criteria.item_type.as_deref().unwrap_or_default(),
        item_status = criteria.item_status.as_deref().unwrap_or_default(),
        per_page = criteria.items_per_page,
        page = criteria.page_number,
        order_by = criteria.order_by,
    )
}

/// `Buy` body.
pub fn buy_payload(item_id: u64, amount: u64) -> String {
    format!(
        r#"<Buy xmlns="{ns}">
      <itemId>{item_id}</itemId>
      <buyAmount>{amount}</buyAmount>
    </Buy>"#,
        ns = API_NAMESPACE,
    )
}

/// `FetchToken` body.
pub fn fetch_token_payload(secret_key: &str) -> String {
    format!(
        r#"<FetchToken xmlns="{ns}">
      <secretKey>{secret_key}</secretKey>
    </FetchToken>"#,
        ns = API_NAMESPACE,
    )
}

fn nillable(element: &str, value: Option<u64>) -> String {
    match value {
        Some(value) => format!("<{element}>{value}</{element}>"),
        None => format!(r#"<{element} xsi:nil="true" />"#),
    }
}
