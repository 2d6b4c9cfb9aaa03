//! Mapping of result nodes into typed records.

use crate::client::types::{BidOutcome, ListingItem, ListingStatus, SearchPage, TokenGrant};
use crate::normalize::cardinality::repeated;
use crate::normalize::coerce::{
    to_bool, to_non_negative_int, to_text, to_utc_timestamp, CoercionError,
};
use crate::normalize::tree::Node;
use crate::observability::metrics;

/// Build a search page from a `SearchAdvancedResult` node.
///
/// Items that fail coercion are logged and left out.
pub fn search_page(result: Option<&Node>) -> SearchPage {
    let result = result.unwrap_or(&Node::Empty);

    let items = repeated(result.get("Items"))
        .into_iter()
        .enumerate()
        .filter_map(|(position, node)| match listing_item(node) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(position, error = %e, "Dropping malformed search item");
                metrics::record_dropped_item("search");
                None
            }
        })
        .collect();

    let errors: Vec<String> = result
        .get("Errors")
        .map(|errors| errors.texts().into_iter().map(str::to_string).collect())
        .unwrap_or_default();

    SearchPage {
        total_items: to_non_negative_int(result.get("TotalNumberOfItems")).unwrap_or(0),
        total_pages: to_non_negative_int(result.get("TotalNumberOfPages")).unwrap_or(0),
        items,
        errors,
    }
}

/// Build one listing from an `Items` element.
pub fn listing_item(node: &Node) -> Result<ListingItem, CoercionError> {
    if !matches!(node, Node::Map(_)) {
        return Err(CoercionError::NotARecord);
    }

    let id = match node.get("Id").and_then(Node::text) {
        None => return Err(CoercionError::MissingField("Id")),
        Some(raw) => raw.trim().parse::<u64>().map_err(|_| CoercionError::InvalidField {
            field: "Id",
            value: raw.to_string(),
        })?,
    };

    let end_date = node
        .get("EndDate")
        .and_then(Node::text)
        .map(to_utc_timestamp)
        .transpose()?;

    let is_ended = to_bool(node.get("IsEnded"));

    Ok(ListingItem {
        id,
        title: to_text(node.get("ShortDescription")),
        description: to_text(node.get("LongDescription")),
        current_price: to_non_negative_int(node.get("MaxBid")).unwrap_or(0),
        buy_now_price: to_non_negative_int(node.get("BuyItNowPrice")),
        seller_id: to_non_negative_int(node.get("SellerId")).unwrap_or(0),
        seller_alias: to_text(node.get("SellerAlias")),
        end_date,
        next_bid: to_non_negative_int(node.get("NextBid")),
        has_bids: to_bool(node.get("HasBids")),
        is_ended,
        item_type: to_text(node.get("ItemType")),
        url: to_text(node.get("ItemUrl")),
        category_id: to_non_negative_int(node.get("CategoryId")).unwrap_or(0),
        bid_count: to_non_negative_int(node.get("BidCount")).unwrap_or(0),
        thumbnail_url: to_text(node.get("ThumbnailLink")),
        image_urls: image_urls(node.get("ImageLinks")),
        status: ListingStatus::from_ended(is_ended),
    })
}

/// URLs of `ImageLinks/ImageLink/Url`, in document order.
pub fn image_urls(image_links: Option<&Node>) -> Vec<String> {
    repeated(image_links)
        .into_iter()
        .flat_map(|links| repeated(links.get("ImageLink")))
        .filter_map(|link| link.get("Url").and_then(Node::text))
        .map(str::to_string)
        .collect()
}

/// Build a bid outcome from a `BuyResult` node.
pub fn bid_outcome(result: Option<&Node>) -> BidOutcome {
    let result = result.unwrap_or(&Node::Empty);
    BidOutcome::new(
        to_text(result.get("Status")),
        to_non_negative_int(result.get("NextBid")),
    )
}

/// Build a token grant from a `FetchTokenResult` node.
pub fn token_grant(result: Option<&Node>) -> TokenGrant {
    let result = result.unwrap_or(&Node::Empty);
    let user_id = to_non_negative_int(result.get("UserId"));
    if user_id.is_none() && result.get("UserId").and_then(Node::text).is_some() {
        tracing::warn!("Token response carries a non-numeric user id");
    }
    TokenGrant::new(
        user_id,
        to_text(result.get("Token")),
        to_text(result.get("ExpirationDate")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::tree::parse_document;

    const SINGLE_ITEM: &str = r#"<Items>
        <Id>123456</Id>
        <ShortDescription>Test Item</ShortDescription>
        <BuyItNowPrice>1000</BuyItNowPrice>
        <SellerId>9876</SellerId>
        <SellerAlias>TestSeller</SellerAlias>
        <MaxBid>500</MaxBid>
        <ThumbnailLink>http://example.com/thumb.jpg</ThumbnailLink>
        <EndDate>2025-05-01T12:00:00Z</EndDate>
        <NextBid>550</NextBid>
        <HasBids>true</HasBids>
        <IsEnded>false</IsEnded>
        <ItemType>Auction</ItemType>
        <ItemUrl>http://tradera.com/item/123456</ItemUrl>
        <CategoryId>100</CategoryId>
        <BidCount>3</BidCount>
        <ImageLinks>
          <ImageLink><Url>http://example.com/image.jpg</Url><Format>jpg</Format></ImageLink>
        </ImageLinks>
        <LongDescription>This is a test item description</LongDescription>
      </Items>"#;

    fn node(xml: &str) -> Node {
        let doc = parse_document(xml).unwrap();
        match doc {
            Node::Map(root) => root.into_values().next().unwrap(),
            other => other,
        }
    }

    #[test]
    fn test_single_item_fields() {
        let item = listing_item(&node(SINGLE_ITEM)).unwrap();

        assert_eq!(item.id, 123456);
        assert_eq!(item.title, "Test Item");
        assert_eq!(item.description, "This is a test item description");
        assert_eq!(item.current_price, 500);
        assert_eq!(item.buy_now_price, Some(1000));
        assert_eq!(item.seller_id, 9876);
        assert_eq!(item.seller_alias, "TestSeller");
        assert_eq!(
            item.end_date.map(|d| d.to_rfc3339()).as_deref(),
            Some("2025-05-01T12:00:00+00:00")
        );
        assert_eq!(item.next_bid, Some(550));
        assert!(item.has_bids);
        assert!(!item.is_ended);
        assert_eq!(item.item_type, "Auction");
        assert_eq!(item.url, "http://tradera.com/item/123456");
        assert_eq!(item.category_id, 100);
        assert_eq!(item.bid_count, 3);
        assert_eq!(item.thumbnail_url, "http://example.com/thumb.jpg");
        assert_eq!(item.image_urls, vec!["http://example.com/image.jpg"]);
        assert_eq!(item.status, ListingStatus::Active);
    }

    #[test]
    fn test_sparse_item_uses_defaults() {
        let item = listing_item(&node(
            "<Items><Id>5</Id><MaxBid>n/a</MaxBid><IsEnded>true</IsEnded></Items>",
        ))
        .unwrap();
        assert_eq!(item.current_price, 0);
        assert_eq!(item.buy_now_price, None);
        assert_eq!(item.next_bid, None);
        assert_eq!(item.bid_count, 0);
        assert_eq!(item.end_date, None);
        assert!(item.image_urls.is_empty());
        assert_eq!(item.status, ListingStatus::Ended);
    }

    #[test]
    fn test_item_failures() {
        assert!(matches!(
            listing_item(&node("<Items><Title>x</Title></Items>")),
            Err(CoercionError::MissingField("Id"))
        ));
        assert!(matches!(
            listing_item(&node("<Items><Id>abc</Id></Items>")),
            Err(CoercionError::InvalidField { field: "Id", .. })
        ));
        assert!(matches!(
            listing_item(&node("<Items><Id>1</Id><EndDate>soon</EndDate></Items>")),
            Err(CoercionError::InvalidTimestamp { .. })
        ));
        assert!(matches!(
            listing_item(&Node::Text("stray".into())),
            Err(CoercionError::NotARecord)
        ));
    }

    #[test]
    fn test_image_links_zero_one_many() {
        assert!(image_urls(None).is_empty());
        assert!(image_urls(Some(&node("<ImageLinks></ImageLinks>"))).is_empty());
        assert_eq!(
            image_urls(Some(&node(
                "<ImageLinks><ImageLink><Url>a</Url></ImageLink><ImageLink><Url>b</Url></ImageLink><ImageLink><Format>jpg</Format></ImageLink></ImageLinks>"
            ))),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_malformed_item_is_dropped() {
        let result = node(
            "<SearchAdvancedResult>
               <TotalNumberOfItems>2</TotalNumberOfItems>
               <TotalNumberOfPages>1</TotalNumberOfPages>
               <Items><Id>1</Id><ShortDescription>ok</ShortDescription></Items>
               <Items><ShortDescription>no id</ShortDescription></Items>
             </SearchAdvancedResult>",
        );
        let page = search_page(Some(&result));
        assert_eq!(page.total_items, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "ok");
    }

    #[test]
    fn test_empty_result() {
        let page = search_page(None);
        assert_eq!(page, SearchPage::default());

        let page = search_page(Some(&node(
            "<SearchAdvancedResult><TotalNumberOfItems>0</TotalNumberOfItems></SearchAdvancedResult>",
        )));
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_remote_errors_are_carried() {
        let page = search_page(Some(&node(
            "<SearchAdvancedResult><Errors><string>Unknown category</string></Errors></SearchAdvancedResult>",
        )));
        assert_eq!(page.errors, vec!["Unknown category"]);
    }

    #[test]
    fn test_bid_and_token_records() {
        let bid = bid_outcome(Some(&node(
            "<BuyResult><NextBid>600</NextBid><Status>Bought</Status></BuyResult>",
        )));
        assert_eq!(bid.status, "Bought");
        assert_eq!(bid.next_bid, Some(600));
        assert!(bid.success);

        let grant = token_grant(Some(&node(
            "<FetchTokenResult><UserId>12345</UserId><Token>abc123token</Token><ExpirationDate>2025-05-01T12:00:00Z</ExpirationDate></FetchTokenResult>",
        )));
        assert_eq!(grant.user_id, Some(12345));
        assert_eq!(grant.token, "abc123token");
        assert_eq!(grant.expiration, "2025-05-01T12:00:00Z");
        assert!(grant.success);

        let empty = token_grant(None);
        assert!(!empty.success);
        assert_eq!(empty.user_id, None);
        assert!(!bid_outcome(None).success);
    }
}
