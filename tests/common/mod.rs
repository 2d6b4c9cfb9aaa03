//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

use tradera_client::client::Endpoints;
use tradera_client::transport::Dispatcher;
use tradera_client::{ClientError, Credentials, MarketplaceClient};

pub const SEARCH_TWO_ITEMS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"
              xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
              xmlns:xsd="http://www.w3.org/2001/XMLSchema">
  <soap:Body>
    <SearchAdvancedResponse xmlns="http://api.tradera.com">
      <SearchAdvancedResult>
        <TotalNumberOfItems>2</TotalNumberOfItems>
        <TotalNumberOfPages>1</TotalNumberOfPages>
        <Items>
          <Id>123456</Id>
          <ShortDescription>Test Item 1</ShortDescription>
          <BuyItNowPrice>1000</BuyItNowPrice>
          <SellerId>9876</SellerId>
          <SellerAlias>TestSeller</SellerAlias>
          <MaxBid>500</MaxBid>
          <ThumbnailLink>http://example.com/thumb1.jpg</ThumbnailLink>
          <SellerDsrAverage>4.8</SellerDsrAverage>
          <EndDate>2025-05-01T12:00:00Z</EndDate>
          <NextBid>550</NextBid>
          <HasBids>true</HasBids>
          <IsEnded>false</IsEnded>
          <ItemType>Auction</ItemType>
          <ItemUrl>http://tradera.com/item/123456</ItemUrl>
          <CategoryId>100</CategoryId>
          <BidCount>3</BidCount>
          <ImageLinks>
            <ImageLink>
              <Url>http://example.com/image1.jpg</Url>
              <Format>jpg</Format>
            </ImageLink>
          </ImageLinks>
          <LongDescription>This is a test item description</LongDescription>
        </Items>
        <Items>
          <Id>789012</Id>
          <ShortDescription>Test Item 2</ShortDescription>
          <BuyItNowPrice>2000</BuyItNowPrice>
          <SellerId>9876</SellerId>
          <SellerAlias>TestSeller</SellerAlias>
          <MaxBid>1200</MaxBid>
          <ThumbnailLink>http://example.com/thumb2.jpg</ThumbnailLink>
          <EndDate>2025-05-02T12:00:00Z</EndDate>
          <NextBid>1250</NextBid>
          <HasBids>true</HasBids>
          <IsEnded>false</IsEnded>
          <ItemType>Auction</ItemType>
          <ItemUrl>http://tradera.com/item/789012</ItemUrl>
          <CategoryId>100</CategoryId>
          <BidCount>5</BidCount>
          <ImageLinks>
            <ImageLink>
              <Url>http://example.com/image2.jpg</Url>
              <Format>jpg</Format>
            </ImageLink>
            <ImageLink>
              <Url>http://example.com/image3.jpg</Url>
              <Format>jpg</Format>
            </ImageLink>
          </ImageLinks>
          <LongDescription>This is another test item description</LongDescription>
        </Items>
      </SearchAdvancedResult>
    </SearchAdvancedResponse>
  </soap:Body>
</soap:Envelope>"#;

pub const BID_BOUGHT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <BuyResponse xmlns="http://api.tradera.com">
      <BuyResult>
        <NextBid>600</NextBid>
        <Status>Bought</Status>
      </BuyResult>
    </BuyResponse>
  </soap:Body>
</soap:Envelope>"#;

pub const TOKEN_GRANTED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <FetchTokenResponse xmlns="http://api.tradera.com">
      <FetchTokenResult>
        <UserId>12345</UserId>
        <Token>abc123token</Token>
        <ExpirationDate>2025-05-01T12:00:00Z</ExpirationDate>
      </FetchTokenResult>
    </FetchTokenResponse>
  </soap:Body>
</soap:Envelope>"#;

/// Wrap a `SearchAdvancedResult` inner fragment in a full response.
pub fn search_response(result_inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <SearchAdvancedResponse xmlns="http://api.tradera.com">
      <SearchAdvancedResult>{}</SearchAdvancedResult>
    </SearchAdvancedResponse>
  </soap:Body>
</soap:Envelope>"#,
        result_inner
    )
}

/// One captured dispatch.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub endpoint: Url,
    pub soap_action: String,
    pub envelope: String,
}

/// Dispatcher returning canned results in order and recording every call.
#[derive(Default)]
pub struct RecordingDispatcher {
    responses: Mutex<VecDeque<Result<String, ClientError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, body: &str) -> Self {
        self.responses.lock().unwrap().push_back(Ok(body.to_string()));
        self
    }

    pub fn fail(self, error: ClientError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Dispatcher for RecordingDispatcher {
    async fn dispatch(
        &self,
        endpoint: &Url,
        soap_action: &str,
        envelope: String,
    ) -> Result<String, ClientError> {
        self.calls.lock().unwrap().push(RecordedCall {
            endpoint: endpoint.clone(),
            soap_action: soap_action.to_string(),
            envelope,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::transport(None, "no canned response", None)))
    }
}

pub fn test_endpoints() -> Endpoints {
    Endpoints {
        search: Url::parse("http://search.test/v3/searchservice.asmx").unwrap(),
        buyer: Url::parse("http://buyer.test/v3/buyerservice.asmx").unwrap(),
        public: Url::parse("http://public.test/v3/publicservice.asmx").unwrap(),
    }
}

pub fn recording_client(dispatcher: RecordingDispatcher) -> MarketplaceClient<RecordingDispatcher> {
    MarketplaceClient::new(
        dispatcher,
        Credentials::new("12345", "test_key", true),
        test_endpoints(),
        60,
    )
}

/// Start a mock SOAP backend answering every request with `status` and
/// `body`. Returns its address and the raw requests it received.
pub async fn start_soap_backend(status: u16, body: String) -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let captured = requests.clone();
    let body = Arc::new(body);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let captured = captured.clone();
                    let body = body.clone();
                    tokio::spawn(async move {
                        let request = read_request(&mut socket).await;
                        captured.lock().unwrap().push(request);

                        let status_text = match status {
                            200 => "200 OK",
                            400 => "400 Bad Request",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: text/xml; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, requests)
}

/// Start a backend that announces a longer body than it sends, then hangs up.
pub async fn start_truncated_backend(status_line: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let _ = read_request(&mut socket).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: text/xml; charset=utf-8\r\nContent-Length: 4096\r\nConnection: close\r\n\r\n<soap:Envelope",
                    status_line
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
