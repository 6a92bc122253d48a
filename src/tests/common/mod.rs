pub use httpmock::Method::{GET, POST};
pub use httpmock::{Mock, MockServer};
pub use serde_json::json;

use std::net::SocketAddr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::client::FuelCheckClient;
use crate::utils::constants::AUTH_ENDPOINT;

pub const TEST_CLIENT_ID: &str = "key";
pub const TEST_CLIENT_SECRET: &str = "secret";
pub const TEST_TOKEN: &str = "testtoken";

/// Client pointed at the mock server.
pub fn test_client(server: &MockServer) -> FuelCheckClient {
    FuelCheckClient::with_base_url(server.base_url(), TEST_CLIENT_ID, TEST_CLIENT_SECRET)
}

pub fn basic_authorization() -> String {
    format!("Basic {}", BASE64.encode(format!("{TEST_CLIENT_ID}:{TEST_CLIENT_SECRET}")))
}

/// Standard token mock: one-hour expiry, fixed bearer value.
pub async fn mock_token_endpoint(server: &MockServer) -> Mock<'_> {
    mock_token_endpoint_with(server, json!({"access_token": TEST_TOKEN, "expires_in": 3600}))
        .await
}

/// Token mock answering with an arbitrary body.
pub async fn mock_token_endpoint_with(
    server: &MockServer,
    body: serde_json::Value,
) -> Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path(AUTH_ENDPOINT)
                .query_param("grant_type", "client_credentials")
                .header("Authorization", basic_authorization());
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(body);
        })
        .await
}

/// Serve exactly one successful token response on an ephemeral port,
/// then drop the listener so every later connection is refused. Await
/// the handle before issuing the follow-up request.
pub async fn spawn_one_shot_token_server() -> (SocketAddr, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().expect("local addr");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept failed");
        let mut buf = [0u8; 2048];
        let _ = socket.read(&mut buf).await;

        let body = format!(r#"{{"access_token":"{TEST_TOKEN}","expires_in":3600}}"#);
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body,
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });

    (addr, handle)
}

/// Body of the all-prices endpoint: two stations, five prices.
/// Mirrors the shapes the live API returns, string codes included.
pub fn all_prices_fixture() -> serde_json::Value {
    json!({
        "stations": [
            {
                "brandid": "BAAAAAA",
                "stationid": "SAAAAAA",
                "brand": "Cool Fuel Brand",
                "code": "1",
                "name": "Cool Fuel Brand Hurstville",
                "address": "123 Fake Street, Hurstville NSW 2220",
                "location": {"latitude": -33.9672, "longitude": 151.1013},
            },
            {
                "brandid": "BAAAAAB",
                "stationid": "SAAAAAB",
                "brand": "Fake Fuel Brand",
                "code": "2",
                "name": "Fake Fuel Brand Kogarah",
                "address": "456 Fake Street, Kogarah NSW 2217",
                "location": {"latitude": -30.9672, "longitude": 152.1013},
            },
        ],
        "prices": [
            {"stationcode": "1", "fueltype": "DL", "price": 159.9, "lastupdated": "02/06/2018 02:03:04"},
            {"stationcode": "1", "fueltype": "E10", "price": 146.9, "lastupdated": "02/06/2018 02:03:04"},
            {"stationcode": "1", "fueltype": "P95", "price": 156.9, "lastupdated": "02/06/2018 02:03:04"},
            {"stationcode": "2", "fueltype": "P95", "price": 150.0, "lastupdated": "02/06/2018 02:03:04"},
            {"stationcode": "2", "fueltype": "E10", "price": 144.9, "lastupdated": "02/06/2018 02:03:04"},
        ],
    })
}

/// Body of the nearby endpoint: three stations, one orphan price.
pub fn nearby_fixture() -> serde_json::Value {
    json!({
        "stations": [
            {
                "stationid": "SAAAAAA",
                "brandid": "BAAAAAA",
                "brand": "Cool Fuel Brand",
                "code": 678,
                "name": "Cool Fuel Brand Luxembourg",
                "address": "123 Fake Street",
                "location": {"latitude": -33.987, "longitude": 151.334},
            },
            {
                "stationid": "SAAAAAB",
                "brandid": "BAAAAAB",
                "brand": "Fake Fuel Brand",
                "code": 679,
                "name": "Fake Fuel Brand Luxembourg",
                "address": "123 Fake Street",
                "location": {"latitude": -33.587, "longitude": 151.434},
            },
            {
                "stationid": "SAAAAAC",
                "brandid": "BAAAAAB",
                "brand": "Fake Fuel Brand2",
                "code": 880,
                "name": "Fake Fuel Brand2 Luxembourg",
                "address": "123 Fake Street",
                "location": {"latitude": -33.687, "longitude": 151.234},
            },
        ],
        "prices": [
            {"stationcode": 678, "fueltype": "P95", "price": 150.9, "priceunit": "litre", "lastupdated": "2018-06-02 00:46:31"},
            {"stationcode": 679, "fueltype": "P95", "price": 130.9, "priceunit": "litre", "lastupdated": "2018-06-02 00:46:31"},
            {"stationcode": 880, "fueltype": "P95", "price": 155.1, "priceunit": "litre", "lastupdated": "2018-06-02 00:46:31"},
            // station 999 is not in the station list; the join drops it
            {"stationcode": 999, "fueltype": "P95", "price": 149.0, "priceunit": "litre", "lastupdated": "2018-06-02 00:46:31"},
        ],
    })
}
