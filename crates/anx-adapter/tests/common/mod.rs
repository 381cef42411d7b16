/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for anx-adapter tests

use std::sync::Arc;

use anx_adapter::{AnxClient, AnxExchange, ClientConfig, Credentials};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_KEY: &str = "3ff1f3d0-test-key";
pub const TEST_SECRET: &[u8] = b"anx-test-secret";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

#[allow(dead_code)]
pub fn test_credentials() -> Credentials {
    Credentials::new(TEST_KEY, TEST_SECRET.to_vec())
}

/// Client pointed at the mock server, without credentials
#[allow(dead_code)]
pub fn public_client(server: &MockServer) -> AnxClient {
    AnxClient::with_config(ClientConfig::with_base_url(server.uri())).expect("client init")
}

/// Client pointed at the mock server, with test credentials
#[allow(dead_code)]
pub fn signed_client(server: &MockServer) -> AnxClient {
    public_client(server).with_credentials(test_credentials())
}

#[allow(dead_code)]
pub fn signed_exchange(server: &MockServer) -> AnxExchange {
    AnxExchange::new(signed_client(server))
}

#[allow(dead_code)]
pub fn shared_public_client(server: &MockServer) -> Arc<AnxClient> {
    Arc::new(public_client(server))
}

/// Successful envelope merged with endpoint payload fields
#[allow(dead_code)]
pub fn ok_envelope(payload: Value) -> Value {
    let mut body = json!({"resultCode": "OK", "timestamp": "1700000000000"});
    if let (Some(target), Value::Object(fields)) = (body.as_object_mut(), payload) {
        target.extend(fields);
    }
    body
}

#[allow(dead_code)]
pub fn ticker_payload(last: &str) -> Value {
    ok_envelope(json!({
        "ticker": {
            "bid": last,
            "ask": last,
            "last": last,
            "high": last,
            "low": last,
            "vol": "10"
        }
    }))
}

/// Mount a POST mock that must be hit exactly `times` times
#[allow(dead_code)]
pub async fn mount_signed(server: &MockServer, endpoint: &str, body: Value, times: u64) {
    Mock::given(method("POST"))
        .and(path(format!("/api/3/{endpoint}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub fn order_record(order_id: &str, status: &str) -> Value {
    json!({
        "orderId": order_id,
        "status": status,
        "orderType": "LIMIT",
        "buyTradedCurrency": true,
        "tradedCurrency": "BTC",
        "tradedCurrencyAmount": "1",
        "tradedCurrencyAmountOutstanding": "0.4",
        "settlementCurrency": "HKD",
        "settlementCurrencyAmount": "80000",
        "settlementCurrencyAmountOutstanding": "32000",
        "limitPriceInSettlementCurrency": "80000",
        "executedAverageRate": "79950",
        "timestamp": 1_700_000_000_000i64
    })
}
