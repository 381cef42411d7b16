/*
[INPUT]:  Order requests with signed bodies
[OUTPUT]: Order ids, cancel errors and exchange-native order records
[POS]:    HTTP layer - trading endpoints (require Rest-Key + Rest-Sign)
[UPDATE]: When adding new trading endpoints or changing order flow
*/

use crate::http::{AnxClient, AnxError, Result};
use crate::types::{
    CancelOrdersRequest, CancelOrdersResponse, ListOrdersRequest, NewOrderRequest,
    NewOrderResponse, OrderInfoRequest, OrderInfoResponse, OrderListResponse, OrderRecord,
};

impl AnxClient {
    /// Create a new order, optionally replacing an existing one
    ///
    /// POST /api/{version}/order/new
    pub async fn new_order(&self, req: &NewOrderRequest) -> Result<String> {
        let envelope = self
            .post_signed::<_, NewOrderResponse>("order/new", req)
            .await?;
        Ok(envelope.payload.order_id)
    }

    /// Cancel a batch of orders
    ///
    /// POST /api/{version}/order/cancel
    /// Per-order failures come back in `errors`; the call itself is still OK.
    pub async fn cancel_orders(&self, order_ids: &[String]) -> Result<CancelOrdersResponse> {
        let req = CancelOrdersRequest {
            order_ids: order_ids.to_vec(),
        };
        let envelope = self
            .post_signed::<_, CancelOrdersResponse>("order/cancel", &req)
            .await?;
        Ok(envelope.payload)
    }

    /// List orders, optionally restricted to active ones
    ///
    /// POST /api/{version}/order/list
    pub async fn list_orders(&self, active_only: bool) -> Result<Vec<OrderRecord>> {
        let req = ListOrdersRequest { active_only };
        let envelope = self
            .post_signed::<_, OrderListResponse>("order/list", &req)
            .await?;
        Ok(envelope.payload.orders)
    }

    /// Fetch a single order
    ///
    /// POST /api/{version}/order/info
    /// A non-OK result code is reported as `NotFound`.
    pub async fn order_info(&self, order_id: &str) -> Result<OrderRecord> {
        let req = OrderInfoRequest {
            order_id: order_id.to_string(),
        };
        match self
            .post_signed::<_, OrderInfoResponse>("order/info", &req)
            .await
        {
            Ok(envelope) => Ok(envelope.payload.order),
            Err(AnxError::RemoteRejected { code }) => Err(AnxError::NotFound {
                order_id: order_id.to_string(),
                code,
            }),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{AnxClient, AnxError, ClientConfig, Credentials};
    use crate::types::{NewOrderRequest, Order, OrderStatus};
    use rust_decimal_macros::dec;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> AnxClient {
        AnxClient::with_config(ClientConfig::with_base_url(server.uri()))
            .expect("client init")
            .with_credentials(Credentials::new("test-key", b"test-secret".to_vec()))
    }

    #[tokio::test]
    async fn test_new_order_signed_post() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/api/3/order/new"))
            .and(header("Rest-Key", "test-key"))
            .and(header_exists("Rest-Sign"))
            .and(header("Content-Type", "application/json"))
            .and(body_partial_json(json!({
                "order": {"orderType": "LIMIT", "buyTradedCurrency": true, "tradedCurrencyAmount": "0.5"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resultCode": "OK",
                "timestamp": "1700000000000",
                "orderId": "order-1"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let order = Order::limit_buy("BTC", "USD", dec!(0.5), dec!(10000));
        let order_id = client(&server)
            .new_order(&NewOrderRequest::from(&order))
            .await
            .expect("new_order failed");

        assert_eq!(order_id, "order-1");

        let received = server.received_requests().await.expect("recorded requests");
        let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
        let nonce = body["nonce"].as_str().expect("nonce is a string");
        assert_eq!(nonce.len(), 13);
    }

    #[tokio::test]
    async fn test_order_info_maps_rejection_to_not_found() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/api/3/order/info"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resultCode": "ORDER_NOT_FOUND",
                "timestamp": "1700000000000"
            })))
            .mount(&server)
            .await;

        let err = client(&server).order_info("missing").await.unwrap_err();
        match err {
            AnxError::NotFound { order_id, code } => {
                assert_eq!(order_id, "missing");
                assert_eq!(code, "ORDER_NOT_FOUND");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_orders() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/api/3/order/list"))
            .and(body_partial_json(json!({"activeOnly": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resultCode": "OK",
                "timestamp": "1700000000000",
                "orders": [{
                    "orderId": "o-1",
                    "status": "FULL_FILL",
                    "orderType": "LIMIT",
                    "buyTradedCurrency": false,
                    "tradedCurrency": "BTC",
                    "tradedCurrencyAmount": "1",
                    "tradedCurrencyAmountOutstanding": "0",
                    "settlementCurrency": "HKD",
                    "settlementCurrencyAmount": "80000",
                    "settlementCurrencyAmountOutstanding": "0",
                    "executedAverageRate": "80000",
                    "timestamp": 1_700_000_000_000i64
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let orders = client(&server).list_orders(false).await.expect("list_orders");
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].status, OrderStatus::Filled);
        assert_eq!(orders[0].settlement_currency, "HKD");
    }

    #[tokio::test]
    async fn test_signed_call_without_credentials_sends_nothing() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = AnxClient::with_config(ClientConfig::with_base_url(server.uri()))
            .expect("client init");
        let err = client.list_orders(true).await.unwrap_err();
        assert!(matches!(err, AnxError::CredentialsMissing));
    }
}
