/*
[INPUT]:  Currency pairs
[OUTPUT]: Ticker and order book snapshots
[POS]:    HTTP layer - public market data endpoints (no auth required)
[UPDATE]: When adding new public endpoints or changing response format
*/

use crate::http::{AnxClient, Result};
use crate::types::{CurrencyPair, DepthResponse, OrderBook, Ticker, TickerResponse, millis_to_datetime};

impl AnxClient {
    /// Query ticker for a pair
    ///
    /// GET /api/{version}/{PAIR}/ticker
    pub async fn query_ticker(&self, pair: &CurrencyPair) -> Result<Ticker> {
        let endpoint = format!("{}/ticker", pair.native());
        let envelope = self.get_public::<TickerResponse>(&endpoint).await?;
        let ticker = envelope.payload.ticker;

        Ok(Ticker {
            pair: pair.clone(),
            bid: ticker.bid,
            ask: ticker.ask,
            last: ticker.last,
            high: ticker.high,
            low: ticker.low,
            volume: ticker.vol,
            updated_at: envelope.timestamp.and_then(millis_to_datetime),
        })
    }

    /// Query full order book depth for a pair
    ///
    /// GET /api/{version}/{PAIR}/depth
    pub async fn query_depth(&self, pair: &CurrencyPair) -> Result<OrderBook> {
        let endpoint = format!("{}/depth", pair.native());
        let envelope = self.get_public::<DepthResponse>(&endpoint).await?;
        let depth = envelope.payload.depth;

        Ok(OrderBook::new(
            pair.clone(),
            depth.asks,
            depth.bids,
            envelope.timestamp.and_then(millis_to_datetime),
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{AnxClient, AnxError, ClientConfig};
    use crate::types::{CurrencyPair, OrderBookLevel};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_query_ticker() {
        let server = MockServer::start().await;
        let mock_response = r#"{
            "resultCode": "OK",
            "timestamp": "1700000000000",
            "ticker": {
                "bid": "9990.1",
                "ask": "10010.2",
                "last": "10000",
                "high": "10500",
                "low": "9500",
                "vol": "12.5"
            }
        }"#;

        let _mock = Mock::given(method("GET"))
            .and(path("/api/3/BTCUSD/ticker"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(mock_response, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = AnxClient::with_config(ClientConfig::with_base_url(server.uri()))
            .expect("client init");

        let ticker = client
            .query_ticker(&CurrencyPair::new("BTC", "USD"))
            .await
            .expect("query_ticker failed");

        assert_eq!(ticker.bid, dec!(9990.1));
        assert_eq!(ticker.ask, dec!(10010.2));
        assert_eq!(ticker.volume, dec!(12.5));
        assert_eq!(
            ticker.updated_at.map(|t| t.timestamp_millis()),
            Some(1_700_000_000_000)
        );
    }

    #[tokio::test]
    async fn test_query_ticker_new_pair_without_trades() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path("/api/3/ETHHKD/ticker"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "resultCode": "OK",
                "timestamp": 1_700_000_000_000i64,
                "ticker": {"bid": "20000", "ask": "20100"}
            })))
            .mount(&server)
            .await;

        let client = AnxClient::with_config(ClientConfig::with_base_url(server.uri()))
            .expect("client init");

        let ticker = client
            .query_ticker(&CurrencyPair::new("ETH", "HKD"))
            .await
            .expect("query_ticker failed");

        assert_eq!(ticker.last, Decimal::ZERO);
        assert_eq!(ticker.high, Decimal::ZERO);
        assert_eq!(ticker.volume, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_query_depth_sorted() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path("/api/3/BTCUSD/depth"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "resultCode": "OK",
                "timestamp": "1700000000000",
                "depth": {
                    "asks": [{"price": "101.0", "amount": "2.0"}, {"price": "100.5", "amount": "1.2"}],
                    "bids": [{"price": "99.0", "amount": "3.0"}, {"price": "99.5", "amount": ""}]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AnxClient::with_config(ClientConfig::with_base_url(server.uri()))
            .expect("client init");

        let book = client
            .query_depth(&CurrencyPair::new("BTC", "USD"))
            .await
            .expect("query_depth failed");

        assert_eq!(
            book.asks,
            vec![
                OrderBookLevel { price: dec!(100.5), amount: dec!(1.2) },
                OrderBookLevel { price: dec!(101.0), amount: dec!(2.0) },
            ]
        );
        assert_eq!(
            book.bids,
            vec![
                OrderBookLevel { price: dec!(99.5), amount: Decimal::ZERO },
                OrderBookLevel { price: dec!(99.0), amount: dec!(3.0) },
            ]
        );
    }

    #[tokio::test]
    async fn test_public_call_rejected_code() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path("/api/3/XXXUSD/ticker"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "resultCode": "UNKNOWN_CURRENCY_PAIR",
                "timestamp": "1700000000000"
            })))
            .mount(&server)
            .await;

        let client = AnxClient::with_config(ClientConfig::with_base_url(server.uri()))
            .expect("client init");

        let err = client
            .query_ticker(&CurrencyPair::new("XXX", "USD"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AnxError::RemoteRejected { ref code } if code == "UNKNOWN_CURRENCY_PAIR"
        ));
    }
}
