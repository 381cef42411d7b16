/*
[INPUT]:  Generic orders, order ids, active-only flag
[OUTPUT]: Order ids, per-id cancel failures, order snapshots
[POS]:    Adapter layer - order operations exposed to the trading engine
[UPDATE]: When order validation or the generic order model changes
*/

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::fee::{FeeRequest, compute_fee};
use crate::http::{AnxClient, AnxError, Result};
use crate::types::{LimitOrderSnapshot, NewOrderRequest, Order, OrderRecord};

/// Order id -> exchange error code, for the ids that failed to cancel
pub type CancelFailures = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct OrderAdapter {
    client: Arc<AnxClient>,
}

impl OrderAdapter {
    pub fn new(client: Arc<AnxClient>) -> Self {
        Self { client }
    }

    /// Submit (or cancel-and-replace) an order and return its id.
    ///
    /// The "only if still active" replace condition is checked by the
    /// exchange, not here.
    pub async fn submit(&self, order: &Order) -> Result<String> {
        order.validate()?;
        self.client.new_order(&NewOrderRequest::from(order)).await
    }

    /// Cancel a set of orders.
    ///
    /// Ids missing from the returned map were cancelled. An empty set is a
    /// no-op and sends nothing.
    pub async fn cancel(&self, order_ids: &[String]) -> Result<CancelFailures> {
        let unique: BTreeSet<&String> = order_ids.iter().collect();
        if unique.is_empty() {
            return Ok(CancelFailures::new());
        }
        let ids: Vec<String> = unique.into_iter().cloned().collect();

        let response = self.client.cancel_orders(&ids).await?;
        Ok(response
            .errors
            .into_iter()
            .map(|e| (e.order_id, e.error_code))
            .collect())
    }

    /// Cancel one order; `Ok(false)` if the exchange refused
    pub async fn cancel_one(&self, order_id: &str) -> Result<bool> {
        let failures = self.cancel(&[order_id.to_string()]).await?;
        Ok(!failures.contains_key(order_id))
    }

    /// Every order the exchange returns for the flag; no pagination
    pub async fn list(&self, active_only: bool) -> Result<Vec<OrderRecord>> {
        self.client.list_orders(active_only).await
    }

    pub async fn list_snapshots(&self, active_only: bool) -> Result<Vec<LimitOrderSnapshot>> {
        let records = self.list(active_only).await?;
        Ok(records.iter().map(LimitOrderSnapshot::from).collect())
    }

    /// Fresh exchange-native snapshot; `NotFound` on a non-OK result code
    pub async fn get_info(&self, order_id: &str) -> Result<OrderRecord> {
        self.client.order_info(order_id).await
    }

    pub async fn get_order(&self, order_id: &str) -> Result<LimitOrderSnapshot> {
        let record = self.get_info(order_id).await?;
        Ok(LimitOrderSnapshot::from(&record))
    }

    /// The exchange exposes no trade history endpoint
    pub async fn trade_history(&self) -> Result<Vec<LimitOrderSnapshot>> {
        Err(AnxError::NotYetImplemented("trade history"))
    }

    /// Fee estimate for a prospective trade.
    ///
    /// Without credentials the maker/taker tier cannot be confirmed, so the
    /// offline worst-case rate applies.
    pub fn estimate_trade_fee(&self, amount: Decimal, price: Decimal, is_maker: bool) -> Decimal {
        let req = if self.client.has_credentials() {
            FeeRequest::trade(amount, price, is_maker)
        } else {
            FeeRequest::offline_trade(amount, price)
        };
        compute_fee(&req)
    }
}
