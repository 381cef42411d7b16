/*
[INPUT]:  Configured AnxClient
[OUTPUT]: Order, account and market data adapters sharing one client
[POS]:    Adapter layer - uniform operations for the trading engine
[UPDATE]: When adding adapters or changing how they share state
*/

pub mod account;
pub mod order;

use std::sync::Arc;

pub use account::{AccountAdapter, WITHDRAW_RIGHT};
pub use order::{CancelFailures, OrderAdapter};

use crate::http::AnxClient;
use crate::market_data::MarketDataCache;

/// All adapters for one credential set.
///
/// The adapters share a single client, and with it a single nonce
/// sequence. The market data cache lives and dies with this value.
#[derive(Debug, Clone)]
pub struct AnxExchange {
    client: Arc<AnxClient>,
    orders: OrderAdapter,
    account: AccountAdapter,
    market_data: MarketDataCache,
}

impl AnxExchange {
    pub fn new(client: AnxClient) -> Self {
        let client = Arc::new(client);
        Self::with_market_data(Arc::clone(&client), MarketDataCache::new(client))
    }

    /// Build around a caller-supplied cache (e.g. one with a custom store)
    pub fn with_market_data(client: Arc<AnxClient>, market_data: MarketDataCache) -> Self {
        Self {
            orders: OrderAdapter::new(Arc::clone(&client)),
            account: AccountAdapter::new(Arc::clone(&client)),
            market_data,
            client,
        }
    }

    pub fn client(&self) -> &AnxClient {
        &self.client
    }

    pub fn orders(&self) -> &OrderAdapter {
        &self.orders
    }

    pub fn account(&self) -> &AccountAdapter {
        &self.account
    }

    pub fn market_data(&self) -> &MarketDataCache {
        &self.market_data
    }
}
