/*
[INPUT]:  Currency pairs + shared client
[OUTPUT]: Cached ticker / order book snapshots, refreshed on miss or on demand
[POS]:    Market data layer - cache-aside in front of the public endpoints
[UPDATE]: When changing cache keys, store backends or refresh policy
*/

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::http::{AnxClient, Result};
use crate::types::{AssetClass, CurrencyPair, OrderBook, Ticker};

/// Exchange identifier used in cache keys
pub const EXCHANGE_ID: &str = "anx";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub exchange: &'static str,
    pub pair: CurrencyPair,
    pub asset_class: AssetClass,
}

impl CacheKey {
    pub fn spot(pair: &CurrencyPair) -> Self {
        Self {
            exchange: EXCHANGE_ID,
            pair: pair.clone(),
            asset_class: AssetClass::Spot,
        }
    }
}

/// Backing store for cached snapshots.
///
/// Must tolerate concurrent reads and concurrent writes to distinct keys.
pub trait CacheStore<V>: Send + Sync + Debug {
    fn get(&self, key: &CacheKey) -> Option<V>;
    fn put(&self, key: CacheKey, value: V);
    fn remove(&self, key: &CacheKey) -> Option<V>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Thread-safe in-memory store
#[derive(Debug)]
pub struct InMemoryStore<V> {
    entries: RwLock<HashMap<CacheKey, V>>,
}

impl<V> InMemoryStore<V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<V> Default for InMemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> CacheStore<V> for InMemoryStore<V>
where
    V: Clone + Send + Sync + Debug,
{
    fn get(&self, key: &CacheKey) -> Option<V> {
        let guard = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        guard.get(key).cloned()
    }

    fn put(&self, key: CacheKey, value: V) {
        let mut guard = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        guard.insert(key, value);
    }

    fn remove(&self, key: &CacheKey) -> Option<V> {
        let mut guard = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        guard.remove(key)
    }

    fn len(&self) -> usize {
        let guard = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        guard.len()
    }
}

/// Cache-aside wrapper around the ticker and depth endpoints.
///
/// Entries never expire on their own; `refresh`, `refresh_ticker` and
/// `refresh_order_book` are the only ways to replace a cached snapshot.
/// Concurrent misses on one key may both fetch, and the last write wins.
#[derive(Debug, Clone)]
pub struct MarketDataCache {
    client: Arc<AnxClient>,
    tickers: Arc<dyn CacheStore<Ticker>>,
    books: Arc<dyn CacheStore<OrderBook>>,
}

impl MarketDataCache {
    pub fn new(client: Arc<AnxClient>) -> Self {
        Self::with_stores(
            client,
            Arc::new(InMemoryStore::<Ticker>::new()),
            Arc::new(InMemoryStore::<OrderBook>::new()),
        )
    }

    pub fn with_stores(
        client: Arc<AnxClient>,
        tickers: Arc<dyn CacheStore<Ticker>>,
        books: Arc<dyn CacheStore<OrderBook>>,
    ) -> Self {
        Self {
            client,
            tickers,
            books,
        }
    }

    /// Cached ticker, fetched only on miss
    pub async fn get_ticker(&self, pair: &CurrencyPair) -> Result<Ticker> {
        if let Some(ticker) = self.tickers.get(&CacheKey::spot(pair)) {
            debug!(pair = %pair, "ticker cache hit");
            return Ok(ticker);
        }
        debug!(pair = %pair, "ticker cache miss");
        self.refresh_ticker(pair).await
    }

    /// Cached order book, fetched only on miss
    pub async fn get_order_book(&self, pair: &CurrencyPair) -> Result<OrderBook> {
        if let Some(book) = self.books.get(&CacheKey::spot(pair)) {
            debug!(pair = %pair, "order book cache hit");
            return Ok(book);
        }
        debug!(pair = %pair, "order book cache miss");
        self.refresh_order_book(pair).await
    }

    /// Fetch the ticker unconditionally and overwrite the cache entry
    pub async fn refresh_ticker(&self, pair: &CurrencyPair) -> Result<Ticker> {
        let ticker = self.client.query_ticker(pair).await?;
        self.tickers.put(CacheKey::spot(pair), ticker.clone());
        debug!(pair = %pair, "ticker cache refreshed");
        Ok(ticker)
    }

    /// Fetch the order book unconditionally and overwrite the cache entry
    pub async fn refresh_order_book(&self, pair: &CurrencyPair) -> Result<OrderBook> {
        let book = self.client.query_depth(pair).await?;
        self.books.put(CacheKey::spot(pair), book.clone());
        debug!(pair = %pair, "order book cache refreshed");
        Ok(book)
    }

    /// Refresh the ticker entry for a pair with exactly one fetch.
    ///
    /// A failed fetch leaves the previous entry in place. The order book is
    /// refreshed separately through `refresh_order_book`.
    pub async fn refresh(&self, pair: &CurrencyPair) -> Result<Ticker> {
        self.refresh_ticker(pair).await
    }

    /// Drop cached entries for a pair
    pub fn invalidate(&self, pair: &CurrencyPair) {
        let key = CacheKey::spot(pair);
        self.tickers.remove(&key);
        self.books.remove(&key);
    }

    /// Cached ticker without touching the network
    pub fn peek_ticker(&self, pair: &CurrencyPair) -> Option<Ticker> {
        self.tickers.get(&CacheKey::spot(pair))
    }
}
