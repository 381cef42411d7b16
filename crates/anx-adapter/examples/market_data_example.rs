/*
[INPUT]:  Currency pair (e.g., BTC/USD)
[OUTPUT]: Ticker and order book snapshots, cached
[POS]:    Examples - public market data through the cache
[UPDATE]: When adding new market data endpoints
*/

use std::sync::Arc;

use anx_adapter::*;

/// Example: query market data (no credentials required)
#[tokio::main]
async fn main() {
    println!("=== ANX Market Data Example ===\n");

    let client = match AnxClient::new() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    let cache = MarketDataCache::new(client);
    let pair = CurrencyPair::new("BTC", "USD");

    println!("Querying ticker for {}...", pair);
    match cache.get_ticker(&pair).await {
        Ok(ticker) => println!("✓ Ticker: last={} bid={} ask={}", ticker.last, ticker.bid, ticker.ask),
        Err(e) => println!("✗ Error: {}", e),
    }

    // Served from the cache this time
    if let Some(ticker) = cache.peek_ticker(&pair) {
        println!("✓ Cached ticker still available: last={}", ticker.last);
    }

    println!("\nQuerying depth for {}...", pair);
    match cache.get_order_book(&pair).await {
        Ok(book) => println!(
            "✓ Depth: {} asks, {} bids, best ask {:?}",
            book.asks.len(),
            book.bids.len(),
            book.best_ask().map(|l| l.price)
        ),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nForcing refresh...");
    match cache.refresh(&pair).await {
        Ok(ticker) => println!("✓ Ticker refreshed: last={}", ticker.last),
        Err(e) => println!("✗ Error: {}", e),
    }
    match cache.refresh_order_book(&pair).await {
        Ok(book) => println!("✓ Depth refreshed: best bid {:?}", book.best_bid().map(|l| l.price)),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Market data example complete");
}
