/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public ANX adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod adapter;
pub mod fee;
pub mod http;
pub mod market_data;
pub mod types;

// Re-export commonly used types from adapter
pub use adapter::{AccountAdapter, AnxExchange, CancelFailures, OrderAdapter, WITHDRAW_RIGHT};

// Re-export commonly used types from http
pub use http::{
    AnxClient,
    AnxError,
    BoxError,
    ClientConfig,
    Credentials,
    HttpRequest,
    NonceSource,
    RawResponse,
    RequestSigner,
    Result,
    ResultEnvelope,
    SignedRequest,
    Transport,
};

pub use fee::{FeeRequest, compute_fee};
pub use market_data::{CacheKey, CacheStore, InMemoryStore, MarketDataCache};

// Re-export all types
pub use types::*;
