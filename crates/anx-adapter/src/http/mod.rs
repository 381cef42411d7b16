/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod account;
pub mod client;
pub mod envelope;
pub mod error;
pub mod nonce;
pub mod public;
pub mod signature;
pub mod trade;
pub mod transport;

pub use error::{AnxError, BoxError, Result};
pub use envelope::{ResultCode, ResultEnvelope};
pub use nonce::NonceSource;
pub use signature::{Credentials, RequestSigner, SignedRequest};
pub use transport::{HttpRequest, RawResponse, ReqwestTransport, Transport};

pub use client::{AnxClient, ClientConfig};
