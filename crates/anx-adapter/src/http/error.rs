/*
[INPUT]:  Error sources (transport, result codes, serialization, local validation)
[OUTPUT]: Typed error taxonomy returned by every public operation
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use thiserror::Error;

/// Opaque failure raised by a `Transport` implementation
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for the ANX adapter
#[derive(Error, Debug)]
pub enum AnxError {
    /// No key/secret configured; raised before any network activity
    #[error("API credentials are not configured")]
    CredentialsMissing,

    /// Payload could not be serialized or deserialized
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Network or timeout failure reported by the transport
    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),

    /// Non-success HTTP status without a decodable result envelope
    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The exchange answered with a result code other than OK
    #[error("Request rejected by exchange (resultCode {code})")]
    RemoteRejected { code: String },

    /// Order lookup answered with a non-OK result code
    #[error("Order {order_id} not found (resultCode {code})")]
    NotFound { order_id: String, code: String },

    /// Operation the exchange does not expose
    #[error("Not yet implemented: {0}")]
    NotYetImplemented(&'static str),

    /// Locally detected malformed request
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnxError {
    /// Whether a caller-side retry could plausibly succeed.
    ///
    /// The adapter itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            AnxError::Transport(_) => true,
            AnxError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Check if error indicates missing or refused credentials
    pub fn is_auth_error(&self) -> bool {
        match self {
            AnxError::CredentialsMissing => true,
            AnxError::HttpStatus { status, .. } => *status == 401 || *status == 403,
            AnxError::RemoteRejected { code } => {
                let code = code.to_ascii_uppercase();
                code.contains("AUTH") || code.contains("NONCE") || code.contains("PERMISSION")
            }
            _ => false,
        }
    }

    /// Result code carried by a remote rejection, if any
    pub fn remote_code(&self) -> Option<&str> {
        match self {
            AnxError::RemoteRejected { code } | AnxError::NotFound { code, .. } => Some(code),
            _ => None,
        }
    }
}

impl AnxError {
    /// Wrap any transport-level failure (I/O, timeout, TLS)
    pub fn transport(err: impl Into<BoxError>) -> Self {
        AnxError::Transport(err.into())
    }
}

impl From<reqwest::Error> for AnxError {
    fn from(err: reqwest::Error) -> Self {
        AnxError::Transport(Box::new(err))
    }
}

impl From<serde_json::Error> for AnxError {
    fn from(err: serde_json::Error) -> Self {
        AnxError::Encoding(err.to_string())
    }
}

impl From<url::ParseError> for AnxError {
    fn from(err: url::ParseError) -> Self {
        AnxError::Config(format!("invalid URL: {err}"))
    }
}

/// Result type alias for ANX operations
pub type Result<T> = std::result::Result<T, AnxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        let throttled = AnxError::HttpStatus {
            status: 429,
            body: String::new(),
        };
        assert!(throttled.is_retryable());

        let rejected = AnxError::RemoteRejected {
            code: "INSUFFICIENT_FUNDS".to_string(),
        };
        assert!(!rejected.is_retryable());
        assert!(!AnxError::CredentialsMissing.is_retryable());
    }

    #[test]
    fn test_error_is_auth_error() {
        assert!(AnxError::CredentialsMissing.is_auth_error());
        assert!(
            AnxError::RemoteRejected {
                code: "INVALID_NONCE".to_string()
            }
            .is_auth_error()
        );
        assert!(!AnxError::Validation("x".to_string()).is_auth_error());
    }

    #[test]
    fn test_remote_code() {
        let err = AnxError::NotFound {
            order_id: "abc".to_string(),
            code: "ORDER_NOT_FOUND".to_string(),
        };
        assert_eq!(err.remote_code(), Some("ORDER_NOT_FOUND"));
        assert_eq!(AnxError::CredentialsMissing.remote_code(), None);
    }

    #[test]
    fn test_transport_error_from_any_source() {
        let timeout = std::io::Error::new(std::io::ErrorKind::TimedOut, "read timed out");
        let err = AnxError::transport(timeout);
        assert!(err.is_retryable());
        assert!(err.to_string().contains("read timed out"));
        assert!(std::error::Error::source(&err).is_some());

        let err = AnxError::transport("connection reset");
        assert!(matches!(err, AnxError::Transport(_)));
    }

    #[test]
    fn test_serde_error_maps_to_encoding() {
        let err: AnxError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, AnxError::Encoding(_)));
    }
}
