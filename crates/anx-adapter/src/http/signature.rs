/*
[INPUT]:  Versioned request path, nonce, endpoint parameters, API secret
[OUTPUT]: Signed request body and Rest-Key/Rest-Sign headers
[POS]:    HTTP layer - request signing for authenticated endpoints
[UPDATE]: When changing signing algorithm or header format
*/

use std::fmt;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use serde::Serialize;
use serde_json::Value;
use sha2::Sha512;

use crate::http::{AnxError, Result};

type HmacSha512 = Hmac<Sha512>;

pub const HEADER_REST_KEY: &str = "Rest-Key";
pub const HEADER_REST_SIGN: &str = "Rest-Sign";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
const CONTENT_TYPE_JSON: &str = "application/json";

/// API key plus raw secret bytes used as the MAC key
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub key: String,
    pub secret: Vec<u8>,
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Build credentials from the base64 secret the exchange hands out
    pub fn from_base64(key: impl Into<String>, secret: &str) -> Result<Self> {
        let secret = BASE64
            .decode(secret.trim())
            .map_err(|e| AnxError::Encoding(format!("API secret is not valid base64: {e}")))?;
        Ok(Self::new(key, secret))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// A fully signed request, consumed by the transport and then discarded
#[derive(Debug, Clone, PartialEq)]
pub struct SignedRequest {
    pub path: String,
    pub body: Vec<u8>,
    pub signature: String,
    pub headers: Vec<(&'static str, String)>,
}

/// Signs request bodies for authenticated endpoints. Performs no I/O.
#[derive(Debug, Clone, Default)]
pub struct RequestSigner {
    credentials: Option<Credentials>,
}

impl RequestSigner {
    pub fn new(credentials: Option<Credentials>) -> Self {
        Self { credentials }
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Sign a request for an authenticated endpoint
    ///
    /// Body: `params` serialized as a JSON object with `nonce` merged in.
    /// MAC input: `{path}\0{body}`, HMAC-SHA512 keyed with the secret.
    pub fn sign<P>(&self, path: &str, nonce: u64, params: &P) -> Result<SignedRequest>
    where
        P: Serialize + ?Sized,
    {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(AnxError::CredentialsMissing)?;

        let body = canonical_payload(nonce, params)?;
        let signature = compute_signature(&credentials.secret, path, &body)?;

        let headers = vec![
            (HEADER_REST_KEY, credentials.key.clone()),
            (HEADER_REST_SIGN, signature.clone()),
            (HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON.to_string()),
        ];

        Ok(SignedRequest {
            path: path.to_string(),
            body,
            signature,
            headers,
        })
    }
}

/// Merge `nonce` into the endpoint parameters and serialize.
///
/// `serde_json::Map` keeps keys sorted, so equal inputs give equal bytes.
pub fn canonical_payload<P>(nonce: u64, params: &P) -> Result<Vec<u8>>
where
    P: Serialize + ?Sized,
{
    let mut object = match serde_json::to_value(params)? {
        Value::Object(map) => map,
        Value::Null => serde_json::Map::new(),
        other => {
            return Err(AnxError::Encoding(format!(
                "request parameters must serialize to a JSON object, got {other}"
            )));
        }
    };
    object.insert("nonce".to_string(), Value::String(nonce.to_string()));
    Ok(serde_json::to_vec(&object)?)
}

/// Base64 HMAC-SHA512 over `path`, a NUL byte, then `body`
pub fn compute_signature(secret: &[u8], path: &str, body: &[u8]) -> Result<String> {
    let mut mac = HmacSha512::new_from_slice(secret)
        .map_err(|e| AnxError::Config(format!("unusable API secret: {e}")))?;
    mac.update(path.as_bytes());
    mac.update(&[0u8]);
    mac.update(body);
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}
