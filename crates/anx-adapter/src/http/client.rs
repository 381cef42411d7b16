/*
[INPUT]:  HTTP configuration (base URL, API version, timeouts, credentials)
[OUTPUT]: Configured client that signs, sends and decodes API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::http::envelope::{ResultEnvelope, decode_body};
use crate::http::{
    AnxError, Credentials, HttpRequest, NonceSource, RawResponse, ReqwestTransport,
    RequestSigner, Result, Transport,
};

/// Base URL for the ANX REST API
const DEFAULT_BASE_URL: &str = "https://anxpro.com/";
const DEFAULT_API_VERSION: &str = "3";

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_version: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// Default configuration pointed at another host (mock servers, sandboxes)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if self.api_version.trim().is_empty() {
            return Err(AnxError::Config("api_version must not be empty".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(AnxError::Config("timeout must be positive".to_string()));
        }
        Ok(())
    }
}

/// Main HTTP client for the ANX API
#[derive(Debug)]
pub struct AnxClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    signer: RequestSigner,
    nonce: NonceSource,
}

impl AnxClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client over an injected transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            signer: RequestSigner::default(),
            nonce: NonceSource::new(),
        }
    }

    /// Attach credentials for authenticated requests.
    ///
    /// Credentials are fixed for the lifetime of the client; a new key
    /// needs a new client (and with it a fresh nonce sequence).
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.signer = RequestSigner::new(Some(credentials));
        self
    }

    /// Get credentials if set
    pub fn credentials(&self) -> Option<&Credentials> {
        self.signer.credentials()
    }

    pub fn has_credentials(&self) -> bool {
        self.signer.has_credentials()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Versioned request path, e.g. `api/3/order/new`
    pub fn endpoint_path(&self, endpoint: &str) -> String {
        format!(
            "api/{}/{}",
            self.config.api_version.trim(),
            endpoint.trim_start_matches('/')
        )
    }

    /// Unauthenticated GET against a versioned path
    pub(crate) async fn get_public<T>(&self, endpoint: &str) -> Result<ResultEnvelope<T>>
    where
        T: DeserializeOwned,
    {
        let request = HttpRequest {
            method: Method::GET,
            path: self.endpoint_path(endpoint),
            headers: Vec::new(),
            body: None,
        };
        let response = self.transport.send(request).await?;
        decode_response(response)
    }

    /// Signed POST against a versioned path.
    ///
    /// Fails with `CredentialsMissing` before anything is sent.
    pub(crate) async fn post_signed<P, T>(&self, endpoint: &str, params: &P) -> Result<ResultEnvelope<T>>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        if !self.signer.has_credentials() {
            return Err(AnxError::CredentialsMissing);
        }

        let path = self.endpoint_path(endpoint);
        let signed = self.signer.sign(&path, self.nonce.next(), params)?;
        let request = HttpRequest {
            method: Method::POST,
            path: signed.path,
            headers: signed.headers,
            body: Some(signed.body),
        };
        let response = self.transport.send(request).await?;
        decode_response(response)
    }
}

fn decode_response<T: DeserializeOwned>(response: RawResponse) -> Result<ResultEnvelope<T>> {
    if response.is_success() {
        return decode_body(&response.body);
    }

    match decode_body(&response.body) {
        Err(AnxError::RemoteRejected { code }) if !code.is_empty() => {
            Err(AnxError::RemoteRejected { code })
        }
        Ok(envelope) => Ok(envelope),
        Err(_) => Err(AnxError::HttpStatus {
            status: response.status,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        }),
    }
}
