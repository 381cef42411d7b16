/*
[INPUT]:  Method, versioned path, headers and body bytes
[OUTPUT]: Raw status + body, or a transport error
[POS]:    HTTP layer - the only code that touches the network
[UPDATE]: When changing connection options or swapping the HTTP stack
*/

use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use tracing::debug;

use crate::http::{ClientConfig, Result};

/// Outbound request handed to a transport
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Vec<u8>>,
}

/// Undecoded response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Send a request and return the raw response.
///
/// Timeouts and cancellation belong to the implementation and surface as
/// `AnxError::Transport`. Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse>;
}

/// reqwest-backed transport rooted at a base URL
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: Client,
    base_url: Url,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        // Url::join drops the last segment of a base without a trailing slash
        let mut base_url = Url::parse(&config.base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse> {
        let url = self.base_url.join(&request.path)?;
        debug!(method = %request.method, url = %url, "dispatching request");

        let mut builder = self.http_client.request(request.method, url);
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse { status, body })
    }
}
