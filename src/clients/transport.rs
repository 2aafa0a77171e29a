//! The transport seam.
//!
//! The client never opens sockets itself. It hands each [`HttpRequest`] to a
//! [`Transport`] together with the timeout budget for that call, and gets back
//! either a raw [`HttpResponse`] or a [`TransportError`]. [`ReqwestTransport`]
//! is the default implementation.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::clients::errors::TransportError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::config::NetworkConfig;
use crate::error::ConfigError;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sends requests on behalf of a [`NetworkClient`](crate::NetworkClient).
///
/// `timeout` applies to the single call it is passed with. Implementations
/// must not let one call's budget leak into another concurrent call.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request`, including its body if it has one.
    async fn send(
        &self,
        request: HttpRequest,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError>;

    /// Uploads a body prepared ahead of time.
    ///
    /// `body` replaces whatever body `request` carries. The default
    /// implementation forwards to [`send`](Self::send).
    async fn upload(
        &self,
        mut request: HttpRequest,
        body: Vec<u8>,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        request.body = Some(body);
        self.send(request, timeout).await
    }
}

/// [`Transport`] backed by a shared `reqwest` client using rustls.
///
/// Per-call budgets are applied with `reqwest::RequestBuilder::timeout`, so
/// the shared client is never reconfigured.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport from the client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Transport`] if the underlying reqwest client
    /// cannot be created (e.g. TLS initialization failure).
    pub fn new(config: &NetworkConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .connect_timeout(config.connect_timeout())
            .user_agent(Self::user_agent(config))
            .build()
            .map_err(|e| ConfigError::Transport {
                reason: e.to_string(),
            })?;

        Ok(Self { client })
    }

    /// Wraps an existing reqwest client.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Builds the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(config: &NetworkConfig) -> String {
        let prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        format!("{prefix}networking-core v{SDK_VERSION} | Rust {rust_version}")
    }

    async fn execute(
        &self,
        request: HttpRequest,
        body: Option<Vec<u8>>,
        timeout: Duration,
    ) -> Result<HttpResponse, reqwest::Error> {
        let mut req_builder = self
            .client
            .request(request.method.into(), request.url)
            .timeout(timeout);

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = body {
            req_builder = req_builder.body(body);
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.bytes().await?.to_vec();

        Ok(HttpResponse::new(code, headers, body))
    }

    /// Parses response headers into a `HashMap` keyed by lowercase name.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        mut request: HttpRequest,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        let body = request.body.take();
        Ok(self.execute(request, body, timeout).await?)
    }

    async fn upload(
        &self,
        mut request: HttpRequest,
        body: Vec<u8>,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        request.body = None;
        Ok(self.execute(request, Some(body), timeout).await?)
    }
}
