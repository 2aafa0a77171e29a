//! The public client.
//!
//! [`NetworkClient`] composes the request builder, transport, classifier,
//! retry coordinator and decoder. Every operation follows the same pipeline:
//! build the request, dispatch it, classify the outcome, then decode the body,
//! map the failure, or hand a 401 to the retry coordinator.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clients::classifier::{classify, Disposition};
use crate::clients::content::ContentEntry;
use crate::clients::decoder::decode;
use crate::clients::errors::{HttpError, TransportError};
use crate::clients::http_request::{
    HttpMethod, HttpRequest, CONTENT_LENGTH_HEADER, CONTENT_TYPE_HEADER,
};
use crate::clients::http_response::HttpResponse;
use crate::clients::multipart::{FilePart, MultipartBody, MultipartEncoder};
use crate::clients::request_builder::{RequestBuilder, TokenProvider};
use crate::clients::retry::{AttemptState, AuthFailureNotifier, RetryCoordinator};
use crate::clients::transport::{ReqwestTransport, Transport};
use crate::config::NetworkConfig;
use crate::error::ConfigError;

/// Content type used for every image part.
pub const IMAGE_CONTENT_TYPE: &str = "image/jpg";

/// How a request reaches the transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Dispatch {
    Send,
    Upload,
}

/// HTTP client for a JSON REST API and a multipart upload API.
///
/// The token provider and auth-failure notifier are optional strategy hooks
/// chosen at construction. Without a token provider no `Authorization`
/// header is ever sent; without a notifier a 401 is never retried.
///
/// # Thread Safety
///
/// `NetworkClient` is `Send + Sync`. Calls are independent futures and may
/// run concurrently; the only state they share is the read-only hooks.
///
/// # Example
///
/// ```rust,ignore
/// use networking::NetworkClient;
/// use reqwest::Url;
///
/// let client = NetworkClient::builder()
///     .token_provider(|| token_store.current())
///     .on_unauthorized(|| token_store.refresh_in_background())
///     .build()?;
///
/// let url = Url::parse("https://api.example.com/me")?;
/// let profile: Profile = client.get(url, true).await?;
/// ```
#[derive(Clone)]
pub struct NetworkClient {
    transport: Arc<dyn Transport>,
    request_builder: RequestBuilder,
    retry: RetryCoordinator,
    config: NetworkConfig,
}

// Verify NetworkClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<NetworkClient>();
};

impl fmt::Debug for NetworkClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkClient")
            .field("request_builder", &self.request_builder)
            .field("retry", &self.retry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl NetworkClient {
    /// Creates a client with the default transport and configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Transport`] if the default transport cannot be
    /// created.
    pub fn new<F>(token_provider: F) -> Result<Self, ConfigError>
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self::builder().token_provider(token_provider).build()
    }

    /// Creates a new builder for constructing a `NetworkClient`.
    #[must_use]
    pub fn builder() -> NetworkClientBuilder {
        NetworkClientBuilder::new()
    }

    /// Returns the configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Returns the request builder used by this client.
    #[must_use]
    pub const fn request_builder(&self) -> &RequestBuilder {
        &self.request_builder
    }

    /// Fetches `url` and decodes the JSON body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Transport`], [`HttpError::ServerRejection`] or
    /// [`HttpError::DecodeMismatch`].
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        authenticated: bool,
    ) -> Result<T, HttpError> {
        let request = self.request_builder.build(url, HttpMethod::Get, authenticated);
        self.execute(request, Dispatch::Send, self.config.request_timeout())
            .await
    }

    /// Fetches `url` and returns the raw response without classifying it.
    ///
    /// Non-2xx responses are returned as `Ok`; no retry is attempted.
    ///
    /// # Errors
    ///
    /// Returns the [`TransportError`] if the transport fails.
    pub async fn get_raw(
        &self,
        url: Url,
        authenticated: bool,
    ) -> Result<HttpResponse, TransportError> {
        let request = self.request_builder.build(url, HttpMethod::Get, authenticated);
        self.transport
            .send(request, self.config.request_timeout())
            .await
    }

    /// Posts `payload` as JSON and decodes the response into `T`.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn post<P, T>(&self, url: Url, payload: &P, authenticated: bool) -> Result<T, HttpError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(url, HttpMethod::Post, payload, authenticated)
            .await
    }

    /// Patches with `payload` as JSON and decodes the response into `T`.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn patch<P, T>(
        &self,
        url: Url,
        payload: &P,
        authenticated: bool,
    ) -> Result<T, HttpError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(url, HttpMethod::Patch, payload, authenticated)
            .await
    }

    /// Puts `payload` as JSON and decodes the response into `T`.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn put<P, T>(&self, url: Url, payload: &P, authenticated: bool) -> Result<T, HttpError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(url, HttpMethod::Put, payload, authenticated)
            .await
    }

    /// Sends a caller-built request with its method replaced by `method`.
    ///
    /// URL, headers and body pass through untouched. A retry after 401
    /// re-derives the `Authorization` header.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn perform<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
        method: HttpMethod,
    ) -> Result<T, HttpError> {
        let mut request = request;
        request.method = method;
        self.execute(request, Dispatch::Send, self.config.request_timeout())
            .await
    }

    /// Uploads images as a multipart form with POST.
    ///
    /// `images` pairs each filename with its bytes; every image part is sent
    /// as `image/jpg`. The request is always authenticated and uses the
    /// image upload timeout.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn upload_image<T: DeserializeOwned>(
        &self,
        url: Url,
        fields: &[(String, String)],
        images: Vec<(String, Vec<u8>)>,
    ) -> Result<T, HttpError> {
        self.image_upload(url, HttpMethod::Post, fields, images)
            .await
    }

    /// Same as [`upload_image`](Self::upload_image) but with PATCH.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn patch_signature_image<T: DeserializeOwned>(
        &self,
        url: Url,
        fields: &[(String, String)],
        images: Vec<(String, Vec<u8>)>,
    ) -> Result<T, HttpError> {
        self.image_upload(url, HttpMethod::Patch, fields, images)
            .await
    }

    /// Uploads arbitrary content as a multipart form with POST.
    ///
    /// Each entry is read from its source before anything is sent. The body
    /// is encoded ahead of time, announced with an explicit `Content-Length`,
    /// and handed to [`Transport::upload`] under the content upload timeout.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ContentSource`] if an entry cannot be read, and
    /// otherwise the same errors as [`get`](Self::get).
    pub async fn upload_multipart_content<T: DeserializeOwned>(
        &self,
        url: Url,
        fields: &[(String, String)],
        contents: Vec<ContentEntry>,
    ) -> Result<T, HttpError> {
        let mut files = Vec::with_capacity(contents.len());
        for entry in contents {
            files.push(entry.into_file_part().await?);
        }

        let multipart = MultipartEncoder::encode(&files, fields);
        let length = multipart.len();
        let mut request = self.multipart_request(url, HttpMethod::Post, multipart);
        request.set_header(CONTENT_LENGTH_HEADER, length.to_string());

        self.execute(
            request,
            Dispatch::Upload,
            self.config.content_upload_timeout(),
        )
        .await
    }

    async fn send_json<P, T>(
        &self,
        url: Url,
        method: HttpMethod,
        payload: &P,
        authenticated: bool,
    ) -> Result<T, HttpError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .request_builder
            .build_with_json_body(url, method, authenticated, payload);
        self.execute(request, Dispatch::Send, self.config.request_timeout())
            .await
    }

    async fn image_upload<T: DeserializeOwned>(
        &self,
        url: Url,
        method: HttpMethod,
        fields: &[(String, String)],
        images: Vec<(String, Vec<u8>)>,
    ) -> Result<T, HttpError> {
        let files: Vec<FilePart> = images
            .into_iter()
            .map(|(filename, data)| FilePart::new(filename, IMAGE_CONTENT_TYPE, data))
            .collect();

        let multipart = MultipartEncoder::encode(&files, fields);
        let request = self.multipart_request(url, method, multipart);
        self.execute(request, Dispatch::Send, self.config.image_upload_timeout())
            .await
    }

    fn multipart_request(
        &self,
        url: Url,
        method: HttpMethod,
        multipart: MultipartBody,
    ) -> HttpRequest {
        let mut request = self.request_builder.build(url, method, true);
        request.set_header(CONTENT_TYPE_HEADER, multipart.content_type());
        request.body = Some(multipart.body);
        request
    }

    /// Runs the dispatch/classify loop for one call.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
        dispatch: Dispatch,
        timeout: Duration,
    ) -> Result<T, HttpError> {
        let mut request = request;
        let mut state = AttemptState::FirstAttempt;

        loop {
            let outcome = self.dispatch(&request, dispatch, timeout).await;
            let disposition = classify(&outcome);

            if self.retry.should_retry(disposition, state) {
                if let Some(retried) = self
                    .retry
                    .prepare_retry(&request, &self.request_builder)
                    .await
                {
                    request = retried;
                    state = AttemptState::Retried;
                    continue;
                }
            }

            return match (disposition, outcome) {
                (_, Err(error)) => {
                    tracing::error!("{} {} failed: {}", request.method, request.url, error);
                    Err(HttpError::Transport(error))
                }
                (Disposition::Proceed, Ok(response)) => decode(&response.body),
                (_, Ok(response)) => {
                    tracing::warn!(
                        "{} {} rejected with status {} after {} retries",
                        request.method,
                        request.url,
                        response.status(),
                        state.retry_count()
                    );
                    Err(HttpError::ServerRejection {
                        code: response.code,
                    })
                }
            };
        }
    }

    async fn dispatch(
        &self,
        request: &HttpRequest,
        dispatch: Dispatch,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        match dispatch {
            Dispatch::Send => self.transport.send(request.clone(), timeout).await,
            Dispatch::Upload => {
                let mut request = request.clone();
                let body = request.body.take().unwrap_or_default();
                self.transport.upload(request, body, timeout).await
            }
        }
    }
}

/// Builder for constructing [`NetworkClient`] instances.
///
/// # Defaults
///
/// - `config`: [`NetworkConfig::default`]
/// - `transport`: [`ReqwestTransport`] built from the config
/// - `token_provider`: `None` (no `Authorization` header)
/// - `on_unauthorized`: `None` (401 is not retried)
#[derive(Default)]
pub struct NetworkClientBuilder {
    config: Option<NetworkConfig>,
    transport: Option<Arc<dyn Transport>>,
    token_provider: Option<TokenProvider>,
    notifier: Option<AuthFailureNotifier>,
}

impl fmt::Debug for NetworkClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkClientBuilder")
            .field("config", &self.config)
            .field("transport", &self.transport.is_some())
            .field("token_provider", &self.token_provider.is_some())
            .field("notifier", &self.notifier.is_some())
            .finish()
    }
}

impl NetworkClientBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the client configuration.
    #[must_use]
    pub fn config(mut self, config: NetworkConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets a custom transport.
    #[must_use]
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Sets the bearer token provider.
    #[must_use]
    pub fn token_provider<F>(mut self, provider: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.token_provider = Some(Arc::new(provider));
        self
    }

    /// Sets the hook invoked when a request is rejected with 401.
    ///
    /// Setting it enables the single retry.
    #[must_use]
    pub fn on_unauthorized<F>(mut self, notifier: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.notifier = Some(Arc::new(notifier));
        self
    }

    /// Builds the [`NetworkClient`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Transport`] if no transport was supplied and
    /// the default one cannot be created.
    pub fn build(self) -> Result<NetworkClient, ConfigError> {
        let config = self.config.unwrap_or_default();
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&config)?),
        };

        Ok(NetworkClient {
            transport,
            request_builder: RequestBuilder::new(self.token_provider),
            retry: RetryCoordinator::new(self.notifier, config.retry_delay()),
            config,
        })
    }
}
