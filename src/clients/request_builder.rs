//! Construction of authenticated requests.
//!
//! [`RequestBuilder`] turns a URL, a verb and an authentication flag into an
//! [`HttpRequest`] carrying the standard JSON headers and, when asked, a
//! bearer token fetched from the configured [`TokenProvider`].

use std::fmt;
use std::sync::Arc;

use reqwest::Url;
use serde::Serialize;

use crate::clients::http_request::{
    HttpMethod, HttpRequest, ACCEPT_HEADER, AUTH_HEADER, AUTH_SCHEME, CONTENT_TYPE_HEADER,
    JSON_MEDIA_TYPE,
};

/// Returns the current bearer token.
///
/// Called synchronously on every authenticated request and again on retry;
/// the token is never cached.
pub type TokenProvider = Arc<dyn Fn() -> String + Send + Sync>;

/// Builds transport-ready requests.
#[derive(Clone, Default)]
pub struct RequestBuilder {
    token_provider: Option<TokenProvider>,
}

impl fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("token_provider", &self.token_provider.is_some())
            .finish()
    }
}

impl RequestBuilder {
    /// Creates a builder using the given token provider, if any.
    #[must_use]
    pub fn new(token_provider: Option<TokenProvider>) -> Self {
        Self { token_provider }
    }

    /// Builds a bodiless request.
    ///
    /// `Accept: application/json` is always set. When `authenticated` is
    /// `true` and a token provider is configured, the provider is called and
    /// `Authorization: Bearer <token>` is set. The provider is never called
    /// for unauthenticated requests.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use networking::clients::{HttpMethod, RequestBuilder, TokenProvider};
    /// use reqwest::Url;
    ///
    /// let provider: TokenProvider = Arc::new(|| "t0k3n".to_string());
    /// let builder = RequestBuilder::new(Some(provider));
    /// let url = Url::parse("https://api.example.com/me").unwrap();
    ///
    /// let request = builder.build(url, HttpMethod::Get, true);
    /// assert_eq!(request.header("Authorization"), Some("Bearer t0k3n"));
    /// ```
    #[must_use]
    pub fn build(&self, url: Url, method: HttpMethod, authenticated: bool) -> HttpRequest {
        let mut request = HttpRequest::new(method, url);
        request.set_header(ACCEPT_HEADER, JSON_MEDIA_TYPE);
        if authenticated {
            self.authorize(&mut request);
        }
        request
    }

    /// Builds a request carrying `payload` serialized as JSON.
    ///
    /// If serialization fails the error is logged and the request is returned
    /// without a body; the call still goes out.
    #[must_use]
    pub fn build_with_json_body<P: Serialize + ?Sized>(
        &self,
        url: Url,
        method: HttpMethod,
        authenticated: bool,
        payload: &P,
    ) -> HttpRequest {
        let mut request = self.build(url, method, authenticated);
        request.set_header(CONTENT_TYPE_HEADER, JSON_MEDIA_TYPE);
        match serde_json::to_vec(payload) {
            Ok(body) => request.body = Some(body),
            Err(error) => {
                tracing::error!(
                    "Failed to serialize {} body for {} {}: {}",
                    std::any::type_name::<P>(),
                    method,
                    request.url,
                    error
                );
            }
        }
        request
    }

    /// Rebuilds `request` for another attempt.
    ///
    /// Method, URL, body bytes and every header other than `Authorization`
    /// are preserved. The authorization header is dropped and, when
    /// `authenticated` is `true`, re-derived from a fresh token.
    #[must_use]
    pub fn clone_request(&self, request: &HttpRequest, authenticated: bool) -> HttpRequest {
        let mut cloned = request.clone();
        cloned.remove_header(AUTH_HEADER);
        cloned.set_header(ACCEPT_HEADER, JSON_MEDIA_TYPE);
        if authenticated {
            self.authorize(&mut cloned);
        }
        cloned
    }

    fn authorize(&self, request: &mut HttpRequest) {
        if let Some(token_provider) = &self.token_provider {
            let token = token_provider();
            request.set_header(AUTH_HEADER, format!("{AUTH_SCHEME} {token}"));
        }
    }
}
