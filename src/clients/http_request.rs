//! HTTP request types.
//!
//! This module provides the [`HttpRequest`] type handed to a transport, the
//! [`HttpMethod`] verbs it supports, and a fluent [`HttpRequestBuilder`] for
//! callers that want to assemble a fully custom request for
//! [`NetworkClient::perform`](crate::NetworkClient::perform).

use std::collections::HashMap;
use std::fmt;

use reqwest::Url;

/// `Accept` header name.
pub const ACCEPT_HEADER: &str = "Accept";
/// `Authorization` header name.
pub const AUTH_HEADER: &str = "Authorization";
/// `Content-Type` header name.
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
/// `Content-Length` header name.
pub const CONTENT_LENGTH_HEADER: &str = "Content-Length";
/// JSON media type.
pub const JSON_MEDIA_TYPE: &str = "application/json";
/// Scheme prepended to bearer tokens.
pub const AUTH_SCHEME: &str = "Bearer";

/// HTTP methods supported by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PATCH method for partially updating resources.
    Patch,
    /// HTTP PUT method for replacing resources.
    Put,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Put => Self::PUT,
        }
    }
}

/// A request ready to be handed to a [`Transport`](crate::clients::Transport).
///
/// Header keys are unique; inserting an existing key replaces its value.
///
/// # Example
///
/// ```rust
/// use networking::clients::{HttpMethod, HttpRequest};
/// use reqwest::Url;
///
/// let url = Url::parse("https://api.example.com/profile").unwrap();
/// let request = HttpRequest::builder(HttpMethod::Get, url)
///     .header("X-Trace", "abc")
///     .build();
///
/// assert_eq!(request.header("X-Trace"), Some("abc"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    /// The target URL.
    pub url: Url,
    /// The HTTP method.
    pub method: HttpMethod,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// The request body, if any.
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a request with no headers and no body.
    #[must_use]
    pub fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            url,
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, url: Url) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }

    /// Sets a header, replacing any previous value for the same name.
    ///
    /// Names are compared case-insensitively and stored lowercase, so
    /// `authorization` and `Authorization` are the same header.
    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let mut key = key.into();
        self.remove_header(&key);
        key.make_ascii_lowercase();
        self.headers.insert(key, value.into());
    }

    /// Returns the value of a header, if present. Lookup ignores case.
    #[must_use]
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }

    /// Removes every header matching `key` regardless of case.
    ///
    /// Returns the removed value, if any.
    pub fn remove_header(&mut self, key: &str) -> Option<String> {
        let mut removed = None;
        self.headers.retain(|name, value| {
            if name.eq_ignore_ascii_case(key) {
                removed = Some(std::mem::take(value));
                false
            } else {
                true
            }
        });
        removed
    }

    /// Returns `true` if the request carries an `Authorization` header.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.header(AUTH_HEADER).is_some()
    }
}

/// Builder for constructing [`HttpRequest`] instances by hand.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    request: HttpRequest,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            request: HttpRequest::new(method, url),
        }
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.set_header(key, value);
        self
    }

    /// Sets all headers at once, replacing any set before.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.request.headers.clear();
        for (key, value) in headers {
            self.request.set_header(key, value);
        }
        self
    }

    /// Sets the raw request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.request.body = Some(body.into());
        self
    }

    /// Builds the [`HttpRequest`].
    #[must_use]
    pub fn build(self) -> HttpRequest {
        self.request
    }
}
