//! HTTP response types.
//!
//! This module provides the raw [`HttpResponse`] returned by a transport and
//! the [`HttpStatusCode`] buckets used to classify it.

use std::collections::HashMap;
use std::fmt;

/// Named buckets for a numeric HTTP status code.
///
/// Bucketing is a pure function of the code.
///
/// # Example
///
/// ```rust
/// use networking::clients::HttpStatusCode;
///
/// assert_eq!(HttpStatusCode::from_code(204), HttpStatusCode::Success(204));
/// assert_eq!(HttpStatusCode::from_code(401), HttpStatusCode::Unauthorized);
/// assert_eq!(HttpStatusCode::from_code(503), HttpStatusCode::Rejected(503));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpStatusCode {
    /// Any code in `200..=299`.
    Success(u16),
    /// `401 Unauthorized`.
    Unauthorized,
    /// Any other code outside the success range.
    Rejected(u16),
}

impl HttpStatusCode {
    /// The status code that triggers an auth-failure retry.
    pub const UNAUTHORIZED: u16 = 401;

    /// Buckets a numeric status code.
    #[must_use]
    pub const fn from_code(code: u16) -> Self {
        match code {
            200..=299 => Self::Success(code),
            Self::UNAUTHORIZED => Self::Unauthorized,
            _ => Self::Rejected(code),
        }
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::Success(code) | Self::Rejected(code) => *code,
            Self::Unauthorized => Self::UNAUTHORIZED,
        }
    }

    /// Returns `true` for codes in `200..=299`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(code) => write!(f, "{code} success"),
            Self::Unauthorized => write!(f, "401 unauthorized"),
            Self::Rejected(code) => write!(f, "{code} rejected"),
        }
    }
}

/// A completed response as reported by a transport.
///
/// Header names are stored lowercased; a header may carry several values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers.
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response from its parts.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: Vec<u8>) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns the status bucket of this response.
    #[must_use]
    pub const fn status(&self) -> HttpStatusCode {
        HttpStatusCode::from_code(self.code)
    }

    /// Returns `true` if the status code is in `200..=299`.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status().is_success()
    }

    /// Returns the first value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the body as UTF-8 text, replacing invalid sequences.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
