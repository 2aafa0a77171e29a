//! Classification of transport outcomes.

use crate::clients::http_response::{HttpResponse, HttpStatusCode};

/// What the client should do next with a transport outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// The transport failed; no status is available.
    Error,
    /// The server answered 401.
    AuthFailure(u16),
    /// The server answered with another non-2xx status.
    Rejection(u16),
    /// The server answered 2xx; decode the body next.
    Proceed,
}

/// Classifies a transport outcome.
///
/// A transport error always yields [`Disposition::Error`], whatever else the
/// transport reported.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use networking::clients::{classify, Disposition, HttpResponse};
///
/// let ok: Result<_, std::io::Error> = Ok(HttpResponse::new(201, HashMap::new(), Vec::new()));
/// assert_eq!(classify(&ok), Disposition::Proceed);
/// ```
#[must_use]
pub fn classify<E>(outcome: &Result<HttpResponse, E>) -> Disposition {
    match outcome {
        Err(_) => Disposition::Error,
        Ok(response) => classify_status(response.code),
    }
}

/// Classifies a bare status code.
#[must_use]
pub const fn classify_status(code: u16) -> Disposition {
    match HttpStatusCode::from_code(code) {
        HttpStatusCode::Success(_) => Disposition::Proceed,
        HttpStatusCode::Unauthorized => Disposition::AuthFailure(code),
        HttpStatusCode::Rejected(code) => Disposition::Rejection(code),
    }
}
