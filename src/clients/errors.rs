//! Error types for the request pipeline.
//!
//! Every terminal condition of a client call is surfaced as an [`HttpError`]
//! value. Nothing crosses the call boundary as a panic.
//!
//! - [`HttpError::Transport`]: network, DNS or TLS failure reported by the transport
//! - [`HttpError::ServerRejection`]: a non-2xx status, including a 401 that
//!   already used its single retry
//! - [`HttpError::DecodeMismatch`]: the body did not decode into the expected type
//! - [`HttpError::ContentSource`]: an upload source could not be read
//!
//! # Example
//!
//! ```rust,ignore
//! use networking::HttpError;
//!
//! match client.get::<Profile>(url, true).await {
//!     Ok(profile) => println!("Hello {}", profile.name),
//!     Err(HttpError::ServerRejection { code }) => println!("Rejected with {code}"),
//!     Err(HttpError::DecodeMismatch { source }) => println!("Bad body: {source}"),
//!     Err(HttpError::Transport(e)) => println!("Network error: {e}"),
//!     Err(HttpError::ContentSource { filename, .. }) => println!("Can't read {filename}"),
//! }
//! ```

use thiserror::Error;

/// Boxed error produced by a [`Transport`](crate::clients::Transport).
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Unified error type for all client operations.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The transport failed before a status code was received.
    #[error("Transport error: {0}")]
    Transport(#[source] TransportError),

    /// The server answered with a non-successful status.
    #[error("Server rejected the request with status {code}")]
    ServerRejection {
        /// The HTTP status code of the rejecting response.
        code: u16,
    },

    /// The response body did not match the expected type.
    #[error("Response body did not match the expected type: {source}")]
    DecodeMismatch {
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// An upload source could not be read.
    #[error("Failed to read upload content '{filename}': {source}")]
    ContentSource {
        /// The filename the content was registered under.
        filename: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl HttpError {
    /// Returns the HTTP status code carried by this error, if any.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::ServerRejection { code } => Some(*code),
            _ => None,
        }
    }
}
