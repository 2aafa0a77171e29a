//! Error types for client configuration.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use networking::{ConfigError, NetworkConfig};
//!
//! let result = NetworkConfig::builder()
//!     .request_timeout(Duration::ZERO)
//!     .build();
//! assert!(matches!(result, Err(ConfigError::InvalidTimeout { name: "request_timeout" })));
//! ```

use thiserror::Error;

/// Errors that can occur while building a [`NetworkConfig`](crate::NetworkConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A timeout budget was set to zero.
    #[error("Invalid timeout '{name}'. Timeout budgets must be greater than zero.")]
    InvalidTimeout {
        /// The name of the offending setting.
        name: &'static str,
    },

    /// The user agent prefix contains characters that are not valid in a header.
    #[error("Invalid user agent prefix '{prefix}'. Header values must be visible ASCII.")]
    InvalidUserAgentPrefix {
        /// The rejected prefix.
        prefix: String,
    },

    /// The default transport could not be created.
    #[error("Failed to create HTTP transport: {reason}")]
    Transport {
        /// The reason reported by the underlying HTTP library.
        reason: String,
    },
}
