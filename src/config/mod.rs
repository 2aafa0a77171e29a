//! Configuration for the networking client.
//!
//! [`NetworkConfig`] holds the timeout budgets applied per call and the delay
//! used before retrying a request that failed authentication.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use networking::NetworkConfig;
//!
//! let config = NetworkConfig::builder()
//!     .request_timeout(Duration::from_secs(10))
//!     .retry_delay(Duration::from_millis(500))
//!     .user_agent_prefix("MyApp/1.0")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.request_timeout(), Duration::from_secs(10));
//! ```

use std::time::Duration;

use crate::error::ConfigError;

/// Default timeout for JSON requests.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Default timeout for establishing a connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for image uploads.
pub const DEFAULT_IMAGE_UPLOAD_TIMEOUT: Duration = Duration::from_secs(50);

/// Default timeout for multipart content uploads.
pub const DEFAULT_CONTENT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Default pause between an auth-failure notification and the retry.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Configuration for a [`NetworkClient`](crate::NetworkClient).
///
/// `NetworkConfig` is `Clone`, `Send`, and `Sync`.
///
/// # Retry Delay
///
/// After notifying the auth-failure hook the client sleeps for
/// [`retry_delay`](Self::retry_delay) before rebuilding the request. Nothing
/// guarantees the token refresh has landed by then; the delay only gives an
/// out-of-band refresh a chance to complete.
#[derive(Clone, Debug)]
pub struct NetworkConfig {
    request_timeout: Duration,
    connect_timeout: Duration,
    image_upload_timeout: Duration,
    content_upload_timeout: Duration,
    retry_delay: Duration,
    user_agent_prefix: Option<String>,
}

impl NetworkConfig {
    /// Creates a new builder for constructing a `NetworkConfig`.
    #[must_use]
    pub fn builder() -> NetworkConfigBuilder {
        NetworkConfigBuilder::new()
    }

    /// Returns the timeout applied to JSON requests.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Returns the connect timeout configured on the default transport.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Returns the timeout applied to image uploads.
    #[must_use]
    pub const fn image_upload_timeout(&self) -> Duration {
        self.image_upload_timeout
    }

    /// Returns the timeout applied to multipart content uploads.
    #[must_use]
    pub const fn content_upload_timeout(&self) -> Duration {
        self.content_upload_timeout
    }

    /// Returns the pause taken before retrying an unauthorized request.
    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            image_upload_timeout: DEFAULT_IMAGE_UPLOAD_TIMEOUT,
            content_upload_timeout: DEFAULT_CONTENT_UPLOAD_TIMEOUT,
            retry_delay: DEFAULT_RETRY_DELAY,
            user_agent_prefix: None,
        }
    }
}

// Verify NetworkConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<NetworkConfig>();
};

/// Builder for constructing [`NetworkConfig`] instances.
///
/// Every field is optional; unset fields fall back to the `DEFAULT_*`
/// constants in this module.
#[derive(Debug, Default)]
pub struct NetworkConfigBuilder {
    request_timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    image_upload_timeout: Option<Duration>,
    content_upload_timeout: Option<Duration>,
    retry_delay: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl NetworkConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the timeout applied to JSON requests.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets the connect timeout configured on the default transport.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the timeout applied to image uploads.
    #[must_use]
    pub const fn image_upload_timeout(mut self, timeout: Duration) -> Self {
        self.image_upload_timeout = Some(timeout);
        self
    }

    /// Sets the timeout applied to multipart content uploads.
    #[must_use]
    pub const fn content_upload_timeout(mut self, timeout: Duration) -> Self {
        self.content_upload_timeout = Some(timeout);
        self
    }

    /// Sets the pause taken before retrying an unauthorized request.
    ///
    /// A zero delay is allowed and retries immediately.
    #[must_use]
    pub const fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    /// Sets the user agent prefix sent by the default transport.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`NetworkConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] if any timeout budget is zero,
    /// or [`ConfigError::InvalidUserAgentPrefix`] if the prefix is not
    /// visible ASCII.
    pub fn build(self) -> Result<NetworkConfig, ConfigError> {
        let defaults = NetworkConfig::default();

        let request_timeout = non_zero(
            "request_timeout",
            self.request_timeout.unwrap_or(defaults.request_timeout),
        )?;
        let connect_timeout = non_zero(
            "connect_timeout",
            self.connect_timeout.unwrap_or(defaults.connect_timeout),
        )?;
        let image_upload_timeout = non_zero(
            "image_upload_timeout",
            self.image_upload_timeout
                .unwrap_or(defaults.image_upload_timeout),
        )?;
        let content_upload_timeout = non_zero(
            "content_upload_timeout",
            self.content_upload_timeout
                .unwrap_or(defaults.content_upload_timeout),
        )?;

        if let Some(prefix) = &self.user_agent_prefix {
            if !prefix.chars().all(|c| c.is_ascii_graphic() || c == ' ') {
                return Err(ConfigError::InvalidUserAgentPrefix {
                    prefix: prefix.clone(),
                });
            }
        }

        Ok(NetworkConfig {
            request_timeout,
            connect_timeout,
            image_upload_timeout,
            content_upload_timeout,
            retry_delay: self.retry_delay.unwrap_or(defaults.retry_delay),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

const fn non_zero(name: &'static str, value: Duration) -> Result<Duration, ConfigError> {
    if value.is_zero() {
        Err(ConfigError::InvalidTimeout { name })
    } else {
        Ok(value)
    }
}
