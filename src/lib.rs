//! # networking-core
//!
//! A generic HTTP client core for calling a JSON REST API and an
//! upload-oriented binary API, with bearer-token authentication, a single
//! automatic retry on 401, and `multipart/form-data` encoding for uploads.
//!
//! ## Overview
//!
//! This crate provides:
//! - Typed JSON calls via [`NetworkClient`] (`get`, `post`, `patch`, `put`, `perform`)
//! - Multipart uploads (`upload_image`, `patch_signature_image`, `upload_multipart_content`)
//! - Bearer tokens fetched fresh from a caller-supplied provider on every call
//! - A single retry after 401, preceded by a caller-supplied auth-failure hook
//! - A pluggable [`clients::Transport`] with a `reqwest` default
//! - Configurable per-call timeout budgets via [`NetworkConfig`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use networking::{NetworkClient, NetworkConfig};
//! use reqwest::Url;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Profile {
//!     name: String,
//! }
//!
//! let client = NetworkClient::builder()
//!     .config(NetworkConfig::default())
//!     .token_provider(|| "current-token".to_string())
//!     .on_unauthorized(|| tracing::info!("token expired, refreshing"))
//!     .build()?;
//!
//! let url = Url::parse("https://api.example.com/me")?;
//! let profile: Profile = client.get(url, true).await?;
//! ```
//!
//! ## Errors
//!
//! Every call resolves to exactly one `Result`. Failures are values of
//! [`HttpError`]: a transport failure, a server rejection, a body that did
//! not decode, or an upload source that could not be read.
//!
//! ## Design Principles
//!
//! - **No global state**: hooks and configuration are held per client
//! - **Tokens are never cached**: the provider is called on every authenticated request
//! - **Thread-safe**: all types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime

pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use config::{NetworkConfig, NetworkConfigBuilder};
pub use error::ConfigError;

pub use clients::{
    ContentEntry, ContentSource, FilePart, HttpError, HttpMethod, HttpRequest, HttpResponse,
    HttpStatusCode, MultipartEncoder, NetworkClient, NetworkClientBuilder, Transport,
};
