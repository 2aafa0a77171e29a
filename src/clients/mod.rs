//! HTTP client types.
//!
//! This module provides the request-execution pipeline: request
//! construction, transport invocation, response classification, the single
//! retry on 401, JSON decoding into caller-specified types, and multipart
//! body assembly.
//!
//! # Overview
//!
//! - [`NetworkClient`]: the public client and its [`NetworkClientBuilder`]
//! - [`RequestBuilder`]: builds requests with standard headers and bearer token
//! - [`MultipartEncoder`]: encodes `multipart/form-data` bodies
//! - [`classify`]: maps a transport outcome to a [`Disposition`]
//! - [`decode`]: decodes a success body into any `DeserializeOwned` type
//! - [`RetryCoordinator`]: owns the retry-on-401 policy
//! - [`Transport`]: the seam to the network, with [`ReqwestTransport`] as default
//!
//! # Retry Behavior
//!
//! - **401 (Unauthorized)**: if an auth-failure hook is configured, it is
//!   called, the client waits the configured retry delay, rebuilds the request
//!   with a fresh token, and sends it once more. A second 401 is terminal.
//! - **Other non-2xx**: returned immediately as [`HttpError::ServerRejection`]
//! - **Transport failures**: returned immediately as [`HttpError::Transport`]

mod classifier;
mod client;
mod content;
mod decoder;
mod errors;
mod http_request;
mod http_response;
mod multipart;
mod request_builder;
mod retry;
mod transport;

pub use classifier::{classify, classify_status, Disposition};
pub use client::{NetworkClient, NetworkClientBuilder, IMAGE_CONTENT_TYPE};
pub use content::{ContentEntry, ContentSource};
pub use decoder::decode;
pub use errors::{HttpError, TransportError};
pub use http_request::{
    HttpMethod, HttpRequest, HttpRequestBuilder, ACCEPT_HEADER, AUTH_HEADER, AUTH_SCHEME,
    CONTENT_LENGTH_HEADER, CONTENT_TYPE_HEADER, JSON_MEDIA_TYPE,
};
pub use http_response::{HttpResponse, HttpStatusCode};
pub use multipart::{FilePart, MultipartBody, MultipartEncoder, FILE_FIELD_NAME};
pub use request_builder::{RequestBuilder, TokenProvider};
pub use retry::{AttemptState, AuthFailureNotifier, RetryCoordinator};
pub use transport::{ReqwestTransport, Transport, SDK_VERSION};
