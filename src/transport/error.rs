//! Error types for wire-level HTTP operations.

use thiserror::Error;

/// Error type for HTTP operations.
///
/// Describes what went wrong before a response could be read. The transport
/// core never hands these to callers directly; they are always wrapped into
/// [`ApiError::Network`](crate::ApiError::Network).
#[derive(Debug, Error)]
pub enum HttpError {
    /// The connection could not be established.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS handshake failures and connect timeouts. The request never
    /// reached the server, so it is safe to send again.
    #[error("Connect error: {0}")]
    Connect(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The connection failed after the request was sent.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The client has been closed and can no longer send requests.
    #[error("Cannot send a request, as the client has been closed")]
    Closed,
}
