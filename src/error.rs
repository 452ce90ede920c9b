//! Typed errors returned by every API operation.
//!
//! [`ApiError`] is the only failure type a resource client returns. Values are
//! created exclusively by the transport core when it classifies an outcome:
//! the HTTP status of a response selects the kind, and transport failures
//! become [`ApiError::Network`].

use std::fmt;
use std::time::Duration;

use http::StatusCode;
use thiserror::Error;

use crate::transport::HttpError;

/// Machine codes produced by the client itself rather than the service.
pub mod code {
    /// Used when an error response carries no `error.code`.
    pub const UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";
    /// Used for 429 responses that carry no `error.code`.
    pub const RATE_LIMIT_EXCEEDED: &str = "RATE_LIMIT_EXCEEDED";
    /// A successful response whose body could not be decoded.
    pub const INVALID_RESPONSE: &str = "INVALID_RESPONSE";
    /// A request body that could not be serialized.
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    /// A caller-supplied header value (such as an idempotency key) that is
    /// not a valid HTTP header value.
    pub const INVALID_HEADER: &str = "INVALID_HEADER";
}

/// The kind of an [`ApiError`], for branching without matching payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400: the service rejected the input.
    Validation,
    /// 401: missing or invalid credential.
    Authentication,
    /// 403: plan or quota ceiling reached.
    LimitExceeded,
    /// 429: too many requests.
    RateLimit,
    /// 5xx: the service failed.
    Server,
    /// No response was received.
    Network,
    /// Any other failure.
    Generic,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validation => "validation",
            Self::Authentication => "authentication",
            Self::LimitExceeded => "limit_exceeded",
            Self::RateLimit => "rate_limit",
            Self::Server => "server",
            Self::Network => "network",
            Self::Generic => "generic",
        };
        f.write_str(name)
    }
}

/// Error type for API operations.
///
/// # Example
///
/// ```no_run
/// use kyrazo::{ApiError, Kyrazo};
///
/// # async fn example(client: &Kyrazo) {
/// match client.targets().get_secret("proj_1", "tgt_1").await {
///     Ok(secret) => println!("secret: {secret}"),
///     Err(ApiError::RateLimit { retry_after: Some(secs), .. }) => {
///         println!("slow down, retry in {secs}s");
///     }
///     Err(e) => println!("failed: {e}"),
/// }
/// # }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service rejected the request as invalid (400).
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable description
        message: String,
        /// Service-provided machine code
        code: Option<String>,
    },

    /// The credential is missing or invalid (401).
    #[error("Authentication error: {message}")]
    Authentication {
        /// Human-readable description
        message: String,
        /// Service-provided machine code
        code: Option<String>,
    },

    /// A plan or quota limit was reached (403).
    #[error("Limit exceeded: {message}")]
    LimitExceeded {
        /// Human-readable description
        message: String,
        /// Service-provided machine code
        code: Option<String>,
    },

    /// Too many requests (429).
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        /// Human-readable description
        message: String,
        /// Service-provided machine code
        code: Option<String>,
        /// Seconds to wait, from the `Retry-After` header
        retry_after: Option<u64>,
        /// Requests left in the window, from `X-RateLimit-Remaining`
        remaining: Option<u64>,
    },

    /// The service failed (5xx).
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: StatusCode,
        /// Human-readable description
        message: String,
        /// Service-provided machine code
        code: Option<String>,
    },

    /// No response was received.
    ///
    /// Covers DNS failures, refused connections, TLS failures, timeouts
    /// and requests issued after the client was closed.
    #[error("{message}")]
    Network {
        /// Human-readable description
        message: String,
        /// The underlying transport failure
        #[source]
        source: HttpError,
    },

    /// Any other failure: unexpected statuses and undecodable bodies.
    #[error("API error: {message}")]
    Generic {
        /// HTTP status code, when a response was received
        status: Option<StatusCode>,
        /// Human-readable description
        message: String,
        /// Service-provided or client machine code
        code: Option<String>,
    },
}

impl ApiError {
    /// Wraps a transport failure.
    pub(crate) fn network(source: HttpError) -> Self {
        Self::Network {
            message: format!("Request failed: {source}"),
            source,
        }
    }

    /// Builds a client-side `Generic` error with no status.
    pub(crate) fn generic(message: impl Into<String>, code: &str) -> Self {
        Self::Generic {
            status: None,
            message: message.into(),
            code: Some(code.to_string()),
        }
    }

    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::LimitExceeded { .. } => ErrorKind::LimitExceeded,
            Self::RateLimit { .. } => ErrorKind::RateLimit,
            Self::Server { .. } => ErrorKind::Server,
            Self::Network { .. } => ErrorKind::Network,
            Self::Generic { .. } => ErrorKind::Generic,
        }
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message, .. }
            | Self::Authentication { message, .. }
            | Self::LimitExceeded { message, .. }
            | Self::RateLimit { message, .. }
            | Self::Server { message, .. }
            | Self::Network { message, .. }
            | Self::Generic { message, .. } => message,
        }
    }

    /// Returns the machine code, if any. Network errors never have one.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Validation { code, .. }
            | Self::Authentication { code, .. }
            | Self::LimitExceeded { code, .. }
            | Self::RateLimit { code, .. }
            | Self::Server { code, .. }
            | Self::Generic { code, .. } => code.as_deref(),
            Self::Network { .. } => None,
        }
    }

    /// Returns the HTTP status that produced this error, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Validation { .. } => Some(StatusCode::BAD_REQUEST),
            Self::Authentication { .. } => Some(StatusCode::UNAUTHORIZED),
            Self::LimitExceeded { .. } => Some(StatusCode::FORBIDDEN),
            Self::RateLimit { .. } => Some(StatusCode::TOO_MANY_REQUESTS),
            Self::Server { status, .. } => Some(*status),
            Self::Generic { status, .. } => *status,
            Self::Network { .. } => None,
        }
    }

    /// Returns how long the service asked to wait, for rate-limit errors.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimit {
                retry_after: Some(secs),
                ..
            } => Some(Duration::from_secs(*secs)),
            _ => None,
        }
    }

    /// Returns the remaining request quota, for rate-limit errors.
    #[must_use]
    pub const fn remaining(&self) -> Option<u64> {
        match self {
            Self::RateLimit { remaining, .. } => *remaining,
            _ => None,
        }
    }
}
