//! Classification of HTTP responses into decoded values or typed errors.

use http::StatusCode;
use serde_json::Value;

use crate::error::{ApiError, code};

use super::HttpResponse;

/// Header carrying the number of seconds to wait after a 429.
pub const RETRY_AFTER: &str = "retry-after";

/// Header carrying the remaining request quota.
pub const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

/// Maps a received response to its terminal outcome.
///
/// - 204 yields `Ok(None)`.
/// - Any other 2xx yields the parsed JSON body. A body that is not valid JSON
///   yields [`ApiError::Generic`] with code `INVALID_RESPONSE`.
/// - Everything else is classified by [`error_from_response`].
///
/// # Errors
///
/// Returns the classified [`ApiError`] for non-2xx statuses and for
/// undecodable success bodies.
pub fn map_response(response: &HttpResponse, url: &url::Url) -> Result<Option<Value>, ApiError> {
    if !response.is_success() {
        return Err(error_from_response(response, url));
    }

    if response.status == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    response
        .json()
        .map(Some)
        .map_err(|e| ApiError::Generic {
            status: Some(response.status),
            message: format!("Invalid JSON in response body: {e}"),
            code: Some(code::INVALID_RESPONSE.to_string()),
        })
}

/// Classifies a non-2xx response into an [`ApiError`].
///
/// The message and code come from the `{error: {message, code}}` envelope when
/// present. A body that is missing, not JSON or shaped differently falls back
/// to a status-derived message and the `UNKNOWN_ERROR` code.
#[must_use]
pub fn error_from_response(response: &HttpResponse, url: &url::Url) -> ApiError {
    let status = response.status;
    let ErrorEnvelope {
        message,
        code: service_code,
    } = ErrorEnvelope::parse(response);
    let message = message.unwrap_or_else(|| fallback_message(status, url));

    match status.as_u16() {
        400 => ApiError::Validation {
            message,
            code: Some(service_code.unwrap_or_else(unknown_code)),
        },
        401 => ApiError::Authentication {
            message,
            code: Some(service_code.unwrap_or_else(unknown_code)),
        },
        403 => ApiError::LimitExceeded {
            message,
            code: Some(service_code.unwrap_or_else(unknown_code)),
        },
        429 => ApiError::RateLimit {
            message,
            code: Some(
                service_code.unwrap_or_else(|| code::RATE_LIMIT_EXCEEDED.to_string()),
            ),
            retry_after: numeric_header(response, RETRY_AFTER),
            remaining: numeric_header(response, RATE_LIMIT_REMAINING),
        },
        500..=599 => ApiError::Server {
            status,
            message,
            code: Some(service_code.unwrap_or_else(unknown_code)),
        },
        _ => ApiError::Generic {
            status: Some(status),
            message,
            code: Some(service_code.unwrap_or_else(unknown_code)),
        },
    }
}

/// Message and code pulled out of an error body.
#[derive(Debug, Default)]
struct ErrorEnvelope {
    message: Option<String>,
    code: Option<String>,
}

impl ErrorEnvelope {
    fn parse(response: &HttpResponse) -> Self {
        let Ok(value) = response.json() else {
            return Self::default();
        };

        let field = |name: &str| {
            value
                .get("error")
                .and_then(|error| error.get(name))
                .and_then(Value::as_str)
                .map(ToString::to_string)
        };

        Self {
            message: field("message"),
            code: field("code"),
        }
    }
}

fn unknown_code() -> String {
    code::UNKNOWN_ERROR.to_string()
}

fn fallback_message(status: StatusCode, url: &url::Url) -> String {
    let class = if status.is_informational() {
        "Informational response"
    } else if status.is_redirection() {
        "Redirect response"
    } else if status.is_server_error() {
        "Server error"
    } else {
        "Client error"
    };

    format!("{class} '{status}' for url '{url}'")
}

/// Parses a header made only of ASCII digits.
///
/// Anything else (missing, empty, signed, fractional, HTTP-date) is `None`.
fn numeric_header(response: &HttpResponse, name: &str) -> Option<u64> {
    response
        .header_str(name)
        .filter(|v| !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|v| v.parse().ok())
}
