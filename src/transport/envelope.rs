//! Helpers for the response envelopes the service wraps payloads in.
//!
//! Single-item and mutation endpoints answer with `{data: …}` or
//! `{success: …}`; event endpoints return the payload unwrapped. These helpers
//! turn an `execute` outcome into the typed value the caller expects.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, code};

/// Decodes a whole response body into `T`.
///
/// # Errors
///
/// Returns [`ApiError::Generic`] with code `INVALID_RESPONSE` if the response
/// had no body or the body does not match `T`.
pub fn decode<T: DeserializeOwned>(body: Option<Value>) -> Result<T, ApiError> {
    let value = body.ok_or_else(|| {
        ApiError::generic("Expected a response body, got no content", code::INVALID_RESPONSE)
    })?;

    serde_json::from_value(value).map_err(|e| {
        ApiError::generic(
            format!("Unexpected response shape: {e}"),
            code::INVALID_RESPONSE,
        )
    })
}

/// Decodes the `data` member of a `{data: …}` envelope into `T`.
///
/// # Errors
///
/// Returns [`ApiError::Generic`] with code `INVALID_RESPONSE` if the body is
/// missing, has no `data` member, or `data` does not match `T`.
pub fn unwrap_data<T: DeserializeOwned>(body: Option<Value>) -> Result<T, ApiError> {
    let data = match body {
        Some(Value::Object(mut map)) => map.remove("data"),
        _ => None,
    };

    let data = data.ok_or_else(|| {
        ApiError::generic(
            "Expected a `data` envelope in the response body",
            code::INVALID_RESPONSE,
        )
    })?;

    decode(Some(data))
}

/// Reads the `success` flag of a `{success: …}` envelope.
///
/// A missing body, missing flag or non-boolean flag reads as `false`.
#[must_use]
pub fn success_flag(body: Option<&Value>) -> bool {
    body.and_then(|v| v.get("success"))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}
