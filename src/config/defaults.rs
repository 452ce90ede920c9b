//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Production API address.
pub const BASE_URL: &str = "https://api.kyrazo.com";

/// Default per-request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Default number of transport-level retries for failed connections.
pub const MAX_RETRIES: u32 = 3;

/// Client identity sent on every request.
pub const USER_AGENT: &str = concat!("kyrazo-rust-sdk/", env!("CARGO_PKG_VERSION"));

/// Initial delay before retrying a failed connection, in milliseconds.
pub const RETRY_INITIAL_DELAY_MILLIS: u64 = 500;

/// Maximum delay between connection retries, in seconds.
pub const RETRY_MAX_DELAY_SECS: u64 = 8;

/// Retry backoff multiplier.
pub const RETRY_MULTIPLIER: f64 = 2.0;

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "KYRAZO_API_KEY";

/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "KYRAZO_BASE_URL";

/// Default request timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}

/// Default initial retry delay as Duration.
#[must_use]
pub const fn retry_initial_delay() -> Duration {
    Duration::from_millis(RETRY_INITIAL_DELAY_MILLIS)
}

/// Default maximum retry delay as Duration.
#[must_use]
pub const fn retry_max_delay() -> Duration {
    Duration::from_secs(RETRY_MAX_DELAY_SECS)
}
