//! Shapes shared by several resources.

use serde::{Deserialize, Serialize};

/// Delivery settings attached to targets and endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryConfig {
    /// Request timeout in milliseconds.
    pub timeout: u64,
    /// Delivery attempts before giving up.
    pub retry_count: u32,
    /// Maximum deliveries per window, if limited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<u32>,
    /// Length of the rate-limit window in seconds.
    pub rate_limit_duration: u64,
}

impl DeliveryConfig {
    /// Creates a config with no rate limit.
    #[must_use]
    pub const fn new(timeout: u64, retry_count: u32, rate_limit_duration: u64) -> Self {
        Self {
            timeout,
            retry_count,
            rate_limit: None,
            rate_limit_duration,
        }
    }

    /// Sets the maximum deliveries per window.
    #[must_use]
    pub const fn with_rate_limit(mut self, rate_limit: u32) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }
}

/// Active/inactive switch used by sources and endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Receiving or delivering.
    Active,
    /// Paused.
    Inactive,
}
