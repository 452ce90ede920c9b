//! Transparent retries for requests that never reached the server.

use std::time::Duration;

use crate::config::defaults;
use crate::time::{Sleeper, TokioSleeper};

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Configuration for exponential backoff retry behavior.
///
/// # Defaults
///
/// - `max_attempts`: 4 (one initial attempt plus three retries)
/// - `initial_delay`: 500 milliseconds
/// - `max_delay`: 8 seconds
/// - `multiplier`: 2.0
///
/// # Example
///
/// ```
/// use kyrazo::transport::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::from_max_retries(5)
///     .with_initial_delay(Duration::from_millis(100))
///     .with_max_delay(Duration::from_secs(2));
///
/// assert_eq!(policy.max_attempts, 6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the initial attempt).
    ///
    /// A value of 1 means no retries; only the initial attempt is made.
    pub max_attempts: u32,

    /// Delay before the first retry.
    pub initial_delay: Duration,

    /// Maximum delay between retries.
    pub max_delay: Duration,

    /// Multiplier applied to the delay after each retry.
    pub multiplier: f64,
}

impl RetryPolicy {
    /// Creates a new retry policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self::from_max_retries(defaults::MAX_RETRIES)
    }

    /// Creates a policy allowing `retries` retries after the initial attempt.
    #[must_use]
    pub const fn from_max_retries(retries: u32) -> Self {
        Self {
            max_attempts: retries.saturating_add(1),
            initial_delay: defaults::retry_initial_delay(),
            max_delay: defaults::retry_max_delay(),
            multiplier: defaults::RETRY_MULTIPLIER,
        }
    }

    /// Sets the initial delay between retries.
    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the maximum delay between retries.
    #[must_use]
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Computes the delay for a given retry number (0-indexed), capped at `max_delay`.
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        // Safe cast: retry values are bounded by max_attempts and clamped below
        #[allow(clippy::cast_possible_wrap)]
        let multiplier = self.multiplier.powi(retry.min(64) as i32);
        let delay_secs = self.initial_delay.as_secs_f64() * multiplier;
        let capped = delay_secs.min(self.max_delay.as_secs_f64());
        Duration::from_secs_f64(capped)
    }

    /// Returns true if another attempt is allowed after `attempt` (1-indexed).
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// [`HttpClient`] decorator that re-sends requests whose connection failed.
///
/// Only [`HttpError::Connect`] is retried: the request never reached the
/// server, so sending it again cannot duplicate a side effect. Responses of
/// any status and every other error are returned as-is.
///
/// # Type Parameters
///
/// - `H`: The wrapped HTTP client
/// - `S`: The sleeper used between attempts (defaults to [`TokioSleeper`])
#[derive(Debug)]
pub struct RetryingClient<H, S = TokioSleeper> {
    inner: H,
    sleeper: S,
    policy: RetryPolicy,
}

impl<H> RetryingClient<H, TokioSleeper> {
    /// Wraps `inner` with the given retry policy.
    #[must_use]
    pub const fn new(inner: H, policy: RetryPolicy) -> Self {
        Self {
            inner,
            sleeper: TokioSleeper,
            policy,
        }
    }
}

impl<H, S> RetryingClient<H, S> {
    /// Sets a custom sleeper for retry delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> RetryingClient<H, S2> {
        RetryingClient {
            inner: self.inner,
            sleeper,
            policy: self.policy,
        }
    }

    /// Returns the configured retry policy.
    #[must_use]
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Returns the wrapped client.
    #[must_use]
    pub const fn inner(&self) -> &H {
        &self.inner
    }
}

impl<H: HttpClient, S: Sleeper> HttpClient for RetryingClient<H, S> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut attempt = 1;

        loop {
            match self.inner.request(req.clone()).await {
                Err(HttpError::Connect(source)) if self.policy.should_retry(attempt) => {
                    let delay = self.policy.delay_for_retry(attempt - 1);
                    tracing::warn!(
                        url = %req.url,
                        attempt,
                        max_attempts = self.policy.max_attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %source,
                        "Connection failed, retrying"
                    );
                    self.sleeper.sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}
