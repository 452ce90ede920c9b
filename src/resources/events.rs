//! Event publishing.

use std::fmt;
use std::sync::Arc;

use http::HeaderName;

use crate::error::ApiError;
use crate::models::{BatchPublishEventResponse, PublishEventBody, PublishEventResponse};
use crate::transport::envelope::decode;
use crate::transport::{ApiRequest, HttpClient, HttpTransport};

/// Header that lets the service drop duplicate submissions.
pub const IDEMPOTENCY_KEY: HeaderName = HeaderName::from_static("idempotency-key");

/// Client for `/v1/events`.
pub struct EventsClient<H> {
    transport: Arc<HttpTransport<H>>,
}

impl<H> EventsClient<H> {
    pub(crate) const fn new(transport: Arc<HttpTransport<H>>) -> Self {
        Self { transport }
    }
}

impl<H: HttpClient> EventsClient<H> {
    /// Queues one event for delivery.
    ///
    /// A non-empty `idempotency_key` is sent as `Idempotency-Key`.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] of the request. An idempotency key
    /// that is not a valid header value fails with code `INVALID_HEADER`
    /// before anything is sent.
    pub async fn publish(
        &self,
        project_id: &str,
        event: &PublishEventBody,
        idempotency_key: Option<&str>,
    ) -> Result<PublishEventResponse, ApiError> {
        let request = with_idempotency_key(
            ApiRequest::post(format!("/v1/events/{project_id}/publish")).with_json(event),
            idempotency_key,
        );

        let response: PublishEventResponse = decode(self.transport.execute(request).await?)?;
        tracing::debug!(
            event_id = %response.event_id,
            targets = response.targets_count,
            unfound = response.unfound_targets.len(),
            "Event queued"
        );
        Ok(response)
    }

    /// Queues several events in one request.
    ///
    /// # Errors
    ///
    /// Same as [`publish`](Self::publish). Per-event failures are reported in
    /// the response, not as an error.
    pub async fn batch(
        &self,
        project_id: &str,
        events: &[PublishEventBody],
        idempotency_key: Option<&str>,
    ) -> Result<BatchPublishEventResponse, ApiError> {
        let request = with_idempotency_key(
            ApiRequest::post(format!("/v1/events/{project_id}/publish/batch")).with_json(events),
            idempotency_key,
        );

        let response: BatchPublishEventResponse = decode(self.transport.execute(request).await?)?;
        tracing::debug!(
            batch_size = response.batch_size,
            queued = response.queued_count,
            failed = response.failed_count,
            "Event batch queued"
        );
        Ok(response)
    }
}

fn with_idempotency_key(request: ApiRequest, key: Option<&str>) -> ApiRequest {
    match key {
        Some(key) if !key.is_empty() => request.with_header_str(IDEMPOTENCY_KEY, key),
        _ => request,
    }
}

impl<H> Clone for EventsClient<H> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.transport))
    }
}

impl<H> fmt::Debug for EventsClient<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventsClient")
            .field("base_url", &self.transport.config().base_url().as_str())
            .finish()
    }
}
