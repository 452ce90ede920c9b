//! Event publishing models.
//!
//! Unlike the CRUD resources, event endpoints return their payload without a
//! `{data: …}` envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Delivery priority of a published event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Delivered after other priorities.
    Low,
    /// Default priority.
    Normal,
    /// Delivered ahead of normal events.
    High,
    /// Delivered first.
    Urgent,
}

/// A delivery destination for a published event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTarget {
    /// URL of a registered target.
    pub target_url: String,
}

impl EventTarget {
    #[must_use]
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
        }
    }
}

/// Optional delivery hints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMeta {
    /// Delivery priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Delivery attempts before giving up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
}

/// An event to publish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishEventBody {
    /// Source (webhook) the event is published from.
    pub webhook_id: String,
    /// Event name, such as `order.created`.
    pub event_type: String,
    /// Arbitrary JSON object delivered to the targets.
    pub payload: Map<String, Value>,
    /// Targets to deliver to.
    pub targets: Vec<EventTarget>,
    /// Delivery hints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<EventMeta>,
}

impl PublishEventBody {
    /// Creates an event with no targets and no delivery hints.
    #[must_use]
    pub fn new(
        webhook_id: impl Into<String>,
        event_type: impl Into<String>,
        payload: Map<String, Value>,
    ) -> Self {
        Self {
            webhook_id: webhook_id.into(),
            event_type: event_type.into(),
            payload,
            targets: Vec::new(),
            meta: None,
        }
    }

    /// Adds a delivery target.
    #[must_use]
    pub fn with_target(mut self, target_url: impl Into<String>) -> Self {
        self.targets.push(EventTarget::new(target_url));
        self
    }

    /// Sets the delivery hints.
    #[must_use]
    pub const fn with_meta(mut self, meta: EventMeta) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// Result of queueing a single event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishEventResponse {
    /// Queue status, usually `queued`.
    pub status: String,
    /// Identifier of the queued event.
    pub event_id: String,
    /// Number of targets the event was queued for.
    pub targets_count: u64,
    /// Target URLs that did not match a registered target.
    #[serde(default)]
    pub unfound_targets: Vec<String>,
    /// Queue timestamp (RFC 3339).
    pub queued_at: String,
    /// Server-side processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Per-event outcome inside a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEventResult {
    /// Identifier of the event.
    pub event_id: String,
    /// Queue status of this event.
    pub status: String,
    /// Number of targets the event was queued for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets_count: Option<u64>,
    /// Why the event was skipped or failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of queueing a batch of events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchPublishEventResponse {
    /// Queue status of the batch.
    pub status: String,
    /// Number of events submitted.
    pub batch_size: u64,
    /// Events queued for delivery.
    pub queued_count: u64,
    /// Events skipped, for example duplicates.
    pub skipped_count: u64,
    /// Events rejected.
    pub failed_count: u64,
    /// Per-event outcomes, in submission order.
    pub results: Vec<BatchEventResult>,
    /// Queue timestamp (RFC 3339).
    pub queued_at: String,
    /// Server-side processing time in milliseconds.
    pub processing_time_ms: u64,
}
