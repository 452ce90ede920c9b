//! Source models: where webhooks come from.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::common::Status;

/// How a source participates in delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Receives webhooks from a provider.
    #[default]
    Receive,
    /// Publishes events to targets.
    Publish,
    /// Receives and forwards to endpoints.
    Forward,
}

/// Upstream provider of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceService {
    /// Stripe webhooks.
    Stripe,
    /// PayPal webhooks.
    Paypal,
}

/// How incoming requests to a source are authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthenticationType {
    /// Provider signature verification.
    Service,
    /// Static API key.
    ApiKey,
    /// HTTP basic auth.
    BasicAuth,
}

/// Authentication settings of a source.
///
/// The per-type settings are free-form maps owned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceAuthentication {
    /// Whether incoming requests are authenticated.
    pub enabled: bool,
    /// Authentication scheme.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AuthenticationType>,
    /// Provider signature settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<HashMap<String, String>>,
    /// Basic auth credentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_auth: Option<HashMap<String, String>>,
    /// API key settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<HashMap<String, String>>,
}

/// Redelivery settings of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRetryPolicy {
    /// Delivery attempts before giving up.
    pub max_attempts: u32,
}

/// A source as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    /// Source identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// How the source participates in delivery.
    #[serde(rename = "type")]
    pub kind: SourceType,
    /// Upstream provider.
    pub service: SourceService,
    /// Whether the source is active.
    pub status: Status,
    /// Whether received events are forwarded to endpoints.
    pub forwarding: bool,
    /// Endpoint ids events are forwarded to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Vec<String>>,
    /// Event types the source accepts; empty accepts all.
    pub event_types: Vec<String>,
    /// Redelivery settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_policy: Option<SourceRetryPolicy>,
    /// Authentication of incoming requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<SourceAuthentication>,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Last update timestamp (RFC 3339).
    pub updated_at: String,
}

/// Input for creating a source.
///
/// [`CreateSourceInput::new`] fills in the service defaults: a receiving,
/// active source without forwarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSourceInput {
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// How the source participates in delivery.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<SourceType>,
    /// Upstream provider.
    pub service: SourceService,
    /// Initial status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    /// Whether received events are forwarded to endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forwarding: Option<bool>,
    /// Endpoint ids events are forwarded to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Vec<String>>,
    /// Event types the source accepts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_types: Option<Vec<String>>,
    /// Redelivery settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_policy: Option<SourceRetryPolicy>,
    /// Authentication of incoming requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<SourceAuthentication>,
}

impl CreateSourceInput {
    /// Creates an input with the service defaults.
    #[must_use]
    pub fn new(name: impl Into<String>, service: SourceService) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind: Some(SourceType::Receive),
            service,
            status: Some(Status::Active),
            forwarding: Some(false),
            endpoints: None,
            event_types: None,
            retry_policy: None,
            authentication: None,
        }
    }

    /// Sets the source type.
    #[must_use]
    pub const fn with_type(mut self, kind: SourceType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Restricts the source to the given event types.
    #[must_use]
    pub fn with_event_types<I, S>(mut self, event_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.event_types = Some(event_types.into_iter().map(Into::into).collect());
        self
    }

    /// Forwards received events to the given endpoints.
    #[must_use]
    pub fn forwarding_to<I, S>(mut self, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.forwarding = Some(true);
        self.endpoints = Some(endpoints.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the authentication settings.
    #[must_use]
    pub fn with_authentication(mut self, authentication: SourceAuthentication) -> Self {
        self.authentication = Some(authentication);
        self
    }
}

/// Partial update of a source. Only `Some` fields are sent.
///
/// The type and provider of a source are fixed at creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSourceInput {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    /// Enable or disable forwarding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forwarding: Option<bool>,
    /// New forwarding endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Vec<String>>,
    /// New accepted event types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_types: Option<Vec<String>>,
    /// New redelivery settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_policy: Option<SourceRetryPolicy>,
}

/// Filters for listing sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceListParams {
    /// Page number, starting at 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Free-text search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Only sources with this status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    /// Sent as one `tags` parameter per tag.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}
