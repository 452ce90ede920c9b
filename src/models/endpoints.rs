//! Endpoint models.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::common::{DeliveryConfig, Status};

/// Delivery settings of an endpoint.
pub type EndpointConfig = DeliveryConfig;

/// An endpoint as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Endpoint identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether the endpoint is active.
    pub status: Status,
    /// Delivery URL.
    pub url: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether deliveries are enabled.
    pub enabled: bool,
    /// Delivery settings.
    pub config: EndpointConfig,
    /// Headers added to each delivery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_headers: Option<HashMap<String, String>>,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Last update timestamp (RFC 3339).
    pub updated_at: String,
}

/// Input for creating an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEndpointInput {
    /// Display name.
    pub name: String,
    /// Initial status.
    pub status: Status,
    /// Delivery URL.
    pub url: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether deliveries are enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Delivery settings.
    pub config: EndpointConfig,
    /// Headers added to each delivery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_headers: Option<HashMap<String, String>>,
}

impl CreateEndpointInput {
    /// Creates an enabled endpoint input.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        status: Status,
        config: EndpointConfig,
    ) -> Self {
        Self {
            name: name.into(),
            status,
            url: url.into(),
            description: None,
            enabled: Some(true),
            config,
            custom_headers: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the headers added to each delivery.
    #[must_use]
    pub fn with_custom_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.custom_headers = Some(headers);
        self
    }
}

/// Partial update of an endpoint. Only `Some` fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEndpointInput {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    /// New delivery URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Enable or disable deliveries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// New delivery settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<EndpointConfig>,
    /// New delivery headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_headers: Option<HashMap<String, String>>,
}

/// Filters for listing endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EndpointListParams {
    /// Page number, starting at 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Free-text search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Only endpoints with this status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}
