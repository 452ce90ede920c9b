//! Target models: the URLs events are delivered to.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::common::DeliveryConfig;

/// HTTP method a target is called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetMethod {
    /// POST (the default).
    #[default]
    Post,
    /// PUT.
    Put,
    /// PATCH.
    Patch,
    /// GET.
    Get,
    /// DELETE.
    Delete,
}

/// Delivery settings of a target.
pub type TargetConfig = DeliveryConfig;

/// A delivery target as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    /// Target identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Delivery URL.
    pub url: String,
    /// HTTP method used for delivery.
    pub method: TargetMethod,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether deliveries are enabled.
    pub enabled: bool,
    /// Delivery settings.
    pub config: TargetConfig,
    /// Headers added to each delivery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_headers: Option<HashMap<String, String>>,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Last update timestamp (RFC 3339).
    pub updated_at: String,
}

/// Input for creating a target.
///
/// [`CreateTargetInput::new`] fills in the service defaults: `POST` and
/// enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTargetInput {
    /// Display name.
    pub name: String,
    /// Delivery URL.
    pub url: String,
    /// HTTP method used for delivery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<TargetMethod>,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether deliveries are enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Delivery settings.
    pub config: TargetConfig,
    /// Headers added to each delivery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_headers: Option<HashMap<String, String>>,
}

impl CreateTargetInput {
    /// Creates an input with the service defaults.
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>, config: TargetConfig) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            method: Some(TargetMethod::Post),
            description: None,
            enabled: Some(true),
            config,
            custom_headers: None,
        }
    }

    /// Sets the HTTP method.
    #[must_use]
    pub const fn with_method(mut self, method: TargetMethod) -> Self {
        self.method = Some(method);
        self
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

/// Partial update of a target. Only `Some` fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTargetInput {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New delivery URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// New HTTP method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<TargetMethod>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Enable or disable deliveries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// New delivery settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<TargetConfig>,
    /// New delivery headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_headers: Option<HashMap<String, String>>,
}

/// Filters for listing targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TargetListParams {
    /// Page number, starting at 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Free-text search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Only enabled or only disabled targets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Body of the target status toggle.
#[derive(Debug, Serialize)]
pub(crate) struct TargetStatusBody {
    pub enabled: bool,
}

/// Payload of the target secret endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct TargetSecret {
    pub secret: String,
}
