//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional so a file can hold only the values that differ
/// from the defaults; the API key may come from the environment instead.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Client connection section
    #[serde(default)]
    pub client: ClientSection,
}

/// Client connection section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    /// API key sent as a bearer credential
    pub api_key: Option<String>,

    /// Base URL of the API
    pub base_url: Option<String>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,

    /// Transport-level retries for failed connections
    pub max_retries: Option<u32>,

    /// Extra headers sent on every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# Kyrazo client configuration

[client]
# API key (required here or via the KYRAZO_API_KEY environment variable)
# api_key = "kz_live_..."

# Base URL of the API (default: https://api.kyrazo.com)
# Can also be set with the KYRAZO_BASE_URL environment variable.
# base_url = "https://api.kyrazo.com"

# Request timeout in seconds (default: 30)
# timeout = 30

# Retries for requests whose connection could not be established (default: 3)
# max_retries = 3

# Extra headers sent on every request.
# Authorization, Content-Type and User-Agent are always set by the client.
# [client.headers]
# X-Team = "payments"
"#
    .to_string()
}
