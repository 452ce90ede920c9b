//! The validated connection configuration shared by every request.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use http::header::{HeaderName, HeaderValue};
use http::HeaderMap;
use url::Url;

use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Immutable connection settings for a [`Kyrazo`](crate::Kyrazo) client.
///
/// Every value is validated when it is set, so a `ClientConfig` that exists
/// is always usable. Once handed to the client it is never mutated.
///
/// # Example
///
/// ```
/// use kyrazo::config::ClientConfig;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), kyrazo::config::ConfigError> {
/// let config = ClientConfig::new("kz_test_123")?
///     .with_base_url("https://staging.kyrazo.com")?
///     .with_timeout(Duration::from_secs(10))?
///     .with_max_retries(5);
///
/// assert_eq!(config.max_retries(), 5);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    authorization: HeaderValue,
    base_url: Url,
    timeout: Duration,
    max_retries: u32,
    headers: HeaderMap,
}

impl ClientConfig {
    /// Creates a configuration with production defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiKey`] if the key is blank or contains
    /// characters that cannot appear in an HTTP header.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        let authorization = bearer_header(&api_key)?;

        Ok(Self {
            api_key,
            authorization,
            base_url: parse_base_url(defaults::BASE_URL)?,
            timeout: defaults::timeout(),
            max_retries: defaults::MAX_RETRIES,
            headers: HeaderMap::new(),
        })
    }

    /// Sets the base URL of the API.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] unless the URL is absolute http(s).
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    /// Sets the per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDuration`] if the timeout is zero.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::InvalidDuration {
                field: field::TIMEOUT,
                reason: "must be greater than 0".to_string(),
            });
        }
        self.timeout = timeout;
        Ok(self)
    }

    /// Sets how many times a request whose connection failed is retried.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Adds a header sent on every request.
    ///
    /// `Authorization`, `Content-Type` and `User-Agent` are always overwritten
    /// by the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or value is not valid in an HTTP header.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, ConfigError> {
        let header_name = parse_header_name(name)?;
        let header_value = parse_header_value(name, value)?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Builds a configuration from a parsed TOML file.
    ///
    /// File values win; missing ones fall back to the `KYRAZO_API_KEY` and
    /// `KYRAZO_BASE_URL` environment variables, then to the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is available or any value is invalid.
    pub fn from_toml(toml: &TomlConfig) -> Result<Self, ConfigError> {
        Self::resolve(toml, |name| std::env::var(name).ok())
    }

    /// Builds a configuration from environment variables only.
    ///
    /// # Errors
    ///
    /// Returns an error if `KYRAZO_API_KEY` is unset or any value is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_toml(&TomlConfig::default())
    }

    /// Loads a TOML file and builds a configuration from it.
    ///
    /// A leading `~` in the path is expanded to the home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// resulting configuration is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let toml = TomlConfig::load(&expand_tilde(path))?;
        Self::from_toml(&toml)
    }

    /// Merges file values with a variable lookup, file first.
    pub(crate) fn resolve<F>(toml: &TomlConfig, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let section = &toml.client;

        let api_key = section
            .api_key
            .clone()
            .or_else(|| lookup(defaults::ENV_API_KEY))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::API_KEY,
                    "Set client.api_key in the config file or the KYRAZO_API_KEY environment variable",
                )
            })?;

        let mut config = Self::new(api_key)?;

        if let Some(base_url) = section
            .base_url
            .clone()
            .or_else(|| lookup(defaults::ENV_BASE_URL))
        {
            config = config.with_base_url(&base_url)?;
        }

        if let Some(secs) = section.timeout {
            config = config.with_timeout(Duration::from_secs(secs))?;
        }

        if let Some(retries) = section.max_retries {
            config = config.with_max_retries(retries);
        }

        for (name, value) in &section.headers {
            config = config.with_header(name, value)?;
        }

        Ok(config)
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the precomputed `Authorization` header value.
    #[must_use]
    pub const fn authorization(&self) -> &HeaderValue {
        &self.authorization
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the number of connection retries.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the extra headers sent on every request.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &mask(&self.api_key))
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl fmt::Display for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ base_url: {}, api_key: {}, timeout: {}s, max_retries: {}, headers: {} }}",
            self.base_url,
            mask(&self.api_key),
            self.timeout.as_secs(),
            self.max_retries,
            self.headers.len(),
        )
    }
}

// Helper functions

/// Keeps at most the first four characters of a secret.
fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}***")
}

fn bearer_header(api_key: &str) -> Result<HeaderValue, ConfigError> {
    if api_key.trim().is_empty() {
        return Err(ConfigError::InvalidApiKey {
            reason: "must not be empty".to_string(),
        });
    }

    let mut value = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
        ConfigError::InvalidApiKey {
            reason: e.to_string(),
        }
    })?;
    value.set_sensitive(true);
    Ok(value)
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: "must be an absolute base URL".to_string(),
        });
    }

    Ok(url)
}

fn parse_header_name(name: &str) -> Result<HeaderName, ConfigError> {
    name.parse::<HeaderName>()
        .map_err(|e| ConfigError::InvalidHeaderName {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

fn parse_header_value(name: &str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeaderValue {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// Expands a leading `~` to the user's home directory.
pub(crate) fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}
