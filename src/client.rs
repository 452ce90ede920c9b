//! The `Kyrazo` facade: one configured transport, four resource clients.

use std::fmt;
use std::sync::Arc;

use crate::config::{ClientConfig, ConfigError};
use crate::resources::{EndpointsClient, EventsClient, SourcesClient, TargetsClient};
use crate::transport::{HttpClient, HttpTransport, ReqwestClient, RetryPolicy, RetryingClient};

/// HTTP client used by [`Kyrazo::new`] and [`Kyrazo::from_config`].
pub type DefaultHttpClient = RetryingClient<ReqwestClient>;

/// Entry point to the Kyrazo API.
///
/// All resource clients share one transport. Dropping the facade closes it;
/// resource clients cloned out of a dropped facade fail with
/// [`ApiError::Network`](crate::ApiError::Network) from then on.
///
/// # Example
///
/// ```no_run
/// use kyrazo::Kyrazo;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Kyrazo::new("kz_live_...")?;
/// let secret = client.targets().get_secret("proj_1", "tgt_1").await?;
/// println!("{secret}");
/// # Ok(())
/// # }
/// ```
pub struct Kyrazo<H: HttpClient = DefaultHttpClient> {
    transport: Arc<HttpTransport<H>>,
    events: EventsClient<H>,
    sources: SourcesClient<H>,
    targets: TargetsClient<H>,
    endpoints: EndpointsClient<H>,
}

impl Kyrazo {
    /// Creates a client for the production API.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the key is empty or not a valid header
    /// value, or if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        Self::from_config(ClientConfig::new(api_key)?)
    }

    /// Creates a client from an explicit configuration.
    ///
    /// Requests time out after [`ClientConfig::timeout`]; connections that
    /// cannot be established are retried up to [`ClientConfig::max_retries`]
    /// times.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ClientBuild`] if the HTTP client cannot be built.
    pub fn from_config(config: ClientConfig) -> Result<Self, ConfigError> {
        let http = ReqwestClient::with_timeout(config.timeout()).map_err(ConfigError::ClientBuild)?;
        let policy = RetryPolicy::from_max_retries(config.max_retries());
        Ok(Self::with_http_client(config, RetryingClient::new(http, policy)))
    }
}

impl<H: HttpClient> Kyrazo<H> {
    /// Creates a client over any [`HttpClient`].
    #[must_use]
    pub fn with_http_client(config: ClientConfig, http: H) -> Self {
        tracing::debug!(%config, "Creating Kyrazo client");
        let transport = Arc::new(HttpTransport::new(config, http));

        Self {
            events: EventsClient::new(Arc::clone(&transport)),
            sources: SourcesClient::new(Arc::clone(&transport)),
            targets: TargetsClient::new(Arc::clone(&transport)),
            endpoints: EndpointsClient::new(Arc::clone(&transport)),
            transport,
        }
    }

    /// Event publishing.
    #[must_use]
    pub const fn events(&self) -> &EventsClient<H> {
        &self.events
    }

    /// Webhook sources.
    #[must_use]
    pub const fn sources(&self) -> &SourcesClient<H> {
        &self.sources
    }

    /// Delivery targets.
    #[must_use]
    pub const fn targets(&self) -> &TargetsClient<H> {
        &self.targets
    }

    /// Delivery endpoints.
    #[must_use]
    pub const fn endpoints(&self) -> &EndpointsClient<H> {
        &self.endpoints
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        self.transport.config()
    }

    /// Releases the HTTP client.
    ///
    /// Returns `false` if the client was already closed. Requests issued
    /// afterwards fail with [`ApiError::Network`](crate::ApiError::Network).
    pub fn close(&self) -> bool {
        self.transport.close()
    }

    /// Returns true once the client has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.transport.is_closed()
    }
}

impl<H: HttpClient> Drop for Kyrazo<H> {
    fn drop(&mut self) {
        self.transport.close();
    }
}

impl<H: HttpClient> fmt::Debug for Kyrazo<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kyrazo")
            .field("config", self.transport.config())
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}
