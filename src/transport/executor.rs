//! Request descriptors and the `execute` pipeline.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderName, HeaderValue, USER_AGENT};
use http::{HeaderMap, Method};
use serde::Serialize;
use serde_json::Value;

use crate::config::{ClientConfig, defaults};
use crate::error::{ApiError, code};

use super::response::map_response;
use super::{HttpClient, HttpError, HttpRequest};

/// A request built by a resource client, before authentication is added.
///
/// Serialization problems are recorded rather than returned, so builders can
/// chain freely; [`HttpTransport::execute`] reports them as typed errors
/// without touching the network.
#[derive(Debug)]
pub struct ApiRequest {
    method: Method,
    path: String,
    body: Option<Value>,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    rejection: Option<Rejection>,
}

/// Why a request was rejected before sending.
#[derive(Debug)]
enum Rejection {
    Body(serde_json::Error),
    Query(String),
    Header { name: HeaderName, reason: String },
}

impl ApiRequest {
    /// Creates a request for `path`, which is appended to the base URL.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
            headers: HeaderMap::new(),
            rejection: None,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Creates a PUT request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Creates a PATCH request.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => self.body = Some(value),
            Err(e) => self.reject(Rejection::Body(e)),
        }
        self
    }

    /// Appends query parameters from a serializable struct or map.
    ///
    /// Members are appended in key order. `null` members are skipped, scalars
    /// are rendered as text and array members repeat the key once per element.
    #[must_use]
    pub fn with_query<T: Serialize + ?Sized>(mut self, params: &T) -> Self {
        match serde_json::to_value(params) {
            Ok(Value::Object(map)) => {
                for (key, value) in map {
                    self.push_query_value(key, value);
                }
            }
            Ok(Value::Null) => {}
            Ok(other) => self.reject(Rejection::Query(format!(
                "query parameters must serialize to an object, got {other}"
            ))),
            Err(e) => self.reject(Rejection::Query(e.to_string())),
        }
        self
    }

    /// Appends a single query parameter.
    #[must_use]
    pub fn with_query_pair(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds an extra header.
    ///
    /// Extra headers cannot replace `Authorization`, `Content-Type` or
    /// `User-Agent`; the transport always sets those last.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Adds an extra header from a string, recording a rejection if the
    /// value is not a valid header value.
    #[must_use]
    pub fn with_header_str(mut self, name: HeaderName, value: &str) -> Self {
        match HeaderValue::from_str(value) {
            Ok(value) => self.headers.insert(name, value),
            Err(e) => {
                self.reject(Rejection::Header {
                    name,
                    reason: e.to_string(),
                });
                None
            }
        };
        self
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the path relative to the base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the JSON body, if set.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Returns the query parameters in insertion order.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Returns the extra headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn reject(&mut self, rejection: Rejection) {
        // Keep the first problem; later ones are usually consequences of it.
        if self.rejection.is_none() {
            self.rejection = Some(rejection);
        }
    }

    fn push_query_value(&mut self, key: String, value: Value) {
        match value {
            Value::Null => {}
            Value::String(s) => self.query.push((key, s)),
            Value::Array(items) => {
                for item in items {
                    self.push_query_value(key.clone(), item);
                }
            }
            other => self.query.push((key, other.to_string())),
        }
    }
}

impl Rejection {
    fn into_error(self) -> ApiError {
        match self {
            Self::Body(e) => ApiError::generic(
                format!("Failed to serialize request body: {e}"),
                code::INVALID_REQUEST,
            ),
            Self::Query(reason) => ApiError::generic(
                format!("Failed to serialize query parameters: {reason}"),
                code::INVALID_REQUEST,
            ),
            Self::Header { name, reason } => ApiError::generic(
                format!("Invalid value for header '{name}': {reason}"),
                code::INVALID_HEADER,
            ),
        }
    }
}

/// Issues authenticated requests and classifies every outcome.
///
/// Owns the [`ClientConfig`] and the underlying [`HttpClient`]. All resource
/// clients share one instance through an [`Arc`]. Closing releases the HTTP
/// client; requests issued afterwards fail with [`ApiError::Network`].
#[derive(Debug)]
pub struct HttpTransport<H> {
    config: ClientConfig,
    client: Mutex<Option<Arc<H>>>,
}

impl<H> HttpTransport<H> {
    /// Creates a transport over `client`.
    #[must_use]
    pub fn new(config: ClientConfig, client: H) -> Self {
        Self {
            config,
            client: Mutex::new(Some(Arc::new(client))),
        }
    }

    /// Returns the connection configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Releases the HTTP client.
    ///
    /// Returns `true` if this call closed the transport and `false` if it was
    /// already closed. In-flight requests keep their own handle and finish.
    pub fn close(&self) -> bool {
        let released = self
            .client
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if released.is_some() {
            tracing::debug!(base_url = %self.config.base_url(), "Transport closed");
            true
        } else {
            false
        }
    }

    /// Returns true once [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.client
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    fn handle(&self) -> Option<Arc<H>> {
        self.client
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Builds the wire request: URL, query, headers and body.
    fn build_request(&self, request: ApiRequest) -> Result<HttpRequest, ApiError> {
        if let Some(rejection) = request.rejection {
            return Err(rejection.into_error());
        }

        let base = self.config.base_url().as_str().trim_end_matches('/');
        let separator = if request.path.starts_with('/') { "" } else { "/" };
        let raw = format!("{base}{separator}{}", request.path);

        let mut url = url::Url::parse(&raw)
            .map_err(|e| ApiError::network(HttpError::InvalidUrl(format!("{raw}: {e}"))))?;

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }

        let http_request = HttpRequest::new(request.method, url, self.config.headers().clone())
            .overlay(&request.headers)
            .overlay(&fixed_headers(&self.config));

        match request.body {
            Some(body) => http_request.with_json(&body).map_err(|e| {
                ApiError::generic(
                    format!("Failed to serialize request body: {e}"),
                    code::INVALID_REQUEST,
                )
            }),
            None => Ok(http_request),
        }
    }
}

/// Headers every request carries, applied over all other layers.
fn fixed_headers(config: &ClientConfig) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(3);
    headers.insert(AUTHORIZATION, config.authorization().clone());
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(defaults::USER_AGENT));
    headers
}

impl<H: HttpClient> HttpTransport<H> {
    /// Sends `request` and maps the outcome.
    ///
    /// Returns `Ok(None)` for 204 No Content and `Ok(Some(value))` for any
    /// other 2xx response with a JSON body.
    ///
    /// # Errors
    ///
    /// - Non-2xx responses are classified by status into an [`ApiError`].
    /// - Transport failures, including use after [`close`](Self::close),
    ///   become [`ApiError::Network`].
    /// - Undecodable success bodies and unserializable requests become
    ///   [`ApiError::Generic`].
    pub async fn execute(&self, request: ApiRequest) -> Result<Option<Value>, ApiError> {
        let Some(client) = self.handle() else {
            return Err(ApiError::network(HttpError::Closed));
        };

        let method = request.method.clone();
        let path = request.path.clone();
        let http_request = self.build_request(request)?;
        let url = http_request.url.clone();

        tracing::debug!(%method, %path, "Sending request");
        let started = Instant::now();

        let response = client.request(http_request).await.map_err(|e| {
            tracing::warn!(%method, %path, error = %e, "Request failed before a response");
            ApiError::network(e)
        })?;

        tracing::debug!(
            %method,
            %path,
            status = response.status.as_u16(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Received response"
        );

        map_response(&response, &url).inspect_err(|e| {
            tracing::warn!(%method, %path, kind = %e.kind(), error = %e, "Request returned an error");
        })
    }
}
