//! Wire-level request/response records and the client trait.

use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::{Method, StatusCode};
use serde_json::Value;
use url::Url;

use super::HttpError;

/// A fully resolved request: absolute URL, merged headers, encoded body.
///
/// Built by [`HttpTransport`](super::HttpTransport); [`HttpClient`]
/// implementations only send it. Decorators clone it to resend.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL, query string included
    pub url: Url,
    pub headers: HeaderMap,
    /// Encoded JSON payload
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a bodiless request whose lowest header layer is `headers`.
    #[must_use]
    pub const fn new(method: Method, url: Url, headers: HeaderMap) -> Self {
        Self {
            method,
            url,
            headers,
            body: None,
        }
    }

    /// Layers `headers` over the current ones. A name already present keeps
    /// only the overlaid value.
    #[must_use]
    pub fn overlay<'a, I>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (&'a HeaderName, &'a HeaderValue)>,
    {
        for (name, value) in headers {
            self.headers.insert(name, value.clone());
        }
        self
    }

    /// Encodes `body` as the JSON payload.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if `body` cannot be encoded.
    pub fn with_json(mut self, body: &Value) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }
}

/// A received response with its body fully buffered.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub const fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the parser error for an empty or malformed body.
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Returns a header value as a string, if present and visible ASCII.
    #[must_use]
    pub fn header_str(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Sends [`HttpRequest`]s.
///
/// Implemented by [`ReqwestClient`](super::ReqwestClient), by the
/// [`RetryingClient`](super::RetryingClient) decorator and by test doubles.
pub trait HttpClient: Send + Sync {
    /// Sends `req` and buffers the response.
    ///
    /// Any response that was received is returned as `Ok`, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when no response could be read.
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}
