//! Shared test fixtures for transport and resource tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use http::{HeaderMap, HeaderValue, StatusCode};
use serde_json::Value;

use crate::config::ClientConfig;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse, HttpTransport};

/// Mock HTTP client that replays a scripted sequence of outcomes and records
/// every request it receives.
#[derive(Debug, Default)]
pub struct MockClient {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockClient {
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    /// A client that answers once with `status` and a JSON body.
    pub fn json(status: u16, body: Value) -> Self {
        Self::new(vec![Ok(json_response(status, &body))])
    }

    /// A client that answers once with `status` and no body.
    pub fn empty(status: u16) -> Self {
        Self::new(vec![Ok(response(status, HeaderMap::new(), Vec::new()))])
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The single request this client received.
    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock client ran out of responses")
    }
}

impl HttpClient for Arc<MockClient> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(req).await
    }
}

pub fn response(status: u16, headers: HeaderMap, body: Vec<u8>) -> HttpResponse {
    HttpResponse::new(StatusCode::from_u16(status).unwrap(), headers, body)
}

pub fn json_response(status: u16, body: &Value) -> HttpResponse {
    let mut headers = HeaderMap::new();
    headers.insert(
        http::header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response(status, headers, serde_json::to_vec(body).unwrap())
}

pub fn test_config() -> ClientConfig {
    ClientConfig::new("kz_test_123")
        .unwrap()
        .with_base_url("https://api.test.kyrazo.com")
        .unwrap()
}

/// A transport over a shared mock, so tests can inspect requests afterwards.
pub fn transport(mock: MockClient) -> (Arc<HttpTransport<Arc<MockClient>>>, Arc<MockClient>) {
    let mock = Arc::new(mock);
    let transport = Arc::new(HttpTransport::new(test_config(), Arc::clone(&mock)));
    (transport, mock)
}

/// Parses the JSON body of a captured request.
pub fn body_json(request: &HttpRequest) -> Value {
    serde_json::from_slice(request.body.as_deref().expect("request had no body")).unwrap()
}
