//! Integration tests for the Kyrazo client against a mock HTTP server.
//!
//! These tests use wiremock to simulate the service and exercise the full
//! stack: configuration, reqwest transport, error mapping and decoding.

use std::time::Duration;

use kyrazo::models::{
    CreateEndpointInput, DeliveryConfig, PublishEventBody, SourceListParams, Status,
};
use kyrazo::{ApiError, ClientConfig, ErrorKind, Kyrazo};
use serde_json::{Map, json};
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "kz_test_123";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(API_KEY)
        .unwrap()
        .with_base_url(&server.uri())
        .unwrap()
}

fn client(server: &MockServer) -> Kyrazo {
    init_tracing();
    Kyrazo::from_config(config(server)).unwrap()
}

fn error_json(message: &str, code: &str) -> serde_json::Value {
    json!({"error": {"message": message, "code": code}})
}

#[tokio::test]
async fn test_create_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/endpoints/proj_1"))
        .and(header("authorization", "Bearer kz_test_123"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "name": "Orders",
            "status": "active",
            "url": "https://example.com/hook",
            "enabled": true,
            "config": {"timeout": 5000, "retryCount": 3, "rateLimitDuration": 60}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "data": {
                "_id": "end_123",
                "name": "Orders",
                "status": "active",
                "url": "https://example.com/hook",
                "description": null,
                "enabled": true,
                "config": {"timeout": 5000, "retryCount": 3, "rateLimit": null, "rateLimitDuration": 60},
                "customHeaders": null,
                "createdAt": "2026-01-01T00:00:00Z",
                "updatedAt": "2026-01-01T00:00:00Z"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let input = CreateEndpointInput::new(
        "Orders",
        "https://example.com/hook",
        Status::Active,
        DeliveryConfig::new(5000, 3, 60),
    );

    let endpoint = client(&server)
        .endpoints()
        .create("proj_1", &input)
        .await
        .unwrap();

    assert_eq!(endpoint.id, "end_123");
    assert_eq!(endpoint.description, None);
    assert_eq!(endpoint.config.rate_limit, None);
}

#[tokio::test]
async fn test_publish_event_with_idempotency_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/events/proj_1/publish"))
        .and(header("idempotency-key", "order-1-created"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "status": "queued",
            "eventId": "evt_123",
            "targetsCount": 1,
            "unfoundTargets": [],
            "queuedAt": "2026-01-01T00:00:00Z",
            "processingTimeMs": 9
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut payload = Map::new();
    payload.insert("orderId".into(), json!("ord_1"));
    let event = PublishEventBody::new("src_1", "order.created", payload)
        .with_target("https://a.example.com");

    let response = client(&server)
        .events()
        .publish("proj_1", &event, Some("order-1-created"))
        .await
        .unwrap();

    assert_eq!(response.event_id, "evt_123");
}

#[tokio::test]
async fn test_publish_event_without_idempotency_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/events/proj_1/publish"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "queued",
            "eventId": "evt_124",
            "targetsCount": 0,
            "queuedAt": "2026-01-01T00:00:00Z",
            "processingTimeMs": 3
        })))
        .mount(&server)
        .await;

    let event = PublishEventBody::new("src_1", "order.created", Map::new());
    client(&server)
        .events()
        .publish("proj_1", &event, None)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("idempotency-key"));
}

#[tokio::test]
async fn test_delete_target() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/targets/proj_1/tgt_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let deleted = client(&server)
        .targets()
        .delete("proj_1", "tgt_1")
        .await
        .unwrap();

    assert!(deleted);
}

#[tokio::test]
async fn test_get_target_secret() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/targets/proj_1/tgt_1/secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"secret": "whsec_12345"}
        })))
        .mount(&server)
        .await;

    let secret = client(&server)
        .targets()
        .get_secret("proj_1", "tgt_1")
        .await
        .unwrap();

    assert_eq!(secret, "whsec_12345");
}

#[tokio::test]
async fn test_list_sources_with_filters() {
    let server = MockServer::start().await;

    let page = json!({
        "data": [{"_id": "src_1", "name": "S1"}, {"_id": "src_2", "name": "S2"}],
        "pagination": {"page": 2, "limit": 10, "total": 12}
    });
    Mock::given(method("GET"))
        .and(path("/v1/sources/proj_1"))
        .and(query_param("page", "2"))
        .and(query_param("q", "stripe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let params = SourceListParams {
        page: Some(2),
        q: Some("stripe".into()),
        ..SourceListParams::default()
    };

    let result = client(&server)
        .sources()
        .list("proj_1", Some(&params))
        .await
        .unwrap();

    assert_eq!(result, page);
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    client(&server).endpoints().list("proj_1", None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let user_agent = requests[0].headers.get("user-agent").unwrap().to_str().unwrap();
    assert!(user_agent.starts_with("kyrazo-rust-sdk/"));
}

#[tokio::test]
async fn test_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/targets/proj_1/tgt_1/secret"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(error_json("Invalid API Key", "UNAUTHORIZED")),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .targets()
        .get_secret("proj_1", "tgt_1")
        .await
        .unwrap_err();

    match err {
        ApiError::Authentication { message, code } => {
            assert_eq!(message, "Invalid API Key");
            assert_eq!(code.as_deref(), Some("UNAUTHORIZED"));
        }
        other => panic!("Expected authentication error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_error_reads_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/events/proj_1/publish"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "120")
                .insert_header("X-RateLimit-Remaining", "5")
                .set_body_json(json!({"error": {"message": "Too many requests"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let event = PublishEventBody::new("src_1", "order.created", Map::new());
    let err = client(&server)
        .events()
        .publish("proj_1", &event, None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RateLimit);
    assert_eq!(err.retry_after(), Some(Duration::from_secs(120)));
    assert_eq!(err.remaining(), Some(5));
    assert_eq!(err.code(), Some("RATE_LIMIT_EXCEEDED"));
}

#[tokio::test]
async fn test_validation_error() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/v1/sources/proj_1/src_1"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(error_json("Name too long", "INVALID_NAME")),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .sources()
        .update("proj_1", "src_1", &kyrazo::models::UpdateSourceInput::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.status(), Some(http::StatusCode::BAD_REQUEST));
    assert_eq!(err.code(), Some("INVALID_NAME"));
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/endpoints/proj_1"))
        .respond_with(ResponseTemplate::new(503).set_body_json(error_json("Maintenance", "DOWN")))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .endpoints()
        .list("proj_1", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(err.status(), Some(http::StatusCode::SERVICE_UNAVAILABLE));
}

#[tokio::test]
async fn test_non_json_error_body_uses_status_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client(&server)
        .sources()
        .get("proj_1", "src_1")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Server);
    assert!(err.message().starts_with("Server error '502 Bad Gateway' for url '"));
    assert!(err.message().contains("/v1/sources/proj_1/src_1"));
    assert_eq!(err.code(), Some("UNKNOWN_ERROR"));
}

#[tokio::test]
async fn test_not_found_is_generic() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(error_json("Not found", "NOT_FOUND")))
        .mount(&server)
        .await;

    let err = client(&server)
        .targets()
        .get("proj_1", "missing")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Generic);
    assert_eq!(err.status(), Some(http::StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": []}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = config(&server)
        .with_timeout(Duration::from_millis(200))
        .unwrap();
    let client = Kyrazo::from_config(config).unwrap();

    let err = client.sources().list("proj_1", None).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(err.message().starts_with("Request failed: "));
    assert_eq!(err.code(), None);
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    init_tracing();
    // Nothing listens on port 1 on loopback.
    let config = ClientConfig::new(API_KEY)
        .unwrap()
        .with_base_url("http://127.0.0.1:1")
        .unwrap()
        .with_max_retries(0);
    let client = Kyrazo::from_config(config).unwrap();

    let err = client.targets().delete("proj_1", "tgt_1").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(err.message().starts_with("Request failed: "));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_closed_client_fails_without_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(client.close());

    let err = client.sources().list("proj_1", None).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(err.message().contains("closed"));
}
