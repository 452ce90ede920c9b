//! Tests for wire names, defaults and omission of unset fields.

use std::collections::HashMap;

use serde_json::{Map, Value, json};

use super::*;

fn config() -> DeliveryConfig {
    DeliveryConfig::new(5000, 3, 60)
}

mod endpoints {
    use super::*;

    #[test]
    fn create_input_omits_unset_optionals() {
        let input = CreateEndpointInput::new("Orders", "https://example.com/hook", Status::Active, config());

        let value = serde_json::to_value(&input).unwrap();

        assert_eq!(
            value,
            json!({
                "name": "Orders",
                "status": "active",
                "url": "https://example.com/hook",
                "enabled": true,
                "config": {"timeout": 5000, "retryCount": 3, "rateLimitDuration": 60}
            })
        );
    }

    #[test]
    fn endpoint_decodes_service_shape() {
        let endpoint: Endpoint = serde_json::from_value(json!({
            "_id": "end_123",
            "name": "Orders",
            "status": "inactive",
            "url": "https://example.com/hook",
            "description": null,
            "enabled": false,
            "config": {"timeout": 5000, "retryCount": 3, "rateLimit": null, "rateLimitDuration": 60},
            "customHeaders": {"X-Env": "prod"},
            "createdAt": "2026-01-01T00:00:00Z",
            "updatedAt": "2026-01-02T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(endpoint.id, "end_123");
        assert_eq!(endpoint.status, Status::Inactive);
        assert_eq!(endpoint.description, None);
        assert_eq!(endpoint.config.rate_limit, None);
        assert_eq!(
            endpoint.custom_headers.unwrap().get("X-Env").map(String::as_str),
            Some("prod")
        );
    }

    #[test]
    fn empty_update_serializes_to_empty_object() {
        let value = serde_json::to_value(UpdateEndpointInput::default()).unwrap();

        assert_eq!(value, json!({}));
    }
}

mod targets {
    use super::*;

    #[test]
    fn create_input_applies_defaults() {
        let input = CreateTargetInput::new("Billing", "https://billing.example.com", config());

        let value = serde_json::to_value(&input).unwrap();

        assert_eq!(value["method"], "POST");
        assert_eq!(value["enabled"], true);
        assert!(value.get("description").is_none());
        assert!(value.get("customHeaders").is_none());
    }

    #[test]
    fn create_input_builders_set_fields() {
        let headers = HashMap::from([("X-Signature".to_string(), "abc".to_string())]);
        let input = CreateTargetInput::new("Billing", "https://billing.example.com", config().with_rate_limit(10))
            .with_method(TargetMethod::Put)
            .with_description("Billing sink")
            .with_custom_headers(headers);

        let value = serde_json::to_value(&input).unwrap();

        assert_eq!(value["method"], "PUT");
        assert_eq!(value["description"], "Billing sink");
        assert_eq!(value["customHeaders"]["X-Signature"], "abc");
        assert_eq!(value["config"]["rateLimit"], 10);
    }

    #[test]
    fn partial_update_sends_only_set_fields() {
        let update = UpdateTargetInput {
            enabled: Some(false),
            ..UpdateTargetInput::default()
        };

        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"enabled": false}));
    }

    #[test]
    fn unknown_method_is_rejected() {
        let result = serde_json::from_value::<TargetMethod>(json!("TRACE"));

        assert!(result.is_err());
    }

    #[test]
    fn list_params_skip_unset_filters() {
        let params = TargetListParams {
            page: Some(2),
            enabled: Some(true),
            ..TargetListParams::default()
        };

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"page": 2, "enabled": true})
        );
    }
}

mod sources {
    use super::*;

    #[test]
    fn create_input_applies_defaults_and_renames_type() {
        let input = CreateSourceInput::new("Stripe prod", SourceService::Stripe)
            .with_event_types(["charge.succeeded", "charge.failed"]);

        let value = serde_json::to_value(&input).unwrap();

        assert_eq!(
            value,
            json!({
                "name": "Stripe prod",
                "type": "receive",
                "service": "stripe",
                "status": "active",
                "forwarding": false,
                "eventTypes": ["charge.succeeded", "charge.failed"]
            })
        );
    }

    #[test]
    fn forwarding_to_enables_forwarding() {
        let input = CreateSourceInput::new("PayPal", SourceService::Paypal)
            .with_type(SourceType::Forward)
            .forwarding_to(["end_1", "end_2"]);

        let value = serde_json::to_value(&input).unwrap();

        assert_eq!(value["type"], "forward");
        assert_eq!(value["forwarding"], true);
        assert_eq!(value["endpoints"], json!(["end_1", "end_2"]));
    }

    #[test]
    fn authentication_uses_snake_case_type() {
        let auth = SourceAuthentication {
            enabled: true,
            kind: Some(AuthenticationType::BasicAuth),
            basic_auth: Some(HashMap::from([("username".to_string(), "ops".to_string())])),
            ..SourceAuthentication::default()
        };

        let value = serde_json::to_value(&auth).unwrap();

        assert_eq!(
            value,
            json!({"enabled": true, "type": "basic_auth", "basicAuth": {"username": "ops"}})
        );
    }

    #[test]
    fn source_decodes_service_shape() {
        let source: Source = serde_json::from_value(json!({
            "_id": "src_1",
            "name": "S1",
            "type": "publish",
            "service": "paypal",
            "status": "active",
            "forwarding": false,
            "eventTypes": [],
            "retryPolicy": {"maxAttempts": 5},
            "createdAt": "2026-01-01T00:00:00Z",
            "updatedAt": "2026-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(source.kind, SourceType::Publish);
        assert_eq!(source.service, SourceService::Paypal);
        assert_eq!(source.retry_policy, Some(SourceRetryPolicy { max_attempts: 5 }));
        assert_eq!(source.endpoints, None);
    }

    #[test]
    fn tags_are_omitted_when_empty() {
        let params = SourceListParams {
            q: Some("stripe".into()),
            ..SourceListParams::default()
        };

        assert_eq!(serde_json::to_value(&params).unwrap(), json!({"q": "stripe"}));
    }
}

mod events {
    use super::*;

    fn payload() -> Map<String, Value> {
        let mut payload = Map::new();
        payload.insert("orderId".into(), json!("ord_1"));
        payload.insert("amount".into(), json!(4200));
        payload
    }

    #[test]
    fn publish_body_uses_camel_case() {
        let body = PublishEventBody::new("src_1", "order.created", payload())
            .with_target("https://a.example.com")
            .with_meta(EventMeta {
                priority: Some(Priority::High),
                max_retries: None,
            });

        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(
            value,
            json!({
                "webhookId": "src_1",
                "eventType": "order.created",
                "payload": {"orderId": "ord_1", "amount": 4200},
                "targets": [{"targetUrl": "https://a.example.com"}],
                "meta": {"priority": "high"}
            })
        );
    }

    #[test]
    fn publish_body_without_meta_omits_it() {
        let value = serde_json::to_value(PublishEventBody::new("src_1", "x", Map::new())).unwrap();

        assert!(value.get("meta").is_none());
        assert_eq!(value["targets"], json!([]));
    }

    #[test]
    fn publish_response_defaults_unfound_targets() {
        let response: PublishEventResponse = serde_json::from_value(json!({
            "status": "queued",
            "eventId": "evt_123",
            "targetsCount": 1,
            "queuedAt": "2026-01-01T00:00:00Z",
            "processingTimeMs": 12
        }))
        .unwrap();

        assert_eq!(response.event_id, "evt_123");
        assert!(response.unfound_targets.is_empty());
    }

    #[test]
    fn batch_response_decodes_per_event_results() {
        let response: BatchPublishEventResponse = serde_json::from_value(json!({
            "status": "partial",
            "batchSize": 2,
            "queuedCount": 1,
            "skippedCount": 0,
            "failedCount": 1,
            "results": [
                {"eventId": "evt_1", "status": "queued", "targetsCount": 2},
                {"eventId": "evt_2", "status": "failed", "error": "unknown webhook"}
            ],
            "queuedAt": "2026-01-01T00:00:00Z",
            "processingTimeMs": 30
        }))
        .unwrap();

        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].targets_count, Some(2));
        assert_eq!(response.results[1].error.as_deref(), Some("unknown webhook"));
    }
}
