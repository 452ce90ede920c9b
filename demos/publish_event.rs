//! Publishes one event and prints the outcome.
//!
//! ```text
//! KYRAZO_API_KEY=kz_live_... cargo run --example publish_event -- <project> <source> <target-url>
//! ```
//!
//! Set `RUST_LOG=kyrazo=debug` to see each request.

use std::process::ExitCode;

use kyrazo::models::{EventMeta, Priority, PublishEventBody};
use kyrazo::{ApiError, ClientConfig, Kyrazo};
use serde_json::{Map, json};
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn setup_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [project, source, target_url] = args.as_slice() else {
        eprintln!("usage: publish_event <project-id> <source-id> <target-url>");
        return ExitCode::FAILURE;
    };

    let client = match ClientConfig::from_env().and_then(Kyrazo::from_config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut payload = Map::new();
    payload.insert("message".into(), json!("hello from the Rust SDK"));
    let event = PublishEventBody::new(source.as_str(), "demo.published", payload)
        .with_target(target_url.as_str())
        .with_meta(EventMeta {
            priority: Some(Priority::Normal),
            max_retries: Some(3),
        });

    match client.events().publish(project, &event, None).await {
        Ok(response) => {
            tracing::info!(
                event_id = %response.event_id,
                targets = response.targets_count,
                "Event published"
            );
            for url in &response.unfound_targets {
                tracing::warn!(%url, "Target URL is not registered");
            }
            ExitCode::SUCCESS
        }
        Err(ApiError::RateLimit { retry_after, .. }) => {
            tracing::error!(?retry_after, "Rate limited");
            ExitCode::from(2)
        }
        Err(e) => {
            tracing::error!(kind = %e.kind(), error = %e, "Publish failed");
            ExitCode::from(2)
        }
    }
}
