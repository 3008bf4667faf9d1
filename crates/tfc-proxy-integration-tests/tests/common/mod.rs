//! Common test utilities for the proxy integration tests
//!
//! This module provides:
//! - A Discord webhook stand-in built on wiremock
//! - Router construction from a real [`ProxyConfig`]
//! - Sample Terraform Cloud notification bodies

use axum::{
    body::Body,
    http::{Method, Request},
    Router,
};
use tfc_proxy_api::{create_router, AppState, ProxyConfig, WEBHOOK_PATH};
use tfc_proxy_core::{authenticator::compute_signature, SIGNATURE_HEADER};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Path of the Discord webhook on the mock server.
pub const DISCORD_HOOK_PATH: &str = "/api/webhooks/987654/hook-token";

/// Shared secret used by tests that enable verification.
#[allow(dead_code)]
pub const SECRET: &str = "integration-secret";

// ============================================================================
// Discord stand-in
// ============================================================================

/// Start a mock Discord server that answers every POST to
/// [`DISCORD_HOOK_PATH`] with `status`.
pub async fn start_discord(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DISCORD_HOOK_PATH))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

/// JSON bodies the mock Discord server received.
#[allow(dead_code)]
pub async fn received_messages(server: &MockServer) -> Vec<serde_json::Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| serde_json::from_slice(&r.body).expect("proxy sent invalid JSON"))
        .collect()
}

// ============================================================================
// Proxy construction
// ============================================================================

/// Configuration pointing at the mock Discord server.
#[allow(dead_code)]
pub fn config_for(server: &MockServer, secret: Option<&str>) -> ProxyConfig {
    let config = ProxyConfig::new(format!("{}{}", server.uri(), DISCORD_HOOK_PATH));
    match secret {
        Some(secret) => config.with_auth_token(secret),
        None => config,
    }
}

/// Router wired exactly as the service wires it.
pub fn proxy_router(server: &MockServer, secret: Option<&str>) -> Router {
    create_router(AppState::from_config(&config_for(server, secret)))
}

/// A `POST /webhook` request, signed with `secret` when given.
#[allow(dead_code)]
pub fn notification_request(body: &str, secret: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(WEBHOOK_PATH)
        .header("content-type", "application/json");
    if let Some(secret) = secret {
        builder = builder.header(SIGNATURE_HEADER, compute_signature(secret, body.as_bytes()));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

// ============================================================================
// Sample payloads
// ============================================================================

/// A completed-run notification as Terraform Cloud sends it.
#[allow(dead_code)]
pub fn run_notification(run_status: &str, title: &str) -> String {
    serde_json::json!({
        "payload_version": 1,
        "notification_configuration_id": "nc-AeUQ2zfKZzW9TiGZ",
        "run_url": "https://app.terraform.io/app/acme/networking/runs/run-Y4dkAo5yLp",
        "run_id": "run-Y4dkAo5yLp",
        "run_message": "Add VPC peering",
        "run_created_at": "2022-05-05T10:00:00.000Z",
        "run_created_by": "alice",
        "workspace_id": "ws-XdeUVMWShTesDMME",
        "workspace_name": "networking",
        "organization_name": "acme",
        "notifications": [{
            "message": title,
            "trigger": "run:completed",
            "run_status": run_status,
            "run_updated_at": "2022-05-05T10:05:12.000Z",
            "run_updated_by": "alice",
        }],
    })
    .to_string()
}

/// The handshake Terraform Cloud sends when a notification configuration is
/// created or tested.
#[allow(dead_code)]
pub fn verification_notification() -> String {
    serde_json::json!({
        "payload_version": 1,
        "notification_configuration_id": "nc-AeUQ2zfKZzW9TiGZ",
        "run_url": "",
        "run_id": "",
        "run_message": "",
        "run_created_at": null,
        "run_created_by": "",
        "workspace_id": "",
        "workspace_name": "",
        "organization_name": "",
        "notifications": [{
            "message": "Verification of Discord",
            "trigger": "verification",
            "run_status": "",
            "run_updated_at": "",
            "run_updated_by": "",
        }],
    })
    .to_string()
}
