//! # TFC Proxy HTTP Service
//!
//! HTTP server that accepts Terraform Cloud run notifications and relays them
//! to a Discord webhook.
//!
//! Endpoints:
//! - `POST /webhook`: verify, translate and deliver one notification
//! - `/health`: liveness probe, always `204 No Content`

pub mod config;
pub mod errors;

pub use crate::config::ProxyConfig;
pub use crate::errors::{ConfigError, ServiceError, WebhookHandlerError};

use axum::{
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, StatusCode},
    routing::{any, post},
    Router,
};
use bytes::Bytes;
use std::sync::Arc;
use tfc_proxy_core::{
    Authenticator, HttpDispatcher, MessageDispatcher, NotificationRelay, SIGNATURE_HEADER,
};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

/// Path of the notification endpoint.
pub const WEBHOOK_PATH: &str = "/webhook";

/// Path of the health endpoint.
pub const HEALTH_PATH: &str = "/health";

// ============================================================================
// Application State
// ============================================================================

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    /// Pipeline that handles each notification
    pub relay: NotificationRelay,
}

impl AppState {
    /// Create new application state
    pub fn new(authenticator: Authenticator, dispatcher: Arc<dyn MessageDispatcher>) -> Self {
        Self {
            relay: NotificationRelay::new(authenticator, dispatcher),
        }
    }

    /// Build the production state: verification with the configured secret
    /// and delivery to the configured webhook URL.
    pub fn from_config(config: &ProxyConfig) -> Self {
        let authenticator = Authenticator::new(config.secret().map(str::to_string));
        let dispatcher = Arc::new(HttpDispatcher::new(config.webhook_url.clone()));
        Self::new(authenticator, dispatcher)
    }
}

// ============================================================================
// HTTP Server
// ============================================================================

/// Create HTTP router with all endpoints
///
/// Any method other than `POST` on the webhook path is answered with
/// `405 Method Not Allowed` by the router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(WEBHOOK_PATH, post(handle_webhook))
        .route(HEALTH_PATH, any(handle_health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start HTTP server
///
/// Serves until SIGINT or SIGTERM, then lets in-flight requests finish.
pub async fn start_server(config: ProxyConfig) -> Result<(), ServiceError> {
    config.validate()?;

    let state = AppState::from_config(&config);
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| ServiceError::BindFailed {
            address: address.clone(),
            message: e.to_string(),
        })?;

    info!(
        address = %address,
        signature_verification = config.secret().is_some(),
        "Listening for notifications"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServiceError::ServerFailed {
            message: e.to_string(),
        })?;

    info!("HTTP server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        },
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Handle a run notification.
///
/// The signature is checked against the raw body before it is decoded. The
/// response carries no body; see [`WebhookHandlerError`] for the status codes.
#[instrument(skip_all)]
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, WebhookHandlerError> {
    let body = body.map_err(|e| WebhookHandlerError::UnreadableBody {
        message: e.body_text(),
    })?;

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    state.relay.relay(&body, signature).await?;

    Ok(StatusCode::OK)
}

/// Health check endpoint
async fn handle_health_check() -> StatusCode {
    StatusCode::NO_CONTENT
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
