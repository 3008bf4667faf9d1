//! Error types for the HTTP service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tfc_proxy_core::{AuthError, DeliveryError, ProxyError, ValidationError};
use tracing::{error, warn};

/// Webhook handler errors with HTTP status code mapping
///
/// - `400 Bad Request`: the body could not be read, is not a notification
///   payload, or fails field validation
/// - `401 Unauthorized`: signature missing or wrong while a secret is configured
/// - `500 Internal Server Error`: the outbound message could not be built or
///   delivered
///
/// The notification source only ever sees the status code. Each error emits
/// one log line when it is turned into a response; that line is the operator's
/// only view of the failure.
#[derive(Debug, thiserror::Error)]
pub enum WebhookHandlerError {
    /// Request body could not be read
    ///
    /// Maps to: `400 Bad Request`
    #[error("Error reading body: {message}")]
    UnreadableBody { message: String },

    /// Signature verification failed
    ///
    /// Maps to: `401 Unauthorized`
    #[error("Error verifying signature for payload: {0}")]
    Unauthorized(#[from] AuthError),

    /// Payload could not be decoded or is missing a required field
    ///
    /// Maps to: `400 Bad Request`
    #[error("Error creating Discord message: {0}")]
    InvalidNotification(ValidationError),

    /// Outbound webhook call failed
    ///
    /// Maps to: `500 Internal Server Error`
    #[error("Error sending Discord webhook: {0}")]
    DeliveryFailed(#[from] DeliveryError),

    /// Unexpected internal failure
    ///
    /// Maps to: `500 Internal Server Error`
    #[error("Internal server error: {message}")]
    InternalError { message: String },
}

impl WebhookHandlerError {
    /// HTTP status code returned to the notification source.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnreadableBody { .. } | Self::InvalidNotification(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::DeliveryFailed(_) | Self::InternalError { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ValidationError> for WebhookHandlerError {
    fn from(e: ValidationError) -> Self {
        if e.is_client_error() {
            Self::InvalidNotification(e)
        } else {
            Self::InternalError {
                message: e.to_string(),
            }
        }
    }
}

impl From<ProxyError> for WebhookHandlerError {
    fn from(e: ProxyError) -> Self {
        match e {
            ProxyError::Auth(e) => e.into(),
            ProxyError::Validation(e) => e.into(),
            ProxyError::Delivery(e) => e.into(),
        }
    }
}

impl IntoResponse for WebhookHandlerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Webhook request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Webhook request rejected");
        }

        status.into_response()
    }
}

/// Service-level errors
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Failed to bind to address {address}: {message}")]
    BindFailed { address: String, message: String },

    #[error("Server failed: {message}")]
    ServerFailed { message: String },

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

impl ServiceError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::BindFailed { .. } => 1,
            Self::ServerFailed { .. } => 2,
            Self::Configuration(_) => 3,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {key}")]
    Missing { key: String },

    #[error("Configuration loading failed: {0}")]
    Load(#[from] config::ConfigError),
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;
