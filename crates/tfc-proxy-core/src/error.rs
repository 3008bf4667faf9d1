//! Error types for the notification pipeline.
//!
//! Each pipeline stage owns one error enum. None of them are retried inside
//! the core: the first failing stage stops the pipeline and the error is
//! handed back to the HTTP layer, which maps it to a status code.

use thiserror::Error;

/// Inbound signature verification failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// A secret is configured but the request carried no signature header.
    #[error("request does not have the 'X-TFE-Notification-Signature' header")]
    MissingSignature,

    /// The supplied signature does not match the HMAC of the request body.
    #[error("request signature does not match")]
    SignatureMismatch,
}

/// Payload decoding, validation and message encoding failures.
///
/// The field checks are reported in a fixed order; see
/// [`translate`](crate::translator::translate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("payload does not contain any notifications")]
    NoNotifications,

    #[error("payload does not contain a run status")]
    MissingRunStatus,

    #[error("payload does not contain a workspace name")]
    MissingWorkspaceName,

    #[error("payload does not contain a run ID")]
    MissingRunID,

    #[error("payload does not contain a run URL")]
    MissingRunURL,

    #[error("payload does not contain a notification message")]
    MissingMessage,

    /// The request body is not a valid notification payload document.
    #[error("malformed notification payload: {0}")]
    MalformedJSON(String),

    /// The outbound message could not be serialized.
    ///
    /// Not expected for well-formed input, but reported rather than assumed
    /// away.
    #[error("failed to serialize outbound message: {0}")]
    SerializationFailed(String),
}

impl ValidationError {
    /// Whether the error was caused by the inbound request rather than by the
    /// proxy itself.
    ///
    /// Everything except [`ValidationError::SerializationFailed`] is a client
    /// error.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::SerializationFailed(_))
    }
}

/// Outbound delivery failures.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The request never produced a response (connection refused, DNS
    /// failure, timeout, invalid destination).
    #[error("failed to send outbound webhook: {0}")]
    TransportError(#[source] reqwest::Error),

    /// The destination answered with a status code outside `200..=299`.
    #[error("unexpected status code {0} from outbound webhook")]
    UnexpectedStatus(u16),
}

/// Any failure of the authenticate → translate → deliver pipeline.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
}

/// Standard result type for proxy operations
pub type ProxyResult<T> = Result<T, ProxyError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
