//! Outbound delivery of rendered messages.
//!
//! A delivery is a single `POST` with no retries. Any `2xx` answer is a
//! success and the response body is never read.

use crate::error::DeliveryError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument};

/// Sends a serialized message to the destination webhook.
#[async_trait]
pub trait MessageDispatcher: Send + Sync {
    /// Deliver `body`, a JSON-encoded message, to the destination.
    async fn deliver(&self, body: Vec<u8>) -> Result<(), DeliveryError>;
}

/// Post `body` to `destination_url` as `application/json`.
///
/// # Errors
///
/// * [`DeliveryError::TransportError`] when no response was received,
///   including when `destination_url` is not a valid URL.
/// * [`DeliveryError::UnexpectedStatus`] for any status outside `200..=299`.
#[instrument(skip_all, fields(body_len = body.len()))]
pub async fn deliver(
    client: &reqwest::Client,
    destination_url: &str,
    body: Vec<u8>,
) -> Result<(), DeliveryError> {
    let response = client
        .post(destination_url)
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await
        .map_err(DeliveryError::TransportError)?;

    let status = response.status();
    if !status.is_success() {
        return Err(DeliveryError::UnexpectedStatus(status.as_u16()));
    }

    debug!(status = status.as_u16(), "Outbound webhook accepted");
    Ok(())
}

// ============================================================================
// HttpDispatcher
// ============================================================================

/// [`MessageDispatcher`] that posts to a fixed URL over HTTP.
///
/// Uses the transport's default timeouts.
#[derive(Clone)]
pub struct HttpDispatcher {
    client: reqwest::Client,
    destination_url: String,
}

impl HttpDispatcher {
    pub fn new(destination_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), destination_url)
    }

    /// Build a dispatcher around an existing client.
    pub fn with_client(client: reqwest::Client, destination_url: impl Into<String>) -> Self {
        Self {
            client,
            destination_url: destination_url.into(),
        }
    }

    pub fn destination_url(&self) -> &str {
        &self.destination_url
    }
}

impl std::fmt::Debug for HttpDispatcher {
    // Discord webhook URLs embed their token in the path.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDispatcher")
            .field("destination_url", &"<REDACTED>")
            .finish()
    }
}

#[async_trait]
impl MessageDispatcher for HttpDispatcher {
    async fn deliver(&self, body: Vec<u8>) -> Result<(), DeliveryError> {
        deliver(&self.client, &self.destination_url, body).await
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
