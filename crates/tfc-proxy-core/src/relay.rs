//! The authenticate → translate → deliver pipeline.

use crate::authenticator::Authenticator;
use crate::dispatcher::MessageDispatcher;
use crate::error::ProxyResult;
use crate::translator::{encode, parse_payload, translate};
use std::sync::Arc;
use tracing::{info, instrument};

/// Result of a successful relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayOutcome {
    /// Run status of the relayed event, or `verification` for a handshake.
    pub status: String,

    /// Number of embed fields sent.
    pub field_count: usize,
}

/// Relays signed notification bodies to the destination webhook.
///
/// Holds no per-request state; one instance serves every request.
#[derive(Clone)]
pub struct NotificationRelay {
    authenticator: Authenticator,
    dispatcher: Arc<dyn MessageDispatcher>,
}

impl NotificationRelay {
    pub fn new(authenticator: Authenticator, dispatcher: Arc<dyn MessageDispatcher>) -> Self {
        Self {
            authenticator,
            dispatcher,
        }
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    /// Run one request through the pipeline.
    ///
    /// The signature is checked over the raw bytes before the body is
    /// decoded. Nothing is delivered unless every earlier stage succeeds, and
    /// a failed delivery is not retried.
    ///
    /// # Errors
    ///
    /// The error of the first failing stage, wrapped in
    /// [`ProxyError`](crate::error::ProxyError).
    #[instrument(skip_all, fields(body_len = raw_body.len()))]
    pub async fn relay(
        &self,
        raw_body: &[u8],
        signature: Option<&str>,
    ) -> ProxyResult<RelayOutcome> {
        self.authenticator.verify(raw_body, signature)?;

        let payload = parse_payload(raw_body)?;
        let message = translate(&payload)?;
        let body = encode(&message)?;

        self.dispatcher.deliver(body).await?;

        // translate() guarantees a first notification exists
        let status = payload
            .first_notification()
            .map(|event| event.status_label().to_string())
            .unwrap_or_default();
        let field_count = message.embeds.iter().map(|e| e.fields.len()).sum();

        info!(status = %status, "Discord webhook sent successfully");

        Ok(RelayOutcome {
            status,
            field_count,
        })
    }
}

impl std::fmt::Debug for NotificationRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationRelay")
            .field("authenticator", &self.authenticator)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "relay_tests.rs"]
mod tests;
