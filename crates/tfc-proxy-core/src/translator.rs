//! Notification → Discord message translation.
//!
//! The pipeline is `parse_payload` → `translate` → `encode`. Each step
//! returns the first failure it meets and has no side effects.

use crate::error::ValidationError;
use crate::message::{status_color, Embed, Field, OutboundMessage};
use crate::payload::{InboundPayload, NotificationEvent};
use tracing::debug;

/// Decode a raw request body into an [`InboundPayload`].
///
/// # Errors
///
/// Returns [`ValidationError::MalformedJSON`] when the body is not JSON or
/// does not have the payload's shape.
pub fn parse_payload(raw_body: &[u8]) -> Result<InboundPayload, ValidationError> {
    serde_json::from_slice(raw_body).map_err(|e| ValidationError::MalformedJSON(e.to_string()))
}

/// Build the outbound message for a notification batch.
///
/// Only the first notification is used. Unless that notification is a
/// verification handshake the required fields are checked, in this order:
/// run status, workspace name, run ID, run URL, message. Handshakes skip the
/// checks and produce an embed with no fields.
///
/// # Errors
///
/// Returns [`ValidationError::NoNotifications`] for an empty batch, otherwise
/// the error for the first missing field.
pub fn translate(payload: &InboundPayload) -> Result<OutboundMessage, ValidationError> {
    let event = payload
        .first_notification()
        .ok_or(ValidationError::NoNotifications)?;

    if !event.is_verification() {
        validate(payload, event)?;
    }

    let color = status_color(&event.run_status);
    debug!(
        run_status = %event.run_status,
        trigger = %event.trigger,
        color,
        "Translated notification"
    );

    Ok(OutboundMessage::single(Embed {
        title: event.message.clone(),
        color,
        fields: build_fields(payload, event),
    }))
}

/// Serialize a message to its JSON wire form.
///
/// # Errors
///
/// Returns [`ValidationError::SerializationFailed`] if serialization fails.
pub fn encode(message: &OutboundMessage) -> Result<Vec<u8>, ValidationError> {
    serde_json::to_vec(message).map_err(|e| ValidationError::SerializationFailed(e.to_string()))
}

/// Parse, translate and encode in one step.
pub fn render(raw_body: &[u8]) -> Result<Vec<u8>, ValidationError> {
    let payload = parse_payload(raw_body)?;
    encode(&translate(&payload)?)
}

fn validate(payload: &InboundPayload, event: &NotificationEvent) -> Result<(), ValidationError> {
    let checks = [
        (event.run_status.as_str(), ValidationError::MissingRunStatus),
        (payload.workspace_name.as_str(), ValidationError::MissingWorkspaceName),
        (payload.run_id.as_str(), ValidationError::MissingRunID),
        (payload.run_url.as_str(), ValidationError::MissingRunURL),
        (event.message.as_str(), ValidationError::MissingMessage),
    ];

    match checks.into_iter().find(|(value, _)| value.is_empty()) {
        Some((_, error)) => Err(error),
        None => Ok(()),
    }
}

fn build_fields(payload: &InboundPayload, event: &NotificationEvent) -> Vec<Field> {
    if event.is_verification() {
        return Vec::new();
    }

    vec![
        Field::inline("Workspace", payload.workspace_name.as_str()),
        Field::inline("Run ID", payload.run_id.as_str()),
        Field::block("Run URL", payload.run_url.as_str()),
        Field::inline("Run Status", event.run_status.as_str()),
        Field::inline("Run Updated At", event.run_updated_at.as_str()),
        Field::block("Run Message", payload.run_message.as_str()),
    ]
}

#[cfg(test)]
#[path = "translator_tests.rs"]
mod tests;
