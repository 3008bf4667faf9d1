//! Inbound run-notification payload.
//!
//! Field names match the Terraform Cloud notification payload (version 1)
//! exactly. Decoding is lenient: absent or `null` scalars decode to their
//! empty value so that missing data is reported by validation with a precise
//! error rather than by the JSON decoder with a generic one.

use serde::{Deserialize, Deserializer, Serialize};

/// Trigger value sent by the platform when a notification configuration is
/// created or tested. Such events carry no run data.
pub const VERIFICATION_TRIGGER: &str = "verification";

/// One notification batch as delivered by the source platform.
///
/// Only the first entry of [`notifications`](Self::notifications) is ever
/// read. Later entries are accepted and ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub payload_version: i64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub notification_configuration_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub run_url: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub run_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub run_message: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub run_created_at: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub run_created_by: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub workspace_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub workspace_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub organization_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub notifications: Vec<NotificationEvent>,
}

impl InboundPayload {
    /// The event that drives translation, if there is one.
    pub fn first_notification(&self) -> Option<&NotificationEvent> {
        self.notifications.first()
    }
}

/// A single status-change record within a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub trigger: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub run_status: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub run_updated_at: String,

    /// Actor that last updated the run. Accepted but never used.
    #[serde(default)]
    pub run_updated_by: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub run_message: String,
}

impl NotificationEvent {
    /// Whether this is a reachability probe rather than a run event.
    pub fn is_verification(&self) -> bool {
        self.trigger == VERIFICATION_TRIGGER
    }

    /// Label used when logging a delivered event.
    pub fn status_label(&self) -> &str {
        if self.is_verification() {
            VERIFICATION_TRIGGER
        } else {
            &self.run_status
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
