//! Outbound Discord webhook message.
//!
//! Wire shape:
//!
//! ```json
//! {"embeds":[{"title":"...","color":2201331,"fields":[{"name":"...","value":"...","inline":true}]}]}
//! ```

use serde::{Deserialize, Serialize};

/// Message body posted to the destination webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub embeds: Vec<Embed>,
}

impl OutboundMessage {
    /// Wrap a single embed, which is the only shape the proxy produces.
    pub fn single(embed: Embed) -> Self {
        Self {
            embeds: vec![embed],
        }
    }
}

/// A titled, colored message block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub color: u32,
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// One name/value row of an embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl Field {
    pub fn inline(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            inline: true,
        }
    }

    pub fn block(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            inline: false,
        }
    }
}

// ============================================================================
// Embed colors
// ============================================================================

/// Embed color derived from a run status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmbedColor {
    /// Run is idle or was stopped without completing.
    Grey,
    /// Run is in progress.
    Blue,
    /// Run is waiting on a person.
    Yellow,
    /// Run failed.
    Red,
    /// Run finished successfully.
    Green,
    /// Status not recognised, including the empty status.
    Violet,
}

impl EmbedColor {
    /// Map a run status to its color. Matching is exact and case-sensitive.
    pub fn for_run_status(run_status: &str) -> Self {
        match run_status {
            "pending" | "discarded" | "canceled" | "force_canceled" => Self::Grey,
            "fetching"
            | "fetching_completed"
            | "pre_plan_running"
            | "pre_plan_completed"
            | "queuing"
            | "plan_queued"
            | "planning"
            | "cost_estimating"
            | "cost_estimated"
            | "policy_checking"
            | "policy_checked"
            | "post_plan_running"
            | "post_plan_completed"
            | "apply_queued"
            | "applying" => Self::Blue,
            "policy_override" | "planned" => Self::Yellow,
            "policy_soft_failed" | "errored" => Self::Red,
            "planned_and_finished" | "applied" | "confirmed" => Self::Green,
            _ => Self::Violet,
        }
    }

    /// The RGB value Discord expects in the `color` field.
    pub fn value(self) -> u32 {
        match self {
            Self::Grey => 0x9e9e9e,
            Self::Blue => 0x2196f3,
            Self::Yellow => 0xffc107,
            Self::Red => 0xf44336,
            Self::Green => 0x4caf50,
            Self::Violet => 0xee82ee,
        }
    }
}

/// Color value for a run status.
pub fn status_color(run_status: &str) -> u32 {
    EmbedColor::for_run_status(run_status).value()
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
