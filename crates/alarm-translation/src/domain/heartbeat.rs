//! # Scheduled Probe Heartbeat
//!
//! An EventBridge scheduled rule publishing to the topic proves end-to-end
//! delivery. Its message carries `"detail-type": "Scheduled Event"`; each one
//! is recorded as a single comma-delimited line instead of a check result:
//!
//! ```text
//! <epoch>,<resources[0] or placeholder>,<time>,<detail-type>,<source>\n
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `detail-type` value that marks a scheduled probe.
pub const SCHEDULED_EVENT_DETAIL_TYPE: &str = "Scheduled Event";

/// Written in place of `resources[0]` when the probe carries none.
pub const NO_RESOURCES_PLACEHOLDER: &str = "(no resources[] object)";

/// The scheduled-event body nested in a notification `Message`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScheduledProbePayload {
    #[serde(default)]
    pub resources: Vec<Value>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(rename = "detail-type", default)]
    pub detail_type: String,
}

impl ScheduledProbePayload {
    /// Whether a parsed `Message` is a scheduled probe.
    pub fn matches(message: &Value) -> bool {
        message.get("detail-type").and_then(Value::as_str) == Some(SCHEDULED_EVENT_DETAIL_TYPE)
    }

    /// First resource as text, or the placeholder.
    pub fn first_resource(&self) -> String {
        match self.resources.first() {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => NO_RESOURCES_PLACEHOLDER.to_string(),
            Some(other) => other.to_string(),
        }
    }
}

/// One heartbeat line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeartbeatRecord {
    pub epoch_seconds: i64,
    pub resource: String,
    pub provider_time: String,
    pub detail_type: String,
    pub source: String,
}

impl HeartbeatRecord {
    pub fn from_probe(probe: &ScheduledProbePayload, epoch_seconds: i64, source: &str) -> Self {
        Self {
            epoch_seconds,
            resource: probe.first_resource(),
            provider_time: probe.time.clone().unwrap_or_default(),
            detail_type: probe.detail_type.clone(),
            source: source.to_string(),
        }
    }

    /// The record line, newline-terminated.
    pub fn format_line(&self) -> String {
        let clean = |s: &str| s.replace(['\r', '\n'], " ");
        format!(
            "{},{},{},{},{}\n",
            self.epoch_seconds,
            clean(&self.resource),
            clean(&self.provider_time),
            clean(&self.detail_type),
            clean(&self.source),
        )
    }
}
