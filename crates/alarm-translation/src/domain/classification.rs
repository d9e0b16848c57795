//! # Envelope Classification
//!
//! Closed set of things an authenticated envelope can be. Classification only
//! runs on envelopes that passed every validation step.

use super::heartbeat::ScheduledProbePayload;
use super::payload::AlarmPayload;
use bridge_types::{Envelope, MessageType, PipelineDecision};
use serde_json::Value;
use tracing::{debug, info};

/// What an envelope asks the bridge to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// Subscription handshake; confirm by requesting `subscribe_url`.
    Handshake { subscribe_url: Option<String> },
    /// CloudWatch alarm state change.
    AlarmNotification(AlarmPayload),
    /// Scheduled delivery probe.
    ScheduledProbe(ScheduledProbePayload),
    /// Any other envelope type.
    Unrecognized(MessageType),
}

impl Classification {
    /// Short name for logs and response bodies.
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Handshake { .. } => "handshake",
            Classification::AlarmNotification(_) => "alarm_notification",
            Classification::ScheduledProbe(_) => "scheduled_probe",
            Classification::Unrecognized(_) => "unrecognized",
        }
    }
}

/// Classify an envelope. Returns `None` when the decision is already rejected.
pub fn classify(envelope: &Envelope, decision: &PipelineDecision) -> Option<Classification> {
    if !decision.is_safe_to_process() {
        return None;
    }

    let classification = match &envelope.message_type {
        MessageType::SubscriptionConfirmation => Classification::Handshake {
            subscribe_url: envelope.subscribe_url.clone(),
        },
        MessageType::Notification => classify_notification(envelope),
        other => Classification::Unrecognized(other.clone()),
    };

    debug!(kind = classification.label(), "envelope classified");
    Some(classification)
}

fn classify_notification(envelope: &Envelope) -> Classification {
    let message = envelope.message.as_deref().unwrap_or_default();

    info!(
        subject = envelope.subject.as_deref().unwrap_or("undefined Subject"),
        "notification received"
    );
    debug!(payload = message, "notification message");

    let parsed: Value = match serde_json::from_str(message) {
        Ok(value) => value,
        Err(_) => return Classification::AlarmNotification(AlarmPayload::parse(message)),
    };

    if ScheduledProbePayload::matches(&parsed) {
        match serde_json::from_value::<ScheduledProbePayload>(parsed.clone()) {
            Ok(probe) => return Classification::ScheduledProbe(probe),
            Err(e) => debug!(error = %e, "scheduled event body did not match schema"),
        }
        // Shape mismatch beyond detail-type: keep the probe, drop the rest.
        return Classification::ScheduledProbe(ScheduledProbePayload {
            time: parsed.get("time").and_then(Value::as_str).map(str::to_string),
            detail_type: super::heartbeat::SCHEDULED_EVENT_DETAIL_TYPE.to_string(),
            ..Default::default()
        });
    }

    Classification::AlarmNotification(AlarmPayload::from_value(parsed))
}
