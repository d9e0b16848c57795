//! # SNS Envelope
//!
//! The outer signed message delivered by the notification provider.
//!
//! Field names on the wire are case-sensitive and follow the provider's
//! documented HTTP/HTTPS message schema.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type of an envelope (`Type` on the wire).
///
/// Unknown values are kept verbatim in `Other` because the raw string is part
/// of the signed canonical string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageType {
    /// Subscription handshake sent before a topic delivers notifications.
    SubscriptionConfirmation,
    /// A published message.
    Notification,
    /// Sent after an endpoint unsubscribes.
    UnsubscribeConfirmation,
    /// Anything else, including an absent `Type`.
    Other(String),
}

impl MessageType {
    /// The wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            MessageType::SubscriptionConfirmation => "SubscriptionConfirmation",
            MessageType::Notification => "Notification",
            MessageType::UnsubscribeConfirmation => "UnsubscribeConfirmation",
            MessageType::Other(raw) => raw,
        }
    }
}

impl Default for MessageType {
    fn default() -> Self {
        MessageType::Other(String::new())
    }
}

impl From<String> for MessageType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "SubscriptionConfirmation" => MessageType::SubscriptionConfirmation,
            "Notification" => MessageType::Notification,
            "UnsubscribeConfirmation" => MessageType::UnsubscribeConfirmation,
            _ => MessageType::Other(raw),
        }
    }
}

impl From<&str> for MessageType {
    fn from(raw: &str) -> Self {
        MessageType::from(raw.to_string())
    }
}

impl From<MessageType> for String {
    fn from(kind: MessageType) -> Self {
        match kind {
            MessageType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outer signed notification message.
///
/// All fields are optional at the schema level. Absent fields contribute an
/// empty value to the canonical signing string, so a stripped envelope fails
/// verification rather than deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// `Type`
    #[serde(rename = "Type", default)]
    pub message_type: MessageType,

    /// `MessageId`
    #[serde(rename = "MessageId", default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    /// `TopicArn`
    #[serde(rename = "TopicArn", default, skip_serializing_if = "Option::is_none")]
    pub topic_arn: Option<String>,

    /// `Subject`, only ever present on notifications.
    #[serde(rename = "Subject", default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// `Message`, the nested payload as an opaque string.
    #[serde(rename = "Message", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// `Timestamp` (ISO-8601, provider clock).
    #[serde(rename = "Timestamp", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// `SignatureVersion`; "1" is RSA/SHA-1, "2" is RSA/SHA-256.
    #[serde(
        rename = "SignatureVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub signature_version: Option<String>,

    /// `Signature`, base64.
    #[serde(rename = "Signature", default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,

    /// `SigningCertURL`
    #[serde(
        rename = "SigningCertURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub signing_cert_url: Option<String>,

    /// `SubscribeURL`, handshake only.
    #[serde(rename = "SubscribeURL", default, skip_serializing_if = "Option::is_none")]
    pub subscribe_url: Option<String>,

    /// `Token`, handshake only.
    #[serde(rename = "Token", default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// `UnsubscribeURL`, accepted and otherwise ignored.
    #[serde(
        rename = "UnsubscribeURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub unsubscribe_url: Option<String>,
}

impl Envelope {
    /// Parse an envelope from a raw request body.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// `Subject` if present and non-empty.
    pub fn non_empty_subject(&self) -> Option<&str> {
        self.subject.as_deref().filter(|s| !s.is_empty())
    }

    /// `MessageId` or an empty string, for log fields.
    pub fn message_id_or_default(&self) -> &str {
        self.message_id.as_deref().unwrap_or_default()
    }
}
