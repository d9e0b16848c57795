//! # Canonical Signing String
//!
//! Rebuilds the exact byte string the provider signed.
//!
//! The string is a sequence of `Key\nValue\n` pairs. Field order depends on the
//! envelope type:
//!
//! | Type | Fields |
//! |---|---|
//! | SubscriptionConfirmation, UnsubscribeConfirmation | Message, MessageId, SubscribeURL, Timestamp, Token, TopicArn, Type |
//! | Notification and anything else | Message, MessageId, Subject (if non-empty), Timestamp, TopicArn, Type |
//!
//! Absent fields are written with an empty value.

use bridge_types::{Envelope, MessageType};

/// Build the canonical signing string for an envelope.
pub fn canonical_string(envelope: &Envelope) -> String {
    let mut out = String::with_capacity(canonical_capacity(envelope));

    match envelope.message_type {
        MessageType::SubscriptionConfirmation | MessageType::UnsubscribeConfirmation => {
            push_pair(&mut out, "Message", envelope.message.as_deref());
            push_pair(&mut out, "MessageId", envelope.message_id.as_deref());
            push_pair(&mut out, "SubscribeURL", envelope.subscribe_url.as_deref());
            push_pair(&mut out, "Timestamp", envelope.timestamp.as_deref());
            push_pair(&mut out, "Token", envelope.token.as_deref());
            push_pair(&mut out, "TopicArn", envelope.topic_arn.as_deref());
            push_pair(&mut out, "Type", Some(envelope.message_type.as_str()));
        }
        _ => {
            push_pair(&mut out, "Message", envelope.message.as_deref());
            push_pair(&mut out, "MessageId", envelope.message_id.as_deref());
            if let Some(subject) = envelope.non_empty_subject() {
                push_pair(&mut out, "Subject", Some(subject));
            }
            push_pair(&mut out, "Timestamp", envelope.timestamp.as_deref());
            push_pair(&mut out, "TopicArn", envelope.topic_arn.as_deref());
            push_pair(&mut out, "Type", Some(envelope.message_type.as_str()));
        }
    }

    out
}

fn push_pair(out: &mut String, key: &str, value: Option<&str>) {
    out.push_str(key);
    out.push('\n');
    out.push_str(value.unwrap_or_default());
    out.push('\n');
}

fn canonical_capacity(envelope: &Envelope) -> usize {
    let len = |v: &Option<String>| v.as_ref().map_or(0, String::len);
    // Keys and newlines fit comfortably in 96 bytes.
    96 + len(&envelope.message)
        + len(&envelope.message_id)
        + len(&envelope.subject)
        + len(&envelope.subscribe_url)
        + len(&envelope.timestamp)
        + len(&envelope.token)
        + len(&envelope.topic_arn)
        + envelope.message_type.as_str().len()
}
