//! # Rejection Reasons
//!
//! Validation failures that stop a request from being processed.
//! None of them is fatal to the handler: they are recorded in the
//! `PipelineDecision` and the request ends with a logged silent drop.

use serde::Serialize;
use thiserror::Error;

/// Why an envelope was not processed.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    /// The envelope's `TopicArn` is not the allow-listed topic.
    #[error("topic ARN {actual} does not match allowed topic {expected}")]
    TopicNotAllowed { expected: String, actual: String },

    /// The `SigningCertURL` host is not the allow-listed signing domain.
    #[error("certificate domain {actual} is not the allowed source domain {expected}")]
    DomainMismatch { expected: String, actual: String },

    /// The signing certificate could not be fetched or parsed.
    #[error("certificate error: {reason}")]
    CertificateFetch { reason: String },

    /// The signature does not match the canonical string under the fetched key.
    #[error("data and signature do not match certificate")]
    SignatureInvalid,
}

impl Rejection {
    /// Short machine-readable label, used in log fields and response bodies.
    pub fn label(&self) -> &'static str {
        match self {
            Rejection::TopicNotAllowed { .. } => "topic_not_allowed",
            Rejection::DomainMismatch { .. } => "domain_mismatch",
            Rejection::CertificateFetch { .. } => "certificate_fetch_error",
            Rejection::SignatureInvalid => "signature_invalid",
        }
    }
}
