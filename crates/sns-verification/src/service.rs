//! # Envelope Verification Service
//!
//! Application service implementing `EnvelopeVerificationApi`.
//!
//! ## Chain
//!
//! 1. Signing-certificate host and scheme check (no network)
//! 2. Certificate fetch through the `CertificateSource` port
//! 3. RSA signature check over the canonical string
//!
//! Each step runs only if every previous step passed. Failures are recorded
//! in the caller's `PipelineDecision`; nothing here returns an error.

use crate::domain::canonical;
use crate::domain::policy::VerificationPolicy;
use crate::domain::signature;
use crate::domain::source_domain::{check_domain, domain_from_url, uses_https};
use crate::ports::inbound::EnvelopeVerificationApi;
use crate::ports::outbound::CertificateSource;
use async_trait::async_trait;
use bridge_types::{Envelope, PipelineDecision, Rejection};
use rsa::RsaPublicKey;
use tracing::{debug, info, warn};

/// Envelope verification service.
pub struct EnvelopeVerificationService<C: CertificateSource> {
    certificates: C,
    policy: VerificationPolicy,
}

impl<C: CertificateSource> EnvelopeVerificationService<C> {
    /// Create a new verification service.
    ///
    /// # Arguments
    /// * `certificates` - where signing certificates are fetched from
    /// * `policy` - allow-listed domain and check switches
    pub fn new(certificates: C, policy: VerificationPolicy) -> Self {
        if !policy.verify_certificate {
            warn!("certificate verification is DISABLED; envelopes will not be authenticated");
        } else if !policy.verify_source_domain {
            warn!("signing-certificate domain check is DISABLED");
        }
        Self {
            certificates,
            policy,
        }
    }

    /// The active policy.
    pub fn policy(&self) -> &VerificationPolicy {
        &self.policy
    }
}

#[async_trait]
impl<C: CertificateSource> EnvelopeVerificationApi for EnvelopeVerificationService<C> {
    fn check_domain(&self, signing_cert_url: &str) -> bool {
        check_domain(signing_cert_url, &self.policy.allowed_source_domain)
    }

    fn canonical_string(&self, envelope: &Envelope) -> String {
        canonical::canonical_string(envelope)
    }

    fn verify(&self, envelope: &Envelope, public_key: &RsaPublicKey) -> bool {
        signature::verify_signature(envelope, public_key)
    }

    async fn authenticate(&self, envelope: &Envelope, decision: &mut PipelineDecision) {
        if !decision.is_safe_to_process() {
            return;
        }

        if !self.policy.verify_certificate {
            debug!("certificate verification disabled; skipping signature chain");
            return;
        }

        let cert_url = envelope.signing_cert_url.as_deref().unwrap_or_default();

        if self.policy.verify_source_domain && !self.check_domain(cert_url) {
            decision.reject(Rejection::DomainMismatch {
                expected: self.policy.allowed_source_domain.clone(),
                actual: domain_from_url(cert_url).unwrap_or_else(|| "ERROR".to_string()),
            });
            return;
        }

        if self.policy.verify_source_domain && self.policy.require_https && !uses_https(cert_url) {
            decision.reject(Rejection::CertificateFetch {
                reason: format!("SigningCertURL {cert_url} does not use https"),
            });
            return;
        }

        debug!(
            canonical = %self.canonical_string(envelope),
            "data validation string"
        );

        let public_key = match self.certificates.fetch(cert_url).await {
            Ok(key) => key,
            Err(e) => {
                decision.reject(Rejection::CertificateFetch {
                    reason: e.to_string(),
                });
                return;
            }
        };

        if self.verify(envelope, &public_key) {
            info!("data validated against certificate");
        } else {
            decision.reject(Rejection::SignatureInvalid);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
