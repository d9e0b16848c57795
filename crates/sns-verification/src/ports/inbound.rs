//! # Inbound Ports (Driving Ports / API)
//!
//! What the pipeline orchestrator calls to authenticate an envelope.

use bridge_types::{Envelope, PipelineDecision};
use rsa::RsaPublicKey;

/// Envelope authentication API.
///
/// Implementations must be thread-safe (`Send + Sync`) and hold no
/// per-request state.
#[async_trait::async_trait]
pub trait EnvelopeVerificationApi: Send + Sync {
    /// Whether the signing-certificate URL points at the allow-listed host.
    fn check_domain(&self, signing_cert_url: &str) -> bool;

    /// The exact string the provider signed.
    fn canonical_string(&self, envelope: &Envelope) -> String;

    /// Verify the envelope's signature under `public_key`. Never errors.
    fn verify(&self, envelope: &Envelope, public_key: &RsaPublicKey) -> bool;

    /// Run the full chain (domain check, certificate fetch, signature check),
    /// recording the first failure in `decision`.
    ///
    /// Does nothing when `decision` is already rejected.
    async fn authenticate(&self, envelope: &Envelope, decision: &mut PipelineDecision);
}
