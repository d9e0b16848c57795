//! # Envelope Signature Verification (RSA PKCS#1 v1.5)
//!
//! Pure domain logic: recompute the canonical string and check it against
//! the envelope's base64 `Signature` under the certificate's public key.
//!
//! ## Security Notes
//!
//! - `SignatureVersion` 1 (or absent) is RSA/SHA-1, the digest the provider
//!   signs with; it is a compatibility requirement, not a choice.
//! - `SignatureVersion` 2 is RSA/SHA-256.
//! - Every failure path, including unknown versions and undecodable input,
//!   returns `false`.

use super::canonical::canonical_string;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bridge_types::Envelope;
use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::signature::Verifier;
use rsa::RsaPublicKey;
use sha1::Sha1;
use sha2::Sha256;
use tracing::debug;

/// Digest selected by the envelope's `SignatureVersion`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    /// `SignatureVersion` "1" or absent
    RsaSha1,
    /// `SignatureVersion` "2"
    RsaSha256,
}

impl SignatureAlgorithm {
    /// Map a `SignatureVersion` value. Unknown versions are not verifiable.
    pub fn from_version(version: Option<&str>) -> Option<Self> {
        match version {
            None | Some("1") => Some(SignatureAlgorithm::RsaSha1),
            Some("2") => Some(SignatureAlgorithm::RsaSha256),
            Some(_) => None,
        }
    }
}

/// Verify an envelope's signature against a public key.
pub fn verify_signature(envelope: &Envelope, public_key: &RsaPublicKey) -> bool {
    let Some(algorithm) = SignatureAlgorithm::from_version(envelope.signature_version.as_deref())
    else {
        debug!(
            version = envelope.signature_version.as_deref().unwrap_or_default(),
            "unsupported signature version"
        );
        return false;
    };

    let Some(encoded) = envelope.signature.as_deref() else {
        debug!("envelope carries no signature");
        return false;
    };

    let raw = match STANDARD.decode(encoded.trim()) {
        Ok(raw) => raw,
        Err(e) => {
            debug!(error = %e, "signature is not valid base64");
            return false;
        }
    };

    let canonical = canonical_string(envelope);
    verify_raw(algorithm, canonical.as_bytes(), &raw, public_key)
}

/// Verify a raw PKCS#1 v1.5 signature over `message`.
pub(crate) fn verify_raw(
    algorithm: SignatureAlgorithm,
    message: &[u8],
    signature: &[u8],
    public_key: &RsaPublicKey,
) -> bool {
    let signature = match Signature::try_from(signature) {
        Ok(signature) => signature,
        Err(_) => return false,
    };

    let outcome = match algorithm {
        SignatureAlgorithm::RsaSha1 => {
            VerifyingKey::<Sha1>::new(public_key.clone()).verify(message, &signature)
        }
        SignatureAlgorithm::RsaSha256 => {
            VerifyingKey::<Sha256>::new(public_key.clone()).verify(message, &signature)
        }
    };

    outcome.is_ok()
}

// =============================================================================
// TEST HELPERS
// =============================================================================
