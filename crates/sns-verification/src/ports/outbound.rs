//! # Outbound Ports (Driven Ports / SPI)
//!
//! Where signing certificates come from.

use crate::domain::errors::CertificateError;
use rsa::RsaPublicKey;

/// Source of signing-certificate public keys.
///
/// Implementations must not cache across requests unless told to; every call
/// corresponds to one inbound envelope.
#[async_trait::async_trait]
pub trait CertificateSource: Send + Sync {
    /// Fetch the certificate at `url` and return its public key.
    ///
    /// # Errors
    /// * `CertificateError::Unreachable` - network failure or timeout
    /// * `CertificateError::HttpStatus` - non-success response
    /// * `CertificateError::TooLarge` - body above the size cap
    /// * `CertificateError::InvalidPem` / `UnsupportedKey` - unusable content
    async fn fetch(&self, url: &str) -> Result<RsaPublicKey, CertificateError>;
}
