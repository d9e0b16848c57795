//! # Signing Certificate Parsing
//!
//! Extracts the RSA public key from a PEM-encoded X.509 certificate.
//! Trust in the certificate comes from the host check, not from chain
//! validation, so only the key is used here.

use super::errors::CertificateError;
use rsa::pkcs8::DecodePublicKey;
use rsa::RsaPublicKey;
use x509_parser::pem::parse_x509_pem;

/// Parse a PEM certificate and return its RSA public key.
pub fn public_key_from_pem(pem_bytes: &[u8]) -> Result<RsaPublicKey, CertificateError> {
    let (_, pem) =
        parse_x509_pem(pem_bytes).map_err(|e| CertificateError::InvalidPem(e.to_string()))?;

    let certificate = pem
        .parse_x509()
        .map_err(|e| CertificateError::InvalidPem(e.to_string()))?;

    RsaPublicKey::from_public_key_der(certificate.public_key().raw)
        .map_err(|e| CertificateError::UnsupportedKey(e.to_string()))
}
