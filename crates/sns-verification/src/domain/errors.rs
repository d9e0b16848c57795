//! # Certificate Errors
//!
//! Failures while obtaining the signing certificate's public key.

use thiserror::Error;

/// Errors from a `CertificateSource`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CertificateError {
    /// The certificate URL could not be reached (DNS, connect, timeout)
    #[error("certificate URL unreachable: {0}")]
    Unreachable(String),

    /// The server answered with a non-success status
    #[error("certificate request returned HTTP {0}")]
    HttpStatus(u16),

    /// The body exceeded the configured size cap
    #[error("certificate body of {size} bytes exceeds limit of {limit} bytes")]
    TooLarge { size: usize, limit: usize },

    /// The body is not a PEM-encoded X.509 certificate
    #[error("invalid PEM certificate: {0}")]
    InvalidPem(String),

    /// The certificate does not carry an RSA public key
    #[error("unsupported certificate key: {0}")]
    UnsupportedKey(String),
}
