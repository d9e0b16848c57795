//! # SNS Envelope Verification
//!
//! Proves that an envelope was produced by the notification provider before
//! any of its content is trusted.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): canonical string, host allow-list check,
//!   PEM parsing and RSA verification. No I/O.
//! - **Ports Layer** (`ports/`): `EnvelopeVerificationApi` (inbound) and
//!   `CertificateSource` (outbound).
//! - **Adapters Layer** (`adapters/`): reqwest-backed certificate fetcher.
//! - **Service Layer** (`service.rs`): runs the chain against a
//!   `PipelineDecision`.
//!
//! ## Security Notes
//!
//! - The signing-certificate host is checked before anything is fetched, so an
//!   attacker cannot point verification at a self-signed certificate.
//! - RSA/SHA-1 is required by the provider's `SignatureVersion` 1 scheme.
//! - Verification is fail-closed: every error path yields `false`.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::http_certificate::HttpCertificateSource;
pub use domain::canonical::canonical_string;
pub use domain::certificate::public_key_from_pem;
pub use domain::errors::CertificateError;
pub use domain::policy::VerificationPolicy;
pub use domain::signature::{verify_signature, SignatureAlgorithm};
pub use domain::source_domain::{check_domain, domain_from_url, uses_https};
pub use ports::inbound::EnvelopeVerificationApi;
pub use ports::outbound::CertificateSource;
pub use rsa::RsaPublicKey;
pub use service::EnvelopeVerificationService;
