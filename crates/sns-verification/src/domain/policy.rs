//! # Verification Policy
//!
//! Which checks run and what they compare against.

use serde::Deserialize;

/// Default allow-listed signing-certificate host.
pub const DEFAULT_SOURCE_DOMAIN: &str = "sns.us-east-1.amazonaws.com";

/// Verification switches for one deployment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VerificationPolicy {
    /// Host that `SigningCertURL` must point at
    pub allowed_source_domain: String,
    /// Run the signature chain at all (debugging only when false)
    pub verify_certificate: bool,
    /// Check the certificate host before fetching
    pub verify_source_domain: bool,
    /// With the host check on, also require an `https` certificate URL
    pub require_https: bool,
}

impl Default for VerificationPolicy {
    fn default() -> Self {
        Self {
            allowed_source_domain: DEFAULT_SOURCE_DOMAIN.to_string(),
            verify_certificate: true,
            verify_source_domain: true,
            require_https: true,
        }
    }
}
