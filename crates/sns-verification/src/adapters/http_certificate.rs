//! # HTTP Certificate Source
//!
//! Fetches the signing certificate named by `SigningCertURL` with reqwest.
//! Bounded by an explicit request timeout and a body size cap so that a slow
//! or hostile endpoint cannot stall the handler. Redirects are not followed:
//! the key must come from the host that passed the allow-list check.

use crate::domain::certificate::public_key_from_pem;
use crate::domain::errors::CertificateError;
use crate::ports::outbound::CertificateSource;
use async_trait::async_trait;
use rsa::RsaPublicKey;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default request timeout for certificate downloads.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Largest certificate body accepted, in bytes.
pub const DEFAULT_MAX_CERTIFICATE_BYTES: usize = 8192;

/// reqwest-backed `CertificateSource`. Holds no per-request state.
#[derive(Debug, Clone)]
pub struct HttpCertificateSource {
    client: reqwest::Client,
    max_bytes: usize,
}

impl HttpCertificateSource {
    /// Create a source with the given timeout and size cap.
    pub fn new(timeout: Duration, max_bytes: usize) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { client, max_bytes })
    }

    /// Create a source with the default limits.
    pub fn with_defaults() -> reqwest::Result<Self> {
        Self::new(DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_CERTIFICATE_BYTES)
    }
}

#[async_trait]
impl CertificateSource for HttpCertificateSource {
    #[instrument(skip(self), fields(max_bytes = self.max_bytes))]
    async fn fetch(&self, url: &str) -> Result<RsaPublicKey, CertificateError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CertificateError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CertificateError::HttpStatus(status.as_u16()));
        }

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| CertificateError::Unreachable(e.to_string()))?
        {
            let size = body.len() + chunk.len();
            if size > self.max_bytes {
                return Err(CertificateError::TooLarge {
                    size,
                    limit: self.max_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        debug!(bytes = body.len(), "certificate downloaded");
        public_key_from_pem(&body)
    }
}
