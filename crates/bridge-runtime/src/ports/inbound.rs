//! Inbound port: one raw request body in, one outcome out.

use crate::domain::error::BridgeError;
use crate::domain::outcome::PipelineOutcome;
use async_trait::async_trait;

/// Envelope processing API exposed to the HTTP gateway.
#[async_trait]
pub trait EnvelopeProcessingApi: Send + Sync {
    /// Parse, authenticate, classify and dispatch one request body.
    ///
    /// Validation failures come back as `Ok(PipelineOutcome::Rejected)`.
    /// `Err` is reserved for bodies that are not envelopes and for an
    /// unavailable command pipe.
    async fn process(&self, body: &str) -> Result<PipelineOutcome, BridgeError>;
}
