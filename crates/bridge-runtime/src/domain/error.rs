//! Request-fatal and startup errors.
//!
//! Validation failures are not errors here; they travel as `Rejection`
//! inside a successful `PipelineOutcome`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a request without an outcome.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Empty or whitespace-only request body
    #[error("no POST data")]
    EmptyBody,

    /// Body is not a JSON envelope
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// An output sink cannot be opened or written
    #[error("cannot write to {path}: {reason}")]
    SinkUnavailable { path: PathBuf, reason: String },

    /// Startup configuration or wiring failure
    #[error("configuration error: {0}")]
    Config(String),
}

impl BridgeError {
    /// Short machine-readable label for response bodies.
    pub fn label(&self) -> &'static str {
        match self {
            BridgeError::EmptyBody => "empty_body",
            BridgeError::MalformedEnvelope(_) => "malformed_envelope",
            BridgeError::SinkUnavailable { .. } => "sink_unavailable",
            BridgeError::Config(_) => "config",
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            BridgeError::EmptyBody | BridgeError::MalformedEnvelope(_) => StatusCode::BAD_REQUEST,
            BridgeError::SinkUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            BridgeError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.label(),
            "message": self.to_string(),
        });
        (self.status_code(), Json(body)).into_response()
    }
}
