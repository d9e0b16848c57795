//! # Pipeline Decision
//!
//! Per-request "safe to process" state, threaded by `&mut` through each
//! validation stage.
//!
//! ## Invariants
//!
//! - A fresh decision is safe.
//! - `reject` is the only mutation; there is no way back to safe.
//! - The first rejection reason is kept. Later failures are logged only.

use crate::errors::Rejection;
use tracing::{debug, warn};

/// Outcome carried through the validation chain of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineDecision {
    rejection: Option<Rejection>,
}

impl PipelineDecision {
    /// Create a decision in the safe state.
    pub fn new() -> Self {
        Self { rejection: None }
    }

    /// Whether every check so far has passed.
    #[must_use]
    pub fn is_safe_to_process(&self) -> bool {
        self.rejection.is_none()
    }

    /// The first reason the request was rejected, if any.
    pub fn rejection(&self) -> Option<&Rejection> {
        self.rejection.as_ref()
    }

    /// Mark the request as unsafe.
    pub fn reject(&mut self, reason: Rejection) {
        warn!(reason = reason.label(), detail = %reason, "validation failed");
        match &self.rejection {
            None => self.rejection = Some(reason),
            Some(first) => {
                debug!(first = first.label(), "keeping first rejection reason");
            }
        }
    }

    /// Consume the decision, returning the rejection if there was one.
    pub fn into_rejection(self) -> Option<Rejection> {
        self.rejection
    }
}
