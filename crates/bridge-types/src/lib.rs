//! # Bridge Types Crate
//!
//! Types shared by every stage of the SNS → Nagios pipeline.
//!
//! ## Design Principles
//!
//! - **Wire fidelity**: `Envelope` uses the provider's exact field names.
//!   Every field is optional so that a partial envelope still deserializes and
//!   can be rejected by signature verification instead of by the parser.
//! - **Sticky decisions**: `PipelineDecision` can only move from safe to
//!   rejected within a request.

pub mod decision;
pub mod envelope;
pub mod errors;

pub use decision::PipelineDecision;
pub use envelope::{Envelope, MessageType};
pub use errors::Rejection;
