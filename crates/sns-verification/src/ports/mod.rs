//! # Ports Layer
//!
//! - **Inbound (Driving)**: API the pipeline orchestrator calls
//! - **Outbound (Driven)**: where signing certificates come from

pub mod inbound;
pub mod outbound;
