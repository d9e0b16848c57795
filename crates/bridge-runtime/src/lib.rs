//! # Bridge Runtime
//!
//! Hosts the SNS → Nagios pipeline behind an HTTP endpoint.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): configuration, errors, `PipelineOutcome`
//! - **Ports Layer** (`ports/`): `EnvelopeProcessingApi` (inbound);
//!   `CommandSink`, `HeartbeatSink`, `SubscriptionConfirmer`, `TimeSource` (outbound)
//! - **Adapters Layer** (`adapters/`): Nagios command pipe, daily heartbeat
//!   file, reqwest subscription confirmer
//! - **Service Layer** (`service.rs`): `BridgePipeline`
//! - **Gateway** (`gateway.rs`): axum router
//!
//! Every request is handled on its own task with no shared mutable state;
//! the pipeline holds configuration and stateless adapters only.

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod gateway;
pub mod ports;
pub mod service;

// Re-export public API
pub use cli::Args;
pub use domain::config::{BridgeConfig, ConfigError};
pub use domain::error::BridgeError;
pub use domain::outcome::PipelineOutcome;
pub use gateway::{build_router, serve};
pub use ports::inbound::EnvelopeProcessingApi;
pub use ports::outbound::{
    CommandSink, HeartbeatSink, SubscriptionConfirmer, SystemTimeSource, TimeSource,
};
pub use service::{BridgePipeline, PipelineSettings};
