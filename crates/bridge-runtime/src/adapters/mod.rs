//! # Adapters Layer
//!
//! Concrete implementations of the outbound ports.

pub mod heartbeat_file;
pub mod nagios_pipe;
pub mod subscription_confirmer;

pub use heartbeat_file::DailyHeartbeatFile;
pub use nagios_pipe::NagiosCommandPipe;
pub use subscription_confirmer::HttpSubscriptionConfirmer;
