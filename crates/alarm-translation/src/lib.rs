//! # Alarm Translation
//!
//! Turns an authenticated SNS envelope into the artifact the monitoring side
//! consumes.
//!
//! ## Architecture
//!
//! Pure domain logic, no I/O:
//! - `classification`: handshake, alarm notification, scheduled probe, or unrecognized
//! - `payload`: optional alarm schema and the single defaulting pass
//! - `status`: `(metric, state)` to Nagios service status
//! - `labels`: host, service and status-info text
//! - `command`: the `PROCESS_SERVICE_CHECK_RESULT` line
//! - `heartbeat`: the scheduled-probe record
//!
//! Writing either artifact anywhere is the runtime's job.

pub mod domain;

// Re-export public API
pub use domain::classification::{classify, Classification};
pub use domain::command::{translate, MonitoringCommand};
pub use domain::heartbeat::{HeartbeatRecord, ScheduledProbePayload, NO_RESOURCES_PLACEHOLDER};
pub use domain::labels::CheckLabels;
pub use domain::payload::{AlarmPayload, Dimension, FieldDefaulted, ResolvedAlarm, Trigger};
pub use domain::status::{status_for, NewStateValue, ServiceStatus};
