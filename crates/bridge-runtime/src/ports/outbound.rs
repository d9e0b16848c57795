//! Outbound ports: where the pipeline's side effects go.

use crate::domain::error::BridgeError;
use alarm_translation::{HeartbeatRecord, MonitoringCommand};
use async_trait::async_trait;

/// Receives passive check results.
#[async_trait]
pub trait CommandSink: Send + Sync {
    /// Write one command line. Fails with `SinkUnavailable`.
    async fn submit(&self, command: &MonitoringCommand) -> Result<(), BridgeError>;
}

/// Receives scheduled-probe heartbeat records.
#[async_trait]
pub trait HeartbeatSink: Send + Sync {
    /// Append one record. Failure is non-fatal to the caller.
    async fn append(&self, record: &HeartbeatRecord) -> Result<(), BridgeError>;
}

/// Completes subscription handshakes.
#[async_trait]
pub trait SubscriptionConfirmer: Send + Sync {
    /// Request `subscribe_url` once. Best effort; the outcome is only logged.
    async fn confirm(&self, subscribe_url: &str);
}

/// Time source for command and heartbeat timestamps.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Current Unix time in seconds.
    fn epoch_seconds(&self) -> i64;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn epoch_seconds(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Fixed time source for testing.
#[cfg(test)]
pub struct MockTimeSource {
    time: std::sync::atomic::AtomicI64,
}

#[cfg(test)]
impl MockTimeSource {
    pub fn new(initial: i64) -> Self {
        Self {
            time: std::sync::atomic::AtomicI64::new(initial),
        }
    }
}

#[cfg(test)]
impl TimeSource for MockTimeSource {
    fn epoch_seconds(&self) -> i64 {
        self.time.load(std::sync::atomic::Ordering::SeqCst)
    }
}
