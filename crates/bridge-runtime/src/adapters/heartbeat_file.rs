//! # Daily Heartbeat File
//!
//! One file per local calendar day, `<dir>/<YYYY-MM-DD>_SNS-incoming-check.txt`.
//! Nagios watches the file's age to prove that probes are still arriving.

use crate::domain::error::BridgeError;
use crate::ports::outbound::HeartbeatSink;
use alarm_translation::HeartbeatRecord;
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Appends heartbeat records to the file for today's date.
#[derive(Debug, Clone)]
pub struct DailyHeartbeatFile {
    directory: PathBuf,
}

impl DailyHeartbeatFile {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// File that records for `date` go to.
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.directory
            .join(format!("{}_SNS-incoming-check.txt", date.format("%Y-%m-%d")))
    }

    fn today(&self) -> PathBuf {
        self.path_for(Local::now().date_naive())
    }
}

#[async_trait]
impl HeartbeatSink for DailyHeartbeatFile {
    async fn append(&self, record: &HeartbeatRecord) -> Result<(), BridgeError> {
        let path = self.today();
        let unavailable = |e: std::io::Error| {
            warn!(path = %path.display(), error = %e, "heartbeat file cannot be opened");
            BridgeError::SinkUnavailable {
                path: path.clone(),
                reason: e.to_string(),
            }
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(unavailable)?;
        file.write_all(record.format_line().as_bytes())
            .await
            .map_err(unavailable)?;
        file.flush().await.map_err(unavailable)?;

        debug!(path = %path.display(), "heartbeat recorded");
        Ok(())
    }
}
