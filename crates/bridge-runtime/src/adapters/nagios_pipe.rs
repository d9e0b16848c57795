//! # Nagios Command Pipe
//!
//! Appends `PROCESS_SERVICE_CHECK_RESULT` lines to the daemon's external
//! command file. The file is never created here: a missing pipe means Nagios
//! is not running (or the path is wrong), which is reported as
//! `SinkUnavailable`.

use crate::domain::error::BridgeError;
use crate::ports::outbound::CommandSink;
use alarm_translation::MonitoringCommand;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{error, info};

/// Append-only writer for the Nagios external command file.
#[derive(Debug, Clone)]
pub struct NagiosCommandPipe {
    path: PathBuf,
}

impl NagiosCommandPipe {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, e: std::io::Error) -> BridgeError {
        error!(path = %self.path.display(), error = %e, "cannot write to Nagios command pipe");
        BridgeError::SinkUnavailable {
            path: self.path.clone(),
            reason: e.to_string(),
        }
    }
}

#[async_trait]
impl CommandSink for NagiosCommandPipe {
    async fn submit(&self, command: &MonitoringCommand) -> Result<(), BridgeError> {
        let mut pipe = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.unavailable(e))?;

        pipe.write_all(command.format_line().as_bytes())
            .await
            .map_err(|e| self.unavailable(e))?;
        pipe.flush().await.map_err(|e| self.unavailable(e))?;

        info!(path = %self.path.display(), "written to Nagios command pipe");
        Ok(())
    }
}
