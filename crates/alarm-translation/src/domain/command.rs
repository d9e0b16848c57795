//! # Monitoring Command
//!
//! The Nagios external command for a passive service check result:
//!
//! ```text
//! [<epoch>] PROCESS_SERVICE_CHECK_RESULT;<host>;<service>;<code>;<info>\n
//! ```
//!
//! Formatting is a pure function of the fields. Carriage returns and line
//! feeds inside a field are replaced with spaces; the daemon reads one
//! command per line.

use super::labels::CheckLabels;
use super::payload::{AlarmPayload, ResolvedAlarm};
use super::status::{status_for, ServiceStatus};
use serde::Serialize;
use std::fmt;

/// One passive check result, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitoringCommand {
    pub epoch_seconds: i64,
    pub host_label: String,
    pub service_label: String,
    pub status: ServiceStatus,
    pub status_info: String,
}

impl MonitoringCommand {
    /// Build a command from a resolved alarm observed at `epoch_seconds`.
    pub fn from_alarm(alarm: &ResolvedAlarm, epoch_seconds: i64) -> Self {
        let labels = CheckLabels::from_alarm(alarm);
        Self {
            epoch_seconds,
            host_label: labels.host,
            service_label: labels.service,
            status: status_for(&alarm.metric_name, &alarm.new_state_value),
            status_info: labels.info,
        }
    }

    /// The command line, newline-terminated.
    pub fn format_line(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for MonitoringCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] PROCESS_SERVICE_CHECK_RESULT;{};{};{};{}",
            self.epoch_seconds,
            single_line(&self.host_label),
            single_line(&self.service_label),
            self.status.code(),
            single_line(&self.status_info),
        )
    }
}

/// Resolve an alarm payload and translate it into a command.
pub fn translate(payload: &AlarmPayload, observed_at: i64) -> MonitoringCommand {
    let (alarm, _notices) = payload.resolve();
    MonitoringCommand::from_alarm(&alarm, observed_at)
}

fn single_line(field: &str) -> String {
    field.replace(['\r', '\n'], " ")
}
