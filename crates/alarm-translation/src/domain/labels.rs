//! # Check Labels
//!
//! Alarm names follow the `<site-name> <description>` convention, e.g.
//! `www-example-com HTTP 5xx errors`. The site part becomes the Nagios host
//! (dashes back to dots), the rest becomes the status text prefix. The host is
//! always `<site>:<first dimension value>`; with no dimension the value is
//! empty and the trailing `:` stays, since Nagios matches host names exactly.

use super::payload::ResolvedAlarm;

/// Host, service and status-info text for one passive check result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckLabels {
    pub host: String,
    pub service: String,
    pub info: String,
}

impl CheckLabels {
    pub fn from_alarm(alarm: &ResolvedAlarm) -> Self {
        let (site, remainder) = alarm
            .alarm_name
            .split_once(' ')
            .unwrap_or((alarm.alarm_name.as_str(), ""));

        let site = site.replace('-', ".");
        let dimension = alarm
            .dimensions
            .first()
            .map(|d| d.value.as_str())
            .unwrap_or_default();
        let host = format!("{site}:{dimension}");

        Self {
            host,
            service: format!("{}: {}", alarm.metric_name, alarm.alarm_name),
            info: format!(
                "{remainder}: {} {}",
                alarm.new_state_reason, alarm.state_change_time
            ),
        }
    }
}
