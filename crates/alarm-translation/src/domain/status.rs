//! # Status Mapping
//!
//! Pure function of `(metric name, new state)` to a Nagios service status.
//!
//! | Metric | ALARM | INSUFFICIENT_DATA | OK | other |
//! |---|---|---|---|---|
//! | contains `HTTPCode_ELB_` (any case) | 2 | 0 | 1 | 3 |
//! | anything else | 2 | 1 | 0 | 3 |
//!
//! ELB HTTP-code metrics publish no datapoints while the balancer is quiet,
//! so missing data is the healthy state for them.

use serde::Serialize;
use std::fmt;

/// Metric-name fragment that inverts the OK / INSUFFICIENT_DATA mapping.
const ELB_HTTP_CODE_MARKER: &str = "httpcode_elb_";

/// CloudWatch `NewStateValue`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewStateValue {
    Ok,
    Alarm,
    InsufficientData,
    /// Unknown value, or the placeholder for a missing one.
    Other(String),
}

impl NewStateValue {
    /// Wire value.
    pub fn as_str(&self) -> &str {
        match self {
            NewStateValue::Ok => "OK",
            NewStateValue::Alarm => "ALARM",
            NewStateValue::InsufficientData => "INSUFFICIENT_DATA",
            NewStateValue::Other(raw) => raw,
        }
    }
}

impl From<&str> for NewStateValue {
    fn from(raw: &str) -> Self {
        match raw {
            "OK" => NewStateValue::Ok,
            "ALARM" => NewStateValue::Alarm,
            "INSUFFICIENT_DATA" => NewStateValue::InsufficientData,
            other => NewStateValue::Other(other.to_string()),
        }
    }
}

impl fmt::Display for NewStateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nagios service check status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceStatus {
    Ok = 0,
    Warning = 1,
    Critical = 2,
    Unknown = 3,
}

impl ServiceStatus {
    /// Numeric return code as written into the command line.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Map a metric name and new state to a service status.
pub fn status_for(metric_name: &str, state: &NewStateValue) -> ServiceStatus {
    let elb_http_code = metric_name
        .to_ascii_lowercase()
        .contains(ELB_HTTP_CODE_MARKER);

    match (state, elb_http_code) {
        (NewStateValue::Alarm, _) => ServiceStatus::Critical,
        (NewStateValue::InsufficientData, true) => ServiceStatus::Ok,
        (NewStateValue::Ok, true) => ServiceStatus::Warning,
        (NewStateValue::InsufficientData, false) => ServiceStatus::Warning,
        (NewStateValue::Ok, false) => ServiceStatus::Ok,
        (NewStateValue::Other(_), _) => ServiceStatus::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn status(metric: &str, state: &str) -> u8 {
        status_for(metric, &NewStateValue::from(state)).code()
    }

    #[test]
    fn test_elb_http_code_metric_mapping() {
        assert_eq!(status("HTTPCode_ELB_5XX_Target", "INSUFFICIENT_DATA"), 0);
        assert_eq!(status("HTTPCode_ELB_5XX_Target", "OK"), 1);
        assert_eq!(status("HTTPCode_ELB_5XX_Target", "ALARM"), 2);
    }

    #[test]
    fn test_regular_metric_mapping() {
        assert_eq!(status("CPUUtilization", "INSUFFICIENT_DATA"), 1);
        assert_eq!(status("CPUUtilization", "OK"), 0);
        assert_eq!(status("CPUUtilization", "ALARM"), 2);
    }

    #[test]
    fn test_unexpected_state_is_unknown() {
        assert_eq!(status("CPUUtilization", "UNEXPECTED"), 3);
        assert_eq!(status("HTTPCode_ELB_4XX", "UNEXPECTED"), 3);
        assert_eq!(status("CPUUtilization", "undefined NewStateValue"), 3);
    }

    #[test]
    fn test_elb_marker_is_case_insensitive() {
        assert_eq!(status("httpcode_elb_5xx_count", "OK"), 1);
        assert_eq!(status("AWS/HttpCode_Elb_502", "INSUFFICIENT_DATA"), 0);
    }

    #[test]
    fn test_state_match_is_case_sensitive() {
        assert_eq!(NewStateValue::from("alarm"), NewStateValue::Other("alarm".into()));
        assert_eq!(status("CPUUtilization", "ok"), 3);
    }

    #[test]
    fn test_status_display_is_numeric() {
        assert_eq!(ServiceStatus::Critical.to_string(), "2");
        assert_eq!(ServiceStatus::Unknown.to_string(), "3");
    }

    proptest! {
        #[test]
        fn prop_alarm_is_always_critical(metric in "[A-Za-z0-9_/]{0,32}") {
            prop_assert_eq!(status_for(&metric, &NewStateValue::Alarm), ServiceStatus::Critical);
        }

        #[test]
        fn prop_unrecognized_state_is_always_unknown(
            metric in "[A-Za-z0-9_/]{0,32}",
            state in "[a-z ]{1,16}",
        ) {
            prop_assert_eq!(
                status_for(&metric, &NewStateValue::from(state.as_str())),
                ServiceStatus::Unknown
            );
        }

        #[test]
        fn prop_elb_inverts_ok_and_insufficient_data(suffix in "[0-9A-Za-z_]{0,16}") {
            let elb = format!("HTTPCode_ELB_{suffix}");
            let plain = format!("Latency{suffix}");
            prop_assert_eq!(status_for(&elb, &NewStateValue::Ok), status_for(&plain, &NewStateValue::InsufficientData));
            prop_assert_eq!(status_for(&elb, &NewStateValue::InsufficientData), status_for(&plain, &NewStateValue::Ok));
        }

        #[test]
        fn prop_codes_stay_in_range(metric in ".{0,32}", state in ".{0,24}") {
            prop_assert!(status_for(&metric, &NewStateValue::from(state.as_str())).code() <= 3);
        }
    }
}
