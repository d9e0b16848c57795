//! # Alarm Payload
//!
//! The CloudWatch alarm carried as a JSON string in a notification's
//! `Message`. Every field is optional; [`AlarmPayload::resolve`] is the one
//! place where missing fields get their placeholder values.
//!
//! Scalars of the wrong JSON type (numbers, booleans) are kept as their text
//! form so one odd field never discards the rest of the alarm.

use super::status::NewStateValue;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

/// Placeholder used when `Trigger` or `Trigger.MetricName` is missing.
pub const UNDEFINED_METRIC_NAME: &str = "undefined Trigger MetricName";

/// Raw, optional alarm schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AlarmPayload {
    #[serde(rename = "AlarmName", default, deserialize_with = "lenient_string")]
    pub alarm_name: Option<String>,

    #[serde(rename = "AlarmDescription", default, deserialize_with = "lenient_string")]
    pub alarm_description: Option<String>,

    #[serde(rename = "NewStateValue", default, deserialize_with = "lenient_string")]
    pub new_state_value: Option<String>,

    #[serde(rename = "NewStateReason", default, deserialize_with = "lenient_string")]
    pub new_state_reason: Option<String>,

    #[serde(rename = "StateChangeTime", default, deserialize_with = "lenient_string")]
    pub state_change_time: Option<String>,

    #[serde(rename = "Trigger", default, deserialize_with = "lenient_trigger")]
    pub trigger: Option<Trigger>,
}

/// `Trigger` block of an alarm.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Trigger {
    #[serde(rename = "MetricName", default, deserialize_with = "lenient_string")]
    pub metric_name: Option<String>,

    #[serde(rename = "Dimensions", default, deserialize_with = "lenient_dimensions")]
    pub dimensions: Vec<Dimension>,
}

/// One `{name, value}` metric dimension. `Name`/`Value` are accepted too.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

/// A missing field that was replaced with its placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefaulted {
    /// Wire name of the field, e.g. `AlarmDescription` or `Trigger MetricName`.
    pub field: &'static str,
    /// Value substituted for it.
    pub placeholder: String,
}

impl fmt::Display for FieldDefaulted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "missing {} replaced with default value \"{}\"",
            self.field, self.placeholder
        )
    }
}

/// Alarm with every field present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAlarm {
    pub alarm_name: String,
    pub alarm_description: String,
    pub new_state_value: NewStateValue,
    pub new_state_reason: String,
    pub state_change_time: String,
    pub metric_name: String,
    pub dimensions: Vec<Dimension>,
}

impl AlarmPayload {
    /// Parse a notification `Message`.
    ///
    /// Anything that is not a JSON object yields an empty payload, which
    /// resolves to all placeholders.
    pub fn parse(message: &str) -> Self {
        match serde_json::from_str::<Value>(message) {
            Ok(value) => Self::from_value(value),
            Err(e) => {
                debug!(error = %e, "alarm message is not JSON; using placeholders");
                Self::default()
            }
        }
    }

    /// Build from an already parsed JSON value.
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            debug!("alarm message is not a JSON object; using placeholders");
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_else(|e| {
            debug!(error = %e, "alarm message did not match schema; using placeholders");
            Self::default()
        })
    }

    /// Fill every missing field with its placeholder.
    ///
    /// Each substitution is logged at `warn` and returned as a notice.
    pub fn resolve(&self) -> (ResolvedAlarm, Vec<FieldDefaulted>) {
        let mut notices = Vec::new();

        let mut field = |name: &'static str, value: &Option<String>| -> String {
            match value {
                Some(v) => v.clone(),
                None => {
                    let placeholder = format!("undefined {name}");
                    notices.push(FieldDefaulted {
                        field: name,
                        placeholder: placeholder.clone(),
                    });
                    placeholder
                }
            }
        };

        let alarm_name = field("AlarmName", &self.alarm_name);
        let alarm_description = field("AlarmDescription", &self.alarm_description);
        let new_state_value = field("NewStateValue", &self.new_state_value);
        let new_state_reason = field("NewStateReason", &self.new_state_reason);
        let state_change_time = field("StateChangeTime", &self.state_change_time);

        let metric_name = match self.trigger.as_ref().and_then(|t| t.metric_name.clone()) {
            Some(name) => name,
            None => {
                notices.push(FieldDefaulted {
                    field: "Trigger MetricName",
                    placeholder: UNDEFINED_METRIC_NAME.to_string(),
                });
                UNDEFINED_METRIC_NAME.to_string()
            }
        };

        for notice in &notices {
            warn!(field = notice.field, placeholder = %notice.placeholder, "alarm field defaulted");
        }

        let resolved = ResolvedAlarm {
            alarm_name,
            alarm_description,
            new_state_value: NewStateValue::from(new_state_value.as_str()),
            new_state_reason,
            state_change_time,
            metric_name,
            dimensions: self
                .trigger
                .as_ref()
                .map(|t| t.dimensions.clone())
                .unwrap_or_default(),
        };

        (resolved, notices)
    }
}

// =============================================================================
// Lenient field decoding
// =============================================================================

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

fn lenient_trigger<'de, D>(deserializer: D) -> Result<Option<Trigger>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

fn lenient_dimensions<'de, D>(deserializer: D) -> Result<Vec<Dimension>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(mut map) => {
                let mut take = |lower: &str, upper: &str| {
                    map.remove(lower)
                        .or_else(|| map.remove(upper))
                        .and_then(scalar_text)
                        .unwrap_or_default()
                };
                let name = take("name", "Name");
                let value = take("value", "Value");
                Some(Dimension { name, value })
            }
            _ => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_ALARM: &str = r#"{
        "AlarmName": "www-example-com HTTP 5xx errors",
        "AlarmDescription": "5xx responses from the load balancer",
        "AWSAccountId": "123456789012",
        "NewStateValue": "ALARM",
        "NewStateReason": "Threshold Crossed: 1 datapoint [12.0] was greater than 10.0",
        "StateChangeTime": "2014-10-31T14:02:11.123+0000",
        "Region": "US East - N. Virginia",
        "OldStateValue": "OK",
        "Trigger": {
            "MetricName": "HTTPCode_ELB_5XX_Count",
            "Namespace": "AWS/ApplicationELB",
            "Dimensions": [{"name": "LoadBalancer", "value": "app/www-lb/50dc6c495c0c9188"}]
        }
    }"#;

    #[test]
    fn test_full_alarm_resolves_without_notices() {
        let (alarm, notices) = AlarmPayload::parse(FULL_ALARM).resolve();

        assert!(notices.is_empty());
        assert_eq!(alarm.alarm_name, "www-example-com HTTP 5xx errors");
        assert_eq!(alarm.new_state_value, NewStateValue::Alarm);
        assert_eq!(alarm.metric_name, "HTTPCode_ELB_5XX_Count");
        assert_eq!(
            alarm.dimensions,
            vec![Dimension {
                name: "LoadBalancer".into(),
                value: "app/www-lb/50dc6c495c0c9188".into()
            }]
        );
    }

    #[test]
    fn test_missing_description_gets_placeholder() {
        let message = r#"{"AlarmName":"site-a CPU","NewStateValue":"OK","NewStateReason":"r",
            "StateChangeTime":"t","Trigger":{"MetricName":"CPUUtilization"}}"#;

        let (alarm, notices) = AlarmPayload::parse(message).resolve();

        assert_eq!(alarm.alarm_description, "undefined AlarmDescription");
        assert_eq!(
            notices,
            vec![FieldDefaulted {
                field: "AlarmDescription",
                placeholder: "undefined AlarmDescription".into()
            }]
        );
    }

    #[test]
    fn test_missing_trigger_uses_metric_placeholder() {
        let (alarm, notices) =
            AlarmPayload::parse(r#"{"AlarmName":"a","NewStateValue":"OK"}"#).resolve();

        assert_eq!(alarm.metric_name, "undefined Trigger MetricName");
        assert!(alarm.dimensions.is_empty());
        assert!(notices.iter().any(|n| n.field == "Trigger MetricName"));
    }

    #[test]
    fn test_trigger_without_metric_name_keeps_dimensions() {
        let message = r#"{"Trigger":{"Dimensions":[{"name":"InstanceId","value":"i-1"}]}}"#;
        let (alarm, _) = AlarmPayload::parse(message).resolve();

        assert_eq!(alarm.metric_name, UNDEFINED_METRIC_NAME);
        assert_eq!(alarm.dimensions[0].value, "i-1");
    }

    #[test]
    fn test_non_json_message_is_all_placeholders() {
        let (alarm, notices) = AlarmPayload::parse("plain text alarm").resolve();

        assert_eq!(notices.len(), 6);
        assert_eq!(alarm.alarm_name, "undefined AlarmName");
        assert_eq!(alarm.state_change_time, "undefined StateChangeTime");
        assert_eq!(
            alarm.new_state_value,
            NewStateValue::Other("undefined NewStateValue".into())
        );
    }

    #[test]
    fn test_json_array_message_is_all_placeholders() {
        assert_eq!(AlarmPayload::parse("[1,2,3]"), AlarmPayload::default());
    }

    #[test]
    fn test_null_field_counts_as_missing() {
        let (alarm, notices) = AlarmPayload::parse(r#"{"AlarmName":null}"#).resolve();
        assert_eq!(alarm.alarm_name, "undefined AlarmName");
        assert!(notices.iter().any(|n| n.field == "AlarmName"));
    }

    #[test]
    fn test_non_string_scalars_are_kept_as_text() {
        let payload = AlarmPayload::parse(
            r#"{"AlarmName":42,"Trigger":{"MetricName":"m","Dimensions":[{"Name":"Port","Value":443}]}}"#,
        );
        assert_eq!(payload.alarm_name.as_deref(), Some("42"));

        let (alarm, _) = payload.resolve();
        assert_eq!(
            alarm.dimensions,
            vec![Dimension {
                name: "Port".into(),
                value: "443".into()
            }]
        );
    }

    #[test]
    fn test_malformed_trigger_is_treated_as_missing() {
        let (alarm, _) =
            AlarmPayload::parse(r#"{"AlarmName":"a b","Trigger":"CPUUtilization"}"#).resolve();
        assert_eq!(alarm.alarm_name, "a b");
        assert_eq!(alarm.metric_name, UNDEFINED_METRIC_NAME);
    }

    #[test]
    fn test_notice_display() {
        let notice = FieldDefaulted {
            field: "NewStateReason",
            placeholder: "undefined NewStateReason".into(),
        };
        assert_eq!(
            notice.to_string(),
            "missing NewStateReason replaced with default value \"undefined NewStateReason\""
        );
    }
}
