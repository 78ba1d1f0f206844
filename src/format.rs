//! Display formatting for durations, accuracies and timestamps

use crate::metrics::MetricValue;
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Write as _;
use std::str::FromStr;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Placeholder shown when a timestamp is missing
pub const TIMESTAMP_PLACEHOLDER: &str = "N/A";

/// Format a maximum experiment duration given in seconds
///
/// Whole hours print as `"2h"`; otherwise `"1h 30min"` or `"45min"`
/// (leftover seconds are dropped). Non-positive durations print as `"0"`.
pub fn convert_time(seconds: i64) -> String {
    if seconds <= 0 {
        return "0".to_string();
    }
    if seconds % HOUR == 0 {
        return format!("{}h", seconds / HOUR);
    }

    let hours = seconds / HOUR;
    let minutes = (seconds / MINUTE) % 60;
    if hours > 0 {
        format!("{hours}h {minutes}min")
    } else {
        format!("{minutes}min")
    }
}

/// Format a trial duration to the second, e.g. `"1d 2h 10m 30s"`
///
/// Zero components are omitted and fractional seconds are floored. Empty,
/// negative and non-finite durations print as `"0s"`.
pub fn convert_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0s".to_string();
    }

    let mut remaining = seconds;
    let mut out = String::new();
    for (unit, suffix) in [(DAY, 'd'), (HOUR, 'h'), (MINUTE, 'm')] {
        let count = (remaining / unit as f64).floor();
        if count > 0.0 {
            let _ = write!(out, "{count}{suffix} ");
            remaining -= count * unit as f64;
        }
    }
    let secs = remaining.floor();
    if secs > 0.0 {
        let _ = write!(out, "{secs}s");
    }

    let trimmed = out.trim_end();
    if trimmed.is_empty() {
        "0s".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Unit for expressing a duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Day,
    Hour,
    Minute,
}

impl TimeUnit {
    /// Number of seconds in one unit
    pub fn seconds(&self) -> f64 {
        match self {
            Self::Day => DAY as f64,
            Self::Hour => HOUR as f64,
            Self::Minute => MINUTE as f64,
        }
    }
}

impl FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "d" => Ok(Self::Day),
            "h" => Ok(Self::Hour),
            "m" => Ok(Self::Minute),
            other => Err(format!(
                "Unknown time unit '{}'. Expected one of: d, h, m",
                other
            )),
        }
    }
}

/// Convert a duration in seconds to the given unit
pub fn convert_time_as_unit(unit: TimeUnit, seconds: f64) -> f64 {
    seconds / unit.seconds()
}

/// Format an accuracy with at most six decimals, without trailing zeros
///
/// `0.5` → `"0.5"`, `2.0` → `"2"`, `1.23456789` → `"1.234568"`.
pub fn format_accuracy(accuracy: f64) -> String {
    if accuracy.is_nan() {
        return "NaN".to_string();
    }
    if accuracy.is_infinite() {
        let sign = if accuracy < 0.0 { "-" } else { "" };
        return format!("{sign}Infinity");
    }

    let fixed = format!("{:.6}", accuracy);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Format an arbitrary cell for display in a table
///
/// Numbers and strings display as-is; arrays join their elements with `,`
/// and objects show as `[object Object]`.
pub fn format_complex_type_value(value: &MetricValue) -> String {
    match value {
        MetricValue::Null => "null".to_string(),
        MetricValue::Bool(b) => b.to_string(),
        MetricValue::Number(n) => format_number(*n),
        MetricValue::String(s) => s.clone(),
        MetricValue::Array(items) => items
            .iter()
            .map(|item| match item {
                // Array elements that are null render empty
                MetricValue::Null => String::new(),
                other => format_complex_type_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        MetricValue::Object(_) => "[object Object]".to_string(),
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n < 0.0 { "-Infinity" } else { "Infinity" };
        text.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        // Exponent form with an explicit sign, e.g. `1e+21`, `1.5e-7`
        let text = format!("{:e}", n);
        match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => text,
        }
    } else {
        n.to_string()
    }
}

/// Format a millisecond timestamp in local time, e.g. `"3/14/2024, 9:05:02 PM"`
///
/// Missing or zero timestamps show `placeholder` (or [`TIMESTAMP_PLACEHOLDER`]).
pub fn format_timestamp(timestamp_ms: Option<i64>, placeholder: Option<&str>) -> String {
    format_timestamp_in(&Local, timestamp_ms, placeholder)
}

/// [`format_timestamp`] in an explicit time zone
pub fn format_timestamp_in<Tz>(
    tz: &Tz,
    timestamp_ms: Option<i64>,
    placeholder: Option<&str>,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    timestamp_ms
        .filter(|ms| *ms != 0)
        .and_then(|ms| format_millis(tz, ms))
        .unwrap_or_else(|| placeholder.unwrap_or(TIMESTAMP_PLACEHOLDER).to_string())
}

/// Format an experiment's start/end time, which the manager may report as a
/// number of milliseconds or as a string placeholder
pub fn format_experiment_timestamp(value: &MetricValue) -> String {
    value
        .as_f64()
        .filter(|ms| ms.is_finite())
        .and_then(|ms| format_millis(&Local, ms as i64))
        .unwrap_or_else(|| TIMESTAMP_PLACEHOLDER.to_string())
}

fn format_millis<Tz>(tz: &Tz, ms: i64) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let utc = DateTime::from_timestamp_millis(ms)?;
    Some(
        utc.with_timezone(tz)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string(),
    )
}
