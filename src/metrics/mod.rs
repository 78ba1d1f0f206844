//! Metric records and their normalization
//!
//! Trial metrics arrive as records whose `data` payload is JSON-encoded twice.
//! [`parse_metrics`] is the one place that undoes the encoding; the functions in
//! [`normalize`] turn the decoded value into what each dashboard view plots.

pub mod decode;
pub mod normalize;
pub mod value;

pub use decode::parse_metrics;
pub use normalize::{
    FinalMetric, NormalizeMode, NormalizedMetric, final_metric, final_result, metric_accuracy,
    normalize_metric,
};
pub use value::MetricValue;

use crate::error::DecodeError;
use serde::{Deserialize, Serialize};

/// Kind of metric a trial reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricKind {
    /// Final result of the trial
    Final,
    /// Intermediate result
    Periodical,
    RequestParameter,
    #[serde(other)]
    Other,
}

/// One reported measurement from a training run
///
/// Only `data` is required; the remaining fields are carried through as the
/// manager reports them.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_job_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_id: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<MetricKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u64>,
    /// JSON-encoded JSON-encoded metric value
    pub data: String,
}

impl MetricRecord {
    /// Create a record carrying only a raw payload
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            timestamp: None,
            trial_job_id: None,
            parameter_id: None,
            kind: None,
            sequence: None,
            data: data.into(),
        }
    }

    /// Decode this record's payload
    pub fn decode(&self) -> Result<MetricValue, DecodeError> {
        parse_metrics(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_record_deserializes_manager_shape() {
        let json = r#"{
            "timestamp": 1700000000000,
            "trialJobId": "Ab3xZ",
            "parameterId": "0",
            "type": "FINAL",
            "sequence": 0,
            "data": "\"0.97\""
        }"#;

        let record: MetricRecord = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(record.trial_job_id.as_deref(), Some("Ab3xZ"));
        assert_eq!(record.kind, Some(MetricKind::Final));
        assert_eq!(record.decode().unwrap(), MetricValue::Number(0.97));
    }

    #[test]
    fn test_unknown_metric_kind_is_other() {
        let record: MetricRecord =
            serde_json::from_str(r#"{"type": "CUSTOM", "data": "\"1\""}"#).unwrap();
        assert_eq!(record.kind, Some(MetricKind::Other));
    }

    #[test]
    fn test_metric_record_only_needs_data() {
        let record: MetricRecord = serde_json::from_str(r#"{"data": "\"1\""}"#).unwrap();
        assert_eq!(record, MetricRecord::new("\"1\""));
    }
}
