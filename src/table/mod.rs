//! Trial table rows, filters and column sorting

pub mod sort;

pub use sort::{compare_cells, copy_and_sort, is_orderable};

use crate::metrics::MetricValue;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A record that can be sorted by a named column
pub trait SortRecord {
    /// Value of `column` for this record, `None` when the record has no such field
    fn sort_value(&self, column: &str) -> Option<MetricValue>;
}

impl SortRecord for BTreeMap<String, MetricValue> {
    fn sort_value(&self, column: &str) -> Option<MetricValue> {
        self.get(column).cloned()
    }
}

impl SortRecord for HashMap<String, MetricValue> {
    fn sort_value(&self, column: &str) -> Option<MetricValue> {
        self.get(column).cloned()
    }
}

/// Lifecycle status of a trial job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrialStatus {
    Waiting,
    Running,
    Succeeded,
    Failed,
    UserCanceled,
    SysCanceled,
    EarlyStopped,
    #[serde(other)]
    Unknown,
}

impl TrialStatus {
    /// Convert to the manager's wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "WAITING",
            Self::Running => "RUNNING",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
            Self::UserCanceled => "USER_CANCELED",
            Self::SysCanceled => "SYS_CANCELED",
            Self::EarlyStopped => "EARLY_STOPPED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// One row of the trial table
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialRow {
    pub id: String,
    pub sequence_id: u64,
    pub status: TrialStatus,
    /// Milliseconds since the Unix epoch; waiting trials have none
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub end_time: Option<i64>,
    /// Seconds
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub latest_accuracy: Option<f64>,
    /// Fields of the final metric, addressable as extra columns
    #[serde(default)]
    pub metrics: BTreeMap<String, MetricValue>,
}

impl SortRecord for TrialRow {
    fn sort_value(&self, column: &str) -> Option<MetricValue> {
        let number = |n: Option<f64>| n.map(MetricValue::Number);
        match column {
            "id" => Some(MetricValue::String(self.id.clone())),
            "sequenceId" => Some(MetricValue::Number(self.sequence_id as f64)),
            "status" => Some(MetricValue::from(self.status.as_str())),
            "startTime" => number(self.start_time.map(|t| t as f64)),
            "endTime" => number(self.end_time.map(|t| t as f64)),
            "duration" => number(self.duration),
            "latestAccuracy" => number(self.latest_accuracy),
            other => self.metrics.get(other).cloned(),
        }
    }
}

/// Keep only trials that finished successfully
pub fn filter_by_status(row: &TrialRow) -> bool {
    row.status == TrialStatus::Succeeded
}

/// Keep trials that have started (a waiting trial has no start time)
pub fn filter_duration(row: &TrialRow) -> bool {
    row.status != TrialStatus::Waiting
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trial(id: &str, status: TrialStatus, accuracy: Option<f64>) -> TrialRow {
        TrialRow {
            id: id.to_string(),
            sequence_id: 0,
            status,
            start_time: None,
            end_time: None,
            duration: None,
            latest_accuracy: accuracy,
            metrics: BTreeMap::new(),
        }
    }

    #[test]
    fn test_trial_row_deserializes_camel_case() {
        let json = r#"{
            "id": "Ab3xZ",
            "sequenceId": 4,
            "status": "USER_CANCELED",
            "startTime": 1700000000000,
            "duration": 12.5,
            "metrics": {"default": 0.9}
        }"#;
        let row: TrialRow = serde_json::from_str(json).expect("should deserialize");
        assert_eq!(row.sequence_id, 4);
        assert_eq!(row.status, TrialStatus::UserCanceled);
        assert_eq!(row.end_time, None);
        assert_eq!(row.sort_value("default"), Some(MetricValue::Number(0.9)));
    }

    #[test]
    fn test_unknown_status_deserializes() {
        let status: TrialStatus = serde_json::from_str(r#""SOMETHING_NEW""#).unwrap();
        assert_eq!(status, TrialStatus::Unknown);
    }

    #[test]
    fn test_status_round_trips_wire_name() {
        for status in [TrialStatus::Succeeded, TrialStatus::EarlyStopped] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn test_filter_by_status_keeps_succeeded() {
        assert!(filter_by_status(&trial("a", TrialStatus::Succeeded, None)));
        assert!(!filter_by_status(&trial("b", TrialStatus::Failed, None)));
        assert!(!filter_by_status(&trial("c", TrialStatus::Running, None)));
    }

    #[test]
    fn test_filter_duration_drops_waiting() {
        assert!(!filter_duration(&trial("a", TrialStatus::Waiting, None)));
        assert!(filter_duration(&trial("b", TrialStatus::Running, None)));
        assert!(filter_duration(&trial("c", TrialStatus::Succeeded, None)));
    }

    #[test]
    fn test_sort_trials_by_accuracy_puts_missing_last() {
        let rows = vec![
            trial("a", TrialStatus::Succeeded, Some(0.7)),
            trial("b", TrialStatus::Running, None),
            trial("c", TrialStatus::Succeeded, Some(0.9)),
            trial("d", TrialStatus::Failed, Some(f64::NAN)),
        ];

        let ids = |rows: &[TrialRow]| rows.iter().map(|r| r.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&copy_and_sort(&rows, "latestAccuracy", true)), ["c", "a", "b", "d"]);
        assert_eq!(ids(&copy_and_sort(&rows, "latestAccuracy", false)), ["a", "c", "b", "d"]);
    }

    #[test]
    fn test_sort_trials_by_status_text() {
        let rows = vec![
            trial("a", TrialStatus::Succeeded, None),
            trial("b", TrialStatus::Failed, None),
            trial("c", TrialStatus::Running, None),
        ];
        let sorted = copy_and_sort(&rows, "status", false);
        let statuses: Vec<_> = sorted.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            [TrialStatus::Failed, TrialStatus::Running, TrialStatus::Succeeded]
        );
    }

    #[test]
    fn test_hash_map_rows_sort() {
        let rows: Vec<HashMap<String, MetricValue>> = [2.0, 1.0]
            .into_iter()
            .map(|n| HashMap::from([("loss".to_string(), MetricValue::Number(n))]))
            .collect();
        let sorted = copy_and_sort(&rows, "loss", false);
        assert_eq!(sorted[0]["loss"], MetricValue::Number(1.0));
    }
}
