//! Interpretation of decoded metric payloads
//!
//! Three dashboard views read metrics differently:
//!
//! - [`final_result`] feeds the accuracy point graph and always yields a number.
//!   Unsupported shapes surface as NaN.
//! - [`final_metric`] is the canonical final result shown in trial tables.
//!   Non-finite numbers and arrays are unsupported (`None`).
//! - [`metric_accuracy`] reads a single intermediate point.
//!
//! The NaN handling differs between the first two on purpose; consumers of the
//! point graph rely on NaN reaching the plot.

use super::{MetricRecord, MetricValue};
use crate::error::DecodeError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field a payload uses to designate its primary value
pub const DEFAULT_FIELD: &str = "default";

/// Object-shaped final result of a trial
///
/// Always contains a [`DEFAULT_FIELD`] key. Built from a bare number it is
/// exactly `{"default": n}`; built from an object it keeps every field and
/// value. Fields are held sorted by key, so serializing does not reproduce the
/// order the trial reported them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinalMetric(BTreeMap<String, MetricValue>);

impl FinalMetric {
    /// Wrap a scalar as `{"default": value}`
    pub fn from_default(value: f64) -> Self {
        Self(BTreeMap::from([(
            DEFAULT_FIELD.to_string(),
            MetricValue::Number(value),
        )]))
    }

    /// Keep an object verbatim, provided it has a `default` key
    pub fn from_object(fields: BTreeMap<String, MetricValue>) -> Option<Self> {
        fields.contains_key(DEFAULT_FIELD).then_some(Self(fields))
    }

    /// The default metric, when it is numeric
    pub fn default_value(&self) -> Option<f64> {
        self.0.get(DEFAULT_FIELD).and_then(MetricValue::as_f64)
    }

    /// Look up any reported field
    pub fn get(&self, key: &str) -> Option<&MetricValue> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &BTreeMap<String, MetricValue> {
        &self.0
    }
}

/// Result of normalizing a metric sequence
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedMetric {
    Scalar(f64),
    Final(FinalMetric),
    /// Payload shape the view cannot use (e.g. array-valued)
    Unsupported,
}

/// Which view the metric is normalized for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NormalizeMode {
    /// Scalar for the accuracy point graph
    #[default]
    Plot,
    /// Canonical final result
    Final,
    /// Accuracy of the latest point
    Accuracy,
}

/// Scalar of the latest record, for plotting
///
/// - no records → 0
/// - number → the number, NaN and infinities included
/// - object (or null) → its `default` field when that is a non-zero number, else 0
/// - array, string, boolean → NaN
pub fn final_result(records: &[MetricRecord]) -> Result<f64, DecodeError> {
    let Some(last) = records.last() else {
        return Ok(0.0);
    };

    let value = last.decode()?;
    let scalar = match &value {
        MetricValue::Number(n) => *n,
        MetricValue::Object(_) | MetricValue::Null => value
            .get(DEFAULT_FIELD)
            .and_then(MetricValue::as_f64)
            .filter(|n| *n != 0.0 && !n.is_nan())
            .unwrap_or(0.0),
        MetricValue::Array(_) | MetricValue::String(_) | MetricValue::Bool(_) => f64::NAN,
    };
    Ok(scalar)
}

/// Canonical final result of the latest record
///
/// Returns `None` for no records, non-finite numbers, arrays, objects without
/// a `default` key and other scalars.
pub fn final_metric(records: &[MetricRecord]) -> Result<Option<FinalMetric>, DecodeError> {
    let Some(last) = records.last() else {
        return Ok(None);
    };

    let result = match last.decode()? {
        MetricValue::Number(n) if n.is_finite() => Some(FinalMetric::from_default(n)),
        MetricValue::Object(fields) => FinalMetric::from_object(fields),
        _ => None,
    };
    Ok(result)
}

/// Accuracy reported by a single record
///
/// A bare number is the accuracy. For objects the first numeric field among
/// `value`, `result` and `default` wins.
pub fn metric_accuracy(record: &MetricRecord) -> Result<Option<f64>, DecodeError> {
    let value = record.decode()?;
    if let Some(n) = value.as_f64() {
        return Ok(Some(n));
    }

    let accuracy = ["value", "result", DEFAULT_FIELD]
        .into_iter()
        .find_map(|field| value.get(field).and_then(MetricValue::as_f64));
    Ok(accuracy)
}

/// Normalize a metric sequence for the given view
///
/// `Accuracy` reads the latest record; an empty sequence is `Unsupported`
/// there, `Scalar(0.0)` for `Plot` and `Unsupported` for `Final`.
pub fn normalize_metric(
    records: &[MetricRecord],
    mode: NormalizeMode,
) -> Result<NormalizedMetric, DecodeError> {
    let normalized = match mode {
        NormalizeMode::Plot => NormalizedMetric::Scalar(final_result(records)?),
        NormalizeMode::Final => match final_metric(records)? {
            Some(metric) => NormalizedMetric::Final(metric),
            None => NormalizedMetric::Unsupported,
        },
        NormalizeMode::Accuracy => {
            let accuracy = match records.last() {
                Some(record) => metric_accuracy(record)?,
                None => None,
            };
            match accuracy {
                Some(n) => NormalizedMetric::Scalar(n),
                None => NormalizedMetric::Unsupported,
            }
        }
    };

    tracing::trace!(
        records = records.len(),
        mode = ?mode,
        result = ?normalized,
        "Normalized metric sequence"
    );
    Ok(normalized)
}
