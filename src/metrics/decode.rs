//! Two-pass decoding of metric payloads
//!
//! Trial metric `data` is JSON-encoded twice: the reporting side serializes
//! the metric to a JSON string, and the storage side serializes that string
//! again. Payloads that carry `NaN` or `Infinity` literals are not valid JSON,
//! so both passes switch to the JSON5 decoder when either substring appears.
//! Number literals too large for `f64` decode as `Infinity`.

use super::MetricValue;
use crate::error::{DecodeError, DecodeLayer};

/// Decode a metric record's raw `data` payload
///
/// Pure function of its input: the same string always decodes to the same value.
///
/// # Errors
/// Returns [`DecodeError`] when either pass sees malformed text, or when the
/// outer layer is an array or object instead of an encoded string.
pub fn parse_metrics(data: &str) -> Result<MetricValue, DecodeError> {
    let permissive = needs_permissive_decoder(data);
    if permissive {
        tracing::debug!(
            payload_len = data.len(),
            "Metric payload carries NaN/Infinity literals, using JSON5 decoder"
        );
    }

    let outer = decode_layer(data, DecodeLayer::Outer, permissive)?;
    match outer {
        MetricValue::String(inner) => decode_layer(&inner, DecodeLayer::Inner, permissive),
        // Re-encoding a scalar and decoding it again yields the same scalar
        MetricValue::Number(_) | MetricValue::Bool(_) | MetricValue::Null => Ok(outer),
        MetricValue::Array(_) | MetricValue::Object(_) => Err(DecodeError::NotDoubleEncoded {
            found: outer.kind(),
        }),
    }
}

/// Whether the payload needs the decoder that accepts `NaN`/`Infinity`
pub fn needs_permissive_decoder(data: &str) -> bool {
    data.contains("NaN") || data.contains("Infinity")
}

fn decode_layer(
    text: &str,
    layer: DecodeLayer,
    permissive: bool,
) -> Result<MetricValue, DecodeError> {
    if permissive {
        return json5::from_str(&saturate_overflowing_numbers(text))
            .map_err(|source| DecodeError::Permissive { layer, source });
    }

    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        // Well-formed literals beyond f64 range decode as ±Infinity
        Err(source) if is_number_out_of_range(&source) => {
            tracing::debug!(
                layer = layer.as_str(),
                "Metric payload has an out-of-range number, saturating to Infinity"
            );
            json5::from_str(&saturate_overflowing_numbers(text))
                .map_err(|_| DecodeError::Json { layer, source })
        }
        Err(source) => Err(DecodeError::Json { layer, source }),
    }
}

fn is_number_out_of_range(error: &serde_json::Error) -> bool {
    error.is_syntax() && error.to_string().starts_with("number out of range")
}

/// Rewrite number literals outside strings that overflow `f64` as
/// `Infinity`/`-Infinity`, leaving everything else byte for byte
fn saturate_overflowing_numbers(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut in_string = false;
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        if in_string {
            match byte {
                b'\\' => i += 1,
                b'"' => in_string = false,
                _ => {}
            }
            i += 1;
            continue;
        }

        match byte {
            b'"' => {
                in_string = true;
                i += 1;
            }
            b'-' | b'0'..=b'9' => {
                let start = i;
                i += 1;
                while i < bytes.len()
                    && matches!(bytes[i], b'0'..=b'9' | b'.' | b'e' | b'E' | b'+' | b'-')
                {
                    i += 1;
                }
                if let Ok(n) = text[start..i].parse::<f64>() {
                    if n.is_infinite() {
                        out.push_str(&text[copied..start]);
                        out.push_str(if n < 0.0 { "-Infinity" } else { "Infinity" });
                        copied = i;
                    }
                }
            }
            _ => i += 1,
        }
    }

    out.push_str(&text[copied..]);
    out
}
