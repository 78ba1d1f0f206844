//! Decoded metric values
//!
//! `serde_json::Value` cannot hold NaN or infinities, which metric payloads
//! legitimately carry, so decoded payloads use [`MetricValue`] instead.

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A JSON value whose numbers may be non-finite
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MetricValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<MetricValue>),
    Object(BTreeMap<String, MetricValue>),
}

impl MetricValue {
    /// Get the number, if this is one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the object fields, if this is an object
    pub fn as_object(&self) -> Option<&BTreeMap<String, MetricValue>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a field of an object; `None` for missing fields and non-objects
    pub fn get(&self, key: &str) -> Option<&MetricValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Short description of the value's shape, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "a boolean",
            Self::Number(_) => "a number",
            Self::String(_) => "a string",
            Self::Array(_) => "an array",
            Self::Object(_) => "an object",
        }
    }
}

impl From<f64> for MetricValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for MetricValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<BTreeMap<String, MetricValue>> for MetricValue {
    fn from(map: BTreeMap<String, MetricValue>) -> Self {
        Self::Object(map)
    }
}

impl<'de> Deserialize<'de> for MetricValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MetricValueVisitor;

        impl<'de> Visitor<'de> for MetricValueVisitor {
            type Value = MetricValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any JSON value")
            }

            fn visit_bool<E>(self, v: bool) -> Result<MetricValue, E> {
                Ok(MetricValue::Bool(v))
            }

            fn visit_i64<E>(self, v: i64) -> Result<MetricValue, E> {
                Ok(MetricValue::Number(v as f64))
            }

            fn visit_u64<E>(self, v: u64) -> Result<MetricValue, E> {
                Ok(MetricValue::Number(v as f64))
            }

            fn visit_f64<E>(self, v: f64) -> Result<MetricValue, E> {
                Ok(MetricValue::Number(v))
            }

            fn visit_str<E>(self, v: &str) -> Result<MetricValue, E>
            where
                E: de::Error,
            {
                Ok(MetricValue::String(v.to_string()))
            }

            fn visit_string<E>(self, v: String) -> Result<MetricValue, E> {
                Ok(MetricValue::String(v))
            }

            fn visit_unit<E>(self) -> Result<MetricValue, E> {
                Ok(MetricValue::Null)
            }

            fn visit_none<E>(self) -> Result<MetricValue, E> {
                Ok(MetricValue::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<MetricValue, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<MetricValue, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(MetricValue::Array(items))
            }

            fn visit_map<A>(self, mut map: A) -> Result<MetricValue, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut fields = BTreeMap::new();
                while let Some((key, value)) = map.next_entry::<String, MetricValue>()? {
                    fields.insert(key, value);
                }
                Ok(MetricValue::Object(fields))
            }
        }

        deserializer.deserialize_any(MetricValueVisitor)
    }
}

/// Non-finite numbers serialize the way the serializer handles non-finite
/// `f64` (`serde_json` writes `null`).
impl Serialize for MetricValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (key, value) in fields {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}
