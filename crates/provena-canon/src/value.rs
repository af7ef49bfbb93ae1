//! The tagged value model canonicalization operates on.
//!
//! Every field value is converted to a `CanonicalValue` before encoding, so
//! there is exactly one canonicalization rule per variant and no reliance on
//! a host language's default stringification. Values with no native variant
//! go through the `Opaque` fallback — a stable string coercion — because an
//! audit record must always be fingerprint-able, including malformed input.

use std::collections::BTreeMap;
use std::fmt::Display;

use chrono::{DateTime, Utc};

/// A value in canonical form.
///
/// Mappings use `BTreeMap` so key order is defined by the key itself, never
/// by insertion order. Sequences preserve their element order.
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    /// Rendered as an RFC 3339 string during encoding.
    Timestamp(DateTime<Utc>),
    Sequence(Vec<CanonicalValue>),
    Mapping(BTreeMap<String, CanonicalValue>),
    /// The deterministic fallback for values with no native variant.
    /// Encoded as a JSON string of the coerced form.
    Opaque(String),
}

/// The canonical field mapping an audit record is fingerprinted over.
pub type CanonicalMap = BTreeMap<String, CanonicalValue>;

impl CanonicalValue {
    /// Convert a JSON value into canonical form.
    ///
    /// Total: every `serde_json::Value` has a native variant, so this never
    /// falls back and never fails.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CanonicalValue::Null,
            serde_json::Value::Bool(b) => CanonicalValue::Bool(*b),
            serde_json::Value::Number(n) => CanonicalValue::Number(n.clone()),
            serde_json::Value::String(s) => CanonicalValue::String(s.clone()),
            serde_json::Value::Array(items) => {
                CanonicalValue::Sequence(items.iter().map(Self::from_json).collect())
            }
            serde_json::Value::Object(map) => {
                let converted = map
                    .iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect();
                CanonicalValue::Mapping(converted)
            }
        }
    }

    /// Coerce an arbitrary displayable value into the `Opaque` fallback.
    ///
    /// The same input always yields the same string — the coercion is the
    /// value's `Display` form, nothing environment-dependent.
    pub fn opaque(value: impl Display) -> Self {
        CanonicalValue::Opaque(value.to_string())
    }

    /// Shorthand for an optional string field: `None` canonicalizes to null.
    pub fn opt_string(value: Option<&str>) -> Self {
        match value {
            Some(s) => CanonicalValue::String(s.to_string()),
            None => CanonicalValue::Null,
        }
    }
}

impl From<&serde_json::Value> for CanonicalValue {
    fn from(value: &serde_json::Value) -> Self {
        Self::from_json(value)
    }
}
