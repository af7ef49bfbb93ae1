//! Canonical byte encoding.
//!
//! The encoding is compact JSON with one hard rule on top: mapping keys are
//! emitted in lexicographic order at every nesting level. Two mappings with
//! the same logical content therefore produce identical bytes regardless of
//! how they were built.
//!
//! Encoding rules per variant:
//!   - Null            → `null`
//!   - Bool            → `true` / `false`
//!   - Number          → serde_json notation (no trailing zeros added)
//!   - String / Opaque → JSON-escaped, double-quoted
//!   - Timestamp       → RFC 3339 string, double-quoted
//!   - Sequence        → `[` items in order `]`
//!   - Mapping         → `{` sorted `"key":value` pairs `}`
//!
//! Encoding is infallible: every variant has a total rendering rule.

use chrono::SecondsFormat;

use crate::value::{CanonicalMap, CanonicalValue};

/// Encode a canonical field mapping into its deterministic byte string.
///
/// This is the exact input to `fingerprint()`. Byte-identical across
/// repeated calls and independent of the original key insertion order.
pub fn canonical_bytes(fields: &CanonicalMap) -> Vec<u8> {
    let mut out = String::new();
    write_mapping(&mut out, fields);
    out.into_bytes()
}

/// Encode a single canonical value (mainly useful in tests).
pub fn canonical_value_bytes(value: &CanonicalValue) -> Vec<u8> {
    let mut out = String::new();
    write_value(&mut out, value);
    out.into_bytes()
}

fn write_value(out: &mut String, value: &CanonicalValue) {
    match value {
        CanonicalValue::Null => out.push_str("null"),
        CanonicalValue::Bool(true) => out.push_str("true"),
        CanonicalValue::Bool(false) => out.push_str("false"),
        CanonicalValue::Number(n) => out.push_str(&n.to_string()),
        CanonicalValue::String(s) | CanonicalValue::Opaque(s) => write_string(out, s),
        CanonicalValue::Timestamp(ts) => {
            // Fixed sub-second precision so equal instants always render
            // identically.
            write_string(out, &ts.to_rfc3339_opts(SecondsFormat::Micros, true));
        }
        CanonicalValue::Sequence(items) => {
            out.push('[');
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        CanonicalValue::Mapping(map) => write_mapping(out, map),
    }
}

fn write_mapping(out: &mut String, map: &CanonicalMap) {
    // BTreeMap iterates in key order; no extra sort step needed.
    out.push('{');
    for (idx, (key, value)) in map.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        write_string(out, key);
        out.push(':');
        write_value(out, value);
    }
    out.push('}');
}

/// JSON string escaping, spelled out so the byte form is pinned by this
/// module rather than inherited from a serializer's defaults.
fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
