//! # provena-canon
//!
//! Deterministic canonical serialization and SHA-256 fingerprinting for
//! audit records.
//!
//! ## Overview
//!
//! A record's caller-supplied fields are converted to a `CanonicalMap`,
//! encoded into a single deterministic byte string by `canonical_bytes`,
//! and digested by `fingerprint`. The same logical content always produces
//! the same fingerprint regardless of field insertion order; any change to
//! a value or the key set changes it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use provena_canon::{canonical_bytes, fingerprint, CanonicalValue};
//!
//! let mut fields = std::collections::BTreeMap::new();
//! fields.insert("event_type".into(), CanonicalValue::String("user.blocked".into()));
//! let fp = fingerprint(&canonical_bytes(&fields));
//! assert_eq!(fp.len(), 64);
//! ```

pub mod digest;
pub mod encode;
pub mod value;

pub use digest::{constant_time_eq, fingerprint};
pub use encode::{canonical_bytes, canonical_value_bytes};
pub use value::{CanonicalMap, CanonicalValue};

// ── Tests ─────────────────────────────────────────────────────────────────────
