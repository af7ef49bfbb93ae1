//! The canonical field mapping an audit event is fingerprinted over.
//!
//! Every field that contributes to the fingerprint is listed explicitly so
//! nothing is accidentally omitted — and so recorder and verifier can never
//! drift apart, because both call the same function.
//!
//! Canonicalized keys (exactly these, always present):
//!   - `event_type`  — string
//!   - `severity`    — wire string (LOW/MED/HIGH/CRIT)
//!   - `actor`       — string or null
//!   - `subject`     — string or null
//!   - `metadata`    — the full JSON value
//!
//! `id`, `created_at`, and `fingerprint` are store-assigned and excluded:
//! they do not exist yet when the fingerprint is first computed, and
//! including them would make every stored record unverifiable against
//! itself.

use provena_canon::{CanonicalMap, CanonicalValue};
use provena_contracts::event::{AuditEvent, Severity};

/// Build the canonical mapping from loose event fields.
pub fn canonical_fields(
    event_type: &str,
    severity: Severity,
    actor: Option<&str>,
    subject: Option<&str>,
    metadata: &serde_json::Value,
) -> CanonicalMap {
    let mut fields = CanonicalMap::new();
    fields.insert(
        "event_type".to_string(),
        CanonicalValue::String(event_type.to_string()),
    );
    fields.insert(
        "severity".to_string(),
        CanonicalValue::String(severity.as_str().to_string()),
    );
    fields.insert("actor".to_string(), CanonicalValue::opt_string(actor));
    fields.insert("subject".to_string(), CanonicalValue::opt_string(subject));
    fields.insert("metadata".to_string(), CanonicalValue::from_json(metadata));
    fields
}

/// Build the canonical mapping from a persisted record, excluding the
/// system-assigned fields.
pub fn canonical_fields_of(event: &AuditEvent) -> CanonicalMap {
    canonical_fields(
        &event.event_type,
        event.severity,
        event.actor.as_deref(),
        event.subject.as_deref(),
        &event.metadata,
    )
}
