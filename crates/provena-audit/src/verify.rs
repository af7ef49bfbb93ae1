//! Read-time integrity verification.
//!
//! A persisted record is verified by rebuilding the canonical mapping it
//! was fingerprinted over (excluding the store-assigned fields), digesting
//! it again, and comparing against the stored fingerprint. Since records
//! are never mutated after insertion, any mismatch signals corruption or
//! tampering.
//!
//! Verification is a pure, stateless computation: it may run concurrently
//! and repeatedly without coordination, and a mismatch is a normal `false`
//! result, never an error.

use serde::{Deserialize, Serialize};

use provena_canon::{canonical_bytes, constant_time_eq, fingerprint};
use provena_contracts::event::AuditEvent;

use crate::fields::canonical_fields_of;

/// The outcome of verifying one record. Derived at read time, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verification {
    /// Whether the recomputed fingerprint matches the stored one.
    pub hash_valid: bool,

    /// The recomputed fingerprint, exposed for operator inspection.
    pub computed_hash: String,
}

/// Recompute a record's fingerprint and compare it to the stored value.
///
/// The comparison is constant-time — the same digest-compare pattern guards
/// externally-supplied signatures elsewhere, so it never short-circuits on
/// content.
pub fn verify_event(event: &AuditEvent) -> Verification {
    let computed_hash = fingerprint(&canonical_bytes(&canonical_fields_of(event)));
    let hash_valid = constant_time_eq(computed_hash.as_bytes(), event.fingerprint.as_bytes());
    Verification {
        hash_valid,
        computed_hash,
    }
}

/// Shorthand when only the boolean outcome matters.
pub fn verify(event: &AuditEvent) -> bool {
    verify_event(event).hash_valid
}
