//! Audit event and notification types.
//!
//! `AuditEvent` is the sole entity the subsystem persists: one immutable row
//! per administrative action, carrying a SHA-256 fingerprint computed over
//! its caller-supplied fields. `EventDraft` is the pre-persistence form —
//! the store assigns `id` and `created_at` on insert.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ordered severity scale for audit events.
///
/// The ordering matters: the notifier fans out when an event's severity
/// meets or exceeds the configured threshold (`Crit` by default).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Severity {
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "MED")]
    Med,
    #[serde(rename = "HIGH")]
    High,
    #[serde(rename = "CRIT")]
    Crit,
}

impl Severity {
    /// The wire form of this severity, as stored and fingerprinted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Med => "MED",
            Severity::High => "HIGH",
            Severity::Crit => "CRIT",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Severity::Low),
            "MED" => Ok(Severity::Med),
            "HIGH" => Ok(Severity::High),
            "CRIT" => Ok(Severity::Crit),
            other => Err(format!("unknown severity '{}'", other)),
        }
    }
}

/// Unique identifier for a persisted audit event.
///
/// Assigned by the event store at insert time — drafts never carry one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub uuid::Uuid);

impl EventId {
    /// Create a new, unique event ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The caller-supplied fields of an audit event, before persistence.
///
/// Exactly these fields (and nothing system-assigned) enter the canonical
/// mapping that gets fingerprinted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraft {
    /// Dot-namespaced action classifier, e.g. `user.blocked`.
    pub event_type: String,

    /// Requested severity. The recorder may escalate it for event types
    /// configured as critical.
    pub severity: Severity,

    /// The administrator who performed the action. `None` for
    /// system-generated events.
    pub actor: Option<String>,

    /// The user or entity the action targeted, if any.
    pub subject: Option<String>,

    /// Open structured detail; contents vary per event type.
    pub metadata: serde_json::Value,
}

impl EventDraft {
    /// Build a draft from loose parts.
    pub fn new(
        event_type: impl Into<String>,
        severity: Severity,
        actor: Option<&str>,
        subject: Option<&str>,
        metadata: serde_json::Value,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            severity,
            actor: actor.map(str::to_string),
            subject: subject.map(str::to_string),
            metadata,
        }
    }
}

/// A persisted, immutable audit event.
///
/// Created exactly once, never updated, never deleted by this subsystem.
/// `fingerprint` is the SHA-256 hex digest of the canonical encoding of the
/// draft fields; `id` and `created_at` are store-assigned and deliberately
/// excluded from the fingerprint, so the stored value stays verifiable
/// against the record itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Store-assigned opaque identity.
    pub id: EventId,

    /// Dot-namespaced action classifier, e.g. `user.blocked`.
    pub event_type: String,

    /// Effective severity at recording time.
    pub severity: Severity,

    /// The administrator who performed the action, if any.
    pub actor: Option<String>,

    /// The user or entity the action targeted, if any.
    pub subject: Option<String>,

    /// Open structured detail.
    pub metadata: serde_json::Value,

    /// Store-assigned insertion timestamp (UTC). Immutable thereafter.
    pub created_at: DateTime<Utc>,

    /// Lowercase 64-character hex SHA-256 fingerprint of the draft fields.
    pub fingerprint: String,
}

/// A notification row delivered to one administrator.
///
/// Produced by the critical-event notifier, one per active elevated admin.
/// Deduplication across repeated events is an explicit non-goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// The administrator this notification is addressed to.
    pub admin_id: String,

    /// Notification category; the notifier always emits `"warning"`.
    pub kind: String,

    /// Short headline derived from the event type.
    pub title: String,

    /// Fixed templated body.
    pub message: String,

    /// The triggering event's metadata, passed through verbatim.
    pub metadata: serde_json::Value,
}
