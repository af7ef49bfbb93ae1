//! Collaborator trait definitions for the audit subsystem.
//!
//! These three traits are the complete external surface the core depends on:
//!
//! - `EventStore`       — atomic single-row inserts and ordered, filterable reads
//! - `AdminDirectory`   — lookup of active administrators by role
//! - `NotificationSink` — delivery of per-admin notification rows
//!
//! The hosting application wires concrete backends (a hosted relational
//! store, in production) into the recorder and reader at construction time.
//! Nothing in the workspace reaches for a process-wide client singleton.

use provena_contracts::{
    access::Role,
    error::AuditResult,
    event::{AuditEvent, EventDraft, EventId, Notification},
};

use crate::filter::EventFilter;

/// The event store: the single persistence surface for audit records.
///
/// The core depends only on three properties: `insert` is atomic for one
/// row, the store assigns `id` and `created_at`, and `select` returns
/// records ordered by `created_at` descending.
pub trait EventStore: Send + Sync {
    /// Persist one draft plus its precomputed fingerprint as a single row.
    ///
    /// The store assigns the id and insertion timestamp and returns the
    /// complete persisted record. Records are never modified or deleted
    /// through this interface.
    fn insert(&self, draft: EventDraft, fingerprint: String) -> AuditResult<AuditEvent>;

    /// Return records matching `filter`, newest first, truncated to `limit`
    /// when given.
    fn select(&self, filter: &EventFilter, limit: Option<usize>) -> AuditResult<Vec<AuditEvent>>;

    /// Fetch a single record by id.
    fn get(&self, id: &EventId) -> AuditResult<Option<AuditEvent>>;
}

/// The administrator directory: who holds elevated privilege right now.
pub trait AdminDirectory: Send + Sync {
    /// Return the user ids of all active administrators holding `role`.
    fn list_active_admins(&self, role: Role) -> AuditResult<Vec<String>>;
}

/// The notification sink: delivery of one notification row per recipient.
pub trait NotificationSink: Send + Sync {
    /// Insert one notification. A failure here affects only this recipient —
    /// the notifier continues with the rest.
    fn insert_notification(&self, notification: &Notification) -> AuditResult<()>;
}
