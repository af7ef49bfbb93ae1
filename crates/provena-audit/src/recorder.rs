//! The event recorder: the single creation path for audit records.
//!
//! `record()` computes the fingerprint over the draft's canonical fields,
//! persists the row as one atomic insert, and — after successful
//! persistence — triggers critical-event fan-out when the severity crosses
//! the configured threshold and an actor is present.
//!
//! Failure policy: a persistence failure is surfaced to the caller as the
//! `Err`, but the audited business action has already happened — callers
//! log and continue rather than reversing it. Notification failure never
//! rolls back or fails the audit write.

use std::sync::Arc;

use tracing::{debug, info};

use provena_canon::{canonical_bytes, fingerprint};
use provena_contracts::{
    error::AuditResult,
    event::{AuditEvent, EventDraft, Severity},
};
use provena_store::EventStore;

use crate::{config::AuditConfig, fields::canonical_fields, notify::CriticalEventNotifier};

/// Records audit events. Exclusively owns the creation path — no other
/// component writes to the event store.
pub struct EventRecorder {
    store: Arc<dyn EventStore>,
    notifier: CriticalEventNotifier,
    config: AuditConfig,
}

impl EventRecorder {
    /// Create a recorder over the given store, notifier, and configuration.
    pub fn new(
        store: Arc<dyn EventStore>,
        notifier: CriticalEventNotifier,
        config: AuditConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            config,
        }
    }

    /// Record one audit event.
    ///
    /// 1. Escalate the severity if the event type is on the critical list.
    /// 2. Fingerprint the canonical field mapping (system-assigned fields
    ///    excluded — they do not exist yet).
    /// 3. Persist draft + fingerprint as one row.
    /// 4. If the effective severity crosses the notify threshold and an
    ///    actor is present, fan out notifications. Best-effort only.
    ///
    /// Returns the persisted record with its assigned id and timestamp.
    pub fn record(&self, draft: EventDraft) -> AuditResult<AuditEvent> {
        let mut draft = draft;
        draft.severity = self
            .config
            .effective_severity(&draft.event_type, draft.severity);

        let fields = canonical_fields(
            &draft.event_type,
            draft.severity,
            draft.actor.as_deref(),
            draft.subject.as_deref(),
            &draft.metadata,
        );
        let fp = fingerprint(&canonical_bytes(&fields));

        let persisted = self.store.insert(draft, fp)?;

        info!(
            id = %persisted.id,
            event_type = %persisted.event_type,
            severity = %persisted.severity,
            "audit event recorded"
        );

        // Fan-out happens strictly after persistence and cannot undo it.
        if self.config.should_notify(persisted.severity) && persisted.actor.is_some() {
            let delivered = self
                .notifier
                .notify_admins(&persisted.event_type, &persisted.metadata);
            debug!(
                event_type = %persisted.event_type,
                delivered,
                "critical event notified"
            );
        }

        Ok(persisted)
    }

    /// Convenience wrapper building the draft from loose parts.
    pub fn record_event(
        &self,
        event_type: &str,
        severity: Severity,
        actor: Option<&str>,
        subject: Option<&str>,
        metadata: serde_json::Value,
    ) -> AuditResult<AuditEvent> {
        self.record(EventDraft::new(event_type, severity, actor, subject, metadata))
    }
}
