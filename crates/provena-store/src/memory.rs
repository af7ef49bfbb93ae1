//! In-memory implementations of the collaborator traits.
//!
//! These are the reference backends used by tests and the demo binary. They
//! keep their rows in `Vec`s behind `Mutex`es, which is all the atomicity
//! the trait contracts require: one insert is one lock acquisition.
//!
//! `InMemoryNotificationSink` supports per-recipient failure injection so
//! callers can exercise the notifier's isolation guarantee — a failure for
//! one admin must not prevent delivery to the others.

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::Utc;
use tracing::debug;

use provena_contracts::{
    access::{AdminProfile, Role},
    error::{AuditError, AuditResult},
    event::{AuditEvent, EventDraft, EventId, Notification},
};

use crate::{
    filter::EventFilter,
    traits::{AdminDirectory, EventStore, NotificationSink},
};

// ── Event store ───────────────────────────────────────────────────────────────

/// An append-only in-memory event store.
///
/// Assigns a v4 UUID and the current UTC timestamp on insert, exactly as
/// the hosted store would server-side.
#[derive(Default)]
pub struct InMemoryEventStore {
    rows: Mutex<Vec<AuditEvent>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently stored.
    pub fn len(&self) -> usize {
        self.rows.lock().expect("event store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Overwrite a stored row in place, bypassing the append-only contract.
    ///
    /// Exists solely so tests and the demo can simulate tampering with the
    /// backing store and watch verification fail.
    pub fn tamper_with<F>(&self, id: &EventId, mutate: F) -> bool
    where
        F: FnOnce(&mut AuditEvent),
    {
        let mut rows = self.rows.lock().expect("event store lock poisoned");
        match rows.iter_mut().find(|row| row.id == *id) {
            Some(row) => {
                mutate(row);
                true
            }
            None => false,
        }
    }
}

impl EventStore for InMemoryEventStore {
    fn insert(&self, draft: EventDraft, fingerprint: String) -> AuditResult<AuditEvent> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|e| AuditError::WriteFailed {
                reason: format!("event store lock poisoned: {}", e),
            })?;

        let event = AuditEvent {
            id: EventId::new(),
            event_type: draft.event_type,
            severity: draft.severity,
            actor: draft.actor,
            subject: draft.subject,
            metadata: draft.metadata,
            created_at: Utc::now(),
            fingerprint,
        };

        rows.push(event.clone());
        debug!(id = %event.id, event_type = %event.event_type, "audit event inserted");
        Ok(event)
    }

    fn select(&self, filter: &EventFilter, limit: Option<usize>) -> AuditResult<Vec<AuditEvent>> {
        let rows = self
            .rows
            .lock()
            .map_err(|e| AuditError::StoreUnavailable {
                reason: format!("event store lock poisoned: {}", e),
            })?;

        let mut matched: Vec<AuditEvent> = rows
            .iter()
            .filter(|row| filter.matches(row))
            .cloned()
            .collect();

        // Newest first; ids break created_at ties so the ordering is total.
        matched.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.0.cmp(&a.id.0))
        });
        if let Some(limit) = limit {
            matched.truncate(limit);
        }
        Ok(matched)
    }

    fn get(&self, id: &EventId) -> AuditResult<Option<AuditEvent>> {
        let rows = self
            .rows
            .lock()
            .map_err(|e| AuditError::StoreUnavailable {
                reason: format!("event store lock poisoned: {}", e),
            })?;
        Ok(rows.iter().find(|row| row.id == *id).cloned())
    }
}

// ── Administrator directory ───────────────────────────────────────────────────

/// An in-memory administrator directory backed by a profile list.
#[derive(Default)]
pub struct InMemoryDirectory {
    profiles: Mutex<Vec<AdminProfile>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a profile to the directory.
    pub fn add_profile(&self, profile: AdminProfile) {
        self.profiles
            .lock()
            .expect("directory lock poisoned")
            .push(profile);
    }
}

impl AdminDirectory for InMemoryDirectory {
    fn list_active_admins(&self, role: Role) -> AuditResult<Vec<String>> {
        let profiles = self
            .profiles
            .lock()
            .map_err(|e| AuditError::DirectoryUnavailable {
                reason: format!("directory lock poisoned: {}", e),
            })?;

        Ok(profiles
            .iter()
            .filter(|p| p.role == role && p.is_active)
            .map(|p| p.user_id.clone())
            .collect())
    }
}

// ── Notification sink ─────────────────────────────────────────────────────────

/// An in-memory notification sink that records every delivery.
#[derive(Default)]
pub struct InMemoryNotificationSink {
    delivered: Mutex<Vec<Notification>>,
    failing: Mutex<HashSet<String>>,
}

impl InMemoryNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make deliveries to `admin_id` fail from now on. Failure injection
    /// for exercising the notifier's per-recipient isolation.
    pub fn fail_for(&self, admin_id: impl Into<String>) {
        self.failing
            .lock()
            .expect("sink lock poisoned")
            .insert(admin_id.into());
    }

    /// All notifications delivered so far, in delivery order.
    pub fn delivered(&self) -> Vec<Notification> {
        self.delivered.lock().expect("sink lock poisoned").clone()
    }
}

impl NotificationSink for InMemoryNotificationSink {
    fn insert_notification(&self, notification: &Notification) -> AuditResult<()> {
        let failing = self.failing.lock().map_err(|e| AuditError::NotifyFailed {
            admin_id: notification.admin_id.clone(),
            reason: format!("sink lock poisoned: {}", e),
        })?;

        if failing.contains(&notification.admin_id) {
            return Err(AuditError::NotifyFailed {
                admin_id: notification.admin_id.clone(),
                reason: "injected delivery failure".to_string(),
            });
        }
        drop(failing);

        self.delivered
            .lock()
            .map_err(|e| AuditError::NotifyFailed {
                admin_id: notification.admin_id.clone(),
                reason: format!("sink lock poisoned: {}", e),
            })?
            .push(notification.clone());
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
