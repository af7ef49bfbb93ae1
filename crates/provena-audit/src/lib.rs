//! # provena-audit
//!
//! Tamper-evident audit recording for administrative actions.
//!
//! ## Overview
//!
//! Every administrative action produces exactly one immutable `AuditEvent`
//! carrying a SHA-256 fingerprint of its canonical field mapping. Reading a
//! record back recomputes the fingerprint and compares it in constant time;
//! any mismatch means the stored row was altered. Events at or above the
//! configured severity threshold fan out one notification per active
//! elevated administrator.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use provena_audit::{AuditConfig, CriticalEventNotifier, EventRecorder, verify};
//!
//! let notifier = CriticalEventNotifier::new(directory, sink, config.notify_role);
//! let recorder = EventRecorder::new(store, notifier, config);
//!
//! let event = recorder.record_event(
//!     "user.blocked", Severity::High, Some("admin-1"), Some("user-42"),
//!     serde_json::json!({ "reason": "abuse" }),
//! )?;
//! assert!(verify(&event));
//! ```

pub mod config;
pub mod fields;
pub mod notify;
pub mod recorder;
pub mod verify;

pub use config::AuditConfig;
pub use fields::{canonical_fields, canonical_fields_of};
pub use notify::CriticalEventNotifier;
pub use recorder::EventRecorder;
pub use verify::{verify, verify_event, Verification};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use provena_contracts::{
        access::{AdminProfile, Role},
        event::Severity,
    };
    use provena_store::{
        EventStore, InMemoryDirectory, InMemoryEventStore, InMemoryNotificationSink,
    };

    use super::{
        verify, verify_event, AuditConfig, CriticalEventNotifier, EventRecorder,
    };

    // ── Helpers ───────────────────────────────────────────────────────────────

    struct Fixture {
        store: Arc<InMemoryEventStore>,
        sink: Arc<InMemoryNotificationSink>,
        recorder: EventRecorder,
    }

    /// Wire a recorder over in-memory collaborators with `admins` active
    /// admin-role profiles.
    fn fixture(admins: &[&str]) -> Fixture {
        let store = Arc::new(InMemoryEventStore::new());
        let directory = Arc::new(InMemoryDirectory::new());
        let sink = Arc::new(InMemoryNotificationSink::new());

        for admin in admins {
            directory.add_profile(AdminProfile {
                user_id: admin.to_string(),
                role: Role::Admin,
                is_active: true,
                scopes: vec![],
            });
        }

        let config = AuditConfig::default();
        let notifier = CriticalEventNotifier::new(
            directory.clone(),
            sink.clone(),
            config.notify_role,
        );
        let recorder = EventRecorder::new(store.clone(), notifier, config);

        Fixture {
            store,
            sink,
            recorder,
        }
    }

    // ── Round-trip integrity ──────────────────────────────────────────────────

    /// A freshly recorded event carries a 64-char hex fingerprint and
    /// verifies true.
    #[test]
    fn test_record_and_verify() {
        let fx = fixture(&[]);
        let event = fx
            .recorder
            .record_event(
                "user.blocked",
                Severity::High,
                Some("admin-1"),
                Some("user-42"),
                json!({ "reason": "abuse" }),
            )
            .unwrap();

        assert_eq!(event.fingerprint.len(), 64);
        assert!(event.fingerprint.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(verify(&event));
        assert_eq!(fx.store.len(), 1);
    }

    /// Two logically identical drafts produce identical fingerprints; ids
    /// and timestamps do not participate.
    #[test]
    fn test_fingerprint_independent_of_system_fields() {
        let fx = fixture(&[]);
        let a = fx
            .recorder
            .record_event("user.updated", Severity::Low, Some("admin-1"), None, json!({"k": 1}))
            .unwrap();
        let b = fx
            .recorder
            .record_event("user.updated", Severity::Low, Some("admin-1"), None, json!({"k": 1}))
            .unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.fingerprint, b.fingerprint);
    }

    // ── Tamper detection ──────────────────────────────────────────────────────

    /// Mutating any canonicalized field after persistence fails verification
    /// against the stored fingerprint.
    #[test]
    fn test_tamper_detection() {
        let fx = fixture(&[]);
        let event = fx
            .recorder
            .record_event(
                "subscription.granted",
                Severity::Med,
                Some("admin-1"),
                Some("user-7"),
                json!({ "count": 3 }),
            )
            .unwrap();

        assert!(fx.store.tamper_with(&event.id, |row| {
            row.metadata = json!({ "count": 4 });
        }));

        let tampered = fx.store.get(&event.id).unwrap().unwrap();
        let verification = verify_event(&tampered);
        assert!(!verification.hash_valid);
        assert_ne!(verification.computed_hash, tampered.fingerprint);
    }

    /// Every caller-supplied field participates in the fingerprint.
    #[test]
    fn test_tamper_any_field_detected() {
        let fx = fixture(&[]);
        let event = fx
            .recorder
            .record_event(
                "user.blocked",
                Severity::High,
                Some("admin-1"),
                Some("user-42"),
                json!({ "reason": "abuse" }),
            )
            .unwrap();

        let mutations: Vec<Box<dyn Fn(&mut provena_contracts::event::AuditEvent)>> = vec![
            Box::new(|e| e.event_type = "user.unblocked".to_string()),
            Box::new(|e| e.severity = Severity::Low),
            Box::new(|e| e.actor = None),
            Box::new(|e| e.subject = Some("user-43".to_string())),
            Box::new(|e| e.metadata = json!({ "reason": "spam" })),
        ];

        for mutate in mutations {
            let mut copy = event.clone();
            mutate(&mut copy);
            assert!(!verify(&copy), "mutation must invalidate the fingerprint");
        }
    }

    /// Verification is idempotent and side-effect free.
    #[test]
    fn test_verify_idempotent() {
        let fx = fixture(&[]);
        let event = fx
            .recorder
            .record_event("admin.login", Severity::Low, Some("admin-1"), None, json!({}))
            .unwrap();

        let first = verify_event(&event);
        let second = verify_event(&event);
        assert!(first.hash_valid && second.hash_valid);
        assert_eq!(first.computed_hash, second.computed_hash);
        assert_eq!(fx.store.len(), 1, "verification must not write anything");
    }

    // ── Critical fan-out ──────────────────────────────────────────────────────

    /// A CRIT event with an actor notifies each active admin exactly once.
    #[test]
    fn test_critical_fanout() {
        let fx = fixture(&["a1", "a2", "a3"]);
        fx.recorder
            .record_event(
                "settings.updated",
                Severity::Crit,
                Some("a1"),
                None,
                json!({ "section": "billing" }),
            )
            .unwrap();

        let delivered = fx.sink.delivered();
        assert_eq!(delivered.len(), 3);
        let recipients: std::collections::HashSet<&str> =
            delivered.iter().map(|n| n.admin_id.as_str()).collect();
        assert_eq!(recipients.len(), 3);
        for n in &delivered {
            assert_eq!(n.kind, "warning");
            assert_eq!(n.title, "Critical Event: settings.updated");
            assert_eq!(n.metadata, json!({ "section": "billing" }));
        }
    }

    /// Low-severity events trigger zero notifications.
    #[test]
    fn test_low_severity_no_fanout() {
        let fx = fixture(&["a1", "a2"]);
        fx.recorder
            .record_event("user.viewed", Severity::Low, Some("a1"), None, json!({}))
            .unwrap();
        assert!(fx.sink.delivered().is_empty());
    }

    /// System-generated critical events (no actor) do not fan out.
    #[test]
    fn test_no_actor_no_fanout() {
        let fx = fixture(&["a1"]);
        fx.recorder
            .record_event("settings.updated", Severity::Crit, None, None, json!({}))
            .unwrap();
        assert!(fx.sink.delivered().is_empty());
    }

    /// Event types on the critical list are escalated to CRIT and fan out
    /// even when recorded at LOW.
    #[test]
    fn test_critical_event_type_escalation() {
        let fx = fixture(&["a1"]);
        let event = fx
            .recorder
            .record_event("user.blocked", Severity::Low, Some("a1"), Some("u1"), json!({}))
            .unwrap();

        assert_eq!(event.severity, Severity::Crit);
        assert_eq!(fx.sink.delivered().len(), 1);
        // The escalated severity is what got fingerprinted.
        assert!(verify(&event));
    }

    /// A sink failure for one of three admins leaves the other two notified
    /// and the record call successful.
    #[test]
    fn test_fanout_failure_isolation() {
        let fx = fixture(&["a1", "a2", "a3"]);
        fx.sink.fail_for("a2");

        let event = fx
            .recorder
            .record_event(
                "data.exported",
                Severity::Crit,
                Some("a1"),
                None,
                json!({ "count": 10 }),
            )
            .unwrap();

        assert!(verify(&event));
        let recipients: Vec<String> = fx
            .sink
            .delivered()
            .iter()
            .map(|n| n.admin_id.clone())
            .collect();
        assert_eq!(recipients, vec!["a1".to_string(), "a3".to_string()]);
    }

    /// Inactive and differently-roled profiles are excluded from fan-out.
    #[test]
    fn test_fanout_only_active_elevated_admins() {
        let store = Arc::new(InMemoryEventStore::new());
        let directory = Arc::new(InMemoryDirectory::new());
        let sink = Arc::new(InMemoryNotificationSink::new());

        directory.add_profile(AdminProfile {
            user_id: "active-admin".into(),
            role: Role::Admin,
            is_active: true,
            scopes: vec![],
        });
        directory.add_profile(AdminProfile {
            user_id: "inactive-admin".into(),
            role: Role::Admin,
            is_active: false,
            scopes: vec![],
        });
        directory.add_profile(AdminProfile {
            user_id: "moderator".into(),
            role: Role::Moderator,
            is_active: true,
            scopes: vec![],
        });

        let config = AuditConfig::default();
        let notifier =
            CriticalEventNotifier::new(directory, sink.clone(), config.notify_role);
        let recorder = EventRecorder::new(store, notifier, config);

        recorder
            .record_event("admin.deleted", Severity::Crit, Some("x"), None, json!({}))
            .unwrap();

        let delivered = sink.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].admin_id, "active-admin");
    }
}
