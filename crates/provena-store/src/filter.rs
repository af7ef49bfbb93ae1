//! Shared filter applied to audit-log reads.
//!
//! One filter type serves listing, summaries, statistics, and export so all
//! read paths agree on what "matching" means. Empty list fields impose no
//! constraint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use provena_contracts::event::{AuditEvent, Severity};

/// Filter criteria for audit-log queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventFilter {
    /// Severity membership; empty means any.
    #[serde(default)]
    pub severities: Vec<Severity>,

    /// Event-type membership; empty means any.
    #[serde(default)]
    pub event_types: Vec<String>,

    /// Matches either the event's actor or its subject — callers filtering
    /// by a person usually want both directions.
    pub actor: Option<String>,

    /// Free-text search; see `matches_search`.
    pub search: Option<String>,

    /// Inclusive lower bound on `created_at`.
    pub start: Option<DateTime<Utc>>,

    /// Inclusive upper bound on `created_at`.
    pub end: Option<DateTime<Utc>>,

    /// Strict upper bound on `created_at`, used for cursor pagination.
    pub before: Option<DateTime<Utc>>,
}

impl EventFilter {
    /// A filter with no constraints.
    pub fn any() -> Self {
        Self::default()
    }

    /// Return true if `event` satisfies every configured constraint.
    pub fn matches(&self, event: &AuditEvent) -> bool {
        if !self.severities.is_empty() && !self.severities.contains(&event.severity) {
            return false;
        }
        if !self.event_types.is_empty()
            && !self.event_types.iter().any(|t| *t == event.event_type)
        {
            return false;
        }
        if let Some(actor) = &self.actor {
            let matches_actor = event.actor.as_deref() == Some(actor.as_str())
                || event.subject.as_deref() == Some(actor.as_str());
            if !matches_actor {
                return false;
            }
        }
        if let Some(start) = self.start {
            if event.created_at < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if event.created_at > end {
                return false;
            }
        }
        if let Some(before) = self.before {
            if event.created_at >= before {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !Self::matches_search(event, search) {
                return false;
            }
        }
        true
    }

    /// Case-insensitive free-text match.
    ///
    /// Whitespace-separated terms must appear in order within the event's
    /// type or its metadata rendered as JSON text — the same shape as the
    /// `%term1%term2%` ILIKE patterns the hosted store would run.
    fn matches_search(event: &AuditEvent, search: &str) -> bool {
        let terms: Vec<String> = search
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();
        if terms.is_empty() {
            return true;
        }

        let haystacks = [
            event.event_type.to_lowercase(),
            event.metadata.to_string().to_lowercase(),
        ];

        haystacks.iter().any(|haystack| {
            let mut position = 0usize;
            for term in &terms {
                match haystack[position..].find(term.as_str()) {
                    Some(found) => position += found + term.len(),
                    None => return false,
                }
            }
            true
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;

    use provena_contracts::event::{AuditEvent, EventId, Severity};

    use super::EventFilter;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn event(event_type: &str, severity: Severity, minutes_ago: i64) -> AuditEvent {
        AuditEvent {
            id: EventId::new(),
            event_type: event_type.to_string(),
            severity,
            actor: Some("admin-1".to_string()),
            subject: Some("user-42".to_string()),
            metadata: json!({ "reason": "abuse report", "count": 3 }),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
                - Duration::minutes(minutes_ago),
            fingerprint: "00".repeat(32),
        }
    }

    // ── Membership filters ────────────────────────────────────────────────────

    /// Empty severity and event-type lists impose no constraint.
    #[test]
    fn empty_filter_matches_everything() {
        let filter = EventFilter::any();
        assert!(filter.matches(&event("user.blocked", Severity::High, 0)));
    }

    /// Severity membership is exact.
    #[test]
    fn severity_membership() {
        let filter = EventFilter {
            severities: vec![Severity::High, Severity::Crit],
            ..Default::default()
        };
        assert!(filter.matches(&event("user.blocked", Severity::High, 0)));
        assert!(!filter.matches(&event("user.blocked", Severity::Low, 0)));
    }

    /// Event-type membership is exact, not prefix.
    #[test]
    fn event_type_membership() {
        let filter = EventFilter {
            event_types: vec!["user.blocked".to_string()],
            ..Default::default()
        };
        assert!(filter.matches(&event("user.blocked", Severity::Low, 0)));
        assert!(!filter.matches(&event("user.blocked.again", Severity::Low, 0)));
    }

    /// The actor criterion matches either side of the action.
    #[test]
    fn actor_matches_actor_or_subject() {
        let as_actor = EventFilter {
            actor: Some("admin-1".to_string()),
            ..Default::default()
        };
        let as_subject = EventFilter {
            actor: Some("user-42".to_string()),
            ..Default::default()
        };
        let miss = EventFilter {
            actor: Some("nobody".to_string()),
            ..Default::default()
        };
        let e = event("user.blocked", Severity::Low, 0);
        assert!(as_actor.matches(&e));
        assert!(as_subject.matches(&e));
        assert!(!miss.matches(&e));
    }

    // ── Time bounds ───────────────────────────────────────────────────────────

    /// `start`/`end` are inclusive; `before` is strict.
    #[test]
    fn time_bounds() {
        let e = event("user.blocked", Severity::Low, 0);
        let at = e.created_at;

        let inclusive = EventFilter {
            start: Some(at),
            end: Some(at),
            ..Default::default()
        };
        assert!(inclusive.matches(&e));

        let strict = EventFilter {
            before: Some(at),
            ..Default::default()
        };
        assert!(!strict.matches(&e));

        let strict_later = EventFilter {
            before: Some(at + Duration::seconds(1)),
            ..Default::default()
        };
        assert!(strict_later.matches(&e));
    }

    // ── Search ────────────────────────────────────────────────────────────────

    /// Search is case-insensitive and looks into metadata text.
    #[test]
    fn search_matches_event_type_and_metadata() {
        let e = event("user.blocked", Severity::Low, 0);

        let by_type = EventFilter {
            search: Some("BLOCKED".to_string()),
            ..Default::default()
        };
        assert!(by_type.matches(&e));

        let by_metadata = EventFilter {
            search: Some("abuse".to_string()),
            ..Default::default()
        };
        assert!(by_metadata.matches(&e));

        let miss = EventFilter {
            search: Some("refund".to_string()),
            ..Default::default()
        };
        assert!(!miss.matches(&e));
    }

    /// Multi-term search requires the terms in order within one haystack.
    #[test]
    fn search_terms_must_appear_in_order() {
        let e = event("user.blocked", Severity::Low, 0);

        let in_order = EventFilter {
            search: Some("abuse report".to_string()),
            ..Default::default()
        };
        assert!(in_order.matches(&e));

        let out_of_order = EventFilter {
            search: Some("report abuse".to_string()),
            ..Default::default()
        };
        assert!(!out_of_order.matches(&e));
    }
}
