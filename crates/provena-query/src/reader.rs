//! Verified listing of audit records.
//!
//! Every record leaving the read surface carries verification metadata —
//! `hash_valid` and `computed_hash` — computed at read time and never
//! stored. Listing paginates by `created_at` cursor, newest first, and
//! attaches a severity-distribution summary computed under the same
//! filters.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use provena_audit::verify_event;
use provena_contracts::{
    error::AuditResult,
    event::{AuditEvent, EventId, Severity},
};
use provena_store::{EventFilter, EventStore};

/// Page-size bounds for log listings.
pub const DEFAULT_LIMIT: usize = 100;
pub const MIN_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 500;

/// Clamp a requested page size into the allowed window.
pub fn clamp_limit(requested: Option<usize>) -> usize {
    requested
        .unwrap_or(DEFAULT_LIMIT)
        .clamp(MIN_LIMIT, MAX_LIMIT)
}

/// A persisted record plus its read-time verification outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedRecord {
    #[serde(flatten)]
    pub event: AuditEvent,

    /// Whether the stored fingerprint matches the recomputed one.
    pub hash_valid: bool,

    /// The recomputed fingerprint, for operator inspection.
    pub computed_hash: String,
}

impl VerifiedRecord {
    /// Verify `event` and wrap it with the outcome.
    pub fn from_event(event: AuditEvent) -> Self {
        let verification = verify_event(&event);
        Self {
            event,
            hash_valid: verification.hash_valid,
            computed_hash: verification.computed_hash,
        }
    }
}

/// Severity distribution and last-critical marker for a filtered view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogSummary {
    /// Count of matching events per severity.
    pub by_severity: BTreeMap<Severity, u64>,

    /// When the most recent CRIT event under these filters happened.
    pub last_critical_at: Option<DateTime<Utc>>,
}

/// One page of verified audit records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogPage {
    pub data: Vec<VerifiedRecord>,

    /// Cursor for the next page: the last record's `created_at`, present
    /// only when this page filled up.
    pub next_cursor: Option<DateTime<Utc>>,

    pub summary: LogSummary,
}

/// A log-listing request: filter criteria plus pagination.
#[derive(Debug, Clone, Default)]
pub struct LogQuery {
    pub filter: EventFilter,
    pub limit: Option<usize>,
    pub cursor: Option<DateTime<Utc>>,
}

/// The audit-log read surface.
pub struct AuditReader {
    store: Arc<dyn EventStore>,
}

impl AuditReader {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    pub(crate) fn store(&self) -> &Arc<dyn EventStore> {
        &self.store
    }

    /// List audit records, newest first, verified, with a summary.
    pub fn logs(&self, query: LogQuery) -> AuditResult<LogPage> {
        let limit = clamp_limit(query.limit);

        let mut page_filter = query.filter.clone();
        page_filter.before = query.cursor.or(page_filter.before);

        let records = self.store.select(&page_filter, Some(limit))?;
        debug!(count = records.len(), limit, "audit log page fetched");

        let data: Vec<VerifiedRecord> = records
            .into_iter()
            .map(VerifiedRecord::from_event)
            .collect();

        let next_cursor = if data.len() == limit {
            data.last().map(|r| r.event.created_at)
        } else {
            None
        };

        let summary = self.summary(&query.filter)?;

        Ok(LogPage {
            data,
            next_cursor,
            summary,
        })
    }

    /// Fetch and verify one record by id.
    pub fn log(&self, id: &EventId) -> AuditResult<Option<VerifiedRecord>> {
        Ok(self.store.get(id)?.map(VerifiedRecord::from_event))
    }

    /// Severity distribution plus the most recent CRIT timestamp.
    ///
    /// The summary ignores pagination: it describes the whole filtered
    /// view, not the current page. For `last_critical_at` the severity
    /// constraint is replaced by CRIT so the marker shows up even when the
    /// caller filtered to other severities.
    pub fn summary(&self, filter: &EventFilter) -> AuditResult<LogSummary> {
        let mut summary = LogSummary::default();

        let all = self.store.select(filter, None)?;
        for event in &all {
            *summary.by_severity.entry(event.severity).or_insert(0) += 1;
        }

        let mut critical_filter = filter.clone();
        critical_filter.severities = vec![Severity::Crit];
        let latest_critical = self.store.select(&critical_filter, Some(1))?;
        summary.last_critical_at = latest_critical.first().map(|e| e.created_at);

        Ok(summary)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
