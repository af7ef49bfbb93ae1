//! Signed CSV export of the audit log.
//!
//! The export body is plain CSV; its SHA-256 digest is prepended as a
//! comment line so a recipient can check the file was not altered after
//! download. Every export is itself a critical audit event, recorded
//! through the normal recorder path with the computed hash in its
//! metadata.

use chrono::Utc;
use serde_json::json;
use tracing::info;

use provena_audit::EventRecorder;
use provena_canon::fingerprint;
use provena_contracts::{
    error::AuditResult,
    event::{AuditEvent, Severity},
};
use provena_store::{EventFilter, EventStore};

use std::sync::Arc;

/// The columns of the export, in order.
const CSV_HEADER: &str = "id,event_type,severity,actor,subject,created_at,fingerprint,metadata";

/// A completed export: signed content plus the recorded hash.
#[derive(Debug, Clone)]
pub struct SignedExport {
    /// Suggested download filename, `audit_logs_{YYYYmmdd_HHMMSS}.csv`.
    pub filename: String,

    /// `# Export Hash: …` line followed by the CSV body.
    pub content: String,

    /// SHA-256 hex digest of the CSV body (excluding the hash line).
    pub export_hash: String,

    /// Number of exported records.
    pub count: usize,
}

/// Exports audit records and books the export itself as an audit event.
pub struct AuditExporter {
    store: Arc<dyn EventStore>,
    recorder: Arc<EventRecorder>,
}

impl AuditExporter {
    pub fn new(store: Arc<dyn EventStore>, recorder: Arc<EventRecorder>) -> Self {
        Self { store, recorder }
    }

    /// Export all records matching `filter` as signed CSV.
    ///
    /// `exporting_admin` becomes the actor of the recorded `audit.exported`
    /// event. The export event is written after the content is assembled,
    /// so its own row is not part of the exported file.
    pub fn export_csv(
        &self,
        filter: &EventFilter,
        exporting_admin: &str,
    ) -> AuditResult<SignedExport> {
        let records = self.store.select(filter, None)?;
        let body = render_csv(&records);
        let export_hash = fingerprint(body.as_bytes());
        let content = format!("# Export Hash: {}\n{}", export_hash, body);

        let filename = format!("audit_logs_{}.csv", Utc::now().format("%Y%m%d_%H%M%S"));

        self.recorder.record_event(
            "audit.exported",
            Severity::Crit,
            Some(exporting_admin),
            None,
            json!({
                "count": records.len(),
                "export_hash": export_hash,
                "start_date": filter.start.map(|d| d.to_rfc3339()),
                "end_date": filter.end.map(|d| d.to_rfc3339()),
                "filters": {
                    "severities": filter.severities,
                    "event_types": filter.event_types,
                    "actor": filter.actor,
                    "search": filter.search,
                },
            }),
        )?;

        info!(
            count = records.len(),
            export_hash = %export_hash,
            "audit log exported"
        );

        Ok(SignedExport {
            filename,
            content,
            export_hash,
            count: records.len(),
        })
    }
}

/// Render records as CSV, header first. Metadata is JSON-encoded into a
/// single cell.
fn render_csv(records: &[AuditEvent]) -> String {
    let mut out = String::new();
    out.push_str(CSV_HEADER);
    out.push('\n');

    for record in records {
        let row = [
            record.id.to_string(),
            record.event_type.clone(),
            record.severity.to_string(),
            record.actor.clone().unwrap_or_default(),
            record.subject.clone().unwrap_or_default(),
            record.created_at.to_rfc3339(),
            record.fingerprint.clone(),
            record.metadata.to_string(),
        ];
        let cells: Vec<String> = row.iter().map(|cell| csv_escape(cell)).collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

/// Quote a cell when it contains a delimiter, quote, or newline; embedded
/// quotes are doubled.
fn csv_escape(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use provena_audit::{AuditConfig, CriticalEventNotifier, EventRecorder};
    use provena_canon::fingerprint;
    use provena_contracts::event::Severity;
    use provena_store::{
        EventFilter, EventStore, InMemoryDirectory, InMemoryEventStore, InMemoryNotificationSink,
    };

    use super::{csv_escape, AuditExporter};

    fn exporter() -> (Arc<InMemoryEventStore>, AuditExporter, Arc<EventRecorder>) {
        let store = Arc::new(InMemoryEventStore::new());
        let config = AuditConfig::default();
        let notifier = CriticalEventNotifier::new(
            Arc::new(InMemoryDirectory::new()),
            Arc::new(InMemoryNotificationSink::new()),
            config.notify_role,
        );
        let recorder = Arc::new(EventRecorder::new(store.clone(), notifier, config));
        let exporter = AuditExporter::new(store.clone(), recorder.clone());
        (store, exporter, recorder)
    }

    // ── Quoting ───────────────────────────────────────────────────────────────

    /// Cells with delimiters, quotes, or newlines are quoted; quotes are
    /// doubled.
    #[test]
    fn csv_escaping_rules() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("two\nlines"), "\"two\nlines\"");
    }

    // ── Export ────────────────────────────────────────────────────────────────

    /// The export hash signs exactly the body after the hash line.
    #[test]
    fn export_hash_covers_body() {
        let (_store, exporter, recorder) = exporter();
        recorder
            .record_event(
                "user.updated",
                Severity::Low,
                Some("admin-1"),
                Some("user-9"),
                json!({ "field": "email, primary" }),
            )
            .unwrap();

        let export = exporter
            .export_csv(&EventFilter::any(), "admin-1")
            .unwrap();

        let (hash_line, body) = export
            .content
            .split_once('\n')
            .expect("content must have a hash line");
        assert_eq!(hash_line, format!("# Export Hash: {}", export.export_hash));
        assert_eq!(fingerprint(body.as_bytes()), export.export_hash);

        assert!(body.starts_with("id,event_type,severity"));
        assert!(body.contains("user.updated"));
        // The comma inside metadata must be inside a quoted cell.
        assert!(body.contains("\"{\"\"field\"\":\"\"email, primary\"\"}\""));
        assert_eq!(export.count, 1);
        assert!(export.filename.starts_with("audit_logs_"));
        assert!(export.filename.ends_with(".csv"));
    }

    /// Exporting records an `audit.exported` CRIT event carrying the hash,
    /// and that event is not part of the exported content.
    #[test]
    fn export_is_itself_audited() {
        let (store, exporter, recorder) = exporter();
        recorder
            .record_event("user.viewed", Severity::Low, Some("admin-1"), None, json!({}))
            .unwrap();

        let export = exporter
            .export_csv(&EventFilter::any(), "admin-1")
            .unwrap();
        assert_eq!(export.count, 1);

        let all = store.select(&EventFilter::any(), None).unwrap();
        assert_eq!(all.len(), 2);
        let booked = all
            .iter()
            .find(|e| e.event_type == "audit.exported")
            .expect("export event must be recorded");
        assert_eq!(booked.severity, Severity::Crit);
        assert_eq!(booked.actor.as_deref(), Some("admin-1"));
        assert_eq!(booked.metadata["export_hash"], json!(export.export_hash));
        assert_eq!(booked.metadata["count"], json!(1));
    }

    /// An empty store still exports a header-only, signed file.
    #[test]
    fn empty_export() {
        let (_store, exporter, _recorder) = exporter();
        let export = exporter
            .export_csv(&EventFilter::any(), "admin-1")
            .unwrap();
        assert_eq!(export.count, 0);
        let (_, body) = export.content.split_once('\n').unwrap();
        assert_eq!(body.trim_end(), "id,event_type,severity,actor,subject,created_at,fingerprint,metadata");
    }
}
