//! # provena-query
//!
//! The audit-log read surface: filtered listing with cursor pagination and
//! per-record verification, aggregate statistics, the event-type catalog,
//! and signed CSV export.
//!
//! Everything here is read-only against the event store, with one
//! exception: exporting books an `audit.exported` event through the
//! recorder, because exports are themselves auditable actions.

pub mod catalog;
pub mod export;
pub mod params;
pub mod reader;
pub mod stats;

pub use catalog::{event_type_catalog, EventTypeInfo};
pub use export::{AuditExporter, SignedExport};
pub use params::{normalize_list_param, parse_cursor};
pub use reader::{
    clamp_limit, AuditReader, LogPage, LogQuery, LogSummary, VerifiedRecord, DEFAULT_LIMIT,
    MAX_LIMIT, MIN_LIMIT,
};
pub use stats::{AuditStats, EventTypeCount, StatsPeriod};
