//! Aggregate statistics over a trailing window of the audit log.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use provena_contracts::{
    error::AuditResult,
    event::Severity,
};
use provena_store::{EventFilter, EventStore};

use crate::reader::AuditReader;

/// How many event types the top list reports.
const TOP_EVENT_TYPES: usize = 10;

/// The trailing window statistics cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatsPeriod {
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "90d")]
    NinetyDays,
}

impl StatsPeriod {
    pub fn days(&self) -> i64 {
        match self {
            StatsPeriod::SevenDays => 7,
            StatsPeriod::ThirtyDays => 30,
            StatsPeriod::NinetyDays => 90,
        }
    }
}

impl Default for StatsPeriod {
    fn default() -> Self {
        StatsPeriod::SevenDays
    }
}

impl FromStr for StatsPeriod {
    type Err = std::convert::Infallible;

    /// Unknown period strings fall back to the 7-day default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "30d" => StatsPeriod::ThirtyDays,
            "90d" => StatsPeriod::NinetyDays,
            _ => StatsPeriod::SevenDays,
        })
    }
}

/// One entry in the top-event-types list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTypeCount {
    pub event_type: String,
    pub count: u64,
}

/// Statistics over the trailing window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditStats {
    pub critical_events_count: u64,
    pub total_events: u64,

    /// The most frequent event types, count-descending, at most ten.
    pub top_event_types: Vec<EventTypeCount>,

    pub severity_breakdown: BTreeMap<Severity, u64>,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
}

impl AuditReader {
    /// Compute statistics over the trailing `period`.
    pub fn stats(&self, period: StatsPeriod) -> AuditResult<AuditStats> {
        let period_end = Utc::now();
        let period_start = period_end - Duration::days(period.days());

        let filter = EventFilter {
            start: Some(period_start),
            ..Default::default()
        };
        let events = self.store().select(&filter, None)?;

        let mut by_type: BTreeMap<String, u64> = BTreeMap::new();
        let mut severity_breakdown: BTreeMap<Severity, u64> = BTreeMap::new();
        let mut critical_events_count = 0u64;

        for event in &events {
            *by_type.entry(event.event_type.clone()).or_insert(0) += 1;
            *severity_breakdown.entry(event.severity).or_insert(0) += 1;
            if event.severity == Severity::Crit {
                critical_events_count += 1;
            }
        }

        let mut top_event_types: Vec<EventTypeCount> = by_type
            .into_iter()
            .map(|(event_type, count)| EventTypeCount { event_type, count })
            .collect();
        // Count descending; the BTreeMap source keeps ties alphabetical.
        top_event_types.sort_by(|a, b| b.count.cmp(&a.count));
        top_event_types.truncate(TOP_EVENT_TYPES);

        Ok(AuditStats {
            critical_events_count,
            total_events: events.len() as u64,
            top_event_types,
            severity_breakdown,
            period_start,
            period_end,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
