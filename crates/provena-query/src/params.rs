//! Query-parameter normalization helpers.
//!
//! Callers arrive with list parameters either as repeated values or as one
//! comma-separated string, and with cursors as RFC 3339 timestamps of
//! varying strictness. Both are normalized here; invalid cursors are
//! silently ignored rather than rejected.

use chrono::{DateTime, Utc};

/// Flatten list parameters that may contain comma-separated entries.
///
/// Entries are trimmed; empty fragments disappear. An empty result means
/// "no constraint".
pub fn normalize_list_param(values: &[String]) -> Vec<String> {
    let mut normalized = Vec::new();
    for value in values {
        for part in value.split(',') {
            let trimmed = part.trim();
            if !trimmed.is_empty() {
                normalized.push(trimmed.to_string());
            }
        }
    }
    normalized
}

/// Parse a pagination cursor.
///
/// Accepts RFC 3339 with either an offset or the `Z` suffix. Anything else
/// yields `None` and the listing starts from the top.
pub fn parse_cursor(cursor: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(cursor)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::{normalize_list_param, parse_cursor};

    /// Comma-separated entries are split and trimmed.
    #[test]
    fn normalize_splits_commas() {
        let input = vec!["CRIT, HIGH".to_string(), "LOW".to_string()];
        assert_eq!(
            normalize_list_param(&input),
            vec!["CRIT".to_string(), "HIGH".to_string(), "LOW".to_string()]
        );
    }

    /// Empty fragments disappear entirely.
    #[test]
    fn normalize_drops_empty_fragments() {
        let input = vec![",,".to_string(), " ".to_string(), "a,".to_string()];
        assert_eq!(normalize_list_param(&input), vec!["a".to_string()]);
    }

    /// Valid cursors parse in both offset and Z forms.
    #[test]
    fn cursor_parses_rfc3339() {
        assert!(parse_cursor("2025-06-01T12:00:00Z").is_some());
        assert!(parse_cursor("2025-06-01T12:00:00+00:00").is_some());
        assert!(parse_cursor("2025-06-01T12:00:00.123456Z").is_some());
    }

    /// Invalid cursors are ignored, not errors.
    #[test]
    fn invalid_cursor_is_none() {
        assert!(parse_cursor("yesterday").is_none());
        assert!(parse_cursor("2025-06-01").is_none());
        assert!(parse_cursor("").is_none());
    }
}
