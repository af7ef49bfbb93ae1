//! TOML-driven configuration for the audit subsystem.
//!
//! `AuditConfig` carries the notification threshold, the elevated role that
//! receives fan-out, and the event types that are always recorded as
//! critical regardless of the severity the caller requested.
//!
//! Example:
//!
//! ```toml
//! notify_threshold = "CRIT"
//! notify_role = "admin"
//! critical_events = ["user.blocked", "settings.updated"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use provena_contracts::{
    access::Role,
    error::{AuditError, AuditResult},
    event::Severity,
};

/// Event types treated as critical even when recorded at a lower severity.
const DEFAULT_CRITICAL_EVENTS: &[&str] = &[
    "user.blocked",
    "user.deleted",
    "admin.created",
    "admin.deleted",
    "settings.updated",
    "data.exported",
];

/// Configuration for the recorder and notifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Fan-out triggers when an event's severity meets or exceeds this.
    #[serde(default = "default_threshold")]
    pub notify_threshold: Severity,

    /// The elevated-privilege role whose active members get notified.
    #[serde(default = "default_role")]
    pub notify_role: Role,

    /// Event types escalated to `Crit` at recording time.
    #[serde(default = "default_critical_events")]
    pub critical_events: Vec<String>,
}

fn default_threshold() -> Severity {
    Severity::Crit
}

fn default_role() -> Role {
    Role::Admin
}

fn default_critical_events() -> Vec<String> {
    DEFAULT_CRITICAL_EVENTS.iter().map(|s| s.to_string()).collect()
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            notify_threshold: default_threshold(),
            notify_role: default_role(),
            critical_events: default_critical_events(),
        }
    }
}

impl AuditConfig {
    /// Parse `s` as TOML configuration.
    ///
    /// Returns `AuditError::ConfigError` if the TOML is malformed or does
    /// not match the expected schema.
    pub fn from_toml_str(s: &str) -> AuditResult<Self> {
        toml::from_str(s).map_err(|e| AuditError::ConfigError {
            reason: format!("failed to parse audit config TOML: {}", e),
        })
    }

    /// Read the file at `path` and parse it as TOML configuration.
    pub fn from_file(path: &Path) -> AuditResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| AuditError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The severity an event is actually recorded at.
    ///
    /// Event types on the critical list are escalated to `Crit`; severity
    /// is never lowered.
    pub fn effective_severity(&self, event_type: &str, requested: Severity) -> Severity {
        if self.critical_events.iter().any(|t| t == event_type) {
            Severity::Crit.max(requested)
        } else {
            requested
        }
    }

    /// Return true if an event at `severity` triggers admin fan-out.
    pub fn should_notify(&self, severity: Severity) -> bool {
        severity >= self.notify_threshold
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
