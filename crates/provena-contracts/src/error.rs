//! Error types for the PROVENA audit subsystem.
//!
//! All fallible operations return `AuditResult<T>`. Error variants carry
//! enough context for structured log entries and operator-facing messages.

use thiserror::Error;

/// The unified error type for the PROVENA crates.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The event store could not be reached at all.
    #[error("event store unavailable: {reason}")]
    StoreUnavailable { reason: String },

    /// The event store rejected or failed an insert.
    ///
    /// The audited business action has already happened by the time this is
    /// raised; callers log the failure and continue rather than reversing
    /// the action.
    #[error("audit record write failed: {reason}")]
    WriteFailed { reason: String },

    /// The administrator directory could not be queried.
    #[error("administrator directory unavailable: {reason}")]
    DirectoryUnavailable { reason: String },

    /// A notification could not be delivered to one recipient.
    ///
    /// Never propagated out of the notifier — failures for one recipient
    /// must not prevent delivery to others.
    #[error("notification to admin '{admin_id}' failed: {reason}")]
    NotifyFailed { admin_id: String, reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The caller's admin profile does not grant the required permission.
    #[error("permission denied: {permission}")]
    PermissionDenied { permission: String },

    /// No audit event exists with the requested id.
    #[error("audit event '{id}' not found")]
    NotFound { id: String },
}

/// Convenience alias used throughout the PROVENA crates.
pub type AuditResult<T> = Result<T, AuditError>;
