//! The static catalog of known event types.
//!
//! Consumed by filtering UIs; recording is not restricted to this list —
//! any dot-namespaced string is a valid event type.

use serde::{Deserialize, Serialize};

/// A known event type with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTypeInfo {
    pub value: &'static str,
    pub label: &'static str,
}

/// All event types the administrative surface emits.
pub fn event_type_catalog() -> &'static [EventTypeInfo] {
    const CATALOG: &[EventTypeInfo] = &[
        EventTypeInfo { value: "admin.login", label: "Admin Login" },
        EventTypeInfo { value: "admin.logout", label: "Admin Logout" },
        EventTypeInfo { value: "user.created", label: "User Created" },
        EventTypeInfo { value: "user.updated", label: "User Updated" },
        EventTypeInfo { value: "user.deleted", label: "User Deleted" },
        EventTypeInfo { value: "user.blocked", label: "User Blocked" },
        EventTypeInfo { value: "entrepreneur.approved", label: "Entrepreneur Approved" },
        EventTypeInfo { value: "entrepreneur.rejected", label: "Entrepreneur Rejected" },
        EventTypeInfo { value: "subscription.granted", label: "Subscription Granted" },
        EventTypeInfo { value: "subscription.revoked", label: "Subscription Revoked" },
        EventTypeInfo { value: "campaign.sent", label: "Campaign Sent" },
        EventTypeInfo { value: "data.exported", label: "Data Exported" },
        EventTypeInfo { value: "audit.exported", label: "Audit Exported" },
        EventTypeInfo { value: "settings.updated", label: "Settings Updated" },
        EventTypeInfo { value: "auth.failed", label: "Auth Failed" },
        EventTypeInfo { value: "access.denied", label: "Access Denied" },
    ];
    CATALOG
}
