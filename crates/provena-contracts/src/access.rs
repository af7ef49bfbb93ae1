//! Role-based access control as a static data table.
//!
//! Permission checks are a pure lookup against a role→permission mapping,
//! invoked explicitly at the start of a handler body. There is no dispatch
//! machinery: a role either lists the permission (or the `"*"` wildcard),
//! or the check fails.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AuditError, AuditResult};

/// The wildcard entry that grants every permission.
pub const WILDCARD: &str = "*";

/// Administrative roles, ordered by nothing — privilege comes from the
/// permission table, not the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Moderator,
    Support,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Moderator => "moderator",
            Role::Support => "support",
            Role::Viewer => "viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "moderator" => Ok(Role::Moderator),
            "support" => Ok(Role::Support),
            "viewer" => Ok(Role::Viewer),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// The static role→permission table.
///
/// `admin` holds the wildcard; every other role lists its grants
/// exhaustively.
pub fn permissions_for(role: Role) -> &'static [&'static str] {
    match role {
        Role::Admin => &[WILDCARD],
        Role::Moderator => &[
            "users:read",
            "entrepreneurs:read",
            "entrepreneurs:write",
            "moderation:read",
            "moderation:write",
            "moderation:macros",
            "moderation:assign",
        ],
        Role::Support => &[
            "users:read",
            "messages:read",
            "messages:write",
            "settings:read",
        ],
        Role::Viewer => &["analytics:read", "audit:read", "settings:read"],
    }
}

/// An administrator's profile as held by the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminProfile {
    /// Stable identifier, as referenced by audit events and notifications.
    pub user_id: String,

    /// The role that drives the permission table lookup.
    pub role: Role,

    /// Inactive profiles are excluded from directory listings and fan-out.
    pub is_active: bool,

    /// Per-profile permission grants layered on top of the role table.
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl AdminProfile {
    /// Return true if this profile grants `permission`.
    ///
    /// Resolution order: the admin role grants everything; otherwise the
    /// permission (or the wildcard) must appear in the profile's scopes or
    /// in the role's static table.
    pub fn permits(&self, permission: &str) -> bool {
        if self.role == Role::Admin {
            return true;
        }
        if self
            .scopes
            .iter()
            .any(|s| s == permission || s == WILDCARD)
        {
            return true;
        }
        permissions_for(self.role)
            .iter()
            .any(|p| *p == permission || *p == WILDCARD)
    }
}

/// The explicit capability check invoked at the start of a handler body.
///
/// Returns `PermissionDenied` carrying the permission name so the denial
/// can itself be audited.
pub fn require_permission(profile: &AdminProfile, permission: &str) -> AuditResult<()> {
    if profile.permits(permission) {
        Ok(())
    } else {
        Err(AuditError::PermissionDenied {
            permission: permission.to_string(),
        })
    }
}
