//! Directory entity types.
//!
//! Users, roles and privileges as plain values. Persistence lives behind the
//! repository ports of the consuming crates; these types only describe the
//! data that moves through audit snapshots and mutation use-cases.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{PrivilegeId, RoleId, UserId};

/// A directory user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// Login name, unique within the directory.
    pub username: String,
    /// Primary email address.
    pub email: String,
    /// Optional human-readable display name.
    pub display_name: Option<String>,
    /// Whether the account is active.
    pub is_active: bool,
    /// When created.
    pub created_at: DateTime<Utc>,
    /// When last updated.
    pub updated_at: DateTime<Utc>,
}

/// A role grouping privileges, assignable to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique identifier.
    pub id: RoleId,
    /// Display name, unique within the directory.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// When created.
    pub created_at: DateTime<Utc>,
    /// When last updated.
    pub updated_at: DateTime<Utc>,
}

/// A privilege representing a single grantable capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Privilege {
    /// Unique identifier.
    pub id: PrivilegeId,
    /// Display name, unique within the directory.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// When created.
    pub created_at: DateTime<Utc>,
    /// When last updated.
    pub updated_at: DateTime<Utc>,
}
