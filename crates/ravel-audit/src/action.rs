//! Entity kinds and audited actions.

use serde::{Deserialize, Serialize};

/// The kind of directory entity an audit entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A directory user.
    User,
    /// A role.
    Role,
    /// A privilege.
    Privilege,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Role => write!(f, "role"),
            Self::Privilege => write!(f, "privilege"),
        }
    }
}

/// Action recorded by an audit entry.
///
/// The `Revert*` variants tag the grouping entries created when a batch
/// action is reverted; they carry no entity id and no payloads of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Entity was created.
    Create,
    /// Entity was patched forward.
    Update,
    /// Entity was removed.
    Remove,
    /// Several entities were removed in one batch.
    BatchRemove,
    /// Roles were assigned to a user.
    AssignRoles,
    /// Roles were unassigned from a user.
    UnassignRoles,
    /// Role assignments changed for several users in one batch.
    BatchAssignRoles,
    /// Role unassignments for several users in one batch.
    BatchUnassignRoles,
    /// Privileges were assigned to a role.
    AssignPrivileges,
    /// Privileges were unassigned from a role.
    UnassignPrivileges,
    /// Privilege assignments changed for several roles in one batch.
    BatchAssignPrivileges,
    /// Privilege unassignments for several roles in one batch.
    BatchUnassignPrivileges,
    /// Grouping entry for the revert of a batch removal.
    RevertBatchRemove,
    /// Grouping entry for the revert of a batch role assignment.
    RevertBatchAssignRoles,
    /// Grouping entry for the revert of a batch role unassignment.
    RevertBatchUnassignRoles,
    /// Grouping entry for the revert of a batch privilege assignment.
    RevertBatchAssignPrivileges,
    /// Grouping entry for the revert of a batch privilege unassignment.
    RevertBatchUnassignPrivileges,
}

impl AuditAction {
    /// Whether this action groups child entries under a batch parent.
    #[must_use]
    pub fn is_batch(self) -> bool {
        matches!(
            self,
            Self::BatchRemove
                | Self::BatchAssignRoles
                | Self::BatchUnassignRoles
                | Self::BatchAssignPrivileges
                | Self::BatchUnassignPrivileges
        )
    }

    /// The action tagging the grouping entry created when this batch action
    /// is reverted. `None` for non-batch actions.
    #[must_use]
    pub fn revert_marker(self) -> Option<Self> {
        match self {
            Self::BatchRemove => Some(Self::RevertBatchRemove),
            Self::BatchAssignRoles => Some(Self::RevertBatchAssignRoles),
            Self::BatchUnassignRoles => Some(Self::RevertBatchUnassignRoles),
            Self::BatchAssignPrivileges => Some(Self::RevertBatchAssignPrivileges),
            Self::BatchUnassignPrivileges => Some(Self::RevertBatchUnassignPrivileges),
            _ => None,
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Remove => write!(f, "remove"),
            Self::BatchRemove => write!(f, "batch_remove"),
            Self::AssignRoles => write!(f, "assign_roles"),
            Self::UnassignRoles => write!(f, "unassign_roles"),
            Self::BatchAssignRoles => write!(f, "batch_assign_roles"),
            Self::BatchUnassignRoles => write!(f, "batch_unassign_roles"),
            Self::AssignPrivileges => write!(f, "assign_privileges"),
            Self::UnassignPrivileges => write!(f, "unassign_privileges"),
            Self::BatchAssignPrivileges => write!(f, "batch_assign_privileges"),
            Self::BatchUnassignPrivileges => write!(f, "batch_unassign_privileges"),
            Self::RevertBatchRemove => write!(f, "revert_batch_remove"),
            Self::RevertBatchAssignRoles => write!(f, "revert_batch_assign_roles"),
            Self::RevertBatchUnassignRoles => write!(f, "revert_batch_unassign_roles"),
            Self::RevertBatchAssignPrivileges => write!(f, "revert_batch_assign_privileges"),
            Self::RevertBatchUnassignPrivileges => write!(f, "revert_batch_unassign_privileges"),
        }
    }
}
