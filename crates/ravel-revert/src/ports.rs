//! Mutation use-case ports consumed by the reversal engine.
//!
//! Production implementations perform the actual directory mutations and
//! record their own audit entries; the engine only decides which operation to
//! invoke and with what data. Implementations map their internal failures
//! into [`RevertError::Downstream`](crate::RevertError::Downstream).
//!
//! Contract notes shared by all three ports:
//!
//! - `restore` must recreate the entity **and** its assignment edges
//!   atomically from the caller's perspective, recording the restoration as
//!   an audit entry under the given parent (or as a first-class entry when
//!   the parent is `None`).
//! - `remove` tolerates ids that are already absent.
//! - None of the operations are guaranteed idempotent; re-running a revert is
//!   only safe if the implementation makes them so.

use ravel_audit::{PrivilegeSnapshot, RoleSnapshot, UserSnapshot};
use ravel_core::{AuditEntryId, Privilege, PrivilegeId, Role, RoleId, User, UserId};

use crate::error::Result;

/// Mutation use-cases for users.
#[async_trait::async_trait]
pub trait UserMutations: Send + Sync {
    /// Recreate a user and its role edges from a snapshot.
    async fn restore(&self, snapshot: UserSnapshot, parent: Option<AuditEntryId>) -> Result<()>;

    /// Remove the given users.
    async fn remove(&self, ids: &[UserId]) -> Result<()>;

    /// Fetch the current value of a user, if it exists.
    async fn current(&self, id: UserId) -> Result<Option<User>>;

    /// Replace a user with a new value.
    async fn update(&self, user: User) -> Result<()>;

    /// Assign roles to users.
    async fn assign_roles(
        &self,
        user_ids: &[UserId],
        role_ids: &[RoleId],
        parent: Option<AuditEntryId>,
    ) -> Result<()>;

    /// Unassign roles from users.
    async fn unassign_roles(
        &self,
        user_ids: &[UserId],
        role_ids: &[RoleId],
        parent: Option<AuditEntryId>,
    ) -> Result<()>;
}

/// Mutation use-cases for roles.
#[async_trait::async_trait]
pub trait RoleMutations: Send + Sync {
    /// Recreate a role and its user/privilege edges from a snapshot.
    async fn restore(&self, snapshot: RoleSnapshot, parent: Option<AuditEntryId>) -> Result<()>;

    /// Remove the given roles.
    async fn remove(&self, ids: &[RoleId]) -> Result<()>;

    /// Fetch the current value of a role, if it exists.
    async fn current(&self, id: RoleId) -> Result<Option<Role>>;

    /// Replace a role with a new value.
    async fn update(&self, role: Role) -> Result<()>;

    /// Assign privileges to roles.
    async fn assign_privileges(
        &self,
        role_ids: &[RoleId],
        privilege_ids: &[PrivilegeId],
        parent: Option<AuditEntryId>,
    ) -> Result<()>;

    /// Unassign privileges from roles.
    async fn unassign_privileges(
        &self,
        role_ids: &[RoleId],
        privilege_ids: &[PrivilegeId],
        parent: Option<AuditEntryId>,
    ) -> Result<()>;
}

/// Mutation use-cases for privileges.
///
/// Privileges have no outbound assignment actions of their own; their edges
/// are managed from the role side.
#[async_trait::async_trait]
pub trait PrivilegeMutations: Send + Sync {
    /// Recreate a privilege and its role edges from a snapshot.
    async fn restore(
        &self,
        snapshot: PrivilegeSnapshot,
        parent: Option<AuditEntryId>,
    ) -> Result<()>;

    /// Remove the given privileges.
    async fn remove(&self, ids: &[PrivilegeId]) -> Result<()>;

    /// Fetch the current value of a privilege, if it exists.
    async fn current(&self, id: PrivilegeId) -> Result<Option<Privilege>>;

    /// Replace a privilege with a new value.
    async fn update(&self, privilege: Privilege) -> Result<()>;
}
