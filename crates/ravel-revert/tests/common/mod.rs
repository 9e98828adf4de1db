//! Common test utilities for ravel-revert integration tests.
//!
//! Provides recording fakes for the mutation ports plus a `TestContext`
//! wiring them into a `RevertService` over an in-memory audit log and a
//! fixed clock. Recorded calls let tests assert exactly which use-cases a
//! reversal invoked, and nothing else.

// Each integration test binary compiles this module separately and uses a
// different subset of it.
#![allow(dead_code)]

pub mod fixtures;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::RwLock;

use ravel_audit::{InMemoryAuditLogStore, PrivilegeSnapshot, RoleSnapshot, UserSnapshot};
use ravel_core::{AuditEntryId, Privilege, PrivilegeId, Role, RoleId, User, UserId};
use ravel_revert::{
    FixedClock, MergePatchService, PrivilegeMutations, PrivilegeReverter, Result, RevertService,
    RoleMutations, RoleReverter, UserMutations, UserReverter,
};

/// One recorded mutation against the user port.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCall {
    Restore(UserSnapshot, Option<AuditEntryId>),
    Remove(Vec<UserId>),
    Update(User),
    AssignRoles(Vec<UserId>, Vec<RoleId>, Option<AuditEntryId>),
    UnassignRoles(Vec<UserId>, Vec<RoleId>, Option<AuditEntryId>),
}

/// Recording fake of [`UserMutations`] backed by in-memory state, so
/// restored users can be re-snapshotted by round-trip tests.
#[derive(Default)]
pub struct RecordingUserMutations {
    calls: RwLock<Vec<UserCall>>,
    users: RwLock<HashMap<UserId, User>>,
    role_edges: RwLock<HashMap<UserId, Vec<RoleId>>>,
}

impl RecordingUserMutations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user as current state (for update-reversal tests).
    pub async fn seed(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// All mutations recorded so far, in call order.
    pub async fn calls(&self) -> Vec<UserCall> {
        self.calls.read().await.clone()
    }

    /// Re-snapshot a user and its role edges from the fake's state.
    pub async fn snapshot_of(&self, id: UserId) -> Option<UserSnapshot> {
        let user = self.users.read().await.get(&id).cloned()?;
        let role_ids = self
            .role_edges
            .read()
            .await
            .get(&id)
            .cloned()
            .unwrap_or_default();
        Some(UserSnapshot::new(user, role_ids))
    }
}

#[async_trait::async_trait]
impl UserMutations for RecordingUserMutations {
    async fn restore(&self, snapshot: UserSnapshot, parent: Option<AuditEntryId>) -> Result<()> {
        self.calls
            .write()
            .await
            .push(UserCall::Restore(snapshot.clone(), parent));
        self.role_edges
            .write()
            .await
            .insert(snapshot.user.id, snapshot.role_ids.clone());
        self.users
            .write()
            .await
            .insert(snapshot.user.id, snapshot.user);
        Ok(())
    }

    async fn remove(&self, ids: &[UserId]) -> Result<()> {
        self.calls.write().await.push(UserCall::Remove(ids.to_vec()));
        let mut users = self.users.write().await;
        let mut edges = self.role_edges.write().await;
        for id in ids {
            users.remove(id);
            edges.remove(id);
        }
        Ok(())
    }

    async fn current(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn update(&self, user: User) -> Result<()> {
        self.calls.write().await.push(UserCall::Update(user.clone()));
        self.users.write().await.insert(user.id, user);
        Ok(())
    }

    async fn assign_roles(
        &self,
        user_ids: &[UserId],
        role_ids: &[RoleId],
        parent: Option<AuditEntryId>,
    ) -> Result<()> {
        self.calls.write().await.push(UserCall::AssignRoles(
            user_ids.to_vec(),
            role_ids.to_vec(),
            parent,
        ));
        let mut edges = self.role_edges.write().await;
        for user_id in user_ids {
            let assigned = edges.entry(*user_id).or_default();
            for role_id in role_ids {
                if !assigned.contains(role_id) {
                    assigned.push(*role_id);
                }
            }
        }
        Ok(())
    }

    async fn unassign_roles(
        &self,
        user_ids: &[UserId],
        role_ids: &[RoleId],
        parent: Option<AuditEntryId>,
    ) -> Result<()> {
        self.calls.write().await.push(UserCall::UnassignRoles(
            user_ids.to_vec(),
            role_ids.to_vec(),
            parent,
        ));
        let mut edges = self.role_edges.write().await;
        for user_id in user_ids {
            if let Some(assigned) = edges.get_mut(user_id) {
                assigned.retain(|r| !role_ids.contains(r));
            }
        }
        Ok(())
    }
}

/// One recorded mutation against the role port.
#[derive(Debug, Clone, PartialEq)]
pub enum RoleCall {
    Restore(RoleSnapshot, Option<AuditEntryId>),
    Remove(Vec<RoleId>),
    Update(Role),
    AssignPrivileges(Vec<RoleId>, Vec<PrivilegeId>, Option<AuditEntryId>),
    UnassignPrivileges(Vec<RoleId>, Vec<PrivilegeId>, Option<AuditEntryId>),
}

/// Recording fake of [`RoleMutations`].
#[derive(Default)]
pub struct RecordingRoleMutations {
    calls: RwLock<Vec<RoleCall>>,
    roles: RwLock<HashMap<RoleId, Role>>,
}

impl RecordingRoleMutations {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, role: Role) {
        self.roles.write().await.insert(role.id, role);
    }

    pub async fn calls(&self) -> Vec<RoleCall> {
        self.calls.read().await.clone()
    }
}

#[async_trait::async_trait]
impl RoleMutations for RecordingRoleMutations {
    async fn restore(&self, snapshot: RoleSnapshot, parent: Option<AuditEntryId>) -> Result<()> {
        self.calls
            .write()
            .await
            .push(RoleCall::Restore(snapshot.clone(), parent));
        self.roles
            .write()
            .await
            .insert(snapshot.role.id, snapshot.role);
        Ok(())
    }

    async fn remove(&self, ids: &[RoleId]) -> Result<()> {
        self.calls.write().await.push(RoleCall::Remove(ids.to_vec()));
        let mut roles = self.roles.write().await;
        for id in ids {
            roles.remove(id);
        }
        Ok(())
    }

    async fn current(&self, id: RoleId) -> Result<Option<Role>> {
        Ok(self.roles.read().await.get(&id).cloned())
    }

    async fn update(&self, role: Role) -> Result<()> {
        self.calls.write().await.push(RoleCall::Update(role.clone()));
        self.roles.write().await.insert(role.id, role);
        Ok(())
    }

    async fn assign_privileges(
        &self,
        role_ids: &[RoleId],
        privilege_ids: &[PrivilegeId],
        parent: Option<AuditEntryId>,
    ) -> Result<()> {
        self.calls.write().await.push(RoleCall::AssignPrivileges(
            role_ids.to_vec(),
            privilege_ids.to_vec(),
            parent,
        ));
        Ok(())
    }

    async fn unassign_privileges(
        &self,
        role_ids: &[RoleId],
        privilege_ids: &[PrivilegeId],
        parent: Option<AuditEntryId>,
    ) -> Result<()> {
        self.calls.write().await.push(RoleCall::UnassignPrivileges(
            role_ids.to_vec(),
            privilege_ids.to_vec(),
            parent,
        ));
        Ok(())
    }
}

/// One recorded mutation against the privilege port.
#[derive(Debug, Clone, PartialEq)]
pub enum PrivilegeCall {
    Restore(PrivilegeSnapshot, Option<AuditEntryId>),
    Remove(Vec<PrivilegeId>),
    Update(Privilege),
}

/// Recording fake of [`PrivilegeMutations`].
#[derive(Default)]
pub struct RecordingPrivilegeMutations {
    calls: RwLock<Vec<PrivilegeCall>>,
    privileges: RwLock<HashMap<PrivilegeId, Privilege>>,
}

impl RecordingPrivilegeMutations {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, privilege: Privilege) {
        self.privileges.write().await.insert(privilege.id, privilege);
    }

    pub async fn calls(&self) -> Vec<PrivilegeCall> {
        self.calls.read().await.clone()
    }
}

#[async_trait::async_trait]
impl PrivilegeMutations for RecordingPrivilegeMutations {
    async fn restore(
        &self,
        snapshot: PrivilegeSnapshot,
        parent: Option<AuditEntryId>,
    ) -> Result<()> {
        self.calls
            .write()
            .await
            .push(PrivilegeCall::Restore(snapshot.clone(), parent));
        self.privileges
            .write()
            .await
            .insert(snapshot.privilege.id, snapshot.privilege);
        Ok(())
    }

    async fn remove(&self, ids: &[PrivilegeId]) -> Result<()> {
        self.calls
            .write()
            .await
            .push(PrivilegeCall::Remove(ids.to_vec()));
        let mut privileges = self.privileges.write().await;
        for id in ids {
            privileges.remove(id);
        }
        Ok(())
    }

    async fn current(&self, id: PrivilegeId) -> Result<Option<Privilege>> {
        Ok(self.privileges.read().await.get(&id).cloned())
    }

    async fn update(&self, privilege: Privilege) -> Result<()> {
        self.calls
            .write()
            .await
            .push(PrivilegeCall::Update(privilege.clone()));
        self.privileges
            .write()
            .await
            .insert(privilege.id, privilege);
        Ok(())
    }
}

/// Everything a revert scenario needs, wired together.
pub struct TestContext {
    pub audit: Arc<InMemoryAuditLogStore>,
    pub users: Arc<RecordingUserMutations>,
    pub roles: Arc<RecordingRoleMutations>,
    pub privileges: Arc<RecordingPrivilegeMutations>,
    /// The instant the fixed clock reports.
    pub now: DateTime<Utc>,
    pub service: RevertService,
}

impl TestContext {
    pub fn new() -> Self {
        let audit = Arc::new(InMemoryAuditLogStore::new());
        let users = Arc::new(RecordingUserMutations::new());
        let roles = Arc::new(RecordingRoleMutations::new());
        let privileges = Arc::new(RecordingPrivilegeMutations::new());
        let now = Utc.with_ymd_and_hms(2024, 5, 17, 12, 0, 0).unwrap();
        let clock = Arc::new(FixedClock::at(now));
        let patches = Arc::new(MergePatchService::new());

        let service = RevertService::new(
            audit.clone(),
            UserReverter::new(audit.clone(), users.clone(), patches.clone(), clock.clone()),
            RoleReverter::new(audit.clone(), roles.clone(), patches.clone(), clock.clone()),
            PrivilegeReverter::new(audit.clone(), privileges.clone(), patches, clock),
        );

        Self {
            audit,
            users,
            roles,
            privileges,
            now,
            service,
        }
    }
}
