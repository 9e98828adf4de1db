//! Reversal handlers for user audit entries.

use std::sync::Arc;

use tracing::{debug, info};

use ravel_audit::{
    AuditAction, AuditLogStore, EntityKind, NewAuditEntry, UserSnapshot,
};
use ravel_core::{AuditEntryId, RoleId, User, UserId};

use crate::clock::Clock;
use crate::error::{Result, RevertError};
use crate::patch::PatchService;
use crate::ports::UserMutations;
use crate::request::RevertRequest;

/// Reverts recorded user mutations.
pub struct UserReverter {
    audit: Arc<dyn AuditLogStore>,
    users: Arc<dyn UserMutations>,
    patches: Arc<dyn PatchService<User>>,
    clock: Arc<dyn Clock>,
}

impl UserReverter {
    /// Create a new user reverter.
    pub fn new(
        audit: Arc<dyn AuditLogStore>,
        users: Arc<dyn UserMutations>,
        patches: Arc<dyn PatchService<User>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            audit,
            users,
            patches,
            clock,
        }
    }

    /// Apply the inverse of the recorded action.
    ///
    /// Batch reversals return the id of the new grouping entry; single-entry
    /// reversals return `None`.
    pub async fn revert(&self, request: &RevertRequest) -> Result<Option<AuditEntryId>> {
        match request.action {
            AuditAction::Create => self.revert_create(request).await.map(|()| None),
            AuditAction::Update => self.revert_update(request).await.map(|()| None),
            AuditAction::Remove => self.revert_remove(request).await.map(|()| None),
            AuditAction::BatchRemove => self.revert_batch_remove(request).await,
            AuditAction::AssignRoles => self.revert_assign_roles(request).await.map(|()| None),
            AuditAction::UnassignRoles => self.revert_unassign_roles(request).await.map(|()| None),
            AuditAction::BatchAssignRoles => {
                self.revert_batch_role_edges(request, AuditAction::RevertBatchAssignRoles, false)
                    .await
            }
            AuditAction::BatchUnassignRoles => {
                self.revert_batch_role_edges(request, AuditAction::RevertBatchUnassignRoles, true)
                    .await
            }
            action @ (AuditAction::AssignPrivileges
            | AuditAction::UnassignPrivileges
            | AuditAction::BatchAssignPrivileges
            | AuditAction::BatchUnassignPrivileges
            | AuditAction::RevertBatchRemove
            | AuditAction::RevertBatchAssignRoles
            | AuditAction::RevertBatchUnassignRoles
            | AuditAction::RevertBatchAssignPrivileges
            | AuditAction::RevertBatchUnassignPrivileges) => {
                Err(RevertError::UnsupportedAction {
                    entity_kind: EntityKind::User,
                    action,
                })
            }
        }
    }

    /// The inverse of creating a user is removing it.
    async fn revert_create(&self, request: &RevertRequest) -> Result<()> {
        let id = UserId::from_uuid(request.entity_uuid()?);
        self.users.remove(&[id]).await?;
        info!(entry_id = %request.entry_id, user_id = %id, "Reverted user creation");
        Ok(())
    }

    /// The inverse of removing a user is restoring it from its snapshot.
    async fn revert_remove(&self, request: &RevertRequest) -> Result<()> {
        let snapshot = UserSnapshot::from_payload(request.backward_payload()?)
            .map_err(|e| RevertError::failed(request.entry_id, request.action, e))?;
        self.users.restore(snapshot, None).await?;
        info!(entry_id = %request.entry_id, "Restored user from removal snapshot");
        Ok(())
    }

    /// The inverse of a forward patch is the recorded backward patch applied
    /// to the current value.
    async fn revert_update(&self, request: &RevertRequest) -> Result<()> {
        let patch = request
            .backward_payload()?
            .decode_patch(EntityKind::User)
            .map_err(|e| RevertError::failed(request.entry_id, request.action, e))?;
        let id = UserId::from_uuid(request.entity_uuid()?);
        let current = self.users.current(id).await?.ok_or_else(|| {
            RevertError::failed(
                request.entry_id,
                request.action,
                format!("user {id} no longer exists"),
            )
        })?;
        let reverted = self
            .patches
            .apply(&current, &patch)
            .map_err(|e| RevertError::failed(request.entry_id, request.action, e))?;
        self.users.update(reverted).await?;
        info!(entry_id = %request.entry_id, user_id = %id, "Reverted user update");
        Ok(())
    }

    async fn revert_assign_roles(&self, request: &RevertRequest) -> Result<()> {
        let (user_id, role_ids) = self.role_edge_arguments(request)?;
        self.users.unassign_roles(&[user_id], &role_ids, None).await?;
        info!(
            entry_id = %request.entry_id,
            user_id = %user_id,
            roles = role_ids.len(),
            "Reverted role assignment"
        );
        Ok(())
    }

    async fn revert_unassign_roles(&self, request: &RevertRequest) -> Result<()> {
        let (user_id, role_ids) = self.role_edge_arguments(request)?;
        self.users.assign_roles(&[user_id], &role_ids, None).await?;
        info!(
            entry_id = %request.entry_id,
            user_id = %user_id,
            roles = role_ids.len(),
            "Reverted role unassignment"
        );
        Ok(())
    }

    fn role_edge_arguments(&self, request: &RevertRequest) -> Result<(UserId, Vec<RoleId>)> {
        let user_id = UserId::from_uuid(request.entity_uuid()?);
        let role_ids = request
            .backward_payload()?
            .decode_id_list(EntityKind::Role)
            .map_err(|e| RevertError::failed(request.entry_id, request.action, e))?;
        Ok((user_id, role_ids))
    }

    /// Restore every user removed by the batch, grouped under one new
    /// revert entry. Sequential, order-preserving, stop-on-error; restores
    /// already applied stay applied.
    async fn revert_batch_remove(&self, request: &RevertRequest) -> Result<Option<AuditEntryId>> {
        let children = self.audit.recursive_child_ids(request.entry_id).await?;
        if children.is_empty() {
            info!(entry_id = %request.entry_id, "Batch entry has no children, nothing to revert");
            return Ok(None);
        }

        let parent = self.new_group_entry(AuditAction::RevertBatchRemove).await?;
        for child_id in children {
            let payload = self.audit.backward(child_id).await?.ok_or_else(|| {
                RevertError::failed(child_id, request.action, "child entry has no backward data")
            })?;
            let snapshot = UserSnapshot::from_payload(&payload)
                .map_err(|e| RevertError::failed(child_id, request.action, e))?;
            self.users.restore(snapshot, Some(parent)).await?;
            debug!(child_id = %child_id, parent_id = %parent, "Restored user from batch child");
        }
        info!(entry_id = %request.entry_id, parent_id = %parent, "Reverted batch user removal");
        Ok(Some(parent))
    }

    /// Replay the inverse (un)assignment for every batch child, grouped
    /// under one new revert entry tagged `marker`.
    async fn revert_batch_role_edges(
        &self,
        request: &RevertRequest,
        marker: AuditAction,
        assign_back: bool,
    ) -> Result<Option<AuditEntryId>> {
        let children = self.audit.recursive_child_ids(request.entry_id).await?;
        if children.is_empty() {
            info!(entry_id = %request.entry_id, "Batch entry has no children, nothing to revert");
            return Ok(None);
        }

        let parent = self.new_group_entry(marker).await?;
        for child_id in children {
            let child = self.audit.entry(child_id).await?.ok_or_else(|| {
                RevertError::failed(child_id, request.action, "child entry no longer exists")
            })?;
            let user_id = UserId::from_uuid(child.entity_id.ok_or_else(|| {
                RevertError::failed(child_id, request.action, "child entry has no entity id")
            })?);
            let payload = child.backward.ok_or_else(|| {
                RevertError::failed(child_id, request.action, "child entry has no backward data")
            })?;
            let role_ids: Vec<RoleId> = payload
                .decode_id_list(EntityKind::Role)
                .map_err(|e| RevertError::failed(child_id, request.action, e))?;

            if assign_back {
                self.users
                    .assign_roles(&[user_id], &role_ids, Some(parent))
                    .await?;
            } else {
                self.users
                    .unassign_roles(&[user_id], &role_ids, Some(parent))
                    .await?;
            }
            debug!(child_id = %child_id, parent_id = %parent, "Replayed inverse role edge change");
        }
        info!(entry_id = %request.entry_id, parent_id = %parent, "Reverted batch role edge change");
        Ok(Some(parent))
    }

    async fn new_group_entry(&self, action: AuditAction) -> Result<AuditEntryId> {
        Ok(self
            .audit
            .append(NewAuditEntry {
                entity_kind: EntityKind::User,
                entity_id: None,
                action,
                forward: None,
                backward: None,
                parent_id: None,
                timestamp: self.clock.now(),
            })
            .await?)
    }
}
