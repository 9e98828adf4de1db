//! Reversal handlers for role audit entries.

use std::sync::Arc;

use tracing::{debug, info};

use ravel_audit::{AuditAction, AuditLogStore, EntityKind, NewAuditEntry, RoleSnapshot};
use ravel_core::{AuditEntryId, PrivilegeId, Role, RoleId};

use crate::clock::Clock;
use crate::error::{Result, RevertError};
use crate::patch::PatchService;
use crate::ports::RoleMutations;
use crate::request::RevertRequest;

/// Reverts recorded role mutations.
pub struct RoleReverter {
    audit: Arc<dyn AuditLogStore>,
    roles: Arc<dyn RoleMutations>,
    patches: Arc<dyn PatchService<Role>>,
    clock: Arc<dyn Clock>,
}

impl RoleReverter {
    /// Create a new role reverter.
    pub fn new(
        audit: Arc<dyn AuditLogStore>,
        roles: Arc<dyn RoleMutations>,
        patches: Arc<dyn PatchService<Role>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            audit,
            roles,
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
            AuditAction::AssignPrivileges => {
                self.revert_assign_privileges(request).await.map(|()| None)
            }
            AuditAction::UnassignPrivileges => {
                self.revert_unassign_privileges(request).await.map(|()| None)
            }
            AuditAction::BatchAssignPrivileges => {
                self.revert_batch_privilege_edges(
                    request,
                    AuditAction::RevertBatchAssignPrivileges,
                    false,
                )
                .await
            }
            AuditAction::BatchUnassignPrivileges => {
                self.revert_batch_privilege_edges(
                    request,
                    AuditAction::RevertBatchUnassignPrivileges,
                    true,
                )
                .await
            }
            action @ (AuditAction::AssignRoles
            | AuditAction::UnassignRoles
            | AuditAction::BatchAssignRoles
            | AuditAction::BatchUnassignRoles
            | AuditAction::RevertBatchRemove
            | AuditAction::RevertBatchAssignRoles
            | AuditAction::RevertBatchUnassignRoles
            | AuditAction::RevertBatchAssignPrivileges
            | AuditAction::RevertBatchUnassignPrivileges) => {
                Err(RevertError::UnsupportedAction {
                    entity_kind: EntityKind::Role,
                    action,
                })
            }
        }
    }

    async fn revert_create(&self, request: &RevertRequest) -> Result<()> {
        let id = RoleId::from_uuid(request.entity_uuid()?);
        self.roles.remove(&[id]).await?;
        info!(entry_id = %request.entry_id, role_id = %id, "Reverted role creation");
        Ok(())
    }

    async fn revert_remove(&self, request: &RevertRequest) -> Result<()> {
        let snapshot = RoleSnapshot::from_payload(request.backward_payload()?)
            .map_err(|e| RevertError::failed(request.entry_id, request.action, e))?;
        self.roles.restore(snapshot, None).await?;
        info!(entry_id = %request.entry_id, "Restored role from removal snapshot");
        Ok(())
    }

    async fn revert_update(&self, request: &RevertRequest) -> Result<()> {
        let patch = request
            .backward_payload()?
            .decode_patch(EntityKind::Role)
            .map_err(|e| RevertError::failed(request.entry_id, request.action, e))?;
        let id = RoleId::from_uuid(request.entity_uuid()?);
        let current = self.roles.current(id).await?.ok_or_else(|| {
            RevertError::failed(
                request.entry_id,
                request.action,
                format!("role {id} no longer exists"),
            )
        })?;
        let reverted = self
            .patches
            .apply(&current, &patch)
            .map_err(|e| RevertError::failed(request.entry_id, request.action, e))?;
        self.roles.update(reverted).await?;
        info!(entry_id = %request.entry_id, role_id = %id, "Reverted role update");
        Ok(())
    }

    async fn revert_assign_privileges(&self, request: &RevertRequest) -> Result<()> {
        let (role_id, privilege_ids) = self.privilege_edge_arguments(request)?;
        self.roles
            .unassign_privileges(&[role_id], &privilege_ids, None)
            .await?;
        info!(
            entry_id = %request.entry_id,
            role_id = %role_id,
            privileges = privilege_ids.len(),
            "Reverted privilege assignment"
        );
        Ok(())
    }

    async fn revert_unassign_privileges(&self, request: &RevertRequest) -> Result<()> {
        let (role_id, privilege_ids) = self.privilege_edge_arguments(request)?;
        self.roles
            .assign_privileges(&[role_id], &privilege_ids, None)
            .await?;
        info!(
            entry_id = %request.entry_id,
            role_id = %role_id,
            privileges = privilege_ids.len(),
            "Reverted privilege unassignment"
        );
        Ok(())
    }

    fn privilege_edge_arguments(
        &self,
        request: &RevertRequest,
    ) -> Result<(RoleId, Vec<PrivilegeId>)> {
        let role_id = RoleId::from_uuid(request.entity_uuid()?);
        let privilege_ids = request
            .backward_payload()?
            .decode_id_list(EntityKind::Privilege)
            .map_err(|e| RevertError::failed(request.entry_id, request.action, e))?;
        Ok((role_id, privilege_ids))
    }

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
            let snapshot = RoleSnapshot::from_payload(&payload)
                .map_err(|e| RevertError::failed(child_id, request.action, e))?;
            self.roles.restore(snapshot, Some(parent)).await?;
            debug!(child_id = %child_id, parent_id = %parent, "Restored role from batch child");
        }
        info!(entry_id = %request.entry_id, parent_id = %parent, "Reverted batch role removal");
        Ok(Some(parent))
    }

    async fn revert_batch_privilege_edges(
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
            let role_id = RoleId::from_uuid(child.entity_id.ok_or_else(|| {
                RevertError::failed(child_id, request.action, "child entry has no entity id")
            })?);
            let payload = child.backward.ok_or_else(|| {
                RevertError::failed(child_id, request.action, "child entry has no backward data")
            })?;
            let privilege_ids: Vec<PrivilegeId> = payload
                .decode_id_list(EntityKind::Privilege)
                .map_err(|e| RevertError::failed(child_id, request.action, e))?;

            if assign_back {
                self.roles
                    .assign_privileges(&[role_id], &privilege_ids, Some(parent))
                    .await?;
            } else {
                self.roles
                    .unassign_privileges(&[role_id], &privilege_ids, Some(parent))
                    .await?;
            }
            debug!(child_id = %child_id, parent_id = %parent, "Replayed inverse privilege edge change");
        }
        info!(entry_id = %request.entry_id, parent_id = %parent, "Reverted batch privilege edge change");
        Ok(Some(parent))
    }

    async fn new_group_entry(&self, action: AuditAction) -> Result<AuditEntryId> {
        Ok(self
            .audit
            .append(NewAuditEntry {
                entity_kind: EntityKind::Role,
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
