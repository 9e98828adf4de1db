//! Reversal handlers for privilege audit entries.
//!
//! Privileges have no assignment actions of their own, so only the four
//! lifecycle actions are covered here.

use std::sync::Arc;

use tracing::{debug, info};

use ravel_audit::{AuditAction, AuditLogStore, EntityKind, NewAuditEntry, PrivilegeSnapshot};
use ravel_core::{AuditEntryId, Privilege, PrivilegeId};

use crate::clock::Clock;
use crate::error::{Result, RevertError};
use crate::patch::PatchService;
use crate::ports::PrivilegeMutations;
use crate::request::RevertRequest;

/// Reverts recorded privilege mutations.
pub struct PrivilegeReverter {
    audit: Arc<dyn AuditLogStore>,
    privileges: Arc<dyn PrivilegeMutations>,
    patches: Arc<dyn PatchService<Privilege>>,
    clock: Arc<dyn Clock>,
}

impl PrivilegeReverter {
    /// Create a new privilege reverter.
    pub fn new(
        audit: Arc<dyn AuditLogStore>,
        privileges: Arc<dyn PrivilegeMutations>,
        patches: Arc<dyn PatchService<Privilege>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            audit,
            privileges,
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
            action @ (AuditAction::AssignRoles
            | AuditAction::UnassignRoles
            | AuditAction::BatchAssignRoles
            | AuditAction::BatchUnassignRoles
            | AuditAction::AssignPrivileges
            | AuditAction::UnassignPrivileges
            | AuditAction::BatchAssignPrivileges
            | AuditAction::BatchUnassignPrivileges
            | AuditAction::RevertBatchRemove
            | AuditAction::RevertBatchAssignRoles
            | AuditAction::RevertBatchUnassignRoles
            | AuditAction::RevertBatchAssignPrivileges
            | AuditAction::RevertBatchUnassignPrivileges) => {
                Err(RevertError::UnsupportedAction {
                    entity_kind: EntityKind::Privilege,
                    action,
                })
            }
        }
    }

    async fn revert_create(&self, request: &RevertRequest) -> Result<()> {
        let id = PrivilegeId::from_uuid(request.entity_uuid()?);
        self.privileges.remove(&[id]).await?;
        info!(entry_id = %request.entry_id, privilege_id = %id, "Reverted privilege creation");
        Ok(())
    }

    async fn revert_remove(&self, request: &RevertRequest) -> Result<()> {
        let snapshot = PrivilegeSnapshot::from_payload(request.backward_payload()?)
            .map_err(|e| RevertError::failed(request.entry_id, request.action, e))?;
        self.privileges.restore(snapshot, None).await?;
        info!(entry_id = %request.entry_id, "Restored privilege from removal snapshot");
        Ok(())
    }

    async fn revert_update(&self, request: &RevertRequest) -> Result<()> {
        let patch = request
            .backward_payload()?
            .decode_patch(EntityKind::Privilege)
            .map_err(|e| RevertError::failed(request.entry_id, request.action, e))?;
        let id = PrivilegeId::from_uuid(request.entity_uuid()?);
        let current = self.privileges.current(id).await?.ok_or_else(|| {
            RevertError::failed(
                request.entry_id,
                request.action,
                format!("privilege {id} no longer exists"),
            )
        })?;
        let reverted = self
            .patches
            .apply(&current, &patch)
            .map_err(|e| RevertError::failed(request.entry_id, request.action, e))?;
        self.privileges.update(reverted).await?;
        info!(entry_id = %request.entry_id, privilege_id = %id, "Reverted privilege update");
        Ok(())
    }

    async fn revert_batch_remove(&self, request: &RevertRequest) -> Result<Option<AuditEntryId>> {
        let children = self.audit.recursive_child_ids(request.entry_id).await?;
        if children.is_empty() {
            info!(entry_id = %request.entry_id, "Batch entry has no children, nothing to revert");
            return Ok(None);
        }

        let parent = self
            .audit
            .append(NewAuditEntry {
                entity_kind: EntityKind::Privilege,
                entity_id: None,
                action: AuditAction::RevertBatchRemove,
                forward: None,
                backward: None,
                parent_id: None,
                timestamp: self.clock.now(),
            })
            .await?;
        for child_id in children {
            let payload = self.audit.backward(child_id).await?.ok_or_else(|| {
                RevertError::failed(child_id, request.action, "child entry has no backward data")
            })?;
            let snapshot = PrivilegeSnapshot::from_payload(&payload)
                .map_err(|e| RevertError::failed(child_id, request.action, e))?;
            self.privileges.restore(snapshot, Some(parent)).await?;
            debug!(child_id = %child_id, parent_id = %parent, "Restored privilege from batch child");
        }
        info!(entry_id = %request.entry_id, parent_id = %parent, "Reverted batch privilege removal");
        Ok(Some(parent))
    }
}
