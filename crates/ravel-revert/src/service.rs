//! Entry-point service dispatching reverts by entity kind.

use std::sync::Arc;

use tracing::{error, info};

use ravel_audit::{AuditError, AuditLogStore, EntityKind};
use ravel_core::AuditEntryId;

use crate::error::{Result, RevertError};
use crate::request::RevertRequest;
use crate::reverters::{PrivilegeReverter, RoleReverter, UserReverter};

/// Reverts audit entries by id.
///
/// Loads the entry, builds the [`RevertRequest`] and dispatches to the
/// reverter for the entry's entity kind. The engine owns no persistent state
/// and takes no locks; callers must serialize concurrent reverts that target
/// the same entry or entity.
pub struct RevertService {
    audit: Arc<dyn AuditLogStore>,
    users: UserReverter,
    roles: RoleReverter,
    privileges: PrivilegeReverter,
}

impl RevertService {
    /// Create a new revert service.
    pub fn new(
        audit: Arc<dyn AuditLogStore>,
        users: UserReverter,
        roles: RoleReverter,
        privileges: PrivilegeReverter,
    ) -> Self {
        Self {
            audit,
            users,
            roles,
            privileges,
        }
    }

    /// Revert the entry with the given id.
    ///
    /// Returns the id of the new grouping entry for batch reversals, `None`
    /// otherwise.
    pub async fn revert_entry(&self, entry_id: AuditEntryId) -> Result<Option<AuditEntryId>> {
        let entry = self
            .audit
            .entry(entry_id)
            .await?
            .ok_or(RevertError::Audit(AuditError::EntryNotFound(entry_id)))?;
        let request = RevertRequest::from_entry(&entry);

        let outcome = match entry.entity_kind {
            EntityKind::User => self.users.revert(&request).await,
            EntityKind::Role => self.roles.revert(&request).await,
            EntityKind::Privilege => self.privileges.revert(&request).await,
        };

        match &outcome {
            Ok(new_parent) => info!(
                entry_id = %entry_id,
                entity_kind = %entry.entity_kind,
                action = %entry.action,
                new_parent = ?new_parent,
                "Audit entry reverted"
            ),
            Err(err) => error!(
                entry_id = %entry_id,
                entity_kind = %entry.entity_kind,
                action = %entry.action,
                error = %err,
                "Audit entry revert failed"
            ),
        }
        outcome
    }
}
