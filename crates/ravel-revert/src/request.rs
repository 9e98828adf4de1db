//! The minimal view of an audit entry needed for one reversal step.

use uuid::Uuid;

use ravel_audit::{AuditAction, AuditEntry, Payload};
use ravel_core::AuditEntryId;

use crate::error::{Result, RevertError};

/// Read-only view of one audit entry, supplied by the dispatching caller.
#[derive(Debug, Clone)]
pub struct RevertRequest {
    /// The entry being reverted.
    pub entry_id: AuditEntryId,
    /// The affected entity. `None` for batch-parent grouping entries.
    pub entity_id: Option<Uuid>,
    /// The recorded action to invert.
    pub action: AuditAction,
    /// The entry's backward payload, if any.
    pub backward: Option<Payload>,
}

impl RevertRequest {
    /// Build a request from a stored entry.
    #[must_use]
    pub fn from_entry(entry: &AuditEntry) -> Self {
        Self {
            entry_id: entry.id,
            entity_id: entry.entity_id,
            action: entry.action,
            backward: entry.backward.clone(),
        }
    }

    /// The entity id, or a data error if the entry does not carry one.
    pub(crate) fn entity_uuid(&self) -> Result<Uuid> {
        self.entity_id.ok_or_else(|| {
            RevertError::failed(self.entry_id, self.action, "entry has no entity id")
        })
    }

    /// The backward payload, or a data error if the entry does not carry one.
    pub(crate) fn backward_payload(&self) -> Result<&Payload> {
        self.backward.as_ref().ok_or_else(|| {
            RevertError::failed(self.entry_id, self.action, "entry has no backward data")
        })
    }
}
