//! Audit log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ravel_core::AuditEntryId;

use crate::action::{AuditAction, EntityKind};
use crate::payload::Payload;

/// One recorded mutation in the append-only audit log.
///
/// Entries are created once by the use-case performing the mutation and are
/// never edited or deleted. Reverting an entry appends new entries; history
/// stays intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique identifier.
    pub id: AuditEntryId,
    /// Kind of entity the action applied to.
    pub entity_kind: EntityKind,
    /// The affected entity. `None` for batch-parent grouping entries.
    pub entity_id: Option<Uuid>,
    /// Action performed.
    pub action: AuditAction,
    /// What the action produced (snapshot or patch).
    pub forward: Option<Payload>,
    /// How to undo the action.
    pub backward: Option<Payload>,
    /// Batch parent this entry belongs to, if any.
    pub parent_id: Option<AuditEntryId>,
    /// When the action occurred.
    pub timestamp: DateTime<Utc>,
}

/// Input for appending an audit entry.
#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    /// Kind of entity the action applied to.
    pub entity_kind: EntityKind,
    /// The affected entity. `None` for batch-parent grouping entries.
    pub entity_id: Option<Uuid>,
    /// Action performed.
    pub action: AuditAction,
    /// What the action produced.
    pub forward: Option<Payload>,
    /// How to undo the action.
    pub backward: Option<Payload>,
    /// Batch parent this entry belongs to, if any.
    pub parent_id: Option<AuditEntryId>,
    /// When the action occurred.
    pub timestamp: DateTime<Utc>,
}
