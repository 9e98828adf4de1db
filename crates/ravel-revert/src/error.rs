//! Error types for the reversal engine.

use thiserror::Error;

use ravel_audit::{AuditAction, AuditError, EntityKind};
use ravel_core::AuditEntryId;

/// Errors that can occur while reverting an audit entry.
#[derive(Debug, Error)]
pub enum RevertError {
    /// No reversal handler exists for this entity kind and action pair.
    ///
    /// Always a programming or wiring defect, never a data problem; the
    /// engine does not catch it.
    #[error("No reversal handler for {entity_kind} action {action}")]
    UnsupportedAction {
        /// The entity kind the revert was dispatched for.
        entity_kind: EntityKind,
        /// The recorded action no handler covers.
        action: AuditAction,
    },

    /// The entry (or one of its batch children) cannot be reverted because
    /// its recorded data is malformed or references state that no longer
    /// exists.
    #[error("Revert of audit entry {entry_id} ({action}) failed: {cause}")]
    Failed {
        /// The offending entry. For batch reverts this is the failing child.
        entry_id: AuditEntryId,
        /// The action being reverted.
        action: AuditAction,
        /// Human-readable cause for the operator.
        cause: String,
    },

    /// The audit log store failed while reading entries or appending the
    /// group-revert entry.
    #[error("Audit log error: {0}")]
    Audit(#[from] AuditError),

    /// A restore/remove/update/assign use-case failed. Propagated unchanged;
    /// the engine adds no retry or compensation.
    #[error("Downstream use-case failure: {0}")]
    Downstream(String),
}

impl RevertError {
    /// Build a [`RevertError::Failed`] naming the offending entry.
    pub(crate) fn failed(
        entry_id: AuditEntryId,
        action: AuditAction,
        cause: impl std::fmt::Display,
    ) -> Self {
        Self::Failed {
            entry_id,
            action,
            cause: cause.to_string(),
        }
    }
}

/// Convenience Result type for the reversal engine.
pub type Result<T> = std::result::Result<T, RevertError>;
