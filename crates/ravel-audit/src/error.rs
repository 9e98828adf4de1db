//! Error types for the audit log domain.

use ravel_core::AuditEntryId;
use thiserror::Error;

use crate::payload::{PayloadKind, PAYLOAD_VERSION};

/// Errors that can occur while reading or writing the audit log.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The referenced audit entry does not exist.
    #[error("Audit entry not found: {0}")]
    EntryNotFound(AuditEntryId),

    /// A payload carried a different kind tag than the caller expected.
    ///
    /// This is always a data-integrity defect: a stored payload was decoded
    /// against the wrong snapshot, id-list or patch type.
    #[error("Payload kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        /// The kind the caller asked to decode.
        expected: PayloadKind,
        /// The kind recorded on the stored payload.
        found: PayloadKind,
    },

    /// A payload was written with a schema version this build does not read.
    #[error("Unsupported payload version {found} (current is {PAYLOAD_VERSION})")]
    UnsupportedVersion {
        /// The version recorded on the stored payload.
        found: u16,
    },

    /// Serializing or deserializing payload data failed.
    #[error("Payload codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Convenience Result type for the audit log domain.
pub type Result<T> = std::result::Result<T, AuditError>;
