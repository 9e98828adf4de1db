//! Append-only audit log domain for ravel.
//!
//! Every directory mutation is recorded as an [`AuditEntry`]: what happened
//! (`forward`) and the data needed to undo it (`backward`), both stored as
//! tagged, versioned [`Payload`] values. Batch operations group their
//! per-entity entries under a parent entry via `parent_id`.
//!
//! # Modules
//!
//! - [`action`] - [`EntityKind`] and the closed [`AuditAction`] enum
//! - [`entry`] - [`AuditEntry`] and its [`NewAuditEntry`] input
//! - [`payload`] - tagged payloads, snapshots and the patch document type
//! - [`store`] - the [`AuditLogStore`] port and [`InMemoryAuditLogStore`]
//!
//! # Example
//!
//! ```rust,ignore
//! use ravel_audit::{InMemoryAuditLogStore, AuditLogStore, NewAuditEntry};
//! use ravel_audit::{AuditAction, EntityKind};
//! use chrono::Utc;
//!
//! let store = InMemoryAuditLogStore::new();
//! let id = store
//!     .append(NewAuditEntry {
//!         entity_kind: EntityKind::User,
//!         entity_id: Some(uuid::Uuid::new_v4()),
//!         action: AuditAction::Create,
//!         forward: None,
//!         backward: None,
//!         parent_id: None,
//!         timestamp: Utc::now(),
//!     })
//!     .await?;
//! assert!(store.entry(id).await?.is_some());
//! ```

pub mod action;
pub mod entry;
pub mod error;
pub mod payload;
pub mod store;

// Re-export commonly used types
pub use action::{AuditAction, EntityKind};
pub use entry::{AuditEntry, NewAuditEntry};
pub use error::{AuditError, Result};
pub use payload::{
    PatchDocument, Payload, PayloadKind, PrivilegeSnapshot, RoleSnapshot, UserSnapshot,
    PAYLOAD_VERSION,
};
pub use store::{AuditEntryFilter, AuditLogStore, InMemoryAuditLogStore};
