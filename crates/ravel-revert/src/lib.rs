//! Audit-log reversal engine for ravel.
//!
//! Given the audit entry of a past directory mutation, this crate computes
//! and applies the inverse mutation through the entity's restore, remove,
//! update and (un)assign use-cases. Batch entries are reverted child by
//! child under one new grouping entry, so the revert itself stays revertible.
//! The engine never edits history: reverting appends, it never mutates or
//! deletes recorded entries.
//!
//! # Modules
//!
//! - [`request`] - [`RevertRequest`], the per-entry view handed to handlers
//! - [`reverters`] - per-entity reverters with closed action dispatch
//! - [`service`] - [`RevertService`], the entry-point facade
//! - [`ports`] - mutation use-case ports the engine invokes
//! - [`patch`] - the structural patch port and its merge-patch default
//! - [`clock`] - injected time source
//! - [`error`] - [`RevertError`] taxonomy
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ravel_revert::{
//!     MergePatchService, PrivilegeReverter, RevertService, RoleReverter, SystemClock,
//!     UserReverter,
//! };
//!
//! let clock = Arc::new(SystemClock);
//! let patches = Arc::new(MergePatchService::new());
//! let service = RevertService::new(
//!     audit.clone(),
//!     UserReverter::new(audit.clone(), users, patches.clone(), clock.clone()),
//!     RoleReverter::new(audit.clone(), roles, patches.clone(), clock.clone()),
//!     PrivilegeReverter::new(audit.clone(), privileges, patches, clock),
//! );
//!
//! let new_parent = service.revert_entry(entry_id).await?;
//! ```

pub mod clock;
pub mod error;
pub mod patch;
pub mod ports;
pub mod request;
pub mod reverters;
pub mod service;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Result, RevertError};
pub use patch::{MergePatchService, PatchError, PatchService};
pub use ports::{PrivilegeMutations, RoleMutations, UserMutations};
pub use request::RevertRequest;
pub use reverters::{PrivilegeReverter, RoleReverter, UserReverter};
pub use service::RevertService;
