//! Per-entity reverters.
//!
//! Each reverter dispatches on the recorded [`AuditAction`] with one closed
//! `match`, so an action with no handler for the entity kind is an explicit
//! [`RevertError::UnsupportedAction`] arm rather than a missing map key.
//!
//! [`AuditAction`]: ravel_audit::AuditAction
//! [`RevertError::UnsupportedAction`]: crate::RevertError::UnsupportedAction

pub mod privilege;
pub mod role;
pub mod user;

pub use privilege::PrivilegeReverter;
pub use role::RoleReverter;
pub use user::UserReverter;
