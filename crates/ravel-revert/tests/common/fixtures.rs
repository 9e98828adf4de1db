//! Fixture factories for revert integration tests.

use chrono::{TimeZone, Utc};

use ravel_audit::{AuditAction, EntityKind, NewAuditEntry, Payload};
use ravel_core::{AuditEntryId, Privilege, PrivilegeId, Role, RoleId, User, UserId};

/// A user with predictable fields derived from `name`.
pub fn user(name: &str) -> User {
    let created = Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap();
    User {
        id: UserId::new(),
        username: name.to_string(),
        email: format!("{name}@example.com"),
        display_name: Some(name.to_uppercase()),
        is_active: true,
        created_at: created,
        updated_at: created,
    }
}

/// A role with predictable fields derived from `name`.
pub fn role(name: &str) -> Role {
    let created = Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap();
    Role {
        id: RoleId::new(),
        name: name.to_string(),
        description: Some(format!("{name} role")),
        created_at: created,
        updated_at: created,
    }
}

/// A privilege with predictable fields derived from `name`.
pub fn privilege(name: &str) -> Privilege {
    let created = Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap();
    Privilege {
        id: PrivilegeId::new(),
        name: name.to_string(),
        description: None,
        created_at: created,
        updated_at: created,
    }
}

/// An audit entry input with the given coordinates and no payloads.
pub fn entry(
    entity_kind: EntityKind,
    entity_id: Option<uuid::Uuid>,
    action: AuditAction,
) -> NewAuditEntry {
    NewAuditEntry {
        entity_kind,
        entity_id,
        action,
        forward: None,
        backward: None,
        parent_id: None,
        timestamp: Utc.with_ymd_and_hms(2024, 3, 2, 8, 15, 0).unwrap(),
    }
}

/// Same as [`entry`] with a backward payload attached.
pub fn entry_with_backward(
    entity_kind: EntityKind,
    entity_id: Option<uuid::Uuid>,
    action: AuditAction,
    backward: Payload,
) -> NewAuditEntry {
    NewAuditEntry {
        backward: Some(backward),
        ..entry(entity_kind, entity_id, action)
    }
}

/// Same as [`entry_with_backward`] with a batch parent link.
pub fn child_entry(
    entity_kind: EntityKind,
    entity_id: Option<uuid::Uuid>,
    action: AuditAction,
    backward: Payload,
    parent: AuditEntryId,
) -> NewAuditEntry {
    NewAuditEntry {
        parent_id: Some(parent),
        ..entry_with_backward(entity_kind, entity_id, action, backward)
    }
}
