//! Tagged payloads and the snapshot/patch codec.
//!
//! Backward and forward data on audit entries is stored as JSON, typed by an
//! explicit kind tag and a schema version rather than by convention. Decoding
//! verifies both, so a payload written as one snapshot type can never be
//! silently read back as another.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use ravel_core::{Privilege, PrivilegeId, Role, RoleId, User, UserId};

use crate::action::EntityKind;
use crate::error::{AuditError, Result};

/// Schema version written on every payload produced by this build.
pub const PAYLOAD_VERSION: u16 = 1;

/// What a payload's JSON data encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "entity", rename_all = "snake_case")]
pub enum PayloadKind {
    /// A full entity snapshot including its assignment edges.
    Snapshot(EntityKind),
    /// A plain list of entity identifiers.
    IdList(EntityKind),
    /// A structural patch document for an entity.
    Patch(EntityKind),
}

impl std::fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Snapshot(kind) => write!(f, "{kind} snapshot"),
            Self::IdList(kind) => write!(f, "{kind} id list"),
            Self::Patch(kind) => write!(f, "{kind} patch"),
        }
    }
}

/// A structural patch document.
///
/// The engine treats the contents as opaque; interpretation belongs to the
/// patch service applying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument(pub serde_json::Value);

/// A serialized payload attached to an audit entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// What the data encodes.
    pub kind: PayloadKind,
    /// Schema version the data was written with.
    pub version: u16,
    /// The encoded data.
    pub data: serde_json::Value,
}

impl Payload {
    fn encode<T: Serialize>(kind: PayloadKind, value: &T) -> Result<Self> {
        Ok(Self {
            kind,
            version: PAYLOAD_VERSION,
            data: serde_json::to_value(value)?,
        })
    }

    fn decode<T: DeserializeOwned>(&self, expected: PayloadKind) -> Result<T> {
        if self.version != PAYLOAD_VERSION {
            return Err(AuditError::UnsupportedVersion {
                found: self.version,
            });
        }
        if self.kind != expected {
            return Err(AuditError::KindMismatch {
                expected,
                found: self.kind,
            });
        }
        Ok(serde_json::from_value(self.data.clone())?)
    }

    /// Encode a list of entity identifiers.
    pub fn id_list<I: Serialize>(kind: EntityKind, ids: &[I]) -> Result<Self> {
        Self::encode(PayloadKind::IdList(kind), &ids)
    }

    /// Decode a list of entity identifiers.
    pub fn decode_id_list<I: DeserializeOwned>(&self, kind: EntityKind) -> Result<Vec<I>> {
        self.decode(PayloadKind::IdList(kind))
    }

    /// Encode a patch document for the given entity kind.
    pub fn patch(kind: EntityKind, document: &PatchDocument) -> Result<Self> {
        Self::encode(PayloadKind::Patch(kind), document)
    }

    /// Decode a patch document for the given entity kind.
    pub fn decode_patch(&self, kind: EntityKind) -> Result<PatchDocument> {
        self.decode(PayloadKind::Patch(kind))
    }
}

fn dedup<I: Ord>(mut ids: Vec<I>) -> Vec<I> {
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// A user plus its role assignment edges at the moment of removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    /// The captured user.
    pub user: User,
    /// Roles assigned to the user, de-duplicated, order not significant.
    pub role_ids: Vec<RoleId>,
}

impl UserSnapshot {
    /// Capture a user and its role edges. Duplicate role ids are dropped.
    #[must_use]
    pub fn new(user: User, role_ids: Vec<RoleId>) -> Self {
        Self {
            user,
            role_ids: dedup(role_ids),
        }
    }

    /// Encode as a tagged payload.
    pub fn to_payload(&self) -> Result<Payload> {
        Payload::encode(PayloadKind::Snapshot(EntityKind::User), self)
    }

    /// Decode from a tagged payload, verifying kind and version.
    pub fn from_payload(payload: &Payload) -> Result<Self> {
        payload.decode(PayloadKind::Snapshot(EntityKind::User))
    }
}

/// A role plus its user and privilege assignment edges at the moment of
/// removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSnapshot {
    /// The captured role.
    pub role: Role,
    /// Users holding the role, de-duplicated, order not significant.
    pub user_ids: Vec<UserId>,
    /// Privileges granted by the role, de-duplicated, order not significant.
    pub privilege_ids: Vec<PrivilegeId>,
}

impl RoleSnapshot {
    /// Capture a role and its edges. Duplicate ids are dropped.
    #[must_use]
    pub fn new(role: Role, user_ids: Vec<UserId>, privilege_ids: Vec<PrivilegeId>) -> Self {
        Self {
            role,
            user_ids: dedup(user_ids),
            privilege_ids: dedup(privilege_ids),
        }
    }

    /// Encode as a tagged payload.
    pub fn to_payload(&self) -> Result<Payload> {
        Payload::encode(PayloadKind::Snapshot(EntityKind::Role), self)
    }

    /// Decode from a tagged payload, verifying kind and version.
    pub fn from_payload(payload: &Payload) -> Result<Self> {
        payload.decode(PayloadKind::Snapshot(EntityKind::Role))
    }
}

/// A privilege plus its role assignment edges at the moment of removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivilegeSnapshot {
    /// The captured privilege.
    pub privilege: Privilege,
    /// Roles granting the privilege, de-duplicated, order not significant.
    pub role_ids: Vec<RoleId>,
}

impl PrivilegeSnapshot {
    /// Capture a privilege and its role edges. Duplicate role ids are dropped.
    #[must_use]
    pub fn new(privilege: Privilege, role_ids: Vec<RoleId>) -> Self {
        Self {
            privilege,
            role_ids: dedup(role_ids),
        }
    }

    /// Encode as a tagged payload.
    pub fn to_payload(&self) -> Result<Payload> {
        Payload::encode(PayloadKind::Snapshot(EntityKind::Privilege), self)
    }

    /// Decode from a tagged payload, verifying kind and version.
    pub fn from_payload(payload: &Payload) -> Result<Self> {
        payload.decode(PayloadKind::Snapshot(EntityKind::Privilege))
    }
}
