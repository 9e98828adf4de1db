//! Audit log store port and in-memory implementation.
//!
//! The store owns persistence of [`AuditEntry`] records. Production backends
//! live elsewhere; the in-memory implementation here backs tests and single
//! process use.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use ravel_core::AuditEntryId;

use crate::action::{AuditAction, EntityKind};
use crate::entry::{AuditEntry, NewAuditEntry};
use crate::error::Result;
use crate::payload::Payload;

/// Filter for listing audit entries.
#[derive(Debug, Clone, Default)]
pub struct AuditEntryFilter {
    /// Filter by entity kind.
    pub entity_kind: Option<EntityKind>,
    /// Filter by affected entity.
    pub entity_id: Option<Uuid>,
    /// Filter by action.
    pub action: Option<AuditAction>,
    /// Filter by batch parent.
    pub parent_id: Option<AuditEntryId>,
    /// Filter by entries at or after this time.
    pub from: Option<DateTime<Utc>>,
    /// Filter by entries at or before this time.
    pub to: Option<DateTime<Utc>>,
    /// Maximum number of results.
    pub limit: Option<usize>,
    /// Number of results to skip.
    pub offset: Option<usize>,
}

/// Trait for audit log storage backends.
///
/// The log is append-only: entries are never updated or deleted.
#[async_trait::async_trait]
pub trait AuditLogStore: Send + Sync {
    /// Append an entry and return its id.
    async fn append(&self, input: NewAuditEntry) -> Result<AuditEntryId>;

    /// Fetch an entry by id.
    async fn entry(&self, id: AuditEntryId) -> Result<Option<AuditEntry>>;

    /// Fetch the backward payload of an entry, if the entry exists and has
    /// one.
    async fn backward(&self, id: AuditEntryId) -> Result<Option<Payload>> {
        Ok(self.entry(id).await?.and_then(|e| e.backward))
    }

    /// Direct children of a batch parent, in insertion order.
    async fn children(&self, id: AuditEntryId) -> Result<Vec<AuditEntryId>>;

    /// All descendants of a batch parent, depth-first, children in insertion
    /// order. Empty if the entry has no children.
    async fn recursive_child_ids(&self, id: AuditEntryId) -> Result<Vec<AuditEntryId>>;

    /// List entries matching a filter, newest first.
    async fn list(&self, filter: AuditEntryFilter) -> Result<Vec<AuditEntry>>;
}

/// In-memory audit log store for testing.
#[derive(Debug, Default)]
pub struct InMemoryAuditLogStore {
    entries: Arc<RwLock<HashMap<AuditEntryId, AuditEntry>>>,
    // Append order, used both for listing and for stable child ordering.
    order: Arc<RwLock<Vec<AuditEntryId>>>,
    child_index: Arc<RwLock<HashMap<AuditEntryId, Vec<AuditEntryId>>>>,
}

impl InMemoryAuditLogStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in the store.
    pub async fn count(&self) -> usize {
        self.entries.read().await.len()
    }

    /// All entries in insertion order (for testing).
    pub async fn get_all(&self) -> Vec<AuditEntry> {
        let entries = self.entries.read().await;
        self.order
            .read()
            .await
            .iter()
            .filter_map(|id| entries.get(id).cloned())
            .collect()
    }

    /// Clear all entries (for testing).
    pub async fn clear(&self) {
        self.entries.write().await.clear();
        self.order.write().await.clear();
        self.child_index.write().await.clear();
    }
}

#[async_trait::async_trait]
impl AuditLogStore for InMemoryAuditLogStore {
    async fn append(&self, input: NewAuditEntry) -> Result<AuditEntryId> {
        let entry = AuditEntry {
            id: AuditEntryId::new(),
            entity_kind: input.entity_kind,
            entity_id: input.entity_id,
            action: input.action,
            forward: input.forward,
            backward: input.backward,
            parent_id: input.parent_id,
            timestamp: input.timestamp,
        };

        debug!(
            entry_id = %entry.id,
            entity_kind = %entry.entity_kind,
            action = %entry.action,
            parent_id = ?entry.parent_id,
            "Audit entry appended"
        );

        let id = entry.id;
        if let Some(parent) = entry.parent_id {
            self.child_index
                .write()
                .await
                .entry(parent)
                .or_default()
                .push(id);
        }
        self.order.write().await.push(id);
        self.entries.write().await.insert(id, entry);
        Ok(id)
    }

    async fn entry(&self, id: AuditEntryId) -> Result<Option<AuditEntry>> {
        Ok(self.entries.read().await.get(&id).cloned())
    }

    async fn children(&self, id: AuditEntryId) -> Result<Vec<AuditEntryId>> {
        Ok(self
            .child_index
            .read()
            .await
            .get(&id)
            .cloned()
            .unwrap_or_default())
    }

    async fn recursive_child_ids(&self, id: AuditEntryId) -> Result<Vec<AuditEntryId>> {
        let index = self.child_index.read().await;
        let mut result = Vec::new();
        // Depth-first so nested batch children stay grouped under their
        // immediate parent.
        let mut stack: Vec<AuditEntryId> = index
            .get(&id)
            .map(|children| children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(next) = stack.pop() {
            result.push(next);
            if let Some(children) = index.get(&next) {
                stack.extend(children.iter().rev().copied());
            }
        }
        Ok(result)
    }

    async fn list(&self, filter: AuditEntryFilter) -> Result<Vec<AuditEntry>> {
        let entries = self.entries.read().await;
        let order = self.order.read().await;

        let matching: Vec<AuditEntry> = order
            .iter()
            .filter_map(|id| entries.get(id))
            .filter(|e| filter.entity_kind.is_none_or(|k| e.entity_kind == k))
            .filter(|e| filter.entity_id.is_none_or(|id| e.entity_id == Some(id)))
            .filter(|e| filter.action.is_none_or(|a| e.action == a))
            .filter(|e| filter.parent_id.is_none_or(|p| e.parent_id == Some(p)))
            .filter(|e| filter.from.is_none_or(|t| e.timestamp >= t))
            .filter(|e| filter.to.is_none_or(|t| e.timestamp <= t))
            .cloned()
            .collect();

        let offset = filter.offset.unwrap_or(0);
        let limit = filter.limit.unwrap_or(usize::MAX);

        // Newest first: reverse insertion order.
        Ok(matching.into_iter().rev().skip(offset).take(limit).collect())
    }
}
