//! Structural patch application port.
//!
//! Update-reversal applies the inverse patch recorded at original-update time
//! to the entity's current value. The engine treats the patch as an opaque
//! transform; [`MergePatchService`] is the default implementation, applying
//! RFC 7386 style merge semantics over the entity's JSON form.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use ravel_audit::PatchDocument;

/// Errors from parsing or applying a patch document.
#[derive(Debug, Error)]
pub enum PatchError {
    /// The entity or the patched result failed to (de)serialize.
    #[error("Patch codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Trait for applying a structural patch to an entity.
pub trait PatchService<T>: Send + Sync {
    /// Apply `patch` to `entity`, producing the patched value.
    fn apply(&self, entity: &T, patch: &PatchDocument) -> std::result::Result<T, PatchError>;
}

/// Merge-patch implementation: object fields in the patch overwrite the
/// entity's fields, `null` removes them, nested objects merge recursively.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergePatchService;

impl MergePatchService {
    /// Create a new merge-patch service.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl<T> PatchService<T> for MergePatchService
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    fn apply(&self, entity: &T, patch: &PatchDocument) -> std::result::Result<T, PatchError> {
        let mut value = serde_json::to_value(entity)?;
        merge(&mut value, &patch.0);
        Ok(serde_json::from_value(value)?)
    }
}

fn merge(target: &mut Value, patch: &Value) {
    let Value::Object(patch_map) = patch else {
        *target = patch.clone();
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(target_map) = target {
        for (key, value) in patch_map {
            if value.is_null() {
                target_map.remove(key);
            } else {
                merge(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
    }
}
