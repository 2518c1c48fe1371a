//! Deep merge engine.
//!
//! Merges a partial document (a [`MergePatch`]) into a base
//! [`ResumeDocument`] — the canonical default for imports, the existing
//! document for tailoring.
//!
//! Policy: object keys merge recursively; sequences from the patch REPLACE
//! the base sequence, never concatenate. Section item arrays are complete,
//! curated lists after extraction or tailoring — concatenation would
//! duplicate or retain stale items. `null` in a patch keeps the base value;
//! transformers express absence by omission.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::error;

use crate::errors::PipelineError;
use crate::models::ResumeDocument;

/// A partial resume document produced by a transformer. Any subset of fields
/// may be present. Consumed exactly once by [`apply`].
#[derive(Debug, Clone)]
pub struct MergePatch(Value);

impl MergePatch {
    /// Wraps a JSON object as a patch. Non-object values cannot address any
    /// key of the document and are rejected as a transformer bug.
    pub fn new(value: Value) -> Result<Self, PipelineError> {
        if !value.is_object() {
            return Err(PipelineError::MergeInvariant(format!(
                "patch root must be an object, got {}",
                type_name(&value)
            )));
        }
        Ok(MergePatch(value))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Applies a patch to a base document.
///
/// Merging any transformer-produced patch into the canonical default always
/// yields a structurally valid document; a deserialization failure here means
/// a transformer emitted a shape the schema cannot absorb — surfaced as
/// [`PipelineError::MergeInvariant`], never silently patched.
pub fn apply(base: &ResumeDocument, patch: MergePatch) -> Result<ResumeDocument, PipelineError> {
    let base_value = serde_json::to_value(base)
        .map_err(|e| PipelineError::MergeInvariant(format!("base failed to serialize: {e}")))?;

    let merged = deep_merge(base_value, patch.into_value());

    serde_json::from_value(merged).map_err(|e| {
        error!("Merged document does not satisfy the canonical schema: {e}");
        PipelineError::MergeInvariant(format!("merged document is not schema-valid: {e}"))
    })
}

/// Recursive key-wise merge of two JSON trees.
///
/// - objects: keys only in `patch` are added, keys in both recurse, keys
///   only in `base` are kept;
/// - arrays and scalars: the patch value replaces the base value;
/// - `Null` in the patch keeps the base value.
pub fn deep_merge(base: Value, patch: Value) -> Value {
    match (base, patch) {
        (base, Value::Null) => base,
        (Value::Object(base_map), Value::Object(patch_map)) => {
            Value::Object(merge_objects(base_map, patch_map))
        }
        (_, patch) => patch,
    }
}

fn merge_objects(mut base: Map<String, Value>, patch: Map<String, Value>) -> Map<String, Value> {
    for (key, patch_value) in patch {
        match base.remove(&key) {
            Some(base_value) => {
                base.insert(key, deep_merge(base_value, patch_value));
            }
            None => {
                if !patch_value.is_null() {
                    base.insert(key, patch_value);
                }
            }
        }
    }
    base
}

/// Default-overlay utility: fills every field missing from `partial` with the
/// value from `default`, recursively. One code path enforces the "no absent
/// fields" invariant for all transformers.
pub fn fill_from_default<T>(default: &T, partial: Value) -> Result<T, PipelineError>
where
    T: Serialize + DeserializeOwned,
{
    let base = serde_json::to_value(default)
        .map_err(|e| PipelineError::MergeInvariant(format!("default failed to serialize: {e}")))?;
    let merged = deep_merge(base, partial);
    serde_json::from_value(merged)
        .map_err(|e| PipelineError::MergeInvariant(format!("default overlay failed: {e}")))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
