//! Structural copying of variation documents.
//!
//! Resolvers hand merged documents to callers that may mutate them;
//! [`deep_clone`] produces an independent copy so defaults loaded for one
//! request never leak edits into another. Dispatch is a single variant
//! match, so each value shape takes exactly one branch.

use serde_json::{Map, Value};

use crate::iter::{Entry, for_each};

/// Produce a structurally independent copy of `value`.
///
/// Scalars are copied as-is. Arrays are copied one level — the element
/// list is duplicated without re-walking each element. Objects are rebuilt
/// key-by-key, cloning recursively.
pub fn deep_clone(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Bool(*b),
        Value::Number(n) => Value::Number(n.clone()),
        Value::String(s) => Value::String(s.clone()),
        Value::Array(items) => Value::Array(items.clone()),
        Value::Object(_) => {
            let mut copy = Map::new();
            for_each(value, |entry| {
                if let Entry::Field { key, value } = entry {
                    copy.insert(key.to_string(), deep_clone(value));
                }
            });
            Value::Object(copy)
        }
    }
}
