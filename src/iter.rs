//! Uniform iteration over decoded JSON containers.
//!
//! Arrays and objects have different native iteration protocols; consumers
//! that walk arbitrary variation documents (cloning, merging) want one
//! callback contract for both. [`for_each`] provides it: arrays are visited
//! in index order, objects once per key. Scalars and `null` are not
//! containers and produce no calls.

use serde_json::Value;

/// One element of a container visited by [`for_each`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry<'a> {
    /// An array element at `index`.
    Item { index: usize, value: &'a Value },
    /// An object field under `key`.
    Field { key: &'a str, value: &'a Value },
}

impl<'a> Entry<'a> {
    /// The element's value, whichever container it came from.
    pub fn value(&self) -> &'a Value {
        match self {
            Entry::Item { value, .. } | Entry::Field { value, .. } => value,
        }
    }
}

/// Invoke `callback` once per element of `container`.
///
/// - Arrays: [`Entry::Item`] for indices `0..len`, in order.
/// - Objects: [`Entry::Field`] for every key. A `serde_json::Map` holds
///   only its own entries, so every visited key belongs to the document
///   itself.
/// - Anything else: no calls.
pub fn for_each<'a, F>(container: &'a Value, mut callback: F)
where
    F: FnMut(Entry<'a>),
{
    match container {
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                callback(Entry::Item { index, value });
            }
        }
        Value::Object(fields) => {
            for (key, value) in fields {
                callback(Entry::Field { key, value });
            }
        }
        _ => {}
    }
}
