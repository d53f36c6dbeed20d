use serde_json::{Map, Value};

use crate::clone::deep_clone;

/// A keyed variation document: the object form of decoded JSON.
pub type Document = Map<String, Value>;

/// Deep-merge `overlay` on top of `base`.
/// If both sides have an object for the same key, recurse.
/// Otherwise, `overlay`'s value wins.
pub fn deep_merge(mut base: Document, overlay: Document) -> Document {
    for (key, overlay_val) in overlay {
        match (base.remove(&key), overlay_val) {
            (Some(Value::Object(base_obj)), Value::Object(overlay_obj)) => {
                base.insert(key, Value::Object(deep_merge(base_obj, overlay_obj)));
            }
            (_, overlay_val) => {
                base.insert(key, overlay_val);
            }
        }
    }
    base
}

/// Fold `sources` into `destination`, left to right, in place.
///
/// Per key of each source: an object folds into an existing object
/// key-by-key (an absent destination key starts as an empty object); any
/// other value, or an object landing on a non-object, overwrites. `None`
/// entries in `sources` are skipped, so optional layers can be passed
/// without special-casing at the call site.
///
/// Assigned values are cloned out of the source. Destinations never alias
/// source data, so a bag built for one request cannot be edited through
/// another.
pub fn extend<'a, I>(destination: &mut Document, sources: I)
where
    I: IntoIterator<Item = Option<&'a Document>>,
{
    for source in sources.into_iter().flatten() {
        extend_one(destination, source);
    }
}

fn extend_one(destination: &mut Document, source: &Document) {
    for (key, value) in source {
        match value {
            Value::Object(source_obj) => {
                let slot = destination
                    .entry(key.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                if let Value::Object(dest_obj) = slot {
                    extend_one(dest_obj, source_obj);
                } else {
                    *slot = deep_clone(value);
                }
            }
            other => {
                destination.insert(key.clone(), deep_clone(other));
            }
        }
    }
}
