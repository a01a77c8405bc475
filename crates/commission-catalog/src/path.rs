//! Dot-separated path lookup through nested JSON objects.

use serde_json::Value;

/// Resolve a dot-separated path through nested objects.
///
/// Every segment is a key lookup; arrays are never indexed. Returns `None`
/// as soon as a segment is absent or the current value is not an object.
/// An empty path returns the input unchanged.
pub fn extract_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }
    path.split('.')
        .try_fold(value, |current, segment| current.as_object()?.get(segment))
}
