//! Heuristic category discovery for payloads with no declared mapping.
//!
//! Two strategies cooperate:
//!
//! 1. Per-item alias resolution ([`normalize_items`]) reads id, name, rate
//!    and children from the built-in alias lists in [`crate::fields`].
//! 2. Container discovery ([`discover_categories`]) looks for the category
//!    array under well-known top-level keys, unwraps a generic success
//!    wrapper, and finally runs a depth-bounded scan of the whole value.
//!
//! Items whose name resolves to [`UNKNOWN_CATEGORY`] are excluded from every
//! path, at every depth.

use serde_json::{Map, Value};

use crate::fields::{
    is_truthy, placeholder_id, FieldResolver, CHILDREN_ALIASES, CONTAINER_KEYS, ID_FIELD,
    NAME_FIELD, RATE_FIELD, WRAPPER_KEYS,
};
use crate::types::{Category, DEFAULT_COMMISSION_RATE, UNKNOWN_CATEGORY};

/// Deepest level inspected by the recursive scan. The root is depth 0.
pub const MAX_SCAN_DEPTH: usize = 5;

/// Children: the first candidate holding an array, normalized recursively.
pub const CHILDREN_FIELD: FieldResolver<Vec<Category>> = FieldResolver {
    candidates: CHILDREN_ALIASES,
    accept: accept_children,
};

fn accept_children(value: &Value) -> Option<Vec<Category>> {
    value.as_array().map(|children| normalize_items(children))
}

/// Normalize the object elements of an array, dropping unnamed items.
pub fn normalize_items(items: &[Value]) -> Vec<Category> {
    items
        .iter()
        .filter_map(Value::as_object)
        .map(normalize_object)
        .filter(|category| !category.is_unknown())
        .collect()
}

/// Resolve one category-like object through the alias lists.
pub fn normalize_object(object: &Map<String, Value>) -> Category {
    let id = ID_FIELD.resolve(object).unwrap_or_else(placeholder_id);
    let name = NAME_FIELD
        .resolve(object)
        .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());
    let commission_rate = RATE_FIELD.resolve(object).unwrap_or(DEFAULT_COMMISSION_RATE);
    let sub_categories = CHILDREN_FIELD.resolve(object).unwrap_or_default();

    Category {
        id,
        name,
        commission_rate,
        sub_categories,
    }
}

/// Find categories anywhere in a decoded response.
///
/// Container discovery runs first; if it yields nothing and the value is an
/// object or array, the bounded recursive scan takes over.
pub fn discover_categories(value: &Value) -> Vec<Category> {
    let found = discover_in_containers(value);
    if !found.is_empty() {
        return found;
    }
    if value.is_object() || value.is_array() {
        return scan_for_categories(value);
    }
    Vec::new()
}

/// Look for the category array at well-known locations.
///
/// A root array is normalized directly. For an object, the first
/// [`CONTAINER_KEYS`] entry holding an array that normalizes to a non-empty
/// list wins; failing that, a `success: true` or `status: "success"` wrapper
/// is unwrapped one level and the search repeats. A string root is parsed as
/// JSON and searched again.
pub fn discover_in_containers(value: &Value) -> Vec<Category> {
    match value {
        Value::Array(items) => normalize_items(items),
        Value::Object(map) => {
            for key in CONTAINER_KEYS {
                if let Some(Value::Array(items)) = map.get(*key) {
                    let found = normalize_items(items);
                    if !found.is_empty() {
                        tracing::debug!("found {} categories under '{key}'", found.len());
                        return found;
                    }
                }
            }

            if is_success_wrapper(map) {
                if let Some(inner) = WRAPPER_KEYS
                    .iter()
                    .filter_map(|key| map.get(*key))
                    .find(|v| is_truthy(v))
                {
                    tracing::debug!("unwrapping success wrapper");
                    return discover_in_containers(inner);
                }
            }

            Vec::new()
        }
        Value::String(text) => serde_json::from_str::<Value>(text)
            .map(|inner| discover_in_containers(&inner))
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Depth-first search for the first array that normalizes to categories.
///
/// Arrays deeper than [`MAX_SCAN_DEPTH`] are never inspected.
pub fn scan_for_categories(value: &Value) -> Vec<Category> {
    visit_bounded(value, MAX_SCAN_DEPTH, &mut |node, depth| {
        let found = normalize_items(node.as_array()?);
        if found.is_empty() {
            return None;
        }
        tracing::debug!("recursive scan found {} categories at depth {depth}", found.len());
        Some(found)
    })
    .unwrap_or_default()
}

/// Pre-order depth-first walk that stops at the first node `visit` accepts.
///
/// Array elements and object values are children of their container. Nodes
/// deeper than `max_depth` are neither visited nor descended into.
pub fn visit_bounded<'a, T, F>(value: &'a Value, max_depth: usize, visit: &mut F) -> Option<T>
where
    F: FnMut(&'a Value, usize) -> Option<T>,
{
    walk(value, 0, max_depth, visit)
}

fn walk<'a, T, F>(value: &'a Value, depth: usize, max_depth: usize, visit: &mut F) -> Option<T>
where
    F: FnMut(&'a Value, usize) -> Option<T>,
{
    if depth > max_depth {
        return None;
    }
    if let Some(found) = visit(value, depth) {
        return Some(found);
    }
    match value {
        Value::Array(items) => items
            .iter()
            .find_map(|child| walk(child, depth + 1, max_depth, &mut *visit)),
        Value::Object(map) => map
            .values()
            .find_map(|child| walk(child, depth + 1, max_depth, &mut *visit)),
        _ => None,
    }
}

fn is_success_wrapper(map: &Map<String, Value>) -> bool {
    map.get("success") == Some(&Value::Bool(true))
        || map.get("status").and_then(Value::as_str) == Some("success")
}
