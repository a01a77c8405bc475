//! Normalization with an explicit, user-supplied field mapping.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fields::{coerce_number, coerce_text, is_truthy, number_to_id, placeholder_id};
use crate::path::extract_path;
use crate::types::{Category, DEFAULT_COMMISSION_RATE, UNKNOWN_CATEGORY};

/// Dot paths locating each canonical field, relative to one array element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    pub id: String,
    pub name: String,
    pub commission_rate: String,
    pub sub_categories: String,
}

impl FieldMapping {
    /// Mapping whose paths equal the canonical field names.
    pub fn identity() -> Self {
        Self {
            id: "id".to_string(),
            name: "name".to_string(),
            commission_rate: "commissionRate".to_string(),
            sub_categories: "subCategories".to_string(),
        }
    }
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self::identity()
    }
}

/// Normalize a JSON array into categories using `mapping`.
///
/// A non-array input yields an empty list. Non-object elements are skipped,
/// and items whose name resolves to [`UNKNOWN_CATEGORY`] are dropped at every
/// depth. Falsy rates default to [`DEFAULT_COMMISSION_RATE`]; no range check
/// is applied on this path.
pub fn normalize_with_mapping(value: &Value, mapping: &FieldMapping) -> Vec<Category> {
    let Some(items) = value.as_array() else {
        tracing::debug!("mapped normalization skipped: input is not an array");
        return Vec::new();
    };

    items
        .iter()
        .filter(|item| item.is_object())
        .map(|item| map_item(item, mapping))
        .filter(|category| !category.is_unknown())
        .collect()
}

fn map_item(item: &Value, mapping: &FieldMapping) -> Category {
    let field = |path: &str| extract_path(item, path).filter(|v| is_truthy(v));

    let id = field(&mapping.id)
        .and_then(coerce_number)
        .map(number_to_id)
        .unwrap_or_else(placeholder_id);

    let name = field(&mapping.name)
        .and_then(coerce_text)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());

    let commission_rate = field(&mapping.commission_rate)
        .and_then(coerce_number)
        .unwrap_or(DEFAULT_COMMISSION_RATE);

    let sub_categories = extract_path(item, &mapping.sub_categories)
        .filter(|v| v.is_array())
        .map(|children| normalize_with_mapping(children, mapping))
        .unwrap_or_default();

    Category {
        id,
        name,
        commission_rate,
        sub_categories,
    }
}
