//! Field resolution over foreign JSON objects.
//!
//! Alias lists are ordered: the first candidate key that is present and whose
//! value passes the field's predicate wins. Keep them as data so the
//! tie-break order stays visible and testable.

use rand::Rng;
use serde_json::{Map, Value};

/// Candidate keys for a category id.
pub const ID_ALIASES: &[&str] = &[
    "id",
    "categoryId",
    "Id",
    "ID",
    "cat_id",
    "category_id",
    "catId",
    "CategoryId",
    "CATEGORY_ID",
    "pk",
    "key",
    "code",
    "categoryCode",
    "cat_code",
];

/// Candidate keys for a category name.
pub const NAME_ALIASES: &[&str] = &[
    "name",
    "categoryName",
    "Name",
    "title",
    "label",
    "cat_name",
    "category_name",
    "CategoryName",
    "CATEGORY_NAME",
    "text",
    "display_name",
    "displayName",
    "description",
];

/// Candidate keys for a commission rate.
pub const RATE_ALIASES: &[&str] = &[
    "commissionRate",
    "commission",
    "CommissionRate",
    "rate",
    "percentage",
    "fee",
    "commission_rate",
    "COMMISSION_RATE",
    "feeRate",
    "percent",
    "komisyon",
    "oran",
];

/// Candidate keys for nested subcategories.
pub const CHILDREN_ALIASES: &[&str] = &[
    "subCategories",
    "children",
    "subcategories",
    "sub_categories",
    "childCategories",
    "SubCategories",
    "SUBCATEGORIES",
    "nested",
    "items",
    "childs",
    "subs",
];

/// Top-level keys that may hold the category array, in precedence order.
pub const CONTAINER_KEYS: &[&str] = &[
    "categories",
    "data",
    "result",
    "items",
    "list",
    "categoryList",
    "response",
    "payload",
    "content",
    "body",
    "results",
    "values",
    "category",
    "categoryData",
    "trendyolCategories",
    "calculatorCategories",
    "cats",
    "kategoriler",
    "kategori",
    "commission",
    "commissions",
    "rates",
    "categoryRates",
    "trendyol",
    "calculator",
    "api",
    "success",
    "output",
];

/// Keys unwrapped, in order, under a generic success wrapper.
pub const WRAPPER_KEYS: &[&str] = &["data", "result", "payload"];

/// Placeholder ids are drawn from `0..PLACEHOLDER_ID_RANGE`.
pub const PLACEHOLDER_ID_RANGE: i64 = 10_000;

/// Resolves one logical field from an ordered list of candidate keys.
#[derive(Clone, Copy)]
pub struct FieldResolver<T> {
    pub candidates: &'static [&'static str],
    pub accept: fn(&Value) -> Option<T>,
}

impl<T> FieldResolver<T> {
    /// First candidate present in `object` whose value the predicate accepts.
    pub fn resolve(&self, object: &Map<String, Value>) -> Option<T> {
        self.candidates
            .iter()
            .filter_map(|key| object.get(*key))
            .find_map(self.accept)
    }
}

impl<T> std::fmt::Debug for FieldResolver<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldResolver")
            .field("candidates", &self.candidates)
            .finish()
    }
}

pub const ID_FIELD: FieldResolver<i64> = FieldResolver {
    candidates: ID_ALIASES,
    accept: accept_id,
};

pub const NAME_FIELD: FieldResolver<String> = FieldResolver {
    candidates: NAME_ALIASES,
    accept: accept_name,
};

pub const RATE_FIELD: FieldResolver<f64> = FieldResolver {
    candidates: RATE_ALIASES,
    accept: accept_rate,
};

/// Any non-null value with a numeric reading.
pub fn accept_id(value: &Value) -> Option<i64> {
    if value.is_null() {
        return None;
    }
    coerce_number(value).map(number_to_id)
}

/// A string that is non-empty after trimming.
pub fn accept_name(value: &Value) -> Option<String> {
    let text = value.as_str()?.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// A numeric reading within `0..=100`.
pub fn accept_rate(value: &Value) -> Option<f64> {
    if value.is_null() {
        return None;
    }
    coerce_number(value).filter(|rate| (0.0..=100.0).contains(rate))
}

/// Numeric reading of a JSON value.
///
/// Numbers pass through, decimal strings are parsed (a blank string reads as
/// zero) and booleans read as one or zero. Everything else is non-numeric.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) => {
            let text = s.trim();
            if text.is_empty() {
                Some(0.0)
            } else {
                parse_decimal(text)
            }
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Text reading of a scalar JSON value. Strings are trimmed.
pub fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(match n.as_i64() {
            Some(i) => i.to_string(),
            None => n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string()),
        }),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// `null`, `false`, `0` and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Truncate a numeric reading to an integer id.
pub fn number_to_id(n: f64) -> i64 {
    n.trunc() as i64
}

/// Random stand-in for an id that could not be resolved.
pub fn placeholder_id() -> i64 {
    rand::thread_rng().gen_range(0..PLACEHOLDER_ID_RANGE)
}

fn parse_decimal(text: &str) -> Option<f64> {
    let well_formed = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'));
    if !well_formed {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(&json!(12.5)), Some(12.5));
        assert_eq!(coerce_number(&json!(" 7 ")), Some(7.0));
        assert_eq!(coerce_number(&json!("1e2")), Some(100.0));
        assert_eq!(coerce_number(&json!("")), Some(0.0));
        assert_eq!(coerce_number(&json!(true)), Some(1.0));
        assert_eq!(coerce_number(&json!("12abc")), None);
        assert_eq!(coerce_number(&json!("inf")), None);
        assert_eq!(coerce_number(&json!("NaN")), None);
        assert_eq!(coerce_number(&Value::Null), None);
        assert_eq!(coerce_number(&json!([1])), None);
    }

    #[test]
    fn test_coerce_text() {
        assert_eq!(coerce_text(&json!("  Moda ")), Some("Moda".to_string()));
        assert_eq!(coerce_text(&json!(42)), Some("42".to_string()));
        assert_eq!(coerce_text(&json!(4.5)), Some("4.5".to_string()));
        assert_eq!(coerce_text(&json!({"tr": "Moda"})), None);
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_rate_rejects_out_of_range_and_continues() {
        let obj = object(json!({"commission": 250, "rate": 12.5}));
        assert_eq!(RATE_FIELD.resolve(&obj), Some(12.5));
    }

    #[test]
    fn test_rate_skips_null_and_accepts_zero() {
        let obj = object(json!({"commissionRate": null, "fee": 0}));
        assert_eq!(RATE_FIELD.resolve(&obj), Some(0.0));
        let none = object(json!({"rate": -1, "percent": "abc"}));
        assert_eq!(RATE_FIELD.resolve(&none), None);
    }

    #[test]
    fn test_name_takes_first_non_blank_string() {
        let obj = object(json!({"name": "   ", "categoryName": 5, "title": " Kitap "}));
        assert_eq!(NAME_FIELD.resolve(&obj), Some("Kitap".to_string()));
    }

    #[test]
    fn test_id_order_and_numeric_strings() {
        let obj = object(json!({"code": 9, "categoryId": "42", "id": "x1"}));
        // "id" is not numeric, so scanning continues down the alias list.
        assert_eq!(ID_FIELD.resolve(&obj), Some(42));
        let float = object(json!({"ID": 3.9}));
        assert_eq!(ID_FIELD.resolve(&float), Some(3));
    }

    #[test]
    fn test_candidate_order_not_document_order() {
        let obj = object(json!({"label": "Second", "name": "First"}));
        assert_eq!(NAME_FIELD.resolve(&obj), Some("First".to_string()));
    }

    #[test]
    fn test_placeholder_id_range() {
        for _ in 0..100 {
            let id = placeholder_id();
            assert!((0..PLACEHOLDER_ID_RANGE).contains(&id));
        }
    }
}
