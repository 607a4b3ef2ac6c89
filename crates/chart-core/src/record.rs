//! Chart data records: parsing, coercion and series key detection

use crate::format::js_number;
use crate::{ChartError, Result};
use serde_json::Value;

/// One data row. Field order follows the input text.
pub type Record = serde_json::Map<String, Value>;

// ============================================================================
// PARSING
// ============================================================================

/// Parse a JSON array of records.
///
/// Array items that are not objects become empty records so row indices
/// stay aligned with the input.
pub fn parse_records(input: &str) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(input).map_err(ChartError::InvalidJson)?;

    match value {
        Value::Array(items) => Ok(items
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => map,
                _ => Record::new(),
            })
            .collect()),
        other => Err(ChartError::NotAnArray(json_type_name(&other))),
    }
}

/// Parse records, absorbing failures into an empty data set.
///
/// Renderers call this: malformed input shows the empty state instead of
/// propagating an error.
pub fn load_records(input: &str) -> Vec<Record> {
    try_load_records(input).unwrap_or_default()
}

/// Like [`load_records`], but tells malformed input apart from an empty array.
pub fn try_load_records(input: &str) -> Option<Vec<Record>> {
    match parse_records(input) {
        Ok(records) => Some(records),
        Err(ChartError::NotAnArray(kind)) => {
            tracing::warn!(kind, "Chart data is not a JSON array");
            None
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to parse chart data");
            None
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// KEY DETECTION
// ============================================================================

/// Numeric field names of the first record, excluding the axis key.
///
/// Only the first record is inspected; later rows are assumed to share its
/// schema. Rows missing a key simply produce no point for that series.
pub fn detect_value_keys(records: &[Record], axis_key: &str) -> Vec<String> {
    let Some(first) = records.first() else {
        return Vec::new();
    };

    first
        .iter()
        .filter(|(key, value)| key.as_str() != axis_key && value.is_number())
        .map(|(key, _)| key.clone())
        .collect()
}

// ============================================================================
// COERCION
// ============================================================================

/// Numeric value of a field, following JavaScript `Number(x)`.
pub fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_numeric_text(s),
        Some(Value::Array(_)) | Some(Value::Object(_)) => f64::NAN,
    }
}

fn parse_numeric_text(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    // Rust accepts "inf" and "nan" spellings that JavaScript does not
    if trimmed
        .chars()
        .any(|c| c.is_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }

    trimmed.parse().unwrap_or(f64::NAN)
}

/// Numeric field value, or `None` when the field is missing or not a number.
pub fn numeric_field(record: &Record, key: &str) -> Option<f64> {
    record.get(key).and_then(Value::as_f64)
}

/// Display text of a field, following JavaScript `String(x)` with missing
/// and null fields rendered as empty labels.
pub fn label_of(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => js_number(n.as_f64().unwrap_or(f64::NAN)),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Category label of a field, following JavaScript `String(x || fallback)`.
pub fn category_of(value: Option<&Value>, fallback: &str) -> String {
    let falsy = match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64().is_none_or(|v| v == 0.0 || v.is_nan()),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => false,
    };

    if falsy {
        fallback.to_string()
    } else {
        label_of(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_records_array() {
        let records = parse_records(r#"[{"name":"A","value":1},{"name":"B","value":2}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["name"], json!("B"));
    }

    #[test]
    fn test_parse_records_rejects_object() {
        let err = parse_records(r#"{"name":"A"}"#).unwrap_err();
        assert!(matches!(err, ChartError::NotAnArray("object")));
    }

    #[test]
    fn test_parse_records_invalid_json() {
        let err = parse_records("{not valid").unwrap_err();
        assert!(matches!(err, ChartError::InvalidJson(_)));
    }

    #[test]
    fn test_load_records_absorbs_errors() {
        assert!(load_records("{not valid").is_empty());
        assert!(load_records("42").is_empty());
        assert!(load_records("").is_empty());
    }

    #[test]
    fn test_try_load_records_distinguishes_empty_array() {
        assert_eq!(try_load_records("[]"), Some(Vec::new()));
        assert_eq!(try_load_records("{not valid"), None);
        assert_eq!(try_load_records(r#"{"a":1}"#), None);
    }

    #[test]
    fn test_non_object_items_become_empty_records() {
        let records = parse_records(r#"[1, {"a": 2}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].is_empty());
    }

    #[test]
    fn test_detect_value_keys_preserves_order() {
        let records = parse_records(r#"[{"zeta":1,"name":"A","alpha":2,"label":"x"}]"#).unwrap();
        assert_eq!(detect_value_keys(&records, "name"), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_detect_value_keys_first_record_only() {
        let records = parse_records(r#"[{"name":"A","a":1},{"name":"B","a":2,"b":3}]"#).unwrap();
        assert_eq!(detect_value_keys(&records, "name"), vec!["a"]);
    }

    #[test]
    fn test_detect_value_keys_skips_numeric_strings() {
        let records = parse_records(r#"[{"name":"A","a":"12","b":3}]"#).unwrap();
        assert_eq!(detect_value_keys(&records, "name"), vec!["b"]);
        assert!(detect_value_keys(&[], "name").is_empty());
    }

    #[test]
    fn test_coerce_number_js_semantics() {
        assert_eq!(coerce_number(Some(&json!(4.5))), 4.5);
        assert_eq!(coerce_number(Some(&json!("12"))), 12.0);
        assert_eq!(coerce_number(Some(&json!("  "))), 0.0);
        assert_eq!(coerce_number(Some(&json!(null))), 0.0);
        assert_eq!(coerce_number(Some(&json!(true))), 1.0);
        assert_eq!(coerce_number(Some(&json!("1e3"))), 1000.0);
        assert_eq!(coerce_number(Some(&json!("-Infinity"))), f64::NEG_INFINITY);
        assert!(coerce_number(None).is_nan());
        assert!(coerce_number(Some(&json!("abc"))).is_nan());
        assert!(coerce_number(Some(&json!("inf"))).is_nan());
    }

    #[test]
    fn test_label_of() {
        assert_eq!(label_of(Some(&json!("Page A"))), "Page A");
        assert_eq!(label_of(Some(&json!(2024))), "2024");
        assert_eq!(label_of(Some(&json!(1.5))), "1.5");
        assert_eq!(label_of(None), "");
    }

    #[test]
    fn test_category_of_falls_back_on_falsy() {
        assert_eq!(category_of(Some(&json!("north")), "default"), "north");
        assert_eq!(category_of(Some(&json!("")), "default"), "default");
        assert_eq!(category_of(Some(&json!(0)), "default"), "default");
        assert_eq!(category_of(None, "default"), "default");
        assert_eq!(category_of(Some(&json!(3)), "default"), "3");
    }
}
