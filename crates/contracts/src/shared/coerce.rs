//! Lenient conversions for loosely typed server envelopes.
//!
//! The server hands back page data where the same field may arrive as a
//! number, a numeric string, a JSON-encoded string or `null`. Everything that
//! reads such envelopes goes through these helpers so the parsing rules live
//! in one place.

use serde_json::Value;

/// Truthiness of a stored flag (`true`, `1`, `"1"`, `"true"`, ...).
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(n) = s.parse::<f64>() {
                return n.is_finite() && n != 0.0;
            }
            matches!(s.to_ascii_lowercase().as_str(), "true" | "yes" | "on")
        }
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}

/// Returns the value as a list of elements.
///
/// Arrays are returned as-is, strings are tried as JSON, anything else is an
/// empty list.
pub fn ensure_array(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Parses a form number, falling back to `0.0` on anything non-numeric.
pub fn coerce_f64(raw: &str) -> f64 {
    let normalized = raw.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// `None` for empty or whitespace-only text.
pub fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Same as [`non_empty`] for an already optional field.
pub fn non_empty_opt(raw: Option<&str>) -> Option<String> {
    raw.and_then(non_empty)
}

/// Text view of a scalar: strings verbatim, numbers formatted, rest empty.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

pub fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthy() {
        assert!(truthy(&json!(true)));
        assert!(truthy(&json!(1)));
        assert!(truthy(&json!("1")));
        assert!(truthy(&json!("True")));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("0")));
        assert!(!truthy(&json!("")));
        assert!(!truthy(&json!(null)));
        assert!(!truthy(&json!({"a": 1})));
    }

    #[test]
    fn test_truthy_rejects_non_finite_and_unlisted_words() {
        assert!(!truthy(&json!("NaN")));
        assert!(!truthy(&json!("nan")));
        assert!(!truthy(&json!("inf")));
        assert!(!truthy(&json!("-infinity")));
        assert!(!truthy(&json!("y")));
        assert!(truthy(&json!("yes")));
        assert!(truthy(&json!("ON")));
        assert!(truthy(&json!("2.5")));
    }

    #[test]
    fn test_ensure_array() {
        assert_eq!(ensure_array(&json!([1, 2])).len(), 2);
        assert_eq!(ensure_array(&json!("[1,0,1]")).len(), 3);
        assert!(ensure_array(&json!("not json")).is_empty());
        assert!(ensure_array(&json!(null)).is_empty());
        assert!(ensure_array(&json!({"x": []})).is_empty());
    }

    #[test]
    fn test_coerce_f64() {
        assert_eq!(coerce_f64("100"), 100.0);
        assert_eq!(coerce_f64(" 12,5 "), 12.5);
        assert_eq!(coerce_f64("abc"), 0.0);
        assert_eq!(coerce_f64(""), 0.0);
        assert_eq!(coerce_f64("NaN"), 0.0);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  "), None);
        assert_eq!(non_empty(" x "), Some("x".to_string()));
        assert_eq!(non_empty_opt(None), None);
    }

    #[test]
    fn test_scalars() {
        assert_eq!(value_to_string(&json!(12)), "12");
        assert_eq!(value_to_string(&json!(null)), "");
        assert_eq!(value_to_i64(&json!("42")), Some(42));
        assert_eq!(value_to_i64(&json!(7)), Some(7));
        assert_eq!(value_to_i64(&json!("x")), None);
    }
}
