//! Deserializers for backend fields whose JSON type is not stable.
//!
//! Decimal columns come back either as JSON numbers or as strings (`"12.50"`),
//! phone numbers sometimes as numbers, and flags as `true`, `1` or `"1"`.
//! Each helper accepts all of those shapes; unusable values become `None`.

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    value_to_i64(&value).ok_or_else(|| de::Error::custom(format!("invalid identifier: {}", value)))
}

pub fn opt_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(value_to_i64(&Value::deserialize(deserializer)?))
}

pub fn opt_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(value_to_f64(&Value::deserialize(deserializer)?))
}

pub fn opt_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => matches!(s.trim(), "1" | "true" | "TRUE" | "True"),
        _ => false,
    })
}

pub fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}

pub fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_from_strings() {
        assert_eq!(value_to_i64(&json!("42")), Some(42));
        assert_eq!(value_to_i64(&json!(" 7 ")), Some(7));
        assert_eq!(value_to_i64(&json!("3.0")), Some(3));
        assert_eq!(value_to_f64(&json!("12.50")), Some(12.5));
        assert_eq!(value_to_f64(&json!(9)), Some(9.0));
    }

    #[test]
    fn test_unusable_values() {
        assert_eq!(value_to_i64(&json!("abc")), None);
        assert_eq!(value_to_i64(&Value::Null), None);
        assert_eq!(value_to_f64(&json!("")), None);
        assert_eq!(value_to_f64(&json!([1])), None);
    }
}
