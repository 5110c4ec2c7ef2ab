//! Helpers for [`crate::parse`].

use serde_json::Value;

/// Replaces every `\/` with `/`. Other escapes are left untouched.
pub(crate) fn unescape_slashes(value: &str) -> String {
    value.replace("\\/", "/")
}

/// Parses `payload` as JSON and returns the first non-empty string stored
/// under `key`, searching depth-first. An object's own `key` wins over
/// matches nested inside its other members.
///
/// Returns `None` when the payload is not valid JSON or no match exists.
pub(crate) fn find_string_field(payload: &str, key: &str) -> Option<String> {
    let value: Value = serde_json::from_str(payload).ok()?;
    find_in_value(&value, key)
}

fn find_in_value(value: &Value, key: &str) -> Option<String> {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(s)) = map.get(key) {
                if !s.is_empty() {
                    return Some(s.clone());
                }
            }
            map.values().find_map(|v| find_in_value(v, key))
        }
        Value::Array(items) => items.iter().find_map(|v| find_in_value(v, key)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescape_slashes_only_touches_escaped_slashes() {
        assert_eq!(
            unescape_slashes(r"https:\/\/cf.example.com\/a&b"),
            r"https://cf.example.com/a&b"
        );
    }

    #[test]
    fn find_string_field_prefers_shallow_match() {
        let payload = r#"{"a":{"k":"deep"},"k":"shallow"}"#;
        assert_eq!(find_string_field(payload, "k").as_deref(), Some("shallow"));
    }

    #[test]
    fn find_string_field_searches_arrays() {
        let payload = r#"{"items":[{"other":1},{"k":"in-array"}]}"#;
        assert_eq!(find_string_field(payload, "k").as_deref(), Some("in-array"));
    }

    #[test]
    fn find_string_field_skips_non_string_and_empty_values() {
        let payload = r#"{"a":{"k":""},"b":{"k":42},"c":{"k":"ok"}}"#;
        assert_eq!(find_string_field(payload, "k").as_deref(), Some("ok"));
    }

    #[test]
    fn find_string_field_rejects_invalid_json() {
        assert_eq!(find_string_field("{not json", "k"), None);
    }
}
