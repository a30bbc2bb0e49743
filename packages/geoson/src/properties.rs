//! Flattening of JSON property objects into string maps.

use geoson_models::Properties;
use serde_json::{Map, Value};

/// Flattens a JSON object into a [`Properties`] map.
///
/// A missing object yields an empty map.
#[must_use]
pub fn flatten(object: Option<&Map<String, Value>>) -> Properties {
    object.map_or_else(Properties::new, |object| {
        object
            .iter()
            .map(|(key, value)| (key.clone(), flatten_value(value)))
            .collect()
    })
}

/// Renders a single property value.
///
/// Strings are returned verbatim. Everything else becomes compact JSON with
/// object keys in document order. Numbers keep their source text.
#[must_use]
pub fn flatten_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            value.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn flatten_json(value: &Value) -> Properties {
        flatten(value.as_object())
    }

    #[test]
    fn flattens_scalars() {
        let props = flatten_json(&json!({"a": "x", "b": 3, "c": true}));
        assert_eq!(props.len(), 3);
        assert_eq!(props["a"], "x");
        assert_eq!(props["b"], "3");
        assert_eq!(props["c"], "true");
    }

    #[test]
    fn flattens_null_and_floats() {
        let props = flatten_json(&json!({"n": null, "f": 1.5, "neg": -2}));
        assert_eq!(props["n"], "null");
        assert_eq!(props["f"], "1.5");
        assert_eq!(props["neg"], "-2");
    }

    #[test]
    fn nested_values_are_compact_and_keep_key_order() {
        let props = flatten_json(&json!({
            "nested": {"z": 1, "a": [1, "two", {"k": false}]},
            "list": []
        }));
        assert_eq!(props["nested"], r#"{"z":1,"a":[1,"two",{"k":false}]}"#);
        assert_eq!(props["list"], "[]");
    }

    #[test]
    fn strings_are_not_quoted() {
        let props = flatten_json(&json!({"quote": "say \"hi\""}));
        assert_eq!(props["quote"], "say \"hi\"");
    }

    #[test]
    fn missing_object_is_empty() {
        assert!(flatten(None).is_empty());
        assert!(flatten_json(&json!("not an object")).is_empty());
    }

    #[test]
    fn flattening_is_deterministic() {
        let value = json!({"b": {"y": [1, 2], "x": null}, "a": 0.25});
        assert_eq!(flatten_json(&value), flatten_json(&value));
    }

    #[test]
    fn numbers_keep_source_text() {
        let value: Value = serde_json::from_str(
            r#"{"n":1E2,"big":12345678901234567890123,"huge":1e400,"nested":{"f":-0.50}}"#,
        )
        .unwrap();
        let props = flatten_json(&value);
        assert_eq!(props["n"], "1E2");
        assert_eq!(props["big"], "12345678901234567890123");
        assert_eq!(props["huge"], "1e400");
        assert_eq!(props["nested"], r#"{"f":-0.50}"#);
    }
}
