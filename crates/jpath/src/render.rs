//! Debug rendering: keys sorted, four-space indentation.

use serde::ser::Error as _;
use serde::Serialize;
use serde_json::{Map, Value};

fn sorted(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sorted(v)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}

/// Render a tree for diagnostics.
pub fn to_debug_string(value: &Value) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    sorted(value).serialize(&mut ser)?;
    String::from_utf8(buf).map_err(serde_json::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert_eq!(to_debug_string(&json!(1)).unwrap(), "1");
        assert_eq!(to_debug_string(&json!("s")).unwrap(), "\"s\"");
    }

    #[test]
    fn test_nested_array() {
        let out = to_debug_string(&json!({"z": [1, {"b": 1, "a": 2}]})).unwrap();
        assert_eq!(
            out,
            "{\n    \"z\": [\n        1,\n        {\n            \"a\": 2,\n            \"b\": 1\n        }\n    ]\n}"
        );
    }
}
