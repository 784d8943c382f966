use jpath::{JPath, JPathError};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn key() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]{1,8}"
}

/// Keys the write grammar rejects, so a predicate must still be reported.
fn loose_key() -> impl Strategy<Value = String> {
    prop_oneof![key(), "[a-z]{1,4}[_.-][a-z]{1,4}"]
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z ]{0,12}".prop_map(Value::String),
    ]
}

/// Builds `{k0: {k1: {... kn: leaf}}}` so the key path always resolves.
fn nested(keys: &[String], leaf: Value) -> Value {
    keys.iter().rev().fold(leaf, |acc, k| {
        let mut map = Map::new();
        map.insert(k.clone(), acc);
        Value::Object(map)
    })
}

proptest! {
    #[test]
    fn set_then_get_returns_written_value(
        keys in prop::collection::vec(key(), 1..6),
        old in scalar(),
        new in scalar(),
    ) {
        let mut doc = JPath::new(nested(&keys, old)).unwrap();
        let path = keys.join("/");

        doc.set(&path, new.clone()).unwrap();
        prop_assert_eq!(doc.get(&path).unwrap(), &new);
    }

    #[test]
    fn predicate_in_write_path_never_mutates(
        keys in prop::collection::vec(loose_key(), 1..4),
        attr in "[a-z]{1,5}",
        value in "[a-z0-9]{1,5}",
        insert_at in 0usize..4,
    ) {
        let mut doc = JPath::new(nested(&keys, json!(0))).unwrap();
        let before = doc.value().clone();

        let mut segments: Vec<String> = keys.clone();
        let at = insert_at.min(segments.len());
        segments.insert(at, format!("[@{attr}={value}]"));
        let result = doc.set(&segments.join("/"), json!("new"));

        let is_speculative = matches!(result, Err(JPathError::SpeculativeQuery { .. }));
        prop_assert!(is_speculative);
        prop_assert_eq!(doc.value(), &before);
    }

    #[test]
    fn iteration_preserves_length_and_order(values in prop::collection::vec(any::<i64>(), 0..20)) {
        let items: Vec<Value> = values.iter().map(|v| json!({"v": v})).collect();
        let doc = JPath::new(json!({"items": items})).unwrap();

        let got: Vec<Value> = doc
            .iter_items("items/[*]/v")
            .unwrap()
            .map(|item| item.unwrap().clone())
            .collect();
        let expected: Vec<Value> = values.iter().map(|v| json!(v)).collect();
        prop_assert_eq!(got, expected);
    }
}
