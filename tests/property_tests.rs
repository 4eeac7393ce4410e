//! Property-based tests for boxing, name sanitizing and the XML round trip.

use proptest::prelude::*;
use serde_xmldoc::{encode, from_str, sanitize_name, to_string, Number, Value, XmlMap};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(Number::Integer(n))),
        (-1.0e12..1.0e12f64).prop_map(|f| Value::Number(Number::Float(f))),
        "[a-z][a-z ]{0,10}[a-z]"
            .prop_filter("boxes as a keyword", |s| !matches!(s.as_str(), "true" | "false" | "null"))
            .prop_map(Value::String),
    ]
}

fn key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}"
}

/// Maps whose lists hold at least two items; anything shorter collapses on the way back.
fn document() -> impl Strategy<Value = Value> {
    let leaf = scalar();
    let tree = leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 2..4).prop_map(Value::List),
            prop::collection::vec((key(), inner), 1..4)
                .prop_map(|entries| Value::Map(entries.into_iter().collect::<XmlMap>())),
        ]
    });

    prop::collection::vec((key(), tree), 1..5)
        .prop_map(|entries| Value::Map(entries.into_iter().collect::<XmlMap>()))
}

/// Nested lists flatten into siblings, so only list-free items are kept inside lists.
fn representable(value: &Value) -> bool {
    match value {
        Value::Map(map) => map.values().all(|v| match v {
            Value::List(items) => items.iter().all(|i| !i.is_list() && representable(i)),
            other => representable(other),
        }),
        _ => true,
    }
}

proptest! {
    #[test]
    fn prop_sanitize_is_idempotent(s in "\\PC{0,24}") {
        if let Ok(once) = sanitize_name(&s) {
            prop_assert_eq!(sanitize_name(&once).unwrap(), once);
        }
    }

    #[test]
    fn prop_sanitized_names_are_valid(s in "\\PC{0,24}") {
        if let Ok(name) = sanitize_name(&s) {
            let first = name.chars().next().unwrap();
            prop_assert!(first.is_ascii_alphabetic() || first == '_' || first == ':');
            prop_assert!(name.chars().all(|c| c.is_ascii_alphanumeric() || ":.-_".contains(c)));
        }
    }

    #[test]
    fn prop_unbox_then_autobox(value in scalar()) {
        let text = value.unbox().unwrap();
        prop_assert_eq!(Value::autobox(&text), value);
    }

    #[test]
    fn prop_integer_text(n in any::<i64>()) {
        prop_assert_eq!(Value::autobox(&n.to_string()), Value::from(n));
    }

    #[test]
    fn prop_xml_round_trip(value in document().prop_filter("flattened lists", representable)) {
        let text = to_string(&encode(&value).unwrap()).unwrap();
        let back = from_str(&text).unwrap().to_value();
        prop_assert_eq!(back, value);
    }
}
