//! Tests for `RecordLimits` configuration.

use pretty_assertions::assert_eq;
use tupleclass::{DefaultOrder, ErrorKind, MAX_INHERITANCE_DEPTH, MAX_MRO_LENGTH, RecordClass, RecordLimits};

#[test]
fn builder_methods_override_defaults() {
    let limits = RecordLimits::new()
        .max_fields(4)
        .max_inheritance_depth(8)
        .default_order(DefaultOrder::Lenient);
    assert_eq!(limits.max_fields, Some(4));
    assert_eq!(limits.max_inheritance_depth, 8);
    assert_eq!(limits.max_mro_length, MAX_MRO_LENGTH);
    assert_eq!(limits.default_order, DefaultOrder::Lenient);
}

#[test]
fn deserializes_partial_documents() {
    let limits: RecordLimits = serde_json::from_str(r#"{"max_fields": 3, "default_order": "lenient"}"#).unwrap();
    assert_eq!(limits.max_fields, Some(3));
    assert_eq!(limits.default_order, DefaultOrder::Lenient);
    assert_eq!(limits.max_inheritance_depth, MAX_INHERITANCE_DEPTH);
    assert_eq!(limits.max_mro_length, MAX_MRO_LENGTH);
}

#[test]
fn empty_document_is_default() {
    let limits: RecordLimits = serde_json::from_str("{}").unwrap();
    assert_eq!(limits, RecordLimits::default());
}

#[test]
fn serializes_default_order_lowercase() {
    let json = serde_json::to_value(RecordLimits::new()).unwrap();
    assert_eq!(json["default_order"], "strict");
    assert_eq!(json["max_fields"], serde_json::Value::Null);
}

#[test]
fn field_cap_counts_inherited_fields() {
    let base = RecordClass::builder("Base").field("a").field("b").build().unwrap();
    let err = RecordClass::builder("Child")
        .base(&base)
        .field("c")
        .limits(RecordLimits::new().max_fields(2))
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LimitError);
    assert_eq!(err.message(), Some("Child: too many fields (3 > 2)"));
}

#[test]
fn deep_chain_hits_depth_limit() {
    let limits = RecordLimits::new().max_inheritance_depth(5);
    let mut class = RecordClass::builder("C0").build().unwrap();
    let mut failure = None;
    for i in 1..10 {
        match RecordClass::builder(format!("C{i}"))
            .base(&class)
            .limits(limits.clone())
            .build()
        {
            Ok(next) => class = next,
            Err(err) => {
                failure = Some((i, err.kind()));
                break;
            }
        }
    }
    assert_eq!(failure, Some((6, ErrorKind::LimitError)));
}
