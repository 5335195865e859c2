//! Tests for binding constructor arguments to record fields.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use tupleclass::{ArgValues, ErrorKind, KwargsValues, RecordClass, Value, args, record_class};

fn data() -> Arc<RecordClass> {
    record_class!(Data { x, y = "default" }).unwrap()
}

#[test]
fn positional_with_default_fill() {
    let d = data().call(args![5.0]).unwrap();
    assert_eq!(d.get("x").unwrap(), &Value::Float(5.0));
    assert_eq!(d.get("y").unwrap(), &Value::from("default"));
}

#[test]
fn all_positional() {
    let d = data().call(args![10, "hi"]).unwrap();
    assert_eq!(d.iter().cloned().collect::<Vec<_>>(), vec![Value::Int(10), Value::from("hi")]);
    assert_eq!(d.len(), 2);
}

#[test]
fn keyword_only() {
    let d = data().call(args![; y = 2, x = 1]).unwrap();
    assert_eq!(d.values(), &[Value::Int(1), Value::Int(2)]);
}

#[test]
fn mixed_positional_and_keyword() {
    let d = data().call(args![1; y = "named"]).unwrap();
    assert_eq!(d.values(), &[Value::Int(1), Value::from("named")]);
}

#[test]
fn too_many_positionals_is_arity_error() {
    let err = data().call(args![1, "x", "extra"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArityError);
}

#[test]
fn no_arguments_with_required_field() {
    let err = data().call(args![]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingFieldError);
    assert_eq!(
        err.to_string(),
        "MissingFieldError: Data() missing required argument 'x' (position 0)"
    );
}

#[test]
fn all_defaults_construct_from_nothing() {
    let config = record_class!(Config { host = "localhost", port = 8080, debug = false }).unwrap();
    let c = config.call(()).unwrap();
    assert_eq!(c.to_string(), "Config('localhost', 8080, False)");
}

#[test]
fn positional_and_keyword_for_same_field() {
    let err = data().call(args![1; x = 2]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateBindingError);
    assert_eq!(err.message(), Some("Data() got multiple values for argument 'x'"));
}

#[test]
fn unknown_keyword() {
    let err = data().call(args![1; z = 2]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownFieldError);
}

#[test]
fn keyword_map_arguments() {
    let mut map = indexmap::IndexMap::new();
    map.insert("x".to_owned(), Value::Int(3));
    let d = data().call(KwargsValues::from(map)).unwrap();
    assert_eq!(d.values(), &[Value::Int(3), Value::from("default")]);
}

#[test]
fn builder_style_arguments() {
    let args = ArgValues::default().arg(7).kwarg("y", Value::None);
    let d = data().call(args).unwrap();
    assert_eq!(d.get("y").unwrap(), &Value::None);
}

#[test]
fn mutable_default_is_not_shared() {
    let bag = record_class!(Bag { items = Value::list([1, 2]) }).unwrap();
    let mut first = bag.call(args![]).unwrap();
    if let Value::List(items) = first.get_mut("items").unwrap() {
        items.clear();
    }
    let second = bag.call(args![]).unwrap();
    assert_eq!(second.get("items").unwrap(), &Value::list([1, 2]));
}

#[test]
fn nested_records() {
    let point = record_class!(Point { x, y }).unwrap();
    let line = record_class!(Line { start, end }).unwrap();
    let l = line
        .call(args![point.call(args![0, 0]).unwrap(), point.call(args![1, 2]).unwrap()])
        .unwrap();
    assert_eq!(l.to_string(), "Line(Point(0, 0), Point(1, 2))");
    assert_eq!(
        l.get("end").unwrap(),
        &Value::tuple([1, 2]),
        "nested records compare equal to plain tuples"
    );
}

#[test]
fn same_keyword_twice() {
    let err = data().call(args![; y = 1, y = 2]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateBindingError);
    assert_eq!(err.message(), Some("Data() got multiple values for argument 'y'"));
}

#[test]
fn error_messages_name_the_class() {
    assert_eq!(
        data().call(args![1, 2, 3]).unwrap_err().message(),
        Some("Data() takes at most 2 positional arguments but 3 were given")
    );
    assert_eq!(
        data().call(args![1; z = 2]).unwrap_err().message(),
        Some("Data() got an unexpected keyword argument 'z'")
    );
}
