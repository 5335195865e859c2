//! Tests for C3 linearization of record class hierarchies.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use tupleclass::{ErrorKind, RecordClass, RecordLimits};

fn class(name: &str, bases: &[&Arc<RecordClass>]) -> Arc<RecordClass> {
    bases
        .iter()
        .fold(RecordClass::builder(name), |b, base| b.base(base))
        .build()
        .unwrap()
}

#[test]
fn single_inheritance_chain() {
    let a = class("A", &[]);
    let b = class("B", &[&a]);
    let c = class("C", &[&b]);
    assert_eq!(c.mro_names(), vec!["C", "B", "A"]);
    assert!(c.is_subclass_of(&a));
    assert!(!a.is_subclass_of(&c));
}

#[test]
fn diamond_linearization() {
    let o = class("O", &[]);
    let a = class("A", &[&o]);
    let b = class("B", &[&o]);
    let d = class("D", &[&a, &b]);
    assert_eq!(d.mro_names(), vec!["D", "A", "B", "O"]);
}

#[test]
fn textbook_c3_example() {
    let o = class("O", &[]);
    let f = class("F", &[&o]);
    let e = class("E", &[&o]);
    let d = class("D", &[&o]);
    let c = class("C", &[&d, &f]);
    let b = class("B", &[&d, &e]);
    let a = class("A", &[&b, &c]);
    assert_eq!(a.mro_names(), vec!["A", "B", "C", "D", "E", "F", "O"]);
}

#[test]
fn inconsistent_hierarchy_is_rejected() {
    let x = class("X", &[]);
    let y = class("Y", &[&x]);
    let err = RecordClass::builder("Z").base(&x).base(&y).build().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MroError);
    assert_eq!(
        err.message(),
        Some("Cannot create a consistent method resolution order (MRO) for bases X, Y")
    );
}

#[test]
fn repeated_base_is_rejected() {
    let x = class("X", &[]);
    let err = RecordClass::builder("Z").base(&x).base(&x).build().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MroError);
}

#[test]
fn duplicate_field_in_one_body() {
    let err = RecordClass::builder("P").field("x").field("x").build().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateFieldError);
}

#[test]
fn depth_limit() {
    let limits = RecordLimits::new().max_inheritance_depth(2);
    let a = class("A", &[]);
    let b = class("B", &[&a]);
    let c = class("C", &[&b]);
    let err = RecordClass::builder("D").base(&c).limits(limits).build().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LimitError);
}

#[test]
fn mro_length_limit() {
    let limits = RecordLimits::new().max_mro_length(2);
    let a = class("A", &[]);
    let b = class("B", &[]);
    let c = class("C", &[]);
    let err = RecordClass::builder("D")
        .base(&a)
        .base(&b)
        .base(&c)
        .limits(limits)
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LimitError);
}

#[test]
fn own_fields_and_schema_differ_under_inheritance() {
    let a = RecordClass::builder("A").field("a").build().unwrap();
    let b = RecordClass::builder("B").base(&a).field("b").build().unwrap();
    assert_eq!(b.fields(), vec!["a", "b"]);
    assert_eq!(b.own_fields().len(), 1);
    assert_eq!(b.to_string(), "<class 'B'>");
}
