//! Tests for the tuple behaviour of record instances.

use std::cmp::Ordering;

use pretty_assertions::assert_eq;
use tupleclass::{ClassInfo, ErrorKind, SequenceLike, Type, Value, args, isinstance, issubclass, record_class};

#[test]
fn iteration_restarts_and_matches_bound_values() {
    let point = record_class!(Point { x, y, z = 0 }).unwrap();
    let p = point.call(args![1, 2]).unwrap();
    let first: Vec<&Value> = p.iter().collect();
    let second: Vec<&Value> = (&p).into_iter().collect();
    assert_eq!(first, second);
    assert_eq!(p.iter().len(), p.len());
    assert_eq!(p.iter().next_back(), Some(&Value::Int(0)));
}

#[test]
fn unpacking_requires_exact_count() {
    let point = record_class!(Point { x, y }).unwrap();
    let p = point.call(args![1, 2]).unwrap();
    let [x, y] = p.unpack().unwrap();
    assert_eq!((x, y), (Value::Int(1), Value::Int(2)));

    let err = p.unpack::<3>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnpackArityError);
    assert_eq!(err.message(), Some("not enough values to unpack (expected 3, got 2)"));
    assert_eq!(p.unpack_exact(1).unwrap_err().kind(), ErrorKind::UnpackArityError);
}

#[test]
fn equality_ignores_class() {
    let a = record_class!(A { x, y }).unwrap();
    let b = record_class!(B { p, q }).unwrap();
    let ia = a.call(args![1, "s"]).unwrap();
    let ib = b.call(args![1, "s"]).unwrap();
    assert_eq!(ia, ib);
    assert_eq!(ia, vec![Value::Int(1), Value::from("s")]);
    assert_eq!(Value::from(ia.clone()), Value::tuple([Value::Int(1), Value::from("s")]));
    assert_ne!(ia, b.call(args![1, "t"]).unwrap());
}

#[test]
fn ordering_is_lexicographic() {
    let point = record_class!(Point { x, y }).unwrap();
    let small = point.call(args![1, 2]).unwrap();
    let large = point.call(args![1, 3]).unwrap();
    assert!(small < large);
    assert_eq!(small.partial_cmp(&small.clone()), Some(Ordering::Equal));
    assert!(Value::from(small) < Value::tuple([1, 2, 0]));
}

#[test]
fn representation() {
    let data = record_class!(Data { x, y = "default" }).unwrap();
    let d = data.call(args![10, "hi"]).unwrap();
    assert_eq!(d.to_string(), "Data(10, 'hi')");
    assert_eq!(d.repr_with_names(), "Data(x=10, y='hi')");
    assert_eq!(Value::from(d).py_repr(), "Data(10, 'hi')");
    let empty = record_class!(Empty {}).unwrap();
    assert_eq!(empty.call(args![]).unwrap().to_string(), "Empty()");
}

#[test]
fn identity_queries_report_tuple() {
    let data = record_class!(Data { x }).unwrap();
    let v = Value::from(data.call(args![1]).unwrap());
    assert!(isinstance(&v, &ClassInfo::Type(Type::Tuple)));
    assert!(isinstance(&v, &ClassInfo::from(&data)));
    assert!(issubclass(&data, &ClassInfo::Type(Type::Tuple)));
    assert!(v.as_tuple_like().is_some());
    assert_eq!(v.py_type(), Type::Record);
    assert!(!isinstance(&Value::list([1]), &ClassInfo::Type(Type::Tuple)));
}

#[test]
fn assignment_updates_tuple_view() {
    let data = record_class!(Data { x, y = "default" }).unwrap();
    let mut d = data.call(args![1]).unwrap();
    d.set("x", 12).unwrap();
    assert_eq!(d.get_item(0).unwrap(), &Value::Int(12));
    assert_eq!(d.iter().next(), Some(&Value::Int(12)));
    d.set_item(1, "changed").unwrap();
    assert_eq!(d.get("y").unwrap(), &Value::from("changed"));
    assert_eq!(d.set_item(2, 0).unwrap_err().kind(), ErrorKind::IndexError);
}

#[test]
fn introspection_helpers() {
    let data = record_class!(Data { x, y = "default" }).unwrap();
    let d = data.call(args![1]).unwrap();
    assert_eq!(d.fields(), vec!["x", "y"]);
    assert_eq!(d.to_tuple(), Value::tuple([Value::Int(1), Value::from("default")]));
    let dict = d.as_dict();
    assert_eq!(dict.get("y"), Some(&Value::from("default")));
    let e = d.replace([("x", 2)]).unwrap();
    assert_eq!(e.values(), &[Value::Int(2), Value::from("default")]);
    assert_eq!(d.class_name(), "Data");
}

#[test]
fn float_fields_print_like_python() {
    let data = record_class!(Data { x }).unwrap();
    assert_eq!(data.call(args![1e20]).unwrap().to_string(), "Data(1e+20,)");
    assert_eq!(data.call(args![1e-7]).unwrap().to_string(), "Data(1e-07,)");
    assert_eq!(data.call(args![1e16]).unwrap().to_string(), "Data(1e+16,)");
    assert_eq!(data.call(args![0.5]).unwrap().to_string(), "Data(0.5,)");
}

#[test]
fn bool_fields_equal_numeric_tuples() {
    let flag = record_class!(Flag { on }).unwrap();
    let f = flag.call(args![true]).unwrap();
    assert_eq!(Value::from(f.clone()), Value::tuple([1.0]));
    assert_eq!(Value::tuple([1.0]), Value::from(f.clone()));
    assert_eq!(f, vec![Value::Int(1)]);
    assert!(Value::from(f) < Value::tuple([1.5]));
}

#[test]
fn plain_sequences_iterate_from_both_ends() {
    let seq = vec![Value::Int(1), Value::from("two"), Value::Float(3.0)];
    let mut first = seq.seq_iter();
    first.next();
    assert_eq!(first.len(), 2);
    assert_eq!(seq.seq_iter().len(), 3);
    let reversed: Vec<Value> = seq.seq_iter().rev().cloned().collect();
    assert_eq!(reversed, vec![Value::Float(3.0), Value::from("two"), Value::Int(1)]);
}

#[test]
fn plain_sequences_compare_through_trait_objects() {
    let a = vec![Value::Int(1), Value::from("two"), Value::Float(3.0)];
    let b = vec![Value::Int(1), Value::from("two"), Value::Int(3)];
    assert!(a.seq_eq(&b));
    let shorter = vec![Value::Int(1)];
    assert_eq!(shorter.seq_cmp(&a), Some(Ordering::Less));
    assert_eq!(a.seq_cmp(&shorter), Some(Ordering::Greater));
    assert_eq!(a.unpack_exact(4).unwrap_err().kind(), ErrorKind::UnpackArityError);
    assert_eq!(Value::tuple([5]).py_repr(), "(5,)");
}
