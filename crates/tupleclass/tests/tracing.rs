//! Tests for the record tracer hooks.

use pretty_assertions::assert_eq;
use tupleclass::{BindSource, ErrorKind, RecordClass, RecordingTracer, StderrTracer, TraceEvent, args};

#[test]
fn build_and_call_emit_events_in_order() {
    let mut tracer = RecordingTracer::new();
    let data = RecordClass::builder("Data")
        .field("x")
        .field_with_default("y", "default")
        .build_traced(&mut tracer)
        .unwrap();
    data.call_traced(args![1], &mut tracer).unwrap();

    assert_eq!(
        tracer.events(),
        &[
            TraceEvent::SchemaStart {
                class_name: "Data".to_owned(),
                bases: 0,
            },
            TraceEvent::FieldDeclared {
                class_name: "Data".to_owned(),
                field: "x".to_owned(),
                position: 0,
            },
            TraceEvent::FieldDeclared {
                class_name: "Data".to_owned(),
                field: "y".to_owned(),
                position: 1,
            },
            TraceEvent::SchemaBuilt {
                class_name: "Data".to_owned(),
                fields: 2,
            },
            TraceEvent::FieldBound {
                class_name: "Data".to_owned(),
                field: "x".to_owned(),
                position: 0,
                source: BindSource::Positional,
            },
            TraceEvent::FieldBound {
                class_name: "Data".to_owned(),
                field: "y".to_owned(),
                position: 1,
                source: BindSource::Default,
            },
            TraceEvent::Constructed {
                class_name: "Data".to_owned(),
                fields: 2,
            },
        ]
    );
}

#[test]
fn failed_call_does_not_report_construction() {
    let mut tracer = RecordingTracer::new();
    let data = RecordClass::builder("Data").field("x").build().unwrap();
    assert!(data.call_traced(args![], &mut tracer).is_err());
    assert!(
        !tracer
            .events()
            .iter()
            .any(|e| matches!(e, TraceEvent::Constructed { .. }))
    );
}

#[test]
fn missing_field_reports_no_bindings() {
    let data = RecordClass::builder("Data").field("x").field("y").build().unwrap();
    let mut tracer = RecordingTracer::new();
    let err = data.call_traced(args![; y = 1], &mut tracer).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingFieldError);
    assert!(tracer.events().is_empty(), "{:?}", tracer.events());
}

#[test]
fn inherited_fields_are_traced() {
    let base = RecordClass::builder("Base").field("a").build().unwrap();
    let mut tracer = RecordingTracer::new();
    RecordClass::builder("Child")
        .base(&base)
        .field("b")
        .build_traced(&mut tracer)
        .unwrap();
    assert!(tracer.events().contains(&TraceEvent::FieldInherited {
        class_name: "Child".to_owned(),
        field: "a".to_owned(),
        position: 0,
    }));
}

#[test]
fn stderr_tracer_runs_through_a_build() {
    let mut tracer = StderrTracer::with_limit(3);
    let point = RecordClass::builder("Point")
        .field("x")
        .field("y")
        .build_traced(&mut tracer)
        .unwrap();
    assert!(point.call_traced(args![1, 2], &mut tracer).is_ok());
}

#[test]
fn bind_source_displays_lowercase() {
    assert_eq!(BindSource::Positional.to_string(), "positional");
    assert_eq!(BindSource::Keyword.to_string(), "keyword");
    assert_eq!(BindSource::Default.to_string(), "default");
}

#[test]
fn recording_tracer_clear() {
    let data = RecordClass::builder("Data").field("x").build().unwrap();
    let mut tracer = RecordingTracer::new();
    data.call_traced(args![1], &mut tracer).unwrap();
    assert_eq!(tracer.events().len(), 2);
    tracer.clear();
    assert!(tracer.events().is_empty());
}
