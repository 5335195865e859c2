#![doc = include_str!("../../../README.md")]
mod args;
pub mod builtins;
mod exception;
mod macros;
mod resource;
mod signature;
pub mod tracer;
mod types;
mod value;

pub use crate::{
    args::{ArgPosIter, ArgValues, KwargsValues, KwargsValuesIter},
    builtins::{ClassInfo, isinstance, issubclass},
    exception::{ErrorKind, RecordError, RecordResult},
    resource::{DefaultOrder, MAX_INHERITANCE_DEPTH, MAX_MRO_LENGTH, RecordLimits},
    tracer::{BindSource, NoopTracer, RecordTracer, RecordingTracer, StderrTracer, TraceEvent},
    types::{ClassSchema, FieldSpec, Instance, RecordClass, RecordClassBuilder, SeqIter, SequenceLike, Type},
    value::{ConversionError, Value},
};
