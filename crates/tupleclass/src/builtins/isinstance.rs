use std::sync::Arc;

use crate::{
    types::{RecordClass, Type},
    value::Value,
};

/// The second argument of [`isinstance`] and [`issubclass`]: a builtin type,
/// a record class, or a union of either.
#[derive(Debug, Clone)]
pub enum ClassInfo {
    Type(Type),
    Class(Arc<RecordClass>),
    /// Matches if any member matches, like a tuple of classes in Python.
    Union(Vec<Self>),
}

impl From<Type> for ClassInfo {
    fn from(t: Type) -> Self {
        Self::Type(t)
    }
}

impl From<Arc<RecordClass>> for ClassInfo {
    fn from(class: Arc<RecordClass>) -> Self {
        Self::Class(class)
    }
}

impl From<&Arc<RecordClass>> for ClassInfo {
    fn from(class: &Arc<RecordClass>) -> Self {
        Self::Class(Arc::clone(class))
    }
}

impl<T: Into<Self>> FromIterator<T> for ClassInfo {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::Union(iter.into_iter().map(Into::into).collect())
    }
}

/// Checks whether `value` is an instance of `classinfo`.
///
/// A query against `tuple` is answered by the tuple capability rather than by
/// the value's runtime tag, so every record is a tuple here. Records also
/// match their own class and every ancestor class.
#[must_use]
pub fn isinstance(value: &Value, classinfo: &ClassInfo) -> bool {
    match classinfo {
        ClassInfo::Type(Type::Tuple) => value.as_tuple_like().is_some(),
        ClassInfo::Type(t) => value.py_type().is_instance_of(*t),
        ClassInfo::Class(class) => value
            .as_record()
            .is_some_and(|instance| instance.class().is_subclass_of(class)),
        ClassInfo::Union(members) => members.iter().any(|member| isinstance(value, member)),
    }
}

/// Checks whether record class `class` is a subclass of `classinfo`.
///
/// Every record class is a subclass of `tuple` and `object`.
#[must_use]
pub fn issubclass(class: &RecordClass, classinfo: &ClassInfo) -> bool {
    match classinfo {
        ClassInfo::Type(t) => Type::Record.is_instance_of(*t),
        ClassInfo::Class(other) => class.is_subclass_of(other),
        ClassInfo::Union(members) => members.iter().any(|member| issubclass(class, member)),
    }
}
