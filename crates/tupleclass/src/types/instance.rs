use std::{
    cmp::Ordering,
    fmt::{self, Write},
    sync::Arc,
};

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

use crate::{
    exception::{ErrorKind, RecordResult},
    types::{ClassSchema, RecordClass, SeqIter, SequenceLike, tuple_repr_fmt},
    value::Value,
};

/// An instance of a record class.
///
/// Holds one value slot per schema field, in schema order. Fields are read and
/// written by name, and read or written by position; the [`SequenceLike`]
/// implementation presents the slots as a tuple for iteration, unpacking,
/// comparison and identity queries.
#[derive(Clone)]
pub struct Instance {
    class: Arc<RecordClass>,
    slots: Vec<Value>,
}

impl Instance {
    /// Pairs already bound slots with their class. `slots` must match the schema length.
    pub(crate) fn from_parts(class: Arc<RecordClass>, slots: Vec<Value>) -> Self {
        debug_assert_eq!(class.schema().len(), slots.len());
        Self { class, slots }
    }

    #[must_use]
    pub fn class(&self) -> &Arc<RecordClass> {
        &self.class
    }

    #[must_use]
    pub fn class_name(&self) -> &str {
        self.class.name()
    }

    #[must_use]
    pub fn schema(&self) -> &ClassSchema {
        self.class.schema()
    }

    /// Field names in schema order.
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        self.class.fields()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Reads a field by name.
    ///
    /// # Errors
    /// `UnknownFieldError` if the class has no such field.
    pub fn get(&self, name: &str) -> RecordResult<&Value> {
        let position = self.position_of(name)?;
        Ok(&self.slots[position])
    }

    /// Borrows a field by name for in-place mutation.
    ///
    /// # Errors
    /// `UnknownFieldError` if the class has no such field.
    pub fn get_mut(&mut self, name: &str) -> RecordResult<&mut Value> {
        let position = self.position_of(name)?;
        Ok(&mut self.slots[position])
    }

    /// Assigns a field by name. Later positional reads and iteration see the new value.
    ///
    /// # Errors
    /// `UnknownFieldError` if the class has no such field.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> RecordResult<()> {
        *self.get_mut(name)? = value.into();
        Ok(())
    }

    /// Reads by position. Negative indexes count from the end.
    ///
    /// # Errors
    /// `IndexError` if `index` falls outside the record.
    pub fn get_item(&self, index: i64) -> RecordResult<&Value> {
        let position = self.normalize_index(index)?;
        Ok(&self.slots[position])
    }

    /// Writes by position. Negative indexes count from the end.
    ///
    /// # Errors
    /// `IndexError` if `index` falls outside the record.
    pub fn set_item(&mut self, index: i64, value: impl Into<Value>) -> RecordResult<()> {
        let position = self.normalize_index(index)?;
        self.slots[position] = value.into();
        Ok(())
    }

    /// Iterates the field values in schema order.
    pub fn iter(&self) -> SeqIter<'_> {
        SeqIter::new(self)
    }

    /// The field values in schema order.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.slots
    }

    /// Unpacks into exactly `N` values.
    ///
    /// # Errors
    /// `UnpackArityError` if the record does not have exactly `N` fields.
    pub fn unpack<const N: usize>(&self) -> RecordResult<[Value; N]> {
        let values = self.unpack_exact(N)?;
        values
            .try_into()
            .map_err(|v: Vec<Value>| ErrorKind::unpack_arity(N, v.len()))
    }

    /// Copies the values into a plain tuple.
    #[must_use]
    pub fn to_tuple(&self) -> Value {
        Value::Tuple(self.slots.clone())
    }

    /// Copies the fields into an ordered name to value map.
    #[must_use]
    pub fn as_dict(&self) -> IndexMap<String, Value> {
        self.schema()
            .names()
            .zip(&self.slots)
            .map(|(name, value)| (name.to_owned(), value.clone()))
            .collect()
    }

    /// Returns a copy with the named fields replaced.
    ///
    /// # Errors
    /// `UnknownFieldError` if a name is not a field. The original is never modified.
    pub fn replace<K, V>(&self, changes: impl IntoIterator<Item = (K, V)>) -> RecordResult<Self>
    where
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut copy = self.clone();
        for (name, value) in changes {
            copy.set(name.as_ref(), value)?;
        }
        Ok(copy)
    }

    /// Renders `Name(f1=v1, f2=v2)`.
    #[must_use]
    pub fn repr_with_names(&self) -> String {
        let mut s = String::new();
        s.push_str(self.class_name());
        s.push('(');
        for (i, (name, value)) in self.schema().names().zip(&self.slots).enumerate() {
            if i > 0 {
                s.push_str(", ");
            }
            s.push_str(name);
            s.push('=');
            // writing to a String never fails
            let _ = value.repr_fmt(&mut s);
        }
        s.push(')');
        s
    }

    /// Writes `Name(v1, v2)`, the class name followed by the tuple repr.
    pub(crate) fn repr_fmt(&self, f: &mut impl Write) -> fmt::Result {
        f.write_str(self.class_name())?;
        tuple_repr_fmt(self, f)
    }

    fn position_of(&self, name: &str) -> RecordResult<usize> {
        self.schema()
            .position(name)
            .ok_or_else(|| ErrorKind::unknown_attribute(self.class_name(), name))
    }

    fn normalize_index(&self, index: i64) -> RecordResult<usize> {
        let len = i64::try_from(self.slots.len()).map_err(|_| ErrorKind::index_out_of_range())?;
        let adjusted = if index < 0 { index + len } else { index };
        if (0..len).contains(&adjusted) {
            usize::try_from(adjusted).map_err(|_| ErrorKind::index_out_of_range())
        } else {
            Err(ErrorKind::index_out_of_range())
        }
    }
}

impl SequenceLike for Instance {
    fn seq_len(&self) -> usize {
        self.slots.len()
    }

    fn seq_get(&self, index: usize) -> Option<&Value> {
        self.slots.get(index)
    }

    fn seq_to_vec(&self) -> Vec<Value> {
        self.slots.clone()
    }
}

/// Tuple equality: values only, the class is ignored.
impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.seq_eq(other)
    }
}

impl PartialEq<Vec<Value>> for Instance {
    fn eq(&self, other: &Vec<Value>) -> bool {
        self.seq_eq(other)
    }
}

impl PartialEq<Value> for Instance {
    fn eq(&self, other: &Value) -> bool {
        other.as_tuple_like().is_some_and(|seq| self.seq_eq(seq))
    }
}

impl PartialOrd for Instance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.seq_cmp(other)
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.repr_fmt(f)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.class_name());
        for (name, value) in self.schema().names().zip(&self.slots) {
            s.field(name, value);
        }
        s.finish()
    }
}

impl Serialize for Instance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Instance", 2)?;
        state.serialize_field("class", self.class_name())?;
        state.serialize_field("fields", &FieldsMap(self))?;
        state.end()
    }
}

/// Serializes an instance's fields as an ordered map.
struct FieldsMap<'a>(&'a Instance);

impl Serialize for FieldsMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in self.0.schema().names().zip(&self.0.slots) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a Instance {
    type Item = &'a Value;
    type IntoIter = SeqIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
