//! Field specifications and the ordered schema merged from a class hierarchy.

use indexmap::IndexMap;

use crate::{
    exception::{ErrorKind, RecordResult},
    resource::{DefaultOrder, RecordLimits},
    tracer::RecordTracer,
    value::Value,
};

/// One declared field: a name and an optional default.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FieldSpec {
    name: String,
    /// `None` when the field is required.
    default: Option<Value>,
}

impl FieldSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, default: Option<Value>) -> Self {
        Self {
            name: name.into(),
            default,
        }
    }

    /// A field that must be supplied at construction.
    #[must_use]
    pub fn required(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }

    /// A field that falls back to `default` when not supplied.
    #[must_use]
    pub fn with_default(name: impl Into<String>, default: impl Into<Value>) -> Self {
        Self::new(name, Some(default.into()))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// The resolved, ordered field list of a record class, inherited fields included.
///
/// Built once when the class is defined and never mutated afterwards. Lookup by
/// name and by position are both O(1), so constructing and reading instances
/// never walks the class hierarchy.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct ClassSchema {
    fields: IndexMap<String, FieldSpec>,
}

impl ClassSchema {
    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates the fields in schema order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &FieldSpec> {
        self.fields.values()
    }

    /// Iterates the field names in schema order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    /// Position of `name` in schema order.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.get_index_of(name)
    }

    /// Field at `position` in schema order.
    #[must_use]
    pub fn field_at(&self, position: usize) -> Option<&FieldSpec> {
        self.fields.get_index(position).map(|(_, field)| field)
    }

    /// `(name, default)` pairs in schema order.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&str, Option<&Value>)> {
        self.iter().map(|field| (field.name(), field.default_value())).collect()
    }

    /// Merges the schemas of a class's resolution order with its own declarations.
    ///
    /// `ancestors` is the class's resolution order without the class itself.
    /// Entries from earlier ancestors win the position of a shared name, so
    /// inherited fields keep the order in which they were first declared. Own
    /// fields are then appended, except that a name already present is replaced
    /// in place rather than moved to the end.
    pub(crate) fn merge<'a>(
        class_name: &str,
        ancestors: impl IntoIterator<Item = &'a Self>,
        own_fields: &[FieldSpec],
        limits: &RecordLimits,
        tracer: &mut impl RecordTracer,
    ) -> RecordResult<Self> {
        let mut fields: IndexMap<String, FieldSpec> = IndexMap::new();

        for ancestor in ancestors {
            for field in ancestor.iter() {
                if !fields.contains_key(field.name()) {
                    tracer.on_field_inherited(class_name, field.name(), fields.len());
                    fields.insert(field.name().to_owned(), field.clone());
                }
            }
        }

        for field in own_fields {
            if let Some((position, _, existing)) = fields.get_full_mut(field.name()) {
                tracer.on_field_overridden(class_name, field.name(), position);
                *existing = field.clone();
            } else {
                tracer.on_field_declared(class_name, field.name(), fields.len());
                fields.insert(field.name().to_owned(), field.clone());
            }
        }

        let schema = Self { fields };
        limits.check_field_count(class_name, schema.len())?;
        if limits.default_order == DefaultOrder::Strict {
            schema.check_default_order(class_name)?;
        }
        Ok(schema)
    }

    /// Fails if any required field comes after a default-bearing one.
    fn check_default_order(&self, class_name: &str) -> RecordResult<()> {
        let mut first_default: Option<&str> = None;
        for field in self.iter() {
            match (field.has_default(), first_default) {
                (true, None) => first_default = Some(field.name()),
                (false, Some(after)) => return Err(ErrorKind::schema_order(class_name, field.name(), after)),
                _ => {}
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ClassSchema {
    type Item = &'a FieldSpec;
    type IntoIter = indexmap::map::Values<'a, String, FieldSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.values()
    }
}

impl FromIterator<FieldSpec> for ClassSchema {
    /// Collects fields into a schema. A repeated name keeps its first position
    /// and takes the later field, as a subclass override does.
    fn from_iter<T: IntoIterator<Item = FieldSpec>>(iter: T) -> Self {
        let mut fields = IndexMap::new();
        for field in iter {
            if let Some(existing) = fields.get_mut(field.name()) {
                *existing = field;
            } else {
                fields.insert(field.name().to_owned(), field);
            }
        }
        Self { fields }
    }
}
