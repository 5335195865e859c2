//! Record classes: definition, linearization and construction.

use std::{fmt, sync::Arc};

use ahash::AHashSet;

use crate::{
    args::ArgValues,
    exception::{ErrorKind, RecordResult},
    resource::RecordLimits,
    signature,
    tracer::{NoopTracer, RecordTracer},
    types::{ClassSchema, FieldSpec, Instance},
    value::Value,
};

/// A defined record class.
///
/// Classes are immutable once built and shared behind [`Arc`]; instances hold
/// a reference to their class and read the schema from it. The class's
/// resolution order is computed with C3 linearization over its bases, and the
/// schema is the flattened merge of every ancestor's schema with the fields
/// declared here.
pub struct RecordClass {
    name: String,
    /// Direct bases, in declaration order.
    bases: Vec<Arc<Self>>,
    /// Resolution order, excluding this class.
    mro: Vec<Arc<Self>>,
    /// Fields declared in this class body, in declaration order.
    own_fields: Vec<FieldSpec>,
    schema: ClassSchema,
}

impl RecordClass {
    /// Starts defining a class named `name`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> RecordClassBuilder {
        RecordClassBuilder::new(name)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct bases, in declaration order.
    #[must_use]
    pub fn bases(&self) -> &[Arc<Self>] {
        &self.bases
    }

    /// Ancestors in resolution order, not including this class.
    #[must_use]
    pub fn mro(&self) -> &[Arc<Self>] {
        &self.mro
    }

    /// Names along the full resolution order, starting with this class.
    #[must_use]
    pub fn mro_names(&self) -> Vec<&str> {
        std::iter::once(self.name()).chain(self.mro.iter().map(|c| c.name())).collect()
    }

    /// The merged schema, inherited fields included.
    #[must_use]
    pub fn schema(&self) -> &ClassSchema {
        &self.schema
    }

    /// Fields declared directly on this class.
    #[must_use]
    pub fn own_fields(&self) -> &[FieldSpec] {
        &self.own_fields
    }

    /// Field names in schema order.
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        self.schema.names().collect()
    }

    /// Returns true if `other` is this class or one of its ancestors.
    #[must_use]
    pub fn is_subclass_of(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.mro.iter().any(|c| std::ptr::eq(c.as_ref(), other))
    }

    /// Constructs an instance from positional and keyword arguments.
    ///
    /// # Errors
    /// Returns `ArityError`, `UnknownFieldError`, `DuplicateBindingError` or
    /// `MissingFieldError` when the arguments do not bind to the schema.
    pub fn call(self: &Arc<Self>, args: impl Into<ArgValues>) -> RecordResult<Instance> {
        self.call_traced(args, &mut NoopTracer)
    }

    /// Like [`call`](Self::call), reporting each binding to `tracer`.
    ///
    /// # Errors
    /// Same as [`call`](Self::call).
    pub fn call_traced(
        self: &Arc<Self>,
        args: impl Into<ArgValues>,
        tracer: &mut impl RecordTracer,
    ) -> RecordResult<Instance> {
        let slots = signature::bind(&self.name, &self.schema, args.into(), tracer)?;
        tracer.on_constructed(&self.name, slots.len());
        Ok(Instance::from_parts(Arc::clone(self), slots))
    }
}

impl fmt::Debug for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordClass")
            .field("name", &self.name)
            .field("bases", &self.bases.iter().map(|b| b.name()).collect::<Vec<_>>())
            .field("fields", &self.fields())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<class '{}'>", self.name)
    }
}

/// Builder for a [`RecordClass`].
///
/// Bases and fields are recorded in call order; nothing is validated until
/// [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct RecordClassBuilder {
    name: String,
    bases: Vec<Arc<RecordClass>>,
    fields: Vec<FieldSpec>,
    limits: RecordLimits,
}

impl RecordClassBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bases: Vec::new(),
            fields: Vec::new(),
            limits: RecordLimits::default(),
        }
    }

    /// Adds a direct base class.
    #[must_use]
    pub fn base(mut self, base: &Arc<RecordClass>) -> Self {
        self.bases.push(Arc::clone(base));
        self
    }

    /// Declares a required field.
    #[must_use]
    pub fn field(self, name: impl Into<String>) -> Self {
        self.declare(name, None)
    }

    /// Declares a field with a default value.
    #[must_use]
    pub fn field_with_default(self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.declare(name, Some(default.into()))
    }

    /// Declares a field; `default` of `None` makes it required.
    #[must_use]
    pub fn declare(mut self, name: impl Into<String>, default: Option<Value>) -> Self {
        self.fields.push(FieldSpec::new(name, default));
        self
    }

    /// Replaces the limits applied when the class is built.
    #[must_use]
    pub fn limits(mut self, limits: RecordLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Builds the class.
    ///
    /// # Errors
    /// - `DuplicateFieldError` if this body declares a name twice.
    /// - `MroError` if a base is repeated or the bases cannot be linearized.
    /// - `SchemaOrderError` if, under strict ordering, the merged schema puts a
    ///   required field after a defaulted one.
    /// - `LimitError` if a configured limit is exceeded.
    pub fn build(self) -> RecordResult<Arc<RecordClass>> {
        self.build_traced(&mut NoopTracer)
    }

    /// Like [`build`](Self::build), reporting each schema step to `tracer`.
    ///
    /// # Errors
    /// Same as [`build`](Self::build).
    pub fn build_traced(self, tracer: &mut impl RecordTracer) -> RecordResult<Arc<RecordClass>> {
        let Self {
            name,
            bases,
            fields,
            limits,
        } = self;
        tracer.on_schema_start(&name, bases.len());

        let mut seen = AHashSet::with_capacity(fields.len());
        for field in &fields {
            if !seen.insert(field.name()) {
                return Err(ErrorKind::duplicate_field(&name, field.name()));
            }
        }

        let mro = compute_c3_mro(&name, &bases, &limits)?;
        let schema = ClassSchema::merge(&name, mro.iter().map(|c| c.schema()), &fields, &limits, tracer)?;
        tracer.on_schema_built(&name, schema.len());

        Ok(Arc::new(RecordClass {
            name,
            bases,
            mro,
            own_fields: fields,
            schema,
        }))
    }
}

/// Computes the resolution order of a new class from its direct bases, using C3.
///
/// The result excludes the new class itself. A class without bases has an
/// empty resolution order.
///
/// # Errors
/// `MroError` for a repeated base or an inconsistent hierarchy, `LimitError`
/// for a hierarchy deeper or wider than `limits` allows.
fn compute_c3_mro(
    class_name: &str,
    bases: &[Arc<RecordClass>],
    limits: &RecordLimits,
) -> RecordResult<Vec<Arc<RecordClass>>> {
    match bases {
        [] => return Ok(Vec::new()),
        [single] => {
            let mut mro = Vec::with_capacity(single.mro.len() + 1);
            mro.push(Arc::clone(single));
            mro.extend(single.mro.iter().cloned());
            limits.check_inheritance_depth(class_name, mro.len())?;
            limits.check_mro_length(class_name, mro.len())?;
            return Ok(mro);
        }
        _ => {}
    }

    let mut seen = AHashSet::with_capacity(bases.len());
    for base in bases {
        if !seen.insert(Arc::as_ptr(base)) {
            return Err(ErrorKind::mro(format!("duplicate base class {}", base.name())));
        }
    }

    // Each base's full linearization, then the list of bases itself.
    let mut linearizations: Vec<Vec<Arc<RecordClass>>> = Vec::with_capacity(bases.len() + 1);
    for base in bases {
        let mut lin = Vec::with_capacity(base.mro.len() + 1);
        lin.push(Arc::clone(base));
        lin.extend(base.mro.iter().cloned());
        limits.check_inheritance_depth(class_name, lin.len())?;
        lin.reverse();
        linearizations.push(lin);
    }
    let mut base_list = bases.to_vec();
    base_list.reverse();
    linearizations.push(base_list);

    // Lists are stored reversed so the head is popped from the end.
    let mut result: Vec<Arc<RecordClass>> = Vec::new();
    loop {
        linearizations.retain(|l| !l.is_empty());
        if linearizations.is_empty() {
            break;
        }

        // A good head appears in no list's tail.
        let found = linearizations.iter().find_map(|lin| {
            let candidate = lin.last()?;
            let in_tail = linearizations
                .iter()
                .any(|other| other[..other.len() - 1].iter().any(|c| Arc::ptr_eq(c, candidate)));
            (!in_tail).then(|| Arc::clone(candidate))
        });

        let Some(next) = found else {
            let names: Vec<&str> = bases.iter().map(|b| b.name()).collect();
            return Err(ErrorKind::mro(format!(
                "Cannot create a consistent method resolution order (MRO) for bases {}",
                names.join(", ")
            )));
        };

        for lin in &mut linearizations {
            if lin.last().is_some_and(|head| Arc::ptr_eq(head, &next)) {
                lin.pop();
            }
        }
        result.push(next);
        limits.check_mro_length(class_name, result.len())?;
    }

    Ok(result)
}
