//! Binding constructor arguments to a record schema.

use smallvec::SmallVec;

use crate::{
    args::{ArgValues, KwargsValues},
    exception::{ErrorKind, RecordResult},
    tracer::{BindSource, RecordTracer},
    types::ClassSchema,
    value::Value,
};

/// Binds `args` to the fields of `schema`, returning one value per field in schema order.
///
/// Each field takes, in priority order, the positional argument at its index,
/// the keyword argument with its name, or a fresh clone of its default.
///
/// # Errors
/// - `ArityError` if there are more positional arguments than fields.
/// - `UnknownFieldError` for a keyword that names no field.
/// - `DuplicateBindingError` if a field is given both positionally and by
///   keyword, or by the same keyword twice.
/// - `MissingFieldError` for the first field left without a value.
pub(crate) fn bind(
    class_name: &str,
    schema: &ClassSchema,
    args: ArgValues,
    tracer: &mut impl RecordTracer,
) -> RecordResult<Vec<Value>> {
    let field_count = schema.len();
    let positional_count = args.positional_count();
    if positional_count > field_count {
        return Err(ErrorKind::arity(class_name, field_count, positional_count));
    }

    let (positional, kwargs) = args.into_parts();

    // Fast path: every field supplied positionally.
    if positional_count == field_count && kwargs.is_empty() {
        let values: Vec<Value> = positional.collect();
        for (position, field) in schema.iter().enumerate() {
            tracer.on_field_bound(class_name, field.name(), position, BindSource::Positional);
        }
        return Ok(values);
    }

    let mut slots: SmallVec<[Option<(Value, BindSource)>; 8]> = SmallVec::with_capacity(field_count);
    slots.extend(positional.map(|value| Some((value, BindSource::Positional))));
    slots.resize(field_count, None);

    bind_keywords(class_name, schema, kwargs, &mut slots)?;

    // Resolve every slot before reporting any binding.
    let mut resolved: SmallVec<[(Value, BindSource); 8]> = SmallVec::with_capacity(field_count);
    for ((position, field), slot) in schema.iter().enumerate().zip(slots) {
        let bound = match slot {
            Some(bound) => bound,
            None => match field.default_value() {
                Some(default) => (default.clone(), BindSource::Default),
                None => return Err(ErrorKind::missing_field(class_name, field.name(), position)),
            },
        };
        resolved.push(bound);
    }

    let mut values = Vec::with_capacity(field_count);
    for ((position, field), (value, source)) in schema.iter().enumerate().zip(resolved) {
        tracer.on_field_bound(class_name, field.name(), position, source);
        values.push(value);
    }
    Ok(values)
}

fn bind_keywords(
    class_name: &str,
    schema: &ClassSchema,
    kwargs: KwargsValues,
    slots: &mut [Option<(Value, BindSource)>],
) -> RecordResult<()> {
    for (name, value) in kwargs {
        let Some(position) = schema.position(&name) else {
            return Err(ErrorKind::unexpected_keyword(class_name, &name));
        };
        let slot = &mut slots[position];
        if slot.is_some() {
            return Err(ErrorKind::duplicate_binding(class_name, &name));
        }
        *slot = Some((value, BindSource::Keyword));
    }
    Ok(())
}
