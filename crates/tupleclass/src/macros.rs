//! Declarative shorthands for building classes and argument lists.

/// Builds an [`ArgValues`](crate::ArgValues) from call-site syntax.
///
/// Positional arguments come first, then keyword arguments after a `;`:
///
/// ```
/// use tupleclass::{ArgValues, args};
///
/// assert_eq!(args![], ArgValues::Empty);
/// assert_eq!(args![1, 2].positional_count(), 2);
/// assert_eq!(args![1; y = "hi"].count(), 2);
/// assert_eq!(args![; x = 1, y = 2].positional_count(), 0);
/// ```
#[macro_export]
macro_rules! args {
    (; $($key:ident = $value:expr),+ $(,)?) => {
        $crate::ArgValues::from(
            [$((stringify!($key), $crate::Value::from($value))),+]
                .into_iter()
                .collect::<$crate::KwargsValues>(),
        )
    };
    ($($arg:expr),+ ; $($key:ident = $value:expr),+ $(,)?) => {
        $crate::ArgValues::new(
            vec![$($crate::Value::from($arg)),+],
            [$((stringify!($key), $crate::Value::from($value))),+]
                .into_iter()
                .collect::<$crate::KwargsValues>(),
        )
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::ArgValues::from(vec![$($crate::Value::from($arg)),+])
    };
    () => {
        $crate::ArgValues::Empty
    };
}

/// Defines a record class from a literal declaration.
///
/// Fields without `= default` are required. Bases go in parentheses after the
/// name and are evaluated as `Arc<RecordClass>` expressions. Expands to
/// [`RecordClassBuilder::build`](crate::RecordClassBuilder::build), so the
/// result is a `RecordResult<Arc<RecordClass>>`.
///
/// ```
/// use tupleclass::{args, record_class};
///
/// let a = record_class!(A { a = "a" })?;
/// let b = record_class!(B(a) { b = "b" })?;
/// let inst = b.call(args![])?;
/// assert_eq!(inst.to_string(), "B('a', 'b')");
/// # Ok::<(), tupleclass::RecordError>(())
/// ```
#[macro_export]
macro_rules! record_class {
    (@default) => {
        None
    };
    (@default $default:expr) => {
        Some($crate::Value::from($default))
    };
    ($name:ident $(( $($base:expr),+ $(,)? ))? { $($field:ident $(= $default:expr)?),* $(,)? }) => {
        $crate::RecordClass::builder(stringify!($name))
            $($(.base(&$base))+)?
            $(.declare(stringify!($field), $crate::record_class!(@default $($default)?)))*
            .build()
    };
}
