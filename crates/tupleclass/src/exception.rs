use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Result type alias for operations that can fail while defining a record class
/// or while constructing, reading or unpacking a record.
pub type RecordResult<T> = Result<T, RecordError>;

/// Kinds of failure the record machinery can report.
///
/// Uses strum derives for automatic `Display`, `FromStr`, and `Into<&'static str>` implementations.
/// The string representation matches the variant name exactly (e.g., `ArityError` -> "ArityError").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize, Deserialize)]
pub enum ErrorKind {
    // --- definition-time ---
    /// A field without a default follows a default-bearing field in the merged schema.
    SchemaOrderError,
    /// The same field name is declared twice in one class body.
    DuplicateFieldError,
    /// The bases cannot be linearized into a consistent resolution order.
    MroError,
    /// A configured [`RecordLimits`](crate::RecordLimits) bound was exceeded.
    LimitError,

    // --- call-time ---
    /// A field resolved to no value during construction.
    MissingFieldError,
    /// A field was bound both positionally and by name, or twice by name.
    DuplicateBindingError,
    /// More positional arguments than fields.
    ArityError,
    /// A keyword argument or attribute name that is not part of the schema.
    UnknownFieldError,
    /// A position outside the record.
    IndexError,
    /// Unpack target count does not match the field count.
    UnpackArityError,
}

impl ErrorKind {
    /// Returns true for errors raised while defining a class, false for errors
    /// raised by operations on an already defined class or its instances.
    #[must_use]
    pub fn is_definition_error(self) -> bool {
        matches!(
            self,
            Self::SchemaOrderError | Self::DuplicateFieldError | Self::MroError | Self::LimitError
        )
    }

    /// Creates a SchemaOrderError for `field` following the default-bearing `after`.
    #[must_use]
    pub(crate) fn schema_order(class_name: &str, field: &str, after: &str) -> RecordError {
        RecordError::new_msg(
            Self::SchemaOrderError,
            format!("{class_name}: non-default field '{field}' follows default field '{after}'"),
        )
    }

    #[must_use]
    pub(crate) fn duplicate_field(class_name: &str, field: &str) -> RecordError {
        RecordError::new_msg(
            Self::DuplicateFieldError,
            format!("{class_name}: field '{field}' is declared more than once"),
        )
    }

    #[must_use]
    pub(crate) fn mro(msg: impl fmt::Display) -> RecordError {
        RecordError::new_msg(Self::MroError, msg)
    }

    #[must_use]
    pub(crate) fn limit(msg: impl fmt::Display) -> RecordError {
        RecordError::new_msg(Self::LimitError, msg)
    }

    /// Creates a MissingFieldError naming the unbound field and its position.
    #[must_use]
    pub(crate) fn missing_field(class_name: &str, field: &str, position: usize) -> RecordError {
        RecordError::new_msg(
            Self::MissingFieldError,
            format!("{class_name}() missing required argument '{field}' (position {position})"),
        )
    }

    /// Creates a DuplicateBindingError.
    ///
    /// Matches CPython's format: `f() got multiple values for argument 'x'`
    #[must_use]
    pub(crate) fn duplicate_binding(class_name: &str, field: &str) -> RecordError {
        RecordError::new_msg(
            Self::DuplicateBindingError,
            format!("{class_name}() got multiple values for argument '{field}'"),
        )
    }

    /// Creates an ArityError for too many positional arguments.
    #[must_use]
    pub(crate) fn arity(class_name: &str, max: usize, given: usize) -> RecordError {
        let plural = if max == 1 { "" } else { "s" };
        let verb = if given == 1 { "was" } else { "were" };
        RecordError::new_msg(
            Self::ArityError,
            format!("{class_name}() takes at most {max} positional argument{plural} but {given} {verb} given"),
        )
    }

    #[must_use]
    pub(crate) fn unexpected_keyword(class_name: &str, name: &str) -> RecordError {
        RecordError::new_msg(
            Self::UnknownFieldError,
            format!("{class_name}() got an unexpected keyword argument '{name}'"),
        )
    }

    /// Matches CPython's format: `'Point' object has no attribute 'z'`
    #[must_use]
    pub(crate) fn unknown_attribute(class_name: &str, name: &str) -> RecordError {
        RecordError::new_msg(
            Self::UnknownFieldError,
            format!("'{class_name}' object has no attribute '{name}'"),
        )
    }

    #[must_use]
    pub(crate) fn index_out_of_range() -> RecordError {
        RecordError::new_msg(Self::IndexError, "tuple index out of range")
    }

    /// Creates an UnpackArityError with CPython's wording for either direction.
    #[must_use]
    pub(crate) fn unpack_arity(expected: usize, got: usize) -> RecordError {
        let msg = if got > expected {
            format!("too many values to unpack (expected {expected}, got {got})")
        } else {
            format!("not enough values to unpack (expected {expected}, got {got})")
        };
        RecordError::new_msg(Self::UnpackArityError, msg)
    }
}

/// An error raised by the record machinery: a kind plus an optional message.
///
/// Errors are always reported synchronously by the operation that detected them;
/// nothing is retried and no partially built class or instance escapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordError {
    kind: ErrorKind,
    message: Option<String>,
}

impl RecordError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: Option<String>) -> Self {
        Self { kind, message }
    }

    #[must_use]
    pub fn new_msg(kind: ErrorKind, message: impl fmt::Display) -> Self {
        Self::new(kind, Some(message.to_string()))
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Consumes the error, returning its message.
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        self.message
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}: {msg}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for RecordError {}

impl From<ErrorKind> for RecordError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind, None)
    }
}
