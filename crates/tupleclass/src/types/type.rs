use std::fmt;

use strum::EnumString;

/// Represents the builtin type of a value.
///
/// `Record` is the runtime tag every record instance carries. It is not a
/// nominal subclass of `Tuple`, but [`Type::is_instance_of`] reports it as one,
/// which is how records pass `isinstance(x, tuple)` checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, serde::Serialize, serde::Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum Type {
    Object,
    #[strum(serialize = "NoneType")]
    NoneType,
    Bool,
    Int,
    Float,
    Str,
    List,
    Tuple,
    /// Runtime type tag for record instances.
    ///
    /// Disabled for `EnumString` because `record` is not a builtin name.
    #[strum(disabled)]
    Record,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Type {
    /// Returns the Python name of the type, as `type(x).__name__` would.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::NoneType => "NoneType",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::List => "list",
            Self::Tuple => "tuple",
            Self::Record => "record",
        }
    }

    /// Checks if a value of type `self` is an instance of `other`.
    ///
    /// This handles the subtype relationships that matter here:
    /// - everything is an instance of `object`
    /// - `bool` is a subtype of `int`
    /// - records are a subtype of `tuple`
    #[must_use]
    pub fn is_instance_of(self, other: Self) -> bool {
        self == other
            || other == Self::Object
            || (self == Self::Bool && other == Self::Int)
            || (self == Self::Record && other == Self::Tuple)
    }
}
