use std::{
    cmp::Ordering,
    fmt::{self, Write},
};

use crate::types::{Instance, SequenceLike, Type, tuple_repr_fmt};

/// A dynamically typed value held in a record field.
///
/// Values own all their data and can be freely cloned. Equality and ordering
/// follow tuple semantics: a [`Value::Record`] compares equal to a
/// [`Value::Tuple`] (or another record of any class) holding the same items.
///
/// # Serialization
///
/// Values serialize with serde's externally tagged format. Records serialize as
/// `{"class": ..., "fields": {...}}`; there is no deserialization, as a record
/// cannot be rebuilt without its class.
#[derive(Debug, Clone, serde::Serialize)]
pub enum Value {
    /// Python's `None` singleton.
    None,
    /// Python boolean (`True` or `False`).
    Bool(bool),
    /// Python integer (64-bit signed).
    Int(i64),
    /// Python float (64-bit IEEE 754).
    Float(f64),
    /// Python string (UTF-8).
    String(String),
    /// Python list (mutable sequence).
    List(Vec<Self>),
    /// Python tuple (immutable sequence).
    Tuple(Vec<Self>),
    /// An instance of a record class.
    Record(Instance),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            _ => self.repr_fmt(f),
        }
    }
}

impl Value {
    /// Creates a tuple value from anything convertible to values.
    pub fn tuple<T: Into<Self>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Creates a list value from anything convertible to values.
    pub fn list<T: Into<Self>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Returns the builtin type of this value.
    #[must_use]
    pub fn py_type(&self) -> Type {
        match self {
            Self::None => Type::NoneType,
            Self::Bool(_) => Type::Bool,
            Self::Int(_) => Type::Int,
            Self::Float(_) => Type::Float,
            Self::String(_) => Type::Str,
            Self::List(_) => Type::List,
            Self::Tuple(_) => Type::Tuple,
            Self::Record(_) => Type::Record,
        }
    }

    /// Returns the tuple view of this value, if it has one.
    ///
    /// Plain tuples and records both qualify. Lists are sequences but not
    /// members of the tuple family, so they return `None`.
    #[must_use]
    pub fn as_tuple_like(&self) -> Option<&dyn SequenceLike> {
        match self {
            Self::Tuple(items) => Some(items as &dyn SequenceLike),
            Self::Record(instance) => Some(instance as &dyn SequenceLike),
            _ => None,
        }
    }

    /// Returns the record held by this value, if any.
    #[must_use]
    pub fn as_record(&self) -> Option<&Instance> {
        match self {
            Self::Record(instance) => Some(instance),
            _ => None,
        }
    }

    /// Returns the Python truth value.
    ///
    /// Records are truthy when they have at least one field, like tuples.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::None => false,
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::List(items) | Self::Tuple(items) => !items.is_empty(),
            Self::Record(instance) => !instance.is_empty(),
        }
    }

    /// Returns the Python `repr()` of this value.
    #[must_use]
    pub fn py_repr(&self) -> String {
        let mut s = String::new();
        // writing to a String never fails
        let _ = self.repr_fmt(&mut s);
        s
    }

    pub(crate) fn repr_fmt(&self, f: &mut impl Write) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => float_repr_fmt(*v, f),
            Self::String(s) => string_repr_fmt(s, f),
            Self::List(items) => {
                f.write_char('[')?;
                let mut iter = items.iter();
                if let Some(first) = iter.next() {
                    first.repr_fmt(f)?;
                    for item in iter {
                        f.write_str(", ")?;
                        item.repr_fmt(f)?;
                    }
                }
                f.write_char(']')
            }
            Self::Tuple(items) => tuple_repr_fmt(items, f),
            Self::Record(instance) => instance.repr_fmt(f),
        }
    }

    /// Compares two values the way Python's `<` family does.
    ///
    /// Returns `None` for unorderable pairs (e.g. `str` vs `int`, or NaN).
    #[must_use]
    pub fn py_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Bool(a), Self::Int(b)) => Some(i64::from(*a).cmp(b)),
            (Self::Int(a), Self::Bool(b)) => Some(a.cmp(&i64::from(*b))),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Int(a), Self::Float(b)) => int_float_cmp(*a, *b),
            (Self::Float(a), Self::Int(b)) => int_float_cmp(*b, *a).map(Ordering::reverse),
            (Self::Bool(a), Self::Float(b)) => int_float_cmp(i64::from(*a), *b),
            (Self::Float(a), Self::Bool(b)) => int_float_cmp(i64::from(*b), *a).map(Ordering::reverse),
            (Self::String(a), Self::String(b)) => Some(a.cmp(b)),
            (Self::List(a), Self::List(b)) => a.seq_cmp(b),
            _ => match (self.as_tuple_like(), other.as_tuple_like()) {
                (Some(a), Some(b)) => a.seq_cmp(b),
                _ => None,
            },
        }
    }
}

impl PartialEq for Value {
    #[expect(clippy::float_cmp, reason = "Python equality is exact IEEE comparison")]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            // bool is a subtype of int
            (Self::Bool(a), Self::Int(b)) | (Self::Int(b), Self::Bool(a)) => i64::from(*a) == *b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => {
                int_float_cmp(*a, *b) == Some(Ordering::Equal)
            }
            (Self::Bool(a), Self::Float(b)) | (Self::Float(b), Self::Bool(a)) => {
                int_float_cmp(i64::from(*a), *b) == Some(Ordering::Equal)
            }
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            _ => match (self.as_tuple_like(), other.as_tuple_like()) {
                (Some(a), Some(b)) => a.seq_eq(b),
                _ => false,
            },
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.py_cmp(other)
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Self::String(s) if s == other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        *self == Self::Int(*other)
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        *self == Self::Float(*other)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Instance> for Value {
    fn from(value: Instance) -> Self {
        Self::Record(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

/// Compares an int with a float exactly, without rounding the int to `f64`.
///
/// Returns `None` when `b` is NaN.
#[expect(clippy::cast_possible_truncation, reason = "b is truncated and range-checked first")]
fn int_float_cmp(a: i64, b: f64) -> Option<Ordering> {
    // 2**63, the first float above i64::MAX
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
    if b.is_nan() {
        return None;
    }
    if b >= I64_BOUND {
        return Some(Ordering::Less);
    }
    if b < -I64_BOUND {
        return Some(Ordering::Greater);
    }
    let whole = b.trunc();
    match a.cmp(&(whole as i64)) {
        Ordering::Equal => (0.0).partial_cmp(&(b - whole)),
        unequal => Some(unequal),
    }
}

/// Writes a float the way CPython's `repr()` does.
///
/// `ryu` supplies the shortest digits that round-trip through `f64`; the layout
/// is then CPython's: positional notation for decimal exponents in `-4..16`,
/// otherwise scientific with a signed, at least two digit exponent.
fn float_repr_fmt(v: f64, f: &mut impl Write) -> fmt::Result {
    if v.is_nan() {
        return f.write_str("nan");
    }
    if v.is_infinite() {
        return f.write_str(if v > 0.0 { "inf" } else { "-inf" });
    }

    let mut buffer = ryu::Buffer::new();
    let formatted = buffer.format_finite(v);
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    f.write_str(sign)?;

    let (digits, exp) = ryu_digits(unsigned);
    if digits.is_empty() {
        return f.write_str("0.0");
    }

    if (-4..16).contains(&exp) {
        match usize::try_from(exp) {
            Ok(exp) => {
                let int_len = exp + 1;
                if digits.len() <= int_len {
                    f.write_str(&digits)?;
                    for _ in digits.len()..int_len {
                        f.write_char('0')?;
                    }
                    f.write_str(".0")
                } else {
                    let (int_part, frac_part) = digits.split_at(int_len);
                    write!(f, "{int_part}.{frac_part}")
                }
            }
            Err(_) => {
                f.write_str("0.")?;
                for _ in 1..exp.unsigned_abs() {
                    f.write_char('0')?;
                }
                f.write_str(&digits)
            }
        }
    } else {
        let (first, rest) = digits.split_at(1);
        f.write_str(first)?;
        if !rest.is_empty() {
            write!(f, ".{rest}")?;
        }
        let exp_sign = if exp < 0 { '-' } else { '+' };
        write!(f, "e{exp_sign}{:02}", exp.unsigned_abs())
    }
}

/// Splits ryu output (`"123.45"`, `"0.0001"`, `"1.5e-7"`) into its significant
/// digits and the decimal exponent of the first of them.
///
/// Zero yields no digits.
fn ryu_digits(s: &str) -> (String, i32) {
    let (mantissa, exp) = match s.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse::<i32>().unwrap_or(0)),
        None => (s, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all: String = int_part.chars().chain(frac_part.chars()).collect();
    let significant = all.trim_start_matches('0');
    let leading_zeros = all.len() - significant.len();
    let digits = significant.trim_end_matches('0').to_owned();
    let int_len = i32::try_from(int_part.len()).unwrap_or(i32::MAX);
    let leading_zeros = i32::try_from(leading_zeros).unwrap_or(i32::MAX);
    (digits, int_len - 1 - leading_zeros + exp)
}

/// Writes a Python string literal, preferring single quotes like CPython.
pub(crate) fn string_repr_fmt(s: &str, f: &mut impl Write) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    f.write_char(quote)?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => {
                f.write_char('\\')?;
                f.write_char(c)?;
            }
            c if c.is_control() => write!(f, "\\x{:02x}", u32::from(c))?,
            c => f.write_char(c)?,
        }
    }
    f.write_char(quote)
}

/// Error returned when a `Value` cannot be converted to the requested Rust type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionError {
    /// The type name that was expected (e.g., "int", "str").
    pub expected: &'static str,
    /// The actual type of the `Value`.
    pub actual: Type,
}

impl ConversionError {
    #[must_use]
    pub fn new(expected: &'static str, actual: Type) -> Self {
        Self { expected, actual }
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, got {}", self.expected, self.actual)
    }
}

impl std::error::Error for ConversionError {}

impl TryFrom<&Value> for i64 {
    type Error = ConversionError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(i) => Ok(*i),
            Value::Bool(b) => Ok(Self::from(*b)),
            other => Err(ConversionError::new("int", other.py_type())),
        }
    }
}

impl TryFrom<&Value> for f64 {
    type Error = ConversionError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Float(f) => Ok(*f),
            Value::Int(i) => Ok(*i as Self),
            other => Err(ConversionError::new("float", other.py_type())),
        }
    }
}

impl TryFrom<&Value> for String {
    type Error = ConversionError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(ConversionError::new("str", other.py_type())),
        }
    }
}

impl TryFrom<&Value> for bool {
    type Error = ConversionError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(ConversionError::new("bool", other.py_type())),
        }
    }
}
