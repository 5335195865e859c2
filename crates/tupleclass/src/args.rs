use std::vec::IntoIter;

use indexmap::IndexMap;

use crate::value::Value;

/// Arguments passed to a record constructor.
///
/// Uses specific variants for the common cases (0-2 positional arguments, no
/// keywords) so small records are built without an argument vector. Keyword
/// arguments keep their call order and are not deduplicated, so a name given
/// twice reaches the binder and is reported there.
///
/// The [`args!`](crate::args) macro builds these with call-site syntax.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ArgValues {
    #[default]
    Empty,
    One(Value),
    Two(Value, Value),
    Kwargs(KwargsValues),
    ArgsKargs { args: Vec<Value>, kwargs: KwargsValues },
}

impl ArgValues {
    /// Packs positional and keyword arguments into the most compact variant.
    #[must_use]
    pub fn new(args: Vec<Value>, kwargs: KwargsValues) -> Self {
        if !kwargs.is_empty() {
            return if args.is_empty() {
                Self::Kwargs(kwargs)
            } else {
                Self::ArgsKargs { args, kwargs }
            };
        }
        let mut iter = args.into_iter();
        match (iter.next(), iter.next(), iter.next()) {
            (None, _, _) => Self::Empty,
            (Some(a), None, _) => Self::One(a),
            (Some(a), Some(b), None) => Self::Two(a, b),
            (Some(a), Some(b), Some(c)) => {
                let mut args = Vec::with_capacity(iter.len() + 3);
                args.extend([a, b, c]);
                args.extend(iter);
                Self::ArgsKargs {
                    args,
                    kwargs: KwargsValues::Empty,
                }
            }
        }
    }

    /// Positional arguments only.
    pub fn from_positional<T: Into<Value>>(args: impl IntoIterator<Item = T>) -> Self {
        Self::new(args.into_iter().map(Into::into).collect(), KwargsValues::Empty)
    }

    /// Appends a positional argument. Positional arguments always precede keywords.
    #[must_use]
    pub fn arg(self, value: impl Into<Value>) -> Self {
        let (args, kwargs) = self.into_parts();
        let mut args: Vec<Value> = args.collect();
        args.push(value.into());
        Self::new(args, kwargs)
    }

    /// Appends a keyword argument.
    #[must_use]
    pub fn kwarg(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let (args, mut kwargs) = self.into_parts();
        kwargs.push(name, value);
        Self::new(args.collect(), kwargs)
    }

    /// Number of positional arguments.
    #[must_use]
    pub fn positional_count(&self) -> usize {
        match self {
            Self::Empty | Self::Kwargs(_) => 0,
            Self::One(_) => 1,
            Self::Two(_, _) => 2,
            Self::ArgsKargs { args, .. } => args.len(),
        }
    }

    /// Total number of arguments, positional and keyword.
    #[must_use]
    pub fn count(&self) -> usize {
        self.positional_count() + self.kwargs_len()
    }

    fn kwargs_len(&self) -> usize {
        match self {
            Self::Kwargs(kwargs) | Self::ArgsKargs { kwargs, .. } => kwargs.len(),
            _ => 0,
        }
    }

    /// Splits into an iterator over the positional values and the keyword arguments.
    #[must_use]
    pub fn into_parts(self) -> (ArgPosIter, KwargsValues) {
        match self {
            Self::Empty => (ArgPosIter::Empty, KwargsValues::Empty),
            Self::One(v) => (ArgPosIter::One(Some(v)), KwargsValues::Empty),
            Self::Two(v1, v2) => (ArgPosIter::Two(Some(v1), Some(v2)), KwargsValues::Empty),
            Self::Kwargs(kwargs) => (ArgPosIter::Empty, kwargs),
            Self::ArgsKargs { args, kwargs } => (ArgPosIter::Vec(args.into_iter()), kwargs),
        }
    }
}

impl From<Vec<Value>> for ArgValues {
    fn from(args: Vec<Value>) -> Self {
        Self::new(args, KwargsValues::Empty)
    }
}

impl From<KwargsValues> for ArgValues {
    fn from(kwargs: KwargsValues) -> Self {
        Self::new(Vec::new(), kwargs)
    }
}

impl From<()> for ArgValues {
    fn from((): ()) -> Self {
        Self::Empty
    }
}

/// Iterator over positional arguments, yielding them by value.
#[derive(Debug)]
pub enum ArgPosIter {
    Empty,
    One(Option<Value>),
    Two(Option<Value>, Option<Value>),
    Vec(IntoIter<Value>),
}

impl Iterator for ArgPosIter {
    type Item = Value;

    #[inline]
    fn next(&mut self) -> Option<Value> {
        match self {
            Self::Empty => None,
            Self::One(v) => v.take(),
            Self::Two(v1, v2) => v1.take().or_else(|| v2.take()),
            Self::Vec(iter) => iter.next(),
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Empty => (0, Some(0)),
            Self::One(v) => {
                let n = usize::from(v.is_some());
                (n, Some(n))
            }
            Self::Two(v1, v2) => {
                let n = usize::from(v1.is_some()) + usize::from(v2.is_some());
                (n, Some(n))
            }
            Self::Vec(iter) => iter.size_hint(),
        }
    }
}

impl ExactSizeIterator for ArgPosIter {}

/// Keyword arguments, in call order.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum KwargsValues {
    #[default]
    Empty,
    /// Keywords written at the call site; may repeat a name.
    Inline(Vec<(String, Value)>),
    /// Keywords taken from an existing mapping; names are unique.
    Map(IndexMap<String, Value>),
}

impl KwargsValues {
    /// Returns the number of keyword arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Inline(kvs) => kvs.len(),
            Self::Map(map) => map.len(),
        }
    }

    /// Returns true if there are no keyword arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a keyword argument, keeping any earlier one with the same name.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let entry = (name.into(), value.into());
        match self {
            Self::Empty => *self = Self::Inline(vec![entry]),
            Self::Inline(kvs) => kvs.push(entry),
            Self::Map(map) => {
                let mut kvs: Vec<(String, Value)> = std::mem::take(map).into_iter().collect();
                kvs.push(entry);
                *self = Self::Inline(kvs);
            }
        }
    }
}

impl IntoIterator for KwargsValues {
    type Item = (String, Value);
    type IntoIter = KwargsValuesIter;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            Self::Empty => KwargsValuesIter::Empty,
            Self::Inline(kvs) => KwargsValuesIter::Inline(kvs.into_iter()),
            Self::Map(map) => KwargsValuesIter::Map(map.into_iter()),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for KwargsValues {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let kvs: Vec<(String, Value)> = iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        if kvs.is_empty() { Self::Empty } else { Self::Inline(kvs) }
    }
}

impl From<IndexMap<String, Value>> for KwargsValues {
    fn from(map: IndexMap<String, Value>) -> Self {
        if map.is_empty() { Self::Empty } else { Self::Map(map) }
    }
}

/// Iterator over keyword arguments, yielding `(name, value)` pairs by value.
#[derive(Debug)]
pub enum KwargsValuesIter {
    Empty,
    Inline(IntoIter<(String, Value)>),
    Map(indexmap::map::IntoIter<String, Value>),
}

impl Iterator for KwargsValuesIter {
    type Item = (String, Value);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Empty => None,
            Self::Inline(iter) => iter.next(),
            Self::Map(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Empty => (0, Some(0)),
            Self::Inline(iter) => iter.size_hint(),
            Self::Map(iter) => iter.size_hint(),
        }
    }
}

impl ExactSizeIterator for KwargsValuesIter {}
