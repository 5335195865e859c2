//! The ordered-sequence capability shared by tuples and records.
//!
//! Identity queries ("is this a tuple?") are answered by checking for this
//! capability rather than for tuple storage. A record is a mutable struct that
//! also implements [`SequenceLike`]; it never becomes a real tuple, and the
//! read-only view here does not make its fields immutable.

use std::{
    cmp::Ordering,
    fmt::{self, Write},
    iter::FusedIterator,
};

use crate::{
    exception::{ErrorKind, RecordResult},
    value::Value,
};

/// Read-only, ordered, fixed-length access to a sequence of values.
///
/// Only `seq_len` and `seq_get` need implementing; everything else is derived.
/// The trait is object safe so heterogeneous sequences (a record and a plain
/// tuple, say) can be compared through `&dyn SequenceLike`.
pub trait SequenceLike {
    /// Number of items.
    fn seq_len(&self) -> usize;

    /// Item at `index`, or `None` past the end.
    fn seq_get(&self, index: usize) -> Option<&Value>;

    fn seq_is_empty(&self) -> bool {
        self.seq_len() == 0
    }

    /// Returns a fresh iterator starting at position 0.
    fn seq_iter(&self) -> SeqIter<'_>
    where
        Self: Sized,
    {
        SeqIter::new(self)
    }

    /// Clones the items into a vector, in order.
    fn seq_to_vec(&self) -> Vec<Value> {
        (0..self.seq_len()).filter_map(|i| self.seq_get(i)).cloned().collect()
    }

    /// Tuple-style structural equality: same length and pairwise equal items.
    fn seq_eq(&self, other: &dyn SequenceLike) -> bool {
        let len = self.seq_len();
        len == other.seq_len() && (0..len).all(|i| self.seq_get(i) == other.seq_get(i))
    }

    /// Tuple-style lexicographic ordering.
    ///
    /// The first unequal pair decides; if one sequence is a prefix of the other,
    /// the shorter one sorts first.
    fn seq_cmp(&self, other: &dyn SequenceLike) -> Option<Ordering> {
        let shared = self.seq_len().min(other.seq_len());
        for i in 0..shared {
            if let (Some(a), Some(b)) = (self.seq_get(i), other.seq_get(i))
                && a != b
            {
                return a.py_cmp(b);
            }
        }
        Some(self.seq_len().cmp(&other.seq_len()))
    }

    /// Unpacks into exactly `targets` values.
    ///
    /// Fails with `UnpackArityError` when the count differs from the length.
    fn unpack_exact(&self, targets: usize) -> RecordResult<Vec<Value>> {
        let len = self.seq_len();
        if len != targets {
            return Err(ErrorKind::unpack_arity(targets, len));
        }
        Ok(self.seq_to_vec())
    }
}

impl SequenceLike for Vec<Value> {
    fn seq_len(&self) -> usize {
        self.len()
    }

    fn seq_get(&self, index: usize) -> Option<&Value> {
        self.get(index)
    }
}

/// Lazy iterator over a [`SequenceLike`], reading each slot as it is reached.
#[derive(Clone)]
pub struct SeqIter<'a> {
    seq: &'a dyn SequenceLike,
    front: usize,
    back: usize,
}

impl<'a> SeqIter<'a> {
    #[must_use]
    pub fn new(seq: &'a dyn SequenceLike) -> Self {
        Self {
            seq,
            front: 0,
            back: seq.seq_len(),
        }
    }
}

impl fmt::Debug for SeqIter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeqIter")
            .field("front", &self.front)
            .field("back", &self.back)
            .finish_non_exhaustive()
    }
}

impl<'a> Iterator for SeqIter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = self.seq.seq_get(self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for SeqIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.seq.seq_get(self.back)
    }
}

impl ExactSizeIterator for SeqIter<'_> {}

impl FusedIterator for SeqIter<'_> {}

/// Writes `(a, b)`, or `(a,)` for a single item, like a Python tuple repr.
pub(crate) fn tuple_repr_fmt(seq: &dyn SequenceLike, f: &mut impl Write) -> fmt::Result {
    f.write_char('(')?;
    let len = seq.seq_len();
    for (i, item) in SeqIter::new(seq).enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        item.repr_fmt(f)?;
    }
    if len == 1 {
        f.write_char(',')?;
    }
    f.write_char(')')
}
