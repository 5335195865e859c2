//! Identity queries over values and record classes.
//!
//! These mirror Python's `isinstance()` and `issubclass()` builtins, restricted
//! to the builtin types in [`Type`](crate::Type) and to record classes.

mod isinstance;

pub use isinstance::{ClassInfo, isinstance, issubclass};
