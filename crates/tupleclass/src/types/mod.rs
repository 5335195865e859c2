//! Record type machinery.
//!
//! This module contains the field schema builder (`schema`), the class objects it
//! attaches schemas to (`class`), the instances those classes materialize
//! (`instance`), and the tuple capability shared by records and plain tuples
//! (`sequence`).
pub mod class;
pub mod instance;
pub mod schema;
pub mod sequence;
pub mod r#type;

pub use class::{RecordClass, RecordClassBuilder};
pub use instance::Instance;
pub use schema::{ClassSchema, FieldSpec};
pub use sequence::{SeqIter, SequenceLike};
pub(crate) use sequence::tuple_repr_fmt;
pub use r#type::Type;
