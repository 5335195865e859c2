use serde::{Deserialize, Serialize};

use crate::exception::{ErrorKind, RecordResult};

/// Maximum depth of single-path inheritance chains.
///
/// Prevents pathological hierarchies (e.g., 10000 levels) from making schema
/// merging and C3 linearization quadratic in practice. A limit of 1000 is
/// sufficient for any practical record hierarchy.
pub const MAX_INHERITANCE_DEPTH: usize = 1000;

/// Maximum length of the resolution order computed for any class.
///
/// Limits the output of C3 linearization so diamond-heavy hierarchies cannot
/// consume excessive memory or CPU.
pub const MAX_MRO_LENGTH: usize = 2600;

/// How the schema builder treats a required field that follows a defaulted one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultOrder {
    /// Reject the class with `SchemaOrderError`.
    #[default]
    Strict,
    /// Accept the class. The late required field must then be supplied by name
    /// or by a positional list long enough to reach it.
    Lenient,
}

/// Configuration applied when a record class is defined.
///
/// Use `RecordLimits::default()` for the standard limits, or adjust them with
/// the builder methods. The struct deserializes with missing keys falling back
/// to the defaults, so partial config documents are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordLimits {
    /// Maximum number of fields in a merged schema. `None` disables the check.
    pub max_fields: Option<usize>,
    /// Maximum length of any base's linearization.
    pub max_inheritance_depth: usize,
    /// Maximum length of the computed resolution order.
    pub max_mro_length: usize,
    /// Whether required-after-default field orders are rejected.
    pub default_order: DefaultOrder,
}

impl Default for RecordLimits {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordLimits {
    /// Creates limits with no field cap and the standard hierarchy bounds.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_fields: None,
            max_inheritance_depth: MAX_INHERITANCE_DEPTH,
            max_mro_length: MAX_MRO_LENGTH,
            default_order: DefaultOrder::Strict,
        }
    }

    /// Sets the maximum number of fields in a merged schema.
    #[must_use]
    pub fn max_fields(mut self, limit: usize) -> Self {
        self.max_fields = Some(limit);
        self
    }

    /// Sets the maximum inheritance depth.
    #[must_use]
    pub fn max_inheritance_depth(mut self, limit: usize) -> Self {
        self.max_inheritance_depth = limit;
        self
    }

    /// Sets the maximum resolution order length.
    #[must_use]
    pub fn max_mro_length(mut self, limit: usize) -> Self {
        self.max_mro_length = limit;
        self
    }

    /// Sets how required-after-default field orders are treated.
    #[must_use]
    pub fn default_order(mut self, order: DefaultOrder) -> Self {
        self.default_order = order;
        self
    }

    pub(crate) fn check_field_count(&self, class_name: &str, count: usize) -> RecordResult<()> {
        match self.max_fields {
            Some(limit) if count > limit => Err(ErrorKind::limit(format!(
                "{class_name}: too many fields ({count} > {limit})"
            ))),
            _ => Ok(()),
        }
    }

    pub(crate) fn check_inheritance_depth(&self, class_name: &str, depth: usize) -> RecordResult<()> {
        if depth > self.max_inheritance_depth {
            return Err(ErrorKind::limit(format!(
                "{class_name}: inheritance chain too deep (maximum depth {})",
                self.max_inheritance_depth
            )));
        }
        Ok(())
    }

    pub(crate) fn check_mro_length(&self, class_name: &str, length: usize) -> RecordResult<()> {
        if length > self.max_mro_length {
            return Err(ErrorKind::limit(format!(
                "{class_name}: resolution order too long (maximum length {})",
                self.max_mro_length
            )));
        }
        Ok(())
    }
}
