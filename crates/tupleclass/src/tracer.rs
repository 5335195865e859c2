//! Record definition and construction tracing.
//!
//! Provides a trait-based tracing system for the schema builder and the instance
//! materializer. When using [`NoopTracer`], all trace methods compile away entirely
//! via monomorphization, so untraced builds and calls pay nothing for the hooks.
//!
//! # Architecture
//!
//! The [`RecordTracer`] trait defines hook points at key events (schema build start,
//! each inherited/declared/overridden field, each field binding, construction
//! completion). Concrete implementations collect different kinds of data:
//!
//! | Tracer | Purpose |
//! |--------|---------|
//! | [`NoopTracer`] | Zero-cost no-op (default for `build()` and `call()`) |
//! | [`StderrTracer`] | Human-readable log to stderr |
//! | [`RecordingTracer`] | Full event recording for post-mortem inspection |
//!
//! # Usage
//!
//! ```
//! use tupleclass::{RecordClass, tracer::RecordingTracer};
//!
//! let mut tracer = RecordingTracer::new();
//! let point = RecordClass::builder("Point")
//!     .field("x")
//!     .field_with_default("y", 0)
//!     .build_traced(&mut tracer)?;
//! point.call_traced(tupleclass::args![1], &mut tracer)?;
//! assert!(!tracer.events().is_empty());
//! # Ok::<(), tupleclass::RecordError>(())
//! ```

use strum::{Display, IntoStaticStr};

/// Where a field's value came from during construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum BindSource {
    /// A positional argument at the field's index.
    Positional,
    /// A named argument matching the field's name.
    Keyword,
    /// The field's declared default.
    Default,
}

/// Trace event emitted while defining classes or constructing instances.
///
/// Used by [`RecordingTracer`] to capture a full trace for post-mortem analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// Schema building started for a class.
    SchemaStart {
        class_name: String,
        /// Number of direct bases.
        bases: usize,
    },
    /// A field was copied from a base schema.
    FieldInherited {
        class_name: String,
        field: String,
        position: usize,
    },
    /// A field declared by the class was appended.
    FieldDeclared {
        class_name: String,
        field: String,
        position: usize,
    },
    /// A field declared by the class replaced an inherited one in place.
    FieldOverridden {
        class_name: String,
        field: String,
        position: usize,
    },
    /// Schema building finished.
    SchemaBuilt { class_name: String, fields: usize },
    /// A field was bound during construction.
    FieldBound {
        class_name: String,
        field: String,
        position: usize,
        source: BindSource,
    },
    /// An instance was fully constructed.
    Constructed { class_name: String, fields: usize },
}

/// Trait for record tracing.
///
/// All methods have default no-op implementations, so [`NoopTracer`] requires
/// zero lines of code and compiles to zero instructions. Implementations only
/// override the hooks they care about.
pub trait RecordTracer: std::fmt::Debug {
    /// Called before the resolution order and schema of a class are computed.
    #[inline]
    fn on_schema_start(&mut self, _class_name: &str, _bases: usize) {}

    /// Called for every field copied from a base schema, with its position in the new schema.
    #[inline]
    fn on_field_inherited(&mut self, _class_name: &str, _field: &str, _position: usize) {}

    /// Called for every new field the class declares.
    #[inline]
    fn on_field_declared(&mut self, _class_name: &str, _field: &str, _position: usize) {}

    /// Called when a declared field replaces an inherited one.
    #[inline]
    fn on_field_overridden(&mut self, _class_name: &str, _field: &str, _position: usize) {}

    /// Called once the schema has been validated and attached to the class.
    #[inline]
    fn on_schema_built(&mut self, _class_name: &str, _field_count: usize) {}

    /// Called for every field bound during construction.
    #[inline]
    fn on_field_bound(&mut self, _class_name: &str, _field: &str, _position: usize, _source: BindSource) {}

    /// Called after an instance has been fully materialized.
    #[inline]
    fn on_constructed(&mut self, _class_name: &str, _field_count: usize) {}
}

// ============================================================================
// NoopTracer: zero-cost default
// ============================================================================

/// A tracer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl RecordTracer for NoopTracer {}

// ============================================================================
// StderrTracer: human-readable log
// ============================================================================

/// Tracer that prints a human-readable log to stderr.
///
/// Output format:
/// ```text
/// === SCHEMA Point           bases=0
///   + declare x              pos=0
///   + declare y              pos=1
/// === BUILT  Point           fields=2
///   . bind x                 pos=0  source=positional
///   . bind y                 pos=1  source=default
/// === NEW    Point           fields=2
/// ```
#[derive(Debug)]
pub struct StderrTracer {
    /// Maximum number of lines to print before stopping. None = unlimited.
    limit: Option<usize>,
    /// Number of lines printed so far.
    count: usize,
    /// Whether we've stopped tracing (hit the limit).
    stopped: bool,
}

impl StderrTracer {
    /// Creates a new stderr tracer with no line limit.
    #[must_use]
    pub fn new() -> Self {
        Self {
            limit: None,
            count: 0,
            stopped: false,
        }
    }

    /// Creates a new stderr tracer that stops after `limit` lines.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            count: 0,
            stopped: false,
        }
    }

    fn emit(&mut self, line: std::fmt::Arguments<'_>) {
        if self.stopped {
            return;
        }
        eprintln!("{line}");
        self.count += 1;
        if let Some(limit) = self.limit
            && self.count >= limit
        {
            eprintln!("--- trace limit reached ({limit} lines) ---");
            self.stopped = true;
        }
    }
}

impl Default for StderrTracer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordTracer for StderrTracer {
    fn on_schema_start(&mut self, class_name: &str, bases: usize) {
        self.emit(format_args!("=== SCHEMA {class_name:<16} bases={bases}"));
    }

    fn on_field_inherited(&mut self, _class_name: &str, field: &str, position: usize) {
        self.emit(format_args!("  < inherit {field:<14} pos={position}"));
    }

    fn on_field_declared(&mut self, _class_name: &str, field: &str, position: usize) {
        self.emit(format_args!("  + declare {field:<14} pos={position}"));
    }

    fn on_field_overridden(&mut self, _class_name: &str, field: &str, position: usize) {
        self.emit(format_args!("  * override {field:<13} pos={position}"));
    }

    fn on_schema_built(&mut self, class_name: &str, field_count: usize) {
        self.emit(format_args!("=== BUILT  {class_name:<16} fields={field_count}"));
    }

    fn on_field_bound(&mut self, _class_name: &str, field: &str, position: usize, source: BindSource) {
        self.emit(format_args!("  . bind {field:<17} pos={position}  source={source}"));
    }

    fn on_constructed(&mut self, class_name: &str, field_count: usize) {
        self.emit(format_args!("=== NEW    {class_name:<16} fields={field_count}"));
    }
}

// ============================================================================
// RecordingTracer: full event recording
// ============================================================================

/// Tracer that records all events.
///
/// Captures every trace event into a `Vec<TraceEvent>`. This is the most
/// expensive tracer (allocates per event), so use it for debugging or tests.
#[derive(Debug, Default)]
pub struct RecordingTracer {
    events: Vec<TraceEvent>,
}

impl RecordingTracer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events in emission order.
    #[must_use]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Consumes the tracer and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<TraceEvent> {
        self.events
    }

    /// Clears all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl RecordTracer for RecordingTracer {
    fn on_schema_start(&mut self, class_name: &str, bases: usize) {
        self.events.push(TraceEvent::SchemaStart {
            class_name: class_name.to_owned(),
            bases,
        });
    }

    fn on_field_inherited(&mut self, class_name: &str, field: &str, position: usize) {
        self.events.push(TraceEvent::FieldInherited {
            class_name: class_name.to_owned(),
            field: field.to_owned(),
            position,
        });
    }

    fn on_field_declared(&mut self, class_name: &str, field: &str, position: usize) {
        self.events.push(TraceEvent::FieldDeclared {
            class_name: class_name.to_owned(),
            field: field.to_owned(),
            position,
        });
    }

    fn on_field_overridden(&mut self, class_name: &str, field: &str, position: usize) {
        self.events.push(TraceEvent::FieldOverridden {
            class_name: class_name.to_owned(),
            field: field.to_owned(),
            position,
        });
    }

    fn on_schema_built(&mut self, class_name: &str, field_count: usize) {
        self.events.push(TraceEvent::SchemaBuilt {
            class_name: class_name.to_owned(),
            fields: field_count,
        });
    }

    fn on_field_bound(&mut self, class_name: &str, field: &str, position: usize, source: BindSource) {
        self.events.push(TraceEvent::FieldBound {
            class_name: class_name.to_owned(),
            field: field.to_owned(),
            position,
            source,
        });
    }

    fn on_constructed(&mut self, class_name: &str, field_count: usize) {
        self.events.push(TraceEvent::Constructed {
            class_name: class_name.to_owned(),
            fields: field_count,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stderr_tracer_stops_at_limit() {
        let mut tracer = StderrTracer::with_limit(2);
        tracer.on_schema_start("Data", 0);
        tracer.on_field_declared("Data", "x", 0);
        assert!(tracer.stopped);
        tracer.on_field_declared("Data", "y", 1);
        assert_eq!(tracer.count, 2);
    }

    #[test]
    fn bind_source_displays_lowercase() {
        assert_eq!(BindSource::Positional.to_string(), "positional");
        assert_eq!(BindSource::Default.to_string(), "default");
    }

    #[test]
    fn recording_tracer_clear() {
        let mut tracer = RecordingTracer::new();
        tracer.on_constructed("Data", 2);
        assert_eq!(
            tracer.events(),
            &[TraceEvent::Constructed {
                class_name: "Data".to_owned(),
                fields: 2
            }]
        );
        tracer.clear();
        assert!(tracer.events().is_empty());
    }
}
