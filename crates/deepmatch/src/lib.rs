//! Deepmatch - cycle-safe deep comparison of nested dynamic values.
//!
//! Deepmatch compares two values of unknown shape and returns a boolean
//! verdict under one of three semantics:
//!
//! - [`equals`]: both values have the same structure and leaves
//! - [`strict_subset`]: the subject contains all of the filter
//! - [`partial_subset`]: the subject contains some of the filter
//!
//! # Quick Start
//!
//! ```rust
//! use deepmatch::{equals, partial_subset, strict_subset, Value};
//!
//! let subject = Value::record([
//!     ("a", Value::from(1)),
//!     (
//!         "b",
//!         Value::record([
//!             ("c", Value::from(2)),
//!             ("d", Value::set([Value::from(1), Value::from(2)])),
//!         ]),
//!     ),
//! ]);
//!
//! let filter = Value::record([(
//!     "b",
//!     Value::record([("d", Value::set([Value::from(1), Value::from(2)]))]),
//! )]);
//!
//! assert!(strict_subset(&subject, &filter));
//! assert!(!equals(&subject, &filter));
//! assert!(partial_subset(&Value::array([Value::from(1)]), &Value::array([Value::from(1)])));
//! ```
//!
//! # Value Model
//!
//! | Kind | Compared by |
//! |------|-------------|
//! | Undefined, Null, Bool, Number, String | value (`NaN` never matches) |
//! | Symbol | identity |
//! | Array | index by index |
//! | Map | key lookup, values compared deeply |
//! | Set | membership by identity |
//! | Pattern | source text and flags |
//! | Record with a coercion | coerced primitive |
//! | Record with a rendering | rendered text |
//! | Record | own keys, values compared deeply |
//!
//! # Architecture
//!
//! A single iterative traversal in [`engine`] is shared by all semantics. It
//! walks both values with an explicit work stack, skips composite pairs it
//! has already compared (so cyclic values terminate), and stops as soon as
//! the verdict is decided. Semantics-specific decisions are delegated to a
//! [`Comparator`]:
//!
//! ```text
//! equals          -> engine::compare(Equal, ..)
//! strict_subset   -> engine::compare(ContainsAll, ..)
//! partial_subset  -> engine::compare(ContainsSome, ..)
//! ```
//!
//! Comparison never fails and never panics: malformed, cyclic or mixed
//! inputs all produce a verdict.

pub mod comparator;
pub mod engine;
mod error;
pub mod json;
mod object;
mod options;
mod pattern;
mod value;

// Re-export public API
pub use comparator::{Comparator, ContainsAll, ContainsSome, Equal};
pub use error::{DeepMatchError, Result};
pub use object::{
    Kind, MapData, Object, ObjectId, ObjectKind, Record, SetData, ToTextFn, ValueOfFn,
    DEFAULT_CLASS, DEFAULT_TEXT,
};
pub use options::{CompareOptions, RecordKeying, Semantics, RECORD_KEYING_VAR, SEMANTICS_VAR};
pub use pattern::{Pattern, PATTERN_FLAGS};
pub use value::{same_value_zero, strict_eq, Number, Symbol, Value};

/// Returns `true` if the value is a composite (array, map, set, pattern or
/// record) rather than a primitive or an absence.
pub fn is_composite(value: &Value) -> bool {
    value.is_object()
}

/// Returns `true` if `subject` contains all of `filter`.
pub fn strict_subset(subject: &Value, filter: &Value) -> bool {
    engine::compare(ContainsAll, subject, filter)
}

/// Returns `true` if `subject` contains some of `filter`.
///
/// Records are walked with the default [`RecordKeying::Positional`]; use
/// [`compare_with`] to choose another keying.
pub fn partial_subset(subject: &Value, filter: &Value) -> bool {
    engine::compare(ContainsSome::default(), subject, filter)
}

/// Returns `true` if `a` and `b` are deep equal.
pub fn equals(a: &Value, b: &Value) -> bool {
    engine::compare(Equal, a, b)
}

/// Compares under the semantics selected by `semantics`.
pub fn compare(semantics: Semantics, subject: &Value, filter: &Value) -> bool {
    compare_with(&CompareOptions::new(semantics), subject, filter)
}

/// Compares under the given options.
pub fn compare_with(options: &CompareOptions, subject: &Value, filter: &Value) -> bool {
    match options.semantics {
        Semantics::Equal => engine::compare(Equal, subject, filter),
        Semantics::ContainsAll => engine::compare(ContainsAll, subject, filter),
        Semantics::ContainsSome => {
            engine::compare(ContainsSome::new(options.record_keying), subject, filter)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_composite_distinguishes_objects() {
        assert!(is_composite(&Value::array([])));
        assert!(is_composite(&Value::pattern(Pattern::plain("x"))));
        assert!(!is_composite(&Value::Null));
        assert!(!is_composite(&Value::Undefined));
        assert!(!is_composite(&Value::from("text")));
        assert!(!is_composite(&Value::from(Symbol::new("s"))));
    }

    #[test]
    fn compare_routes_by_semantics() {
        let subject = Value::array([Value::from(1), Value::from(2)]);
        let filter = Value::array([Value::from(1)]);

        assert!(!compare(Semantics::Equal, &subject, &filter));
        assert!(compare(Semantics::ContainsAll, &subject, &filter));
        assert!(compare(Semantics::ContainsSome, &subject, &filter));
    }

    #[test]
    fn compare_with_passes_record_keying() {
        let subject = Value::record([("a", Value::from(1))]);
        let filter = Value::record([("a", Value::from(2))]);
        let positional = CompareOptions::new(Semantics::ContainsSome);
        let named = positional.with_record_keying(RecordKeying::Named);

        assert!(compare_with(&positional, &subject, &filter));
        assert!(!compare_with(&named, &subject, &filter));
    }

    #[test]
    fn nan_is_not_equal_to_itself() {
        let nan = Value::from(f64::NAN);
        assert!(!equals(&nan, &nan));
        assert!(!equals(&Value::array([nan.clone()]), &Value::array([nan])));
    }

    #[test]
    fn identical_values_are_not_a_partial_match() {
        // Identity skips the pair without recording a match.
        let value = Value::array([Value::from(1)]);
        assert!(!partial_subset(&value, &value));
        assert!(!partial_subset(&Value::from(1), &Value::from(1)));
    }
}
