//! Comparison strategies.
//!
//! A [`Comparator`] parameterizes the traversal engine: it supplies the
//! verdict the walk starts from (which doubles as the short-circuit
//! trigger) and one handler per composite kind. Handlers return a verdict
//! for the pair at hand and may queue child pairs on the [`WorkStack`].
//!
//! | Strategy | Initial verdict | Stops on |
//! |----------|-----------------|----------|
//! | [`Equal`] | `true` | first mismatch |
//! | [`ContainsAll`] | `true` | first mismatch |
//! | [`ContainsSome`] | `false` | first match |
//!
//! Kind selection is shared by all strategies and lives in [`dispatch`].

mod contains_all;
mod contains_some;
mod equal;

pub use contains_all::ContainsAll;
pub use contains_some::ContainsSome;
pub use equal::Equal;

use crate::engine::WorkStack;
use crate::object::{MapData, Object, ObjectKind, Record, SetData};
use crate::value::{strict_eq, Value};

/// Strategy driving one comparison semantics.
///
/// Implementations hold no per-call state, so a single value can be shared
/// across calls and threads.
pub trait Comparator: Copy + Send + Sync {
    /// Name used in log events.
    const NAME: &'static str;

    /// Verdict held while nothing decisive has been found.
    const INITIAL_VERDICT: bool;

    /// Entry point for a pair of composites that are not identical.
    fn object(&self, stack: &mut WorkStack, subject: &Object, filter: &Object) -> bool;

    /// Ordered sequences.
    fn array(&self, stack: &mut WorkStack, subject: &[Value], filter: &[Value]) -> bool;

    /// Key-ordered maps.
    fn map(&self, stack: &mut WorkStack, subject: &MapData, filter: &MapData) -> bool;

    /// Unique-element sets. Membership is by identity; no child pairs.
    fn set(&self, subject: &SetData, filter: &SetData) -> bool;

    /// Generic keyed records without coercion or rendering.
    fn record(&self, stack: &mut WorkStack, subject: &Record, filter: &Record) -> bool;
}

/// Routes a composite pair to the handler for the subject's kind.
///
/// Callers check that both sides share a runtime type first; a pair of
/// different kinds reaching this point is a mismatch. Patterns, coercible
/// records and rendered records are compared here, identically for every
/// strategy.
pub fn dispatch<C: Comparator>(
    comparator: &C,
    stack: &mut WorkStack,
    subject: &Object,
    filter: &Object,
) -> bool {
    let (Ok(s), Ok(f)) = (subject.try_borrow(), filter.try_borrow()) else {
        return false;
    };

    match (&*s, &*f) {
        (ObjectKind::Array(s), ObjectKind::Array(f)) => comparator.array(stack, s, f),
        (ObjectKind::Map(s), ObjectKind::Map(f)) => comparator.map(stack, s, f),
        (ObjectKind::Set(s), ObjectKind::Set(f)) => comparator.set(s, f),
        (ObjectKind::Pattern(s), ObjectKind::Pattern(f)) => {
            s.source() == f.source() && s.flags() == f.flags()
        }
        (ObjectKind::Record(s), ObjectKind::Record(f)) => {
            if s.has_value_of() {
                let coerced_subject = s.value_of().unwrap_or_default();
                let coerced_filter = f
                    .value_of()
                    .unwrap_or_else(|| Value::Object(filter.clone()));
                strict_eq(&coerced_subject, &coerced_filter)
            } else if s.has_to_text() {
                s.text() == f.text()
            } else {
                comparator.record(stack, s, f)
            }
        }
        _ => false,
    }
}
