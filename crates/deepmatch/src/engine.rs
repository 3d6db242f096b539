//! Traversal engine.
//!
//! [`compare`] walks two values side by side with an explicit work stack
//! instead of recursion, so depth is bounded only by memory and a decisive
//! verdict stops the walk wherever it is found. The engine knows nothing
//! about the active semantics: every composite pair is handed to a
//! [`Comparator`], which returns a verdict and may queue child pairs.
//!
//! ```text
//! stack: [a, b]                    result = INITIAL_VERDICT
//! loop while result == INITIAL_VERDICT and stack non-empty:
//!     pop filter, pop subject
//!     identical            -> skip
//!     both composite       -> comparator.object(..) unless pair already visited
//!     otherwise            -> result = false
//! ```

use hashbrown::{HashMap, HashSet};
use tracing::{debug, trace};

use crate::comparator::Comparator;
use crate::object::ObjectId;
use crate::value::{strict_eq, Value};

/// Pending `(subject, filter)` pairs.
///
/// Pairs are stored flat: the subject is pushed first and the filter second,
/// so the filter comes off the stack first.
#[derive(Debug, Default)]
pub struct WorkStack {
    items: Vec<Value>,
}

impl WorkStack {
    /// Creates a stack holding a single pair.
    pub fn with_pair(subject: Value, filter: Value) -> Self {
        WorkStack {
            items: vec![subject, filter],
        }
    }

    /// Queues a pair for comparison.
    pub fn push(&mut self, subject: &Value, filter: &Value) {
        self.items.push(subject.clone());
        self.items.push(filter.clone());
    }

    /// Queues a pair unless the two values are already identical.
    pub fn push_unless_identical(&mut self, subject: &Value, filter: &Value) {
        if !strict_eq(subject, filter) {
            self.push(subject, filter);
        }
    }

    /// Takes the most recently queued pair.
    pub fn pop(&mut self) -> Option<(Value, Value)> {
        let filter = self.items.pop()?;
        let subject = self.items.pop()?;
        Some((subject, filter))
    }

    /// Number of queued pairs.
    pub fn len(&self) -> usize {
        self.items.len() / 2
    }

    /// Returns `true` if no pairs are queued.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Records which filters each composite subject has been paired with.
///
/// Only identities are stored, never handles, so the table keeps nothing
/// alive. A subject seen again with a filter it was already paired with is
/// skipped; a new pairing is compared again.
#[derive(Debug, Default)]
pub struct VisitedTable {
    pairings: HashMap<ObjectId, HashSet<ObjectId>>,
}

impl VisitedTable {
    /// Records a pairing. Returns `true` if it had not been seen before.
    pub fn visit(&mut self, subject: ObjectId, filter: ObjectId) -> bool {
        self.pairings.entry(subject).or_default().insert(filter)
    }

    /// Number of distinct subjects recorded.
    pub fn len(&self) -> usize {
        self.pairings.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty()
    }
}

/// Compares `a` against `b` under the given comparator.
///
/// Never panics for any input shape: primitives that are not identical,
/// composite/primitive pairs and NaN all count as mismatches.
pub fn compare<C: Comparator>(comparator: C, a: &Value, b: &Value) -> bool {
    let mut stack = WorkStack::with_pair(a.clone(), b.clone());
    let mut visited = VisitedTable::default();
    let mut result = C::INITIAL_VERDICT;
    let mut steps = 0usize;

    while result == C::INITIAL_VERDICT {
        let Some((subject, filter)) = stack.pop() else {
            break;
        };
        steps += 1;

        if strict_eq(&subject, &filter) {
            continue;
        }

        match (&subject, &filter) {
            (Value::Object(s), Value::Object(f)) => {
                if visited.visit(s.id(), f.id()) {
                    result = comparator.object(&mut stack, s, f);
                }
            }
            _ => result = false,
        }

        if result != C::INITIAL_VERDICT {
            trace!(
                semantics = C::NAME,
                subject = subject.type_name(),
                filter = filter.type_name(),
                verdict = result,
                "decisive pair"
            );
        }
    }

    debug!(
        semantics = C::NAME,
        steps,
        pending = stack.len(),
        visited = visited.len(),
        verdict = result,
        "comparison finished"
    );

    result
}
