//! Partial subset: the subject contains at least one thing the filter
//! specifies.

use super::{dispatch, Comparator};
use crate::engine::WorkStack;
use crate::object::{MapData, Object, Record, SetData};
use crate::options::RecordKeying;
use crate::value::{strict_eq, Value};

/// The subject shares at least one matching element with the filter.
///
/// Polarity is inverted: the walk starts from `false` and stops at the
/// first match. Pairs that do not match outright are queued so their
/// children may still satisfy the search. Mismatches, including a different
/// runtime type, only close the branch they occur in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainsSome {
    keying: RecordKeying,
}

impl ContainsSome {
    /// Creates the strategy with the given record keying.
    pub fn new(keying: RecordKeying) -> Self {
        ContainsSome { keying }
    }

    /// How records are walked.
    pub fn keying(&self) -> RecordKeying {
        self.keying
    }

    fn scan<'a, I>(stack: &mut WorkStack, pairs: I) -> bool
    where
        I: IntoIterator<Item = (&'a Value, &'a Value)>,
    {
        for (s, f) in pairs {
            if strict_eq(s, f) {
                return true;
            }
            stack.push(s, f);
        }
        false
    }
}

impl Comparator for ContainsSome {
    const NAME: &'static str = "contains-some";
    const INITIAL_VERDICT: bool = false;

    fn object(&self, stack: &mut WorkStack, subject: &Object, filter: &Object) -> bool {
        subject.same_kind(filter) && dispatch(self, stack, subject, filter)
    }

    fn array(&self, stack: &mut WorkStack, subject: &[Value], filter: &[Value]) -> bool {
        if subject.len() < filter.len() {
            return false;
        }
        Self::scan(stack, subject.iter().zip(filter))
    }

    fn map(&self, stack: &mut WorkStack, subject: &MapData, filter: &MapData) -> bool {
        if subject.len() < filter.len() {
            return false;
        }
        let undefined = Value::Undefined;
        Self::scan(
            stack,
            filter
                .iter()
                .map(|(key, f)| (subject.get(key).unwrap_or(&undefined), f)),
        )
    }

    fn set(&self, subject: &SetData, filter: &SetData) -> bool {
        subject.len() >= filter.len() && filter.iter().any(|value| subject.contains(value))
    }

    fn record(&self, stack: &mut WorkStack, subject: &Record, filter: &Record) -> bool {
        let undefined = Value::Undefined;
        match self.keying {
            RecordKeying::Positional => {
                let pairs: Vec<(&Value, &Value)> = (0..filter.len())
                    .map(|i| {
                        let key = i.to_string();
                        (
                            subject.get(&key).unwrap_or(&undefined),
                            filter.get(&key).unwrap_or(&undefined),
                        )
                    })
                    .collect();
                Self::scan(stack, pairs)
            }
            RecordKeying::Named => Self::scan(
                stack,
                filter
                    .iter()
                    .map(|(key, f)| (subject.get(key).unwrap_or(&undefined), f)),
            ),
        }
    }
}
