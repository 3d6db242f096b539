//! Strict subset: the subject contains everything the filter specifies.

use super::{dispatch, Comparator};
use crate::engine::WorkStack;
use crate::object::{MapData, Object, Record, SetData};
use crate::value::Value;

/// The subject is at least as large and as specific as the filter.
///
/// Runtime types must still match. Arrays compare index by index over the
/// filter's length, so trailing subject elements are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainsAll;

impl Comparator for ContainsAll {
    const NAME: &'static str = "contains-all";
    const INITIAL_VERDICT: bool = true;

    fn object(&self, stack: &mut WorkStack, subject: &Object, filter: &Object) -> bool {
        if !subject.same_kind(filter) {
            return false;
        }
        dispatch(self, stack, subject, filter)
    }

    fn array(&self, stack: &mut WorkStack, subject: &[Value], filter: &[Value]) -> bool {
        // A shorter subject cannot hold every filter element.
        if subject.len() < filter.len() {
            return false;
        }
        for (s, f) in subject.iter().zip(filter) {
            stack.push_unless_identical(s, f);
        }
        true
    }

    fn map(&self, stack: &mut WorkStack, subject: &MapData, filter: &MapData) -> bool {
        if subject.len() < filter.len() {
            return false;
        }
        for (key, f) in filter.iter() {
            match subject.get(key) {
                Some(s) => stack.push_unless_identical(s, f),
                None => return false,
            }
        }
        true
    }

    fn set(&self, subject: &SetData, filter: &SetData) -> bool {
        subject.len() >= filter.len() && filter.iter().all(|value| subject.contains(value))
    }

    fn record(&self, stack: &mut WorkStack, subject: &Record, filter: &Record) -> bool {
        if subject.len() < filter.len() {
            return false;
        }
        for (key, f) in filter.iter() {
            match subject.get(key) {
                Some(s) => stack.push_unless_identical(s, f),
                None => return false,
            }
        }
        true
    }
}
