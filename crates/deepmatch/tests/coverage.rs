//! Behavioral coverage of the public API: kind handling, containment rules,
//! cyclic inputs and options.

use deepmatch::{
    compare, compare_with, equals, is_composite, json, partial_subset, strict_subset,
    CompareOptions, Object, ObjectKind, Pattern, Record, RecordKeying, Semantics, Symbol, Value,
    DEFAULT_TEXT,
};

fn ints(values: &[i64]) -> Value {
    Value::array(values.iter().copied().map(Value::from))
}

fn int_set(values: &[i64]) -> Value {
    Value::set(values.iter().copied().map(Value::from))
}

fn int_map(entries: &[(&str, i64)]) -> Value {
    Value::map(
        entries
            .iter()
            .map(|(k, v)| (Value::from(*k), Value::from(*v))),
    )
}

fn empty_record() -> Value {
    Value::from(Record::new())
}

// =============================================================================
// Primitives
// =============================================================================

mod primitives {
    use super::*;

    #[test]
    fn nan_never_matches() {
        let nan = Value::from(f64::NAN);
        assert!(!equals(&nan, &nan));
        assert!(!strict_subset(&nan, &nan));
        assert!(!partial_subset(&nan, &nan));
    }

    #[test]
    fn identical_primitives() {
        assert!(equals(&Value::from(1), &Value::from(1)));
        assert!(equals(&Value::from("x"), &Value::from("x")));
        assert!(equals(&Value::Null, &Value::Null));
        assert!(equals(&Value::Undefined, &Value::Undefined));
    }

    #[test]
    fn null_and_undefined_differ() {
        assert!(!equals(&Value::Null, &Value::Undefined));
        assert!(!strict_subset(&Value::Undefined, &Value::Null));
    }

    #[test]
    fn mixed_number_representations() {
        assert!(equals(&Value::from(3u64), &Value::from(3i64)));
        assert!(equals(&Value::from(3.0), &Value::from(3)));
        assert!(!equals(&Value::from(3.5), &Value::from(3)));
        assert!(!equals(&Value::from(u64::MAX), &Value::from(-1i64)));
    }

    #[test]
    fn numbers_at_the_integer_range_ends() {
        let two_pow_63 = 9_223_372_036_854_775_808.0_f64;
        let two_pow_64 = 18_446_744_073_709_551_616.0_f64;

        assert!(!equals(&Value::from(i64::MAX), &Value::from(two_pow_63)));
        assert!(!equals(&Value::from(u64::MAX), &Value::from(two_pow_64)));
        assert!(equals(&Value::from(1u64 << 63), &Value::from(two_pow_63)));
        assert!(equals(&Value::from(i64::MIN), &Value::from(-two_pow_63)));
    }

    #[test]
    fn primitive_against_composite() {
        assert!(!equals(&Value::from(1), &ints(&[1])));
        assert!(!strict_subset(&ints(&[1]), &Value::from(1)));
    }

    #[test]
    fn symbols_by_identity() {
        let token = Symbol::new("token");
        assert!(equals(&Value::from(token.clone()), &Value::from(token)));
        assert!(!equals(
            &Value::from(Symbol::new("token")),
            &Value::from(Symbol::new("token"))
        ));
    }

    #[test]
    fn composites_are_detected() {
        assert!(is_composite(&int_set(&[])));
        assert!(is_composite(&empty_record()));
        assert!(!is_composite(&Value::from(true)));
    }
}

// =============================================================================
// Arrays
// =============================================================================

mod arrays {
    use super::*;

    #[test]
    fn equal_arrays() {
        assert!(equals(&ints(&[1, 2, 3]), &ints(&[1, 2, 3])));
        assert!(!equals(&ints(&[1, 2, 3]), &ints(&[1, 2])));
        assert!(!equals(&ints(&[1, 2, 3]), &ints(&[1, 3, 2])));
    }

    #[test]
    fn prefix_is_a_strict_subset() {
        assert!(strict_subset(&ints(&[1, 2, 3]), &ints(&[1, 2])));
        assert!(!strict_subset(&ints(&[1, 2]), &ints(&[1, 2, 3])));
        assert!(!strict_subset(&ints(&[1, 2, 3]), &ints(&[2, 3])));
    }

    #[test]
    fn one_matching_index_is_a_partial_subset() {
        assert!(partial_subset(&ints(&[1, 2, 3]), &ints(&[9, 2])));
        assert!(!partial_subset(&ints(&[1, 2, 3]), &ints(&[9, 9])));
        assert!(!partial_subset(&ints(&[1]), &ints(&[1, 2])));
    }

    #[test]
    fn nested_arrays() {
        let a = Value::array([ints(&[1]), ints(&[2, 3])]);
        let b = Value::array([ints(&[1]), ints(&[2, 3])]);
        let c = Value::array([ints(&[1]), ints(&[2])]);
        assert!(equals(&a, &b));
        assert!(strict_subset(&a, &c));
        assert!(!equals(&a, &c));
    }

    #[test]
    fn partial_match_deep_inside() {
        let subject = Value::array([ints(&[0, 0]), ints(&[5, 6])]);
        let filter = Value::array([ints(&[1, 1]), ints(&[7, 6])]);
        assert!(partial_subset(&subject, &filter));
    }
}

// =============================================================================
// Maps and sets
// =============================================================================

mod collections {
    use super::*;

    #[test]
    fn map_containment() {
        let subject = int_map(&[("k1", 1), ("k2", 2)]);
        assert!(strict_subset(&subject, &int_map(&[("k1", 1)])));
        assert!(!strict_subset(&subject, &int_map(&[("k3", 3)])));
        assert!(!strict_subset(&int_map(&[("k1", 1)]), &subject));
        assert!(equals(&subject, &int_map(&[("k2", 2), ("k1", 1)])));
    }

    #[test]
    fn map_values_compared_deeply() {
        let subject = Value::map([(Value::from("k"), ints(&[1, 2]))]);
        let same = Value::map([(Value::from("k"), ints(&[1, 2]))]);
        let prefix = Value::map([(Value::from("k"), ints(&[1]))]);
        assert!(equals(&subject, &same));
        assert!(strict_subset(&subject, &prefix));
        assert!(!equals(&subject, &prefix));
    }

    #[test]
    fn map_partial_match() {
        let subject = int_map(&[("k1", 1), ("k2", 2)]);
        assert!(partial_subset(&subject, &int_map(&[("k1", 9), ("k2", 2)])));
        assert!(!partial_subset(&subject, &int_map(&[("k3", 2)])));
    }

    #[test]
    fn map_keys_use_same_value_zero() {
        let subject = Value::map([(Value::from(f64::NAN), Value::from(1))]);
        let filter = Value::map([(Value::from(f64::NAN), Value::from(1))]);
        assert!(equals(&subject, &filter));
    }

    #[test]
    fn set_containment() {
        assert!(strict_subset(&int_set(&[1, 2, 3]), &int_set(&[1, 2])));
        assert!(!strict_subset(&int_set(&[1, 2]), &int_set(&[1, 2, 3])));
        assert!(!strict_subset(&int_set(&[1, 2, 3]), &int_set(&[1, 4])));
        assert!(equals(&int_set(&[1, 2, 3]), &int_set(&[3, 2, 1])));
        assert!(!equals(&int_set(&[1, 2, 3]), &int_set(&[1, 2])));
    }

    #[test]
    fn set_partial_match() {
        assert!(partial_subset(&int_set(&[1, 2, 3]), &int_set(&[3, 9])));
        assert!(!partial_subset(&int_set(&[1, 2, 3]), &int_set(&[8, 9])));
    }

    #[test]
    fn set_members_by_identity() {
        let shared = ints(&[1]);
        let subject = Value::set([shared.clone()]);
        assert!(strict_subset(&subject, &Value::set([shared])));
        assert!(!strict_subset(&subject, &Value::set([ints(&[1])])));
    }

    #[test]
    fn large_sets_and_maps() {
        let n: i64 = 40_000;
        let subject = Value::set((0..n).map(Value::from));
        let filter = Value::set((0..n).rev().map(|i| Value::from(i as f64)));
        assert!(equals(&subject, &filter));
        assert!(strict_subset(&subject, &filter));

        let keyed = |offset: i64| {
            Value::map((0..n).map(|i| (Value::from(format!("k{i}")), Value::from(i + offset))))
        };
        assert!(equals(&keyed(0), &keyed(0)));
        assert!(!equals(&keyed(0), &keyed(1)));
    }

    #[test]
    fn maps_and_sets_do_not_mix() {
        assert!(!equals(&int_map(&[]), &int_set(&[])));
        assert!(!strict_subset(&int_set(&[]), &ints(&[])));
    }
}

// =============================================================================
// Patterns, coercion and rendering
// =============================================================================

mod special_records {
    use super::*;

    #[test]
    fn patterns_compare_source_and_flags() {
        let plain = Value::pattern(Pattern::plain("abc"));
        let again = Value::pattern(Pattern::plain("abc"));
        let folded = Value::pattern(Pattern::new("abc", "i").unwrap());
        assert!(equals(&plain, &again));
        assert!(!equals(&plain, &folded));
        assert!(!strict_subset(&plain, &folded));
    }

    #[test]
    fn pattern_flag_order_is_irrelevant() {
        let a = Value::pattern(Pattern::new("x", "gi").unwrap());
        let b = Value::pattern(Pattern::new("x", "ig").unwrap());
        assert!(equals(&a, &b));
    }

    #[test]
    fn coercion_compares_primitives() {
        let subject = Value::from(
            Record::new()
                .field("x", Value::from(1))
                .with_value_of(|_| Value::from(5)),
        );
        let filter = Value::from(
            Record::new()
                .field("y", Value::from(2))
                .with_value_of(|_| Value::from(5)),
        );
        let other = Value::from(Record::new().with_value_of(|_| Value::from(6)));

        assert!(equals(&subject, &filter));
        assert!(strict_subset(&subject, &filter));
        assert!(!equals(&subject, &other));
    }

    #[test]
    fn coercion_can_read_fields() {
        let celsius = |degrees: i64| {
            Value::from(
                Record::with_class("Temperature")
                    .field("degrees", Value::from(degrees))
                    .with_value_of(|record| record.get("degrees").cloned().unwrap_or_default()),
            )
        };
        assert!(equals(&celsius(20), &celsius(20)));
        assert!(!equals(&celsius(20), &celsius(21)));
    }

    #[test]
    fn coercion_against_plain_record_fails() {
        let subject = Value::from(Record::new().with_value_of(|_| Value::from(1)));
        assert!(!equals(&subject, &empty_record()));
    }

    #[test]
    fn rendering_compares_text() {
        let subject = Value::from(Record::new().with_to_text(|_| "same".to_string()));
        let filter = Value::from(Record::new().with_to_text(|_| "same".to_string()));
        let other = Value::from(Record::new().with_to_text(|_| "else".to_string()));
        assert!(equals(&subject, &filter));
        assert!(!equals(&subject, &other));
    }

    #[test]
    fn rendering_against_plain_filter_uses_default_text() {
        let subject = Value::from(Record::new().with_to_text(|_| "same".to_string()));
        assert!(!equals(&subject, &empty_record()));

        let generic = Value::from(Record::new().with_to_text(|_| DEFAULT_TEXT.to_string()));
        assert!(equals(&generic, &empty_record()));
        assert!(strict_subset(&generic, &Value::record([("x", Value::from(1))])));
    }

    #[test]
    fn record_classes_must_agree() {
        let point = Value::from(Record::with_class("Point").field("x", Value::from(1)));
        let plain = Value::record([("x", Value::from(1))]);
        assert!(!equals(&point, &plain));
        assert!(!strict_subset(&point, &plain));
    }
}

// =============================================================================
// Records
// =============================================================================

mod records {
    use super::*;

    #[test]
    fn key_order_is_irrelevant() {
        let a = Value::record([("a", Value::from(1)), ("b", Value::from(2))]);
        let b = Value::record([("b", Value::from(2)), ("a", Value::from(1))]);
        assert!(equals(&a, &b));
    }

    #[test]
    fn end_to_end_scenario() {
        let subject = Value::record([
            ("a", Value::from(1)),
            (
                "b",
                Value::record([("c", Value::from(2)), ("d", int_set(&[1, 2]))]),
            ),
        ]);
        let filter = Value::record([("b", Value::record([("d", int_set(&[1, 2]))]))]);
        let wrong = Value::record([("b", Value::record([("c", Value::from(3))]))]);

        assert!(strict_subset(&subject, &filter));
        assert!(!equals(&subject, &filter));
        assert!(!strict_subset(&subject, &wrong));
    }

    #[test]
    fn empty_filter_is_a_strict_subset() {
        let subject = Value::record([("a", Value::from(1))]);
        assert!(strict_subset(&subject, &empty_record()));
    }

    #[test]
    fn empty_filter_is_never_a_partial_subset() {
        let subject = Value::record([("a", Value::from(1))]);
        assert!(!partial_subset(&subject, &empty_record()));
        assert!(!partial_subset(&ints(&[1]), &ints(&[])));
    }

    #[test]
    fn missing_key_fails_strict_subset() {
        let subject = Value::record([("a", Value::from(1))]);
        let filter = Value::record([("b", Value::from(1))]);
        assert!(!strict_subset(&subject, &filter));
    }

    #[test]
    fn positional_keying_reads_numeric_keys() {
        let subject = Value::record([("0", Value::from("x")), ("1", Value::from("y"))]);
        let filter = Value::record([("1", Value::from("y")), ("0", Value::from("z"))]);
        assert!(partial_subset(&subject, &filter));

        let miss = Value::record([("0", Value::from("z")), ("1", Value::from("z"))]);
        assert!(!partial_subset(&subject, &miss));
    }
}

// =============================================================================
// Cycles
// =============================================================================

mod cycles {
    use super::*;

    fn self_loop() -> Value {
        let value = empty_record();
        let object = value.as_object().unwrap();
        object.set_field("self", value.clone());
        value
    }

    fn two_cycle() -> (Value, Value) {
        let first = empty_record();
        let second = Value::record([("next", first.clone())]);
        first.as_object().unwrap().set_field("next", second.clone());
        (first, second)
    }

    #[test]
    fn self_referencing_value_equals_itself() {
        let a = self_loop();
        assert!(equals(&a, &a));
        assert!(strict_subset(&a, &a));
    }

    #[test]
    fn separate_cycles_of_same_shape() {
        let a = self_loop();
        let b = self_loop();
        assert!(equals(&a, &b));
        assert!(strict_subset(&a, &b));
    }

    #[test]
    fn cycles_with_different_periods_terminate() {
        let a = Value::record([("next", Value::Undefined)]);
        a.as_object().unwrap().set_field("next", a.clone());
        let (b1, _b2) = two_cycle();

        assert!(equals(&a, &b1));
        assert!(equals(&b1, &a));

        let named =
            CompareOptions::new(Semantics::ContainsSome).with_record_keying(RecordKeying::Named);
        assert!(!compare_with(&named, &a, &b1));
    }

    #[test]
    fn cyclic_arrays_terminate() {
        let a = Value::array([]);
        a.as_object().unwrap().push(a.clone());
        let b = Value::array([]);
        b.as_object().unwrap().push(b.clone());
        assert!(equals(&a, &b));
    }

    #[test]
    fn cycle_with_differing_leaf() {
        let a = Value::record([("v", Value::from(1))]);
        a.as_object().unwrap().set_field("self", a.clone());
        let b = Value::record([("v", Value::from(2))]);
        b.as_object().unwrap().set_field("self", b.clone());

        assert!(!equals(&a, &b));
        assert!(!strict_subset(&a, &b));
    }

    #[test]
    fn shared_subject_is_compared_against_each_filter() {
        let shared = ints(&[1]);
        let subject = Value::array([shared.clone(), shared]);
        let filter = Value::array([ints(&[1]), ints(&[2])]);

        assert!(!equals(&subject, &filter));
        assert!(!strict_subset(&subject, &filter));

        let matching = Value::array([ints(&[1]), ints(&[1])]);
        assert!(equals(&subject, &matching));
    }

    #[test]
    fn shared_filter_is_compared_against_each_subject() {
        let shared = ints(&[1]);
        let subject = Value::array([ints(&[1]), ints(&[2])]);
        let filter = Value::array([shared.clone(), shared]);

        assert!(!equals(&subject, &filter));
        assert!(!strict_subset(&subject, &filter));
    }

    #[test]
    fn mutated_objects_keep_identity() {
        let shared = Object::new(ObjectKind::Array(Vec::new()));
        let value = Value::from(shared.clone());
        shared.push(Value::from(1));
        assert!(equals(&value, &ints(&[1])));
    }
}

// =============================================================================
// Options and JSON
// =============================================================================

mod options {
    use super::*;

    #[test]
    fn compare_matches_named_entry_points() {
        let subject = json::from_str(r#"{"a": [1, 2], "b": "x"}"#).unwrap();
        let filter = json::from_str(r#"{"a": [1]}"#).unwrap();

        assert_eq!(
            compare(Semantics::Equal, &subject, &filter),
            equals(&subject, &filter)
        );
        assert_eq!(
            compare(Semantics::ContainsAll, &subject, &filter),
            strict_subset(&subject, &filter)
        );
        assert_eq!(
            compare(Semantics::ContainsSome, &subject, &filter),
            partial_subset(&subject, &filter)
        );
    }

    #[test]
    fn options_from_json_config() {
        let options: CompareOptions =
            serde_json::from_str(r#"{"semantics": "contains-some", "record-keying": "named"}"#)
                .unwrap();
        assert_eq!(options.record_keying, RecordKeying::Named);

        let subject = json::from_str(r#"{"a": 1, "b": 2}"#).unwrap();
        let filter = json::from_str(r#"{"b": 2, "z": 0}"#).unwrap();
        assert!(compare_with(&options, &subject, &filter));
    }
}
