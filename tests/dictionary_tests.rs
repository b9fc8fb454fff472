//! Integration tests for dictionary operations.
//!
//! Every operation is checked against the dictionary it was given as well as
//! the dictionary it returns: inputs must never change.

use rstest::rstest;
use tablekit::{Dictionary, NONE, Value, dictionary, list};

fn key(text: &str) -> Value {
    Value::from(text)
}

// =============================================================================
// Construction
// =============================================================================

#[rstest]
fn test_from_lists_pairs_positions() {
    let result = dictionary::from_lists(&list!["foo", "bar"], &list![1, 2]);
    assert!(dictionary::equals([&result, &dictionary! { "foo" => 1, "bar" => 2 }]));
}

#[rstest]
#[case(list!["foo", "bar", "baz"], list![1], 1)]
#[case(list!["foo"], list![1, 2, 3], 1)]
#[case(list![], list![1, 2], 0)]
fn test_from_lists_truncates_to_shorter(
    #[case] keys: tablekit::List,
    #[case] values: tablekit::List,
    #[case] expected: usize,
) {
    assert_eq!(dictionary::from_lists(&keys, &values).len(), expected);
}

#[rstest]
fn test_keys_can_be_any_value() {
    let list_key = list![1];
    let result = dictionary! { 1 => "one", true => "yes", list_key.clone() => "list" };
    assert_eq!(result.get(&Value::from(1.0)), Some(&key("one")));
    assert_eq!(result.get(&Value::from(list_key)), Some(&key("list")));
    assert_eq!(result.get(&Value::from(list![1])), None);
}

// =============================================================================
// Copying and Comparing
// =============================================================================

#[rstest]
fn test_copy_equals_original() {
    let original = dictionary! { "foo" => list![1], "bar" => 2 };
    let copied = dictionary::copy(&original);
    assert!(!copied.ptr_eq(&original));
    assert!(dictionary::equals([&copied, &original]));
}

#[rstest]
fn test_copy_deep_is_only_deeply_equal() {
    let original = dictionary! { "foo" => list![1], "bar" => dictionary! { "baz" => 3 } };
    let copied = dictionary::copy_deep(&original);
    assert!(!dictionary::equals([&copied, &original]));
    assert!(dictionary::equals_deep([&copied, &original]));
}

#[rstest]
fn test_equals_requires_identical_key_sets() {
    let left = dictionary! { "foo" => 1 };
    let right = dictionary! { "foo" => 1, "bar" => NONE };
    assert!(!dictionary::equals([&left, &right]));
    assert!(!dictionary::equals([&right, &left]));
}

#[rstest]
fn test_equals_of_zero_or_one_is_true() {
    assert!(dictionary::equals(Vec::<&Dictionary>::new()));
    assert!(dictionary::equals_deep([&dictionary! { "foo" => 1 }]));
}

// =============================================================================
// Merging
// =============================================================================

#[rstest]
fn test_merge_removes_sentinel_keys() {
    let base = dictionary! { "foo" => "value", "removeMe" => 0 };
    let changes = dictionary! { "removeMe" => NONE, "addMe" => 1 };

    let merged = dictionary::merge([&base, &changes]);

    assert!(dictionary::equals([&merged, &dictionary! { "foo" => "value", "addMe" => 1 }]));
    assert!(dictionary::has(&base, "removeMe"));
}

#[rstest]
fn test_merge_applies_strictly_left_to_right() {
    let first = dictionary! { "foo" => 1 };
    let second = dictionary! { "foo" => NONE };
    let third = dictionary! { "foo" => 3 };

    let restored = dictionary::merge([&first, &second, &third]);
    assert_eq!(restored.get(&key("foo")), Some(&Value::from(3)));

    let removed = dictionary::merge([&first, &third, &second]);
    assert!(!dictionary::has(&removed, "foo"));
}

#[rstest]
fn test_join_is_merge() {
    let left = dictionary! { "foo" => 1 };
    let right = dictionary! { "bar" => 2 };
    assert!(dictionary::equals([
        &dictionary::join([&left, &right]),
        &dictionary::merge([&left, &right]),
    ]));
}

#[rstest]
fn test_merge_shares_nested_containers() {
    let nested = dictionary! { "baz" => 1 };
    let merged = dictionary::merge([&dictionary! { "foo" => nested.clone() }]);
    assert_eq!(merged.get(&key("foo")), Some(&Value::from(nested)));
}

#[rstest]
fn test_merge_deep_recurses_into_nested_dictionaries() {
    let a = dictionary! {
        "key" => "value",
        "dictionary" => dictionary! { "foo" => "foo", "bar" => "bar" },
        "removeMe" => 0,
    };
    let b = dictionary! {
        "removeMe" => NONE,
        "dictionary" => dictionary! { "baz" => "baz", "bar" => NONE },
    };

    let merged = dictionary::join_deep([&a, &b]);

    let expected = dictionary! {
        "key" => "value",
        "dictionary" => dictionary! { "foo" => "foo", "baz" => "baz" },
    };
    assert!(dictionary::equals_deep([&merged, &expected]));
}

#[rstest]
fn test_merge_deep_replaces_lists_outright() {
    let a = dictionary! { "list" => list![1, 2, 3] };
    let b = dictionary! { "list" => list![4] };
    let merged = dictionary::merge_deep([&a, &b]);
    assert!(dictionary::equals_deep([&merged, &dictionary! { "list" => list![4] }]));
}

#[rstest]
fn test_merge_deep_of_single_dictionary_is_deep_copy() {
    let original = dictionary! { "foo" => dictionary! { "bar" => list![1] } };
    let merged = dictionary::merge_deep([&original]);
    assert!(!dictionary::equals([&merged, &original]));
    assert!(dictionary::equals_deep([&merged, &original]));
}

// =============================================================================
// Persistent Changes
// =============================================================================

#[rstest]
fn test_remove_keys_ignores_absent_keys() {
    let original = dictionary! { "foo" => 1, "bar" => 2 };
    let result = dictionary::remove_keys(&original, ["foo", "qux"]);
    assert!(dictionary::equals([&result, &dictionary! { "bar" => 2 }]));
    assert_eq!(original.len(), 2);
    assert!(dictionary::equals([&dictionary::remove_key(&original, "qux"), &original]));
}

#[rstest]
fn test_remove_value_removes_every_matching_entry() {
    let original = dictionary! { "foo" => 1, "bar" => 1.0, "baz" => 2 };
    let result = dictionary::remove_value(&original, 1);
    assert!(dictionary::equals([&result, &dictionary! { "baz" => 2 }]));
}

#[rstest]
fn test_remove_values_accepts_several() {
    let original = dictionary! { "foo" => "a", "bar" => "b", "baz" => "c" };
    let result = dictionary::remove_values(&original, ["a", "c"]);
    assert!(dictionary::equals([&result, &dictionary! { "bar" => "b" }]));
}

#[rstest]
fn test_set_adds_and_overwrites() {
    let original = dictionary! { "foo" => 1 };
    let added = dictionary::set(&original, "bar", 2);
    let overwritten = dictionary::set(&added, "foo", 3);
    assert!(dictionary::equals([&overwritten, &dictionary! { "foo" => 3, "bar" => 2 }]));
    assert_eq!(original.get(&key("foo")), Some(&Value::from(1)));
}

#[rstest]
fn test_set_stores_sentinel_while_merge_deletes() {
    let stored = dictionary::set(&Dictionary::new(), "foo", NONE);
    assert!(dictionary::has(&stored, "foo"));
    assert_eq!(stored.get(&key("foo")), Some(&NONE));

    let merged = dictionary::merge([&dictionary! { "foo" => 1 }, &stored]);
    assert!(!dictionary::has(&merged, "foo"));
}

#[rstest]
fn test_update_applies_updater_to_present_key() {
    let original = dictionary! { "foo" => "foo", "bar" => "bar" };
    let result = dictionary::update(&original, "bar", |value: &Value, key: &Value| {
        format!("{key}:{value}")
    });
    assert_eq!(result.get(&key("bar")), Some(&key("bar:bar")));
    assert_eq!(result.get(&key("foo")), Some(&key("foo")));
}

#[rstest]
fn test_update_or_else_creates_absent_key_from_callback() {
    let original = dictionary! { "foo" => "foo" };
    let result = dictionary::update_or_else(
        &original,
        "baz",
        |value: &Value, _: &Value| value.clone(),
        |missing: &Value| format!("new {missing}"),
    );
    assert_eq!(result.get(&key("baz")), Some(&key("new baz")));
    assert!(!dictionary::has(&original, "baz"));
}

// =============================================================================
// Algorithms
// =============================================================================

#[rstest]
fn test_filter_receives_value_then_key() {
    let original = dictionary! { "keep" => 1, "drop" => 2, "also" => 3 };
    let result = dictionary::filter(&original, |value, key| {
        key.as_text() != Some("drop") && value.as_int().is_some()
    });
    assert!(dictionary::equals([&result, &dictionary! { "keep" => 1, "also" => 3 }]));
}

#[rstest]
fn test_flip_swaps_unique_values() {
    let original = dictionary! { "foo" => 1, "bar" => 2 };
    let flipped = dictionary::flip(&original);
    assert!(dictionary::equals([&flipped, &dictionary! { 1 => "foo", 2 => "bar" }]));
}

#[rstest]
fn test_flip_with_duplicate_values_keeps_one_key() {
    let flipped = dictionary::flip(&dictionary! { "foo" => 1, "bar" => 1 });
    assert_eq!(flipped.len(), 1);
    let winner = flipped.get(&Value::from(1));
    assert!(winner == Some(&key("foo")) || winner == Some(&key("bar")));
}

#[rstest]
fn test_map_value_form_keeps_keys() {
    let original = dictionary! { "foo" => 1, "bar" => 2 };
    let doubled = dictionary::map(&original, |value, _| {
        Value::from(value.as_int().unwrap_or_default() * 2)
    });
    assert!(dictionary::equals([&doubled, &dictionary! { "foo" => 2, "bar" => 4 }]));
}

#[rstest]
fn test_map_entry_form_moves_keys() {
    let original = dictionary! { "foo" => 1 };
    let moved = dictionary::map(&original, |value, key| {
        (value.clone(), Value::from(format!("{key}Moved")))
    });
    assert!(dictionary::equals([&moved, &dictionary! { "fooMoved" => 1 }]));
}

#[rstest]
fn test_flatten_is_bounded_by_depth() {
    let nested = dictionary! {
        "foo" => "foo",
        "foobar" => dictionary! {
            "bar" => "bar",
            "barbaz" => dictionary! { "baz" => "baz" },
        },
    };

    let unbounded = dictionary::flatten(&nested, None);
    assert!(dictionary::equals([
        &unbounded,
        &dictionary! { "foo" => "foo", "bar" => "bar", "baz" => "baz" },
    ]));

    let once = dictionary::flatten(&nested, Some(1));
    assert_eq!(once.get(&key("bar")), Some(&key("bar")));
    assert!(once.get(&key("barbaz")).is_some_and(|value| value.as_dictionary().is_some()));

    assert!(dictionary::equals([&dictionary::flatten(&nested, Some(0)), &nested]));
}

// =============================================================================
// Reading and Reducing
// =============================================================================

#[rstest]
fn test_has_and_includes() {
    let original = dictionary! { "foo" => 1, "bar" => NONE };
    assert!(dictionary::has(&original, "bar"));
    assert!(!dictionary::has(&original, "baz"));
    assert!(dictionary::includes(&original, 1.0));
    assert!(dictionary::includes(&original, NONE));
    assert!(!dictionary::includes(&original, "foo"));
}

#[rstest]
fn test_keys_and_values_align() {
    let original = dictionary! { "foo" => 1, "bar" => 2, "baz" => 3 };
    let keys = dictionary::keys(&original);
    let values = dictionary::values(&original);
    assert_eq!(keys.len(), 3);
    for (key, value) in keys.iter().zip(&values) {
        assert_eq!(original.get(key), Some(value));
    }
}

#[rstest]
fn test_quantifiers() {
    let original = dictionary! { "foo" => 1, "bar" => 2, "baz" => 3 };
    let is_even = |value: &Value, _: &Value| value.as_int().is_some_and(|n| n % 2 == 0);

    assert_eq!(dictionary::count(&original), 3);
    assert_eq!(dictionary::count_where(&original, is_even), 1);
    assert!(dictionary::some(&original, is_even));
    assert!(!dictionary::every(&original, is_even));
    assert!(dictionary::every(&Dictionary::new(), is_even));
}

#[rstest]
fn test_count_covers_non_sequential_keys() {
    let original = dictionary! { 1 => "a", 2 => "b", 10 => "c", "x" => "d" };
    assert_eq!(dictionary::count(&original), 4);
    assert!(!original.is_empty());
    assert!(tablekit::is_empty(&Dictionary::new()));
}
