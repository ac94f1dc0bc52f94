//! Integration tests for exhaustive string enumeration

use chars::{CharSet, LengthSpec, StringEnumerator};
use std::collections::HashSet;

fn set(s: &str) -> CharSet {
    CharSet::from_chars(s.chars())
}

#[test]
fn test_enumerates_every_string_once() {
    let abc = set("abc");
    let strings: Vec<String> = StringEnumerator::new(&abc, 3).iter().collect();
    assert_eq!(strings.len(), 27);

    let unique: HashSet<&String> = strings.iter().collect();
    assert_eq!(unique.len(), 27);
    assert!(strings.iter().all(|s| abc.matches(s.as_str())));
}

#[test]
fn test_odometer_order_is_lexicographic() {
    let digits = set("012");
    let strings: Vec<String> = StringEnumerator::new(&digits, 2).iter().collect();
    assert_eq!(
        strings,
        vec!["00", "01", "02", "10", "11", "12", "20", "21", "22"]
    );
    let mut sorted = strings.clone();
    sorted.sort();
    assert_eq!(strings, sorted);
}

#[test]
fn test_count_matches_iteration() {
    let hex = chars::lowercase_hexadecimal();
    let enumerator = StringEnumerator::new(hex, 3);
    assert_eq!(enumerator.count(), Some(4096));
    assert_eq!(enumerator.iter().count(), 4096);
}

#[test]
fn test_accessors() {
    let ab = set("ab");
    let enumerator = StringEnumerator::new(&ab, 5);
    assert_eq!(enumerator.length(), 5);
    assert_eq!(enumerator.char_set(), &ab);
}

#[test]
fn test_for_loop_over_reference() {
    let ab = set("ab");
    let enumerator = StringEnumerator::new(&ab, 2);
    let mut seen = Vec::new();
    for s in &enumerator {
        seen.push(s);
    }
    assert_eq!(seen, vec!["aa", "ab", "ba", "bb"]);
}

#[test]
fn test_iterator_is_fused() {
    let x = set("x");
    let mut strings = StringEnumerator::new(&x, 2).iter();
    assert_eq!(strings.next().as_deref(), Some("xx"));
    assert_eq!(strings.next(), None);
    assert_eq!(strings.next(), None);
}

#[test]
fn test_wide_characters() {
    let greek = set("αβ");
    let strings: Vec<String> = StringEnumerator::new(&greek, 2).iter().collect();
    assert_eq!(strings, vec!["αα", "αβ", "βα", "ββ"]);
}

#[test]
fn test_code_point_members_enumerate_as_chars() {
    let set = chars::char_set![0x41u32..=0x42].unwrap();
    let strings: Vec<String> = set.strings_of_length(2).collect();
    assert_eq!(strings, vec!["AA", "AB", "BA", "BB"]);
}

#[test]
fn test_strings_of_length_exclusive_range() {
    let ab = set("ab");
    let strings: Vec<String> = ab.strings_of_length(1..3).collect();
    assert_eq!(strings.len(), 2 + 4);
    assert!(ab.strings_of_length(2..2).next().is_none());
}

#[test]
fn test_strings_of_length_explicit_spec() {
    let ab = set("ab");
    let spec = LengthSpec::OneOf(vec![3, 1, 3]);
    let strings: Vec<String> = ab.strings_of_length(spec).collect();
    assert_eq!(strings.len(), 2 + 8);
    assert_eq!(strings[0], "a");
    assert_eq!(strings[2], "aaa");
}

#[test]
fn test_large_space_is_lazy() {
    let alnum = chars::alpha_numeric();
    let first: Vec<String> = alnum.strings_of_length(10).take(3).collect();
    assert_eq!(first, vec!["0000000000", "0000000001", "0000000002"]);
}

#[test]
fn test_huge_length_range_starts_immediately() {
    let ab = set("ab");
    let mut strings = ab.strings_of_length(1..=usize::MAX);
    assert_eq!(strings.next().as_deref(), Some("a"));
    assert_eq!(strings.next().as_deref(), Some("b"));
    assert_eq!(strings.next().as_deref(), Some("aa"));
}
