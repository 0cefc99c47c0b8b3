extern crate atn_runtime;

use atn_runtime::{Interval, IntervalSet};
use atn_runtime::token::{EOF, EPSILON};
use atn_runtime::util::set::{Contains, Difference, IsSubsetOf, IsSupersetOf, Subtract, UnionWith};

#[test]
fn complement_within_bounds() {
    let mut s = IntervalSet::of(3, 5);
    s.add_one(9);
    let c = s.complement(1, 10);
    assert_eq!(vec![1, 2, 6, 7, 8, 10], c.to_vec());
    assert!(!c.is_read_only());

    assert!(IntervalSet::new().complement(5, 4).is_empty());
    assert_eq!(IntervalSet::of(1, 10), IntervalSet::new().complement(1, 10));
}

#[test]
fn min_and_max() {
    let s: IntervalSet = vec![EOF, 4, 12].into_iter().collect();
    assert_eq!(Some(EOF), s.min_element());
    assert_eq!(Some(12), s.max_element());
    assert_eq!(None, IntervalSet::new().min_element());
}

#[test]
fn set_traits() {
    let big = IntervalSet::of(1, 10);
    let mut small = IntervalSet::of(2, 3);
    small.add_one(7);

    assert!(small.is_subset_of(&big));
    assert!(big.is_superset_of(&small));
    assert!(!big.is_subset_of(&small));
    assert!(Contains::contains(&big, &10));

    let diff = big.difference(&small);
    assert_eq!(vec![1, 4, 5, 6, 8, 9, 10], diff.to_vec());

    let mut u = IntervalSet::of_one(20);
    u.union_with(&small);
    assert_eq!(vec![2, 3, 7, 20], u.to_vec());
    u.subtract(&IntervalSet::of(0, 5));
    assert_eq!(vec![7, 20], u.to_vec());
}

#[test]
fn frozen_difference_is_writable() {
    let mut s = IntervalSet::of(1, 4);
    s.freeze();
    let mut d = s.difference(&IntervalSet::of_one(2));
    d.add_one(9);
    assert_eq!(vec![1, 3, 4, 9], d.to_vec());
}

#[test]
#[should_panic(expected = "read-only")]
fn frozen_sets_reject_additions() {
    let mut s = IntervalSet::of(1, 4);
    s.freeze();
    s.add_one(5);
}

#[test]
#[should_panic(expected = "read-only")]
fn frozen_sets_reject_removals() {
    let mut s = IntervalSet::of(1, 4);
    s.freeze();
    s.remove_one(2);
}

#[test]
fn equality_ignores_frozenness() {
    let mut a = IntervalSet::of(1, 4);
    let b = IntervalSet::of(1, 4);
    a.freeze();
    assert_eq!(a, b);
}

#[test]
fn display() {
    assert_eq!("{}", format!("{}", IntervalSet::new()));
    assert_eq!("7", format!("{}", IntervalSet::of_one(7)));
    assert_eq!("{1..3, 7}", format!("{}", vec![1, 2, 3, 7].into_iter().collect::<IntervalSet>()));
    assert_eq!("1..3", format!("{}", Interval::new(1, 3)));
}

#[test]
fn display_with_names() {
    let names = ["<INVALID>", "ID", "'+'"];
    let s: IntervalSet = vec![EOF, 1, 2].into_iter().collect();
    assert_eq!("{<EOF>, ID, '+'}", s.to_string_with_names(&names));
    assert_eq!("<EPSILON>", IntervalSet::of_one(EPSILON).to_string_with_names(&names));
    assert_eq!("9", IntervalSet::of_one(9).to_string_with_names(&names));
}
