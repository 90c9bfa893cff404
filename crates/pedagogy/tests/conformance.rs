//! Conformance test suite for ordered-set implementations.
//!
//! All implementations of the `OrderedSet` trait must pass these tests.
//! The tests verify:
//!
//! 1. Basic operations: insert, remove, contains, len
//! 2. Search order: paths start at the root and end at the target
//! 3. Shape: balanced implementations stay within the AVL height bound
//! 4. Agreement: `ArenaAvl` builds exactly the trees `AvlTree` builds
//!
//! # Usage
//!
//! To test a new implementation, add it to the `run_conformance_tests!`
//! invocations at the bottom of this file.

use std::collections::BTreeSet;

use arbor::AvlTree;
use pedagogy::{ArenaAvl, NaiveBst, OrderedSet};
use proptest::prelude::*;

// =============================================================================
// Basic Operation Tests
// =============================================================================

/// New keys are reported as inserted, duplicates are not.
pub fn test_insert_reports_new_keys<S: OrderedSet<i32>>() {
    let mut set = S::default();
    assert!(set.is_empty());
    assert!(set.insert(5));
    assert!(set.insert(3));
    assert!(!set.insert(5));
    assert_eq!(set.len(), 2);
    assert_eq!(set.to_vec(), vec![3, 5]);
}

/// Removing present and absent keys.
pub fn test_remove<S: OrderedSet<i32>>() {
    let mut set = S::default();
    assert!(!set.remove(&1));
    for key in [50, 30, 70, 20, 40, 60, 80] {
        set.insert(key);
    }
    assert!(set.remove(&50));
    assert!(!set.remove(&50));
    assert!(!set.contains(&50));
    assert_eq!(set.to_vec(), vec![20, 30, 40, 60, 70, 80]);
    assert_eq!(set.snapshot().keys(), vec![&20, &30, &40, &60, &70, &80]);
}

/// Removing every key empties the set.
pub fn test_remove_all<S: OrderedSet<i32>>() {
    let mut set = S::default();
    for key in 0..100 {
        set.insert((key * 37) % 100);
    }
    assert_eq!(set.len(), 100);
    for key in 0..100 {
        assert!(set.remove(&key));
    }
    assert!(set.is_empty());
    assert_eq!(set.height(), 0);
    assert!(set.snapshot().is_empty());
}

// =============================================================================
// Search Tests
// =============================================================================

/// Paths start at the root and end at the target when it exists.
pub fn test_search_path<S: OrderedSet<i32>>() {
    let mut set = S::default();
    for key in [50, 30, 70, 20, 40] {
        set.insert(key);
    }
    let root = set.snapshot().root().map(|n| n.value);

    let path = set.search_path(&40);
    assert_eq!(path.first().copied(), root);
    assert_eq!(path.last(), Some(&40));

    let miss = set.search_path(&45);
    assert!(!miss.contains(&45));
    assert!(miss.len() as u32 <= set.height());
}

/// Searching an empty set visits nothing.
pub fn test_search_empty<S: OrderedSet<i32>>() {
    let set = S::default();
    assert!(set.search_path(&1).is_empty());
    assert!(!set.contains(&1));
}

// =============================================================================
// Shape Tests
// =============================================================================

/// Balanced implementations keep the AVL height bound on sorted input.
pub fn test_sorted_input_height<S: OrderedSet<i32>>() {
    let mut set = S::default();
    for n in 1..=500 {
        set.insert(n);
        if S::BALANCED {
            let bound = 1.45 * f64::from(n as u32 + 2).log2();
            assert!(f64::from(set.height()) <= bound, "{} too tall at {n}", S::NAME);
        }
    }
    if S::BALANCED {
        assert_eq!(set.snapshot().check(), Ok(()));
    } else {
        assert_eq!(set.height(), 500);
    }
}

/// Snapshot heights are consistent with the reported height.
pub fn test_snapshot_height<S: OrderedSet<i32>>() {
    let mut set = S::default();
    for key in [8, 4, 12, 2, 6, 10, 14, 1] {
        set.insert(key);
    }
    let snapshot = set.snapshot();
    assert_eq!(snapshot.height(), set.height());
    assert_eq!(snapshot.len(), set.len());
}

macro_rules! run_conformance_tests {
    ($impl_name:ident, $set:ty) => {
        mod $impl_name {
            use super::*;

            #[test]
            fn insert_reports_new_keys() {
                test_insert_reports_new_keys::<$set>();
            }

            #[test]
            fn remove() {
                test_remove::<$set>();
            }

            #[test]
            fn remove_all() {
                test_remove_all::<$set>();
            }

            #[test]
            fn search_path() {
                test_search_path::<$set>();
            }

            #[test]
            fn search_empty() {
                test_search_empty::<$set>();
            }

            #[test]
            fn sorted_input_height() {
                test_sorted_input_height::<$set>();
            }

            #[test]
            fn snapshot_height() {
                test_snapshot_height::<$set>();
            }
        }
    };
}

// =============================================================================
// Tests for implementations
// =============================================================================

run_conformance_tests!(avl_tree, AvlTree<i32>);
run_conformance_tests!(arena_avl, ArenaAvl<i32>);
run_conformance_tests!(naive_bst, NaiveBst<i32>);

// =============================================================================
// Cross-implementation properties
// =============================================================================

#[derive(Clone, Debug)]
enum Op {
    Insert(i16),
    Remove(i16),
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-50i16..50).prop_map(Op::Insert),
        2 => (-50i16..50).prop_map(Op::Remove),
    ]
}

fn apply<S: OrderedSet<i16>>(set: &mut S, op: &Op) -> bool {
    return match *op {
        Op::Insert(key) => set.insert(key),
        Op::Remove(key) => set.remove(&key),
    };
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn arena_matches_boxed_tree(ops in prop::collection::vec(arbitrary_op(), 0..200)) {
        let mut boxed: AvlTree<i16> = AvlTree::new();
        let mut arena: ArenaAvl<i16> = ArenaAvl::default();
        for op in &ops {
            prop_assert_eq!(apply(&mut boxed, op), apply(&mut arena, op));
            prop_assert_eq!(boxed.snapshot(), arena.snapshot());
        }
    }

    #[test]
    fn all_agree_on_membership(ops in prop::collection::vec(arbitrary_op(), 0..200)) {
        let mut model = BTreeSet::new();
        let mut naive: NaiveBst<i16> = NaiveBst::default();
        let mut arena: ArenaAvl<i16> = ArenaAvl::default();
        for op in &ops {
            let expected = match *op {
                Op::Insert(key) => model.insert(key),
                Op::Remove(key) => model.remove(&key),
            };
            prop_assert_eq!(apply(&mut naive, op), expected);
            prop_assert_eq!(apply(&mut arena, op), expected);
        }
        let keys: Vec<i16> = model.into_iter().collect();
        prop_assert_eq!(naive.to_vec(), keys.clone());
        prop_assert_eq!(arena.to_vec(), keys);
    }
}
