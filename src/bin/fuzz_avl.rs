//! AFL fuzz harness for the AVL tree.
//!
//! Each input is decoded into a sequence of insert, delete and search
//! operations over byte keys. After every operation the tree is checked
//! against a `BTreeSet` model:
//! 1. Every structural invariant holds (`validate`)
//! 2. Membership and length agree with the model
//! 3. Search paths are never longer than the tree is tall
//!
//! Run with: cargo afl build --features afl --bin fuzz_avl

use std::collections::BTreeSet;

use afl::fuzz;
use arbor::{AvlTree, Event, RotationStats};

#[derive(Debug, Clone, Copy)]
enum FuzzOp {
    Insert(u8),
    Delete(u8),
    Search(u8),
    /// Delete the current minimum, stressing successor replacement on the left spine.
    DeleteMin,
}

impl FuzzOp {
    fn from_bytes(bytes: &[u8]) -> Option<(FuzzOp, &[u8])> {
        let (&tag, rest) = bytes.split_first()?;
        match tag % 4 {
            3 => return Some((FuzzOp::DeleteMin, rest)),
            op => {
                let (&key, rest) = rest.split_first()?;
                let op = match op {
                    0 => FuzzOp::Insert(key),
                    1 => FuzzOp::Delete(key),
                    _ => FuzzOp::Search(key),
                };
                return Some((op, rest));
            }
        }
    }
}

fn main() {
    fuzz!(|data: &[u8]| {
        let mut tree: AvlTree<u8> = AvlTree::new();
        let mut model: BTreeSet<u8> = BTreeSet::new();
        let mut stats = RotationStats::new();
        let mut events: Vec<Event<u8>> = Vec::new();
        let mut remaining = data;

        while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
            remaining = rest;
            events.clear();

            match op {
                FuzzOp::Insert(key) => {
                    let inserted = tree.insert_observed(key, &mut (&mut stats, &mut events));
                    assert_eq!(inserted, model.insert(key), "insert {key} disagrees with model");
                    // Insertion rebalances at most once.
                    let rebalances = events
                        .iter()
                        .filter(|e| matches!(e, Event::Rebalance { .. }))
                        .count();
                    assert!(rebalances <= 1, "insert {key} rebalanced {rebalances} times");
                }
                FuzzOp::Delete(key) => {
                    let deleted = tree.delete_observed(&key, &mut (&mut stats, &mut events));
                    assert_eq!(deleted, model.remove(&key), "delete {key} disagrees with model");
                    if !deleted {
                        assert_eq!(events, vec![Event::Absent { key }]);
                    }
                }
                FuzzOp::Search(key) => {
                    let search = tree.search(&key);
                    assert_eq!(search.is_found(), model.contains(&key));
                    assert!(search.path().len() <= tree.height() as usize);
                }
                FuzzOp::DeleteMin => {
                    if let Some(&min) = model.iter().next() {
                        assert!(tree.delete(&min));
                        model.remove(&min);
                    }
                }
            }

            if let Err(violation) = tree.validate() {
                panic!("invariant broken after {op:?}: {violation}");
            }
            assert_eq!(tree.len(), model.len());
        }

        let keys: Vec<u8> = tree.iter().copied().collect();
        let expected: Vec<u8> = model.into_iter().collect();
        assert_eq!(keys, expected);
    });
}
