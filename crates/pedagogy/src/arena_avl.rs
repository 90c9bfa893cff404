//! An AVL tree stored in a flat `Vec`.
//!
//! Nodes live in slots addressed by `u32` indices, with `NONE` standing in
//! for a missing child. Freed slots go on a free list and are reused by the
//! next insert, so a tree that grows and shrinks does not fragment the heap.
//!
//! The rotation rules match `arbor::AvlTree` exactly:
//!
//! | Imbalance | Insert picks | Delete picks |
//! |-----------|--------------|--------------|
//! | left-heavy | LR if the key went right of the left child, else LL | LL if the left child's balance >= 0, else LR |
//! | right-heavy | RL if the key went left of the right child, else RR | RR if the right child's balance <= 0, else RL |
//!
//! so both produce identical shapes for the same sequence of operations.
//! Keys are `Copy` because slots are read by value.

use std::cmp::Ordering;

use arbor::{Snapshot, SnapshotNode};
use log::trace;

use crate::ordered_set::OrderedSet;

/// Sentinel index for "no node".
const NONE: u32 = u32::MAX;

#[derive(Clone, Copy, Debug)]
struct Slot<K> {
    key: K,
    height: u32,
    left: u32,
    right: u32,
}

#[derive(Clone, Debug)]
pub struct ArenaAvl<K> {
    slots: Vec<Slot<K>>,
    free: Vec<u32>,
    root: u32,
    len: usize,
}

impl<K> Default for ArenaAvl<K> {
    fn default() -> Self {
        return ArenaAvl {
            slots: Vec::new(),
            free: Vec::new(),
            root: NONE,
            len: 0,
        };
    }
}

impl<K: Ord + Copy> ArenaAvl<K> {
    /// Slots allocated, live or free.
    pub fn capacity(&self) -> usize {
        return self.slots.len();
    }

    fn slot(&self, idx: u32) -> &Slot<K> {
        return &self.slots[idx as usize];
    }

    fn slot_mut(&mut self, idx: u32) -> &mut Slot<K> {
        return &mut self.slots[idx as usize];
    }

    fn height_of(&self, idx: u32) -> u32 {
        if idx == NONE {
            return 0;
        }
        return self.slot(idx).height;
    }

    fn balance_of(&self, idx: u32) -> i32 {
        if idx == NONE {
            return 0;
        }
        let slot = self.slot(idx);
        return self.height_of(slot.left) as i32 - self.height_of(slot.right) as i32;
    }

    fn update_height(&mut self, idx: u32) {
        let slot = *self.slot(idx);
        self.slot_mut(idx).height = 1 + self.height_of(slot.left).max(self.height_of(slot.right));
    }

    fn alloc(&mut self, key: K) -> u32 {
        let slot = Slot {
            key,
            height: 1,
            left: NONE,
            right: NONE,
        };
        if let Some(idx) = self.free.pop() {
            *self.slot_mut(idx) = slot;
            return idx;
        }
        let idx = self.slots.len() as u32;
        assert!(idx != NONE, "ArenaAvl is full");
        self.slots.push(slot);
        return idx;
    }

    fn release(&mut self, idx: u32) {
        trace!("freeing slot {idx}");
        self.free.push(idx);
    }

    /// Lift the left child over `idx`. Returns the new subtree root.
    fn rotate_right(&mut self, idx: u32) -> u32 {
        let pivot = self.slot(idx).left;
        let inner = self.slot(pivot).right;
        self.slot_mut(pivot).right = idx;
        self.slot_mut(idx).left = inner;
        self.update_height(idx);
        self.update_height(pivot);
        return pivot;
    }

    /// Lift the right child over `idx`. Returns the new subtree root.
    fn rotate_left(&mut self, idx: u32) -> u32 {
        let pivot = self.slot(idx).right;
        let inner = self.slot(pivot).left;
        self.slot_mut(pivot).left = idx;
        self.slot_mut(idx).right = inner;
        self.update_height(idx);
        self.update_height(pivot);
        return pivot;
    }

    fn insert_at(&mut self, idx: u32, key: K) -> (u32, bool) {
        if idx == NONE {
            return (self.alloc(key), true);
        }

        let slot = *self.slot(idx);
        match key.cmp(&slot.key) {
            Ordering::Less => {
                let (left, inserted) = self.insert_at(slot.left, key);
                if !inserted {
                    return (idx, false);
                }
                self.slot_mut(idx).left = left;
            }
            Ordering::Greater => {
                let (right, inserted) = self.insert_at(slot.right, key);
                if !inserted {
                    return (idx, false);
                }
                self.slot_mut(idx).right = right;
            }
            Ordering::Equal => return (idx, false),
        }

        self.update_height(idx);
        let balance = self.balance_of(idx);
        if balance > 1 {
            let left = self.slot(idx).left;
            if key > self.slot(left).key {
                let lifted = self.rotate_left(left);
                self.slot_mut(idx).left = lifted;
            }
            return (self.rotate_right(idx), true);
        }
        if balance < -1 {
            let right = self.slot(idx).right;
            if key < self.slot(right).key {
                let lifted = self.rotate_right(right);
                self.slot_mut(idx).right = lifted;
            }
            return (self.rotate_left(idx), true);
        }
        return (idx, true);
    }

    fn remove_at(&mut self, idx: u32, key: &K) -> (u32, bool) {
        if idx == NONE {
            return (NONE, false);
        }

        let slot = *self.slot(idx);
        match key.cmp(&slot.key) {
            Ordering::Less => {
                let (left, removed) = self.remove_at(slot.left, key);
                if !removed {
                    return (idx, false);
                }
                self.slot_mut(idx).left = left;
            }
            Ordering::Greater => {
                let (right, removed) = self.remove_at(slot.right, key);
                if !removed {
                    return (idx, false);
                }
                self.slot_mut(idx).right = right;
            }
            Ordering::Equal => {
                if slot.left == NONE || slot.right == NONE {
                    self.release(idx);
                    let child = if slot.left == NONE { slot.right } else { slot.left };
                    return (child, true);
                }
                let (right, successor) = self.take_min(slot.right);
                let slot = self.slot_mut(idx);
                slot.right = right;
                slot.key = successor;
            }
        }
        return (self.settle(idx), true);
    }

    /// Detach the smallest key below `idx`, rebalancing on the way back up.
    fn take_min(&mut self, idx: u32) -> (u32, K) {
        let slot = *self.slot(idx);
        if slot.left == NONE {
            self.release(idx);
            return (slot.right, slot.key);
        }
        let (left, min) = self.take_min(slot.left);
        self.slot_mut(idx).left = left;
        return (self.settle(idx), min);
    }

    fn settle(&mut self, idx: u32) -> u32 {
        self.update_height(idx);
        let balance = self.balance_of(idx);
        if balance > 1 {
            let left = self.slot(idx).left;
            if self.balance_of(left) < 0 {
                let lifted = self.rotate_left(left);
                self.slot_mut(idx).left = lifted;
            }
            return self.rotate_right(idx);
        }
        if balance < -1 {
            let right = self.slot(idx).right;
            if self.balance_of(right) > 0 {
                let lifted = self.rotate_right(right);
                self.slot_mut(idx).right = lifted;
            }
            return self.rotate_left(idx);
        }
        return idx;
    }

    fn snapshot_at(&self, idx: u32) -> Option<SnapshotNode<K>> {
        if idx == NONE {
            return None;
        }
        let slot = self.slot(idx);
        return Some(SnapshotNode {
            value: slot.key,
            height: slot.height,
            left: self.snapshot_at(slot.left).map(Box::new),
            right: self.snapshot_at(slot.right).map(Box::new),
        });
    }
}

impl<K: Ord + Copy> OrderedSet<K> for ArenaAvl<K> {
    const NAME: &'static str = "ArenaAvl";
    const BALANCED: bool = true;

    fn insert(&mut self, key: K) -> bool {
        let (root, inserted) = self.insert_at(self.root, key);
        self.root = root;
        if inserted {
            self.len += 1;
        }
        return inserted;
    }

    fn remove(&mut self, key: &K) -> bool {
        let (root, removed) = self.remove_at(self.root, key);
        self.root = root;
        if removed {
            self.len -= 1;
        }
        return removed;
    }

    fn contains(&self, key: &K) -> bool {
        let mut idx = self.root;
        while idx != NONE {
            let slot = self.slot(idx);
            idx = match key.cmp(&slot.key) {
                Ordering::Less => slot.left,
                Ordering::Greater => slot.right,
                Ordering::Equal => return true,
            };
        }
        return false;
    }

    fn len(&self) -> usize {
        return self.len;
    }

    fn height(&self) -> u32 {
        return self.height_of(self.root);
    }

    fn search_path(&self, key: &K) -> Vec<K> {
        let mut path = Vec::new();
        let mut idx = self.root;
        while idx != NONE {
            let slot = self.slot(idx);
            path.push(slot.key);
            idx = match key.cmp(&slot.key) {
                Ordering::Less => slot.left,
                Ordering::Greater => slot.right,
                Ordering::Equal => NONE,
            };
        }
        return path;
    }

    fn to_vec(&self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.len);
        let mut stack: Vec<u32> = Vec::new();
        let mut idx = self.root;
        loop {
            while idx != NONE {
                stack.push(idx);
                idx = self.slot(idx).left;
            }
            let Some(top) = stack.pop() else {
                break;
            };
            keys.push(self.slot(top).key);
            idx = self.slot(top).right;
        }
        return keys;
    }

    fn snapshot(&self) -> Snapshot<K> {
        return Snapshot::new(self.snapshot_at(self.root));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotations_keep_balance() {
        let mut tree = ArenaAvl::default();
        for key in [10, 20, 30] {
            tree.insert(key);
        }
        assert_eq!(tree.search_path(&30), vec![20, 30]);
        assert_eq!(tree.height(), 2);

        let mut tree = ArenaAvl::default();
        for key in [30, 10, 20] {
            tree.insert(key);
        }
        assert_eq!(tree.search_path(&10), vec![20, 10]);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut tree = ArenaAvl::default();
        for key in 0..16 {
            tree.insert(key);
        }
        for key in 0..8 {
            assert!(tree.remove(&key));
        }
        for key in 100..108 {
            tree.insert(key);
        }
        assert_eq!(tree.capacity(), 16);
        assert_eq!(tree.len(), 16);
        assert_eq!(tree.snapshot().check(), Ok(()));
    }

    #[test]
    fn remove_missing_key() {
        let mut tree = ArenaAvl::default();
        assert!(!tree.remove(&1));
        tree.insert(1);
        assert!(!tree.remove(&2));
        assert!(tree.remove(&1));
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
    }
}
