//! The `OrderedSet` trait defines the interface shared by every tree in
//! this crate and by `arbor::AvlTree`.
//!
//! The trait is deliberately small: enough to run a conformance suite and a
//! benchmark across implementations, and to compare their shapes through
//! [`Snapshot`].

use arbor::{AvlTree, Snapshot};

/// A set of unique keys kept in a binary search tree.
pub trait OrderedSet<K: Ord>: Default {
    /// Name used in benchmark reports.
    const NAME: &'static str;

    /// Whether the implementation keeps every balance factor within
    /// {-1, 0, 1}.
    const BALANCED: bool;

    /// Add `key`. Returns `false` if it was already present.
    fn insert(&mut self, key: K) -> bool;

    /// Remove `key`. Returns `false` if it was not present.
    fn remove(&mut self, key: &K) -> bool;

    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        return self.len() == 0;
    }

    /// Height of the tree: 0 when empty.
    fn height(&self) -> u32;

    /// Keys compared while searching for `key`, root first.
    fn search_path(&self, key: &K) -> Vec<K>
    where
        K: Clone;

    /// Keys in ascending order.
    fn to_vec(&self) -> Vec<K>
    where
        K: Clone;

    /// The shape of the tree, with heights.
    fn snapshot(&self) -> Snapshot<K>
    where
        K: Clone;
}

impl<K: Ord> OrderedSet<K> for AvlTree<K> {
    const NAME: &'static str = "AvlTree";
    const BALANCED: bool = true;

    fn insert(&mut self, key: K) -> bool {
        return AvlTree::insert(self, key);
    }

    fn remove(&mut self, key: &K) -> bool {
        return self.delete(key);
    }

    fn contains(&self, key: &K) -> bool {
        return AvlTree::contains(self, key);
    }

    fn len(&self) -> usize {
        return AvlTree::len(self);
    }

    fn height(&self) -> u32 {
        return AvlTree::height(self);
    }

    fn search_path(&self, key: &K) -> Vec<K>
    where
        K: Clone,
    {
        return self.search(key).path().iter().map(|k| (*k).clone()).collect();
    }

    fn to_vec(&self) -> Vec<K>
    where
        K: Clone,
    {
        return self.iter().cloned().collect();
    }

    fn snapshot(&self) -> Snapshot<K>
    where
        K: Clone,
    {
        return AvlTree::snapshot(self);
    }
}
