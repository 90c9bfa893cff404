//! AVL tree maintenance engine.
//!
//! [`AvlTree`] keeps a set of unique, totally ordered keys in a binary
//! search tree whose every node has balance factor in {-1, 0, 1}. Each node
//! exclusively owns its children and caches the height of its subtree.
//!
//! | Operation | Cost | Notes |
//! |-----------|------|-------|
//! | `insert` | O(log n) | at most one rebalance per insert |
//! | `delete` | O(log n) | may rebalance every ancestor |
//! | `search` | O(log n) | read-only, steppable |
//! | `snapshot` | O(n) | owned copy of the shape |
//!
//! Every operation has an `_observed` twin that reports its steps to an
//! [`Observer`]; the plain versions use [`Silent`].

mod delete;
mod event;
mod insert;
mod node;
mod search;
mod snapshot;
mod stats;
mod validate;

use std::fmt;

use log::debug;
use smallvec::SmallVec;

pub use event::{Direction, Event, Imbalance, Observer, Silent};
pub use search::{Search, SearchSteps, Step};
pub use snapshot::{Snapshot, SnapshotNode};
pub use stats::RotationStats;
pub use validate::InvariantViolation;

use insert::Placement;
use node::{Link, Node};
use validate::Shape;

/// A self-balancing binary search tree of unique keys.
#[derive(Clone)]
pub struct AvlTree<K> {
    root: Link<K>,
    len: usize,
}

impl<K> Default for AvlTree<K> {
    fn default() -> Self {
        return Self::new();
    }
}

impl<K> AvlTree<K> {
    /// Create an empty tree.
    pub const fn new() -> AvlTree<K> {
        return AvlTree { root: None, len: 0 };
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        return self.len;
    }

    pub fn is_empty(&self) -> bool {
        return self.len == 0;
    }

    /// Height of the whole tree: 0 when empty, 1 for a single key.
    pub fn height(&self) -> u32 {
        return node::height(&self.root);
    }

    /// The key at the root.
    pub fn root(&self) -> Option<&K> {
        return self.root.as_ref().map(|n| &n.key);
    }

    /// Smallest key.
    pub fn min(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        return Some(&node.key);
    }

    /// Largest key.
    pub fn max(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        return Some(&node.key);
    }

    /// Remove every key.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
        debug!("cleared tree");
    }

    /// Keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        return Iter::new(self.root.as_deref(), self.len);
    }

    /// Copy out the current shape.
    pub fn snapshot(&self) -> Snapshot<K>
    where
        K: Clone,
    {
        return Snapshot::new(self.root.as_deref().map(snapshot_node));
    }
}

fn snapshot_node<K: Clone>(node: &Node<K>) -> SnapshotNode<K> {
    return SnapshotNode {
        value: node.key.clone(),
        height: node.height,
        left: node.left.as_deref().map(|n| Box::new(snapshot_node(n))),
        right: node.right.as_deref().map(|n| Box::new(snapshot_node(n))),
    };
}

impl<K: Ord> AvlTree<K> {
    /// Add `key`. Returns `false`, leaving the tree untouched, if it was
    /// already present.
    pub fn insert(&mut self, key: K) -> bool {
        return self.insert_observed(key, &mut Silent);
    }

    pub fn insert_observed<O>(&mut self, key: K, observer: &mut O) -> bool
    where
        O: Observer<K> + ?Sized,
    {
        let (root, placement) = insert::insert(self.root.take(), key, observer);
        self.root = Some(root);

        let inserted = placement != Placement::Duplicate;
        if inserted {
            self.len += 1;
        }
        debug!(
            "insert {}: len {}, height {}",
            if inserted { "added a key" } else { "ignored a duplicate" },
            self.len,
            self.height()
        );
        return inserted;
    }

    /// Remove `key`. Returns `false`, leaving the tree untouched, if it was
    /// not present.
    pub fn delete(&mut self, key: &K) -> bool {
        return self.delete_observed(key, &mut Silent);
    }

    pub fn delete_observed<O>(&mut self, key: &K, observer: &mut O) -> bool
    where
        O: Observer<K> + ?Sized,
    {
        let (root, removed) = delete::delete(self.root.take(), key, observer);
        self.root = root;

        let deleted = removed.is_some();
        if deleted {
            self.len -= 1;
        } else {
            observer.observe(Event::Absent { key });
        }
        debug!(
            "delete {}: len {}, height {}",
            if deleted { "removed a key" } else { "found nothing" },
            self.len,
            self.height()
        );
        return deleted;
    }

    /// Walk from the root towards `key`, one step per call.
    pub fn search_steps<'a>(&'a self, key: &'a K) -> SearchSteps<'a, K> {
        return SearchSteps::new(self.root.as_deref(), key);
    }

    /// Search for `key`, keeping the path that was walked.
    pub fn search<'a>(&'a self, key: &'a K) -> Search<'a, K> {
        return Search::run(self.search_steps(key), |_| {});
    }

    /// Search for `key`, calling `on_visit` for every node examined, root
    /// first, before it is compared with `key`.
    pub fn search_with(&self, key: &K, mut on_visit: impl FnMut(&K)) -> bool {
        for step in self.search_steps(key) {
            match step {
                Step::Visit(visited) => on_visit(visited),
                Step::Found(_) => return true,
                Step::NotFound => return false,
            }
        }
        return false;
    }

    /// Search for `key`, reporting `Visit` per node then `Found` or `NotFound`.
    pub fn search_observed<'a, O>(&'a self, key: &'a K, observer: &mut O) -> Search<'a, K>
    where
        O: Observer<K> + ?Sized,
    {
        let search = Search::run(self.search_steps(key), |step| match step {
            Step::Visit(visited) => observer.observe(Event::Visit { key: visited }),
            Step::Found(found) => observer.observe(Event::Found { key: found }),
            Step::NotFound => observer.observe(Event::NotFound { key }),
        });
        debug!(
            "search {} after visiting {} nodes",
            if search.is_found() { "hit" } else { "missed" },
            search.path().len()
        );
        return search;
    }

    pub fn contains(&self, key: &K) -> bool {
        return self.get(key).is_some();
    }

    /// The stored key equal to `key`.
    pub fn get(&self, key: &K) -> Option<&K> {
        return self.find(key).map(|n| &n.key);
    }

    /// Cached height of the subtree rooted at `key`.
    pub fn node_height(&self, key: &K) -> Option<u32> {
        return self.find(key).map(|n| n.height);
    }

    /// Balance factor of the node holding `key`.
    pub fn balance_factor(&self, key: &K) -> Option<i32> {
        return self.find(key).map(|n| n.balance());
    }

    fn find(&self, key: &K) -> Option<&Node<K>> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                std::cmp::Ordering::Less => node.left.as_deref(),
                std::cmp::Ordering::Greater => node.right.as_deref(),
                std::cmp::Ordering::Equal => return Some(node),
            };
        }
        return None;
    }

    /// Check every structural invariant and the cached length.
    pub fn validate(&self) -> Result<(), InvariantViolation>
    where
        K: fmt::Debug,
    {
        let counted = validate::check(self.root.as_deref())?;
        if counted != self.len {
            return Err(InvariantViolation::Length {
                reported: self.len,
                counted,
            });
        }
        return Ok(());
    }
}

impl<K> Shape for Node<K> {
    type Key = K;

    fn key(&self) -> &K {
        return &self.key;
    }

    fn cached_height(&self) -> u32 {
        return self.height;
    }

    fn left(&self) -> Option<&Self> {
        return self.left.as_deref();
    }

    fn right(&self) -> Option<&Self> {
        return self.right.as_deref();
    }
}

impl<K: fmt::Debug> fmt::Debug for AvlTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_set().entries(self.iter()).finish();
    }
}

impl<K: Ord> FromIterator<K> for AvlTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        return tree;
    }
}

impl<K: Ord> Extend<K> for AvlTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a AvlTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        return self.iter();
    }
}

/// In-order iterator over the keys of an [`AvlTree`].
pub struct Iter<'a, K> {
    stack: SmallVec<[&'a Node<K>; 32]>,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    fn new(root: Option<&'a Node<K>>, len: usize) -> Iter<'a, K> {
        let mut iter = Iter {
            stack: SmallVec::new(),
            remaining: len,
        };
        iter.descend_left(root);
        return iter;
    }

    fn descend_left(&mut self, mut current: Option<&'a Node<K>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let node = self.stack.pop()?;
        self.descend_left(node.right.as_deref());
        self.remaining -= 1;
        return Some(&node.key);
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        return (self.remaining, Some(self.remaining));
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}
