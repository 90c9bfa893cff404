//! An unbalanced binary search tree.
//!
//! Insert and delete follow the textbook rules (successor replacement for
//! nodes with two children) and never rotate. On sorted input the tree is a
//! linked list, so every walk here is iterative, `Drop` included.

use std::cmp::Ordering;

use arbor::{Snapshot, SnapshotNode};

use crate::ordered_set::OrderedSet;

type Link<K> = Option<Box<Node<K>>>;

#[derive(Debug)]
struct Node<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,
}

#[derive(Debug)]
pub struct NaiveBst<K> {
    root: Link<K>,
    len: usize,
}

impl<K> Default for NaiveBst<K> {
    fn default() -> Self {
        return NaiveBst { root: None, len: 0 };
    }
}

impl<K> Drop for NaiveBst<K> {
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

/// Detach the smallest key of a non-empty subtree, splicing its right child
/// into its place.
fn take_min<K>(mut link: &mut Link<K>) -> Option<K> {
    loop {
        let has_left = match link.as_deref() {
            Some(node) => node.left.is_some(),
            None => return None,
        };
        if !has_left {
            break;
        }
        let Some(node) = link else {
            return None;
        };
        link = &mut node.left;
    }

    let node = link.take()?;
    let Node { key, right, .. } = *node;
    *link = right;
    return Some(key);
}

impl<K: Ord> OrderedSet<K> for NaiveBst<K> {
    const NAME: &'static str = "NaiveBst";
    const BALANCED: bool = false;

    fn insert(&mut self, key: K) -> bool {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return false,
            };
        }
        *link = Some(Box::new(Node {
            key,
            left: None,
            right: None,
        }));
        self.len += 1;
        return true;
    }

    fn remove(&mut self, key: &K) -> bool {
        let mut link = &mut self.root;
        loop {
            let order = match link.as_deref() {
                Some(node) => key.cmp(&node.key),
                None => return false,
            };
            if order == Ordering::Equal {
                break;
            }
            let Some(node) = link else {
                return false;
            };
            link = if order == Ordering::Less {
                &mut node.left
            } else {
                &mut node.right
            };
        }

        let Some(node) = link.as_mut() else {
            return false;
        };
        if node.left.is_some() && node.right.is_some() {
            if let Some(successor) = take_min(&mut node.right) {
                node.key = successor;
            }
        } else {
            let Some(node) = link.take() else {
                return false;
            };
            let Node { left, right, .. } = *node;
            *link = left.or(right);
        }
        self.len -= 1;
        return true;
    }

    fn contains(&self, key: &K) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        return false;
    }

    fn len(&self) -> usize {
        return self.len;
    }

    fn height(&self) -> u32 {
        let mut deepest = 0;
        let mut stack: Vec<(&Node<K>, u32)> = self.root.as_deref().map(|n| (n, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        return deepest;
    }

    fn search_path(&self, key: &K) -> Vec<K>
    where
        K: Clone,
    {
        let mut path = Vec::new();
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            path.push(node.key.clone());
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => None,
            };
        }
        return path;
    }

    fn to_vec(&self) -> Vec<K>
    where
        K: Clone,
    {
        let mut keys = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node<K>> = Vec::new();
        let mut current = self.root.as_deref();
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            let Some(node) = stack.pop() else {
                break;
            };
            keys.push(node.key.clone());
            current = node.right.as_deref();
        }
        return keys;
    }

    fn snapshot(&self) -> Snapshot<K>
    where
        K: Clone,
    {
        return Snapshot::new(self.root.as_deref().map(snapshot_node));
    }
}

fn snapshot_node<K: Clone>(node: &Node<K>) -> SnapshotNode<K> {
    return SnapshotNode::branch(
        node.key.clone(),
        node.left.as_deref().map(snapshot_node),
        node.right.as_deref().map(snapshot_node),
    );
}
