//! Owned, read-only copies of a tree's shape.
//!
//! A renderer lays out a [`Snapshot`] instead of walking live nodes, so it
//! can hold on to the picture while the tree keeps changing. Two snapshots
//! compare equal when they have the same keys in the same positions with the
//! same cached heights.

use std::fmt;

use super::validate::{self, InvariantViolation, Shape};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapshotNode<K> {
    pub value: K,
    pub height: u32,
    pub left: Option<Box<SnapshotNode<K>>>,
    pub right: Option<Box<SnapshotNode<K>>>,
}

impl<K> SnapshotNode<K> {
    /// A node with no children and height 1.
    pub fn leaf(value: K) -> SnapshotNode<K> {
        return SnapshotNode {
            value,
            height: 1,
            left: None,
            right: None,
        };
    }

    /// A node whose height is derived from its children.
    pub fn branch(value: K, left: Option<SnapshotNode<K>>, right: Option<SnapshotNode<K>>) -> SnapshotNode<K> {
        let height = 1 + left
            .as_ref()
            .map_or(0, |n| n.height)
            .max(right.as_ref().map_or(0, |n| n.height));
        return SnapshotNode {
            value,
            height,
            left: left.map(Box::new),
            right: right.map(Box::new),
        };
    }

    /// `height(left) - height(right)` as recorded in the snapshot.
    pub fn balance(&self) -> i32 {
        let left = self.left.as_ref().map_or(0, |n| n.height);
        let right = self.right.as_ref().map_or(0, |n| n.height);
        return left as i32 - right as i32;
    }
}

impl<K> Shape for SnapshotNode<K> {
    type Key = K;

    fn key(&self) -> &K {
        return &self.value;
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

/// The shape of a whole tree at one point in time.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot<K> {
    pub root: Option<Box<SnapshotNode<K>>>,
}

impl<K> Default for Snapshot<K> {
    fn default() -> Self {
        return Snapshot { root: None };
    }
}

impl<K> Snapshot<K> {
    pub fn new(root: Option<SnapshotNode<K>>) -> Snapshot<K> {
        return Snapshot { root: root.map(Box::new) };
    }

    pub fn root(&self) -> Option<&SnapshotNode<K>> {
        return self.root.as_deref();
    }

    pub fn is_empty(&self) -> bool {
        return self.root.is_none();
    }

    /// Height of the root as recorded, 0 when empty.
    pub fn height(&self) -> u32 {
        return self.root.as_ref().map_or(0, |n| n.height);
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&SnapshotNode<K>> = self.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }
        return count;
    }

    /// Keys in ascending (in-order) order.
    pub fn keys(&self) -> Vec<&K> {
        let mut keys = Vec::new();
        let mut stack: Vec<&SnapshotNode<K>> = Vec::new();
        let mut current = self.root();
        while current.is_some() || !stack.is_empty() {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            if let Some(node) = stack.pop() {
                keys.push(&node.value);
                current = node.right.as_deref();
            }
        }
        return keys;
    }

    /// Keys in pre-order, root first. Two snapshots built from the same keys
    /// have the same pre-order exactly when they have the same shape.
    pub fn preorder(&self) -> Vec<&K> {
        let mut keys = Vec::new();
        let mut stack: Vec<&SnapshotNode<K>> = self.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            keys.push(&node.value);
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
        }
        return keys;
    }

    /// Verify BST order, cached heights and AVL balance.
    pub fn check(&self) -> Result<(), InvariantViolation>
    where
        K: Ord + fmt::Debug,
    {
        validate::check(self.root())?;
        return Ok(());
    }
}

/// Renders the tree on its side: right subtree above, left below, one node
/// per line, indented by depth.
impl<K: fmt::Display> fmt::Display for Snapshot<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self.root() {
            Some(root) => write_sideways(f, root, 0),
            None => writeln!(f, "(empty)"),
        };
    }
}

fn write_sideways<K: fmt::Display>(f: &mut fmt::Formatter<'_>, node: &SnapshotNode<K>, depth: usize) -> fmt::Result {
    if let Some(right) = node.right.as_deref() {
        write_sideways(f, right, depth + 1)?;
    }
    writeln!(f, "{:indent$}{} (h={})", "", node.value, node.height, indent = depth * 4)?;
    if let Some(left) = node.left.as_deref() {
        write_sideways(f, left, depth + 1)?;
    }
    return Ok(());
}
