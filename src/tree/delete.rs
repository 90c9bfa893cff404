//! Recursive deletion with rebalancing at every ancestor.
//!
//! Unlike insertion, removing a node can shorten the whole path back to the
//! root, so every frame on the way up may need a fix. With no inserted key to
//! steer by, the rotation case is chosen from the heavy child's balance.

use std::cmp::Ordering;

use super::event::{Event, Imbalance, Observer};
use super::node::{balance, rebalance, Link, Node};

/// Remove `key` from the subtree.
///
/// Returns the new subtree root and the key that was removed, or the
/// untouched subtree and `None` when the key is absent.
pub(crate) fn delete<K, O>(link: Link<K>, key: &K, observer: &mut O) -> (Link<K>, Option<K>)
where
    K: Ord,
    O: Observer<K> + ?Sized,
{
    let Some(mut node) = link else {
        return (None, None);
    };

    let removed = match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, removed) = delete(node.left.take(), key, observer);
            node.left = left;
            removed
        }
        Ordering::Greater => {
            let (right, removed) = delete(node.right.take(), key, observer);
            node.right = right;
            removed
        }
        Ordering::Equal => {
            observer.observe(Event::Deleted { key: &node.key });
            match (node.left.take(), node.right.take()) {
                (None, None) => {
                    let Node { key, .. } = *node;
                    return (None, Some(key));
                }
                (Some(child), None) | (None, Some(child)) => {
                    let Node { key, .. } = *node;
                    return (Some(child), Some(key));
                }
                (Some(left), Some(right)) => {
                    // The successor node has no left child, so physically
                    // removing it is always the zero/one-child case.
                    let (right, successor) = take_min(right, observer);
                    observer.observe(Event::Successor {
                        key: &node.key,
                        successor: &successor,
                    });
                    node.left = Some(left);
                    node.right = right;
                    Some(std::mem::replace(&mut node.key, successor))
                }
            }
        }
    };

    if removed.is_none() {
        return (Some(node), None);
    }
    return (Some(settle(node, observer)), removed);
}

/// Detach the leftmost node of a subtree, returning the rest and its key.
fn take_min<K, O>(mut node: Box<Node<K>>, observer: &mut O) -> (Link<K>, K)
where
    O: Observer<K> + ?Sized,
{
    return match node.left.take() {
        None => {
            let Node { key, right, .. } = *node;
            (right, key)
        }
        Some(left) => {
            let (left, min) = take_min(left, observer);
            node.left = left;
            (Some(settle(node, observer)), min)
        }
    };
}

/// Refresh the height of a node whose subtree just shrank and fix its balance.
fn settle<K, O>(mut node: Box<Node<K>>, observer: &mut O) -> Box<Node<K>>
where
    O: Observer<K> + ?Sized,
{
    node.update_height();

    let factor = node.balance();
    let case = if factor > 1 {
        if balance(&node.left) >= 0 {
            Some(Imbalance::LeftLeft)
        } else {
            Some(Imbalance::LeftRight)
        }
    } else if factor < -1 {
        if balance(&node.right) <= 0 {
            Some(Imbalance::RightRight)
        } else {
            Some(Imbalance::RightLeft)
        }
    } else {
        None
    };

    return match case {
        Some(case) => rebalance(node, case, observer),
        None => node,
    };
}
