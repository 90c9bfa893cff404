//! Recursive insertion with bottom-up rebalancing.

use std::cmp::Ordering;

use super::event::{Event, Imbalance, Observer};
use super::node::{rebalance, Link, Node};

/// Where a key landed relative to the root of the subtree it was inserted into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Placement {
    /// The subtree was empty and the key became its root.
    Root,
    Left,
    Right,
    /// The key was already present. Nothing below changed.
    Duplicate,
}

/// Insert `key` into the subtree, returning the new subtree root.
///
/// The caller stores the returned root in place of `link`. Heights are
/// recomputed on the way back up and at most one rebalance fires along the
/// path, but every ancestor gets its height refreshed.
pub(crate) fn insert<K, O>(link: Link<K>, key: K, observer: &mut O) -> (Box<Node<K>>, Placement)
where
    K: Ord,
    O: Observer<K> + ?Sized,
{
    let mut node = match link {
        Some(node) => node,
        None => {
            observer.observe(Event::Inserted { key: &key });
            return (Node::leaf(key), Placement::Root);
        }
    };

    let (side, below) = match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, below) = insert(node.left.take(), key, observer);
            node.left = Some(left);
            (Placement::Left, below)
        }
        Ordering::Greater => {
            let (right, below) = insert(node.right.take(), key, observer);
            node.right = Some(right);
            (Placement::Right, below)
        }
        Ordering::Equal => {
            observer.observe(Event::Duplicate { key: &key });
            return (node, Placement::Duplicate);
        }
    };
    if below == Placement::Duplicate {
        return (node, Placement::Duplicate);
    }

    node.update_height();

    // `below` records how the new key compared with the child we descended
    // into. If a rotation had fired below, this subtree would not have grown,
    // so when this node is out of balance that child is still in place and
    // `below` is exactly "new key vs. child key".
    let balance = node.balance();
    let case = if balance > 1 {
        if below == Placement::Right {
            Some(Imbalance::LeftRight)
        } else {
            Some(Imbalance::LeftLeft)
        }
    } else if balance < -1 {
        if below == Placement::Left {
            Some(Imbalance::RightLeft)
        } else {
            Some(Imbalance::RightRight)
        }
    } else {
        None
    };

    return match case {
        Some(case) => (rebalance(node, case, observer), side),
        None => (node, side),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::event::{Direction, Silent};

    fn build(keys: &[i32]) -> Link<i32> {
        let mut root = None;
        for &key in keys {
            root = Some(insert(root, key, &mut Silent).0);
        }
        return root;
    }

    #[test]
    fn first_key_becomes_root() {
        let (root, placement) = insert(None, 7, &mut Silent);
        assert_eq!(placement, Placement::Root);
        assert_eq!(root.key, 7);
        assert_eq!(root.height, 1);
    }

    #[test]
    fn duplicate_leaves_heights_alone() {
        let root = build(&[2, 1, 3]);
        let mut events: Vec<Event<i32>> = Vec::new();
        let (root, placement) = insert(root, 3, &mut events);
        assert_eq!(placement, Placement::Duplicate);
        assert_eq!(root.height, 2);
        assert_eq!(events, vec![Event::Duplicate { key: 3 }]);
    }

    #[test]
    fn each_case_fires_its_rotations() {
        let cases: [(&[i32], Imbalance, i32); 4] = [
            (&[3, 2, 1], Imbalance::LeftLeft, 2),
            (&[3, 1, 2], Imbalance::LeftRight, 2),
            (&[1, 2, 3], Imbalance::RightRight, 2),
            (&[1, 3, 2], Imbalance::RightLeft, 2),
        ];

        for (keys, expected, root_key) in cases {
            let mut root = None;
            let mut events: Vec<Event<i32>> = Vec::new();
            for &key in keys {
                root = Some(insert(root, key, &mut events).0);
            }
            let root = root.unwrap();
            assert_eq!(root.key, root_key, "{keys:?}");
            assert_eq!(root.height, 2, "{keys:?}");

            let rebalances: Vec<_> = events
                .iter()
                .filter_map(|e| match e {
                    Event::Rebalance { case, .. } => Some(*case),
                    _ => None,
                })
                .collect();
            assert_eq!(rebalances, vec![expected], "{keys:?}");

            let rotations: Vec<Direction> = events
                .iter()
                .filter_map(|e| match e {
                    Event::Rotation { direction, .. } => Some(*direction),
                    _ => None,
                })
                .collect();
            assert_eq!(rotations, expected.rotations(), "{keys:?}");
        }
    }
}
