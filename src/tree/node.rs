//! Owned nodes, the height/balance primitives, and rotations.
//!
//! Every structural change takes a subtree by value and hands back the
//! subtree root that replaces it. A parent never holds a link to a node
//! that a rotation has moved.
//!
//! ```text
//!         y                x
//!        / \              / \
//!       x   C   right    A   y
//!      / \     ------>      / \
//!     A   B    <------     B   C
//!               left
//! ```

use log::trace;

use super::event::{Direction, Event, Imbalance, Observer};

/// An owned, possibly empty subtree.
pub(crate) type Link<K> = Option<Box<Node<K>>>;

#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    /// Height of the subtree rooted here; a leaf has height 1.
    pub(crate) height: u32,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
}

impl<K> Node<K> {
    pub(crate) fn leaf(key: K) -> Box<Node<K>> {
        return Box::new(Node {
            key,
            height: 1,
            left: None,
            right: None,
        });
    }

    /// Recompute the cached height from the (already current) children.
    #[inline]
    pub(crate) fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    /// `height(left) - height(right)`.
    #[inline]
    pub(crate) fn balance(&self) -> i32 {
        return height(&self.left) as i32 - height(&self.right) as i32;
    }
}

/// Cached height of a subtree, 0 when empty. Never recomputes.
#[inline]
pub(crate) fn height<K>(link: &Link<K>) -> u32 {
    return match link {
        Some(node) => node.height,
        None => 0,
    };
}

/// Balance factor of a subtree root, 0 when empty.
#[inline]
pub(crate) fn balance<K>(link: &Link<K>) -> i32 {
    return match link {
        Some(node) => node.balance(),
        None => 0,
    };
}

/// Promote the left child of `y`. Returns `y` untouched if it has none.
pub(crate) fn rotate_right<K, O>(mut y: Box<Node<K>>, observer: &mut O) -> Box<Node<K>>
where
    O: Observer<K> + ?Sized,
{
    let Some(mut x) = y.left.take() else {
        return y;
    };
    observer.observe(Event::Rotation {
        direction: Direction::Right,
        pivot: &y.key,
    });

    y.left = x.right.take();
    y.update_height();
    x.right = Some(y);
    x.update_height();
    trace!("right rotation, new subtree height {}", x.height);
    return x;
}

/// Promote the right child of `x`. Returns `x` untouched if it has none.
pub(crate) fn rotate_left<K, O>(mut x: Box<Node<K>>, observer: &mut O) -> Box<Node<K>>
where
    O: Observer<K> + ?Sized,
{
    let Some(mut y) = x.right.take() else {
        return x;
    };
    observer.observe(Event::Rotation {
        direction: Direction::Left,
        pivot: &x.key,
    });

    x.right = y.left.take();
    x.update_height();
    y.left = Some(x);
    y.update_height();
    trace!("left rotation, new subtree height {}", y.height);
    return y;
}

/// Apply the rotations that fix `case` at `node`, returning the new root.
pub(crate) fn rebalance<K, O>(mut node: Box<Node<K>>, case: Imbalance, observer: &mut O) -> Box<Node<K>>
where
    O: Observer<K> + ?Sized,
{
    observer.observe(Event::Rebalance { case, at: &node.key });
    trace!("{case} imbalance, balance factor {}", node.balance());

    return match case {
        Imbalance::LeftLeft => rotate_right(node, observer),
        Imbalance::LeftRight => {
            node.left = node.left.take().map(|left| rotate_left(left, observer));
            rotate_right(node, observer)
        }
        Imbalance::RightRight => rotate_left(node, observer),
        Imbalance::RightLeft => {
            node.right = node.right.take().map(|right| rotate_right(right, observer));
            rotate_left(node, observer)
        }
    };
}
