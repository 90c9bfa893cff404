//! Read-only search, as a steppable walk down the tree.
//!
//! [`SearchSteps`] borrows the tree immutably, so a caller that pauses
//! between steps (to animate, say) cannot mutate the tree until the walk is
//! dropped.

use std::cmp::Ordering;

use smallvec::SmallVec;

use super::node::Node;

/// One step of a search.
#[derive(Debug, PartialEq, Eq)]
pub enum Step<'a, K> {
    /// About to compare the target with this node's key.
    Visit(&'a K),
    /// The last visited node holds the target.
    Found(&'a K),
    /// The walk fell off a missing child.
    NotFound,
}

// Derived impls would demand `K: Copy`; only the references are copied.
impl<K> Clone for Step<'_, K> {
    fn clone(&self) -> Self {
        return *self;
    }
}

impl<K> Copy for Step<'_, K> {}

enum Pending<'a, K> {
    Visit(&'a Node<K>),
    Compare(&'a Node<K>),
    Missing,
    Done,
}

/// Iterator over the nodes a search examines, root first.
///
/// Yields one [`Step::Visit`] per node on the path, then exactly one
/// terminal [`Step::Found`] or [`Step::NotFound`].
pub struct SearchSteps<'a, K> {
    target: &'a K,
    pending: Pending<'a, K>,
}

impl<'a, K> SearchSteps<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>, target: &'a K) -> SearchSteps<'a, K> {
        let pending = match root {
            Some(node) => Pending::Visit(node),
            None => Pending::Missing,
        };
        return SearchSteps { target, pending };
    }
}

impl<'a, K: Ord> Iterator for SearchSteps<'a, K> {
    type Item = Step<'a, K>;

    fn next(&mut self) -> Option<Step<'a, K>> {
        loop {
            match self.pending {
                Pending::Visit(node) => {
                    self.pending = Pending::Compare(node);
                    return Some(Step::Visit(&node.key));
                }
                Pending::Compare(node) => {
                    let child = match self.target.cmp(&node.key) {
                        Ordering::Equal => {
                            self.pending = Pending::Done;
                            return Some(Step::Found(&node.key));
                        }
                        Ordering::Less => node.left.as_deref(),
                        Ordering::Greater => node.right.as_deref(),
                    };
                    self.pending = match child {
                        Some(next) => Pending::Visit(next),
                        None => Pending::Missing,
                    };
                }
                Pending::Missing => {
                    self.pending = Pending::Done;
                    return Some(Step::NotFound);
                }
                Pending::Done => return None,
            }
        }
    }
}

/// Typical AVL search paths fit inline; deeper ones spill to the heap.
const INLINE_PATH: usize = 32;

/// The outcome of a completed search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Search<'a, K> {
    path: SmallVec<[&'a K; INLINE_PATH]>,
    found: bool,
}

impl<'a, K: Ord> Search<'a, K> {
    /// Drive `steps` to completion, handing each step to `on_step` as it
    /// happens.
    pub(crate) fn run(steps: SearchSteps<'a, K>, mut on_step: impl FnMut(Step<'a, K>)) -> Search<'a, K> {
        let mut path = SmallVec::new();
        let mut found = false;
        for step in steps {
            on_step(step);
            match step {
                Step::Visit(key) => path.push(key),
                Step::Found(_) => found = true,
                Step::NotFound => {}
            }
        }
        return Search { path, found };
    }
}

impl<'a, K> Search<'a, K> {
    pub fn is_found(&self) -> bool {
        return self.found;
    }

    /// Keys examined, root first.
    pub fn path(&self) -> &[&'a K] {
        return &self.path;
    }

    /// The node the search stopped on: the match, or the last node before
    /// falling off the tree. `None` only for an empty tree.
    pub fn last_visited(&self) -> Option<&'a K> {
        return self.path.last().copied();
    }

    /// The matching key, if found.
    pub fn found(&self) -> Option<&'a K> {
        if self.found {
            return self.last_visited();
        }
        return None;
    }
}
