//! Structural invariant checks.
//!
//! A violation is always a bug in the engine, never a run-time condition to
//! recover from. These checks exist for tests, the fuzz harness, and for
//! consumers that want to assert a snapshot is well formed.

use std::fmt::Debug;

use thiserror::Error;

/// The first broken invariant found in a tree.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("key {key} is out of order: must lie strictly between {lower} and {upper}")]
    Order {
        key: String,
        lower: String,
        upper: String,
    },
    #[error("node {key} caches height {cached} but its children give {actual}")]
    Height { key: String, cached: u32, actual: u32 },
    #[error("node {key} has balance factor {balance}")]
    Balance { key: String, balance: i32 },
    #[error("tree reports {reported} keys but holds {counted}")]
    Length { reported: usize, counted: usize },
}

/// Read access to a binary tree node, shared by live nodes and snapshots.
pub(crate) trait Shape {
    type Key;

    fn key(&self) -> &Self::Key;
    fn cached_height(&self) -> u32;
    fn left(&self) -> Option<&Self>;
    fn right(&self) -> Option<&Self>;
}

/// Check order, height and balance for a whole tree.
///
/// Returns the number of nodes on success.
pub(crate) fn check<S>(root: Option<&S>) -> Result<usize, InvariantViolation>
where
    S: Shape,
    S::Key: Ord + Debug,
{
    let mut count = 0;
    check_subtree(root, None, None, &mut count)?;
    return Ok(count);
}

/// Returns the true height of the subtree.
fn check_subtree<S>(
    node: Option<&S>,
    lower: Option<&S::Key>,
    upper: Option<&S::Key>,
    count: &mut usize,
) -> Result<u32, InvariantViolation>
where
    S: Shape,
    S::Key: Ord + Debug,
{
    let Some(node) = node else {
        return Ok(0);
    };
    let key = node.key();

    let above_lower = lower.is_none_or(|lower| lower < key);
    let below_upper = upper.is_none_or(|upper| key < upper);
    if !above_lower || !below_upper {
        return Err(InvariantViolation::Order {
            key: format!("{key:?}"),
            lower: lower.map_or_else(|| "-inf".to_string(), |k| format!("{k:?}")),
            upper: upper.map_or_else(|| "+inf".to_string(), |k| format!("{k:?}")),
        });
    }

    *count += 1;
    let left = check_subtree(node.left(), lower, Some(key), count)?;
    let right = check_subtree(node.right(), Some(key), upper, count)?;

    let actual = 1 + left.max(right);
    if node.cached_height() != actual {
        return Err(InvariantViolation::Height {
            key: format!("{key:?}"),
            cached: node.cached_height(),
            actual,
        });
    }

    let balance = left as i32 - right as i32;
    if !(-1..=1).contains(&balance) {
        return Err(InvariantViolation::Balance {
            key: format!("{key:?}"),
            balance,
        });
    }

    return Ok(actual);
}
