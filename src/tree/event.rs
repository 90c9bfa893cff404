//! Events emitted by the tree engine, and the observers that receive them.
//!
//! The engine never sleeps, draws or logs to a UI. Instead every interesting
//! step (a node examined during search, a rebalance decision, a rotation) is
//! reported to an [`Observer`] as it happens. A front end can record the
//! stream and replay it at whatever pace it likes.
//!
//! Events are emitted with borrowed keys (`Event<&K>`) so that observing is
//! free when nobody is listening. Recorders that need to keep an event past
//! the call use [`Event::cloned`].

use std::fmt;

/// Which way a rotation turns the subtree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// The right child is promoted.
    Left,
    /// The left child is promoted.
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Direction::Left => f.write_str("Left"),
            Direction::Right => f.write_str("Right"),
        };
    }
}

/// The four shapes an AVL violation can take.
///
/// The first half names the heavy side of the unbalanced node, the second
/// half the heavy side of that child. "Outside" cases need one rotation,
/// "inside" cases need two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Imbalance {
    LeftLeft,
    LeftRight,
    RightRight,
    RightLeft,
}

impl Imbalance {
    /// The rotations that fix this case, in the order they are applied.
    pub fn rotations(self) -> &'static [Direction] {
        return match self {
            Imbalance::LeftLeft => &[Direction::Right],
            Imbalance::LeftRight => &[Direction::Left, Direction::Right],
            Imbalance::RightRight => &[Direction::Left],
            Imbalance::RightLeft => &[Direction::Right, Direction::Left],
        };
    }
}

impl fmt::Display for Imbalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(match self {
            Imbalance::LeftLeft => "Left-Left",
            Imbalance::LeftRight => "Left-Right",
            Imbalance::RightRight => "Right-Right",
            Imbalance::RightLeft => "Right-Left",
        });
    }
}

/// One observable step of a tree operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event<K> {
    /// Search examined this node, before comparing it to the target.
    Visit { key: K },
    /// Search stopped on a node holding the target.
    Found { key: K },
    /// Search fell off the tree looking for this key.
    NotFound { key: K },
    /// A new leaf was created for this key.
    Inserted { key: K },
    /// The key was already present; the tree is unchanged.
    Duplicate { key: K },
    /// The node holding this key is being removed.
    Deleted { key: K },
    /// Delete found nothing to remove; the tree is unchanged.
    Absent { key: K },
    /// A two-child node gave up `key` and took its in-order successor instead.
    Successor { key: K, successor: K },
    /// The node holding `at` left the {-1, 0, 1} balance range.
    Rebalance { case: Imbalance, at: K },
    /// A rotation around the subtree rooted at `pivot`.
    Rotation { direction: Direction, pivot: K },
}

impl<K> Event<K> {
    /// A short, key-free tag for the event.
    pub fn label(&self) -> &'static str {
        return match self {
            Event::Visit { .. } => "Check",
            Event::Found { .. } => "Found",
            Event::NotFound { .. } => "Not found",
            Event::Inserted { .. } => "Insert",
            Event::Duplicate { .. } => "Duplicate",
            Event::Deleted { .. } => "Delete",
            Event::Absent { .. } => "Absent",
            Event::Successor { .. } => "Successor",
            Event::Rebalance { .. } => "Rebalance",
            Event::Rotation { direction: Direction::Left, .. } => "Left rotation",
            Event::Rotation { direction: Direction::Right, .. } => "Right rotation",
        };
    }

    /// Whether this event changed the shape of the tree.
    pub fn is_structural(&self) -> bool {
        return matches!(
            self,
            Event::Inserted { .. }
                | Event::Deleted { .. }
                | Event::Successor { .. }
                | Event::Rotation { .. }
        );
    }

    /// Convert every key in the event.
    pub fn map<T>(self, mut f: impl FnMut(K) -> T) -> Event<T> {
        return match self {
            Event::Visit { key } => Event::Visit { key: f(key) },
            Event::Found { key } => Event::Found { key: f(key) },
            Event::NotFound { key } => Event::NotFound { key: f(key) },
            Event::Inserted { key } => Event::Inserted { key: f(key) },
            Event::Duplicate { key } => Event::Duplicate { key: f(key) },
            Event::Deleted { key } => Event::Deleted { key: f(key) },
            Event::Absent { key } => Event::Absent { key: f(key) },
            Event::Successor { key, successor } => Event::Successor {
                key: f(key),
                successor: f(successor),
            },
            Event::Rebalance { case, at } => Event::Rebalance { case, at: f(at) },
            Event::Rotation { direction, pivot } => Event::Rotation {
                direction,
                pivot: f(pivot),
            },
        };
    }
}

impl<K: Clone> Event<&K> {
    /// Detach a borrowed event from the tree so it can be stored.
    pub fn cloned(self) -> Event<K> {
        return self.map(K::clone);
    }
}

impl<K: fmt::Display> fmt::Display for Event<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Event::Visit { key } => write!(f, "Check {key}"),
            Event::Found { key } => write!(f, "Found {key}"),
            Event::NotFound { key } => write!(f, "{key} not found"),
            Event::Inserted { key } => write!(f, "Inserted {key}"),
            Event::Duplicate { key } => write!(f, "{key} is already in the tree"),
            Event::Deleted { key } => write!(f, "Deleted {key}"),
            Event::Absent { key } => write!(f, "{key} is not in the tree"),
            Event::Successor { key, successor } => {
                write!(f, "Replaced {key} with its successor {successor}")
            }
            Event::Rebalance { case, at } => write!(f, "{case} imbalance at {at}"),
            Event::Rotation { direction, pivot } => {
                write!(f, "{direction} rotation around {pivot}")
            }
        };
    }
}

/// A sink for engine events.
pub trait Observer<K> {
    fn observe(&mut self, event: Event<&K>);
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl<K> Observer<K> for Silent {
    #[inline(always)]
    fn observe(&mut self, _event: Event<&K>) {}
}

/// Records events for later replay.
impl<K: Clone> Observer<K> for Vec<Event<K>> {
    fn observe(&mut self, event: Event<&K>) {
        self.push(event.cloned());
    }
}

impl<K, O: Observer<K> + ?Sized> Observer<K> for &mut O {
    fn observe(&mut self, event: Event<&K>) {
        (**self).observe(event);
    }
}

/// Fans each event out to both observers, first `A` then `B`.
impl<K, A: Observer<K>, B: Observer<K>> Observer<K> for (A, B) {
    fn observe(&mut self, event: Event<&K>) {
        self.0.observe(event);
        self.1.observe(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_narration() {
        let event = Event::Rotation { direction: Direction::Right, pivot: 30 };
        assert_eq!(event.label(), "Right rotation");
        assert_eq!(event.to_string(), "Right rotation around 30");
        assert_eq!(Event::Visit { key: 50 }.to_string(), "Check 50");
        assert_eq!(Event::NotFound { key: 7 }.to_string(), "7 not found");
    }

    #[test]
    fn inside_cases_rotate_twice() {
        assert_eq!(Imbalance::LeftLeft.rotations(), &[Direction::Right]);
        assert_eq!(
            Imbalance::RightLeft.rotations(),
            &[Direction::Right, Direction::Left]
        );
    }

    #[test]
    fn recorder_clones_keys() {
        let key = String::from("k");
        let mut recorded: Vec<Event<String>> = Vec::new();
        recorded.observe(Event::Inserted { key: &key });
        assert_eq!(recorded, vec![Event::Inserted { key: "k".to_string() }]);
    }

    #[test]
    fn pair_observes_in_order() {
        let mut first: Vec<Event<i32>> = Vec::new();
        let mut second: Vec<Event<i32>> = Vec::new();
        let mut both = (&mut first, &mut second);
        both.observe(Event::Found { key: &3 });
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }
}
