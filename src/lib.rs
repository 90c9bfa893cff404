//! Arbor - an AVL tree engine that narrates its own rebalancing.
//!
//! The engine keeps a set of unique ordered keys balanced through insertions
//! and deletions, and reports every step (nodes visited, imbalances found,
//! rotations applied) to an observer. Rendering, pacing and UI concerns live
//! outside the engine and consume either the event stream or a [`Snapshot`]
//! of the tree's shape.
//!
//! # Quick Start
//!
//! ```
//! use arbor::{AvlTree, Event, Direction};
//!
//! let mut tree = AvlTree::new();
//! let mut events: Vec<Event<i32>> = Vec::new();
//! for key in [10, 20, 30] {
//!     tree.insert_observed(key, &mut events);
//! }
//!
//! // 10 -> 20 -> 30 leans right, so one left rotation lifts 20 to the root.
//! assert_eq!(tree.root(), Some(&20));
//! assert!(events.contains(&Event::Rotation { direction: Direction::Left, pivot: 10 }));
//!
//! let path: Vec<i32> = tree.search(&30).path().iter().map(|k| **k).collect();
//! assert_eq!(path, vec![20, 30]);
//! ```
//!
//! # Modules
//!
//! - [`tree`]: the engine, its events and snapshots
//! - [`narration`]: an observer that turns events into an activity log
//! - [`command`]: parsing for the interactive front end

pub mod command;
pub mod narration;
pub mod tree;

pub use tree::{
    AvlTree, Direction, Event, Imbalance, InvariantViolation, Observer, RotationStats, Search,
    SearchSteps, Silent, Snapshot, SnapshotNode, Step,
};
