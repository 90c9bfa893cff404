//! Alternative ordered-set implementations, for learning and comparison.
//!
//! Each type here stores a set of unique ordered keys in a binary search
//! tree. They share the [`OrderedSet`] trait with [`arbor::AvlTree`], which
//! lets one conformance suite and one benchmark harness run against all of
//! them.
//!
//! # Implementations
//!
//! | Implementation | Balancing | Storage | Key Feature |
//! |----------------|-----------|---------|-------------|
//! | `arbor::AvlTree` | AVL | `Box` per node | Observable rebalancing |
//! | `ArenaAvl` | AVL | `Vec` of slots, `u32` links | No per-node allocation |
//! | `NaiveBst` | none | `Box` per node | Shows why balancing matters |
//!
//! `ArenaAvl` runs the same rotation rules as `arbor::AvlTree`, so the two
//! produce identical shapes for identical operation sequences. `NaiveBst`
//! degrades to a linked list on sorted input.
//!
//! # Example
//!
//! ```
//! use pedagogy::{ArenaAvl, NaiveBst, OrderedSet};
//!
//! let mut balanced: ArenaAvl<i32> = ArenaAvl::default();
//! let mut naive: NaiveBst<i32> = NaiveBst::default();
//! for key in 0..100 {
//!     balanced.insert(key);
//!     naive.insert(key);
//! }
//!
//! assert_eq!(balanced.height(), 7);
//! assert_eq!(naive.height(), 100);
//! assert_eq!(balanced.to_vec(), naive.to_vec());
//! ```

pub mod arena_avl;
pub mod naive_bst;
pub mod ordered_set;

pub use arena_avl::ArenaAvl;
pub use naive_bst::NaiveBst;
pub use ordered_set::OrderedSet;
