//! # Cycpatt
//!
//! Cycpatt is a Rust library for finding interacting cycle patterns in
//! permutations. A permutation is looked at through its disjoint cycle
//! decomposition, and a pattern asks for disjoint runs of those cycles whose
//! values stand in a prescribed relative order, optionally with adjacency
//! constraints between consecutive values.
//!
//! The library can list every occurrence of a pattern lazily, decide
//! containment and avoidance, and count the permutations of a given length
//! avoiding a pattern.
//!
//! ```
//! use cycpatt::{InteractingCyclePattern, Permutation};
//!
//! let p = Permutation::from_map(vec![4, 5, 6, 7, 0, 1, 3, 2]).unwrap();
//! let pattern: InteractingCyclePattern = "[0,2][1,3], {}".parse().unwrap();
//! assert_eq!(p.occurrences(&pattern).count(), 6);
//! ```

pub mod occurrence;
pub mod parser;
pub mod pattern;
pub mod permutation;

pub use occurrence::{count_avoiders, set_avoids, Occurrence, Occurrences};
pub use pattern::{InteractingCyclePattern, Slot};
pub use permutation::Permutation;
