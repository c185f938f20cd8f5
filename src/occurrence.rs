//! # Occurrences of interacting cycle patterns
//!
//! Searching a [`Permutation`] for an [`InteractingCyclePattern`] runs in three
//! stages:
//!
//! 1. [`Substrings`] enumerates every assignment of disjoint cycle runs to the
//!    pattern's slots.
//! 2. Each assignment is [normalized](normalize()) to relative ranks and compared
//!    slot by slot with the templates.
//! 3. The adjacency constraints are checked on the original values.
//!
//! Assignments surviving all three are yielded lazily as [`Occurrence`]s by
//! [`Occurrences`]. Every call starts an independent search.
//!
//! ```
//! use cycpatt::{pattern::InteractingCyclePattern, permutation::Permutation};
//!
//! let p = Permutation::from_map(vec![4, 5, 6, 7, 0, 1, 3, 2]).unwrap();
//! let pattern = InteractingCyclePattern::builder()
//!     .open([0, 2])
//!     .open([1, 3])
//!     .adjacent(0)
//!     .adjacent(2)
//!     .build()
//!     .unwrap();
//!
//! let found: Vec<String> = p.occurrences(&pattern).map(|o| o.to_string()).collect();
//! assert_eq!(found, ["[0,4][1,5]", "[1,5][2,6]", "[2,6][3,7]"]);
//! assert!(p.contains(&pattern));
//! ```

use std::{fmt, iter::FusedIterator};

use derive_more::{Deref, From, Into};
use itertools::Itertools;

use crate::{pattern::InteractingCyclePattern, permutation::Permutation};

pub mod normalize;
pub mod substrings;

pub use normalize::{normalize, Normalized};
pub use substrings::Substrings;

/// One match: the substring assigned to each slot, in slot order, holding the
/// original permutation values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, From, Into, Deref)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occurrence(Vec<Vec<usize>>);

impl Occurrence {
    pub fn substrings(&self) -> &[Vec<usize>] {
        &self.0
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for run in &self.0 {
            write!(f, "[{}]", run.iter().join(","))?;
        }
        Ok(())
    }
}

/// Lazy iterator over the occurrences of a pattern in a permutation.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    pattern: &'a InteractingCyclePattern,
    n: usize,
    substrings: Substrings<'a>,
}

impl<'a> Occurrences<'a> {
    pub fn new(permutation: &Permutation, pattern: &'a InteractingCyclePattern) -> Self {
        Occurrences {
            pattern,
            n: permutation.len(),
            substrings: Substrings::new(permutation, pattern.slots()),
        }
    }
}

impl Iterator for Occurrences<'_> {
    type Item = Occurrence;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let combination = self.substrings.next()?;
            if self.pattern.accepts(&combination, self.n) {
                return Some(Occurrence(combination));
            }
        }
    }
}

impl FusedIterator for Occurrences<'_> {}

impl InteractingCyclePattern {
    /// Whether a combination of disjoint runs, taken from a permutation of length
    /// `n`, has the shape of this pattern and satisfies its adjacencies.
    pub fn accepts(&self, combination: &[Vec<usize>], n: usize) -> bool {
        if combination.len() != self.n_slots() {
            return false;
        }
        let normalized = Normalized::new(combination);

        let shape_matches = self
            .slots()
            .iter()
            .zip(normalized.ranks())
            .all(|(slot, ranks)| slot.template() == ranks.as_slice());
        if !shape_matches {
            return false;
        }

        let m = self.len();
        self.adjacencies().iter().all(|&adjacency| {
            match (
                normalized.entry(adjacency),
                normalized.entry((adjacency + 1) % m),
            ) {
                (Some(a), Some(b)) => (a.value + 1) % n == b.value,
                _ => false,
            }
        })
    }

    /// Every occurrence of `self` in `permutation`, produced lazily.
    pub fn occurrences_in<'a>(&'a self, permutation: &Permutation) -> Occurrences<'a> {
        Occurrences::new(permutation, self)
    }

    /// Whether `permutation` has no occurrence of `self`. Stops at the first match.
    pub fn avoided_by(&self, permutation: &Permutation) -> bool {
        self.occurrences_in(permutation).next().is_none()
    }

    pub fn contained_in(&self, permutation: &Permutation) -> bool {
        !self.avoided_by(permutation)
    }
}

impl Permutation {
    /// Every occurrence of `pattern` in `self`, produced lazily.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cycpatt::{pattern::InteractingCyclePattern, permutation::Permutation};
    /// let p = Permutation::from_disjoint_cycles(&[vec![0, 4], vec![1, 5], vec![2, 6, 3, 7]])
    ///     .unwrap();
    /// let pattern = InteractingCyclePattern::builder()
    ///     .open([0, 2])
    ///     .closed([1, 3])
    ///     .build()
    ///     .unwrap();
    /// let found: Vec<_> = p.occurrences(&pattern).collect();
    /// assert_eq!(found.len(), 1);
    /// assert_eq!(found[0].substrings(), &[vec![0, 4], vec![1, 5]]);
    /// ```
    pub fn occurrences<'a>(&self, pattern: &'a InteractingCyclePattern) -> Occurrences<'a> {
        pattern.occurrences_in(self)
    }

    pub fn avoids(&self, pattern: &InteractingCyclePattern) -> bool {
        pattern.avoided_by(self)
    }

    pub fn contains(&self, pattern: &InteractingCyclePattern) -> bool {
        pattern.contained_in(self)
    }

    /// Whether `self` avoids every pattern in `patterns`.
    pub fn avoids_all<'p, I>(&self, patterns: I) -> bool
    where
        I: IntoIterator<Item = &'p InteractingCyclePattern>,
    {
        set_avoids(self, patterns)
    }
}

/// Whether `permutation` avoids every pattern in `patterns`.
/// Returns `false` as soon as one pattern is contained.
pub fn set_avoids<'p, I>(permutation: &Permutation, patterns: I) -> bool
where
    I: IntoIterator<Item = &'p InteractingCyclePattern>,
{
    patterns
        .into_iter()
        .all(|pattern| pattern.avoided_by(permutation))
}

/// Number of permutations of length `n` avoiding `pattern`.
///
/// # Examples
///
/// ```
/// # use cycpatt::{occurrence::count_avoiders, pattern::InteractingCyclePattern};
/// // Permutations without a 2-cycle.
/// let pattern = InteractingCyclePattern::builder().closed([0, 1]).build().unwrap();
/// let counts: Vec<_> = (1..=5).map(|n| count_avoiders(&pattern, n)).collect();
/// assert_eq!(counts, [1, 1, 3, 15, 75]);
/// ```
pub fn count_avoiders(pattern: &InteractingCyclePattern, n: usize) -> usize {
    Permutation::all(n)
        .filter(|permutation| pattern.avoided_by(permutation))
        .count()
}
