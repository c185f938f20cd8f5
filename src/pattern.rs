//! # Interacting cycle patterns
//!
//! An [`InteractingCyclePattern`] is an ordered list of [`Slot`]s together with a
//! set of adjacency constraints.
//!
//! Each slot asks for a contiguous cyclic run of some permutation cycle. Its
//! template gives the relative order the matched values must have among *all*
//! values matched by the pattern, so the templates of a pattern usually partition
//! `0..m`, where `m` is the total length. An open slot (`[0,2]`) may match any run
//! of the right length, a closed slot (`(1,3)`) must match a whole cycle.
//!
//! An adjacency `a` requires the matched value of rank `a` to be directly followed,
//! modulo the permutation length, by the matched value of rank `(a + 1) mod m`.
//!
//! ```
//! use cycpatt::pattern::InteractingCyclePattern;
//!
//! let pattern = InteractingCyclePattern::builder()
//!     .open([0, 2])
//!     .closed([1, 3])
//!     .adjacent(0)
//!     .build()
//!     .unwrap();
//! assert_eq!(pattern.to_string(), "[0,2](1,3), {0}");
//! assert_eq!(pattern.len(), 4);
//! ```

use std::fmt;

use ahash::AHashSet;
use indexmap::IndexSet;
use itertools::Itertools;
use thiserror::Error;

/// One cycle of a pattern: a relative-order template and whether it has to
/// consume an entire permutation cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot {
    template: Vec<usize>,
    closed: bool,
}

impl Slot {
    pub fn open(template: impl Into<Vec<usize>>) -> Self {
        Slot {
            template: template.into(),
            closed: false,
        }
    }

    pub fn closed(template: impl Into<Vec<usize>>) -> Self {
        Slot {
            template: template.into(),
            closed: true,
        }
    }

    pub fn template(&self) -> &[usize] {
        &self.template
    }

    /// Whether the slot only matches whole permutation cycles.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.template.len()
    }

    pub fn is_empty(&self) -> bool {
        self.template.is_empty()
    }

    /// Whether a permutation cycle of length `cycle_len` can supply this slot.
    pub fn fits(&self, cycle_len: usize) -> bool {
        self.len() <= cycle_len && (!self.closed || self.len() == cycle_len)
    }
}

impl From<(Vec<usize>, bool)> for Slot {
    fn from((template, closed): (Vec<usize>, bool)) -> Self {
        Slot { template, closed }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = if self.closed { ('(', ')') } else { ('[', ']') };
        write!(f, "{open}{}{close}", self.template.iter().join(","))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("invalid pattern slot {slot}: {value} is used more than once")]
    DuplicateInSlot { slot: usize, value: usize },

    #[error("invalid pattern slot {slot}: the template is empty")]
    EmptySlot { slot: usize },

    #[error("adjacency {position} is out of range for a pattern of length {len}")]
    AdjacencyOutOfRange { position: usize, len: usize },
}

/// A pattern made of interacting cycles.
///
/// Immutable once built; use [`InteractingCyclePattern::new`] or
/// [`InteractingCyclePattern::builder`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "PatternData", into = "PatternData")
)]
pub struct InteractingCyclePattern {
    slots: Vec<Slot>,
    adjacencies: IndexSet<usize>,
    len: usize,
}

impl InteractingCyclePattern {
    /// Validates and builds a pattern.
    ///
    /// Repeated adjacencies collapse into one; the first occurrence fixes the
    /// rendering order.
    ///
    /// # Errors
    ///
    /// Fails if a slot template is empty or repeats a value, or if an adjacency is
    /// not smaller than the total length of the pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cycpatt::pattern::{InteractingCyclePattern, PatternError};
    /// let pattern =
    ///     InteractingCyclePattern::new([(vec![0, 2], false), (vec![1, 3], false)], [0, 2])
    ///         .unwrap();
    /// assert_eq!(pattern.n_slots(), 2);
    ///
    /// let err = InteractingCyclePattern::new([(vec![0, 0], false)], []).unwrap_err();
    /// assert_eq!(err, PatternError::DuplicateInSlot { slot: 0, value: 0 });
    /// ```
    pub fn new<I, S, A>(slots: I, adjacencies: A) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Slot>,
        A: IntoIterator<Item = usize>,
    {
        let slots: Vec<Slot> = slots.into_iter().map(Into::into).collect();

        for (index, slot) in slots.iter().enumerate() {
            if slot.is_empty() {
                return Err(PatternError::EmptySlot { slot: index });
            }
            let mut seen = AHashSet::new();
            for &value in slot.template() {
                if !seen.insert(value) {
                    return Err(PatternError::DuplicateInSlot { slot: index, value });
                }
            }
        }

        let len = slots.iter().map(Slot::len).sum();
        let adjacencies: IndexSet<usize> = adjacencies.into_iter().collect();
        if let Some(&position) = adjacencies.iter().find(|&&p| p >= len) {
            return Err(PatternError::AdjacencyOutOfRange { position, len });
        }

        Ok(InteractingCyclePattern {
            slots,
            adjacencies,
            len,
        })
    }

    pub fn builder() -> PatternBuilder {
        PatternBuilder::default()
    }

    /// Number of slots, `k`.
    pub fn n_slots(&self) -> usize {
        self.slots.len()
    }

    /// Returns slot `i`, or `None` when `i` is out of range.
    pub fn slot(&self, i: usize) -> Option<&Slot> {
        self.slots.get(i)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn adjacencies(&self) -> &IndexSet<usize> {
        &self.adjacencies
    }

    /// Total length `m`, summed over all slot templates.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Display for InteractingCyclePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.slots {
            write!(f, "{slot}")?;
        }
        write!(f, ", {{{}}}", self.adjacencies.iter().join(","))
    }
}

/// Collects slots and adjacencies, validating everything in [`PatternBuilder::build`].
#[derive(Debug, Default, Clone)]
pub struct PatternBuilder {
    slots: Vec<Slot>,
    adjacencies: Vec<usize>,
}

impl PatternBuilder {
    pub fn open(mut self, template: impl Into<Vec<usize>>) -> Self {
        self.slots.push(Slot::open(template));
        self
    }

    pub fn closed(mut self, template: impl Into<Vec<usize>>) -> Self {
        self.slots.push(Slot::closed(template));
        self
    }

    pub fn adjacent(mut self, position: usize) -> Self {
        self.adjacencies.push(position);
        self
    }

    pub fn build(self) -> Result<InteractingCyclePattern, PatternError> {
        InteractingCyclePattern::new(self.slots, self.adjacencies)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct PatternData {
    slots: Vec<Slot>,
    adjacencies: Vec<usize>,
}

#[cfg(feature = "serde")]
impl TryFrom<PatternData> for InteractingCyclePattern {
    type Error = PatternError;

    fn try_from(data: PatternData) -> Result<Self, Self::Error> {
        InteractingCyclePattern::new(data.slots, data.adjacencies)
    }
}

#[cfg(feature = "serde")]
impl From<InteractingCyclePattern> for PatternData {
    fn from(pattern: InteractingCyclePattern) -> Self {
        PatternData {
            slots: pattern.slots,
            adjacencies: pattern.adjacencies.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crossing(adjacencies: &[usize]) -> InteractingCyclePattern {
        InteractingCyclePattern::new(
            [(vec![0, 2], false), (vec![1, 3], false)],
            adjacencies.iter().copied(),
        )
        .unwrap()
    }

    #[test]
    fn derived_lengths() {
        let pattern = crossing(&[]);
        assert_eq!(pattern.n_slots(), 2);
        assert_eq!(pattern.len(), 4);
        assert_eq!(pattern.slot(1), Some(&Slot::open([1, 3])));
        assert_eq!(pattern.slot(2), None);
    }

    #[test]
    fn display() {
        insta::assert_snapshot!(crossing(&[]).to_string(), @"[0,2][1,3], {}");
        insta::assert_snapshot!(crossing(&[0, 2]).to_string(), @"[0,2][1,3], {0,2}");

        let closed = InteractingCyclePattern::builder()
            .open([0, 2])
            .closed([1, 3])
            .build()
            .unwrap();
        insta::assert_snapshot!(closed.to_string(), @"[0,2](1,3), {}");
    }

    #[test]
    fn adjacencies_are_deduplicated_in_order() {
        let pattern = crossing(&[2, 0, 2]);
        assert_eq!(
            pattern.adjacencies().iter().copied().collect::<Vec<_>>(),
            vec![2, 0]
        );
        assert_eq!(pattern.to_string(), "[0,2][1,3], {2,0}");
    }

    #[test]
    fn rejects_malformed_slots() {
        assert_eq!(
            InteractingCyclePattern::builder()
                .open([0, 1])
                .closed([2, 3, 2])
                .build(),
            Err(PatternError::DuplicateInSlot { slot: 1, value: 2 })
        );
        assert_eq!(
            InteractingCyclePattern::builder()
                .open(Vec::<usize>::new())
                .build(),
            Err(PatternError::EmptySlot { slot: 0 })
        );
    }

    #[test]
    fn rejects_out_of_range_adjacency() {
        assert_eq!(
            InteractingCyclePattern::new([(vec![0, 2], false), (vec![1, 3], false)], [4]),
            Err(PatternError::AdjacencyOutOfRange {
                position: 4,
                len: 4
            })
        );
        assert_eq!(
            InteractingCyclePattern::new(Vec::<Slot>::new(), [0]),
            Err(PatternError::AdjacencyOutOfRange {
                position: 0,
                len: 0
            })
        );
    }

    #[test]
    fn slot_fits() {
        let open = Slot::open([0, 1]);
        assert!(!open.fits(1));
        assert!(open.fits(2));
        assert!(open.fits(5));

        let closed = Slot::closed([0, 1]);
        assert!(closed.fits(2));
        assert!(!closed.fits(3));
    }
}
