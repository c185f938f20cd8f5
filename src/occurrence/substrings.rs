//! Backtracking enumeration of disjoint cycle substrings.
//!
//! [`Substrings`] hands out, one at a time, every way of assigning a contiguous
//! cyclic run of some permutation cycle to each slot of a pattern such that the
//! runs are pairwise disjoint and each run respects its slot's length and closure.
//! Nothing here looks at templates or adjacencies; that filtering happens in
//! [`super::Occurrences`].

use std::iter::FusedIterator;

use bitvec::vec::BitVec;

use crate::{pattern::Slot, permutation::Permutation};

type Cursor = std::vec::IntoIter<Vec<usize>>;

/// Depth-first search over slot assignments, driven by an explicit stack of
/// per-slot candidate cursors.
///
/// Cycles are visited shortest first, then by rotation offset, so the output order
/// is deterministic for a given permutation and pattern.
///
/// # Examples
///
/// ```
/// use cycpatt::{occurrence::Substrings, pattern::Slot, permutation::Permutation};
///
/// let p = Permutation::from_map(vec![1, 0, 2]).unwrap();
/// let slots = [Slot::open([0, 1])];
/// let found: Vec<_> = Substrings::new(&p, &slots).collect();
/// assert_eq!(found, vec![vec![vec![0, 1]], vec![vec![1, 0]]]);
/// ```
#[derive(Debug, Clone)]
pub struct Substrings<'a> {
    slots: &'a [Slot],
    /// Every cycle followed by a second copy of itself, sorted by cycle length.
    doubled: Vec<Vec<usize>>,
    /// Values taken by the committed substrings.
    used: BitVec,
    committed: Vec<Vec<usize>>,
    /// `cursors[d]` walks the candidates for slot `d` given `committed[..d]`.
    cursors: Vec<Cursor>,
    exhausted: bool,
}

impl<'a> Substrings<'a> {
    pub fn new(permutation: &Permutation, slots: &'a [Slot]) -> Self {
        let mut cycles: Vec<&Vec<usize>> = permutation.cycles().iter().collect();
        cycles.sort_by_key(|cycle| cycle.len());

        let doubled = cycles
            .into_iter()
            .map(|cycle| cycle.iter().chain(cycle).copied().collect())
            .collect();

        Substrings {
            slots,
            doubled,
            used: BitVec::repeat(false, permutation.len()),
            committed: Vec::with_capacity(slots.len()),
            cursors: Vec::with_capacity(slots.len()),
            exhausted: false,
        }
    }

    /// All runs that can fill slot `depth` without touching a committed value.
    fn candidates(&self, depth: usize) -> Cursor {
        let slot = &self.slots[depth];
        let len = slot.len();

        self.doubled
            .iter()
            .filter(|doubled| slot.fits(doubled.len() / 2))
            .flat_map(|doubled| {
                (0..doubled.len() / 2).map(move |start| &doubled[start..start + len])
            })
            .filter(|run| run.iter().all(|&value| !self.used[value]))
            .map(<[usize]>::to_vec)
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn commit(&mut self, run: Vec<usize>) {
        for &value in &run {
            self.used.set(value, true);
        }
        self.committed.push(run);
    }

    fn release(&mut self) {
        if let Some(run) = self.committed.pop() {
            for value in run {
                self.used.set(value, false);
            }
        }
    }
}

impl Iterator for Substrings<'_> {
    type Item = Vec<Vec<usize>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let k = self.slots.len();
        if k == 0 {
            self.exhausted = true;
            return Some(Vec::new());
        }

        loop {
            // A missing cursor for the current depth is (re)computed on entry.
            if self.cursors.len() == self.committed.len() {
                let cursor = self.candidates(self.committed.len());
                self.cursors.push(cursor);
            }

            let next = self.cursors.last_mut().and_then(|cursor| cursor.next());
            match next {
                Some(run) => {
                    self.commit(run);
                    if self.committed.len() == k {
                        let found = self.committed.clone();
                        self.release();
                        return Some(found);
                    }
                }
                None => {
                    self.cursors.pop();
                    if self.cursors.is_empty() {
                        self.exhausted = true;
                        return None;
                    }
                    self.release();
                }
            }
        }
    }
}

impl FusedIterator for Substrings<'_> {}
