//! # Permutations
//!
//! This module provides a `Permutation` struct for working with permutations of
//! `0..n` through both of their usual notations.
//!
//! ## Key Features:
//!
//! - **Representation**: A `Permutation` stores its one-line form (`map[i]` is the
//!   image of `i`) together with a disjoint cycle decomposition. Both views always
//!   describe the same bijection.
//! - **Construction**:
//!   - From a mapping vector: `Permutation::from_map(vec![...])`.
//!   - From disjoint cycles: `Permutation::from_disjoint_cycles(&[vec![...]])`.
//!   - Identity permutation: `Permutation::id(n)`.
//!   - Every permutation of a given length: `Permutation::all(n)`.
//! - **Validation**: both constructors reject inputs that are not a bijection on
//!   `0..n` with a [`PermutationError`].
//! - **Equality**: two permutations are equal when their one-line forms are equal,
//!   regardless of how their cycles were written down.
//!
//! The cycle form is what the occurrence search in [`crate::occurrence`] works on.

use std::{fmt, ops::Index};

use itertools::Itertools;
use thiserror::Error;

/// A permutation of `0..n`, kept in one-line and cycle notation at once.
///
/// # Examples
///
/// ```
/// use cycpatt::permutation::Permutation;
///
/// let linear = Permutation::from_map(vec![4, 5, 6, 7, 0, 1, 3, 2]).unwrap();
/// let cyclic =
///     Permutation::from_disjoint_cycles(&[vec![0, 4], vec![1, 5], vec![2, 6, 3, 7]]).unwrap();
/// assert_eq!(linear, cyclic);
/// assert_eq!(linear.to_string(), "(0,4)(1,5)(2,6,3,7)");
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<usize>", into = "Vec<usize>"))]
pub struct Permutation {
    map: Vec<usize>,
    cycles: Vec<Vec<usize>>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermutationError {
    #[error("invalid permutation: {value} appears more than once")]
    Duplicate { value: usize },

    #[error("invalid permutation: {value} is out of range for length {len}")]
    OutOfRange { value: usize, len: usize },

    #[error("invalid permutation: cycle {index} is empty")]
    EmptyCycle { index: usize },
}

impl Permutation {
    // --------------------------------------------------------------------------------------------
    // Constructors
    // --------------------------------------------------------------------------------------------

    /// Creates the identity permutation of length `n`, made of `n` fixed points.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cycpatt::permutation::Permutation;
    /// let p = Permutation::id(3);
    /// assert_eq!(p.map(), &[0, 1, 2]);
    /// assert_eq!(p.cycles(), &[vec![0], vec![1], vec![2]]);
    /// ```
    pub fn id(n: usize) -> Self {
        Self::from_map_unchecked((0..n).collect())
    }

    /// Creates a permutation from a mapping vector.
    /// The `map` vector states where index `i` is sent: `map[i]` is the image of `i`.
    ///
    /// The cycle form is derived by starting from the smallest unvisited value and
    /// following `value -> map[value]` until the walk returns to its start.
    ///
    /// # Errors
    ///
    /// Fails if a value repeats or falls outside `0..map.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cycpatt::permutation::Permutation;
    /// let p = Permutation::from_map(vec![2, 0, 1, 3]).unwrap();
    /// assert_eq!(p.cycles(), &[vec![0, 2, 1], vec![3]]);
    ///
    /// assert!(Permutation::from_map(vec![0, 0, 1]).is_err());
    /// assert!(Permutation::from_map(vec![0, 3, 1]).is_err());
    /// ```
    pub fn from_map(map: Vec<usize>) -> Result<Self, PermutationError> {
        let len = map.len();
        let mut seen = vec![false; len];
        for &value in &map {
            if value >= len {
                return Err(PermutationError::OutOfRange { value, len });
            }
            if std::mem::replace(&mut seen[value], true) {
                return Err(PermutationError::Duplicate { value });
            }
        }
        Ok(Self::from_map_unchecked(map))
    }

    fn from_map_unchecked(map: Vec<usize>) -> Self {
        let cycles = Self::find_cycles(&map);
        Permutation { map, cycles }
    }

    /// Creates a permutation from a set of disjoint cycles.
    /// Each cycle lists the values it visits, e.g. `[0, 2, 1]` means `0->2, 2->1, 1->0`.
    ///
    /// The cycles are kept exactly as given, so the rendered cycle form matches the
    /// input order and rotation.
    ///
    /// # Errors
    ///
    /// Fails if a cycle is empty, a value repeats across cycles, or the cycles do not
    /// cover `0..n` where `n` is the total number of entries.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cycpatt::permutation::Permutation;
    /// let cycles = vec![vec![0, 1, 2], vec![3, 4]];
    /// let p = Permutation::from_disjoint_cycles(&cycles).unwrap();
    /// assert_eq!(p.map(), &[1, 2, 0, 4, 3]);
    ///
    /// // Error if cycles are not disjoint
    /// let invalid = vec![vec![0, 1], vec![1, 2]];
    /// assert!(Permutation::from_disjoint_cycles(&invalid).is_err());
    ///
    /// // Error if a value is missing
    /// let invalid = vec![vec![0, 2]];
    /// assert!(Permutation::from_disjoint_cycles(&invalid).is_err());
    /// ```
    pub fn from_disjoint_cycles(cycles: &[Vec<usize>]) -> Result<Self, PermutationError> {
        let len = cycles.iter().map(Vec::len).sum();

        let mut seen = vec![false; len];
        for (index, cycle) in cycles.iter().enumerate() {
            if cycle.is_empty() {
                return Err(PermutationError::EmptyCycle { index });
            }
            for &value in cycle {
                if value >= len {
                    return Err(PermutationError::OutOfRange { value, len });
                }
                if std::mem::replace(&mut seen[value], true) {
                    return Err(PermutationError::Duplicate { value });
                }
            }
        }

        // Map each element to the next element in the cycle
        let mut map = vec![0; len];
        for cycle in cycles {
            for (i, &from) in cycle.iter().enumerate() {
                map[from] = cycle[(i + 1) % cycle.len()];
            }
        }

        Ok(Permutation {
            map,
            cycles: cycles.to_vec(),
        })
    }

    /// Iterates over every permutation of length `n`, in lexicographic order of the
    /// one-line form.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cycpatt::permutation::Permutation;
    /// assert_eq!(Permutation::all(4).count(), 24);
    /// assert_eq!(Permutation::all(0).count(), 1);
    /// ```
    pub fn all(n: usize) -> impl Iterator<Item = Permutation> {
        (0..n).permutations(n).map(Self::from_map_unchecked)
    }

    // --------------------------------------------------------------------------------------------
    // Accessors
    // --------------------------------------------------------------------------------------------

    /// Returns the one-line form as a slice.
    pub fn map(&self) -> &[usize] {
        &self.map
    }

    /// Returns the cycle form. Fixed points are included as cycles of length one.
    ///
    /// The order of the cycles, and the rotation of each, is whatever the
    /// constructor produced. It is stable for a given construction but not canonical.
    pub fn cycles(&self) -> &[Vec<usize>] {
        &self.cycles
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    // --------------------------------------------------------------------------------------------
    // Cycles
    // --------------------------------------------------------------------------------------------

    /// Returns the cycle decomposition of a one-line form,
    /// each cycle represented as a `Vec<usize>` that starts at its smallest element.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cycpatt::permutation::Permutation;
    /// let cycles = Permutation::find_cycles(&[4, 5, 6, 7, 0, 1, 3, 2]);
    /// assert_eq!(cycles, vec![vec![0, 4], vec![1, 5], vec![2, 6, 3, 7]]);
    /// ```
    pub fn find_cycles(map: &[usize]) -> Vec<Vec<usize>> {
        let mut visited = vec![false; map.len()];
        let mut cycles = Vec::new();
        for i in 0..map.len() {
            if visited[i] {
                continue;
            }
            let mut cycle = Vec::new();
            let mut j = i;
            while !visited[j] {
                visited[j] = true;
                cycle.push(j);
                j = map[j];
            }
            cycles.push(cycle);
        }
        cycles
    }
}

impl PartialEq for Permutation {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl Eq for Permutation {}

impl std::hash::Hash for Permutation {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.map.hash(state);
    }
}

/// Implement ordering comparisons for permutations based on their `map` field.
impl PartialOrd for Permutation {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Permutation {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.map.cmp(&other.map)
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cycle in &self.cycles {
            write!(f, "({})", cycle.iter().join(","))?;
        }
        Ok(())
    }
}

impl Index<usize> for Permutation {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.map[index]
    }
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = PermutationError;

    fn try_from(map: Vec<usize>) -> Result<Self, Self::Error> {
        Self::from_map(map)
    }
}

impl TryFrom<Vec<Vec<usize>>> for Permutation {
    type Error = PermutationError;

    fn try_from(cycles: Vec<Vec<usize>>) -> Result<Self, Self::Error> {
        Self::from_disjoint_cycles(&cycles)
    }
}

impl From<Permutation> for Vec<usize> {
    fn from(permutation: Permutation) -> Self {
        permutation.map
    }
}
