//! Relative-order normalization of a substring combination.

/// Where a value of a combination sits: slot, offset inside that slot, and the
/// original permutation value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankEntry {
    pub slot: usize,
    pub offset: usize,
    pub value: usize,
}

/// A combination relabelled by rank, with the lookup back to the original values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    ranks: Vec<Vec<usize>>,
    by_rank: Vec<RankEntry>,
}

impl Normalized {
    pub fn new<S: AsRef<[usize]>>(combination: &[S]) -> Self {
        let mut by_rank: Vec<RankEntry> = combination
            .iter()
            .enumerate()
            .flat_map(|(slot, run)| {
                run.as_ref()
                    .iter()
                    .enumerate()
                    .map(move |(offset, &value)| RankEntry {
                        slot,
                        offset,
                        value,
                    })
            })
            .collect();
        by_rank.sort_by_key(|entry| entry.value);

        let mut ranks: Vec<Vec<usize>> = combination
            .iter()
            .map(|run| vec![0; run.as_ref().len()])
            .collect();
        for entry in &by_rank {
            // Equal values share the rank of their first occurrence.
            ranks[entry.slot][entry.offset] =
                by_rank.partition_point(|other| other.value < entry.value);
        }

        Normalized { ranks, by_rank }
    }

    /// The rank sequence of every slot, in slot order.
    pub fn ranks(&self) -> &[Vec<usize>] {
        &self.ranks
    }

    /// The entry holding rank `rank`, if the combination has that many values.
    pub fn entry(&self, rank: usize) -> Option<&RankEntry> {
        self.by_rank.get(rank)
    }

    pub fn into_ranks(self) -> Vec<Vec<usize>> {
        self.ranks
    }
}

/// Replaces every value of a combination by its 0-based rank among all values.
///
/// # Examples
///
/// ```
/// use cycpatt::occurrence::normalize;
///
/// assert_eq!(normalize(&[vec![1, 4], vec![3, 6]]), vec![vec![0, 2], vec![1, 3]]);
/// assert_eq!(normalize(&[vec![0, 2], vec![1, 3]]), vec![vec![0, 2], vec![1, 3]]);
/// ```
pub fn normalize<S: AsRef<[usize]>>(combination: &[S]) -> Vec<Vec<usize>> {
    Normalized::new(combination).into_ranks()
}
