//! Nearest-neighbour selection from a distance matrix.

use fragnet_core::{Error, Result};
use fragnet_paths::UNREACHABLE;

use crate::matrix::DistanceMatrix;

/// Which neighbours to keep for each patch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Selection {
    /// Up to `k` closest patches.
    Nearest(usize),
    /// Every patch at a distance of at most the threshold.
    Within(f64),
}

/// What to do when a patch has fewer reachable neighbours than requested.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ShortfallPolicy {
    /// Keep the shorter list.
    #[default]
    Truncate,
    /// Fail with [`Error::InsufficientPatches`].
    Fail,
}

/// Per patch, the ids of its selected neighbours ordered by ascending
/// distance, ties broken by ascending id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighborLists {
    lists: Vec<Vec<usize>>,
}

impl NeighborLists {
    /// Number of patches.
    #[inline]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Neighbours of patch `id`, nearest first.
    #[inline]
    pub fn get(&self, id: usize) -> &[usize] {
        &self.lists[id]
    }

    /// Whether `j` is among the selected neighbours of `i`.
    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.lists.get(i).is_some_and(|l| l.contains(&j))
    }

    pub fn iter(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.lists.iter().map(Vec::as_slice)
    }
}

/// Select neighbours for every patch of `matrix`.
///
/// Self-distances and unreachable entries are never selected. With
/// [`Selection::Nearest`] and [`ShortfallPolicy::Fail`], a patch with fewer
/// than `k` reachable neighbours fails the whole selection.
pub fn select_neighbors(
    matrix: &DistanceMatrix,
    selection: Selection,
    policy: ShortfallPolicy,
) -> Result<NeighborLists> {
    let n = matrix.len();
    let mut lists = Vec::with_capacity(n);

    for i in 0..n {
        let row = matrix.row(i);
        let mut candidates: Vec<usize> = (0..n)
            .filter(|&j| j != i && row[j] != UNREACHABLE && !row[j].is_nan())
            .collect();
        candidates.sort_by(|&a, &b| row[a].total_cmp(&row[b]).then(a.cmp(&b)));

        match selection {
            Selection::Nearest(k) => {
                if candidates.len() < k && policy == ShortfallPolicy::Fail {
                    return Err(Error::InsufficientPatches {
                        patch: i,
                        requested: k,
                        available: candidates.len(),
                    });
                }
                candidates.truncate(k);
            }
            Selection::Within(threshold) => {
                candidates.retain(|&j| row[j] <= threshold);
            }
        }
        lists.push(candidates);
    }

    Ok(NeighborLists { lists })
}
