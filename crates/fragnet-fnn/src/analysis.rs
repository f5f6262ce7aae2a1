//! End-to-end nearest-neighbour analysis.

use std::io::Write;

use fragnet_core::{CategoryGrid, CostSurface, Error, Result};
use fragnet_paths::PatchSet;

use crate::config::FnnConfig;
use crate::context::AnalysisContext;
use crate::matrix::DistanceMatrix;
use crate::nearest::{NeighborLists, Selection, select_neighbors};
use crate::stats::Statistic;
use crate::writer;

/// Outcome of [`run`]: patches, matrices, neighbour lists and the per-patch
/// statistic for every requested neighbour number.
#[derive(Debug, Clone)]
pub struct FnnReport {
    patches: PatchSet,
    distances: DistanceMatrix,
    values: DistanceMatrix,
    neighbors: NeighborLists,
    numbers: Vec<usize>,
    statistic: Statistic,
    results: Vec<Vec<f64>>,
}

/// Run the analysis described by `config` on `grid`.
///
/// Steps: validate inputs, extract patches, build the neighbour-relation
/// matrix (Euclidean, or cost-path for `path_distance`), build the reported
/// metric matrix, select up to `max(numbers)` neighbours per patch and
/// summarise the first `k` neighbour values for each requested `k`.
///
/// Structural errors abort before any search starts. A grid without
/// patches yields an empty report unless `config.allow_empty` is false.
pub fn run(grid: &CategoryGrid, cost: Option<&CostSurface>, config: &FnnConfig) -> Result<FnnReport> {
    let ctx = AnalysisContext::new(grid, cost, config)?;
    if ctx.patches().is_empty() {
        if !config.allow_empty {
            return Err(Error::EmptyPatchSet);
        }
        log::warn!("no patches of category {} found", config.keyval);
    }

    let relation = config.metric.neighbor_relation();
    let distances = DistanceMatrix::build(&ctx, relation, config.parallel)?;
    let values = if relation == config.metric {
        distances.clone()
    } else {
        DistanceMatrix::build(&ctx, config.metric, config.parallel)?
    };

    let neighbors = select_neighbors(
        &distances,
        Selection::Nearest(config.max_number()),
        config.shortfall,
    )?;

    let results: Vec<Vec<f64>> = config
        .numbers
        .iter()
        .map(|&k| {
            (0..values.len())
                .map(|i| {
                    let list = neighbors.get(i);
                    let vals: Vec<f64> = list[..k.min(list.len())]
                        .iter()
                        .map(|&j| values.get(i, j))
                        .collect();
                    config.statistic.apply(&vals)
                })
                .collect()
        })
        .collect();

    log::info!(
        "analysed {} patches: metric {}, statistic {}, numbers {:?}",
        distances.len(),
        config.metric,
        config.statistic,
        config.numbers
    );

    Ok(FnnReport {
        patches: ctx.into_patches(),
        distances,
        values,
        neighbors,
        numbers: config.numbers.clone(),
        statistic: config.statistic,
        results,
    })
}

impl FnnReport {
    #[inline]
    pub fn patches(&self) -> &PatchSet {
        &self.patches
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// The matrix neighbours were selected from.
    #[inline]
    pub fn distance_matrix(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// The matrix of the reported metric (equal to the distance matrix for
    /// pairwise metrics).
    #[inline]
    pub fn metric_matrix(&self) -> &DistanceMatrix {
        &self.values
    }

    #[inline]
    pub fn neighbors(&self) -> &NeighborLists {
        &self.neighbors
    }

    #[inline]
    pub fn statistic(&self) -> Statistic {
        self.statistic
    }

    #[inline]
    pub fn numbers(&self) -> &[usize] {
        &self.numbers
    }

    /// Per-patch statistic for neighbour number `k`, indexed by patch id.
    pub fn values_for(&self, k: usize) -> Option<&[f64]> {
        let pos = self.numbers.iter().position(|&n| n == k)?;
        Some(&self.results[pos])
    }

    /// The statistic for neighbour number `k` painted onto the grid,
    /// row-major, `NaN` outside patches.
    pub fn raster(&self, k: usize) -> Option<Vec<f64>> {
        let vals = self.values_for(k)?;
        let bounds = self.patches.bounds();
        let mut out = vec![f64::NAN; bounds.len()];
        for p in &self.patches {
            for &c in p.cells() {
                if let Some(i) = bounds.index(c) {
                    out[i] = vals[p.id()];
                }
            }
        }
        Some(out)
    }

    /// See [`writer::write_distance_matrix`].
    pub fn write_distance_matrix<W: Write>(&self, w: &mut W) -> Result<()> {
        writer::write_distance_matrix(w, &self.patches, &self.distances)
    }

    /// See [`writer::write_neighbor_table`].
    pub fn write_neighbor_table<W: Write>(&self, w: &mut W) -> Result<()> {
        writer::write_neighbor_table(w, &self.patches, &self.neighbors)
    }

    /// See [`writer::write_adjacency_matrix`].
    pub fn write_adjacency_matrix<W: Write>(&self, w: &mut W) -> Result<()> {
        writer::write_adjacency_matrix(w, &self.patches, &self.neighbors)
    }
}
