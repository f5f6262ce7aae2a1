//! Square patch-by-patch matrices.

use fragnet_core::{Error, Result};
use fragnet_paths::UNREACHABLE;
use rayon::prelude::*;

use crate::context::AnalysisContext;
use crate::metric::MetricKind;

/// An `N × N` matrix of metric values between patches, row-major.
///
/// Entry `(i, j)` is the metric evaluated from patch `i` to patch `j`; the
/// diagonal is 0 and unreachable pairs hold [`UNREACHABLE`]. Immutable once
/// built.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Evaluate `metric` for every ordered pair of the context's patches.
    ///
    /// Symmetric metrics are evaluated once per unordered pair and mirrored.
    /// Attribute metrics are computed once per patch and broadcast so that
    /// row `i` holds the attributes of all other patches. Pairs are spread
    /// over the rayon pool when `parallel` is set; every worker owns its own
    /// search state and the result does not depend on the schedule.
    pub fn build(ctx: &AnalysisContext<'_>, metric: MetricKind, parallel: bool) -> Result<Self> {
        let patches = ctx.patches().patches();
        let n = patches.len();
        let mut values = vec![0.0; n * n];

        if !metric.is_pairwise() {
            let attrs: Vec<f64> = patches.iter().map(|p| metric.attribute(ctx, p)).collect();
            for i in 0..n {
                for j in 0..n {
                    if i != j {
                        values[i * n + j] = attrs[j];
                    }
                }
            }
            log::debug!("broadcast {metric} over a {n}x{n} matrix");
            return Ok(Self { n, values });
        }

        let pairs: Vec<(usize, usize)> = if metric.is_symmetric() {
            (0..n).flat_map(|i| (i + 1..n).map(move |j| (i, j))).collect()
        } else {
            (0..n)
                .flat_map(|i| (0..n).filter(move |&j| j != i).map(move |j| (i, j)))
                .collect()
        };

        let results: Vec<f64> = if parallel {
            pairs
                .par_iter()
                .map_init(
                    || ctx.new_search(),
                    |search, &(i, j)| metric.evaluate(ctx, search, &patches[i], &patches[j]),
                )
                .collect::<Result<Vec<f64>>>()?
        } else {
            let mut search = ctx.new_search();
            pairs
                .iter()
                .map(|&(i, j)| metric.evaluate(ctx, &mut search, &patches[i], &patches[j]))
                .collect::<Result<Vec<f64>>>()?
        };

        let mut unreachable = 0usize;
        for (&(i, j), &d) in pairs.iter().zip(&results) {
            if d == UNREACHABLE {
                unreachable += 1;
            }
            values[i * n + j] = d;
            if metric.is_symmetric() {
                values[j * n + i] = d;
            }
        }

        log::debug!(
            "built {n}x{n} {metric} matrix from {} evaluations",
            pairs.len()
        );
        if unreachable > 0 {
            log::warn!("{unreachable} of {} patch pairs are unreachable", pairs.len());
        }
        Ok(Self { n, values })
    }

    /// Wrap row-major `values` as an `n × n` matrix.
    pub fn from_values(n: usize, values: Vec<f64>) -> Result<Self> {
        if values.len() != n * n {
            return Err(Error::InvalidGrid {
                what: "distance matrix",
                expected_rows: n,
                expected_cols: n,
                rows: values.len() / n.max(1),
                cols: n,
            });
        }
        Ok(Self { n, values })
    }

    /// Number of patches (rows).
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Value from patch `i` to patch `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    /// All values from patch `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.n..(i + 1) * self.n]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.n).map(move |i| self.row(i))
    }

    /// Whether `get(i, j) == get(j, i)` for all pairs.
    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (i + 1..self.n).all(|j| self.get(i, j) == self.get(j, i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FnnConfig;
    use fragnet_core::{BLOCKED, CategoryGrid, Connectivity, CostSurface};
    use rand::RngExt;

    fn three_patches() -> CategoryGrid {
        CategoryGrid::from_rows(&[
            [1, 0, 0, 0, 1],
            [0, 0, 0, 0, 0],
            [0, 0, 1, 1, 0],
        ])
        .unwrap()
    }

    #[test]
    fn empty_grid_gives_empty_matrix() {
        let grid = CategoryGrid::filled(4, 4, 0);
        let ctx = AnalysisContext::new(&grid, None, &FnnConfig::default()).unwrap();
        for &m in MetricKind::ALL {
            let mat = DistanceMatrix::build(&ctx, m, true).unwrap();
            assert!(mat.is_empty());
            assert_eq!(mat.rows().count(), 0);
        }
    }

    #[test]
    fn euclidean_matrix_is_symmetric_with_zero_diagonal() {
        let grid = three_patches();
        let ctx = AnalysisContext::new(&grid, None, &FnnConfig::default()).unwrap();
        let mat = DistanceMatrix::build(&ctx, MetricKind::Distance, false).unwrap();
        assert_eq!(mat.len(), 3);
        assert!(mat.is_symmetric());
        for i in 0..3 {
            assert_eq!(mat.get(i, i), 0.0);
        }
        assert_eq!(mat.get(0, 1), 4.0);
        assert_eq!(mat.get(1, 2), 5.0_f64.sqrt());
        assert_eq!(mat.get(2, 0), 8.0_f64.sqrt());
    }

    #[test]
    fn attribute_matrix_broadcasts_columns() {
        let grid = three_patches();
        let ctx = AnalysisContext::new(&grid, None, &FnnConfig::default()).unwrap();
        let mat = DistanceMatrix::build(&ctx, MetricKind::Area, false).unwrap();
        assert_eq!(mat.row(0), &[0.0, 1.0, 2.0]);
        assert_eq!(mat.row(2), &[1.0, 1.0, 0.0]);
        assert!(!mat.is_symmetric());
    }

    #[test]
    fn unreachable_pairs_do_not_abort_build() {
        let grid = CategoryGrid::from_rows(&[[1, 0, 1, 0, 1]]).unwrap();
        let cost = CostSurface::from_rows(&[[1.0, 1.0, 1.0, BLOCKED, 1.0]]).unwrap();
        let ctx = AnalysisContext::new(&grid, Some(&cost), &FnnConfig::default()).unwrap();
        let mat = DistanceMatrix::build(&ctx, MetricKind::PathDistance, true).unwrap();
        assert_eq!(mat.get(0, 1), 2.0);
        assert_eq!(mat.get(0, 2), UNREACHABLE);
        assert_eq!(mat.get(2, 1), UNREACHABLE);
        assert!(mat.is_symmetric());
    }

    #[test]
    fn parallel_and_sequential_builds_are_identical() {
        let mut rng = rand::rng();
        let values: Vec<i32> = (0..400).map(|_| i32::from(rng.random_bool(0.15))).collect();
        let weights: Vec<f64> = (0..400).map(|_| rng.random_range(1.0..5.0)).collect();
        let grid = CategoryGrid::new(20, 20, values).unwrap();
        let cost = CostSurface::new(20, 20, weights).unwrap();
        let config = FnnConfig {
            connectivity: Connectivity::Eight,
            ..FnnConfig::default()
        };
        let ctx = AnalysisContext::new(&grid, Some(&cost), &config).unwrap();
        for m in [MetricKind::Distance, MetricKind::PathDistance, MetricKind::ShapeIndex] {
            let seq = DistanceMatrix::build(&ctx, m, false).unwrap();
            let par = DistanceMatrix::build(&ctx, m, true).unwrap();
            assert_eq!(seq, par);
        }
        let euclid = DistanceMatrix::build(&ctx, MetricKind::Distance, true).unwrap();
        let path = DistanceMatrix::build(&ctx, MetricKind::PathDistance, true).unwrap();
        for i in 0..path.len() {
            for j in 0..path.len() {
                assert!(path.get(i, j) + 1e-9 >= euclid.get(i, j) * cost.min_weight());
            }
        }
    }

    #[test]
    fn search_limit_fails_the_build() {
        let grid = CategoryGrid::from_rows(&[[1, 0, 0, 0, 0, 0, 0, 0, 0, 1]]).unwrap();
        let config = FnnConfig {
            max_search_iterations: Some(2),
            ..FnnConfig::default()
        };
        let ctx = AnalysisContext::new(&grid, None, &config).unwrap();
        let err = DistanceMatrix::build(&ctx, MetricKind::PathDistance, false).unwrap_err();
        assert!(matches!(err, Error::SearchLimitExceeded { limit: 2 }));
    }

    #[test]
    fn from_values_checks_shape() {
        assert!(DistanceMatrix::from_values(2, vec![0.0; 4]).is_ok());
        assert!(DistanceMatrix::from_values(2, vec![0.0; 3]).is_err());
    }
}
