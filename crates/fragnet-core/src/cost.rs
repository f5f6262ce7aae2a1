//! Cost (resistance) surfaces for path-distance search.
//!
//! Every cell carries a non-negative traversal weight. The reserved value
//! [`BLOCKED`] (and `NaN`, the usual in-memory encoding of a null raster
//! cell) marks a cell as impassable.

use crate::error::{Error, Result};
use crate::geom::{Bounds, Cell};

/// Weight marking an impassable cell.
pub const BLOCKED: f64 = -1.0;

/// A grid of traversal weights with the same layout as a
/// [`CategoryGrid`](crate::CategoryGrid).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCostSurface"))]
pub struct CostSurface {
    weights: Vec<f64>,
    bounds: Bounds,
    /// Smallest passable weight, cached for the search heuristic.
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    min_weight: f64,
}

impl CostSurface {
    /// Wrap row-major `weights` as a `rows × cols` surface.
    ///
    /// Every weight must be finite and non-negative, [`BLOCKED`], or `NaN`.
    pub fn new(rows: usize, cols: usize, weights: Vec<f64>) -> Result<Self> {
        if rows.checked_mul(cols) != Some(weights.len()) {
            return Err(Error::InvalidGrid {
                what: "cost surface",
                expected_rows: rows,
                expected_cols: cols,
                rows: weights.len() / cols.max(1),
                cols,
            });
        }
        let mut min_weight = f64::INFINITY;
        for (i, &w) in weights.iter().enumerate() {
            if w.is_nan() || w == BLOCKED {
                continue;
            }
            if !w.is_finite() || w < 0.0 {
                return Err(Error::MalformedCostSurface {
                    row: i / cols,
                    col: i % cols,
                    value: w,
                });
            }
            min_weight = min_weight.min(w);
        }
        if !min_weight.is_finite() {
            min_weight = 0.0;
        }
        Ok(Self {
            weights,
            bounds: Bounds::new(rows, cols),
            min_weight,
        })
    }

    /// A surface where every cell costs 1.
    pub fn uniform(bounds: Bounds) -> Self {
        Self {
            weights: vec![1.0; bounds.len()],
            bounds,
            min_weight: if bounds.is_empty() { 0.0 } else { 1.0 },
        }
    }

    /// Build a surface from equally long rows.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut weights = Vec::with_capacity(rows.len() * cols);
        for (i, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != cols {
                return Err(Error::InvalidGrid {
                    what: "cost surface row",
                    expected_rows: rows.len(),
                    expected_cols: cols,
                    rows: i,
                    cols: r.len(),
                });
            }
            weights.extend_from_slice(r);
        }
        Self::new(rows.len(), cols, weights)
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Fail with [`Error::InvalidGrid`] unless this surface covers exactly
    /// `bounds`.
    pub fn ensure_matches(&self, bounds: Bounds) -> Result<()> {
        if self.bounds != bounds {
            return Err(Error::InvalidGrid {
                what: "cost surface",
                expected_rows: bounds.rows,
                expected_cols: bounds.cols,
                rows: self.bounds.rows,
                cols: self.bounds.cols,
            });
        }
        Ok(())
    }

    /// Weight at `c`, or `None` if out of bounds or blocked.
    #[inline]
    pub fn weight(&self, c: Cell) -> Option<f64> {
        self.bounds.index(c).and_then(|i| self.weight_at(i))
    }

    /// Weight at flat index `idx`, or `None` if blocked.
    #[inline]
    pub fn weight_at(&self, idx: usize) -> Option<f64> {
        let w = self.weights[idx];
        if w.is_nan() || w == BLOCKED { None } else { Some(w) }
    }

    /// Whether `c` is inside the surface and not blocked.
    #[inline]
    pub fn is_passable(&self, c: Cell) -> bool {
        self.weight(c).is_some()
    }

    /// The smallest passable weight (0 when nothing is passable).
    #[inline]
    pub fn min_weight(&self) -> f64 {
        self.min_weight
    }
}

/// Unchecked wire form of a [`CostSurface`]. `null` weights are read as
/// `NaN`, which is how JSON writers emit them.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCostSurface {
    weights: Vec<Option<f64>>,
    bounds: Bounds,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCostSurface> for CostSurface {
    type Error = Error;

    fn try_from(raw: RawCostSurface) -> Result<Self> {
        let weights = raw
            .weights
            .into_iter()
            .map(|w| w.unwrap_or(f64::NAN))
            .collect();
        Self::new(raw.bounds.rows, raw.bounds.cols, weights)
    }
}
