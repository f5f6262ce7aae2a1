//! An immutable integer-category grid.
//!
//! [`CategoryGrid`] holds one `i32` category code per cell in row-major
//! order. Unlike an editable map it never changes after construction, so it
//! can be shared freely between worker threads during matrix builds.

use crate::error::{Error, Result};
use crate::geom::{Bounds, Cell};

/// A rectangular grid of integer category codes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCategoryGrid"))]
pub struct CategoryGrid {
    values: Vec<i32>,
    bounds: Bounds,
}

impl CategoryGrid {
    /// Wrap `values` (row-major) as a `rows × cols` grid.
    ///
    /// Fails with [`Error::InvalidGrid`] if the value count does not match
    /// the dimensions.
    pub fn new(rows: usize, cols: usize, values: Vec<i32>) -> Result<Self> {
        if rows.checked_mul(cols) != Some(values.len()) {
            return Err(Error::InvalidGrid {
                what: "category grid",
                expected_rows: rows,
                expected_cols: cols,
                rows: values.len() / cols.max(1),
                cols,
            });
        }
        Ok(Self {
            values,
            bounds: Bounds::new(rows, cols),
        })
    }

    /// Build a grid from a slice of equally long rows.
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut values = Vec::with_capacity(rows.len() * cols);
        for (i, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != cols {
                return Err(Error::InvalidGrid {
                    what: "category grid row",
                    expected_rows: rows.len(),
                    expected_cols: cols,
                    rows: i,
                    cols: r.len(),
                });
            }
            values.extend_from_slice(r);
        }
        Self::new(rows.len(), cols, values)
    }

    /// A grid with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: i32) -> Self {
        Self {
            values: vec![value; rows * cols],
            bounds: Bounds::new(rows, cols),
        }
    }

    /// The extent of this grid.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.bounds.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.bounds.cols
    }

    /// Category at `c`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, c: Cell) -> Option<i32> {
        self.bounds.index(c).map(|i| self.values[i])
    }

    /// Row-major view of all values.
    #[inline]
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// Count how many cells carry `value`.
    pub fn count(&self, value: i32) -> usize {
        self.values.iter().filter(|&&v| v == value).count()
    }

    /// Iterate over `(Cell, value)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, i32)> + '_ {
        self.bounds.iter().zip(self.values.iter().copied())
    }
}

/// Unchecked wire form of a [`CategoryGrid`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCategoryGrid {
    values: Vec<i32>,
    bounds: Bounds,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCategoryGrid> for CategoryGrid {
    type Error = Error;

    fn try_from(raw: RawCategoryGrid) -> Result<Self> {
        Self::new(raw.bounds.rows, raw.bounds.cols, raw.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_checks_value_count() {
        assert!(CategoryGrid::new(2, 3, vec![0; 6]).is_ok());
        assert!(matches!(
            CategoryGrid::new(2, 3, vec![0; 5]),
            Err(Error::InvalidGrid { .. })
        ));
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = CategoryGrid::from_rows(&[vec![1, 0], vec![1]]).unwrap_err();
        assert!(matches!(err, Error::InvalidGrid { .. }));
    }

    #[test]
    fn at_and_count() {
        let g = CategoryGrid::from_rows(&[[1, 0, 1], [0, 0, 1]]).unwrap();
        assert_eq!(g.rows(), 2);
        assert_eq!(g.cols(), 3);
        assert_eq!(g.at(Cell::new(1, 2)), Some(1));
        assert_eq!(g.at(Cell::new(2, 0)), None);
        assert_eq!(g.count(1), 3);
    }

    #[test]
    fn empty_grid_is_valid() {
        let g = CategoryGrid::from_rows::<Vec<i32>>(&[]).unwrap();
        assert!(g.bounds().is_empty());
        assert_eq!(g.iter().count(), 0);
    }

    #[test]
    fn iter_is_row_major() {
        let g = CategoryGrid::from_rows(&[[5, 6], [7, 8]]).unwrap();
        let items: Vec<_> = g.iter().collect();
        assert_eq!(items[1], (Cell::new(0, 1), 6));
        assert_eq!(items[2], (Cell::new(1, 0), 7));
    }
}
