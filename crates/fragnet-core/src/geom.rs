//! Geometry primitives: [`Cell`], [`Bounds`] and [`Connectivity`].
//!
//! Cells are addressed as `(row, col)` with rows growing downwards. All
//! grids in the workspace are stored row-major, so the natural ordering of
//! cells (and the flat index produced by [`Bounds::index`]) is row-major too.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// An integer `(row, col)` grid coordinate.
///
/// A cell may lie outside any particular grid; use [`Bounds::contains`] to
/// check validity.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    /// Create a new cell coordinate.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a cell shifted by `(drow, dcol)`.
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The four cardinal neighbours (up, right, down, left).
    #[inline]
    pub fn neighbors_4(self) -> [Cell; 4] {
        [
            self.shift(-1, 0),
            self.shift(0, 1),
            self.shift(1, 0),
            self.shift(0, -1),
        ]
    }

    /// All eight neighbours, clockwise from up.
    #[inline]
    pub fn neighbors_8(self) -> [Cell; 8] {
        [
            self.shift(-1, 0),
            self.shift(-1, 1),
            self.shift(0, 1),
            self.shift(1, 1),
            self.shift(1, 0),
            self.shift(1, -1),
            self.shift(0, -1),
            self.shift(-1, -1),
        ]
    }

    /// Whether `other` differs from `self` along both axes.
    #[inline]
    pub fn is_diagonal_to(self, other: Cell) -> bool {
        self.row != other.row && self.col != other.col
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    /// Row-major order.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// The extent of a grid: `rows × cols` cells anchored at `(0, 0)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub rows: usize,
    pub cols: usize,
}

impl Bounds {
    #[inline]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells.
    #[inline]
    pub const fn len(self) -> usize {
        self.rows * self.cols
    }

    /// Whether the extent holds no cells at all.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether `c` lies inside the grid.
    #[inline]
    pub fn contains(self, c: Cell) -> bool {
        c.row >= 0 && c.col >= 0 && (c.row as usize) < self.rows && (c.col as usize) < self.cols
    }

    /// Convert a cell to its row-major flat index. Returns `None` if out of
    /// bounds.
    #[inline]
    pub fn index(self, c: Cell) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some(c.row as usize * self.cols + c.col as usize)
    }

    /// Convert a flat index back to a cell.
    #[inline]
    pub fn cell(self, idx: usize) -> Cell {
        Cell::new((idx / self.cols) as i32, (idx % self.cols) as i32)
    }

    /// Row-major iterator over every cell.
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            next: 0,
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Cell;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Row-major iterator over the cells of a [`Bounds`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    next: usize,
}

impl Iterator for BoundsIter {
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Cell> {
        if self.next >= self.bounds.len() {
            return None;
        }
        let c = self.bounds.cell(self.next);
        self.next += 1;
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bounds.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BoundsIter {}

// ---------------------------------------------------------------------------
// Connectivity
// ---------------------------------------------------------------------------

/// Neighbourhood used both for patch labelling and for path search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connectivity {
    /// Cardinal neighbours only.
    #[default]
    Four,
    /// Cardinal and diagonal neighbours.
    Eight,
}

impl Connectivity {
    /// Number of cells in a full neighbourhood.
    #[inline]
    pub const fn size(self) -> u8 {
        match self {
            Connectivity::Four => 4,
            Connectivity::Eight => 8,
        }
    }

    /// Append the in-bounds neighbours of `c` into `buf`. The caller clears
    /// `buf` before calling.
    pub fn neighbors(self, bounds: Bounds, c: Cell, buf: &mut Vec<Cell>) {
        match self {
            Connectivity::Four => {
                buf.extend(c.neighbors_4().into_iter().filter(|&n| bounds.contains(n)))
            }
            Connectivity::Eight => {
                buf.extend(c.neighbors_8().into_iter().filter(|&n| bounds.contains(n)))
            }
        }
    }
}

impl FromStr for Connectivity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "4" | "four" => Ok(Connectivity::Four),
            "8" | "eight" => Ok(Connectivity::Eight),
            other => Err(Error::UnknownConnectivity(other.to_string())),
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_order_is_row_major() {
        let mut cells = vec![Cell::new(1, 0), Cell::new(0, 2), Cell::new(0, 1)];
        cells.sort();
        assert_eq!(cells, vec![Cell::new(0, 1), Cell::new(0, 2), Cell::new(1, 0)]);
    }

    #[test]
    fn index_round_trips_inside_bounds() {
        let b = Bounds::new(3, 4);
        for c in b {
            let i = b.index(c).unwrap();
            assert_eq!(b.cell(i), c);
        }
        assert_eq!(b.index(Cell::new(3, 0)), None);
        assert_eq!(b.index(Cell::new(0, -1)), None);
    }

    #[test]
    fn iter_len_matches_bounds() {
        let b = Bounds::new(5, 7);
        assert_eq!(b.iter().len(), 35);
        assert_eq!(Bounds::new(0, 7).iter().count(), 0);
    }

    #[test]
    fn neighbors_clip_at_corner() {
        let b = Bounds::new(3, 3);
        let mut buf = Vec::new();
        Connectivity::Four.neighbors(b, Cell::new(0, 0), &mut buf);
        assert_eq!(buf.len(), 2);
        buf.clear();
        Connectivity::Eight.neighbors(b, Cell::new(0, 0), &mut buf);
        assert_eq!(buf.len(), 3);
        buf.clear();
        Connectivity::Eight.neighbors(b, Cell::new(1, 1), &mut buf);
        assert_eq!(buf.len(), 8);
    }

    #[test]
    fn connectivity_parses_by_name() {
        assert_eq!("4".parse::<Connectivity>().unwrap(), Connectivity::Four);
        assert_eq!("eight".parse::<Connectivity>().unwrap(), Connectivity::Eight);
        assert!("6".parse::<Connectivity>().is_err());
    }

    #[test]
    fn diagonal_detection() {
        let c = Cell::new(2, 2);
        assert!(c.is_diagonal_to(Cell::new(3, 3)));
        assert!(!c.is_diagonal_to(Cell::new(2, 3)));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn connectivity_round_trip() {
        let json = serde_json::to_string(&Connectivity::Eight).unwrap();
        let back: Connectivity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Connectivity::Eight);
    }
}
