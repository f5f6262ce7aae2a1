use fragnet_core::{Bounds, Cell, Connectivity};

// ---------------------------------------------------------------------------
// Extent
// ---------------------------------------------------------------------------

/// Inclusive bounding box of a set of cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    pub min: Cell,
    pub max: Cell,
}

impl Extent {
    /// A box holding exactly `c`.
    #[inline]
    pub fn of(c: Cell) -> Self {
        Self { min: c, max: c }
    }

    /// Grow the box to cover `c`.
    #[inline]
    pub fn include(&mut self, c: Cell) {
        self.min.row = self.min.row.min(c.row);
        self.min.col = self.min.col.min(c.col);
        self.max.row = self.max.row.max(c.row);
        self.max.col = self.max.col.max(c.col);
    }

    /// Bounding box of `cells`, or `None` if there are none.
    pub fn around(cells: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let mut it = cells.into_iter();
        let mut ext = Self::of(it.next()?);
        for c in it {
            ext.include(c);
        }
        Some(ext)
    }

    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        c.row >= self.min.row && c.row <= self.max.row && c.col >= self.min.col && c.col <= self.max.col
    }

    /// Straight-line distance from `c` to the nearest cell of the box
    /// (0 inside). Never larger than the distance to any cell in the box.
    #[inline]
    pub fn distance_to(&self, c: Cell) -> f64 {
        let dr = (self.min.row - c.row).max(c.row - self.max.row).max(0);
        let dc = (self.min.col - c.col).max(c.col - self.max.col).max(0);
        f64::from(dr).hypot(f64::from(dc))
    }
}

// ---------------------------------------------------------------------------
// Patch
// ---------------------------------------------------------------------------

/// A maximal connected group of cells carrying the target category.
///
/// Each cell is paired with its neighbour count: how many of its 4 or 8
/// neighbours belong to the same patch. A cell whose count is below the full
/// neighbourhood size lies on the patch boundary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Patch {
    pub(crate) id: usize,
    pub(crate) cells: Vec<Cell>,
    pub(crate) neighbors: Vec<u8>,
    pub(crate) extent: Extent,
    pub(crate) connectivity: Connectivity,
}

impl Patch {
    /// Identifier assigned at extraction (0-based discovery order).
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Member cells in discovery order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Same-patch neighbour count of each cell, parallel to [`cells`](Self::cells).
    #[inline]
    pub fn neighbor_counts(&self) -> &[u8] {
        &self.neighbors
    }

    /// Number of cells (the patch area in cell units).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Neighbourhood the patch was labelled with.
    #[inline]
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Cells with fewer same-patch neighbours than the full neighbourhood.
    pub fn boundary(&self) -> impl Iterator<Item = Cell> + '_ {
        let full = self.connectivity.size();
        self.cells
            .iter()
            .zip(&self.neighbors)
            .filter(move |&(_, &n)| n < full)
            .map(|(&c, _)| c)
    }
}

// ---------------------------------------------------------------------------
// PatchSet
// ---------------------------------------------------------------------------

/// The patches of one category value together with a per-cell label map.
#[derive(Debug, Clone)]
pub struct PatchSet {
    pub(crate) patches: Vec<Patch>,
    /// Patch id per cell, `-1` for unmarked cells.
    pub(crate) labels: Vec<i32>,
    pub(crate) bounds: Bounds,
    pub(crate) connectivity: Connectivity,
}

impl PatchSet {
    #[inline]
    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    #[inline]
    pub fn get(&self, id: usize) -> Option<&Patch> {
        self.patches.get(id)
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Patch id owning `c`, or `None` if the cell is unmarked or outside.
    pub fn label_at(&self, c: Cell) -> Option<usize> {
        let i = self.bounds.index(c)?;
        let label = self.labels[i];
        if label < 0 { None } else { Some(label as usize) }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Patch> {
        self.patches.iter()
    }
}

impl<'a> IntoIterator for &'a PatchSet {
    type Item = &'a Patch;
    type IntoIter = std::slice::Iter<'a, Patch>;

    fn into_iter(self) -> Self::IntoIter {
        self.patches.iter()
    }
}
