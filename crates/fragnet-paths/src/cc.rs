//! Connected-component labelling of one category into patches.

use fragnet_core::{CategoryGrid, Connectivity};

use crate::patch::{Extent, Patch, PatchSet};

impl PatchSet {
    /// Partition every cell equal to `keyval` into connected patches.
    ///
    /// Cells are scanned in row-major order; each unlabelled matching cell
    /// seeds a new patch whose id is the next free index. The neighbour count
    /// of every member cell is accumulated during the same traversal. An
    /// empty grid or a grid without matching cells yields an empty set.
    pub fn extract(grid: &CategoryGrid, keyval: i32, connectivity: Connectivity) -> Self {
        let bounds = grid.bounds();
        let values = grid.values();
        let mut labels = vec![-1; bounds.len()];
        let mut patches = Vec::new();

        let mut stack: Vec<usize> = Vec::new();
        let mut nbuf = Vec::with_capacity(8);

        for start in 0..bounds.len() {
            if values[start] != keyval || labels[start] >= 0 {
                continue;
            }

            let label = patches.len() as i32;
            let start_cell = bounds.cell(start);
            let mut cells = Vec::new();
            let mut neighbors = Vec::new();
            let mut extent = Extent::of(start_cell);

            // Iterative DFS from `start`.
            stack.clear();
            stack.push(start);
            labels[start] = label;

            while let Some(ci) = stack.pop() {
                let cp = bounds.cell(ci);
                extent.include(cp);
                nbuf.clear();
                connectivity.neighbors(bounds, cp, &mut nbuf);

                let mut count = 0u8;
                for &np in nbuf.iter() {
                    let Some(ni) = bounds.index(np) else {
                        continue;
                    };
                    if values[ni] != keyval {
                        continue;
                    }
                    count += 1;
                    if labels[ni] < 0 {
                        labels[ni] = label;
                        stack.push(ni);
                    }
                }

                cells.push(cp);
                neighbors.push(count);
            }

            patches.push(Patch {
                id: label as usize,
                cells,
                neighbors,
                extent,
                connectivity,
            });
        }

        log::debug!(
            "extracted {} patches of category {} from a {} grid",
            patches.len(),
            keyval,
            bounds
        );

        Self {
            patches,
            labels,
            bounds,
            connectivity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fragnet_core::Cell;
    use rand::RngExt;

    fn grid(rows: &[&[i32]]) -> CategoryGrid {
        CategoryGrid::from_rows(rows).unwrap()
    }

    #[test]
    fn empty_grid_has_no_patches() {
        let g = CategoryGrid::from_rows::<Vec<i32>>(&[]).unwrap();
        let set = PatchSet::extract(&g, 1, Connectivity::Four);
        assert!(set.is_empty());
    }

    #[test]
    fn no_matching_cells_has_no_patches() {
        let g = CategoryGrid::filled(4, 4, 0);
        assert!(PatchSet::extract(&g, 1, Connectivity::Eight).is_empty());
    }

    #[test]
    fn diagonal_cells_split_under_four_connectivity() {
        let g = grid(&[&[1, 0], &[0, 1]]);
        let four = PatchSet::extract(&g, 1, Connectivity::Four);
        assert_eq!(four.len(), 2);
        assert_eq!(four.patches()[0].cells(), &[Cell::new(0, 0)]);
        assert_eq!(four.patches()[1].cells(), &[Cell::new(1, 1)]);

        let eight = PatchSet::extract(&g, 1, Connectivity::Eight);
        assert_eq!(eight.len(), 1);
        assert_eq!(eight.patches()[0].len(), 2);
        assert_eq!(eight.patches()[0].neighbor_counts(), &[1, 1]);
    }

    #[test]
    fn single_cell_patch_has_zero_neighbors() {
        let g = grid(&[&[0, 0, 0], &[0, 1, 0], &[0, 0, 0]]);
        let set = PatchSet::extract(&g, 1, Connectivity::Eight);
        assert_eq!(set.len(), 1);
        assert_eq!(set.patches()[0].neighbor_counts(), &[0]);
        assert_eq!(set.label_at(Cell::new(1, 1)), Some(0));
        assert_eq!(set.label_at(Cell::new(0, 0)), None);
    }

    #[test]
    fn ids_follow_row_major_discovery() {
        let g = grid(&[&[0, 0, 2], &[2, 0, 2], &[2, 0, 0]]);
        let set = PatchSet::extract(&g, 2, Connectivity::Four);
        assert_eq!(set.len(), 2);
        assert_eq!(set.label_at(Cell::new(0, 2)), Some(0));
        assert_eq!(set.label_at(Cell::new(2, 0)), Some(1));
        for (i, p) in set.iter().enumerate() {
            assert_eq!(p.id(), i);
        }
    }

    #[test]
    fn interior_cell_counts_full_neighborhood() {
        let g = CategoryGrid::filled(3, 3, 1);
        let set = PatchSet::extract(&g, 1, Connectivity::Four);
        let p = &set.patches()[0];
        let centre = p.cells().iter().position(|&c| c == Cell::new(1, 1)).unwrap();
        assert_eq!(p.neighbor_counts()[centre], 4);
        assert_eq!(p.boundary().count(), 8);
        assert_eq!(p.extent().max, Cell::new(2, 2));
    }

    #[test]
    fn random_grids_are_partitioned_exactly() {
        let mut rng = rand::rng();
        for connectivity in [Connectivity::Four, Connectivity::Eight] {
            for _ in 0..20 {
                let rows = rng.random_range(1..12usize);
                let cols = rng.random_range(1..12usize);
                let values: Vec<i32> = (0..rows * cols).map(|_| rng.random_range(0..3)).collect();
                let g = CategoryGrid::new(rows, cols, values).unwrap();
                let set = PatchSet::extract(&g, 1, connectivity);

                let mut seen = vec![0u32; rows * cols];
                for p in &set {
                    for (&c, &n) in p.cells().iter().zip(p.neighbor_counts()) {
                        seen[g.bounds().index(c).unwrap()] += 1;
                        assert_eq!(set.label_at(c), Some(p.id()));
                        assert!(n <= connectivity.size());
                    }
                    if p.len() == 1 {
                        assert_eq!(p.neighbor_counts(), &[0]);
                    }
                }
                for (c, v) in g.iter() {
                    let i = g.bounds().index(c).unwrap();
                    assert_eq!(seen[i], u32::from(v == 1), "cell {c} counted {} times", seen[i]);
                }
            }
        }
    }
}
