use std::f64::consts::SQRT_2;

use fragnet_core::{Cell, Connectivity, CostSurface};

use crate::patch::Extent;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// Pather moving through a [`CostSurface`].
///
/// A step between adjacent passable cells costs its length (1, or √2 for a
/// diagonal step) times the mean weight of the two cells, so the cost of a
/// path does not depend on its direction. Blocked cells are never entered.
#[derive(Debug, Clone, Copy)]
pub struct CostPather<'a> {
    surface: &'a CostSurface,
    connectivity: Connectivity,
}

impl<'a> CostPather<'a> {
    pub fn new(surface: &'a CostSurface, connectivity: Connectivity) -> Self {
        Self {
            surface,
            connectivity,
        }
    }

    #[inline]
    pub fn surface(&self) -> &'a CostSurface {
        self.surface
    }
}

impl Pather for CostPather<'_> {
    fn passable(&self, c: Cell) -> bool {
        self.surface.is_passable(c)
    }

    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>) {
        self.connectivity.neighbors(self.surface.bounds(), c, buf);
        buf.retain(|&n| self.surface.is_passable(n));
    }
}

impl WeightedPather for CostPather<'_> {
    fn cost(&self, from: Cell, to: Cell) -> f64 {
        let wa = self.surface.weight(from).unwrap_or(0.0);
        let wb = self.surface.weight(to).unwrap_or(0.0);
        let len = if from.is_diagonal_to(to) { SQRT_2 } else { 1.0 };
        len * (wa + wb) / 2.0
    }
}

impl AstarPather for CostPather<'_> {
    /// Straight-line distance to the goal's bounding box scaled by the
    /// cheapest passable weight. Every step of length `l` costs at least
    /// `l * min_weight`, so the estimate never overshoots.
    fn estimate(&self, from: Cell, goal: &Extent) -> f64 {
        goal.distance_to(from) * self.surface.min_weight()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fragnet_core::{BLOCKED, Bounds};

    #[test]
    fn neighbors_skip_blocked_cells() {
        let s = CostSurface::from_rows(&[[1.0, BLOCKED, 1.0], [1.0, 1.0, 1.0]]).unwrap();
        let p = CostPather::new(&s, Connectivity::Eight);
        let mut buf = Vec::new();
        p.neighbors(Cell::new(0, 0), &mut buf);
        assert_eq!(buf, vec![Cell::new(1, 1), Cell::new(1, 0)]);
    }

    #[test]
    fn step_cost_is_symmetric_mean() {
        let s = CostSurface::from_rows(&[[1.0, 3.0], [2.0, 4.0]]).unwrap();
        let p = CostPather::new(&s, Connectivity::Eight);
        let a = Cell::new(0, 0);
        let b = Cell::new(0, 1);
        assert_eq!(p.cost(a, b), 2.0);
        assert_eq!(p.cost(a, b), p.cost(b, a));
        let d = p.cost(a, Cell::new(1, 1));
        assert!((d - SQRT_2 * 2.5).abs() < 1e-12);
    }

    #[test]
    fn estimate_scales_by_min_weight() {
        let s = CostSurface::uniform(Bounds::new(10, 10));
        let p = CostPather::new(&s, Connectivity::Four);
        let goal = Extent::of(Cell::new(4, 5));
        assert_eq!(p.estimate(Cell::new(0, 2), &goal), 5.0);
    }
}
