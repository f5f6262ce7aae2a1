use fragnet_core::Cell;

use crate::patch::Extent;

/// Minimal pathfinding interface: neighbour enumeration.
pub trait Pather {
    /// Whether `c` may be entered (and left) by a path.
    fn passable(&self, c: Cell) -> bool;

    /// Append the traversable neighbours of `c` into `buf`. The caller clears
    /// `buf` before calling.
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>);
}

/// Pather with weighted (non-negative) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be >= 0.
    fn cost(&self, from: Cell, to: Cell) -> f64;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of the cost from `from` to the nearest cell inside
    /// `goal`. Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Cell, goal: &Extent) -> f64;
}
