use fragnet_core::Bounds;

use crate::heap::IndexedHeap;

/// Sentinel distance meaning "no path exists".
pub const UNREACHABLE: f64 = f64::INFINITY;

// ---------------------------------------------------------------------------
// Internal per-cell search state
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub(crate) struct Node {
    pub(crate) g: f64,
    /// Search generation in which `g` was last written.
    pub(crate) generation: u32,
    /// Generation in which this cell was marked as a target.
    pub(crate) target: u32,
}

// ---------------------------------------------------------------------------
// CostSearch
// ---------------------------------------------------------------------------

/// Reusable state for cost-weighted patch-to-patch searches on one grid.
///
/// `CostSearch` owns the open list and the per-cell cost table so that
/// repeated queries incur no allocations after the first use. It is not
/// shared between threads; every worker builds its own.
pub struct CostSearch {
    pub(crate) bounds: Bounds,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) open: IndexedHeap,
    pub(crate) max_expansions: Option<usize>,
    pub(crate) last_expansions: usize,
    // shared scratch buffer for neighbour queries
    pub(crate) nbuf: Vec<fragnet_core::Cell>,
}

impl CostSearch {
    /// Create search state for a grid of the given extent.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            nodes: vec![Node::default(); bounds.len()],
            generation: 0,
            open: IndexedHeap::new(bounds.len()),
            max_expansions: None,
            last_expansions: 0,
            nbuf: Vec::with_capacity(8),
        }
    }

    /// Cap the number of node expansions of every following search.
    ///
    /// A search exceeding the cap fails with
    /// [`Error::SearchLimitExceeded`](fragnet_core::Error::SearchLimitExceeded).
    pub fn with_max_expansions(mut self, limit: Option<usize>) -> Self {
        self.max_expansions = limit;
        self
    }

    /// The grid extent being searched.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of nodes expanded by the most recent search.
    #[inline]
    pub fn last_expansions(&self) -> usize {
        self.last_expansions
    }

    /// Start a new search generation, lazily invalidating all nodes.
    pub(crate) fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            for n in self.nodes.iter_mut() {
                *n = Node::default();
            }
            self.generation = 1;
        }
        self.open.clear();
        self.generation
    }
}
