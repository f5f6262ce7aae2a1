use std::borrow::Cow;

use fragnet_core::{Bounds, CategoryGrid, Connectivity, CostSurface, Result};
use fragnet_paths::{CostPather, CostSearch, PatchSet};

use crate::config::FnnConfig;
use crate::metric::PerimeterMode;

/// Everything a metric evaluation needs, threaded explicitly through the
/// matrix builder instead of living in process-wide state.
///
/// The context is read-only once built and can be shared by reference
/// between worker threads.
#[derive(Debug)]
pub struct AnalysisContext<'a> {
    grid: &'a CategoryGrid,
    cost: Cow<'a, CostSurface>,
    patches: PatchSet,
    perimeter: PerimeterMode,
    max_search_iterations: Option<usize>,
}

impl<'a> AnalysisContext<'a> {
    /// Validate the inputs and extract the patches of `config.keyval`.
    ///
    /// Fails with [`Error::InvalidGrid`](fragnet_core::Error::InvalidGrid)
    /// if `cost` does not cover exactly the grid. A missing cost surface is
    /// replaced by a uniform one.
    pub fn new(
        grid: &'a CategoryGrid,
        cost: Option<&'a CostSurface>,
        config: &FnnConfig,
    ) -> Result<Self> {
        let cost = match cost {
            Some(c) => {
                c.ensure_matches(grid.bounds())?;
                Cow::Borrowed(c)
            }
            None => Cow::Owned(CostSurface::uniform(grid.bounds())),
        };
        let patches = PatchSet::extract(grid, config.keyval, config.connectivity);
        Ok(Self {
            grid,
            cost,
            patches,
            perimeter: config.perimeter,
            max_search_iterations: config.max_search_iterations,
        })
    }

    #[inline]
    pub fn grid(&self) -> &CategoryGrid {
        self.grid
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.grid.bounds()
    }

    #[inline]
    pub fn cost_surface(&self) -> &CostSurface {
        &self.cost
    }

    #[inline]
    pub fn patches(&self) -> &PatchSet {
        &self.patches
    }

    #[inline]
    pub fn connectivity(&self) -> Connectivity {
        self.patches.connectivity()
    }

    #[inline]
    pub fn perimeter_mode(&self) -> PerimeterMode {
        self.perimeter
    }

    /// Pather over this context's cost surface.
    pub fn pather(&self) -> CostPather<'_> {
        CostPather::new(&self.cost, self.connectivity())
    }

    /// Fresh search state sized for the grid. Each worker owns its own.
    pub fn new_search(&self) -> CostSearch {
        CostSearch::new(self.bounds()).with_max_expansions(self.max_search_iterations)
    }

    /// Give up the context, keeping the extracted patches.
    pub fn into_patches(self) -> PatchSet {
        self.patches
    }
}
