//! The distance-metric registry.
//!
//! Every metric reduces a patch pair to a scalar through
//! [`MetricKind::evaluate`]. Pairwise metrics (`distance`, `path_distance`)
//! measure between the two patches; attribute metrics (`area`,
//! `perimeter`, `shapeindex`) describe the second patch alone, which lets
//! the matrix builder broadcast them across rows.

use std::fmt;
use std::str::FromStr;

use fragnet_core::{Connectivity, Error, Result};
use fragnet_paths::{CostSearch, Patch, PatchSet, euclidean};

use crate::context::AnalysisContext;

/// Selectable patch metric.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MetricKind {
    /// Shortest straight-line distance between boundary cells.
    #[default]
    Distance,
    /// Least accumulated cost through the cost surface.
    PathDistance,
    /// Cell count.
    Area,
    /// Boundary length, see [`PerimeterMode`].
    Perimeter,
    /// Perimeter relative to that of a square of equal area.
    #[cfg_attr(feature = "serde", serde(rename = "shapeindex"))]
    ShapeIndex,
}

impl MetricKind {
    pub const ALL: &[MetricKind] = &[
        Self::Distance,
        Self::PathDistance,
        Self::Area,
        Self::Perimeter,
        Self::ShapeIndex,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::PathDistance => "path_distance",
            Self::Area => "area",
            Self::Perimeter => "perimeter",
            Self::ShapeIndex => "shapeindex",
        }
    }

    /// Whether the metric measures between two patches rather than
    /// describing one.
    pub fn is_pairwise(self) -> bool {
        matches!(self, Self::Distance | Self::PathDistance)
    }

    /// Whether `evaluate(a, b) == evaluate(b, a)` for every pair.
    pub fn is_symmetric(self) -> bool {
        self.is_pairwise()
    }

    /// The pairwise metric that decides which patches are neighbours when
    /// this metric is reported.
    pub fn neighbor_relation(self) -> MetricKind {
        match self {
            Self::PathDistance => Self::PathDistance,
            _ => Self::Distance,
        }
    }

    /// Value of this metric for the ordered pair `(from, to)`.
    ///
    /// Attribute metrics ignore `from`. `path_distance` yields
    /// [`UNREACHABLE`](fragnet_paths::UNREACHABLE) when no path exists.
    pub fn evaluate(
        self,
        ctx: &AnalysisContext<'_>,
        search: &mut CostSearch,
        from: &Patch,
        to: &Patch,
    ) -> Result<f64> {
        match self {
            Self::Distance => Ok(euclidean_distance(from, to)),
            Self::PathDistance => search.cost_distance(&ctx.pather(), from.cells(), to.cells()),
            _ => Ok(self.attribute(ctx, to)),
        }
    }

    /// Single-patch value of an attribute metric; pairwise metrics give 0.
    pub fn attribute(self, ctx: &AnalysisContext<'_>, p: &Patch) -> f64 {
        match self {
            Self::Area => area(p),
            Self::Perimeter => perimeter(ctx.patches(), p, ctx.perimeter_mode()),
            Self::ShapeIndex => shape_index(ctx.patches(), p),
            Self::Distance | Self::PathDistance => 0.0,
        }
    }
}

impl FromStr for MetricKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name() == s)
            .ok_or_else(|| Error::UnknownMetric(s.to_string()))
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a patch perimeter is counted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PerimeterMode {
    /// Number of boundary cells.
    BoundaryCells,
    /// Number of cell edges not shared with another cell of the patch.
    #[default]
    ExposedEdges,
}

// ---------------------------------------------------------------------------
// Metric functions
// ---------------------------------------------------------------------------

/// Shortest centre-to-centre distance between the boundary cells of two
/// patches. Brute force over both boundaries.
pub fn euclidean_distance(a: &Patch, b: &Patch) -> f64 {
    let mut best = f64::INFINITY;
    for ca in a.boundary() {
        for cb in b.boundary() {
            best = best.min(euclidean(ca, cb));
        }
    }
    best
}

/// Patch area in cells.
pub fn area(p: &Patch) -> f64 {
    p.len() as f64
}

/// Patch perimeter under `mode`.
pub fn perimeter(set: &PatchSet, p: &Patch, mode: PerimeterMode) -> f64 {
    match mode {
        PerimeterMode::BoundaryCells => p.boundary().count() as f64,
        PerimeterMode::ExposedEdges => exposed_edges(set, p) as f64,
    }
}

/// Perimeter (in exposed edges) divided by the perimeter `4 * sqrt(area)`
/// of a square of the same area. At least 1; a square gives exactly 1.
pub fn shape_index(set: &PatchSet, p: &Patch) -> f64 {
    if p.is_empty() {
        return 0.0;
    }
    exposed_edges(set, p) as f64 / (4.0 * area(p).sqrt())
}

fn exposed_edges(set: &PatchSet, p: &Patch) -> usize {
    match p.connectivity() {
        // Neighbour counts are already cardinal.
        Connectivity::Four => p.neighbor_counts().iter().map(|&n| 4 - n as usize).sum(),
        Connectivity::Eight => p
            .cells()
            .iter()
            .flat_map(|c| c.neighbors_4())
            .filter(|&n| set.label_at(n) != Some(p.id()))
            .count(),
    }
}
