//! Patch nearest-neighbour analysis for fragnet.
//!
//! Given a categorical grid, a target category and an optional cost
//! surface, this crate extracts the patches of that category, builds a
//! distance matrix between them under a selectable [`MetricKind`], derives
//! each patch's nearest neighbours and summarises neighbour values with a
//! [`Statistic`]. [`writer`] serialises the resulting matrices.
//!
//! ```no_run
//! use fragnet_core::CategoryGrid;
//! use fragnet_fnn::{FnnConfig, MetricKind, run};
//!
//! let grid = CategoryGrid::from_rows(&[[1, 0, 1], [0, 0, 0], [1, 0, 0]])?;
//! let config = FnnConfig {
//!     metric: MetricKind::PathDistance,
//!     numbers: vec![1, 2],
//!     ..FnnConfig::default()
//! };
//! let report = run(&grid, None, &config)?;
//! report.write_distance_matrix(&mut std::io::stdout())?;
//! # Ok::<(), fragnet_core::Error>(())
//! ```

mod analysis;
mod config;
mod context;
mod matrix;
mod metric;
mod nearest;
mod numbers;
mod stats;
pub mod writer;

pub use analysis::{FnnReport, run};
pub use config::FnnConfig;
pub use context::AnalysisContext;
pub use matrix::DistanceMatrix;
pub use metric::{MetricKind, PerimeterMode, area, euclidean_distance, perimeter, shape_index};
pub use nearest::{NeighborLists, Selection, ShortfallPolicy, select_neighbors};
pub use numbers::parse_neighbor_numbers;
pub use stats::Statistic;
