//! **fragnet-core**: grid model for patch analysis.
//!
//! This crate provides the foundational types used across the *fragnet*
//! workspace: cell coordinates and bounds, neighbourhood connectivity, an
//! immutable categorical grid, a cost (resistance) surface and the shared
//! error type.

pub mod cost;
pub mod error;
pub mod geom;
pub mod grid;

pub use cost::{BLOCKED, CostSurface};
pub use error::{Error, Result};
pub use geom::{Bounds, Cell, Connectivity};
pub use grid::CategoryGrid;
