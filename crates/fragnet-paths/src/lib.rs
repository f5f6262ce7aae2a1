//! Patch extraction and path search for grid-based patch analysis.
//!
//! This crate provides the graph side of the *fragnet* workspace:
//!
//! - **Connected components** labelling of a target category into
//!   [`Patch`]es ([`PatchSet::extract`])
//! - an **indexable binary min-heap** with decrease-key ([`IndexedHeap`])
//! - **A\*** cost-weighted distance between two cell sets through a
//!   [`CostSurface`](fragnet_core::CostSurface) ([`CostSearch::cost_distance`])
//!
//! [`CostSearch`] owns and reuses its internal caches so that repeated
//! pair queries incur no allocations after warm-up.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | neighbour enumeration |
//! | [`WeightedPather`] : [`Pather`] | step costs |
//! | [`AstarPather`] : [`WeightedPather`] | A* |

mod astar;
mod cc;
mod distance;
mod heap;
mod patch;
mod pather;
mod search;
mod traits;

pub use distance::euclidean;
pub use heap::{IndexedHeap, SearchNode};
pub use patch::{Extent, Patch, PatchSet};
pub use pather::CostPather;
pub use search::{CostSearch, UNREACHABLE};
pub use traits::{AstarPather, Pather, WeightedPather};
