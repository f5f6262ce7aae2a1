//! Error types shared by the fragnet crates.

use thiserror::Error;

/// Primary error type for patch analysis.
///
/// An unreachable patch pair is *not* an error; it is recorded as the
/// `UNREACHABLE` sentinel in distance matrices.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{what} is {rows}x{cols}, expected {expected_rows}x{expected_cols}")]
    InvalidGrid {
        what: &'static str,
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("cost surface value {value} at ({row}, {col}) is neither a non-negative weight nor blocked")]
    MalformedCostSurface { row: usize, col: usize, value: f64 },

    #[error("no patches found")]
    EmptyPatchSet,

    #[error("extract from an empty priority queue")]
    EmptyQueue,

    #[error("patch {patch} has {available} reachable neighbours, {requested} requested")]
    InsufficientPatches {
        patch: usize,
        requested: usize,
        available: usize,
    },

    #[error("path search exceeded {limit} node expansions")]
    SearchLimitExceeded { limit: usize },

    #[error("unknown distance metric: {0}")]
    UnknownMetric(String),

    #[error("unknown statistic: {0}")]
    UnknownStatistic(String),

    #[error("unknown connectivity: {0}")]
    UnknownConnectivity(String),

    #[error("invalid neighbour list: {0}")]
    InvalidNeighborList(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias for [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
