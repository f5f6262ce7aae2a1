//! Textual matrix artifacts.
//!
//! Every artifact has one line per patch, starting with the patch id and
//! followed by space-separated fields:
//!
//! | artifact | fields |
//! |---|---|
//! | distance matrix | `N` values with 4 decimals, unreachable as `1000000.0000` |
//! | neighbour table | neighbour ids, nearest first |
//! | adjacency matrix | `N` flags, `1` if the column patch is a selected neighbour |

use std::io::Write;

use fragnet_core::{Error, Result};
use fragnet_paths::PatchSet;

use crate::matrix::DistanceMatrix;
use crate::nearest::NeighborLists;

/// Value written in place of an unreachable distance.
pub const UNREACHABLE_VALUE: f64 = 1_000_000.0;

/// Decimal places of distance values.
pub const PRECISION: usize = 4;

/// Fail unless there is one row of `what` per patch.
fn ensure_rows(what: &'static str, patches: &PatchSet, rows: usize) -> Result<()> {
    if rows != patches.len() {
        return Err(Error::InvalidGrid {
            what,
            expected_rows: patches.len(),
            expected_cols: patches.len(),
            rows,
            cols: rows,
        });
    }
    Ok(())
}

/// Write the patch ids and the full distance matrix.
pub fn write_distance_matrix<W: Write>(
    w: &mut W,
    patches: &PatchSet,
    matrix: &DistanceMatrix,
) -> Result<()> {
    ensure_rows("distance matrix", patches, matrix.len())?;
    for (p, row) in patches.iter().zip(matrix.rows()) {
        write!(w, "{}", p.id())?;
        for &d in row {
            let d = if d.is_finite() { d } else { UNREACHABLE_VALUE };
            write!(w, " {d:.PRECISION$}")?;
        }
        writeln!(w)?;
    }
    Ok(())
}

/// Write each patch id followed by its ordered neighbour ids.
pub fn write_neighbor_table<W: Write>(
    w: &mut W,
    patches: &PatchSet,
    neighbors: &NeighborLists,
) -> Result<()> {
    ensure_rows("neighbour table", patches, neighbors.len())?;
    for (p, list) in patches.iter().zip(neighbors.iter()) {
        write!(w, "{}", p.id())?;
        for j in list {
            write!(w, " {j}")?;
        }
        writeln!(w)?;
    }
    Ok(())
}

/// Write each patch id followed by a 0/1 adjacency row.
pub fn write_adjacency_matrix<W: Write>(
    w: &mut W,
    patches: &PatchSet,
    neighbors: &NeighborLists,
) -> Result<()> {
    ensure_rows("adjacency matrix", patches, neighbors.len())?;
    let n = patches.len();
    for p in patches {
        write!(w, "{}", p.id())?;
        for j in 0..n {
            write!(w, " {}", u8::from(neighbors.contains(p.id(), j)))?;
        }
        writeln!(w)?;
    }
    Ok(())
}
