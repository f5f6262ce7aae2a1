//! Random-landscape nearest-neighbour demo.
//!
//! Usage: `fnn-demo [metric] [numbers]`, e.g. `fnn-demo path_distance 1-3`.
//! Prints the distance matrix, the neighbour table and the per-patch
//! statistic for every requested neighbour number.

use std::io::{self, Write};

use fragnet_core::{BLOCKED, CategoryGrid, Connectivity, CostSurface};
use fragnet_fnn::{FnnConfig, MetricKind, parse_neighbor_numbers, run};
use rand::RngExt;

const ROWS: usize = 40;
const COLS: usize = 40;

fn main() -> fragnet_core::Result<()> {
    let mut args = std::env::args().skip(1);
    let metric = match args.next() {
        Some(name) => name.parse::<MetricKind>()?,
        None => MetricKind::Distance,
    };
    let numbers = match args.next() {
        Some(list) => parse_neighbor_numbers(&list)?,
        None => vec![1, 2, 3],
    };

    let mut rng = rand::rng();
    let values: Vec<i32> = (0..ROWS * COLS)
        .map(|_| i32::from(rng.random_bool(0.08)))
        .collect();
    let weights: Vec<f64> = (0..ROWS * COLS)
        .map(|_| {
            if rng.random_bool(0.03) {
                BLOCKED
            } else {
                rng.random_range(1.0..10.0)
            }
        })
        .collect();
    let grid = CategoryGrid::new(ROWS, COLS, values)?;
    let cost = CostSurface::new(ROWS, COLS, weights)?;

    let config = FnnConfig {
        connectivity: Connectivity::Eight,
        metric,
        numbers,
        ..FnnConfig::default()
    };
    let report = run(&grid, Some(&cost), &config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "# {} patches, metric {}", report.patches().len(), metric)?;
    writeln!(out, "# distance matrix")?;
    report.write_distance_matrix(&mut out)?;
    writeln!(out, "# nearest neighbours")?;
    report.write_neighbor_table(&mut out)?;
    for &k in report.numbers() {
        writeln!(out, "# {} of {} nearest", report.statistic(), k)?;
        if let Some(vals) = report.values_for(k) {
            for (id, v) in vals.iter().enumerate() {
                writeln!(out, "{id} {v:.4}")?;
            }
        }
    }
    Ok(())
}
