//! Whole-grid selection of the top percent of cells by mean capacity
//! factor.
//!
//! Unlike the per-geometry pipeline there is no banding here: every cell
//! whose temporal mean strictly exceeds the percentile threshold becomes
//! its own tier column.

use tracing::debug;

use aeolus_grid::CapacityFactorGrid;
use aeolus_stats::{quantile_linear, sorted};

use crate::average::TierSeries;
use crate::error::TierError;
use crate::table::TierTable;

/// Location metadata of one selected cell.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedCell {
    /// Column label of the cell's tier, e.g. `tier_3`.
    pub label: String,
    /// Latitude of the cell center.
    pub lat: f64,
    /// Longitude of the cell center.
    pub lon: f64,
    /// Temporal-mean capacity factor of the cell.
    pub mean: f64,
}

/// Result of a top-percent selection.
///
/// `table` is `None` when no cell strictly exceeds the threshold (for
/// instance on a grid where every mean is identical).
#[derive(Debug, Clone, PartialEq)]
pub struct TopPercentSelection {
    pub table: Option<TierTable>,
    pub cells: Vec<SelectedCell>,
}

/// Select the top `percent` % of grid cells by temporal-mean capacity
/// factor.
///
/// The threshold is the `1 - percent/100` quantile of the finite cell
/// means; a cell qualifies when its mean strictly exceeds it. Selected
/// cells are numbered `tier_1`, `tier_2`, ... in row-major grid order and
/// each contributes its raw series as one column. An
/// `average_of_all_tiers` column is appended when more than one cell
/// qualifies.
///
/// # Errors
///
/// Returns [`TierError::InvalidPercent`] for a percentage outside
/// `0..=100` and [`TierError::NoUsableCells`] when every cell mean is NaN.
pub fn top_percent_table(
    grid: &CapacityFactorGrid,
    percent: f64,
) -> Result<TopPercentSelection, TierError> {
    if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
        return Err(TierError::InvalidPercent { percent });
    }

    let mean = grid.mean();
    let finite: Vec<f64> = mean.iter().copied().filter(|m| m.is_finite()).collect();
    if finite.is_empty() {
        return Err(TierError::NoUsableCells);
    }
    let threshold = quantile_linear(&sorted(&finite), 1.0 - percent / 100.0);
    debug!(percent, threshold, "top-percent threshold computed");

    let mut columns = Vec::new();
    let mut cells = Vec::new();
    for (lat_idx, &lat) in grid.lats().iter().enumerate() {
        for (lon_idx, &lon) in grid.lons().iter().enumerate() {
            let m = mean[[lat_idx, lon_idx]];
            if m.is_finite() && m > threshold {
                let label = format!("tier_{}", columns.len() + 1);
                columns.push(TierSeries {
                    label: label.clone(),
                    values: grid.cell_series(lat_idx, lon_idx).to_vec(),
                    cell_count: 1,
                });
                cells.push(SelectedCell {
                    label,
                    lat,
                    lon,
                    mean: m,
                });
            }
        }
    }

    let table = TierTable::assemble(columns).map(|mut t| {
        t.push_average_column();
        t
    });
    Ok(TopPercentSelection { table, cells })
}
