//! Band selection and time-series averaging.

use std::ops::Range;

use ndarray::ArrayView2;

use aeolus_grid::CapacityFactorGrid;

use crate::bounds::{MaskPolicy, TierBound};
use crate::error::TierError;
use crate::spec::TierSpec;

/// One averaged time series, labelled with its tier and tagged with the
/// number of cells that contributed to it.
#[derive(Debug, Clone, PartialEq)]
pub struct TierSeries {
    /// Column label, e.g. `tier_1`.
    pub label: String,
    /// One value per timestep of the source grid.
    pub values: Vec<f64>,
    /// Number of grid cells averaged into `values`.
    pub cell_count: usize,
}

/// Average the time series of every subset cell whose temporal mean falls
/// strictly inside `(bound.lower, bound.upper)`.
///
/// `mask` covers the `lat_range x lon_range` window; a cell's selection
/// value follows `policy`, so under zero-fill an outside or all-missing
/// cell competes as `0.0` and is never picked by the strict lower bound
/// when capacity factors are non-negative.
///
/// Summation is plain: a NaN at any timestep of any selected cell makes
/// that timestep of the average NaN. Returns `None` when no cell matches
/// the band.
pub fn average_band(
    grid: &CapacityFactorGrid,
    lat_range: &Range<usize>,
    lon_range: &Range<usize>,
    mask: ArrayView2<'_, bool>,
    policy: MaskPolicy,
    spec: &TierSpec,
    bound: &TierBound,
) -> Option<TierSeries> {
    let mean = grid.mean();
    let mut sum = vec![0.0; grid.n_times()];
    let mut cell_count = 0usize;

    for (r, lat_idx) in lat_range.clone().enumerate() {
        for (c, lon_idx) in lon_range.clone().enumerate() {
            let inside = mask[[r, c]];
            let m = mean[[lat_idx, lon_idx]];
            let value = match policy {
                MaskPolicy::ZeroFillOutsidePolygon => {
                    if inside && m.is_finite() {
                        m
                    } else {
                        0.0
                    }
                }
                MaskPolicy::ExcludeOutsidePolygon => {
                    if inside && m.is_finite() {
                        m
                    } else {
                        continue;
                    }
                }
            };
            if value > bound.lower && value < bound.upper {
                for (acc, &v) in sum.iter_mut().zip(grid.cell_series(lat_idx, lon_idx)) {
                    *acc += v;
                }
                cell_count += 1;
            }
        }
    }

    if cell_count == 0 {
        return None;
    }
    let n = cell_count as f64;
    Some(TierSeries {
        label: spec.label(),
        values: sum.into_iter().map(|s| s / n).collect(),
        cell_count,
    })
}

/// The time series of a single cell, labelled `tier_1`.
///
/// # Errors
///
/// Returns [`TierError::AllMissing`] when every timestep of the cell is
/// NaN.
pub fn point_series(
    grid: &CapacityFactorGrid,
    lat_idx: usize,
    lon_idx: usize,
) -> Result<TierSeries, TierError> {
    let values: Vec<f64> = grid.cell_series(lat_idx, lon_idx).to_vec();
    if values.iter().all(|v| v.is_nan()) {
        return Err(TierError::AllMissing {
            lat: grid.lats()[lat_idx],
            lon: grid.lons()[lon_idx],
        });
    }
    Ok(TierSeries {
        label: "tier_1".into(),
        values,
        cell_count: 1,
    })
}
