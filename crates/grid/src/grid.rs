//! The capacity-factor grid container.

use std::ops::Range;

use chrono::NaiveDateTime;
use ndarray::{Array2, Array3, ArrayView1, ArrayView2, ArrayView3, s};

use aeolus_geometry::BoundingBox;
use aeolus_stats::nan_mean;

use crate::error::GridError;

/// Immutable view over a gridded capacity-factor time series.
///
/// Holds the 3-D `time x lat x lon` value array (NaN marks missing data)
/// and a temporal-mean 2-D layer computed once at construction. The mean of
/// a cell is NaN iff every timestep of that cell is NaN; otherwise it is
/// the arithmetic mean of the finite entries.
///
/// Coordinate axes must be strictly ascending; construction rejects
/// anything else so downstream bounding-rectangle subsetting can assume a
/// regular, ordered grid.
#[derive(Debug, Clone)]
pub struct CapacityFactorGrid {
    times: Vec<NaiveDateTime>,
    lats: Vec<f64>,
    lons: Vec<f64>,
    values: Array3<f64>,
    mean: Array2<f64>,
}

impl CapacityFactorGrid {
    /// Create a grid after validating axes and the value-array shape.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyAxis`] for empty time/lat/lon axes,
    /// [`GridError::DimensionMismatch`] when `values` does not have shape
    /// `[times, lats, lons]`, and [`GridError::NotAscending`] /
    /// [`GridError::NonFiniteCoordinate`] for malformed coordinate axes.
    pub fn new(
        times: Vec<NaiveDateTime>,
        lats: Vec<f64>,
        lons: Vec<f64>,
        values: Array3<f64>,
    ) -> Result<Self, GridError> {
        if times.is_empty() {
            return Err(GridError::EmptyAxis {
                name: "time".into(),
            });
        }
        validate_axis("latitude", &lats)?;
        validate_axis("longitude", &lons)?;

        let shape = values.shape();
        for (name, expected, got) in [
            ("time", times.len(), shape[0]),
            ("latitude", lats.len(), shape[1]),
            ("longitude", lons.len(), shape[2]),
        ] {
            if expected != got {
                return Err(GridError::DimensionMismatch {
                    name: name.into(),
                    expected,
                    got,
                });
            }
        }

        let mean = temporal_mean(&values);

        Ok(Self {
            times,
            lats,
            lons,
            values,
            mean,
        })
    }

    /// Number of timesteps.
    pub fn n_times(&self) -> usize {
        self.times.len()
    }

    /// Number of latitude rows.
    pub fn n_lats(&self) -> usize {
        self.lats.len()
    }

    /// Number of longitude columns.
    pub fn n_lons(&self) -> usize {
        self.lons.len()
    }

    /// Timestamps of the time axis.
    pub fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    /// Latitude cell centers, strictly ascending.
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Longitude cell centers, strictly ascending.
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// The full `time x lat x lon` value array.
    pub fn values(&self) -> ArrayView3<'_, f64> {
        self.values.view()
    }

    /// The temporal-mean layer, `lat x lon`.
    pub fn mean(&self) -> ArrayView2<'_, f64> {
        self.mean.view()
    }

    /// The spatial extent spanned by the coordinate axes.
    pub fn extent(&self) -> BoundingBox {
        // Axes are strictly ascending, so first/last are min/max.
        BoundingBox::new(
            self.lons[0],
            self.lats[0],
            self.lons[self.lons.len() - 1],
            self.lats[self.lats.len() - 1],
        )
    }

    /// Time series of a single cell as a view along the time axis.
    pub fn cell_series(&self, lat_idx: usize, lon_idx: usize) -> ArrayView1<'_, f64> {
        self.values.slice(s![.., lat_idx, lon_idx])
    }

    /// Index ranges of the cells whose centers fall inside `bbox`
    /// (boundary inclusive), as `(lat_range, lon_range)`.
    ///
    /// Either range may be empty when the box misses the grid entirely.
    pub fn subset_ranges(&self, bbox: &BoundingBox) -> (Range<usize>, Range<usize>) {
        (
            axis_range(&self.lats, bbox.min_lat, bbox.max_lat),
            axis_range(&self.lons, bbox.min_lon, bbox.max_lon),
        )
    }
}

/// Check that a coordinate axis is non-empty, finite, and strictly ascending.
fn validate_axis(name: &str, coords: &[f64]) -> Result<(), GridError> {
    if coords.is_empty() {
        return Err(GridError::EmptyAxis { name: name.into() });
    }
    for (i, &c) in coords.iter().enumerate() {
        if !c.is_finite() {
            return Err(GridError::NonFiniteCoordinate {
                name: name.into(),
                index: i,
            });
        }
        if i > 0 && coords[i - 1] >= c {
            return Err(GridError::NotAscending {
                name: name.into(),
                index: i,
            });
        }
    }
    Ok(())
}

/// NaN-aware mean along the time axis: one value per grid cell.
fn temporal_mean(values: &Array3<f64>) -> Array2<f64> {
    let shape = values.shape();
    let (n_lats, n_lons) = (shape[1], shape[2]);

    Array2::from_shape_fn((n_lats, n_lons), |(r, c)| {
        let series: Vec<f64> = values.slice(s![.., r, c]).iter().copied().collect();
        nan_mean(&series)
    })
}

/// Half-open index range of ascending `coords` entries within `[min, max]`.
fn axis_range(coords: &[f64], min: f64, max: f64) -> Range<usize> {
    let start = coords.partition_point(|&c| c < min);
    let end = coords.partition_point(|&c| c <= max);
    start..end.max(start)
}
