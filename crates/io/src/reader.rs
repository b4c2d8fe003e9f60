//! High-level NetCDF grid reader configuration and orchestration.

use std::path::Path;

use ndarray::Array3;
use tracing::{debug, info};

use aeolus_grid::CapacityFactorGrid;

use crate::error::IoError;
use crate::netcdf_read;

// ---------------------------------------------------------------------------
// GridReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for reading a capacity-factor grid from a NetCDF file.
///
/// Use the builder methods (`with_*`) to customise variable names and
/// coordinate aliases. The [`Default`] implementation supplies
/// CF-convention names suitable for renewable-resource model output.
#[derive(Debug, Clone)]
pub struct GridReaderConfig {
    /// NetCDF variable name for the capacity-factor data cube.
    data_var: String,
    /// NetCDF variable name for the time axis.
    time_var: String,
    /// Aliases to try when looking up latitude coordinates.
    lat_aliases: Vec<String>,
    /// Aliases to try when looking up longitude coordinates.
    lon_aliases: Vec<String>,
}

impl Default for GridReaderConfig {
    fn default() -> Self {
        Self {
            data_var: "capacity_factors".into(),
            time_var: "time".into(),
            lat_aliases: vec!["latitude".into(), "lat".into(), "y".into()],
            lon_aliases: vec!["longitude".into(), "lon".into(), "x".into()],
        }
    }
}

impl GridReaderConfig {
    /// Set the capacity-factor variable name.
    pub fn with_data_var(mut self, name: impl Into<String>) -> Self {
        self.data_var = name.into();
        self
    }

    /// Set the time variable name.
    pub fn with_time_var(mut self, name: impl Into<String>) -> Self {
        self.time_var = name.into();
        self
    }

    /// Replace the latitude coordinate aliases, tried in order.
    pub fn with_lat_aliases(mut self, aliases: Vec<String>) -> Self {
        self.lat_aliases = aliases;
        self
    }

    /// Replace the longitude coordinate aliases, tried in order.
    pub fn with_lon_aliases(mut self, aliases: Vec<String>) -> Self {
        self.lon_aliases = aliases;
        self
    }
}

// ---------------------------------------------------------------------------
// read_grid
// ---------------------------------------------------------------------------

/// Read a capacity-factor grid from a NetCDF file.
///
/// The file must contain a 3-D `time x lat x lon` data variable,
/// coordinate axis arrays, and a CF-style time axis with a
/// `"<unit> since <timestamp>"` units attribute. `_FillValue` entries come
/// back as NaN.
///
/// # Errors
///
/// Returns [`IoError`] on missing variables, dimension mismatches, time
/// parsing failures, or grid construction problems (descending or
/// non-finite coordinate axes).
pub fn read_grid(path: &Path, config: &GridReaderConfig) -> Result<CapacityFactorGrid, IoError> {
    let file = netcdf_read::open_file(path)?;

    // -- Coordinates --------------------------------------------------------

    let lat_alias_refs: Vec<&str> = config.lat_aliases.iter().map(String::as_str).collect();
    let lon_alias_refs: Vec<&str> = config.lon_aliases.iter().map(String::as_str).collect();

    let lats = netcdf_read::read_1d_f64(&file, &lat_alias_refs, path)?;
    let lons = netcdf_read::read_1d_f64(&file, &lon_alias_refs, path)?;

    // -- Time ---------------------------------------------------------------

    let time_offsets = netcdf_read::read_1d_f64(&file, &[&config.time_var], path)?;
    let (unit, base) = netcdf_read::read_time_units(&file, &config.time_var, path)?;
    let times = netcdf_read::offsets_to_timestamps(base, &time_offsets, unit)?;
    debug!(n_times = times.len(), ?unit, "time axis decoded");

    // -- Data cube ----------------------------------------------------------

    let (data, [nt, ny, nx]) = netcdf_read::read_3d_f64(&file, &config.data_var, path)?;
    let values = Array3::from_shape_vec((nt, ny, nx), data).map_err(|e| IoError::Netcdf {
        reason: format!("could not shape '{}' data: {e}", config.data_var),
    })?;

    let grid = CapacityFactorGrid::new(times, lats, lons, values)?;
    info!(
        n_times = grid.n_times(),
        n_lats = grid.n_lats(),
        n_lons = grid.n_lons(),
        path = %path.display(),
        "capacity-factor grid loaded"
    );
    Ok(grid)
}
