//! Integration tests for the NetCDF grid reader.
//!
//! Builds small NetCDF fixtures programmatically and checks that the
//! reader reconstructs axes, timestamps, values, and missing-data
//! sentinels.

use std::path::Path;

use approx::assert_relative_eq;
use chrono::NaiveDate;
use tempfile::tempdir;

use aeolus_io::{GridReaderConfig, IoError, read_grid};

// ---------------------------------------------------------------------------
// Helper: programmatic NetCDF fixture builder
// ---------------------------------------------------------------------------

/// Configuration for building a minimal NetCDF test fixture.
struct FixtureBuilder {
    nt: usize,
    ny: usize,
    nx: usize,
    lats: Vec<f64>,
    lons: Vec<f64>,
    /// Flat capacity-factor data in `[time, lat, lon]` order.
    data: Vec<f64>,
    data_var: String,
    time_units: String,
    fill_value: Option<f64>,
}

impl FixtureBuilder {
    fn new(nt: usize, ny: usize, nx: usize) -> Self {
        let lats: Vec<f64> = (0..ny).map(|i| -31.0 + i as f64).collect();
        let lons: Vec<f64> = (0..nx).map(|i| 27.0 + i as f64).collect();
        let data: Vec<f64> = (0..nt * ny * nx).map(|i| (i % 10) as f64 * 0.1).collect();
        Self {
            nt,
            ny,
            nx,
            lats,
            lons,
            data,
            data_var: "capacity_factors".into(),
            time_units: "hours since 2023-01-01".into(),
            fill_value: None,
        }
    }

    fn with_data(mut self, data: Vec<f64>) -> Self {
        assert_eq!(data.len(), self.nt * self.ny * self.nx);
        self.data = data;
        self
    }

    fn with_data_var(mut self, name: &str) -> Self {
        self.data_var = name.into();
        self
    }

    fn with_time_units(mut self, units: &str) -> Self {
        self.time_units = units.into();
        self
    }

    fn with_fill_value(mut self, fv: f64) -> Self {
        self.fill_value = Some(fv);
        self
    }

    /// Write the fixture to a NetCDF file and return the path.
    fn write(&self, dir: &Path) -> std::path::PathBuf {
        let path = dir.join("cf.nc");
        let mut file = netcdf::create(&path).expect("failed to create NetCDF file");

        file.add_dimension("time", self.nt).expect("add dim time");
        file.add_dimension("latitude", self.ny).expect("add dim latitude");
        file.add_dimension("longitude", self.nx).expect("add dim longitude");

        {
            let mut var = file
                .add_variable::<f64>("latitude", &["latitude"])
                .expect("add var latitude");
            var.put_values(&self.lats, ..).expect("put latitude values");
        }
        {
            let mut var = file
                .add_variable::<f64>("longitude", &["longitude"])
                .expect("add var longitude");
            var.put_values(&self.lons, ..).expect("put longitude values");
        }
        {
            let time_vals: Vec<f64> = (0..self.nt).map(|t| t as f64).collect();
            let mut var = file
                .add_variable::<f64>("time", &["time"])
                .expect("add var time");
            var.put_values(&time_vals, ..).expect("put time values");
            var.put_attribute("units", self.time_units.as_str())
                .expect("add time units");
        }
        {
            let mut var = file
                .add_variable::<f64>(&self.data_var, &["time", "latitude", "longitude"])
                .expect("add data var");
            if let Some(fv) = self.fill_value {
                var.put_attribute("_FillValue", fv).expect("add _FillValue");
            }
            var.put_values(&self.data, ..).expect("put data values");
        }

        path
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn reads_axes_and_values() {
    let dir = tempdir().unwrap();
    let path = FixtureBuilder::new(3, 2, 2)
        .with_data(vec![
            1.0, 2.0, 3.0, 4.0, //
            1.0, 2.0, 3.0, 4.0, //
            1.0, 2.0, 3.0, 4.0,
        ])
        .write(dir.path());

    let grid = read_grid(&path, &GridReaderConfig::default()).unwrap();
    assert_eq!(grid.n_times(), 3);
    assert_eq!(grid.lats(), &[-31.0, -30.0]);
    assert_eq!(grid.lons(), &[27.0, 28.0]);
    assert_relative_eq!(grid.values()[[0, 1, 0]], 3.0);
    assert_relative_eq!(grid.mean()[[1, 1]], 4.0);
}

#[test]
fn decodes_hourly_time_axis() {
    let dir = tempdir().unwrap();
    let path = FixtureBuilder::new(3, 1, 1)
        .with_data(vec![0.1, 0.2, 0.3])
        .write(dir.path());

    let grid = read_grid(&path, &GridReaderConfig::default()).unwrap();
    let expected_first = NaiveDate::from_ymd_opt(2023, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(grid.times()[0], expected_first);
    assert_eq!(grid.times()[2] - grid.times()[1], chrono::TimeDelta::hours(1));
}

#[test]
fn fill_values_become_nan() {
    let dir = tempdir().unwrap();
    let path = FixtureBuilder::new(2, 1, 2)
        .with_data(vec![0.5, -9999.0, 0.7, -9999.0])
        .with_fill_value(-9999.0)
        .write(dir.path());

    let grid = read_grid(&path, &GridReaderConfig::default()).unwrap();
    assert!(grid.values()[[0, 0, 1]].is_nan());
    assert!(grid.mean()[[0, 1]].is_nan());
    assert_relative_eq!(grid.mean()[[0, 0]], 0.6);
}

#[test]
fn custom_data_var_name() {
    let dir = tempdir().unwrap();
    let path = FixtureBuilder::new(2, 1, 1)
        .with_data(vec![0.4, 0.6])
        .with_data_var("cf")
        .write(dir.path());

    let config = GridReaderConfig::default().with_data_var("cf");
    let grid = read_grid(&path, &config).unwrap();
    assert_relative_eq!(grid.mean()[[0, 0]], 0.5);
}

#[test]
fn missing_data_var_reported() {
    let dir = tempdir().unwrap();
    let path = FixtureBuilder::new(2, 1, 1)
        .with_data(vec![0.4, 0.6])
        .with_data_var("something_else")
        .write(dir.path());

    let err = read_grid(&path, &GridReaderConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        IoError::MissingVariable { ref name, .. } if name == "capacity_factors"
    ));
}

#[test]
fn unsupported_time_units_rejected() {
    let dir = tempdir().unwrap();
    let path = FixtureBuilder::new(2, 1, 1)
        .with_data(vec![0.4, 0.6])
        .with_time_units("fortnights since 2023-01-01")
        .write(dir.path());

    let err = read_grid(&path, &GridReaderConfig::default()).unwrap_err();
    assert!(matches!(err, IoError::InvalidTime { .. }));
}

#[test]
fn seconds_since_datetime_units() {
    let dir = tempdir().unwrap();
    let path = FixtureBuilder::new(2, 1, 1)
        .with_data(vec![0.4, 0.6])
        .with_time_units("seconds since 2023-06-15 06:30:00")
        .write(dir.path());

    let grid = read_grid(&path, &GridReaderConfig::default()).unwrap();
    let expected = NaiveDate::from_ymd_opt(2023, 6, 15)
        .unwrap()
        .and_hms_opt(6, 30, 1)
        .unwrap();
    assert_eq!(grid.times()[1], expected);
}
