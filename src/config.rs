use std::path::PathBuf;

use serde::Deserialize;

/// Top-level Aeolus configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AeolusConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Tier definitions.
    #[serde(default)]
    pub tiers: TiersToml,

    /// Output scaling settings.
    #[serde(default)]
    pub scaling: ScalingToml,

    /// Top-percent selection settings.
    #[serde(default)]
    pub top_percent: TopPercentToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    /// Path to the capacity-factor NetCDF file.
    pub grid: Option<PathBuf>,
    /// Path to the GeoJSON geometry file.
    pub geometries: Option<PathBuf>,
    /// Directory for CSV output.
    pub output_dir: Option<PathBuf>,
    #[serde(default = "default_data_var")]
    pub data_var: String,
    #[serde(default = "default_time_var")]
    pub time_var: String,
    #[serde(default = "default_lat_aliases")]
    pub lat_aliases: Vec<String>,
    #[serde(default = "default_lon_aliases")]
    pub lon_aliases: Vec<String>,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            grid: None,
            geometries: None,
            output_dir: None,
            data_var: default_data_var(),
            time_var: default_time_var(),
            lat_aliases: default_lat_aliases(),
            lon_aliases: default_lon_aliases(),
        }
    }
}

fn default_data_var() -> String {
    "capacity_factors".to_string()
}
fn default_time_var() -> String {
    "time".to_string()
}
fn default_lat_aliases() -> Vec<String> {
    vec!["latitude".into(), "lat".into(), "y".into()]
}
fn default_lon_aliases() -> Vec<String> {
    vec!["longitude".into(), "lon".into(), "x".into()]
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TiersToml {
    /// Top-percent range per tier, in tier order. `[10, 20]` reads "the
    /// cells between the top 10 % and the top 20 % of the mean
    /// distribution"; the pair may arrive in either order.
    #[serde(default = "default_percent_ranges")]
    pub percent_ranges: Vec<[f64; 2]>,
    /// How cells outside the polygon enter the percentile sample:
    /// `"zero_fill"` or `"exclude"`.
    #[serde(default = "default_mask_policy")]
    pub mask_policy: String,
}

impl Default for TiersToml {
    fn default() -> Self {
        Self {
            percent_ranges: default_percent_ranges(),
            mask_policy: default_mask_policy(),
        }
    }
}

fn default_percent_ranges() -> Vec<[f64; 2]> {
    vec![[0.0, 10.0], [10.0, 20.0], [20.0, 30.0]]
}
fn default_mask_policy() -> String {
    "zero_fill".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScalingToml {
    /// Divisor applied to every output value when `scale_output` is set.
    #[serde(default = "default_maximum_capacity")]
    pub maximum_capacity: f64,
    /// Whether to divide output series by `maximum_capacity`.
    #[serde(default)]
    pub scale_output: bool,
}

impl Default for ScalingToml {
    fn default() -> Self {
        Self {
            maximum_capacity: default_maximum_capacity(),
            scale_output: false,
        }
    }
}

fn default_maximum_capacity() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TopPercentToml {
    /// Percentage of cells to select, by mean capacity factor.
    #[serde(default = "default_top_percent")]
    pub percent: f64,
}

impl Default for TopPercentToml {
    fn default() -> Self {
        Self {
            percent: default_top_percent(),
        }
    }
}

fn default_top_percent() -> f64 {
    10.0
}
