//! Low-level NetCDF extraction helpers.

use std::path::Path;

use chrono::{NaiveDateTime, TimeDelta};

use crate::error::IoError;

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Read a 1-D `f64` variable, trying each alias in order.
///
/// Returns the data from the first alias that matches. If none match,
/// returns [`IoError::MissingVariable`] with the first alias as the name.
pub(crate) fn read_1d_f64(
    file: &netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<Vec<f64>, IoError> {
    for &alias in aliases {
        if let Some(var) = file.variable(alias) {
            return Ok(var.get_values::<f64, _>(..)?);
        }
    }

    let name = aliases.first().copied().unwrap_or("unknown");
    Err(IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Read a 3-D `f64` variable and return the flattened data together with
/// the shape `[nt, ny, nx]` derived from the variable's dimensions.
///
/// Entries equal to the variable's `_FillValue` attribute (when present)
/// are replaced by NaN so every downstream consumer sees one missing-data
/// sentinel.
pub(crate) fn read_3d_f64(
    file: &netcdf::File,
    var_name: &str,
    path: &Path,
) -> Result<(Vec<f64>, [usize; 3]), IoError> {
    let var = file
        .variable(var_name)
        .ok_or_else(|| IoError::MissingVariable {
            name: var_name.to_string(),
            path: path.to_path_buf(),
        })?;

    let dims = var.dimensions();
    if dims.len() != 3 {
        return Err(IoError::DimensionMismatch {
            name: format!("{var_name} dimensions"),
            expected: 3,
            got: dims.len(),
        });
    }

    let nt = dims[0].len();
    let ny = dims[1].len();
    let nx = dims[2].len();

    let mut data = var.get_values::<f64, _>(..)?;
    if let Some(fill) = fill_value(&var) {
        for v in &mut data {
            if *v == fill {
                *v = f64::NAN;
            }
        }
    }
    Ok((data, [nt, ny, nx]))
}

/// The `_FillValue` attribute of a variable, if present and numeric.
fn fill_value(var: &netcdf::Variable<'_>) -> Option<f64> {
    let value = var.attribute_value("_FillValue")?.ok()?;
    match value {
        netcdf::AttributeValue::Double(v) => Some(v),
        netcdf::AttributeValue::Float(v) => Some(f64::from(v)),
        netcdf::AttributeValue::Int(v) => Some(f64::from(v)),
        netcdf::AttributeValue::Short(v) => Some(f64::from(v)),
        _ => None,
    }
}

/// Offset granularity of a CF-style time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    fn seconds(self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Hours => 3_600.0,
            TimeUnit::Days => 86_400.0,
        }
    }
}

/// Parse the `units` attribute of a time variable.
///
/// Accepts CF-convention strings like `"hours since 2023-01-01"` or
/// `"seconds since 2023-01-01 06:30:00"` and returns the unit together
/// with the parsed base timestamp (midnight when no clock time is given).
pub(crate) fn read_time_units(
    file: &netcdf::File,
    time_var: &str,
    path: &Path,
) -> Result<(TimeUnit, NaiveDateTime), IoError> {
    let var = file
        .variable(time_var)
        .ok_or_else(|| IoError::MissingVariable {
            name: time_var.to_string(),
            path: path.to_path_buf(),
        })?;

    let units_str: String = var
        .attribute_value("units")
        .ok_or_else(|| IoError::InvalidTime {
            reason: format!("time variable '{time_var}' has no 'units' attribute"),
        })?
        .map_err(|e| IoError::InvalidTime {
            reason: format!("failed to read 'units' attribute: {e}"),
        })?
        .try_into()
        .map_err(|e: netcdf::Error| IoError::InvalidTime {
            reason: format!("'units' attribute is not a string: {e}"),
        })?;

    parse_time_units(&units_str)
}

/// Parse a `"<unit> since <timestamp>"` string.
pub(crate) fn parse_time_units(units_str: &str) -> Result<(TimeUnit, NaiveDateTime), IoError> {
    let parts: Vec<&str> = units_str.splitn(3, ' ').collect();
    if parts.len() < 3 || parts[1] != "since" {
        return Err(IoError::InvalidTime {
            reason: format!("unexpected time units format: '{units_str}'"),
        });
    }

    let unit = match parts[0] {
        "seconds" | "second" => TimeUnit::Seconds,
        "minutes" | "minute" => TimeUnit::Minutes,
        "hours" | "hour" => TimeUnit::Hours,
        "days" | "day" => TimeUnit::Days,
        other => {
            return Err(IoError::InvalidTime {
                reason: format!("unsupported time unit '{other}'"),
            });
        }
    };

    let stamp = parts[2].trim();
    let base = NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| {
            chrono::NaiveDate::parse_from_str(stamp, "%Y-%m-%d")
                .map(|d| d.and_hms_opt(0, 0, 0).unwrap_or_default())
        })
        .map_err(|e| IoError::InvalidTime {
            reason: format!("failed to parse base timestamp '{stamp}': {e}"),
        })?;

    Ok((unit, base))
}

/// Convert floating-point offsets from a base timestamp into timestamps.
///
/// Each offset is converted to whole seconds (fractions rounded) and added
/// to `base` using chrono arithmetic.
pub(crate) fn offsets_to_timestamps(
    base: NaiveDateTime,
    offsets: &[f64],
    unit: TimeUnit,
) -> Result<Vec<NaiveDateTime>, IoError> {
    offsets
        .iter()
        .map(|&offset| {
            let seconds = (offset * unit.seconds()).round();
            if !seconds.is_finite() {
                return Err(IoError::InvalidTime {
                    reason: format!("non-finite time offset {offset}"),
                });
            }
            base.checked_add_signed(TimeDelta::seconds(seconds as i64))
                .ok_or_else(|| IoError::InvalidTime {
                    reason: format!("timestamp overflow adding {offset} {unit:?} to {base}"),
                })
        })
        .collect()
}
