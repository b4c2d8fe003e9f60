//! CSV output of tier tables and geometry metadata.

use std::path::Path;

use chrono::NaiveDateTime;
use tracing::info;

use aeolus_tiers::{GeometryRecord, SelectedCell, TierTable};

use crate::error::IoError;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Write a tier table as CSV with a leading `time` column.
///
/// NaN entries become empty fields so a consumer cannot mistake them for
/// data.
///
/// # Errors
///
/// Returns [`IoError::DimensionMismatch`] when the time axis length does
/// not match the table, and [`IoError::Csv`] for writer failures.
pub fn write_tier_table(
    path: &Path,
    times: &[NaiveDateTime],
    table: &TierTable,
) -> Result<(), IoError> {
    if times.len() != table.n_rows() {
        return Err(IoError::DimensionMismatch {
            name: "time".into(),
            expected: table.n_rows(),
            got: times.len(),
        });
    }

    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec!["time".to_string()];
    header.extend(table.columns().iter().map(|c| c.label.clone()));
    writer.write_record(&header)?;

    for (row, time) in times.iter().enumerate() {
        let mut record = vec![time.format(TIME_FORMAT).to_string()];
        for column in table.columns() {
            record.push(format_value(column.values[row]));
        }
        writer.write_record(&record)?;
    }
    writer.flush().map_err(|e| IoError::Csv {
        reason: e.to_string(),
    })?;

    info!(
        path = %path.display(),
        rows = table.n_rows(),
        columns = table.n_columns(),
        "tier table written"
    );
    Ok(())
}

/// Write the geometry reference table: one row per input geometry with its
/// label, kind, coordinates, and containment verdict.
pub fn write_geometry_records(path: &Path, records: &[GeometryRecord]) -> Result<(), IoError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["label", "kind", "coordinates", "result"])?;
    for record in records {
        writer.write_record([
            record.label.as_str(),
            record.kind.as_str(),
            record.coordinates.as_str(),
            &record.verdict.to_string(),
        ])?;
    }
    writer.flush().map_err(|e| IoError::Csv {
        reason: e.to_string(),
    })?;

    info!(path = %path.display(), rows = records.len(), "geometry table written");
    Ok(())
}

/// Write the locations of cells picked by a top-percent selection.
pub fn write_cell_locations(path: &Path, cells: &[SelectedCell]) -> Result<(), IoError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["tier", "latitude", "longitude", "mean_capacity_factor"])?;
    for cell in cells {
        writer.write_record([
            cell.label.as_str(),
            &cell.lat.to_string(),
            &cell.lon.to_string(),
            &format_value(cell.mean),
        ])?;
    }
    writer.flush().map_err(|e| IoError::Csv {
        reason: e.to_string(),
    })?;

    info!(path = %path.display(), rows = cells.len(), "cell locations written");
    Ok(())
}

fn format_value(v: f64) -> String {
    if v.is_nan() {
        String::new()
    } else {
        v.to_string()
    }
}
