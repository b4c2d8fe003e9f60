//! Assembly of averaged tier series into one time-indexed table.

use aeolus_stats::nan_mean;

use crate::average::TierSeries;
use crate::error::TierError;

/// Column-oriented table of tier series sharing one time axis.
///
/// Only non-empty tiers make it in; a table never carries a NaN-filled
/// placeholder column for an empty tier.
#[derive(Debug, Clone, PartialEq)]
pub struct TierTable {
    n_rows: usize,
    columns: Vec<TierSeries>,
}

impl TierTable {
    /// Assemble a table from tier columns of equal length.
    ///
    /// Returns `None` when `columns` is empty, so callers report "no
    /// populated tiers" instead of writing a headerless file.
    pub fn assemble(columns: Vec<TierSeries>) -> Option<Self> {
        let n_rows = columns.first()?.values.len();
        debug_assert!(columns.iter().all(|c| c.values.len() == n_rows));
        Some(Self { n_rows, columns })
    }

    /// Number of timesteps.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns, including any appended average column.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// The columns in tier order.
    pub fn columns(&self) -> &[TierSeries] {
        &self.columns
    }

    /// Append an `average_of_all_tiers` column when more than one tier is
    /// present.
    ///
    /// The average is row-wise over the existing columns, skipping NaN
    /// entries; its cell count is the sum of the tier cell counts.
    pub fn push_average_column(&mut self) {
        if self.columns.len() < 2 {
            return;
        }
        let cell_count = self.columns.iter().map(|c| c.cell_count).sum();
        let values = (0..self.n_rows)
            .map(|row| {
                let across: Vec<f64> = self.columns.iter().map(|c| c.values[row]).collect();
                nan_mean(&across)
            })
            .collect();
        self.columns.push(TierSeries {
            label: "average_of_all_tiers".into(),
            values,
            cell_count,
        });
    }

    /// Divide every value by the installation's maximum capacity.
    ///
    /// # Errors
    ///
    /// Returns [`TierError::InvalidScale`] when `maximum_capacity` is not
    /// positive and finite.
    pub fn scale(&mut self, maximum_capacity: f64) -> Result<(), TierError> {
        if !maximum_capacity.is_finite() || maximum_capacity <= 0.0 {
            return Err(TierError::InvalidScale { maximum_capacity });
        }
        for column in &mut self.columns {
            for v in &mut column.values {
                *v /= maximum_capacity;
            }
        }
        Ok(())
    }
}
