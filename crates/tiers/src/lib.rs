//! # aeolus-tiers
//!
//! Turns a capacity-factor grid and a user geometry into "tiers":
//! representative averaged time series.
//!
//! # Pipeline
//!
//! 1. **Validate** the geometry against the grid extent (partial overlap is
//!    rejected outright)
//! 2. **Resolve** a point to its nearest cell, or **mask** the grid cells
//!    whose centers fall inside a polygon
//! 3. **Bound** each tier's percent range as a numeric `(lower, upper)`
//!    pair via linear-interpolation quantiles of the temporal-mean layer
//! 4. **Average** the full time series of every cell matching each band
//!    into one series per tier, tracking cell counts
//! 5. **Assemble** the non-empty tiers into a time-indexed table, with
//!    optional scaling by a maximum-capacity constant
//!
//! Empty tiers, line strings, and out-of-bounds geometries are surfaced as
//! explicit statuses; they never abort the batch and never appear as
//! NaN-filled columns.

mod average;
mod bounds;
mod error;
mod pipeline;
mod spec;
mod table;
mod top_percent;

pub use average::{TierSeries, average_band, point_series};
pub use bounds::{MaskPolicy, TierBound, compute_bound};
pub use error::TierError;
pub use pipeline::{GeometryOutcome, GeometryRecord, GeometryVerdict, process_geometry};
pub use spec::TierSpec;
pub use table::TierTable;
pub use top_percent::{SelectedCell, TopPercentSelection, top_percent_table};
