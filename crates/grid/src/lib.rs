//! # aeolus-grid
//!
//! The immutable gridded capacity-factor dataset: a 3-D
//! (time x latitude x longitude) array of modeled capacity factors plus a
//! derived NaN-aware temporal-mean layer, with extent queries and
//! bounding-rectangle subsetting.
//!
//! The grid is read-only after construction; tier generation works on
//! views and private copies, never on the shared data.

mod error;
mod grid;

pub use error::GridError;
pub use grid::CapacityFactorGrid;
