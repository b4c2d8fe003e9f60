//! # aeolus-io
//!
//! Read capacity-factor grids from NetCDF, parse user geometries from
//! GeoJSON, and write tier tables to CSV. Bridges external file formats
//! into the in-memory grid and geometry types the tier pipeline consumes.

mod csv_write;
mod error;
mod geojson;
mod netcdf_read;
mod reader;

pub use csv_write::{write_cell_locations, write_geometry_records, write_tier_table};
pub use error::IoError;
pub use geojson::{GeometryFeature, parse_feature_collection, read_geometries};
pub use reader::{GridReaderConfig, read_grid};
