//! # aeolus-geometry
//!
//! Geometry handling for capacity-factor tier generation: the geometry
//! model (points, polygons, line strings), axis-aligned bounding boxes,
//! containment validation against a grid extent, nearest-grid-index
//! resolution, and rasterisation of a polygon onto a regular
//! latitude/longitude grid as a boolean cell mask.
//!
//! All functions are pure; nothing in this crate touches files or mutates
//! shared state.

mod bbox;
mod geometry;
mod mask;
mod nearest;
mod validate;

pub use bbox::BoundingBox;
pub use geometry::{Geometry, GeometryKind};
pub use mask::{point_in_ring, polygon_mask};
pub use nearest::{nearest_cell, nearest_index};
pub use validate::{BoundsCheck, check_within};
