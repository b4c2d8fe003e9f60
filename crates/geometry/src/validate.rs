//! Containment validation of geometries against the grid extent.

use crate::bbox::BoundingBox;
use crate::geometry::Geometry;

/// Verdict of the bounding-box containment check.
///
/// Only `Inside` geometries proceed to tier generation. Partial overlap is
/// deliberately `Outside`: a tier derived from a clipped geometry would not
/// represent what the user drew.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsCheck {
    /// The geometry lies entirely within the grid extent.
    Inside,
    /// The geometry is empty, disjoint from the extent, or only partially
    /// contained.
    Outside,
}

impl BoundsCheck {
    /// Returns `true` for [`BoundsCheck::Inside`].
    pub fn is_inside(self) -> bool {
        matches!(self, Self::Inside)
    }
}

/// Check whether `geometry` lies fully within `extent`.
///
/// Pure predicate: empty geometries and geometries that merely intersect
/// the extent rectangle are both `Outside`.
pub fn check_within(geometry: &Geometry, extent: &BoundingBox) -> BoundsCheck {
    let Some(bbox) = geometry.bbox() else {
        return BoundsCheck::Outside;
    };

    if extent.intersects(&bbox) && extent.contains_box(&bbox) {
        BoundsCheck::Inside
    } else {
        BoundsCheck::Outside
    }
}
