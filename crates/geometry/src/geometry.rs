//! The geometry model for user-supplied tier locations.

use std::fmt;

use crate::bbox::BoundingBox;

/// A user-supplied geometry describing where a tier should be generated.
///
/// Points resolve to a single grid cell; polygons select a set of cells by
/// percentile banding. Line strings are carried through so they can be
/// reported, but they never yield a tier.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A single location.
    Point { lon: f64, lat: f64 },
    /// A polygon described by its exterior ring. The ring may be open or
    /// explicitly closed (first vertex repeated at the end); both forms are
    /// treated identically.
    Polygon { exterior: Vec<(f64, f64)> },
    /// A polyline. Documented no-op: never yields a tier.
    LineString { coords: Vec<(f64, f64)> },
}

/// Discriminant of a [`Geometry`], used for dispatch and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Point,
    Polygon,
    LineString,
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point => write!(f, "Point"),
            Self::Polygon => write!(f, "Polygon"),
            Self::LineString => write!(f, "LineString"),
        }
    }
}

impl Geometry {
    /// Returns the discriminant of this geometry.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Self::Point { .. } => GeometryKind::Point,
            Self::Polygon { .. } => GeometryKind::Polygon,
            Self::LineString { .. } => GeometryKind::LineString,
        }
    }

    /// Returns `true` when the geometry carries no coordinates.
    ///
    /// A polygon needs at least three vertices to enclose any area; fewer
    /// count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Point { .. } => false,
            Self::Polygon { exterior } => exterior.len() < 3,
            Self::LineString { coords } => coords.is_empty(),
        }
    }

    /// Smallest axis-aligned box enclosing this geometry, or `None` when
    /// the geometry is empty.
    pub fn bbox(&self) -> Option<BoundingBox> {
        if self.is_empty() {
            return None;
        }
        match self {
            Self::Point { lon, lat } => Some(BoundingBox::new(*lon, *lat, *lon, *lat)),
            Self::Polygon { exterior } => BoundingBox::from_points(exterior),
            Self::LineString { coords } => BoundingBox::from_points(coords),
        }
    }
}

/// WKT rendering, used verbatim in the geometry reference table.
impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point { lon, lat } => write!(f, "POINT ({lon} {lat})"),
            Self::Polygon { exterior } => {
                write!(f, "POLYGON ((")?;
                write_coords(f, exterior)?;
                write!(f, "))")
            }
            Self::LineString { coords } => {
                write!(f, "LINESTRING (")?;
                write_coords(f, coords)?;
                write!(f, ")")
            }
        }
    }
}

fn write_coords(f: &mut fmt::Formatter<'_>, coords: &[(f64, f64)]) -> fmt::Result {
    for (i, (lon, lat)) in coords.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{lon} {lat}")?;
    }
    Ok(())
}
