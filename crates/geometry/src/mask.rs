//! Rasterisation of a polygon onto a regular lat/lon grid.

use ndarray::Array2;

/// Even-odd ray-casting containment test against a polygon ring.
///
/// A horizontal ray is cast from the query point towards +lon; the point is
/// inside when the ray crosses an odd number of edges. Points exactly on a
/// ring edge count as inside, so a polygon drawn through cell centers still
/// selects those cells. The ring is treated as implicitly closed (last
/// vertex connects back to the first), so both open and explicitly-closed
/// rings work.
pub fn point_in_ring(lon: f64, lat: f64, ring: &[(f64, f64)]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = ring[i];
        let (xj, yj) = ring[j];
        if on_segment(lon, lat, (xi, yi), (xj, yj)) {
            return true;
        }
        if ((yi > lat) != (yj > lat)) && (lon < (xj - xi) * (lat - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Collinearity plus bounding-range test for a point against one edge.
fn on_segment(lon: f64, lat: f64, (xi, yi): (f64, f64), (xj, yj): (f64, f64)) -> bool {
    let cross = (xj - xi) * (lat - yi) - (yj - yi) * (lon - xi);
    cross == 0.0
        && lon >= xi.min(xj)
        && lon <= xi.max(xj)
        && lat >= yi.min(yj)
        && lat <= yi.max(yj)
}

/// Boolean mask of grid cells whose center lies inside the polygon.
///
/// The result has shape `[lats.len(), lons.len()]`; entry `[r, c]` is true
/// iff the cell center `(lons[c], lats[r])` falls inside `exterior`. The
/// coordinate arrays are expected to be pre-restricted to the polygon's
/// bounding rectangle, so the per-cell test only runs over candidates.
pub fn polygon_mask(exterior: &[(f64, f64)], lats: &[f64], lons: &[f64]) -> Array2<bool> {
    Array2::from_shape_fn((lats.len(), lons.len()), |(r, c)| {
        point_in_ring(lons[c], lats[r], exterior)
    })
}
