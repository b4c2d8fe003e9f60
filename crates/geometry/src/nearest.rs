//! Nearest-grid-cell resolution for point geometries.

/// Index of the coordinate closest to `target`, by absolute difference.
///
/// Ties resolve to the lowest index (first occurrence of the minimum).
/// Returns `None` for an empty coordinate array. The closest index is
/// returned even when `target` lies outside the coordinate range; callers
/// gate out-of-extent points with the bounding-box check beforehand.
pub fn nearest_index(coords: &[f64], target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &c) in coords.iter().enumerate() {
        let dist = (c - target).abs();
        match best {
            Some((_, d)) if dist >= d => {}
            _ => best = Some((i, dist)),
        }
    }
    best.map(|(i, _)| i)
}

/// Resolve a point to its nearest grid cell as `(lat_index, lon_index)`.
///
/// Each axis is searched independently; see [`nearest_index`] for the
/// tie-break rule. Returns `None` when either coordinate axis is empty.
pub fn nearest_cell(lats: &[f64], lons: &[f64], lon: f64, lat: f64) -> Option<(usize, usize)> {
    let lat_idx = nearest_index(lats, lat)?;
    let lon_idx = nearest_index(lons, lon)?;
    Some((lat_idx, lon_idx))
}
