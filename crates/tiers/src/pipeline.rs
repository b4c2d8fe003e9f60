//! Per-geometry orchestration: validate, mask, bound, average, assemble.

use ndarray::s;
use tracing::debug;

use aeolus_geometry::{Geometry, GeometryKind, check_within, nearest_cell, polygon_mask};
use aeolus_grid::CapacityFactorGrid;

use crate::average::{average_band, point_series};
use crate::bounds::{MaskPolicy, compute_bound};
use crate::error::TierError;
use crate::spec::TierSpec;
use crate::table::TierTable;

/// Containment verdict of one geometry, as reported in the geometry
/// reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryVerdict {
    /// Fully inside the grid extent; tiers were generated.
    Inside,
    /// Outside (or only partially inside) the grid extent, or an
    /// unsupported geometry kind; no tiers.
    Outside,
}

impl std::fmt::Display for GeometryVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryVerdict::Inside => write!(f, "Inside, Valid"),
            GeometryVerdict::Outside => write!(f, "Outside, Invalid"),
        }
    }
}

/// One row of the geometry reference table.
///
/// `kind` is a plain string so callers can also record geometry kinds the
/// pipeline itself never sees (e.g. an unsupported GeoJSON type).
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryRecord {
    /// Caller-supplied geometry label.
    pub label: String,
    /// Geometry kind tag.
    pub kind: String,
    /// WKT rendering of the geometry coordinates.
    pub coordinates: String,
    /// Containment verdict.
    pub verdict: GeometryVerdict,
}

/// Everything produced for one geometry.
///
/// `table` is `None` when the geometry was rejected or no tier matched any
/// cell; `empty_tiers` lists the labels of tiers that matched nothing so
/// callers can report them without inventing placeholder columns.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryOutcome {
    pub record: GeometryRecord,
    pub table: Option<TierTable>,
    pub empty_tiers: Vec<String>,
}

/// Run the full tier pipeline for one geometry.
///
/// Rejected geometries (outside the extent, line strings, empty polygons)
/// come back as an `Outside` record with no table. Empty tiers are listed
/// in the outcome and omitted from the table.
///
/// # Errors
///
/// Returns [`TierError::AllMissing`] when a point resolves to a cell whose
/// series is entirely NaN. The error is scoped to this geometry; batch
/// callers log it and continue.
pub fn process_geometry(
    grid: &CapacityFactorGrid,
    geometry: &Geometry,
    label: &str,
    specs: &[TierSpec],
    policy: MaskPolicy,
) -> Result<GeometryOutcome, TierError> {
    let record = |verdict| GeometryRecord {
        label: label.to_string(),
        kind: geometry.kind().to_string(),
        coordinates: geometry.to_string(),
        verdict,
    };
    let rejected = |record| GeometryOutcome {
        record,
        table: None,
        empty_tiers: Vec::new(),
    };

    // Line strings never yield a tier, wherever they sit.
    if geometry.kind() == GeometryKind::LineString {
        debug!(label, "skipping line string geometry");
        return Ok(rejected(record(GeometryVerdict::Outside)));
    }
    if !check_within(geometry, &grid.extent()).is_inside() {
        debug!(label, "geometry outside grid extent");
        return Ok(rejected(record(GeometryVerdict::Outside)));
    }

    match geometry {
        Geometry::Point { lon, lat } => {
            let Some((lat_idx, lon_idx)) = nearest_cell(grid.lats(), grid.lons(), *lon, *lat)
            else {
                // Grid axes are non-empty by construction.
                return Ok(rejected(record(GeometryVerdict::Outside)));
            };
            debug!(label, lat_idx, lon_idx, "point resolved to nearest cell");
            let series = point_series(grid, lat_idx, lon_idx)?;
            Ok(GeometryOutcome {
                record: record(GeometryVerdict::Inside),
                table: TierTable::assemble(vec![series]),
                empty_tiers: Vec::new(),
            })
        }
        Geometry::Polygon { exterior } => {
            Ok(polygon_outcome(grid, exterior, specs, policy, record(GeometryVerdict::Inside)))
        }
        Geometry::LineString { .. } => Ok(rejected(record(GeometryVerdict::Outside))),
    }
}

fn polygon_outcome(
    grid: &CapacityFactorGrid,
    exterior: &[(f64, f64)],
    specs: &[TierSpec],
    policy: MaskPolicy,
    record: GeometryRecord,
) -> GeometryOutcome {
    // check_within guarantees a non-degenerate ring, so the bbox exists.
    let Some(bbox) = aeolus_geometry::BoundingBox::from_points(exterior) else {
        return GeometryOutcome {
            record,
            table: None,
            empty_tiers: specs.iter().map(TierSpec::label).collect(),
        };
    };
    let (lat_range, lon_range) = grid.subset_ranges(&bbox);
    let lats = &grid.lats()[lat_range.clone()];
    let lons = &grid.lons()[lon_range.clone()];
    let mask = polygon_mask(exterior, lats, lons);
    let mean = grid.mean();
    let mean_subset = mean.slice(s![lat_range.clone(), lon_range.clone()]);

    let mut columns = Vec::new();
    let mut empty_tiers = Vec::new();
    for spec in specs {
        let band = compute_bound(mean_subset, mask.view(), spec, policy).and_then(|bound| {
            debug!(
                tier = spec.index(),
                lower = bound.lower,
                upper = bound.upper,
                "tier band computed"
            );
            average_band(grid, &lat_range, &lon_range, mask.view(), policy, spec, &bound)
        });
        match band {
            Some(series) => columns.push(series),
            None => empty_tiers.push(spec.label()),
        }
    }

    let table = TierTable::assemble(columns).map(|mut t| {
        t.push_average_column();
        t
    });
    GeometryOutcome {
        record,
        table,
        empty_tiers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
    use ndarray::Array3;

    fn timestamps(n: usize) -> Vec<NaiveDateTime> {
        let base = NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        (0..n).map(|i| base + TimeDelta::hours(i as i64)).collect()
    }

    /// 2x2 grid, static per-cell values [[1, 2], [3, 4]], 3 timesteps.
    fn static_grid() -> CapacityFactorGrid {
        let values = Array3::from_shape_fn((3, 2, 2), |(_, r, c)| (r * 2 + c) as f64 + 1.0);
        CapacityFactorGrid::new(timestamps(3), vec![-31.0, -30.0], vec![27.0, 28.0], values)
            .unwrap()
    }

    fn specs(ranges: &[(f64, f64)]) -> Vec<TierSpec> {
        ranges
            .iter()
            .enumerate()
            .map(|(i, &(a, b))| TierSpec::new(i + 1, a, b).unwrap())
            .collect()
    }

    #[test]
    fn point_yields_single_cell_series() {
        let grid = static_grid();
        let geometry = Geometry::Point {
            lon: 27.1,
            lat: -30.9,
        };
        let outcome = process_geometry(
            &grid,
            &geometry,
            "site_a",
            &specs(&[(0.0, 100.0)]),
            MaskPolicy::ZeroFillOutsidePolygon,
        )
        .unwrap();

        assert_eq!(outcome.record.verdict, GeometryVerdict::Inside);
        let table = outcome.table.unwrap();
        assert_eq!(table.n_columns(), 1);
        assert_eq!(table.columns()[0].label, "tier_1");
        assert_eq!(table.columns()[0].values, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn point_outside_extent_is_rejected() {
        let grid = static_grid();
        let geometry = Geometry::Point {
            lon: 40.0,
            lat: -30.5,
        };
        let outcome = process_geometry(
            &grid,
            &geometry,
            "far_site",
            &specs(&[(0.0, 100.0)]),
            MaskPolicy::ZeroFillOutsidePolygon,
        )
        .unwrap();

        assert_eq!(outcome.record.verdict, GeometryVerdict::Outside);
        assert!(outcome.table.is_none());
    }

    #[test]
    fn point_on_all_missing_cell_errors() {
        let values = Array3::from_elem((3, 1, 1), f64::NAN);
        let grid =
            CapacityFactorGrid::new(timestamps(3), vec![-30.0], vec![27.0], values).unwrap();
        let geometry = Geometry::Point {
            lon: 27.0,
            lat: -30.0,
        };
        let err = process_geometry(
            &grid,
            &geometry,
            "gap",
            &specs(&[(0.0, 100.0)]),
            MaskPolicy::ZeroFillOutsidePolygon,
        )
        .unwrap_err();
        assert!(matches!(err, TierError::AllMissing { .. }));
    }

    #[test]
    fn partial_polygon_is_rejected() {
        let grid = static_grid();
        let geometry = Geometry::Polygon {
            exterior: vec![
                (27.5, -30.5),
                (29.0, -30.5),
                (29.0, -29.0),
                (27.5, -29.0),
                (27.5, -30.5),
            ],
        };
        let outcome = process_geometry(
            &grid,
            &geometry,
            "straddler",
            &specs(&[(0.0, 100.0)]),
            MaskPolicy::ZeroFillOutsidePolygon,
        )
        .unwrap();
        assert_eq!(outcome.record.verdict, GeometryVerdict::Outside);
        assert!(outcome.table.is_none());
    }

    #[test]
    fn full_extent_polygon_produces_tiers() {
        let grid = static_grid();
        let geometry = Geometry::Polygon {
            exterior: vec![
                (27.0, -31.0),
                (28.0, -31.0),
                (28.0, -30.0),
                (27.0, -30.0),
                (27.0, -31.0),
            ],
        };
        // Bounds over [1, 2, 3, 4]: tier 1 band is (2.5, 4.0), so only the
        // mean-3 cell is strictly inside.
        let outcome = process_geometry(
            &grid,
            &geometry,
            "whole_grid",
            &specs(&[(0.0, 50.0)]),
            MaskPolicy::ZeroFillOutsidePolygon,
        )
        .unwrap();

        assert_eq!(outcome.record.verdict, GeometryVerdict::Inside);
        let table = outcome.table.unwrap();
        assert_eq!(table.n_columns(), 1);
        assert_eq!(table.columns()[0].cell_count, 1);
        assert_relative_eq!(table.columns()[0].values[0], 3.0);
    }

    #[test]
    fn degenerate_range_yields_empty_tier() {
        let grid = static_grid();
        let geometry = Geometry::Polygon {
            exterior: vec![
                (27.0, -31.0),
                (28.0, -31.0),
                (28.0, -30.0),
                (27.0, -30.0),
                (27.0, -31.0),
            ],
        };
        let outcome = process_geometry(
            &grid,
            &geometry,
            "degenerate",
            &specs(&[(50.0, 50.0)]),
            MaskPolicy::ZeroFillOutsidePolygon,
        )
        .unwrap();

        assert_eq!(outcome.record.verdict, GeometryVerdict::Inside);
        assert!(outcome.table.is_none());
        assert_eq!(outcome.empty_tiers, vec!["tier_1".to_string()]);
    }

    #[test]
    fn line_string_always_outside() {
        let grid = static_grid();
        // Entirely within the extent, still rejected.
        let geometry = Geometry::LineString {
            coords: vec![(27.2, -30.8), (27.8, -30.2)],
        };
        let outcome = process_geometry(
            &grid,
            &geometry,
            "transect",
            &specs(&[(0.0, 100.0)]),
            MaskPolicy::ZeroFillOutsidePolygon,
        )
        .unwrap();
        assert_eq!(outcome.record.verdict, GeometryVerdict::Outside);
        assert_eq!(outcome.record.kind, "LineString");
        assert!(outcome.table.is_none());
    }

    #[test]
    fn average_column_added_for_multiple_tiers() {
        let grid = static_grid();
        let geometry = Geometry::Polygon {
            exterior: vec![
                (27.0, -31.0),
                (28.0, -31.0),
                (28.0, -30.0),
                (27.0, -30.0),
                (27.0, -31.0),
            ],
        };
        // Bounds over [1, 2, 3, 4]: tier 1 selects mean 3, tier 2 means 2.
        let outcome = process_geometry(
            &grid,
            &geometry,
            "two_tiers",
            &specs(&[(0.0, 50.0), (50.0, 100.0)]),
            MaskPolicy::ZeroFillOutsidePolygon,
        )
        .unwrap();

        let table = outcome.table.unwrap();
        assert_eq!(table.n_columns(), 3);
        assert_eq!(table.columns()[2].label, "average_of_all_tiers");
        assert_relative_eq!(table.columns()[2].values[0], 2.5);
    }

    #[test]
    fn normalization_makes_percent_order_irrelevant() {
        let grid = static_grid();
        let geometry = Geometry::Polygon {
            exterior: vec![
                (27.0, -31.0),
                (28.0, -31.0),
                (28.0, -30.0),
                (27.0, -30.0),
                (27.0, -31.0),
            ],
        };
        let forward = process_geometry(
            &grid,
            &geometry,
            "g",
            &specs(&[(10.0, 80.0)]),
            MaskPolicy::ZeroFillOutsidePolygon,
        )
        .unwrap();
        let reversed = process_geometry(
            &grid,
            &geometry,
            "g",
            &specs(&[(80.0, 10.0)]),
            MaskPolicy::ZeroFillOutsidePolygon,
        )
        .unwrap();
        assert_eq!(forward, reversed);
    }
}
