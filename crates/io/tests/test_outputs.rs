//! Integration tests for GeoJSON input and CSV output.

use std::fs;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use tempfile::tempdir;

use aeolus_geometry::Geometry;
use aeolus_io::{
    IoError, read_geometries, write_cell_locations, write_geometry_records, write_tier_table,
};
use aeolus_tiers::{GeometryRecord, GeometryVerdict, SelectedCell, TierSeries, TierTable};

fn timestamps(n: usize) -> Vec<NaiveDateTime> {
    let base = NaiveDate::from_ymd_opt(2023, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    (0..n).map(|i| base + TimeDelta::hours(i as i64)).collect()
}

#[test]
fn geojson_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sites.geojson");
    fs::write(
        &path,
        r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"name": "wind_farm"},
                    "geometry": {"type": "Point", "coordinates": [27.1, -30.9]}
                }
            ]
        }"#,
    )
    .unwrap();

    let features = read_geometries(&path).unwrap();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0].label, "wind_farm");
    assert_eq!(
        features[0].geometry,
        Some(Geometry::Point {
            lon: 27.1,
            lat: -30.9
        })
    );
}

#[test]
fn missing_geojson_file_reported() {
    let err = read_geometries(std::path::Path::new("/nonexistent/sites.geojson")).unwrap_err();
    assert!(matches!(err, IoError::FileNotFound { .. }));
}

#[test]
fn tier_table_csv_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tiers.csv");

    let table = TierTable::assemble(vec![
        TierSeries {
            label: "tier_1".into(),
            values: vec![0.5, 0.25],
            cell_count: 2,
        },
        TierSeries {
            label: "tier_2".into(),
            values: vec![0.75, f64::NAN],
            cell_count: 1,
        },
    ])
    .unwrap();

    write_tier_table(&path, &timestamps(2), &table).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "time,tier_1,tier_2");
    assert_eq!(lines[1], "2023-01-01 00:00:00,0.5,0.75");
    // NaN entries are written as empty fields.
    assert_eq!(lines[2], "2023-01-01 01:00:00,0.25,");
}

#[test]
fn tier_table_time_length_mismatch() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tiers.csv");
    let table = TierTable::assemble(vec![TierSeries {
        label: "tier_1".into(),
        values: vec![0.5, 0.25],
        cell_count: 1,
    }])
    .unwrap();

    let err = write_tier_table(&path, &timestamps(3), &table).unwrap_err();
    assert!(matches!(err, IoError::DimensionMismatch { .. }));
}

#[test]
fn geometry_record_csv_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("geometries.csv");

    let records = vec![
        GeometryRecord {
            label: "site_a".into(),
            kind: "Point".into(),
            coordinates: "POINT (27.1 -30.9)".into(),
            verdict: GeometryVerdict::Inside,
        },
        GeometryRecord {
            label: "transect".into(),
            kind: "LineString".into(),
            coordinates: "LINESTRING (27 -31, 28 -30)".into(),
            verdict: GeometryVerdict::Outside,
        },
    ];

    write_geometry_records(&path, &records).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "label,kind,coordinates,result");
    assert_eq!(lines[1], "site_a,Point,POINT (27.1 -30.9),\"Inside, Valid\"");
    assert_eq!(
        lines[2],
        "transect,LineString,\"LINESTRING (27 -31, 28 -30)\",\"Outside, Invalid\""
    );
}

#[test]
fn cell_locations_csv_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("locations.csv");

    let cells = vec![SelectedCell {
        label: "tier_1".into(),
        lat: -30.0,
        lon: 28.0,
        mean: 0.42,
    }];

    write_cell_locations(&path, &cells).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "tier,latitude,longitude,mean_capacity_factor");
    assert_eq!(lines[1], "tier_1,-30,28,0.42");
}
