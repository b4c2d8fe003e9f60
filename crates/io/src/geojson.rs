//! GeoJSON geometry parsing.
//!
//! Reads a FeatureCollection into labelled [`Geometry`] values. Geometry
//! kinds outside point/line-string/polygon are carried through with their
//! type tag but no geometry, so the caller can record them as invalid
//! instead of aborting the batch.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use aeolus_geometry::Geometry;

use crate::error::IoError;

/// One parsed GeoJSON feature.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryFeature {
    /// Label from the feature's `name`/`label`/`id` property, or a
    /// positional fallback like `geometry_3`.
    pub label: String,
    /// The GeoJSON geometry type tag as written in the file.
    pub kind_tag: String,
    /// The parsed geometry, or `None` for unsupported kinds.
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct RawFeatureCollection {
    #[serde(rename = "type")]
    type_: String,
    features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(default)]
    properties: Option<serde_json::Map<String, Value>>,
    geometry: Value,
}

/// Read a GeoJSON FeatureCollection file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] for a missing path and
/// [`IoError::Geojson`] for malformed documents.
pub fn read_geometries(path: &Path) -> Result<Vec<GeometryFeature>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|e| IoError::Geojson {
        reason: format!("could not read {}: {e}", path.display()),
    })?;
    parse_feature_collection(&text)
}

/// Parse a GeoJSON FeatureCollection document.
pub fn parse_feature_collection(text: &str) -> Result<Vec<GeometryFeature>, IoError> {
    let collection: RawFeatureCollection =
        serde_json::from_str(text).map_err(|e| IoError::Geojson {
            reason: e.to_string(),
        })?;
    if collection.type_ != "FeatureCollection" {
        return Err(IoError::Geojson {
            reason: format!(
                "expected a FeatureCollection, got '{}'",
                collection.type_
            ),
        });
    }

    collection
        .features
        .into_iter()
        .enumerate()
        .map(|(i, feature)| {
            let label = feature_label(feature.properties.as_ref(), i);
            let (kind_tag, geometry) = convert_geometry(&feature.geometry, &label)?;
            Ok(GeometryFeature {
                label,
                kind_tag,
                geometry,
            })
        })
        .collect()
}

/// Label from the feature properties, falling back to the position.
fn feature_label(properties: Option<&serde_json::Map<String, Value>>, index: usize) -> String {
    for key in ["name", "Name", "label", "id"] {
        if let Some(Value::String(s)) = properties.and_then(|p| p.get(key)) {
            return s.clone();
        }
    }
    format!("geometry_{}", index + 1)
}

fn convert_geometry(value: &Value, label: &str) -> Result<(String, Option<Geometry>), IoError> {
    let kind_tag = value
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("Unknown")
        .to_string();
    let coordinates = || {
        value.get("coordinates").cloned().ok_or(IoError::Geojson {
            reason: format!("{kind_tag} geometry '{label}' has no coordinates"),
        })
    };
    let bad_coords = |e: serde_json::Error| IoError::Geojson {
        reason: format!("malformed {kind_tag} coordinates in '{label}': {e}"),
    };

    let geometry = match kind_tag.as_str() {
        "Point" => {
            let [lon, lat]: [f64; 2] =
                serde_json::from_value(coordinates()?).map_err(bad_coords)?;
            Some(Geometry::Point { lon, lat })
        }
        "LineString" => {
            let coords: Vec<[f64; 2]> =
                serde_json::from_value(coordinates()?).map_err(bad_coords)?;
            Some(Geometry::LineString {
                coords: coords.into_iter().map(|[x, y]| (x, y)).collect(),
            })
        }
        "Polygon" => {
            // Only the exterior ring is used; holes are ignored.
            let rings: Vec<Vec<[f64; 2]>> =
                serde_json::from_value(coordinates()?).map_err(bad_coords)?;
            let exterior = rings.into_iter().next().ok_or(IoError::Geojson {
                reason: format!("polygon '{label}' has no rings"),
            })?;
            Some(Geometry::Polygon {
                exterior: exterior.into_iter().map(|[x, y]| (x, y)).collect(),
            })
        }
        other => {
            warn!(label, kind = other, "unsupported geometry kind");
            None
        }
    };
    Ok((kind_tag, geometry))
}
