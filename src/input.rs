use log::{debug, warn};
use serde_json::Value;

use crate::error::{PatchError, Result};
use crate::patch::{PathPatch, Style, polygon_patch};

/// Collect the geometry mappings contained in a GeoJSON document
///
/// # Algorithm
/// - `FeatureCollection`: geometry of every feature, `null` geometries skipped
/// - `Feature`: its geometry
/// - `GeometryCollection`: its members, recursively
/// - anything else is taken to be a geometry itself
pub fn collect_geometries(document: &Value) -> Vec<&Value> {
    let mut geometries = Vec::new();
    collect_into(document, &mut geometries);
    geometries
}

fn collect_into<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    match value.get("type").and_then(Value::as_str) {
        Some("FeatureCollection") => {
            let features = value
                .get("features")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            for feature in features {
                collect_into(feature, out);
            }
        }
        Some("Feature") => match value.get("geometry") {
            Some(Value::Null) | None => {}
            Some(geometry) => collect_into(geometry, out),
        },
        Some("GeometryCollection") => {
            let members = value
                .get("geometries")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            for member in members {
                collect_into(member, out);
            }
        }
        _ => out.push(value),
    }
}

/// Build a patch for every drawable polygon in a GeoJSON document.
///
/// Geometries that are not polygons, or that have no exterior, are skipped with
/// a warning. Malformed coordinates abort the whole document.
pub fn build_patches(document: &Value, style: &Style) -> Result<Vec<PathPatch>> {
    let mut patches = Vec::new();

    for (i, geometry) in collect_geometries(document).into_iter().enumerate() {
        match polygon_patch(geometry, style.clone()) {
            Ok(Some(patch)) => {
                debug!("geometry {}: {} vertices", i, patch.path().len());
                patches.push(patch);
            }
            Ok(None) => warn!("Skipping geometry {}: no exterior", i),
            Err(PatchError::UnsupportedGeometry { found }) => {
                warn!("Skipping geometry {}: unsupported type {}", i, found)
            }
            Err(e) => return Err(e),
        }
    }

    Ok(patches)
}
