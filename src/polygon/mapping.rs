//! GeoJSON-style mappings: reading rings out of them and producing them from `geo` types

use geo::{Coord as GeoCoord, Geometry, LineString, Polygon};
use serde_json::{Value, json};

use super::Ring;
use crate::error::{PatchError, Result};

fn position(c: GeoCoord<f64>) -> Value {
    json!([c.x, c.y])
}

fn line_string_positions(ls: &LineString<f64>) -> Value {
    Value::Array(ls.coords().copied().map(position).collect())
}

fn polygon_rings(poly: &Polygon<f64>) -> Value {
    let mut rings = vec![line_string_positions(poly.exterior())];
    rings.extend(poly.interiors().iter().map(line_string_positions));
    Value::Array(rings)
}

/// Convert a `geo` geometry into its GeoJSON geometry mapping.
///
/// `Line` becomes a two point `LineString`; `Rect` and `Triangle` become a `Polygon`.
pub fn geometry_to_mapping(geometry: &Geometry<f64>) -> Value {
    match geometry {
        Geometry::Point(p) => json!({ "type": "Point", "coordinates": position(p.0) }),
        Geometry::Line(l) => json!({
            "type": "LineString",
            "coordinates": [position(l.start), position(l.end)],
        }),
        Geometry::LineString(ls) => json!({
            "type": "LineString",
            "coordinates": line_string_positions(ls),
        }),
        Geometry::Polygon(poly) => json!({ "type": "Polygon", "coordinates": polygon_rings(poly) }),
        Geometry::MultiPoint(mp) => json!({
            "type": "MultiPoint",
            "coordinates": mp.0.iter().map(|p| position(p.0)).collect::<Vec<_>>(),
        }),
        Geometry::MultiLineString(mls) => json!({
            "type": "MultiLineString",
            "coordinates": mls.0.iter().map(line_string_positions).collect::<Vec<_>>(),
        }),
        Geometry::MultiPolygon(mp) => json!({
            "type": "MultiPolygon",
            "coordinates": mp.0.iter().map(polygon_rings).collect::<Vec<_>>(),
        }),
        Geometry::GeometryCollection(gc) => json!({
            "type": "GeometryCollection",
            "geometries": gc.0.iter().map(geometry_to_mapping).collect::<Vec<_>>(),
        }),
        Geometry::Rect(r) => json!({ "type": "Polygon", "coordinates": polygon_rings(&r.to_polygon()) }),
        Geometry::Triangle(t) => {
            json!({ "type": "Polygon", "coordinates": polygon_rings(&t.to_polygon()) })
        }
    }
}

/// Read one ring of positions. Only x and y of each position are kept.
pub(crate) fn parse_ring(value: &Value, ring: usize) -> Result<Ring> {
    let positions = value
        .as_array()
        .ok_or_else(|| PatchError::malformed(ring, "ring is not an array"))?;

    positions
        .iter()
        .enumerate()
        .map(|(i, pos)| {
            let pair = pos
                .as_array()
                .ok_or_else(|| PatchError::malformed(ring, format!("position {i} is not an array")))?;
            match (pair.first().and_then(Value::as_f64), pair.get(1).and_then(Value::as_f64)) {
                (Some(x), Some(y)) => Ok((x, y)),
                _ => Err(PatchError::malformed(
                    ring,
                    format!("position {i} needs two numbers"),
                )),
            }
        })
        .collect()
}
