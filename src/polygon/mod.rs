//! Uniform read access over polygons given either as ring accessors or as
//! GeoJSON-style mappings.

pub mod mapping;
pub mod rings;

pub use mapping::geometry_to_mapping;
pub use rings::{RingAccess, RingPolygon};

use std::borrow::Cow;

use geo::{Geometry, MultiPolygon, Polygon};
use log::debug;
use serde_json::{Map, Value};

use crate::error::{PatchError, Result};
use mapping::parse_ring;

pub type Coord = (f64, f64);
pub type Ring = Vec<Coord>;

/// Anything that may describe a polygon.
///
/// Implementors advertise at most one of the capabilities below; the adapter
/// checks them in declaration order.
pub trait PolygonLike {
    /// Ring accessors, if the value exposes its rings directly
    fn rings(&self) -> Option<&dyn RingAccess> {
        None
    }

    /// Conversion to a GeoJSON geometry mapping
    fn geo_interface(&self) -> Option<Value> {
        None
    }

    /// The value viewed as a GeoJSON mapping. Non-mapping values present `null`.
    fn as_mapping(&self) -> Cow<'_, Value> {
        Cow::Owned(Value::Null)
    }
}

impl PolygonLike for Polygon<f64> {
    fn rings(&self) -> Option<&dyn RingAccess> {
        Some(self)
    }
}

impl PolygonLike for RingPolygon {
    fn rings(&self) -> Option<&dyn RingAccess> {
        Some(self)
    }
}

impl PolygonLike for Geometry<f64> {
    fn rings(&self) -> Option<&dyn RingAccess> {
        match self {
            Geometry::Polygon(poly) => Some(poly),
            _ => None,
        }
    }

    fn geo_interface(&self) -> Option<Value> {
        Some(geometry_to_mapping(self))
    }
}

impl PolygonLike for MultiPolygon<f64> {
    fn geo_interface(&self) -> Option<Value> {
        Some(geometry_to_mapping(&Geometry::MultiPolygon(self.clone())))
    }
}

impl PolygonLike for Value {
    fn as_mapping(&self) -> Cow<'_, Value> {
        Cow::Borrowed(self)
    }
}

impl PolygonLike for Map<String, Value> {
    fn as_mapping(&self) -> Cow<'_, Value> {
        Cow::Owned(Value::Object(self.clone()))
    }
}

/// A polygon-like value with its representation resolved once
pub enum PolygonAdapter<'a> {
    Rings(&'a dyn RingAccess),
    Mapping(Cow<'a, Value>),
}

impl<'a> PolygonAdapter<'a> {
    pub fn new<P: PolygonLike + ?Sized>(context: &'a P) -> Self {
        if let Some(rings) = context.rings() {
            return Self::Rings(rings);
        }
        if let Some(mapping) = context.geo_interface() {
            return Self::Mapping(Cow::Owned(mapping));
        }
        Self::Mapping(context.as_mapping())
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    fn coordinates(&self) -> Option<&Value> {
        match self {
            Self::Rings(_) => None,
            Self::Mapping(mapping) => mapping.get("coordinates"),
        }
    }

    /// Geometry type tag, e.g. `"Polygon"`
    pub fn geom_type(&self) -> Option<&str> {
        match self {
            Self::Rings(rings) => {
                debug!("returning ring accessor geom type");
                Some(rings.geom_type())
            }
            Self::Mapping(mapping) => {
                debug!("returning mapping geom type");
                mapping.get("type").and_then(Value::as_str)
            }
        }
    }

    /// Exterior ring.
    ///
    /// `None` when a ring accessor has no exterior points. A mapping without
    /// `coordinates` yields an empty ring instead.
    pub fn exterior(&self) -> Result<Option<Ring>> {
        match self {
            Self::Rings(rings) => {
                debug!("returning ring accessor exterior");
                let exterior = rings.exterior_coords();
                Ok((!exterior.is_empty()).then_some(exterior))
            }
            Self::Mapping(_) => {
                debug!("returning mapping exterior");
                let Some(coords) = self.coordinates() else {
                    return Ok(Some(Ring::new()));
                };
                let rings = coords
                    .as_array()
                    .ok_or_else(|| PatchError::malformed(0, "coordinates is not an array"))?;
                match rings.first() {
                    Some(ring) => parse_ring(ring, 0).map(Some),
                    None => Ok(Some(Ring::new())),
                }
            }
        }
    }

    /// Interior rings (holes), in order
    pub fn interiors(&self) -> Result<Vec<Ring>> {
        match self {
            Self::Rings(rings) => {
                debug!("returning ring accessor interiors");
                Ok(rings.interior_coords())
            }
            Self::Mapping(_) => {
                debug!("returning mapping interiors");
                let Some(coords) = self.coordinates() else {
                    return Ok(Vec::new());
                };
                let rings = coords
                    .as_array()
                    .ok_or_else(|| PatchError::malformed(0, "coordinates is not an array"))?;
                rings
                    .iter()
                    .enumerate()
                    .skip(1)
                    .map(|(i, ring)| parse_ring(ring, i))
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, polygon};
    use serde_json::json;
    use std::sync::Mutex;
    use std::thread::{self, ThreadId};

    struct Opaque;

    impl PolygonLike for Opaque {}

    #[test]
    fn test_mapping_rings_verbatim() {
        let ext = json!([[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]]);
        let hole1 = json!([[1.0, 1.0], [2.0, 1.0], [2.0, 2.0]]);
        let hole2 = json!([[3.0, 3.0], [3.5, 3.0], [3.5, 3.5]]);
        let value = json!({ "type": "Polygon", "coordinates": [ext, hole1, hole2] });

        let adapter = PolygonAdapter::new(&value);
        assert!(adapter.is_mapping());
        assert_eq!(adapter.geom_type(), Some("Polygon"));
        assert_eq!(
            adapter.exterior().unwrap(),
            Some(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)])
        );
        assert_eq!(
            adapter.interiors().unwrap(),
            vec![
                vec![(1.0, 1.0), (2.0, 1.0), (2.0, 2.0)],
                vec![(3.0, 3.0), (3.5, 3.0), (3.5, 3.5)],
            ]
        );
    }

    #[test]
    fn test_mapping_without_coordinates() {
        let value = json!({ "type": "Polygon" });
        let adapter = PolygonAdapter::new(&value);

        assert_eq!(adapter.exterior().unwrap(), Some(Vec::new()));
        assert!(adapter.interiors().unwrap().is_empty());
    }

    #[test]
    fn test_mapping_without_type() {
        let value = json!({ "coordinates": [] });
        let adapter = PolygonAdapter::new(&value);
        assert_eq!(adapter.geom_type(), None);
    }

    #[test]
    fn test_mapping_single_ring_has_no_interiors() {
        let value = json!({ "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1]]] });
        let adapter = PolygonAdapter::new(&value);
        assert!(adapter.interiors().unwrap().is_empty());
    }

    #[test]
    fn test_mapping_bad_coordinates_fail() {
        let value = json!({ "type": "Polygon", "coordinates": 12 });
        let adapter = PolygonAdapter::new(&value);
        assert!(adapter.exterior().is_err());
        assert!(adapter.interiors().is_err());

        let value = json!({ "type": "Polygon", "coordinates": [[[0, 0]], [[1, "a"]]] });
        let adapter = PolygonAdapter::new(&value);
        assert_eq!(
            adapter.interiors().unwrap_err(),
            PatchError::malformed(1, "position 0 needs two numbers")
        );
    }

    #[test]
    fn test_json_map_is_mapping() {
        let mut map = Map::new();
        map.insert("type".to_string(), json!("Polygon"));
        let adapter = PolygonAdapter::new(&map);
        assert!(adapter.is_mapping());
        assert_eq!(adapter.geom_type(), Some("Polygon"));
    }

    #[test]
    fn test_geo_polygon_uses_rings() {
        let poly: Polygon<f64> = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)];
        let adapter = PolygonAdapter::new(&poly);

        assert!(!adapter.is_mapping());
        assert_eq!(adapter.geom_type(), Some("Polygon"));
        assert_eq!(adapter.exterior().unwrap().unwrap().len(), 4);
    }

    #[test]
    fn test_empty_ring_exterior_is_none() {
        let poly = RingPolygon::default();
        let adapter = PolygonAdapter::new(&poly);
        assert_eq!(adapter.exterior().unwrap(), None);
        assert!(adapter.interiors().unwrap().is_empty());
    }

    #[test]
    fn test_geometry_polygon_prefers_rings() {
        let poly: Polygon<f64> = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)];
        let geometry = Geometry::Polygon(poly);
        assert!(!PolygonAdapter::new(&geometry).is_mapping());
    }

    #[test]
    fn test_geometry_line_string_uses_geo_interface() {
        let geometry = Geometry::LineString(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)]);
        let adapter = PolygonAdapter::new(&geometry);

        assert!(adapter.is_mapping());
        assert_eq!(adapter.geom_type(), Some("LineString"));
    }

    #[test]
    fn test_multipolygon_uses_geo_interface() {
        let poly: Polygon<f64> = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)];
        let mp = MultiPolygon::new(vec![poly]);
        assert_eq!(PolygonAdapter::new(&mp).geom_type(), Some("MultiPolygon"));
    }

    #[test]
    fn test_opaque_value_has_no_type() {
        let opaque = Opaque;
        let adapter = PolygonAdapter::new(&opaque);
        assert!(adapter.is_mapping());
        assert_eq!(adapter.geom_type(), None);
        assert_eq!(adapter.exterior().unwrap(), Some(Vec::new()));
    }

    /// Collects debug messages per thread so parallel tests do not mix
    struct CaptureLogger(Mutex<Vec<(ThreadId, String)>>);

    impl log::Log for CaptureLogger {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::Level::Debug
        }

        fn log(&self, record: &log::Record) {
            if let Ok(mut records) = self.0.lock() {
                records.push((thread::current().id(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static CAPTURE: CaptureLogger = CaptureLogger(Mutex::new(Vec::new()));

    fn captured_on_this_thread() -> Vec<String> {
        let id = thread::current().id();
        CAPTURE
            .0
            .lock()
            .unwrap()
            .iter()
            .filter(|(thread, _)| *thread == id)
            .map(|(_, message)| message.clone())
            .collect()
    }

    #[test]
    fn test_reads_log_their_representation() {
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(log::LevelFilter::Debug);

        let value = json!({ "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1]]] });
        let adapter = PolygonAdapter::new(&value);
        adapter.geom_type();
        adapter.exterior().unwrap();
        adapter.interiors().unwrap();

        let ring_poly = RingPolygon::new(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let adapter = PolygonAdapter::new(&ring_poly);
        adapter.geom_type();
        adapter.exterior().unwrap();
        adapter.interiors().unwrap();

        let messages = captured_on_this_thread();
        for expected in [
            "returning mapping geom type",
            "returning mapping exterior",
            "returning mapping interiors",
            "returning ring accessor geom type",
            "returning ring accessor exterior",
            "returning ring accessor interiors",
        ] {
            assert!(
                messages.iter().any(|m| m == expected),
                "missing log line: {}",
                expected
            );
        }
    }
}
