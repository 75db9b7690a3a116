use geo::{LineString, Polygon};

use super::{Coord, Ring};

/// Direct access to a polygon's rings, the way `geo` polygons expose them
pub trait RingAccess {
    /// Type tag reported for this polygon
    fn geom_type(&self) -> &str {
        "Polygon"
    }

    fn exterior_coords(&self) -> Ring;

    fn interior_coords(&self) -> Vec<Ring>;
}

fn line_string_coords(ring: &LineString<f64>) -> Ring {
    ring.coords().map(|c| (c.x, c.y)).collect()
}

impl RingAccess for Polygon<f64> {
    fn exterior_coords(&self) -> Ring {
        line_string_coords(self.exterior())
    }

    fn interior_coords(&self) -> Vec<Ring> {
        self.interiors().iter().map(line_string_coords).collect()
    }
}

/// A polygon stored as plain coordinate rings.
///
/// Unlike `geo::Polygon`, rings are kept exactly as given and are not closed
/// automatically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RingPolygon {
    pub exterior: Ring,
    pub interiors: Vec<Ring>,
}

impl RingPolygon {
    pub fn new(exterior: Vec<Coord>) -> Self {
        Self {
            exterior,
            interiors: Vec::new(),
        }
    }

    pub fn with_holes(exterior: Vec<Coord>, interiors: Vec<Vec<Coord>>) -> Self {
        Self {
            exterior,
            interiors,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.exterior.is_empty()
    }
}

impl RingAccess for RingPolygon {
    fn exterior_coords(&self) -> Ring {
        self.exterior.clone()
    }

    fn interior_coords(&self) -> Vec<Ring> {
        self.interiors.clone()
    }
}
