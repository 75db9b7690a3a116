//! Compound paths: every ring of a polygon as one sub-path in a single
//! vertex/command sequence.

use geo::{BoundingRect, LineString, Rect};
use log::{debug, warn};
use serde::Serialize;
use std::fmt::Write;

use crate::error::{PatchError, Result};
use crate::polygon::{Coord, PolygonAdapter, PolygonLike};

/// Drawing instruction attached to each vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PathCommand {
    /// Start a new sub-path at this vertex
    #[serde(rename = "move")]
    MoveTo,
    /// Draw an edge from the previous vertex to this one
    #[serde(rename = "line")]
    LineTo,
}

impl PathCommand {
    /// Conventional plotting code (move = 1, line = 2)
    pub fn code(self) -> u8 {
        match self {
            PathCommand::MoveTo => 1,
            PathCommand::LineTo => 2,
        }
    }
}

/// Vertices paired one to one with drawing commands
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompoundPath {
    vertices: Vec<Coord>,
    commands: Vec<PathCommand>,
}

impl CompoundPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
            commands: Vec::with_capacity(capacity),
        }
    }

    /// Append a ring as a new sub-path. Empty rings are ignored.
    pub fn push_ring(&mut self, ring: &[Coord]) -> bool {
        let Some((&first, rest)) = ring.split_first() else {
            return false;
        };

        self.vertices.push(first);
        self.commands.push(PathCommand::MoveTo);
        self.vertices.extend_from_slice(rest);
        self.commands.extend(std::iter::repeat_n(PathCommand::LineTo, rest.len()));
        true
    }

    pub fn vertices(&self) -> &[Coord] {
        &self.vertices
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Split the flat vertex list back into its rings
    pub fn sub_paths(&self) -> impl Iterator<Item = &[Coord]> + '_ {
        let starts: Vec<usize> = self
            .commands
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == PathCommand::MoveTo)
            .map(|(i, _)| i)
            .collect();
        let ends: Vec<usize> = starts
            .iter()
            .skip(1)
            .copied()
            .chain(std::iter::once(self.vertices.len()))
            .collect();

        starts
            .into_iter()
            .zip(ends)
            .map(move |(start, end)| &self.vertices[start..end])
    }

    pub fn bounds(&self) -> Option<Rect<f64>> {
        LineString::from(self.vertices.clone()).bounding_rect()
    }

    /// SVG path data; each sub-path is closed with `Z`.
    ///
    /// Coordinates are written at full f64 precision.
    pub fn to_svg_data(&self) -> String {
        let mut data = String::new();
        for (vertex, command) in self.vertices.iter().zip(&self.commands) {
            if *command == PathCommand::MoveTo && !data.is_empty() {
                data.push_str("Z ");
            }
            let op = match command {
                PathCommand::MoveTo => 'M',
                PathCommand::LineTo => 'L',
            };
            // writing into a String cannot fail
            let _ = write!(data, "{}{},{} ", op, vertex.0, vertex.1);
        }
        if !data.is_empty() {
            data.push('Z');
        }
        data
    }
}

/// Build the compound path of an adapted polygon.
///
/// Returns `Ok(None)` when the polygon has no exterior. Empty holes are skipped.
pub fn build_path(polygon: &PolygonAdapter<'_>) -> Result<Option<CompoundPath>> {
    match polygon.geom_type() {
        Some("Polygon") => {}
        other => {
            return Err(PatchError::UnsupportedGeometry {
                found: other.unwrap_or("null").to_string(),
            });
        }
    }

    let exterior = match polygon.exterior()? {
        Some(exterior) if !exterior.is_empty() => exterior,
        _ => {
            debug!("polygon has no exterior, nothing to draw");
            return Ok(None);
        }
    };
    let interiors = polygon.interiors()?;

    let capacity = exterior.len() + interiors.iter().map(|r| r.len()).sum::<usize>();
    let mut path = CompoundPath::with_capacity(capacity);
    path.push_ring(&exterior);

    for (i, ring) in interiors.iter().enumerate() {
        if !path.push_ring(ring) {
            warn!("Skipping empty interior ring {}", i);
        }
    }

    debug!(
        "built path: {} vertices, exterior {} + {} holes",
        path.len(),
        exterior.len(),
        interiors.len()
    );

    Ok(Some(path))
}

/// Build a compound path from any polygon-like value
pub fn polygon_path<P: PolygonLike + ?Sized>(polygon: &P) -> Result<Option<CompoundPath>> {
    build_path(&PolygonAdapter::new(polygon))
}
