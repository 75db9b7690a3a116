//! polypatch - Build plottable SVG path patches from geo and GeoJSON polygons

pub mod config;
pub mod error;
pub mod input;
pub mod patch;
pub mod path;
pub mod polygon;
pub mod render;

pub use error::{PatchError, Result};
pub use patch::{PathPatch, Style, polygon_patch};
pub use path::{CompoundPath, PathCommand, build_path, polygon_path};
pub use polygon::{PolygonAdapter, PolygonLike, RingAccess, RingPolygon};
