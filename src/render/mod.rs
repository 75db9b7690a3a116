//! Plotting surface: lays patches out in an SVG document

use geo::{Rect, coord};
use std::path::Path;
use svg::Document;
use svg::node::element::Group;

use crate::patch::PathPatch;

/// Document layout options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Padding around the drawing, as a fraction of its larger extent
    pub margin: f64,
    /// Mirror y so that it grows upwards, as in map and plot coordinates
    pub flip_y: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            margin: 0.05,
            flip_y: true,
        }
    }
}

/// Union of the bounds of all patches
pub fn patches_bounds(patches: &[PathPatch]) -> Option<Rect<f64>> {
    patches
        .iter()
        .filter_map(|p| p.path().bounds())
        .reduce(|a, b| {
            Rect::new(
                coord! { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                coord! { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
            )
        })
}

/// View box `(x, y, width, height)` fitted around the patches
pub fn view_box(patches: &[PathPatch], margin: f64) -> (f64, f64, f64, f64) {
    let Some(bounds) = patches_bounds(patches) else {
        return (0.0, 0.0, 1.0, 1.0);
    };

    let extent = bounds.width().max(bounds.height());
    let pad = if extent > 0.0 { extent * margin } else { 1.0 };

    (
        bounds.min().x - pad,
        bounds.min().y - pad,
        bounds.width() + 2.0 * pad,
        bounds.height() + 2.0 * pad,
    )
}

/// Build an SVG document containing every patch, in order
pub fn patches_to_document(patches: &[PathPatch], options: &RenderOptions) -> Document {
    let (x, y, width, height) = view_box(patches, options.margin);

    let mut group = Group::new();
    if options.flip_y {
        // y' = (2y + h) - y mirrors about the view box centre
        group = group.set(
            "transform",
            format!("matrix(1 0 0 -1 0 {})", 2.0 * y + height),
        );
    }
    for patch in patches {
        group = group.add(patch.to_svg_path());
    }

    Document::new()
        .set("viewBox", format!("{} {} {} {}", x, y, width, height))
        .add(group)
}

pub fn save_document(path: &Path, document: &Document) -> std::io::Result<()> {
    svg::save(path, document)
}
