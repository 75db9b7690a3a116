//! Styled, drawable patches built on top of compound paths

pub mod style;

pub use style::Style;

use svg::node::element::Path;

use crate::error::Result;
use crate::path::{CompoundPath, polygon_path};
use crate::polygon::PolygonLike;

const FILL_RULE: &str = "fill-rule";

/// A compound path together with the style it should be drawn with
#[derive(Debug, Clone, PartialEq)]
pub struct PathPatch {
    path: CompoundPath,
    style: Style,
}

impl PathPatch {
    pub fn new(path: CompoundPath, style: Style) -> Self {
        Self { path, style }
    }

    pub fn path(&self) -> &CompoundPath {
        &self.path
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// SVG `<path>` element carrying every style entry as an attribute.
    ///
    /// Holes only render as holes with the even-odd rule, so it is added unless
    /// the style sets its own.
    pub fn to_svg_path(&self) -> Path {
        let mut element = Path::new().set("d", self.path.to_svg_data());
        for (key, value) in self.style.iter() {
            element = element.set(key.as_str(), style::attribute_value(value));
        }
        if self.style.get(FILL_RULE).is_none() {
            element = element.set(FILL_RULE, "evenodd");
        }
        element
    }
}

/// Build a styled patch from any polygon-like value.
///
/// # Example
/// ```
/// use polypatch::{RingPolygon, Style, polygon_patch};
///
/// let square = RingPolygon::new(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
/// let style = Style::new().with("fill", "blue").with("fill-opacity", 0.5);
/// let patch = polygon_patch(&square, style).unwrap().unwrap();
/// assert_eq!(patch.path().len(), 4);
/// ```
pub fn polygon_patch<P: PolygonLike + ?Sized>(
    polygon: &P,
    style: Style,
) -> Result<Option<PathPatch>> {
    Ok(polygon_path(polygon)?.map(|path| PathPatch::new(path, style)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PatchError;
    use crate::polygon::RingPolygon;
    use serde_json::json;

    fn holed_square() -> RingPolygon {
        RingPolygon::with_holes(
            vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
            vec![vec![(0.2, 0.2), (0.8, 0.2), (0.5, 0.8)]],
        )
    }

    #[test]
    fn test_patch_keeps_style() {
        let style = Style::new().with("fill", "#ff0000").with("stroke-width", 2);
        let patch = polygon_patch(&holed_square(), style.clone()).unwrap().unwrap();

        assert_eq!(patch.style(), &style);
        assert_eq!(patch.path().len(), 7);
    }

    #[test]
    fn test_no_exterior_gives_none_for_any_style() {
        let empty = RingPolygon::default();
        assert_eq!(polygon_patch(&empty, Style::new()).unwrap(), None);

        let style = Style::new().with("fill", "green").with("opacity", 0.3);
        assert_eq!(polygon_patch(&empty, style).unwrap(), None);
    }

    #[test]
    fn test_wrong_type_propagates() {
        let value = json!({ "type": "Point", "coordinates": [0.0, 0.0] });
        assert_eq!(
            polygon_patch(&value, Style::new()).unwrap_err(),
            PatchError::UnsupportedGeometry {
                found: "Point".to_string()
            }
        );
    }

    #[test]
    fn test_svg_path_attributes() {
        let style = Style::new()
            .with("fill", "#336699")
            .with("fill-opacity", 0.5)
            .with("data-id", 7);
        let patch = polygon_patch(&holed_square(), style).unwrap().unwrap();
        let rendered = patch.to_svg_path().to_string();

        assert!(rendered.starts_with("<path"));
        assert!(rendered.contains(r##"fill="#336699""##));
        assert!(rendered.contains(r#"fill-opacity="0.5""#));
        assert!(rendered.contains(r#"data-id="7""#));
        assert!(rendered.contains(r#"fill-rule="evenodd""#));
        assert_eq!(rendered.matches('M').count(), 2);
    }

    #[test]
    fn test_svg_path_respects_fill_rule() {
        let style = Style::new().with("fill-rule", "nonzero");
        let patch = polygon_patch(&holed_square(), style).unwrap().unwrap();
        let rendered = patch.to_svg_path().to_string();

        assert!(rendered.contains(r#"fill-rule="nonzero""#));
        assert!(!rendered.contains("evenodd"));
    }
}
