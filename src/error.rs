use thiserror::Error;

/// Errors raised while turning a polygon-like value into a path
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatchError {
    /// Only single polygons can be drawn; `found` is the type tag encountered
    #[error("Wrong Type: {found}")]
    UnsupportedGeometry { found: String },

    /// A mapping's `coordinates` entry could not be read as rings of positions
    #[error("Malformed coordinates in ring {ring}: {reason}")]
    MalformedCoordinates { ring: usize, reason: String },
}

impl PatchError {
    pub(crate) fn malformed(ring: usize, reason: impl Into<String>) -> Self {
        Self::MalformedCoordinates {
            ring,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PatchError>;
