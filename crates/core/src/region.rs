//! Anatomical regions and the outcome of a click cycle.

use crate::Aabb;

/// A named anatomical zone bounded by an axis-aligned box in model space.
///
/// Names are not unique: left/right pairs are declared as separate boxes
/// under the same logical name.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Display name, e.g. "Pectoralis Major".
    pub name: String,
    /// Opaque reference to illustrative media.
    pub image_ref: String,
    /// Bounds in normalized model space.
    pub bounds: Aabb,
}

impl Region {
    /// Create a region.
    pub fn new(name: impl Into<String>, image_ref: impl Into<String>, bounds: Aabb) -> Self {
        Self {
            name: name.into(),
            image_ref: image_ref.into(),
            bounds,
        }
    }
}

/// Result of resolving one click.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionResult {
    /// The click landed inside a catalog region.
    Matched(Region),
    /// No intersection, or the intersection lies outside every region.
    NoMatch,
}

impl InteractionResult {
    /// Whether a region was matched.
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    /// The matched region, if any.
    pub fn region(&self) -> Option<&Region> {
        match self {
            Self::Matched(region) => Some(region),
            Self::NoMatch => None,
        }
    }
}

impl From<Option<&Region>> for InteractionResult {
    fn from(region: Option<&Region>) -> Self {
        match region {
            Some(region) => Self::Matched(region.clone()),
            None => Self::NoMatch,
        }
    }
}
