//! The single transient marker shown at the last matched point.

use glam::Vec3;
use liftmap_scene::{Marker, OverlayHandle, Scene};

/// Appearance of the highlight marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightStyle {
    /// Disc radius in model units.
    pub radius: f32,
    /// RGBA colour.
    pub color: [f32; 4],
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            radius: 0.025,
            color: [1.0, 0.25, 0.2, 0.85],
        }
    }
}

/// Owns the one highlight overlay in the scene.
///
/// At most one marker exists at any time: `show` repositions it, `clear`
/// removes it. The overlay handle never leaves this type.
#[derive(Debug, Default)]
pub struct HighlightManager {
    style: HighlightStyle,
    handle: Option<OverlayHandle>,
}

impl HighlightManager {
    /// Create a manager with no marker shown.
    pub fn new(style: HighlightStyle) -> Self {
        Self {
            style,
            handle: None,
        }
    }

    /// Place the marker at `point`, facing `facing_target`.
    pub fn show(&mut self, scene: &mut Scene, point: Vec3, facing_target: Vec3) {
        if let Some(marker) = self.handle.and_then(|handle| scene.overlay_mut(handle)) {
            marker.set_position(point);
            marker.face_towards(facing_target);
            tracing::trace!(?point, "highlight moved");
            return;
        }

        let mut marker = Marker::new(point, self.style.radius, self.style.color);
        marker.face_towards(facing_target);
        self.handle = Some(scene.add_overlay(marker));
        tracing::trace!(?point, "highlight created");
    }

    /// Remove the marker if one is shown. Calling this again is a no-op.
    pub fn clear(&mut self, scene: &mut Scene) {
        if let Some(handle) = self.handle.take() {
            scene.remove_overlay(handle);
            tracing::trace!("highlight cleared");
        }
    }

    /// Whether a marker is currently shown.
    pub fn is_shown(&self) -> bool {
        self.handle.is_some()
    }

    /// Read-only view of the current marker.
    pub fn marker<'s>(&self, scene: &'s Scene) -> Option<&'s Marker> {
        self.handle.and_then(|handle| scene.overlay(handle))
    }
}
