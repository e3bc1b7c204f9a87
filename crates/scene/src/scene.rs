//! The renderable scene: loaded model plus overlay markers.

use crate::intersect::intersect_surfaces;
use crate::node::{collect_surfaces, SceneNode, Surface, Transform3D};
use glam::{Mat3, Quat, Vec3};
use liftmap_core::{IntersectionPoint, Ray};
use std::collections::HashMap;

/// Handle to an overlay for updates/removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle(u64);

/// A flat disc marker drawn over the model, facing a chosen point.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Placement. The marker's local +Z axis is its facing direction.
    pub transform: Transform3D,
    /// Disc radius in model units.
    pub radius: f32,
    /// RGBA colour.
    pub color: [f32; 4],
}

impl Marker {
    /// Create a marker at `position` with identity orientation.
    pub fn new(position: Vec3, radius: f32, color: [f32; 4]) -> Self {
        Self {
            transform: Transform3D::new(position),
            radius,
            color,
        }
    }

    /// Marker position.
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Unit vector the marker faces.
    pub fn normal(&self) -> Vec3 {
        self.transform.rotation * Vec3::Z
    }

    /// Move the marker to `position`.
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    /// Rotate the marker so its face points at `target`.
    ///
    /// Leaves the orientation untouched when `target` coincides with the
    /// marker position.
    pub fn face_towards(&mut self, target: Vec3) {
        let Some(to_target) = (target - self.transform.position).try_normalize() else {
            return;
        };
        let right = Vec3::Y
            .cross(to_target)
            .try_normalize()
            .unwrap_or(Vec3::X);
        let up = to_target.cross(right);

        let rotation = Mat3::from_cols(right, up, to_target);
        self.transform.rotation = Quat::from_mat3(&rotation).normalize();
    }
}

/// Model tree plus overlay layer.
///
/// The model is `None` until the asset finishes loading; until then ray
/// casts find nothing.
#[derive(Debug, Default)]
pub struct Scene {
    model: Option<SceneNode>,
    overlays: HashMap<OverlayHandle, Marker>,
    next_handle: u64,
}

impl Scene {
    /// Empty scene with no model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the loaded model, replacing any previous one.
    pub fn set_model(&mut self, model: SceneNode) {
        tracing::debug!(name = %model.name, "model installed");
        self.model = Some(model);
    }

    /// The loaded model, if any.
    pub fn model(&self) -> Option<&SceneNode> {
        self.model.as_ref()
    }

    /// Whether a model is present.
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Every drawable surface of the model with its world transform.
    pub fn surfaces(&self) -> Vec<Surface<'_>> {
        self.model.as_ref().map(collect_surfaces).unwrap_or_default()
    }

    /// Nearest hit of `ray` against the model, in model space.
    pub fn intersect(&self, ray: &Ray) -> Option<IntersectionPoint> {
        intersect_surfaces(ray, &self.surfaces())
    }

    /// Recenter and rescale the model so it stands on y = 0, centered on the
    /// x/z origin, `target_height` units tall.
    ///
    /// Region boxes are authored in this normalized space, so this must run
    /// before any click is resolved. Returns `false` if there is nothing to
    /// normalize.
    pub fn normalize_model(&mut self, target_height: f32) -> bool {
        let Some(model) = self.model.take() else {
            return false;
        };
        let Some(bounds) = model.world_bounds() else {
            tracing::warn!(name = %model.name, "model has no geometry; skipping normalization");
            self.model = Some(model);
            return false;
        };

        let height = bounds.size().y;
        if height <= f32::EPSILON || !target_height.is_finite() || target_height <= 0.0 {
            tracing::warn!(
                height,
                target_height,
                "cannot normalize model with degenerate height"
            );
            self.model = Some(model);
            return false;
        }

        let scale = target_height / height;
        let center = bounds.center();
        let anchor = Vec3::new(center.x, bounds.min.y, center.z);
        let transform = Transform3D::new(-anchor * scale).with_scale(Vec3::splat(scale));

        tracing::debug!(scale, ?anchor, "normalized model");
        self.model = Some(
            SceneNode::group(format!("{}_normalized", model.name))
                .with_transform(transform)
                .with_child(model),
        );
        true
    }

    /// Add an overlay marker.
    pub fn add_overlay(&mut self, marker: Marker) -> OverlayHandle {
        let handle = OverlayHandle(self.next_handle);
        self.next_handle += 1;
        self.overlays.insert(handle, marker);
        handle
    }

    /// Mutable access to an overlay.
    pub fn overlay_mut(&mut self, handle: OverlayHandle) -> Option<&mut Marker> {
        self.overlays.get_mut(&handle)
    }

    /// Shared access to an overlay.
    pub fn overlay(&self, handle: OverlayHandle) -> Option<&Marker> {
        self.overlays.get(&handle)
    }

    /// Remove an overlay, returning it if it existed.
    pub fn remove_overlay(&mut self, handle: OverlayHandle) -> Option<Marker> {
        self.overlays.remove(&handle)
    }

    /// Number of overlays currently in the scene.
    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }
}
