//! Mapping between viewport pixels and model-space rays.

use crate::{OrbitCamera, Viewport};
use glam::{Vec2, Vec3};
use liftmap_core::Ray;

/// Convert a pointer position in viewport pixels to a ray in model space.
///
/// The ray starts on the near plane and points towards the far plane through
/// the same pixel. Must be called per click: the camera may have moved since
/// the last one. Returns `None` for a zero-sized viewport.
pub fn screen_to_ray(pointer: Vec2, viewport: Viewport, camera: &OrbitCamera) -> Option<Ray> {
    if viewport.is_degenerate() {
        return None;
    }

    // Normalized device coordinates (-1 to 1)
    let x = (2.0 * pointer.x) / viewport.width as f32 - 1.0;
    let y = 1.0 - (2.0 * pointer.y) / viewport.height as f32; // Flip Y

    // glam's perspective_rh maps depth to [0, 1]
    let inv_view_proj = camera.view_projection_matrix(viewport.aspect()).inverse();
    let near = inv_view_proj.project_point3(Vec3::new(x, y, 0.0));
    let far = inv_view_proj.project_point3(Vec3::new(x, y, 1.0));

    Ray::new(near, far - near)
}

/// Project a model-space point to viewport pixels.
///
/// Returns `None` for points behind the camera or a zero-sized viewport.
pub fn world_to_screen(point: Vec3, viewport: Viewport, camera: &OrbitCamera) -> Option<Vec2> {
    if viewport.is_degenerate() {
        return None;
    }

    let clip = camera.view_projection_matrix(viewport.aspect()) * point.extend(1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }
    let ndc = clip.truncate() / clip.w;

    Some(Vec2::new(
        (ndc.x + 1.0) * 0.5 * viewport.width as f32,
        (1.0 - ndc.y) * 0.5 * viewport.height as f32,
    ))
}
