//! Rays and ray hits.

use glam::Vec3;

/// A ray in model space with a unit-length direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`.
    ///
    /// Returns `None` when the origin is not finite or the direction has zero
    /// length.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        if !origin.is_finite() {
            return None;
        }
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    /// Ray origin.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Unit direction.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Nearest point where a ray met the model surface.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionPoint {
    /// Hit position in model space.
    pub position: Vec3,
    /// Distance from the ray origin to `position`.
    pub distance: f32,
    /// Name of the scene node whose surface was hit.
    pub surface: String,
}
