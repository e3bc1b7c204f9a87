#![warn(missing_docs)]
//! Orbit camera and pointer projection for the body viewer.

mod projector;

pub use projector::{screen_to_ray, world_to_screen};

use glam::{Mat4, Vec3};

/// Closest the camera may get to its orbit target.
pub const MIN_ORBIT_DISTANCE: f32 = 0.05;

const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Pixel dimensions of the surface the model is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a viewport.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width / height.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// A zero-sized viewport cannot map pixels to rays.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Camera orbiting a target point, driven by orbit/pan/zoom controls.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Point the camera looks at.
    pub target: Vec3,
    /// Distance from the target.
    pub distance: f32,
    /// Rotation around the world Y axis in radians. Zero looks down -Z.
    pub yaw: f32,
    /// Elevation above the target's horizontal plane in radians.
    pub pitch: f32,
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::new(0.0, 0.9, 0.0),
            distance: 3.0,
            yaw: 0.0,
            pitch: 0.0,
            fov: 45f32.to_radians(),
            near: 0.1,
            far: 100.0,
        }
    }
}

impl OrbitCamera {
    /// Create a camera looking at `target` from `distance` along +Z.
    pub fn looking_at(target: Vec3, distance: f32) -> Self {
        Self {
            target,
            distance: distance.max(MIN_ORBIT_DISTANCE),
            ..Default::default()
        }
    }

    /// Unit vector from the target towards the camera.
    fn offset_direction(&self) -> Vec3 {
        Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        )
    }

    /// Camera position in model space.
    pub fn position(&self) -> Vec3 {
        self.target + self.offset_direction() * self.distance
    }

    /// Direction the camera is looking.
    pub fn forward(&self) -> Vec3 {
        -self.offset_direction()
    }

    /// Camera's local X axis.
    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    /// Camera's local Y axis.
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward()).normalize()
    }

    /// World space -> camera space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Camera space -> clip space for the given aspect ratio.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }

    /// Combined view-projection matrix.
    pub fn view_projection_matrix(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Rotate around the target.
    ///
    /// # Arguments
    /// * `delta_yaw` - Horizontal rotation delta in radians
    /// * `delta_pitch` - Vertical rotation delta in radians
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw = (self.yaw + delta_yaw).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + delta_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Slide the target in the view plane. Deltas are fractions of the orbit distance.
    pub fn pan(&mut self, delta_right: f32, delta_up: f32) {
        let offset = self.right() * delta_right + self.up() * delta_up;
        self.target += offset * self.distance;
    }

    /// Scale the orbit distance. Factors below 1 move closer.
    pub fn zoom(&mut self, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            tracing::warn!("Ignoring invalid zoom factor {factor}");
            return;
        }
        let max_distance = (self.far * 0.5).max(MIN_ORBIT_DISTANCE);
        self.distance = (self.distance * factor).clamp(MIN_ORBIT_DISTANCE, max_distance);
    }
}
