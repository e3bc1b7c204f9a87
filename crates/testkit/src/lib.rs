#![warn(missing_docs)]
//! Deterministic fixtures for advisor tests: synthetic scenes, cameras aimed
//! at known model-space points, and the pointer positions that reach them.

use anyhow::{Context, Result};
use glam::{Vec2, Vec3};
use liftmap_camera::{world_to_screen, OrbitCamera, Viewport};
use liftmap_catalog::RegionCatalog;
use liftmap_scene::{mannequin, quad, Scene, SceneNode};
use std::sync::Arc;

/// Height the mannequin and region catalog are authored for.
pub const MODEL_HEIGHT: f32 = 1.8;

/// Viewport used by fixtures unless a test needs something else.
pub const VIEWPORT: Viewport = Viewport {
    width: 800,
    height: 600,
};

/// Install a `tracing` subscriber for test output. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Scene whose only surface is a flat square facing +Z, centered on `point`.
pub fn flat_target_scene(point: Vec3, half_size: f32) -> Scene {
    let mut scene = Scene::new();
    scene.set_model(SceneNode::with_mesh(
        "target",
        quad(point, Vec2::splat(half_size)),
    ));
    scene
}

/// Scene with the built-in mannequin, normalized the way the app does it.
pub fn mannequin_scene() -> Scene {
    let mut scene = Scene::new();
    scene.set_model(mannequin());
    scene.normalize_model(MODEL_HEIGHT);
    scene
}

/// Camera on the +Z side of `point`, looking straight at it.
pub fn camera_facing(point: Vec3, distance: f32) -> OrbitCamera {
    OrbitCamera::looking_at(point, distance)
}

/// Pixel at which `point` appears through `camera`.
pub fn pointer_for(point: Vec3, viewport: Viewport, camera: &OrbitCamera) -> Result<Vec2> {
    world_to_screen(point, viewport, camera)
        .with_context(|| format!("{point:?} is not in front of the camera"))
}

/// Shared built-in catalog.
pub fn builtin_catalog() -> Arc<RegionCatalog> {
    Arc::new(RegionCatalog::builtin())
}

/// Assert two vectors agree within `tolerance`.
#[track_caller]
pub fn assert_vec3_near(actual: Vec3, expected: Vec3, tolerance: f32) {
    let error = actual.distance(expected);
    assert!(
        error <= tolerance,
        "expected {expected:?}, got {actual:?} (off by {error})"
    );
}
