#![warn(missing_docs)]
//! Scene graph for the body viewer.
//!
//! A [`Scene`] holds the loaded model (a tree of [`SceneNode`]s) and a layer
//! of overlay markers drawn on top of it. Only the model takes part in ray
//! casting; overlays never block a click.
//!
//! # Example
//!
//! ```rust,no_run
//! use glam::Vec3;
//! use liftmap_core::Ray;
//! use liftmap_scene::{mannequin, Scene};
//!
//! let mut scene = Scene::new();
//! scene.set_model(mannequin());
//! scene.normalize_model(1.8);
//!
//! let ray = Ray::new(Vec3::new(0.0, 1.45, 3.0), Vec3::NEG_Z).unwrap();
//! let hit = scene.intersect(&ray);
//! ```

mod intersect;
mod loader;
mod node;
mod primitives;
mod scene;

pub use intersect::{intersect_surfaces, ray_triangle};
pub use loader::{scene_from_file, scene_from_str, SceneError};
pub use node::{collect_surfaces, Mesh, MeshError, SceneNode, Surface, Transform3D};
pub use primitives::{cuboid, mannequin, quad};
pub use scene::{Marker, OverlayHandle, Scene};
