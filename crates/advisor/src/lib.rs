#![warn(missing_docs)]
//! Muscle advisor: turns clicks on the body model into region selections.
//!
//! Per click the [`InteractionController`] projects the pointer into a ray,
//! casts it against the scene, resolves the hit through the region catalog,
//! updates the single highlight marker and reports a [`PanelUpdate`] for the
//! detail panel.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use glam::Vec2;
//! use liftmap_advisor::{HighlightStyle, InteractionController, RegionResolver};
//! use liftmap_camera::{OrbitCamera, Viewport};
//! use liftmap_catalog::RegionCatalog;
//! use liftmap_scene::{mannequin, Scene};
//!
//! let mut scene = Scene::new();
//! scene.set_model(mannequin());
//!
//! let resolver = RegionResolver::new(Arc::new(RegionCatalog::builtin()));
//! let mut controller = InteractionController::new(resolver, HighlightStyle::default());
//!
//! let camera = OrbitCamera::default();
//! let outcome = controller.handle_click(&mut scene, &camera, Viewport::new(800, 600), Vec2::new(400.0, 250.0));
//! println!("{}", outcome.panel().region.unwrap_or_default());
//! ```

mod controller;
mod equipment;
mod highlight;
mod panel;
mod resolver;

pub use controller::{AdvisorState, ClickOutcome, InteractionController};
pub use equipment::{equipment_route, EquipmentLookup, Machine, EQUIPMENT_ROUTE};
pub use highlight::{HighlightManager, HighlightStyle};
pub use panel::PanelUpdate;
pub use resolver::RegionResolver;
