//! Per-click orchestration and the Idle/Resolved state machine.

use crate::highlight::{HighlightManager, HighlightStyle};
use crate::panel::PanelUpdate;
use crate::resolver::RegionResolver;
use glam::{Vec2, Vec3};
use liftmap_camera::{screen_to_ray, OrbitCamera, Viewport};
use liftmap_core::{InteractionResult, IntersectionPoint, Ray, Region};
use liftmap_scene::Scene;

/// Whether a region is currently selected.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AdvisorState {
    /// No highlight, detail panel closed.
    #[default]
    Idle,
    /// Highlight shown, detail panel open for `region`.
    Resolved {
        /// The region last matched.
        region: Region,
    },
}

impl AdvisorState {
    /// The selected region, if any.
    pub fn region(&self) -> Option<&Region> {
        match self {
            Self::Idle => None,
            Self::Resolved { region } => Some(region),
        }
    }
}

/// Everything one click produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickOutcome {
    /// Nearest surface hit, if the ray met the model.
    pub hit: Option<IntersectionPoint>,
    /// Region resolution for the hit.
    pub result: InteractionResult,
}

impl ClickOutcome {
    /// Message for the detail panel.
    pub fn panel(&self) -> PanelUpdate {
        match &self.result {
            InteractionResult::Matched(region) => PanelUpdate::open(region.name.clone()),
            InteractionResult::NoMatch => PanelUpdate::closed(),
        }
    }
}

/// Drives projector, intersector, resolver and highlight for each click.
///
/// Clicks are handled synchronously, one full cycle at a time. Clicks that
/// arrive before the model is loaded find no surfaces and leave the
/// controller idle.
#[derive(Debug)]
pub struct InteractionController {
    resolver: RegionResolver,
    highlight: HighlightManager,
    state: AdvisorState,
}

impl InteractionController {
    /// Create an idle controller.
    pub fn new(resolver: RegionResolver, style: HighlightStyle) -> Self {
        Self {
            resolver,
            highlight: HighlightManager::new(style),
            state: AdvisorState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> &AdvisorState {
        &self.state
    }

    /// Highlight manager, for read-only inspection of the marker.
    pub fn highlight(&self) -> &HighlightManager {
        &self.highlight
    }

    /// Handle a click at `pointer` (viewport pixels) with the camera as it is now.
    pub fn handle_click(
        &mut self,
        scene: &mut Scene,
        camera: &OrbitCamera,
        viewport: Viewport,
        pointer: Vec2,
    ) -> ClickOutcome {
        let ray = screen_to_ray(pointer, viewport, camera);
        if ray.is_none() {
            tracing::debug!(?pointer, ?viewport, "pointer could not be projected");
        }
        self.handle_ray(scene, ray, camera.position())
    }

    /// Handle an already projected click. `viewer` is where the highlight should face.
    pub fn handle_ray(&mut self, scene: &mut Scene, ray: Option<Ray>, viewer: Vec3) -> ClickOutcome {
        let hit = ray.and_then(|ray| scene.intersect(&ray));
        let result = self.resolver.resolve_hit(hit.as_ref());

        match (&result, &hit) {
            (InteractionResult::Matched(region), Some(point)) => {
                self.highlight.show(scene, point.position, viewer);
                tracing::debug!(
                    region = %region.name,
                    surface = %point.surface,
                    position = ?point.position,
                    "region resolved"
                );
                self.state = AdvisorState::Resolved {
                    region: region.clone(),
                };
            }
            _ => {
                // Cleared even when idle in case a marker lingered
                self.highlight.clear(scene);
                if let AdvisorState::Resolved { region } = &self.state {
                    tracing::debug!(previous = %region.name, "click missed; closing panel");
                } else {
                    tracing::debug!(hit = hit.is_some(), "click matched no region");
                }
                self.state = AdvisorState::Idle;
            }
        }

        ClickOutcome { hit, result }
    }

    /// The user closed the detail panel.
    pub fn dismiss(&mut self, scene: &mut Scene) -> PanelUpdate {
        self.highlight.clear(scene);
        if let AdvisorState::Resolved { region } = &self.state {
            tracing::debug!(region = %region.name, "panel dismissed");
        }
        self.state = AdvisorState::Idle;
        PanelUpdate::closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use liftmap_catalog::RegionCatalog;
    use liftmap_core::Aabb;
    use liftmap_scene::{quad, SceneNode};
    use std::sync::Arc;

    const VIEWER: Vec3 = Vec3::new(0.0, 0.0, 5.0);

    fn controller() -> InteractionController {
        let catalog = RegionCatalog::new(vec![
            Region::new("Left", "", Aabb::new(Vec3::new(-1.0, -1.0, -0.1), Vec3::new(0.0, 1.0, 0.1))),
            Region::new("Right", "", Aabb::new(Vec3::new(0.0, -1.0, -0.1), Vec3::new(1.0, 1.0, 0.1))),
        ]);
        InteractionController::new(RegionResolver::new(Arc::new(catalog)), HighlightStyle::default())
    }

    fn wall_scene() -> Scene {
        let mut scene = Scene::new();
        // Wider than the catalog so some hits land outside every region
        scene.set_model(SceneNode::with_mesh("wall", quad(Vec3::ZERO, Vec2::new(3.0, 3.0))));
        scene
    }

    fn ray_at(x: f32, y: f32) -> Option<Ray> {
        Ray::new(Vec3::new(x, y, 5.0), Vec3::NEG_Z)
    }

    #[test]
    fn idle_to_resolved_and_back() {
        let mut scene = wall_scene();
        let mut controller = controller();

        let outcome = controller.handle_ray(&mut scene, ray_at(-0.5, 0.0), VIEWER);
        assert_eq!(outcome.panel(), PanelUpdate::open("Left"));
        assert_eq!(controller.state().region().unwrap().name, "Left");
        assert_eq!(scene.overlay_count(), 1);

        let outcome = controller.handle_ray(&mut scene, ray_at(2.0, 2.0), VIEWER);
        assert!(outcome.hit.is_some());
        assert_eq!(outcome.panel(), PanelUpdate::closed());
        assert_eq!(controller.state(), &AdvisorState::Idle);
        assert_eq!(scene.overlay_count(), 0);
    }

    #[test]
    fn resolved_to_resolved_renotifies() {
        let mut scene = wall_scene();
        let mut controller = controller();

        controller.handle_ray(&mut scene, ray_at(-0.5, 0.0), VIEWER);
        let same = controller.handle_ray(&mut scene, ray_at(-0.4, 0.2), VIEWER);
        assert_eq!(same.panel(), PanelUpdate::open("Left"));

        let other = controller.handle_ray(&mut scene, ray_at(0.5, 0.0), VIEWER);
        assert_eq!(other.panel(), PanelUpdate::open("Right"));
        assert_eq!(controller.state().region().unwrap().name, "Right");

        assert_eq!(scene.overlay_count(), 1);
        let marker = controller.highlight().marker(&scene).unwrap();
        assert!((marker.position() - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn dismiss_clears_without_click() {
        let mut scene = wall_scene();
        let mut controller = controller();

        controller.handle_ray(&mut scene, ray_at(0.5, 0.5), VIEWER);
        assert!(controller.highlight().is_shown());

        assert_eq!(controller.dismiss(&mut scene), PanelUpdate::closed());
        assert_eq!(controller.state(), &AdvisorState::Idle);
        assert_eq!(scene.overlay_count(), 0);

        // Dismissing while idle changes nothing
        assert_eq!(controller.dismiss(&mut scene), PanelUpdate::closed());
        assert_eq!(scene.overlay_count(), 0);
    }

    #[test]
    fn clicks_before_model_load_are_inert() {
        let mut scene = Scene::new();
        let mut controller = controller();

        let outcome = controller.handle_ray(&mut scene, ray_at(-0.5, 0.0), VIEWER);
        assert!(outcome.hit.is_none());
        assert_eq!(outcome.result, InteractionResult::NoMatch);
        assert_eq!(controller.state(), &AdvisorState::Idle);

        scene.set_model(SceneNode::with_mesh("wall", quad(Vec3::ZERO, Vec2::new(3.0, 3.0))));
        let outcome = controller.handle_ray(&mut scene, ray_at(-0.5, 0.0), VIEWER);
        assert!(outcome.result.is_matched());
    }

    #[test]
    fn unprojectable_click_is_no_match() {
        let mut scene = wall_scene();
        let mut controller = controller();
        let camera = OrbitCamera::looking_at(Vec3::ZERO, 5.0);

        controller.handle_ray(&mut scene, ray_at(-0.5, 0.0), VIEWER);
        let outcome = controller.handle_click(&mut scene, &camera, Viewport::new(0, 0), Vec2::ZERO);

        assert!(outcome.hit.is_none());
        assert_eq!(controller.state(), &AdvisorState::Idle);
        assert_eq!(scene.overlay_count(), 0);
    }
}
