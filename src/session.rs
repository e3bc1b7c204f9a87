use crate::click_script::ClickStep;
use crate::config::AdvisorConfig;
use glam::{Vec2, Vec3};
use liftmap_advisor::{
    equipment_route, AdvisorState, ClickOutcome, EquipmentLookup, InteractionController,
    PanelUpdate, RegionResolver,
};
use liftmap_camera::{world_to_screen, OrbitCamera, Viewport};
use liftmap_catalog::RegionCatalog;
use liftmap_core::{InteractionResult, Region};
use liftmap_scene::{Scene, SceneNode};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What the detail panel shows for the selected region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailPanel {
    pub region: String,
    pub image: String,
    pub suggested_machine: Option<String>,
    pub equipment_route: String,
}

/// A session event before it is timestamped.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEvent {
    pub kind: &'static str,
    pub payload: Value,
}

impl SessionEvent {
    fn new(kind: &'static str, payload: Value) -> Self {
        Self { kind, payload }
    }
}

/// Headless stand-in for the advisor screen: owns the scene, camera and
/// controller, and plays user actions against them.
pub struct AdvisorSession<L> {
    scene: Scene,
    camera: OrbitCamera,
    viewport: Viewport,
    controller: InteractionController,
    equipment: L,
    pending_model: Option<SceneNode>,
    model_failed: bool,
    target_height: f32,
    normalize: bool,
    detail: Option<DetailPanel>,
}

impl<L: EquipmentLookup> AdvisorSession<L> {
    /// `model` is `None` when loading failed; clicks then never match.
    pub fn new(
        config: &AdvisorConfig,
        catalog: Arc<RegionCatalog>,
        equipment: L,
        model: Option<SceneNode>,
    ) -> Self {
        Self {
            scene: Scene::new(),
            camera: config.camera(),
            viewport: config.viewport(),
            controller: InteractionController::new(
                RegionResolver::new(catalog),
                config.highlight_style(),
            ),
            equipment,
            model_failed: model.is_none(),
            pending_model: model,
            target_height: config.model.target_height,
            normalize: config.model.normalize,
            detail: None,
        }
    }

    pub fn state(&self) -> &AdvisorState {
        self.controller.state()
    }

    pub fn detail(&self) -> Option<&DetailPanel> {
        self.detail.as_ref()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Install the pending model into the scene.
    pub fn model_ready(&mut self) -> SessionEvent {
        let Some(model) = self.pending_model.take() else {
            if self.model_failed {
                warn!("Model unavailable; clicks will not resolve");
            }
            return SessionEvent::new(
                "model_ready",
                json!({ "loaded": self.scene.has_model() }),
            );
        };

        self.scene.set_model(model);
        if self.normalize && !self.scene.normalize_model(self.target_height) {
            warn!("Model has no geometry to normalize");
        }
        let surfaces = self.scene.surfaces().len();
        info!(surfaces, "Model ready");
        SessionEvent::new("model_ready", json!({ "loaded": true, "surfaces": surfaces }))
    }

    pub fn apply(&mut self, step: &ClickStep) -> SessionEvent {
        match *step {
            ClickStep::ModelReady => self.model_ready(),
            ClickStep::Click { x, y } => self.click(Vec2::new(x, y)),
            ClickStep::ClickPoint { point } => {
                let point = Vec3::from_array(point);
                match world_to_screen(point, self.viewport, &self.camera) {
                    Some(pointer) => self.click(pointer),
                    None => {
                        debug!(?point, "point is not visible; click skipped");
                        SessionEvent::new(
                            "click_skipped",
                            json!({ "point": point.to_array() }),
                        )
                    }
                }
            }
            ClickStep::Orbit {
                yaw_degrees,
                pitch_degrees,
            } => {
                self.camera
                    .orbit(yaw_degrees.to_radians(), pitch_degrees.to_radians());
                self.camera_event("orbit")
            }
            ClickStep::Pan { right, up } => {
                self.camera.pan(right, up);
                self.camera_event("pan")
            }
            ClickStep::Zoom { factor } => {
                self.camera.zoom(factor);
                self.camera_event("zoom")
            }
            ClickStep::Dismiss => {
                let panel = self.controller.dismiss(&mut self.scene);
                self.detail = None;
                SessionEvent::new("dismiss", json!({ "panel": panel }))
            }
            ClickStep::ViewEquipment => match &self.detail {
                Some(detail) => SessionEvent::new(
                    "view_equipment",
                    json!({
                        "route": detail.equipment_route,
                        "machine": detail.suggested_machine,
                    }),
                ),
                None => {
                    debug!("view equipment requested with no region selected");
                    SessionEvent::new("view_equipment", json!({ "route": null }))
                }
            },
        }
    }

    pub fn click(&mut self, pointer: Vec2) -> SessionEvent {
        if !self.scene.has_model() {
            debug!(?pointer, "click before model is ready");
        }
        let outcome = self.controller.handle_click(
            &mut self.scene,
            &self.camera,
            self.viewport,
            pointer,
        );
        self.detail = match &outcome.result {
            InteractionResult::Matched(region) => Some(self.detail_for(region)),
            InteractionResult::NoMatch => None,
        };
        SessionEvent::new("click", self.click_payload(pointer, &outcome))
    }

    fn detail_for(&self, region: &Region) -> DetailPanel {
        DetailPanel {
            region: region.name.clone(),
            image: region.image_ref.clone(),
            suggested_machine: self
                .equipment
                .suggest(&region.name)
                .map(|machine| machine.name),
            equipment_route: equipment_route(&region.name),
        }
    }

    fn click_payload(&self, pointer: Vec2, outcome: &ClickOutcome) -> Value {
        let hit = outcome.hit.as_ref().map(|hit| {
            json!({
                "position": hit.position.to_array(),
                "distance": hit.distance,
                "surface": hit.surface,
            })
        });
        let panel: PanelUpdate = outcome.panel();
        json!({
            "pointer": pointer.to_array(),
            "hit": hit,
            "panel": panel,
            "detail": self.detail,
        })
    }

    fn camera_event(&self, kind: &'static str) -> SessionEvent {
        SessionEvent::new(
            kind,
            json!({
                "position": self.camera.position().to_array(),
                "target": self.camera.target.to_array(),
                "distance": self.camera.distance,
            }),
        )
    }
}
