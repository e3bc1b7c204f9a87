//! End-to-end click scenarios against the built-in mannequin and catalog.

use glam::{Vec2, Vec3};
use liftmap_advisor::{
    AdvisorState, ClickOutcome, HighlightStyle, InteractionController, PanelUpdate,
    RegionResolver,
};
use liftmap_camera::{screen_to_ray, OrbitCamera};
use liftmap_core::InteractionResult;
use liftmap_scene::{mannequin, quad, Scene, SceneNode};
use liftmap_testkit::{
    assert_vec3_near, builtin_catalog, camera_facing, flat_target_scene, init_tracing,
    mannequin_scene, pointer_for, VIEWPORT,
};

const CHEST: Vec3 = Vec3::new(0.0, 1.45, 0.2);
const FAR_TARGET: Vec3 = Vec3::new(5.0, 5.0, 5.0);

fn controller() -> InteractionController {
    InteractionController::new(
        RegionResolver::new(builtin_catalog()),
        HighlightStyle::default(),
    )
}

fn click_at(
    controller: &mut InteractionController,
    scene: &mut Scene,
    camera: &OrbitCamera,
    point: Vec3,
) -> ClickOutcome {
    let pointer = pointer_for(point, VIEWPORT, camera).expect("point is on screen");
    controller.handle_click(scene, camera, VIEWPORT, pointer)
}

/// Mannequin plus a detached panel far outside every region box.
fn mannequin_with_far_target() -> Scene {
    let mut scene = Scene::new();
    scene.set_model(
        SceneNode::group("root")
            .with_child(mannequin())
            .with_child(SceneNode::with_mesh(
                "far_target",
                quad(FAR_TARGET, Vec2::splat(0.5)),
            )),
    );
    scene
}

#[test]
fn chest_click_resolves_pectoralis_major() {
    init_tracing();
    let mut scene = mannequin_scene();
    let camera = camera_facing(CHEST, 3.0);
    let mut controller = controller();

    let outcome = click_at(&mut controller, &mut scene, &camera, CHEST);

    let hit = outcome.hit.as_ref().expect("ray meets the torso");
    assert_vec3_near(hit.position, CHEST, 1e-3);
    assert_eq!(hit.surface, "torso");
    assert_eq!(outcome.panel(), PanelUpdate::open("Pectoralis Major"));
    assert_eq!(
        serde_json::to_string(&outcome.panel()).unwrap(),
        r#"{"region":"Pectoralis Major"}"#
    );

    assert_eq!(scene.overlay_count(), 1);
    let marker = controller.highlight().marker(&scene).unwrap();
    assert_vec3_near(marker.position(), CHEST, 1e-3);
}

#[test]
fn hit_outside_every_region_clears_existing_highlight() {
    init_tracing();
    let mut scene = mannequin_with_far_target();
    let mut controller = controller();

    click_at(&mut controller, &mut scene, &camera_facing(CHEST, 3.0), CHEST);
    assert_eq!(scene.overlay_count(), 1);

    let outcome = click_at(
        &mut controller,
        &mut scene,
        &camera_facing(FAR_TARGET, 2.0),
        FAR_TARGET,
    );

    let hit = outcome.hit.as_ref().expect("ray meets the far target");
    assert_vec3_near(hit.position, FAR_TARGET, 1e-3);
    assert_eq!(hit.surface, "far_target");
    assert_eq!(outcome.result, InteractionResult::NoMatch);
    assert_eq!(serde_json::to_string(&outcome.panel()).unwrap(), "{}");
    assert_eq!(scene.overlay_count(), 0);
    assert_eq!(controller.state(), &AdvisorState::Idle);
}

#[test]
fn repeated_chest_clicks_keep_one_highlight() {
    init_tracing();
    let mut scene = mannequin_scene();
    let camera = camera_facing(Vec3::new(0.0, 1.45, 0.0), 3.0);
    let mut controller = controller();
    let second = Vec3::new(0.1, 1.5, 0.2);

    let first = click_at(&mut controller, &mut scene, &camera, CHEST);
    assert_eq!(first.panel(), PanelUpdate::open("Pectoralis Major"));

    let outcome = click_at(&mut controller, &mut scene, &camera, second);
    assert_eq!(outcome.panel(), PanelUpdate::open("Pectoralis Major"));

    assert_eq!(scene.overlay_count(), 1);
    let marker = controller.highlight().marker(&scene).unwrap();
    assert_vec3_near(marker.position(), second, 1e-3);
}

#[test]
fn click_beside_silhouette_computes_nothing() {
    init_tracing();
    let mut scene = mannequin_scene();
    let camera = camera_facing(Vec3::new(0.0, 0.9, 0.0), 3.0);
    let mut controller = controller();

    click_at(&mut controller, &mut scene, &camera, CHEST);
    assert_eq!(scene.overlay_count(), 1);

    let outcome = controller.handle_click(&mut scene, &camera, VIEWPORT, Vec2::new(5.0, 5.0));
    assert!(outcome.hit.is_none());
    assert_eq!(outcome.panel(), PanelUpdate::closed());
    assert_eq!(scene.overlay_count(), 0);
    assert_eq!(controller.state(), &AdvisorState::Idle);
}

#[test]
fn projected_points_land_where_they_were_aimed() {
    let camera = camera_facing(Vec3::new(0.2, 1.0, 0.0), 2.5);
    for point in [
        Vec3::new(0.2, 1.0, 0.1),
        Vec3::new(0.5, 1.3, 0.1),
        Vec3::new(-0.1, 0.7, 0.1),
    ] {
        let scene = flat_target_scene(point, 0.25);
        let pointer = pointer_for(point, VIEWPORT, &camera).unwrap();
        let ray = screen_to_ray(pointer, VIEWPORT, &camera).unwrap();
        let hit = scene.intersect(&ray).expect("ray meets the target");
        assert_vec3_near(hit.position, point, 1e-3);
    }
}

#[test]
fn orbiting_between_clicks_reaches_the_back() {
    init_tracing();
    let mut scene = mannequin_scene();
    let mut camera = camera_facing(Vec3::new(0.0, 1.3, 0.0), 3.0);
    let mut controller = controller();

    let front = click_at(&mut controller, &mut scene, &camera, CHEST);
    assert!(front.result.is_matched());

    camera.orbit(std::f32::consts::PI, 0.0);
    let back = Vec3::new(0.0, 1.3, -0.2);
    let outcome = click_at(&mut controller, &mut scene, &camera, back);

    assert_eq!(outcome.panel(), PanelUpdate::open("Latissimus Dorsi"));
    assert_eq!(scene.overlay_count(), 1);
    let marker = controller.highlight().marker(&scene).unwrap();
    assert_vec3_near(marker.position(), back, 1e-3);
    // Marker faces the viewer behind the model
    assert!(marker.normal().z < 0.0);
}
