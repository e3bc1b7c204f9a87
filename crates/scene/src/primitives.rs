//! Procedural geometry: boxes, quads and a stand-in body model.

use crate::node::{Mesh, SceneNode, Transform3D};
use glam::{Vec2, Vec3};

/// Closed box spanning `min`..`max`, 12 triangles.
pub fn cuboid(min: Vec3, max: Vec3) -> Mesh {
    let positions = vec![
        Vec3::new(min.x, min.y, min.z),
        Vec3::new(max.x, min.y, min.z),
        Vec3::new(max.x, max.y, min.z),
        Vec3::new(min.x, max.y, min.z),
        Vec3::new(min.x, min.y, max.z),
        Vec3::new(max.x, min.y, max.z),
        Vec3::new(max.x, max.y, max.z),
        Vec3::new(min.x, max.y, max.z),
    ];
    #[rustfmt::skip]
    let indices = vec![
        0, 2, 1, 0, 3, 2, // -Z
        4, 5, 6, 4, 6, 7, // +Z
        0, 4, 7, 0, 7, 3, // -X
        1, 2, 6, 1, 6, 5, // +X
        0, 1, 5, 0, 5, 4, // -Y
        3, 7, 6, 3, 6, 2, // +Y
    ];
    Mesh::from_parts(positions, indices)
}

/// Rectangle in the plane z = `center.z`, facing +Z.
pub fn quad(center: Vec3, half_extents: Vec2) -> Mesh {
    let (hx, hy) = (half_extents.x, half_extents.y);
    let positions = vec![
        center + Vec3::new(-hx, -hy, 0.0),
        center + Vec3::new(hx, -hy, 0.0),
        center + Vec3::new(hx, hy, 0.0),
        center + Vec3::new(-hx, hy, 0.0),
    ];
    Mesh::from_parts(positions, vec![0, 1, 2, 0, 2, 3])
}

fn part(name: &str, min: Vec3, max: Vec3) -> SceneNode {
    SceneNode::with_mesh(name, cuboid(min, max))
}

/// Arm blocks in the arm group's local space, hanging along the group's origin.
fn arm(side: &str, offset_x: f32) -> SceneNode {
    SceneNode::group(format!("{side}_arm"))
        .with_transform(Transform3D::new(Vec3::new(offset_x, 0.0, 0.0)))
        .with_child(part(
            &format!("{side}_upper_arm"),
            Vec3::new(-0.05, 1.15, -0.06),
            Vec3::new(0.05, 1.58, 0.06),
        ))
        .with_child(part(
            &format!("{side}_forearm"),
            Vec3::new(-0.045, 0.85, -0.05),
            Vec3::new(0.045, 1.15, 0.05),
        ))
        .with_child(part(
            &format!("{side}_hand"),
            Vec3::new(-0.04, 0.7, -0.03),
            Vec3::new(0.04, 0.85, 0.03),
        ))
}

/// Leg blocks in model space; `sign` is +1 for the left leg and -1 for the right.
fn leg(side: &str, sign: f32) -> SceneNode {
    let x = |inner: f32, outer: f32| {
        let (a, b) = (inner * sign, outer * sign);
        (a.min(b), a.max(b))
    };
    let (thigh_min, thigh_max) = x(0.02, 0.18);
    let (calf_min, calf_max) = x(0.04, 0.16);
    let (foot_min, foot_max) = x(0.04, 0.16);

    SceneNode::group(format!("{side}_leg"))
        .with_child(part(
            &format!("{side}_thigh"),
            Vec3::new(thigh_min, 0.45, -0.09),
            Vec3::new(thigh_max, 0.85, 0.1),
        ))
        .with_child(part(
            &format!("{side}_calf"),
            Vec3::new(calf_min, 0.08, -0.07),
            Vec3::new(calf_max, 0.45, 0.07),
        ))
        .with_child(part(
            &format!("{side}_foot"),
            Vec3::new(foot_min, 0.0, -0.07),
            Vec3::new(foot_max, 0.08, 0.18),
        ))
}

/// A blocky humanoid, 1.8 units tall, feet on y = 0, facing +Z.
///
/// Already in normalized model space; used when no model asset is supplied
/// and as a test fixture. Its left side is at +X.
pub fn mannequin() -> SceneNode {
    let upper_body = SceneNode::group("upper_body")
        .with_child(part(
            "head",
            Vec3::new(-0.1, 1.6, -0.1),
            Vec3::new(0.1, 1.8, 0.12),
        ))
        .with_child(part(
            "torso",
            Vec3::new(-0.22, 0.95, -0.2),
            Vec3::new(0.22, 1.6, 0.2),
        ))
        .with_child(arm("left", 0.27))
        .with_child(arm("right", -0.27));

    let lower_body = SceneNode::group("lower_body")
        .with_child(part(
            "pelvis",
            Vec3::new(-0.2, 0.8, -0.15),
            Vec3::new(0.2, 0.95, 0.14),
        ))
        .with_child(leg("left", 1.0))
        .with_child(leg("right", -1.0));

    SceneNode::group("mannequin")
        .with_child(upper_body)
        .with_child(lower_body)
}
