//! Ray casting against transformed model geometry.

use crate::node::Surface;
use glam::Vec3;
use liftmap_core::{IntersectionPoint, Ray};

/// Determinant below which a triangle is treated as parallel to the ray.
const PARALLEL_EPSILON: f32 = 1e-8;
/// Hits closer than this to the ray origin are ignored.
const MIN_HIT_DISTANCE: f32 = 1e-6;
/// Slack on barycentric bounds so hits on shared edges are not lost.
const EDGE_TOLERANCE: f32 = 1e-6;
/// Padding added to surface bounds before the early-out slab test.
const BOUNDS_PADDING: f32 = 1e-4;
/// World transforms with a smaller determinant are treated as non-invertible.
const SINGULAR_EPSILON: f32 = 1e-12;

/// Ray-triangle intersection using the Möller-Trumbore algorithm.
///
/// Triangles are double-sided. Returns the distance along the ray if hit.
pub fn ray_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    let dir = ray.direction();
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = dir.cross(edge2);
    let a = edge1.dot(h);
    if a.abs() < PARALLEL_EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin() - v0;
    let u = f * s.dot(h);
    if !(-EDGE_TOLERANCE..=1.0 + EDGE_TOLERANCE).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * dir.dot(q);
    if v < -EDGE_TOLERANCE || u + v > 1.0 + EDGE_TOLERANCE {
        return None;
    }

    let t = f * edge2.dot(q);
    if t > MIN_HIT_DISTANCE {
        Some(t)
    } else {
        None
    }
}

/// Find the nearest hit of `ray` against `surfaces`.
///
/// Each surface is tested in its own local space: the ray is carried in
/// through the inverse world transform, checked against the mesh bounds, then
/// against every triangle. Hits are mapped back, so the returned point and
/// distance live in model space, the space of the region catalog. Surfaces
/// whose transform cannot be inverted (a zero scale axis) are tested in model
/// space instead.
pub fn intersect_surfaces(ray: &Ray, surfaces: &[Surface<'_>]) -> Option<IntersectionPoint> {
    let mut best: Option<Hit<'_>> = None;

    for surface in surfaces {
        let hit = if surface.world.determinant().abs() > SINGULAR_EPSILON {
            nearest_local_hit(ray, surface, best.map(|hit| hit.distance))
        } else {
            nearest_flattened_hit(ray, surface)
        };
        if let Some(hit) = hit {
            if best.map_or(true, |best| hit.distance < best.distance) {
                best = Some(hit);
            }
        }
    }

    best.map(|hit| {
        tracing::trace!(surface = hit.surface, distance = hit.distance, position = ?hit.position, "ray hit");
        IntersectionPoint {
            position: hit.position,
            distance: hit.distance,
            surface: hit.surface.to_string(),
        }
    })
}

#[derive(Debug, Clone, Copy)]
struct Hit<'a> {
    distance: f32,
    position: Vec3,
    surface: &'a str,
}

fn nearest_local_hit<'a>(
    ray: &Ray,
    surface: &Surface<'a>,
    best_distance: Option<f32>,
) -> Option<Hit<'a>> {
    let to_local = surface.world.inverse();
    let local_ray = Ray::new(
        to_local.transform_point3(ray.origin()),
        to_local.transform_vector3(ray.direction()),
    )?;
    let to_model = |t: f32| surface.world.transform_point3(local_ray.at(t));

    let mut bounds = surface.mesh.bounds()?;
    bounds.min -= Vec3::splat(BOUNDS_PADDING);
    bounds.max += Vec3::splat(BOUNDS_PADDING);
    let entry = bounds.ray_intersection(local_ray.origin(), local_ray.direction())?;
    if let Some(best_distance) = best_distance {
        // Origin outside the box: entry is a lower bound on any hit
        if !bounds.contains(local_ray.origin())
            && to_model(entry).distance(ray.origin()) > best_distance
        {
            return None;
        }
    }

    let mut nearest: Option<Hit<'a>> = None;
    for [v0, v1, v2] in surface.mesh.triangles() {
        let Some(t) = ray_triangle(&local_ray, v0, v1, v2) else {
            continue;
        };
        let position = to_model(t);
        let distance = position.distance(ray.origin());
        if nearest.map_or(true, |hit| distance < hit.distance) {
            nearest = Some(Hit {
                distance,
                position,
                surface: surface.name,
            });
        }
    }
    nearest
}

fn nearest_flattened_hit<'a>(ray: &Ray, surface: &Surface<'a>) -> Option<Hit<'a>> {
    surface
        .mesh
        .triangles()
        .filter_map(|corners| {
            let [v0, v1, v2] = corners.map(|p| surface.world.transform_point3(p));
            ray_triangle(ray, v0, v1, v2)
        })
        .min_by(|a, b| a.total_cmp(b))
        .map(|distance| Hit {
            distance,
            position: ray.at(distance),
            surface: surface.name,
        })
}
