#![warn(missing_docs)]
//! Geometry and result primitives shared across the workspace.
//!
//! Everything here is a plain value type: rays and intersection points are
//! built fresh for every click and dropped at the end of the cycle.

mod aabb;
mod ray;
mod region;

pub use aabb::Aabb;
pub use ray::{IntersectionPoint, Ray};
pub use region::{InteractionResult, Region};
