//! Intersection point -> region.

use liftmap_catalog::RegionCatalog;
use liftmap_core::{InteractionResult, IntersectionPoint};
use std::sync::Arc;

/// Feeds intersection points through the region catalog.
#[derive(Debug, Clone)]
pub struct RegionResolver {
    catalog: Arc<RegionCatalog>,
}

impl RegionResolver {
    /// Create a resolver over a shared, read-only catalog.
    pub fn new(catalog: Arc<RegionCatalog>) -> Self {
        Self { catalog }
    }

    /// Resolve a surface hit to the first region containing it.
    pub fn resolve(&self, point: &IntersectionPoint) -> InteractionResult {
        InteractionResult::from(self.catalog.lookup(point.position))
    }

    /// Like [`resolve`](Self::resolve), treating a missing hit as no match.
    pub fn resolve_hit(&self, hit: Option<&IntersectionPoint>) -> InteractionResult {
        match hit {
            Some(point) => self.resolve(point),
            None => InteractionResult::NoMatch,
        }
    }
}
