#![warn(missing_docs)]
//! Static catalog of anatomical regions.
//!
//! The catalog is an ordered list of named boxes in normalized model space.
//! Lookups return the *first* region containing a point, so overlapping boxes
//! are resolved by declaration order.

mod loader;

pub use loader::{catalog_from_file, catalog_from_str, CatalogError, RegionDefinition};

use glam::Vec3;
use liftmap_core::Region;

const BUILTIN_REGIONS: &str = include_str!("../data/regions.json");

/// Ordered, immutable table of regions.
#[derive(Debug, Clone, Default)]
pub struct RegionCatalog {
    regions: Vec<Region>,
}

impl RegionCatalog {
    /// Build a catalog from regions in lookup order.
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Self {
        match catalog_from_str(BUILTIN_REGIONS) {
            Ok(catalog) => catalog,
            Err(err) => {
                // Only reachable if the embedded data is edited into invalid JSON
                tracing::error!("Built-in region catalog is invalid: {err}");
                Self::default()
            }
        }
    }

    /// First region whose box contains `point` (bounds inclusive).
    pub fn lookup(&self, point: Vec3) -> Option<&Region> {
        self.regions.iter().find(|region| region.bounds.contains(point))
    }

    /// Every region containing `point`, in catalog order.
    pub fn lookup_all(&self, point: Vec3) -> Vec<&Region> {
        self.regions
            .iter()
            .filter(|region| region.bounds.contains(point))
            .collect()
    }

    /// Regions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    /// Number of region boxes (duplicates included).
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the catalog has no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Distinct logical names in first-seen order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for region in &self.regions {
            if !names.contains(&region.name.as_str()) {
                names.push(&region.name);
            }
        }
        names
    }

    /// Regions whose box has min > max on some axis. They can never match.
    pub fn malformed(&self) -> impl Iterator<Item = &Region> {
        self.regions
            .iter()
            .filter(|region| !region.bounds.is_well_formed())
    }
}
