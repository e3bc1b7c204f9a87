use std::fs;
use std::path::Path;

use glam::Vec3;
use liftmap_core::{Aabb, Region};
use serde::Deserialize;
use thiserror::Error;

use crate::RegionCatalog;

/// Errors emitted while loading a region catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Wrap IO errors when reading the catalog file.
    #[error("failed to read region catalog: {0}")]
    Io(#[from] std::io::Error),
    /// Wrap serde parsing issues.
    #[error("failed to parse region catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One catalog entry as authored in JSON. Each axis is `[min, max]`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionDefinition {
    /// Display name.
    pub name: String,
    /// Illustration reference.
    #[serde(default)]
    pub image: String,
    /// X range.
    pub x: [f32; 2],
    /// Y range.
    pub y: [f32; 2],
    /// Z range.
    pub z: [f32; 2],
}

impl From<RegionDefinition> for Region {
    fn from(def: RegionDefinition) -> Self {
        let bounds = Aabb::new(
            Vec3::new(def.x[0], def.y[0], def.z[0]),
            Vec3::new(def.x[1], def.y[1], def.z[1]),
        );
        Region::new(def.name, def.image, bounds)
    }
}

/// Load a catalog from an in-memory JSON array of region definitions.
///
/// Regions with min > max on an axis are kept (they never match) and
/// reported with a warning.
pub fn catalog_from_str(input: &str) -> Result<RegionCatalog, CatalogError> {
    let defs: Vec<RegionDefinition> = serde_json::from_str(input)?;
    let catalog = RegionCatalog::new(defs.into_iter().map(Region::from).collect());

    for region in catalog.malformed() {
        tracing::warn!(
            "Region '{}' has inverted bounds {:?}..{:?} and will never match",
            region.name,
            region.bounds.min,
            region.bounds.max
        );
    }

    Ok(catalog)
}

/// Load a catalog from the provided JSON file path.
pub fn catalog_from_file(path: &Path) -> Result<RegionCatalog, CatalogError> {
    let data = fs::read_to_string(path)?;
    catalog_from_str(&data)
}
