use anyhow::{Context, Result};
use liftmap_advisor::{EquipmentLookup, Machine};
use std::{fs, path::Path};
use tracing::warn;

/// In-memory machine directory read from JSON.
#[derive(Debug, Clone, Default)]
pub struct MachineDirectory {
    machines: Vec<Machine>,
}

impl MachineDirectory {
    pub fn new(machines: Vec<Machine>) -> Self {
        Self { machines }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read machine directory {}", path.display()))?;
        let machines: Vec<Machine> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse machine directory {}", path.display()))?;
        Ok(Self::new(machines))
    }

    /// Load from `path`, or an empty directory if it cannot be read.
    pub fn load_lenient(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(directory) => directory,
            Err(err) => {
                warn!("{err:#}. Continuing without machine suggestions");
                Self::default()
            }
        }
    }

    pub fn count(&self) -> usize {
        self.machines.len()
    }
}

impl EquipmentLookup for MachineDirectory {
    fn suggest(&self, region: &str) -> Option<Machine> {
        self.machines
            .iter()
            .find(|machine| machine.targets(region))
            .cloned()
    }
}
