//! Seam to the external machine directory.

use serde::{Deserialize, Serialize};

/// Route the UI opens to list equipment for a muscle.
pub const EQUIPMENT_ROUTE: &str = "/machines";

/// A training machine as described by the machine directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    /// Display name.
    pub name: String,
    /// Region names this machine trains.
    #[serde(default)]
    pub target_muscles: Vec<String>,
}

impl Machine {
    /// Whether this machine lists `region` among its targets.
    pub fn targets(&self, region: &str) -> bool {
        self.target_muscles.iter().any(|muscle| muscle == region)
    }
}

/// Suggests a machine for a resolved region name.
pub trait EquipmentLookup {
    /// Any one machine targeting `region`, or `None`.
    fn suggest(&self, region: &str) -> Option<Machine>;
}

impl<F> EquipmentLookup for F
where
    F: Fn(&str) -> Option<Machine>,
{
    fn suggest(&self, region: &str) -> Option<Machine> {
        self(region)
    }
}

/// Route for the "view equipment for region" action.
pub fn equipment_route(region: &str) -> String {
    format!("{EQUIPMENT_ROUTE}?muscle={}", urlencoding::encode(region))
}
