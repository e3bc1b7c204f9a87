//! Messages for the region detail panel.

use serde::Serialize;

/// What the detail panel should show after a click or dismiss.
///
/// Serializes as `{"region": "<name>"}` to open the panel, or `{}` to close it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PanelUpdate {
    /// Region to show, `None` to close the panel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl PanelUpdate {
    /// Open the panel for `region`.
    pub fn open(region: impl Into<String>) -> Self {
        Self {
            region: Some(region.into()),
        }
    }

    /// Close the panel.
    pub fn closed() -> Self {
        Self::default()
    }
}
