use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
struct ClickScriptFile {
    steps: Vec<ClickStep>,
}

/// One user action in a scripted session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClickStep {
    /// The model finished loading. Clicks before this find nothing to hit.
    ModelReady,
    /// Click at a viewport pixel.
    Click { x: f32, y: f32 },
    /// Click wherever a model-space point currently appears on screen.
    ClickPoint { point: [f32; 3] },
    Orbit {
        #[serde(default)]
        yaw_degrees: f32,
        #[serde(default)]
        pitch_degrees: f32,
    },
    /// Pan by fractions of the orbit distance.
    Pan {
        #[serde(default)]
        right: f32,
        #[serde(default)]
        up: f32,
    },
    Zoom { factor: f32 },
    /// Close the detail panel.
    Dismiss,
    /// Follow the "view equipment" action for the open region.
    ViewEquipment,
}

pub struct ClickScript {
    steps: Vec<ClickStep>,
}

impl ClickScript {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> anyhow::Result<Self> {
        let file: ClickScriptFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("click script contains no steps");
        }
        Ok(Self { steps: file.steps })
    }

    pub fn steps(&self) -> &[ClickStep] {
        &self.steps
    }

    /// Whether the script decides when the model becomes ready.
    pub fn controls_model_load(&self) -> bool {
        self.steps.contains(&ClickStep::ModelReady)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_steps() {
        let script = ClickScript::from_json(
            r#"{ "steps": [
                { "action": "click", "x": 10, "y": 20.5 },
                { "action": "model_ready" },
                { "action": "click_point", "point": [0.0, 1.45, 0.2] },
                { "action": "orbit", "yaw_degrees": 30 },
                { "action": "pan", "up": 0.1 },
                { "action": "zoom", "factor": 0.8 },
                { "action": "view_equipment" },
                { "action": "dismiss" }
            ] }"#,
        )
        .unwrap();

        assert_eq!(script.steps().len(), 8);
        assert_eq!(script.steps()[0], ClickStep::Click { x: 10.0, y: 20.5 });
        assert_eq!(
            script.steps()[3],
            ClickStep::Orbit {
                yaw_degrees: 30.0,
                pitch_degrees: 0.0
            }
        );
        assert_eq!(script.steps()[4], ClickStep::Pan { right: 0.0, up: 0.1 });
        assert!(script.controls_model_load());
    }

    #[test]
    fn rejects_empty_and_unknown_steps() {
        assert!(ClickScript::from_json(r#"{ "steps": [] }"#).is_err());
        assert!(ClickScript::from_json(r#"{ "steps": [{ "action": "teleport" }] }"#).is_err());

        let script = ClickScript::from_json(r#"{ "steps": [{ "action": "dismiss" }] }"#).unwrap();
        assert!(!script.controls_model_load());
    }
}
