use anyhow::Result;
use glam::Vec3;
use liftmap_advisor::HighlightStyle;
use liftmap_camera::{OrbitCamera, Viewport};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/liftmap.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub viewport: ViewportConfig,
    pub camera: CameraConfig,
    pub model: ModelConfig,
    pub highlight: HighlightConfig,
    pub data: DataConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Initial orbit camera. Angles are in degrees.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraConfig {
    pub target: [f32; 3],
    pub distance: f32,
    pub yaw_degrees: f32,
    pub pitch_degrees: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            target: [0.0, 0.9, 0.0],
            distance: 3.0,
            yaw_degrees: 0.0,
            pitch_degrees: 0.0,
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Scene file to load. The built-in mannequin is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Height the model is scaled to; region boxes are authored for it.
    pub target_height: f32,
    pub normalize: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: None,
            target_height: 1.8,
            normalize: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub radius: f32,
    pub color: [f32; 4],
}

impl Default for HighlightConfig {
    fn default() -> Self {
        let style = HighlightStyle::default();
        Self {
            radius: style.radius,
            color: style.color,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    /// Region catalog JSON. The built-in catalog is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<PathBuf>,
    /// Machine directory JSON. No suggestions are made when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machines: Option<PathBuf>,
}

impl AdvisorConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<AdvisorConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    AdvisorConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!(
                        "Advisor config not found at {}. Using defaults",
                        path.display()
                    );
                }
                AdvisorConfig::default()
            }
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.viewport.width, self.viewport.height)
    }

    pub fn camera(&self) -> OrbitCamera {
        let camera = &self.camera;
        let mut orbit = OrbitCamera {
            target: Vec3::from_array(camera.target),
            distance: camera.distance,
            yaw: 0.0,
            pitch: 0.0,
            fov: camera.fov_degrees.clamp(1.0, 179.0).to_radians(),
            near: camera.near,
            far: camera.far,
        };
        if !(orbit.near > 0.0 && orbit.far > orbit.near) {
            warn!(
                near = camera.near,
                far = camera.far,
                "Invalid clip planes in camera config. Using defaults"
            );
            let defaults = OrbitCamera::default();
            orbit.near = defaults.near;
            orbit.far = defaults.far;
        }
        // Configured pose obeys the orbit/zoom clamps
        orbit.distance = 1.0;
        orbit.zoom(camera.distance);
        orbit.orbit(
            camera.yaw_degrees.to_radians(),
            camera.pitch_degrees.to_radians(),
        );
        orbit
    }

    pub fn highlight_style(&self) -> HighlightStyle {
        HighlightStyle {
            radius: self.highlight.radius,
            color: self.highlight.color,
        }
    }
}
