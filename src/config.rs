use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::style::Variant;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV_VAR: &str = "OVERLAY_PAINT_CONFIG";

/// Largest canvas edge accepted, in points.
pub const MAX_CANVAS_EDGE: f32 = 4096.0;

/// Startup configuration. Missing fields take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Variant used when no persisted choice exists
    pub variant: Variant,
    /// Image shown under the canvas; a generated placeholder when unset
    pub backdrop_path: Option<PathBuf>,
    /// Image on the reverse face of the flip card
    pub card_back_path: Option<PathBuf>,
    /// Seconds for one half-turn of the flip card
    pub flip_duration_secs: f32,
    /// Canvas size in points
    pub canvas_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            backdrop_path: None,
            card_back_path: None,
            flip_duration_secs: 3.0,
            canvas_size: [200.0, 300.0],
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject sizes and durations the canvas and flip animation cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let [width, height] = self.canvas_size;
        let edge_ok = |edge: f32| edge > 0.0 && edge <= MAX_CANVAS_EDGE;
        if !(edge_ok(width) && edge_ok(height)) {
            return Err(ConfigError::Invalid(format!(
                "canvas_size must be within (0, {MAX_CANVAS_EDGE}], got [{width}, {height}]"
            )));
        }
        let duration = self.flip_duration_secs;
        if !(duration > 0.0 && duration.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "flip_duration_secs must be positive, got {duration}"
            )));
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`], falling back to defaults.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        match Self::load(Path::new(&path)) {
            Ok(config) => {
                log::info!("Loaded config from {}", Path::new(&path).display());
                config
            }
            Err(err) => {
                log::warn!("{err}; using default config");
                Self::default()
            }
        }
    }

    pub fn canvas_size(&self) -> egui::Vec2 {
        egui::vec2(self.canvas_size[0], self.canvas_size[1])
    }
}
