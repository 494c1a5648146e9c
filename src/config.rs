use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::camera::CameraSettings;
use crate::cli::Cli;
use crate::geometry::Primitive;
use crate::scene::grid::{DEFAULT_GRID_DIVISIONS, DEFAULT_GRID_SIZE};
use crate::scene::axes::DEFAULT_AXES_SIZE;
use crate::scene::{Lighting, Material, RenderMode};
use crate::theme::ThemePreference;

pub const DEFAULT_MODEL_PATH: &str = "models/TopOptimized.obj";

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub size: f32,
    pub divisions: u32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            divisions: DEFAULT_GRID_DIVISIONS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AxesSettings {
    pub enabled: bool,
    pub size: f32,
}

impl Default for AxesSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            size: DEFAULT_AXES_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// 1 disables multisampling; 4 is the only other count wgpu guarantees
    pub msaa_samples: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "OBJ Viewer".to_string(),
            width: 1280,
            height: 720,
            msaa_samples: 4,
        }
    }
}

/// Where the displayed geometry comes from
#[derive(Debug, Clone, PartialEq)]
pub enum ModelSource {
    File(PathBuf),
    Primitive(Primitive),
}

/// Complete viewer configuration: defaults, then the JSON file, then CLI flags
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub model: Option<PathBuf>,
    pub primitive: Option<Primitive>,
    pub render_mode: RenderMode,
    pub theme: ThemePreference,
    pub frame_model: bool,
    pub show_ui: bool,
    pub window: WindowSettings,
    pub camera: CameraSettings,
    pub grid: GridSettings,
    pub axes: AxesSettings,
    pub lighting: Lighting,
    pub material: Material,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            model: None,
            primitive: None,
            render_mode: RenderMode::default(),
            theme: ThemePreference::default(),
            frame_model: false,
            show_ui: true,
            window: WindowSettings::default(),
            camera: CameraSettings::default(),
            grid: GridSettings::default(),
            axes: AxesSettings::default(),
            lighting: Lighting::default(),
            material: Material::default(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid viewer config")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_json(&json).with_context(|| format!("In config file: {:?}", path))
    }

    /// Build the effective configuration for a command line
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        Ok(config)
    }

    /// Command-line flags win over anything from the file
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(model) = &cli.model {
            self.model = Some(model.clone());
            self.primitive = None;
        }
        if let Some(primitive) = cli.primitive {
            self.primitive = Some(primitive);
            self.model = None;
        }
        if let Some(mode) = cli.render_mode {
            self.render_mode = mode;
        }
        if let Some(theme) = cli.theme {
            self.theme = theme;
        }
        if cli.frame_model {
            self.frame_model = true;
        }
        if cli.no_ui {
            self.show_ui = false;
        }
    }

    /// Primitive if one is requested, else the model path (or the default one)
    pub fn source(&self) -> ModelSource {
        match (&self.primitive, &self.model) {
            (Some(primitive), _) => ModelSource::Primitive(*primitive),
            (None, Some(path)) => ModelSource::File(path.clone()),
            (None, None) => ModelSource::File(PathBuf::from(DEFAULT_MODEL_PATH)),
        }
    }

    pub fn msaa_samples(&self) -> u32 {
        if self.window.msaa_samples >= 4 {
            4
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_source_is_bundled_model() {
        let config = ViewerConfig::default();
        assert_eq!(
            config.source(),
            ModelSource::File(PathBuf::from(DEFAULT_MODEL_PATH))
        );
    }

    #[test]
    fn test_msaa_is_one_or_four() {
        let mut config = ViewerConfig::default();
        for (requested, expected) in [(0, 1), (1, 1), (2, 1), (4, 4), (8, 4)] {
            config.window.msaa_samples = requested;
            assert_eq!(config.msaa_samples(), expected);
        }
    }

    #[test]
    fn test_unknown_top_level_field_rejected() {
        assert!(ViewerConfig::from_json(r#"{ "grdi": {} }"#).is_err());
    }
}
