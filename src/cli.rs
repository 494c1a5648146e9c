// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

use crate::geometry::Primitive;
use crate::scene::RenderMode;
use crate::theme::ThemePreference;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "obj-viewer")]
#[command(about = "OBJ model viewer with orbit controls", long_about = None)]
pub struct Cli {
    /// OBJ file to display
    #[arg(value_name = "MODEL")]
    pub model: Option<PathBuf>,

    /// Show a built-in shape instead of a model file
    #[arg(long, value_enum, conflicts_with = "model")]
    pub primitive: Option<Primitive>,

    /// Draw the model as lit triangles or as a point cloud
    #[arg(long = "render-mode", value_enum)]
    pub render_mode: Option<RenderMode>,

    /// Initial light/dark mode
    #[arg(long, value_enum)]
    pub theme: Option<ThemePreference>,

    /// JSON file overriding camera, grid, light and material defaults
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Point the camera at the model once it has loaded
    #[arg(long = "frame-model")]
    pub frame_model: bool,

    /// Hide the mode toggle button
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}
