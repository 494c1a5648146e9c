pub mod axes;
pub mod grid;
pub mod lights;

pub use axes::AxesHelper;
pub use grid::GridHelper;
pub use lights::{AmbientLight, DirectionalLight, HemisphereLight, Lighting, Material};

use serde::Deserialize;

use crate::geometry::MeshData;
use crate::math::AABB;
use crate::theme::Theme;
use crate::types::LineVertex;

/// How the model geometry is rasterized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Mesh,
    Points,
}

#[derive(Debug, Clone)]
pub struct SceneModel {
    pub name: String,
    pub mesh: MeshData,
    pub bounds: AABB,
}

/// Everything drawn each frame
///
/// Geometry changes bump a revision counter so the renderer knows when to
/// re-upload vertex buffers.
#[derive(Debug, Clone)]
pub struct Scene {
    pub background: u32,
    pub lighting: Lighting,
    pub material: Material,
    pub render_mode: RenderMode,
    grid_size: f32,
    grid_divisions: u32,
    grid: Option<GridHelper>,
    axes: Option<AxesHelper>,
    model: Option<SceneModel>,
    lines_revision: u64,
    model_revision: u64,
}

impl Scene {
    pub fn new(grid_size: f32, grid_divisions: u32) -> Self {
        Self {
            background: Theme::Light.palette().background,
            lighting: Lighting::default(),
            material: Material::default(),
            render_mode: RenderMode::default(),
            grid_size,
            grid_divisions,
            grid: None,
            axes: None,
            model: None,
            lines_revision: 0,
            model_revision: 0,
        }
    }

    /// Apply a light/dark mode: background color plus a freshly colored grid
    pub fn set_mode(&mut self, theme: Theme) {
        let palette = theme.palette();
        self.background = palette.background;
        self.set_grid(GridHelper::new(
            self.grid_size,
            self.grid_divisions,
            palette.grid_center,
            palette.grid_lines,
        ));
    }

    /// Attach a grid, detaching the previous one
    pub fn set_grid(&mut self, grid: GridHelper) {
        self.remove_grid();
        self.grid = Some(grid);
        self.lines_revision += 1;
    }

    pub fn remove_grid(&mut self) -> Option<GridHelper> {
        let removed = self.grid.take();
        if removed.is_some() {
            self.lines_revision += 1;
        }
        removed
    }

    pub fn grid(&self) -> Option<&GridHelper> {
        self.grid.as_ref()
    }

    pub fn grid_count(&self) -> usize {
        usize::from(self.grid.is_some())
    }

    pub fn set_axes(&mut self, axes: Option<AxesHelper>) {
        self.axes = axes;
        self.lines_revision += 1;
    }

    pub fn axes(&self) -> Option<&AxesHelper> {
        self.axes.as_ref()
    }

    /// Replace the model; empty meshes are rejected
    pub fn set_model(&mut self, name: impl Into<String>, mesh: MeshData) -> bool {
        let Some(bounds) = mesh.bounds().filter(|_| !mesh.is_empty()) else {
            log::warn!("Ignoring empty mesh");
            return false;
        };
        self.model = Some(SceneModel {
            name: name.into(),
            mesh,
            bounds,
        });
        self.model_revision += 1;
        true
    }

    pub fn model(&self) -> Option<&SceneModel> {
        self.model.as_ref()
    }

    /// Grid followed by axes, as one line list
    pub fn line_vertices(&self) -> Vec<LineVertex> {
        let mut vertices = self.grid.map(|g| g.vertices()).unwrap_or_default();
        if let Some(axes) = &self.axes {
            vertices.extend(axes.vertices());
        }
        vertices
    }

    pub fn lines_revision(&self) -> u64 {
        self.lines_revision
    }

    pub fn model_revision(&self) -> u64 {
        self.model_revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::cube;

    #[test]
    fn test_new_scene_has_no_helpers() {
        let scene = Scene::new(100.0, 30);
        assert_eq!(scene.grid_count(), 0);
        assert!(scene.line_vertices().is_empty());
    }

    #[test]
    fn test_set_model_rejects_empty_mesh() {
        let mut scene = Scene::new(100.0, 30);
        assert!(!scene.set_model("empty", MeshData::default()));
        assert!(scene.model().is_none());
        assert_eq!(scene.model_revision(), 0);
    }

    #[test]
    fn test_set_model_records_bounds() {
        let mut scene = Scene::new(100.0, 30);
        assert!(scene.set_model("cube", cube(4.0)));
        let model = scene.model().unwrap();
        assert_eq!(model.name, "cube");
        assert_eq!(model.bounds.max.x, 2.0);
        assert_eq!(scene.model_revision(), 1);
    }

    #[test]
    fn test_remove_grid_without_grid_keeps_revision() {
        let mut scene = Scene::new(100.0, 30);
        assert!(scene.remove_grid().is_none());
        assert_eq!(scene.lines_revision(), 0);
    }
}
