use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::camera::OrbitCamera;
use crate::config::{ModelSource, ViewerConfig};
use crate::core::{
    orbit_gesture, Button, Clock, Controller, DisplayContext, GpuContext, OrbitGesture,
    WinitController,
};
use crate::geometry::MeshData;
use crate::loaders::{LoadStatus, ModelLoad};
use crate::renderer::Renderer;
use crate::scene::{AxesHelper, Scene};
use crate::theme::{Theme, ThemeState};
use crate::ui::Overlay;

/// GPU-side state, created once the window exists
struct Gpu {
    renderer: Renderer,
    overlay: Option<Overlay>,
}

/// The viewer application: one window, one scene, orbit controls
pub struct App {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,
    scene: Scene,
    camera: OrbitCamera,
    theme: ThemeState,
    input: WinitController,
    clock: Clock,
    pending_load: Option<ModelLoad>,
}

impl App {
    pub fn new(config: ViewerConfig) -> Self {
        let mut scene = Scene::new(config.grid.size, config.grid.divisions);
        scene.lighting = config.lighting;
        scene.material = config.material;
        scene.render_mode = config.render_mode;
        scene.set_axes(
            config
                .axes
                .enabled
                .then(|| AxesHelper::new(config.axes.size)),
        );

        let aspect = config.window.width as f32 / config.window.height.max(1) as f32;
        let camera = OrbitCamera::new(&config.camera, aspect);
        let theme = ThemeState::new(config.theme, None);

        Self {
            config,
            window: None,
            gpu: None,
            scene,
            camera,
            theme,
            input: WinitController::new(),
            clock: Clock::new(),
            pending_load: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_title(self.config.window.title.clone())
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        self.config.window.width,
                        self.config.window.height,
                    )),
            )?,
        );

        let (gpu, surface) = pollster::block_on(GpuContext::new_with_surface(window.clone()))?;
        let mut display = DisplayContext::from(window.inner_size());
        display.scale_factor = window.scale_factor() as f32;
        let renderer = Renderer::new(gpu, surface, display, self.config.msaa_samples())?;
        let overlay = self
            .config
            .show_ui
            .then(|| Overlay::new(renderer.gpu(), &window, renderer.surface_format()));

        self.theme = ThemeState::new(self.config.theme, window.theme());
        self.apply_theme(self.theme.current());
        log::info!("Starting in {} mode", self.theme.current().name());

        match self.config.source() {
            ModelSource::Primitive(primitive) => {
                self.install_model(format!("{:?}", primitive), primitive.build());
            }
            ModelSource::File(path) => {
                log::info!("Loading model {:?}", path);
                self.pending_load = Some(ModelLoad::spawn(path)?);
            }
        }

        self.gpu = Some(Gpu { renderer, overlay });
        self.resize(window.inner_size());
        self.window = Some(window);
        Ok(())
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.scene.set_mode(theme);
    }

    fn toggle_theme(&mut self) {
        let theme = self.theme.toggle();
        log::debug!("Switched to {} mode", theme.name());
        self.apply_theme(theme);
    }

    fn install_model(&mut self, name: String, mesh: MeshData) {
        if !self.scene.set_model(name.clone(), mesh) {
            log::warn!("Model {} has no geometry", name);
            return;
        }
        if self.config.frame_model {
            self.frame_model();
        }
    }

    fn frame_model(&mut self) {
        if let Some(model) = self.scene.model() {
            self.camera.frame_bounds(&model.bounds);
        }
    }

    fn poll_model_load(&mut self) {
        let Some(mut load) = self.pending_load.take() else {
            return;
        };

        match load.poll() {
            LoadStatus::Pending => self.pending_load = Some(load),
            LoadStatus::Ready(Ok(model)) => {
                log::info!(
                    "Loaded {:?}: {} objects, {} triangles{}",
                    model.path,
                    model.object_count,
                    model.mesh.triangle_count(),
                    if model.generated_normals {
                        " (normals generated)"
                    } else {
                        ""
                    }
                );
                self.install_model(model.path.display().to_string(), model.mesh);
            }
            LoadStatus::Ready(Err(e)) => {
                log::error!("Failed to load model {:?}: {:#}", load.path(), e);
            }
            LoadStatus::Finished => {}
        }
    }

    fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        let display = DisplayContext::from(size);
        if display.is_empty() {
            return;
        }
        if let Some(gpu) = &mut self.gpu {
            gpu.renderer.resize(display.width, display.height);
        }
        self.camera.set_aspect(display.width, display.height);
    }

    /// Apply this frame's accumulated input to the camera and the mode
    fn update_input(&mut self, event_loop: &ActiveEventLoop) {
        if self.input.was_pressed(Button::Escape) {
            event_loop.exit();
        }
        if self.input.was_pressed(Button::KeyT) {
            self.toggle_theme();
        }
        if self.input.was_pressed(Button::KeyF) {
            self.frame_model();
        }

        let over_ui = self
            .gpu
            .as_ref()
            .and_then(|gpu| gpu.overlay.as_ref())
            .is_some_and(|overlay| overlay.wants_pointer());
        if !over_ui {
            match orbit_gesture(&self.input) {
                OrbitGesture::Rotate(dx, dy) => self.camera.rotate(dx, dy),
                OrbitGesture::Pan(dx, dy) => self.camera.pan(dx, dy),
                OrbitGesture::Idle => {}
            }
            let scroll = self.input.scroll_delta();
            if scroll != 0.0 {
                self.camera.zoom(scroll);
            }
        }

        self.input.reset_deltas();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.clock.tick();
        self.poll_model_load();
        self.update_input(event_loop);

        let (Some(window), Some(gpu)) = (&self.window, &mut self.gpu) else {
            return;
        };

        let frame = gpu
            .overlay
            .as_mut()
            .map(|overlay| overlay.run(window, self.theme.current()));
        let toggle_clicked = frame.as_ref().is_some_and(|f| f.toggle_clicked);

        let result = gpu.renderer.render(
            &self.scene,
            &self.camera,
            gpu.overlay.as_mut().zip(frame),
        );

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Surface out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("Skipping frame: {:?}", e),
        }

        if toggle_clicked {
            self.toggle_theme();
        }
    }
}

/// Button releases always reach the controller so a drag never sticks
fn is_release(event: &WindowEvent) -> bool {
    match event {
        WindowEvent::MouseInput { state, .. } => *state == ElementState::Released,
        WindowEvent::KeyboardInput { event, .. } => event.state == ElementState::Released,
        WindowEvent::Focused(false) | WindowEvent::CursorLeft { .. } => true,
        _ => false,
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("Failed to initialize viewer: {:#}", e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui see the event first
        let consumed = match (&mut self.gpu, &self.window) {
            (Some(Gpu { overlay: Some(overlay), .. }), Some(window)) => {
                overlay.handle_event(window, &event)
            }
            _ => false,
        };
        if !consumed || is_release(&event) {
            self.input.process_event(&event);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => self.resize(size),
            WindowEvent::ThemeChanged(system) => {
                if let Some(theme) = self.theme.system_changed(system) {
                    log::info!("System theme changed, switching to {} mode", theme.name());
                    self.apply_theme(theme);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemePreference;

    #[test]
    fn test_new_app_applies_config_to_scene() {
        let mut config = ViewerConfig::default();
        config.axes.enabled = false;
        config.material.metalness = 0.2;
        let app = App::new(config);

        assert!(app.scene().axes().is_none());
        assert_eq!(app.scene().material.metalness, 0.2);
        assert!(app.scene().model().is_none());
    }

    #[test]
    fn test_forced_theme_ignores_missing_system_theme() {
        let config = ViewerConfig {
            theme: ThemePreference::Dark,
            ..Default::default()
        };
        let app = App::new(config);
        assert_eq!(app.theme(), Theme::Dark);
    }

    #[test]
    fn test_install_model_frames_when_requested() {
        let config = ViewerConfig {
            frame_model: true,
            ..Default::default()
        };
        let mut app = App::new(config);
        let mesh = crate::geometry::cube(2.0);
        app.install_model("cube".to_string(), mesh);

        assert!(app.scene.model().is_some());
        assert!(app.camera.target.length() < 1e-4);
        // a 2-unit cube fits well inside the default 120-unit orbit
        assert!(app.camera.distance < 10.0);
    }

    #[test]
    fn test_empty_model_is_rejected() {
        let mut app = App::new(ViewerConfig::default());
        app.install_model("empty".to_string(), MeshData::default());
        assert!(app.scene.model().is_none());
    }

    #[test]
    fn test_release_events_always_reach_controller() {
        assert!(is_release(&WindowEvent::Focused(false)));
        assert!(!is_release(&WindowEvent::Focused(true)));
    }
}
