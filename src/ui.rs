use std::sync::Arc;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::core::GpuContext;
use crate::math::hex_to_color32;
use crate::theme::Theme;

/// Where the mode toggle sits, in logical points from the top-left corner
pub const TOGGLE_POSITION: egui::Pos2 = egui::pos2(10.0, 10.0);

/// Tessellated UI for one frame, ready to paint
pub struct OverlayFrame {
    primitives: Vec<egui::ClippedPrimitive>,
    textures_delta: egui::TexturesDelta,
    screen: egui_wgpu::ScreenDescriptor,
    /// The mode toggle button was clicked during this frame
    pub toggle_clicked: bool,
}

/// egui overlay carrying the light/dark toggle button
pub struct Overlay {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl Overlay {
    pub fn new(gpu: &GpuContext, window: &Window, format: wgpu::TextureFormat) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        // the scene pass resolves MSAA into the surface, so the UI draws single-sampled
        let renderer =
            egui_wgpu::Renderer::new(gpu.device(), format, egui_wgpu::RendererOptions::default());

        Self {
            ctx,
            state,
            renderer,
        }
    }

    /// Returns true when egui consumed the event
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// The pointer is over the UI; camera drags should not start
    pub fn wants_pointer(&self) -> bool {
        self.ctx.wants_pointer_input() || self.ctx.is_pointer_over_area()
    }

    /// Lay out the overlay for `theme`
    pub fn run(&mut self, window: &Arc<Window>, theme: Theme) -> OverlayFrame {
        let palette = theme.palette();
        let mut visuals = match theme {
            Theme::Light => egui::Visuals::light(),
            Theme::Dark => egui::Visuals::dark(),
        };
        visuals.override_text_color = Some(hex_to_color32(palette.text));
        self.ctx.set_visuals(visuals);

        let mut toggle_clicked = false;
        let raw_input = self.state.take_egui_input(window);
        let full_output = self.ctx.run(raw_input, |ctx| {
            egui::Area::new(egui::Id::new("mode_toggle"))
                .fixed_pos(TOGGLE_POSITION)
                .show(ctx, |ui| {
                    let button = egui::Button::new(egui::RichText::new(theme.icon()).size(20.0))
                        .fill(hex_to_color32(palette.background));
                    if ui
                        .add(button)
                        .on_hover_text("Toggle Dark/Light Mode")
                        .clicked()
                    {
                        toggle_clicked = true;
                    }
                });
        });

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let pixels_per_point = self.ctx.pixels_per_point();
        let size = window.inner_size();
        OverlayFrame {
            primitives: self.ctx.tessellate(full_output.shapes, pixels_per_point),
            textures_delta: full_output.textures_delta,
            screen: egui_wgpu::ScreenDescriptor {
                size_in_pixels: [size.width, size.height],
                pixels_per_point,
            },
            toggle_clicked,
        }
    }

    /// Record the UI pass on top of `view`; returns egui's own command buffers,
    /// which must be submitted before `encoder`
    pub fn paint(
        &mut self,
        gpu: &GpuContext,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        frame: OverlayFrame,
    ) -> Vec<wgpu::CommandBuffer> {
        for (id, image_delta) in &frame.textures_delta.set {
            self.renderer
                .update_texture(gpu.device(), gpu.queue(), *id, image_delta);
        }

        let command_buffers = self.renderer.update_buffers(
            gpu.device(),
            gpu.queue(),
            encoder,
            &frame.primitives,
            &frame.screen,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.renderer.render(
                &mut render_pass.forget_lifetime(),
                &frame.primitives,
                &frame.screen,
            );
        }

        for id in &frame.textures_delta.free {
            self.renderer.free_texture(id);
        }

        command_buffers
    }
}
