use anyhow::{Context, Result};
use wgpu::util::DeviceExt;

use crate::camera::OrbitCamera;
use crate::core::{DisplayContext, GpuContext};
use crate::math::hex_to_clear_color;
use crate::scene::{RenderMode, Scene};
use crate::types::{CameraUniform, LightingUniform, LineVertex, MeshVertex};
use crate::ui::{Overlay, OverlayFrame};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    vertex_count: u32,
    index_count: u32,
}

struct GpuLines {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
}

/// Render targets that follow the surface size
struct Targets {
    depth_view: wgpu::TextureView,
    /// Multisampled color target, resolved into the surface; None without MSAA
    msaa_view: Option<wgpu::TextureView>,
}

/// Forward renderer for the model, the helper lines and the UI overlay
pub struct Renderer {
    gpu: GpuContext,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    sample_count: u32,
    targets: Targets,
    camera_buffer: wgpu::Buffer,
    lighting_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    mesh_pipeline: wgpu::RenderPipeline,
    points_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    model: Option<GpuMesh>,
    lines: Option<GpuLines>,
    model_revision: Option<u64>,
    lines_revision: Option<u64>,
}

impl Renderer {
    pub fn new(
        gpu: GpuContext,
        surface: wgpu::Surface<'static>,
        display: DisplayContext,
        requested_samples: u32,
    ) -> Result<Self> {
        let surface_config = Self::create_surface_config(&surface, gpu.adapter(), display)?;
        surface.configure(gpu.device(), &surface_config);

        let sample_count = Self::supported_sample_count(
            gpu.adapter(),
            surface_config.format,
            requested_samples,
        );
        log::info!(
            "Surface {}x{} {:?}, {}x MSAA",
            surface_config.width,
            surface_config.height,
            surface_config.format,
            sample_count
        );

        let device = gpu.device();
        let targets = Self::create_targets(device, &surface_config, sample_count);

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Buffer"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let lighting_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Lighting Buffer"),
            size: std::mem::size_of::<LightingUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bind_group_layout"),
            entries: &[
                Self::uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
                Self::uniform_entry(1, wgpu::ShaderStages::FRAGMENT),
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lighting_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("mesh.wgsl").into()),
        });
        let line_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Line Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("line.wgsl").into()),
        });

        let format = surface_config.format;
        let mesh_pipeline = Self::create_pipeline(
            device,
            "Mesh Pipeline",
            &pipeline_layout,
            &mesh_shader,
            MeshVertex::layout(),
            wgpu::PrimitiveTopology::TriangleList,
            format,
            sample_count,
        );
        let points_pipeline = Self::create_pipeline(
            device,
            "Points Pipeline",
            &pipeline_layout,
            &mesh_shader,
            MeshVertex::layout(),
            wgpu::PrimitiveTopology::PointList,
            format,
            sample_count,
        );
        let line_pipeline = Self::create_pipeline(
            device,
            "Line Pipeline",
            &pipeline_layout,
            &line_shader,
            LineVertex::layout(),
            wgpu::PrimitiveTopology::LineList,
            format,
            sample_count,
        );

        Ok(Self {
            gpu,
            surface,
            surface_config,
            sample_count,
            targets,
            camera_buffer,
            lighting_buffer,
            bind_group,
            mesh_pipeline,
            points_pipeline,
            line_pipeline,
            model: None,
            lines: None,
            model_revision: None,
            lines_revision: None,
        })
    }

    pub fn gpu(&self) -> &GpuContext {
        &self.gpu
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }

    /// Resize the surface and the depth/MSAA targets; zero sizes are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.reconfigure();
    }

    /// Reapply the current configuration, e.g. after the surface was lost
    pub fn reconfigure(&mut self) {
        let device = self.gpu.device();
        self.surface.configure(device, &self.surface_config);
        self.targets = Self::create_targets(device, &self.surface_config, self.sample_count);
    }

    /// Upload whatever geometry changed since the last frame
    pub fn sync(&mut self, scene: &Scene) {
        if self.lines_revision != Some(scene.lines_revision()) {
            let vertices = scene.line_vertices();
            self.lines = (!vertices.is_empty()).then(|| GpuLines {
                vertex_buffer: self.gpu.device().create_buffer_init(
                    &wgpu::util::BufferInitDescriptor {
                        label: Some("Helper Lines"),
                        contents: bytemuck::cast_slice(&vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    },
                ),
                vertex_count: vertices.len() as u32,
            });
            self.lines_revision = Some(scene.lines_revision());
        }

        if self.model_revision != Some(scene.model_revision()) {
            self.model = scene.model().map(|model| {
                let device = self.gpu.device();
                log::debug!(
                    "Uploading {}: {} vertices, {} triangles",
                    model.name,
                    model.mesh.vertices.len(),
                    model.mesh.triangle_count()
                );
                GpuMesh {
                    vertex_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("Model Vertices"),
                        contents: bytemuck::cast_slice(&model.mesh.vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    }),
                    index_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("Model Indices"),
                        contents: bytemuck::cast_slice(&model.mesh.indices),
                        usage: wgpu::BufferUsages::INDEX,
                    }),
                    vertex_count: model.mesh.vertices.len() as u32,
                    index_count: model.mesh.indices.len() as u32,
                }
            });
            self.model_revision = Some(scene.model_revision());
        }
    }

    pub fn render(
        &mut self,
        scene: &Scene,
        camera: &OrbitCamera,
        overlay: Option<(&mut Overlay, OverlayFrame)>,
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        self.sync(scene);

        let queue = self.gpu.queue();
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[camera.to_uniform()]),
        );
        queue.write_buffer(
            &self.lighting_buffer,
            0,
            bytemuck::cast_slice(&[scene.lighting.to_uniform(&scene.material)]),
        );

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let (color_view, resolve_target) = match &self.targets.msaa_view {
                Some(msaa) => (msaa, Some(&view)),
                None => (&view, None),
            };

            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(hex_to_clear_color(scene.background)),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, &self.bind_group, &[]);

            if let Some(lines) = &self.lines {
                render_pass.set_pipeline(&self.line_pipeline);
                render_pass.set_vertex_buffer(0, lines.vertex_buffer.slice(..));
                render_pass.draw(0..lines.vertex_count, 0..1);
            }

            if let Some(model) = &self.model {
                render_pass.set_vertex_buffer(0, model.vertex_buffer.slice(..));
                match scene.render_mode {
                    RenderMode::Mesh => {
                        render_pass.set_pipeline(&self.mesh_pipeline);
                        render_pass
                            .set_index_buffer(model.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                        render_pass.draw_indexed(0..model.index_count, 0, 0..1);
                    }
                    RenderMode::Points => {
                        render_pass.set_pipeline(&self.points_pipeline);
                        render_pass.draw(0..model.vertex_count, 0..1);
                    }
                }
            }
        }

        let mut command_buffers = Vec::new();
        if let Some((overlay, frame)) = overlay {
            command_buffers = overlay.paint(&self.gpu, &mut encoder, &view, frame);
        }
        command_buffers.push(encoder.finish());

        self.gpu.queue().submit(command_buffers);
        output.present();
        Ok(())
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        display: DisplayContext,
    ) -> Result<wgpu::SurfaceConfiguration> {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("Surface reports no supported formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: display.width.max(1),
            height: display.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        })
    }

    fn supported_sample_count(
        adapter: &wgpu::Adapter,
        format: wgpu::TextureFormat,
        requested: u32,
    ) -> u32 {
        if requested <= 1 {
            return 1;
        }
        let color = adapter.get_texture_format_features(format).flags;
        let depth = adapter.get_texture_format_features(DEPTH_FORMAT).flags;
        if color.sample_count_supported(requested) && depth.sample_count_supported(requested) {
            requested
        } else {
            log::warn!("{}x MSAA unsupported for {:?}, disabling", requested, format);
            1
        }
    }

    fn create_targets(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        sample_count: u32,
    ) -> Targets {
        let size = wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        };

        let depth = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size,
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        let msaa_view = (sample_count > 1).then(|| {
            device
                .create_texture(&wgpu::TextureDescriptor {
                    label: Some("MSAA Color Texture"),
                    size,
                    mip_level_count: 1,
                    sample_count,
                    dimension: wgpu::TextureDimension::D2,
                    format: config.format,
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                    view_formats: &[],
                })
                .create_view(&wgpu::TextureViewDescriptor::default())
        });

        Targets {
            depth_view: depth.create_view(&wgpu::TextureViewDescriptor::default()),
            msaa_view,
        }
    }

    fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages) -> wgpu::BindGroupLayoutEntry {
        wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn create_pipeline(
        device: &wgpu::Device,
        label: &str,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        vertex_layout: wgpu::VertexBufferLayout<'static>,
        topology: wgpu::PrimitiveTopology,
        format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }
}
