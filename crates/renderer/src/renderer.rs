//! Main renderer managing wgpu state and per-frame draw submission.

use crate::{
    camera::{Camera, CameraUniform, LightUniform},
    mesh::Mesh,
    pipeline::{
        create_body_pipeline, create_camera_bind_group_layout, create_ring_pipeline,
        create_sun_pipeline, create_texture_bind_group_layout,
    },
    texture::Texture,
    vertex::InstanceData,
};
use anyhow::Result;
use glam::Mat4;
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

/// Background clear color: near-black space blue.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.05,
    a: 1.0,
};

/// Which pipeline a draw goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    /// Point-lit planet.
    Body,
    /// Unlit, full-bright sun.
    Sun,
    /// Translucent ring (alpha blend, no culling).
    Ring,
}

/// An in-flight frame: acquired surface texture plus its command encoder.
pub struct Frame {
    output: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
    encoder: wgpu::CommandEncoder,
}

/// Main renderer state.
pub struct Renderer {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,
    pub window: Arc<Window>,

    // Pipelines
    body_pipeline: wgpu::RenderPipeline,
    sun_pipeline: wgpu::RenderPipeline,
    ring_pipeline: wgpu::RenderPipeline,

    // Uniforms. The light buffer is written once at creation and kept alive
    // by the bind group; only the camera buffer is updated per frame.
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,

    texture_bind_group_layout: wgpu::BindGroupLayout,

    /// Shared instance buffer; each draw writes its model matrix to a unique
    /// slot so the `queue.write_buffer` calls of one frame never overwrite
    /// each other (all writes land before the command buffer executes).
    instance_buffer: wgpu::Buffer,
    max_instances: u32,
    frame_instance_offset: u32,

    // Depth buffer
    depth_texture: Texture,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, vsync: bool) -> Result<Self> {
        let size = window.inner_size();

        // Vulkan/DX12 on Windows/Linux, Metal on macOS.
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        log::info!("Using GPU: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let present_mode = if vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Camera and light uniforms; the light never moves, written once.
        let camera_uniform = CameraUniform::new();
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let light_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Light Buffer"),
            contents: bytemuck::cast_slice(&[LightUniform::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group_layout = create_camera_bind_group_layout(&device);
        let texture_bind_group_layout = create_texture_bind_group_layout(&device);

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: light_buffer.as_entire_binding(),
                },
            ],
        });

        let body_pipeline = create_body_pipeline(
            &device,
            &config,
            &camera_bind_group_layout,
            &texture_bind_group_layout,
        );
        let sun_pipeline = create_sun_pipeline(
            &device,
            &config,
            &camera_bind_group_layout,
            &texture_bind_group_layout,
        );
        let ring_pipeline = create_ring_pipeline(
            &device,
            &config,
            &camera_bind_group_layout,
            &texture_bind_group_layout,
        );

        // One slot per draw; a sun, eight planets and a ring use ten.
        let max_instances = 64u32;
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (max_instances as usize * std::mem::size_of::<InstanceData>())
                as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let depth_texture =
            Texture::create_depth_texture(&device, config.width, config.height, "Depth Texture");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            window,
            body_pipeline,
            sun_pipeline,
            ring_pipeline,
            camera_uniform,
            camera_buffer,
            camera_bind_group,
            texture_bind_group_layout,
            instance_buffer,
            max_instances,
            frame_instance_offset: 0,
            depth_texture,
        })
    }

    /// Reconfigure the surface and depth buffer. Zero-sized reports (window
    /// minimized) are ignored.
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = Texture::create_depth_texture(
                &self.device,
                self.config.width,
                self.config.height,
                "Depth Texture",
            );
        }
    }

    /// Write the camera uniform for this frame.
    pub fn update_camera(&mut self, camera: &Camera) {
        self.camera_uniform.update(camera);
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );
    }

    /// Build a texture bind group for a body. A missing or undecodable file
    /// logs a warning and falls back to a flat white pixel; a bad asset never
    /// takes the viewer down.
    pub fn load_texture_bind_group(&self, path: &str) -> wgpu::BindGroup {
        let texture = match Texture::from_path(&self.device, &self.queue, path) {
            Ok(texture) => texture,
            Err(e) => {
                log::warn!("{e}; using fallback texture");
                Texture::white_pixel(&self.device, &self.queue)
            }
        };
        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(path),
            layout: &self.texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        })
    }

    /// Acquire the next surface texture and clear color + depth.
    pub fn begin_frame(&mut self) -> Result<Frame, wgpu::SurfaceError> {
        self.frame_instance_offset = 0;

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        // Clear pass; every draw afterwards loads.
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Clear Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        Ok(Frame {
            output,
            view,
            encoder,
        })
    }

    /// Draw one mesh with the given model matrix and texture.
    pub fn draw(
        &mut self,
        frame: &mut Frame,
        kind: DrawKind,
        mesh: &Mesh,
        texture: &wgpu::BindGroup,
        model: Mat4,
    ) {
        if self.frame_instance_offset >= self.max_instances {
            log::warn!("Instance buffer exhausted; dropping draw");
            return;
        }
        let offset = self.frame_instance_offset;
        self.frame_instance_offset += 1;

        self.queue.write_buffer(
            &self.instance_buffer,
            offset as u64 * std::mem::size_of::<InstanceData>() as u64,
            bytemuck::cast_slice(&[InstanceData::from(model)]),
        );

        let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Draw Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        let pipeline = match kind {
            DrawKind::Body => &self.body_pipeline,
            DrawKind::Sun => &self.sun_pipeline,
            DrawKind::Ring => &self.ring_pipeline,
        };
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, &self.camera_bind_group, &[]);
        pass.set_bind_group(1, texture, &[]);
        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..mesh.num_indices, 0, offset..offset + 1);
    }

    /// Submit the frame's commands and present.
    pub fn finish_frame(&mut self, frame: Frame) {
        self.queue.submit(std::iter::once(frame.encoder.finish()));
        frame.output.present();
    }
}
