//! WebGPU surface and the flat-color scene pipeline
//!
//! Scene vertices stay in viewport pixels. The vertex shader maps them to clip
//! space using the viewport size from a uniform, and the render pass is
//! letterboxed so the game area keeps its aspect ratio on any canvas.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::scene;
use super::vertex::Vertex;
use crate::error::{Error, Result};
use crate::sim::{RenderSnapshot, Rgb};
use crate::tuning::Viewport;

/// Vertex capacity allocated up front; a busy high-altitude frame fits
const INITIAL_VERTEX_CAPACITY: usize = 8192;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct SceneUniform {
    viewport: [f32; 2],
    _pad: [f32; 2],
}

/// Region of the surface the game area is drawn into, in surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Largest centered rectangle with the viewport's aspect ratio
pub fn letterbox(surface: (u32, u32), viewport: &Viewport) -> Letterbox {
    let (sw, sh) = (surface.0 as f32, surface.1 as f32);
    let scale = (sw / viewport.width).min(sh / viewport.height);
    let (width, height) = (viewport.width * scale, viewport.height * scale);
    Letterbox {
        x: (sw - width) / 2.0,
        y: (sh - height) / 2.0,
        width,
        height,
    }
}

/// Capacity needed to hold `needed` vertices, growing in powers of two
pub fn grown_capacity(current: usize, needed: usize) -> usize {
    if needed <= current {
        current
    } else {
        needed.next_power_of_two()
    }
}

fn clear_color(color: Rgb) -> wgpu::Color {
    let [r, g, b, a] = color.to_rgba(1.0);
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: a as f64,
    }
}

/// Reusable vertex buffer, reallocated only when a frame outgrows it
struct VertexBatch {
    buffer: wgpu::Buffer,
    capacity: usize,
    len: u32,
}

impl VertexBatch {
    fn allocate(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_vertices"),
            size: (capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn new(device: &wgpu::Device) -> Self {
        Self {
            buffer: Self::allocate(device, INITIAL_VERTEX_CAPACITY),
            capacity: INITIAL_VERTEX_CAPACITY,
            len: 0,
        }
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, vertices: &[Vertex]) {
        let capacity = grown_capacity(self.capacity, vertices.len());
        if capacity != self.capacity {
            log::debug!("Growing scene buffer to {} vertices", capacity);
            self.buffer = Self::allocate(device, capacity);
            self.capacity = capacity;
        }
        if !vertices.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(vertices));
        }
        self.len = vertices.len() as u32;
    }
}

/// Main render state
pub struct RenderState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    scene_bind_group: wgpu::BindGroup,
    batch: VertexBatch,
    /// Surface size in pixels
    pub size: (u32, u32),
    /// Logical game area the scene is laid out in
    pub viewport: Viewport,
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        viewport: Viewport,
    ) -> Result<Self> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("skyward-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await
            .map_err(|e| Error::Gpu(format!("failed to create device: {}", e)))?;

        let config = surface_config(&surface, adapter, width, height)?;
        surface.configure(&device, &config);

        let scene_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let scene_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene_uniform"),
            contents: bytemuck::bytes_of(&SceneUniform {
                viewport: [viewport.width, viewport.height],
                _pad: [0.0; 2],
            }),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bind_group"),
            layout: &scene_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });

        let pipeline = scene_pipeline(&device, &scene_layout, config.format);
        let batch = VertexBatch::new(&device);

        log::info!(
            "Renderer ready ({}x{}, {:?}, viewport {}x{})",
            width,
            height,
            config.format,
            viewport.width,
            viewport.height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            scene_bind_group,
            batch,
            size: (width, height),
            viewport,
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Reconfigure the surface at its current size (after `SurfaceError::Lost`)
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Tessellate the snapshot, upload it and present one frame
    ///
    /// Letterbox bars take the snapshot's lower sky color.
    pub fn draw(&mut self, snapshot: &RenderSnapshot) -> std::result::Result<(), wgpu::SurfaceError> {
        let vertices = scene::build(snapshot);
        self.batch.upload(&self.device, &self.queue, &vertices);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let area = letterbox(self.size, &self.viewport);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color(snapshot.sky.bottom)),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if self.batch.len > 0 && area.width >= 1.0 && area.height >= 1.0 {
                pass.set_viewport(area.x, area.y, area.width, area.height, 0.0, 1.0);
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.scene_bind_group, &[]);
                pass.set_vertex_buffer(0, self.batch.buffer.slice(..));
                pass.draw(0..self.batch.len, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

/// Prefer an sRGB format; fall back to whatever the surface offers first
fn surface_config(
    surface: &wgpu::Surface<'static>,
    adapter: &wgpu::Adapter,
    width: u32,
    height: u32,
) -> Result<wgpu::SurfaceConfiguration> {
    let caps = surface.get_capabilities(adapter);
    let format = caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .or_else(|| caps.formats.first())
        .copied()
        .ok_or_else(|| Error::Gpu("surface reports no formats".to_string()))?;
    let alpha_mode = caps
        .alpha_modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);

    Ok(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width,
        height,
        present_mode: wgpu::PresentMode::AutoVsync,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    })
}

/// Alpha-blended triangle list over the scene uniform
fn scene_pipeline(
    device: &wgpu::Device,
    scene_layout: &wgpu::BindGroupLayout,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("scene_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene_pipeline_layout"),
        bind_group_layouts: &[scene_layout],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("scene_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        // Shapes mix windings, so nothing is culled
        primitive: wgpu::PrimitiveState {
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
