//! Bar chart pipeline: one coloured quad per spectrum bar, drawn in NDC.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use winit::window::Window;

use super::gpu::GpuContext;
use crate::error::Result;
use crate::spectrum::Bar;

/// Stroke width of each bar (pixels)
pub const BAR_LINE_WIDTH: f32 = 2.0;

const VERTICES_PER_BAR: usize = 6;

/// Vertex data for the bar pipeline (NDC position + colour)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BarVertex {
    pub position: [f32; 2],
    pub color: [f32; 3],
}

/// Pixel coordinates (origin top-left, y down) to normalized device coordinates
fn to_ndc(x: f32, y: f32, width: f32, height: f32) -> [f32; 2] {
    [x / width * 2.0 - 1.0, 1.0 - y / height * 2.0]
}

/// Triangle list for `bars` on a `width` x `height` pixel surface.
///
/// Each bar is a vertical stroke centred on its column, growing up from the
/// bottom edge. Zero-height bars emit no geometry.
pub fn bar_vertices(bars: &[Bar], width: u32, height: u32, line_width: f32) -> Vec<BarVertex> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let (w, h) = (width as f32, height as f32);
    let half = line_width / 2.0;

    let mut vertices = Vec::with_capacity(bars.len() * VERTICES_PER_BAR);
    for bar in bars.iter().filter(|b| b.height > 0.0) {
        let x = bar.x as f32;
        let top = h - bar.height.min(h);

        let tl = to_ndc(x - half, top, w, h);
        let tr = to_ndc(x + half, top, w, h);
        let bl = to_ndc(x - half, h, w, h);
        let br = to_ndc(x + half, h, w, h);

        for position in [tl, bl, tr, tr, bl, br] {
            vertices.push(BarVertex {
                position,
                color: bar.color,
            });
        }
    }
    vertices
}

/// Rendering system for the spectrum bar chart
pub struct BarRenderSystem {
    gpu: GpuContext,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: usize,
}

impl BarRenderSystem {
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let gpu = GpuContext::new(window).await?;
        let device = &gpu.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Bar Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("bars.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Bar Pipeline Layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Bar Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<BarVertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                        wgpu::VertexAttribute {
                            offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32x3,
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        // Enough for one bar per column at the initial width
        let vertex_capacity = (gpu.config.width as usize * VERTICES_PER_BAR).max(VERTICES_PER_BAR);
        let vertex_buffer = Self::create_vertex_buffer(device, vertex_capacity);

        Ok(Self {
            gpu,
            pipeline,
            vertex_buffer,
            vertex_capacity,
        })
    }

    fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Bar Vertex Buffer"),
            size: (capacity * std::mem::size_of::<BarVertex>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Surface size in physical pixels
    pub fn size(&self) -> (u32, u32) {
        self.gpu.size()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
    }

    /// Draw one frame of bars on a black background
    pub fn render(&mut self, bars: &[Bar]) -> std::result::Result<(), wgpu::SurfaceError> {
        let (width, height) = self.gpu.size();
        let vertices = bar_vertices(bars, width, height, BAR_LINE_WIDTH);

        if vertices.len() > self.vertex_capacity {
            self.vertex_capacity = vertices.len().next_power_of_two();
            self.vertex_buffer = Self::create_vertex_buffer(&self.gpu.device, self.vertex_capacity);
        }
        if !vertices.is_empty() {
            self.gpu
                .queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        }

        let output = self.gpu.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Bar Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Bar Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !vertices.is_empty() {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass.draw(0..vertices.len() as u32, 0..1);
            }
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Recover from a lost or outdated surface
    pub fn reconfigure(&self) {
        self.gpu.reconfigure();
    }
}
