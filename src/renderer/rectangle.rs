//! # Rectangle Renderer
//!
//! Batched solid rectangle fills for the menu buttons. Rectangles are given in window pixels with
//! the origin at the top-left, converted to normalized device coordinates on the CPU, and drawn
//! with a single indexed draw call per frame. A non-zero corner radius rounds the corners in the
//! fragment shader.

use crate::game::button::Bounds;
use std::mem;
use wgpu::{
    self, BlendState, BufferUsages, ColorTargetState, ColorWrites, Device, FragmentState,
    MultisampleState, PrimitiveState, RenderPass, RenderPipeline, VertexAttribute,
    VertexBufferLayout, VertexFormat, VertexState, util::DeviceExt,
};

/// Per-vertex data for a rectangle corner.
///
/// `#[repr(C)]` keeps the layout in sync with `Vertex::desc`; the trailing padding rounds the
/// stride to 48 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    /// Position in normalized device coordinates.
    position: [f32; 2],
    /// Linear RGBA color.
    color: [f32; 4],
    /// Pixel offset of this corner inside the rectangle.
    uv: [f32; 2],
    /// Rectangle size in pixels.
    rect_size: [f32; 2],
    /// Corner radius in pixels.
    corner_radius: f32,
    _padding: f32,
}

impl Vertex {
    fn desc<'a>() -> VertexBufferLayout<'a> {
        const F2: wgpu::BufferAddress = mem::size_of::<[f32; 2]>() as wgpu::BufferAddress;
        const F4: wgpu::BufferAddress = mem::size_of::<[f32; 4]>() as wgpu::BufferAddress;

        VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: VertexFormat::Float32x2,
                },
                VertexAttribute {
                    offset: F2,
                    shader_location: 1,
                    format: VertexFormat::Float32x4,
                },
                VertexAttribute {
                    offset: F2 + F4,
                    shader_location: 2,
                    format: VertexFormat::Float32x2,
                },
                VertexAttribute {
                    offset: F2 + F4 + F2,
                    shader_location: 3,
                    format: VertexFormat::Float32x2,
                },
                VertexAttribute {
                    offset: F2 + F4 + F2 + F2,
                    shader_location: 4,
                    format: VertexFormat::Float32,
                },
            ],
        }
    }
}

/// A filled rectangle in window pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
    /// Linear RGBA color (0.0 to 1.0).
    pub color: [f32; 4],
    /// Corner radius in pixels, 0.0 for sharp corners.
    pub corner_radius: f32,
}

impl Rectangle {
    /// Creates a rectangle with sharp corners.
    pub fn new(x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) -> Self {
        Self {
            x,
            y,
            width,
            height,
            color,
            corner_radius: 0.0,
        }
    }

    /// Creates a rectangle covering `bounds`.
    pub fn from_bounds(bounds: &Bounds, color: [f32; 4]) -> Self {
        Self::new(
            bounds.x as f32,
            bounds.y as f32,
            bounds.width as f32,
            bounds.height as f32,
            color,
        )
    }

    /// Sets the corner radius.
    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// The four corner vertices (top-left, top-right, bottom-right, bottom-left) for a
    /// `window_width` x `window_height` target.
    fn vertices(&self, window_width: f32, window_height: f32) -> [Vertex; 4] {
        // Screen space has +Y down, NDC has +Y up.
        let x = (self.x / window_width) * 2.0 - 1.0;
        let y = 1.0 - (self.y / window_height) * 2.0;
        let width = (self.width / window_width) * 2.0;
        let height = -(self.height / window_height) * 2.0;

        let corner = |position: [f32; 2], uv: [f32; 2]| Vertex {
            position,
            color: self.color,
            uv,
            rect_size: [self.width, self.height],
            corner_radius: self.corner_radius,
            _padding: 0.0,
        };

        [
            corner([x, y], [0.0, 0.0]),
            corner([x + width, y], [self.width, 0.0]),
            corner([x + width, y + height], [self.width, self.height]),
            corner([x, y + height], [0.0, self.height]),
        ]
    }
}

/// Draws queued rectangles in one batch.
///
/// Usage per frame: [`clear_rectangles`](Self::clear_rectangles), then
/// [`add_rectangle`](Self::add_rectangle) for each fill, then [`render`](Self::render).
pub struct RectangleRenderer {
    render_pipeline: RenderPipeline,
    rectangles: Vec<Rectangle>,
    window_width: f32,
    window_height: f32,
}

impl RectangleRenderer {
    /// Builds the rectangle pipeline for `surface_format` targets of the given size.
    pub fn new(
        device: &Device,
        surface_format: wgpu::TextureFormat,
        window_width: f32,
        window_height: f32,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Rectangle Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/rectangle.wgsl").into()),
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Rectangle Pipeline Layout"),
                bind_group_layouts: &[],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Rectangle Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(ColorTargetState {
                    format: surface_format,
                    // Rounded corners fade out through alpha.
                    blend: Some(BlendState::ALPHA_BLENDING),
                    write_mask: ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        Self {
            render_pipeline,
            rectangles: Vec::new(),
            window_width,
            window_height,
        }
    }

    /// Queues a rectangle for the next [`render`](Self::render).
    pub fn add_rectangle(&mut self, rectangle: Rectangle) {
        self.rectangles.push(rectangle);
    }

    /// Drops all queued rectangles.
    pub fn clear_rectangles(&mut self) {
        self.rectangles.clear();
    }

    /// Draws every queued rectangle with one indexed draw call.
    ///
    /// Vertex and index buffers are created for this call and released once the GPU is done
    /// with them.
    pub fn render(&self, device: &Device, render_pass: &mut RenderPass) {
        if self.rectangles.is_empty() {
            return;
        }

        let (all_vertices, all_indices) =
            batch_geometry(&self.rectangles, self.window_width, self.window_height);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Rectangle Vertex Buffer"),
            contents: bytemuck::cast_slice(&all_vertices),
            usage: BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Rectangle Index Buffer"),
            contents: bytemuck::cast_slice(&all_indices),
            usage: BufferUsages::INDEX,
        });

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..all_indices.len() as u32, 0, 0..1);
    }
}

/// Four vertices and two triangles, (0,1,2) and (0,2,3), per rectangle.
fn batch_geometry(
    rectangles: &[Rectangle],
    window_width: f32,
    window_height: f32,
) -> (Vec<Vertex>, Vec<u16>) {
    let mut vertices = Vec::with_capacity(rectangles.len() * 4);
    let mut indices = Vec::with_capacity(rectangles.len() * 6);

    for (rect_index, rectangle) in rectangles.iter().enumerate() {
        vertices.extend_from_slice(&rectangle.vertices(window_width, window_height));

        let base = (rect_index * 4) as u16;
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_stride_is_48_bytes() {
        assert_eq!(mem::size_of::<Vertex>(), 48);
    }

    #[test]
    fn test_full_window_rectangle_maps_to_ndc_corners() {
        let rect = Rectangle::new(0.0, 0.0, 800.0, 600.0, [1.0; 4]);
        let vertices = rect.vertices(800.0, 600.0);

        assert_eq!(vertices[0].position, [-1.0, 1.0]);
        assert_eq!(vertices[1].position, [1.0, 1.0]);
        assert_eq!(vertices[2].position, [1.0, -1.0]);
        assert_eq!(vertices[3].position, [-1.0, -1.0]);
        assert_eq!(vertices[2].uv, [800.0, 600.0]);
    }

    #[test]
    fn test_batch_indices_offset_per_rectangle() {
        let bounds = Bounds::new(50, 50, 200, 50);
        let rects = vec![
            Rectangle::from_bounds(&bounds, [0.5; 4]),
            Rectangle::from_bounds(&bounds, [0.5; 4]).with_corner_radius(4.0),
        ];
        let (vertices, indices) = batch_geometry(&rects, 800.0, 600.0);

        assert_eq!(vertices.len(), 8);
        assert_eq!(indices, vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
        assert_eq!(vertices[4].corner_radius, 4.0);
    }
}
