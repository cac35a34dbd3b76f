//! Instanced 2D shape rendering
//!
//! Scenes collect points (filled discs), line segments and triangles into a
//! [`ShapeBatch`] every frame; [`ShapeRenderer`] uploads and draws them in a
//! single pass: triangles first, then lines, then discs on top.

use crate::{create_uniform_buffer, Camera2D, CameraUniform, GraphicsContext, Vertex};
use glam::Vec2;
use std::f32::consts::TAU;
use wgpu::util::DeviceExt;

/// Instance data for a filled disc
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

impl PointInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        2 => Float32x3,  // position
        3 => Float32,    // size
        4 => Float32x4,  // color
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Quad vertex for disc billboards
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct QuadVertex {
    position: [f32; 2],
}

impl QuadVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

const QUAD_VERTICES: &[QuadVertex] = &[
    QuadVertex { position: [-1.0, -1.0] },
    QuadVertex { position: [1.0, -1.0] },
    QuadVertex { position: [1.0, 1.0] },
    QuadVertex { position: [-1.0, -1.0] },
    QuadVertex { position: [1.0, 1.0] },
    QuadVertex { position: [-1.0, 1.0] },
];

/// Convert a `0xRRGGBB` color to linear-ish RGBA floats
pub fn rgb_hex(hex: u32, alpha: f32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
        alpha,
    ]
}

/// Geometry collected for one frame
#[derive(Debug, Default, Clone)]
pub struct ShapeBatch {
    pub points: Vec<PointInstance>,
    pub lines: Vec<Vertex>,
    pub triangles: Vec<Vertex>,
}

impl ShapeBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.lines.clear();
        self.triangles.clear();
    }

    /// Filled disc of the given radius
    pub fn disc(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        self.points.push(PointInstance {
            position: [center.x, center.y, 0.0],
            size: radius,
            color,
        });
    }

    pub fn line(&mut self, a: Vec2, b: Vec2, color: [f32; 4]) {
        self.lines.push(Vertex::new([a.x, a.y, 0.0], color));
        self.lines.push(Vertex::new([b.x, b.y, 0.0], color));
    }

    pub fn polyline(&mut self, points: &[Vec2], color: [f32; 4]) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], color);
        }
    }

    /// Dashed line; `dash` and `gap` are world lengths
    pub fn dashed_polyline(&mut self, points: &[Vec2], dash: f32, gap: f32, color: [f32; 4]) {
        let period = dash + gap;
        if dash <= 0.0 || period <= 0.0 {
            self.polyline(points, color);
            return;
        }
        let mut travelled = 0.0f32;

        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let length = a.distance(b);
            if length <= f32::EPSILON {
                continue;
            }
            let end_of_segment = travelled + length;
            let mut k = (travelled / period).floor();
            while k * period < end_of_segment {
                let start = (k * period).max(travelled);
                let end = (k * period + dash).min(end_of_segment);
                if end > start {
                    self.line(
                        a.lerp(b, (start - travelled) / length),
                        a.lerp(b, (end - travelled) / length),
                        color,
                    );
                }
                k += 1.0;
            }
            travelled = end_of_segment;
        }
    }

    pub fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
        self.triangle_colored([a, b, c], [color, color, color]);
    }

    pub fn triangle_colored(&mut self, corners: [Vec2; 3], colors: [[f32; 4]; 3]) {
        for (p, color) in corners.iter().zip(colors) {
            self.triangles.push(Vertex::new([p.x, p.y, 0.0], color));
        }
    }

    pub fn filled_rect(&mut self, min: Vec2, max: Vec2, color: [f32; 4]) {
        self.gradient_rect(min, max, color, color);
    }

    /// Rectangle whose color blends from `left` to `right`
    pub fn gradient_rect(&mut self, min: Vec2, max: Vec2, left: [f32; 4], right: [f32; 4]) {
        let bl = min;
        let br = Vec2::new(max.x, min.y);
        let tr = max;
        let tl = Vec2::new(min.x, max.y);
        self.triangle_colored([bl, br, tr], [left, right, right]);
        self.triangle_colored([bl, tr, tl], [left, right, left]);
    }

    pub fn rect_outline(&mut self, min: Vec2, max: Vec2, color: [f32; 4]) {
        let corners = [
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
            min,
        ];
        self.polyline(&corners, color);
    }

    pub fn circle_outline(&mut self, center: Vec2, radius: f32, segments: usize, color: [f32; 4]) {
        let segments = segments.max(3);
        for i in 0..segments {
            let a1 = i as f32 * TAU / segments as f32;
            let a2 = (i + 1) as f32 * TAU / segments as f32;
            self.line(
                center + radius * Vec2::new(a1.cos(), a1.sin()),
                center + radius * Vec2::new(a2.cos(), a2.sin()),
                color,
            );
        }
    }

    /// Disc built from triangles, so it layers with other triangles in push order
    pub fn filled_circle(&mut self, center: Vec2, radius: f32, segments: usize, color: [f32; 4]) {
        let segments = segments.max(3);
        for i in 0..segments {
            let a1 = i as f32 * TAU / segments as f32;
            let a2 = (i + 1) as f32 * TAU / segments as f32;
            self.triangle(
                center,
                center + radius * Vec2::new(a1.cos(), a1.sin()),
                center + radius * Vec2::new(a2.cos(), a2.sin()),
                color,
            );
        }
    }

    /// Fan-triangulated convex polygon
    pub fn convex_polygon(&mut self, outline: &[Vec2], color: [f32; 4]) {
        if outline.len() < 3 {
            return;
        }
        let center = outline.iter().copied().sum::<Vec2>() / outline.len() as f32;
        for (i, &a) in outline.iter().enumerate() {
            let b = outline[(i + 1) % outline.len()];
            self.triangle(center, a, b, color);
        }
    }

    /// Line with a filled triangular head at `to`
    pub fn arrow(&mut self, from: Vec2, to: Vec2, head: f32, color: [f32; 4]) {
        let dir = (to - from).normalize_or_zero();
        if dir == Vec2::ZERO {
            return;
        }
        let base = to - dir * head;
        self.line(from, base, color);
        let side = dir.perp() * head * 0.5;
        self.triangle(to, base + side, base - side, color);
    }

    /// Arrow with heads at both ends
    pub fn double_arrow(&mut self, a: Vec2, b: Vec2, head: f32, color: [f32; 4]) {
        let mid = a.lerp(b, 0.5);
        self.arrow(mid, a, head, color);
        self.arrow(mid, b, head, color);
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.lines.is_empty() && self.triangles.is_empty()
    }
}

/// Maximum element counts the renderer allocates buffers for
#[derive(Debug, Clone, Copy)]
pub struct BatchCapacity {
    pub points: usize,
    pub line_vertices: usize,
    pub triangle_vertices: usize,
}

impl Default for BatchCapacity {
    fn default() -> Self {
        Self {
            points: 2_048,
            line_vertices: 32_768,
            triangle_vertices: 16_384,
        }
    }
}

/// GPU renderer for [`ShapeBatch`] geometry
pub struct ShapeRenderer {
    point_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    triangle_pipeline: wgpu::RenderPipeline,
    quad_buffer: wgpu::Buffer,
    point_buffer: wgpu::Buffer,
    line_buffer: wgpu::Buffer,
    triangle_buffer: wgpu::Buffer,
    capacity: BatchCapacity,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
}

impl ShapeRenderer {
    pub fn new(ctx: &GraphicsContext, capacity: BatchCapacity) -> Self {
        let device = &ctx.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shape Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/shapes.wgsl").into()),
        });

        let camera_buffer =
            create_uniform_buffer(device, &CameraUniform::from_camera_2d(&Camera2D::new(1.0)));

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shape Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout],
            push_constant_ranges: &[],
        });

        let make_pipeline = |label: &str,
                             vs: &str,
                             fs: &str,
                             buffers: &[wgpu::VertexBufferLayout<'static>],
                             topology: wgpu::PrimitiveTopology| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: vs,
                    buffers,
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: fs,
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.config.format,
                        blend: Some(wgpu::BlendState {
                            color: wgpu::BlendComponent {
                                src_factor: wgpu::BlendFactor::SrcAlpha,
                                dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                                operation: wgpu::BlendOperation::Add,
                            },
                            alpha: wgpu::BlendComponent::OVER,
                        }),
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
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
            })
        };

        let point_pipeline = make_pipeline(
            "Point Pipeline",
            "vs_point",
            "fs_point",
            &[QuadVertex::layout(), PointInstance::layout()],
            wgpu::PrimitiveTopology::TriangleList,
        );
        let line_pipeline = make_pipeline(
            "Line Pipeline",
            "vs_flat",
            "fs_flat",
            &[Vertex::layout()],
            wgpu::PrimitiveTopology::LineList,
        );
        let triangle_pipeline = make_pipeline(
            "Triangle Pipeline",
            "vs_flat",
            "fs_flat",
            &[Vertex::layout()],
            wgpu::PrimitiveTopology::TriangleList,
        );

        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Quad Buffer"),
            contents: bytemuck::cast_slice(QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let vertex_buffer = |label: &str, bytes: usize| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: bytes.max(16) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };

        let point_buffer = vertex_buffer(
            "Point Instance Buffer",
            std::mem::size_of::<PointInstance>() * capacity.points,
        );
        let line_buffer = vertex_buffer(
            "Line Buffer",
            std::mem::size_of::<Vertex>() * capacity.line_vertices,
        );
        let triangle_buffer = vertex_buffer(
            "Triangle Buffer",
            std::mem::size_of::<Vertex>() * capacity.triangle_vertices,
        );

        Self {
            point_pipeline,
            line_pipeline,
            triangle_pipeline,
            quad_buffer,
            point_buffer,
            line_buffer,
            triangle_buffer,
            capacity,
            camera_buffer,
            camera_bind_group,
        }
    }

    pub fn update_camera(&self, queue: &wgpu::Queue, camera: &Camera2D) {
        let uniform = CameraUniform::from_camera_2d(camera);
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Upload `batch` and draw it, clearing the target to `clear` first
    pub fn draw(
        &self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        batch: &ShapeBatch,
        clear: wgpu::Color,
    ) {
        let points = &batch.points[..batch.points.len().min(self.capacity.points)];
        let lines = even_prefix(&batch.lines, self.capacity.line_vertices, 2);
        let triangles = even_prefix(&batch.triangles, self.capacity.triangle_vertices, 3);

        if points.len() < batch.points.len()
            || lines.len() < batch.lines.len()
            || triangles.len() < batch.triangles.len()
        {
            log::debug!("shape batch truncated to renderer capacity");
        }

        if !points.is_empty() {
            queue.write_buffer(&self.point_buffer, 0, bytemuck::cast_slice(points));
        }
        if !lines.is_empty() {
            queue.write_buffer(&self.line_buffer, 0, bytemuck::cast_slice(lines));
        }
        if !triangles.is_empty() {
            queue.write_buffer(&self.triangle_buffer, 0, bytemuck::cast_slice(triangles));
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Shape Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        if !triangles.is_empty() {
            render_pass.set_pipeline(&self.triangle_pipeline);
            render_pass.set_vertex_buffer(0, self.triangle_buffer.slice(..));
            render_pass.draw(0..triangles.len() as u32, 0..1);
        }

        if !lines.is_empty() {
            render_pass.set_pipeline(&self.line_pipeline);
            render_pass.set_vertex_buffer(0, self.line_buffer.slice(..));
            render_pass.draw(0..lines.len() as u32, 0..1);
        }

        if !points.is_empty() {
            render_pass.set_pipeline(&self.point_pipeline);
            render_pass.set_vertex_buffer(0, self.quad_buffer.slice(..));
            render_pass.set_vertex_buffer(1, self.point_buffer.slice(..));
            render_pass.draw(0..6, 0..points.len() as u32);
        }
    }
}

/// Longest prefix of at most `max` elements whose length is a multiple of `group`
fn even_prefix<T>(items: &[T], max: usize, group: usize) -> &[T] {
    let len = items.len().min(max);
    &items[..len - len % group]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_hex() {
        let c = rgb_hex(0xFF7C00, 0.5);
        assert_eq!(c[0], 1.0);
        assert!((c[1] - 124.0 / 255.0).abs() < 1e-6);
        assert_eq!(c[2], 0.0);
        assert_eq!(c[3], 0.5);
    }

    #[test]
    fn test_rect_outline_has_four_segments() {
        let mut batch = ShapeBatch::new();
        batch.rect_outline(Vec2::ZERO, Vec2::ONE, [1.0; 4]);
        assert_eq!(batch.lines.len(), 8);
    }

    #[test]
    fn test_gradient_rect_is_two_triangles() {
        let mut batch = ShapeBatch::new();
        batch.gradient_rect(Vec2::ZERO, Vec2::ONE, [1.0, 0.0, 0.0, 1.0], [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(batch.triangles.len(), 6);
        // Left corners carry the left color
        assert_eq!(batch.triangles[0].color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(batch.triangles[1].color, [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_filled_shapes_are_triangle_fans() {
        let mut batch = ShapeBatch::new();
        batch.filled_circle(Vec2::ZERO, 1.0, 12, [1.0; 4]);
        assert_eq!(batch.triangles.len(), 12 * 3);

        batch.clear();
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        batch.convex_polygon(&square, [1.0; 4]);
        assert_eq!(batch.triangles.len(), 4 * 3);
        assert_eq!(batch.triangles[0].position, [0.5, 0.5, 0.0]);

        batch.clear();
        batch.convex_polygon(&square[..2], [1.0; 4]);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_arrow_degenerate_is_skipped() {
        let mut batch = ShapeBatch::new();
        batch.arrow(Vec2::ONE, Vec2::ONE, 0.2, [1.0; 4]);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_dashed_polyline_leaves_gaps() {
        let mut batch = ShapeBatch::new();
        batch.dashed_polyline(&[Vec2::ZERO, Vec2::new(1.0, 0.0)], 0.1, 0.1, [1.0; 4]);
        // Five dashes of length 0.1 over a unit line
        assert!(batch.lines.len() >= 10);
        let covered: f32 = batch
            .lines
            .chunks(2)
            .map(|seg| (seg[1].position[0] - seg[0].position[0]).abs())
            .sum();
        assert!((covered - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_even_prefix_keeps_whole_primitives() {
        let items = [0; 10];
        assert_eq!(even_prefix(&items, 8, 3).len(), 6);
        assert_eq!(even_prefix(&items, 100, 2).len(), 10);
    }
}
