//! egui overlay drawn on top of the shape pass

use crate::{Camera2D, GraphicsContext};
use egui::{Align2, Color32, FontId};
use glam::Vec2;
use winit::{event::WindowEvent, window::Window};

/// egui context, winit input state and wgpu painter bundled together
pub struct EguiOverlay {
    pub ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl EguiOverlay {
    pub fn new(gfx: &GraphicsContext) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            &gfx.window,
            Some(gfx.window.scale_factor() as f32),
            None,
        );
        let renderer = egui_wgpu::Renderer::new(&gfx.device, gfx.config.format, None, 1);

        Self {
            ctx,
            state,
            renderer,
        }
    }

    /// Feed a window event to egui; returns true when egui consumed it
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Run `build_ui` and paint the result over `view` without clearing it
    pub fn render(
        &mut self,
        gfx: &GraphicsContext,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        build_ui: impl FnMut(&egui::Context),
    ) {
        let raw_input = self.state.take_egui_input(&gfx.window);
        let full_output = self.ctx.run(raw_input, build_ui);

        self.state
            .handle_platform_output(&gfx.window, full_output.platform_output);
        let tris = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.renderer
                .update_texture(&gfx.device, &gfx.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gfx.size.width, gfx.size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        self.renderer.update_buffers(
            &gfx.device,
            &gfx.queue,
            encoder,
            &tris,
            &screen_descriptor,
        );
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}

/// Maps world coordinates to egui points for a given camera and viewport
#[derive(Debug, Clone, Copy)]
pub struct WorldToUi<'a> {
    pub camera: &'a Camera2D,
    pub viewport: [u32; 2],
    pub pixels_per_point: f32,
}

impl<'a> WorldToUi<'a> {
    pub fn new(ctx: &egui::Context, camera: &'a Camera2D, viewport: [u32; 2]) -> Self {
        Self {
            camera,
            viewport,
            pixels_per_point: ctx.pixels_per_point(),
        }
    }

    pub fn pos(&self, world: Vec2) -> egui::Pos2 {
        let px = self.camera.world_to_screen(world, self.viewport);
        egui::pos2(px.x / self.pixels_per_point, px.y / self.pixels_per_point)
    }

    /// Length of one world unit in egui points
    pub fn scale(&self) -> f32 {
        self.camera.pixels_per_unit(self.viewport) / self.pixels_per_point
    }

    pub fn rect(&self, min: Vec2, max: Vec2) -> egui::Rect {
        egui::Rect::from_two_pos(self.pos(min), self.pos(max))
    }
}

/// Draw text anchored at a world position on the background layer
pub fn world_label(
    ctx: &egui::Context,
    map: &WorldToUi<'_>,
    at: Vec2,
    text: impl ToString,
    size: f32,
    color: Color32,
    anchor: Align2,
) {
    let painter = ctx.layer_painter(egui::LayerId::background());
    painter.text(
        map.pos(at),
        anchor,
        text.to_string(),
        FontId::proportional(size),
        color,
    );
}

/// Text placed in world space, collected while building a frame and painted in the egui pass
#[derive(Debug, Clone)]
pub struct WorldLabel {
    pub at: Vec2,
    pub text: String,
    pub size: f32,
    pub color: Color32,
    pub anchor: Align2,
}

impl WorldLabel {
    pub fn new(at: Vec2, text: impl Into<String>) -> Self {
        Self {
            at,
            text: text.into(),
            size: 13.0,
            color: Color32::LIGHT_GRAY,
            anchor: Align2::CENTER_CENTER,
        }
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    pub fn anchor(mut self, anchor: Align2) -> Self {
        self.anchor = anchor;
        self
    }
}

pub fn paint_labels(ctx: &egui::Context, map: &WorldToUi<'_>, labels: &[WorldLabel]) {
    for label in labels {
        world_label(ctx, map, label.at, &label.text, label.size, label.color, label.anchor);
    }
}
