//! Quantum Timeline Visualization
//!
//! Milestones of early quantum theory on a timeline, each with a portrait
//! card. Missing portraits are replaced by a "No Image" placeholder.
//!
//! Usage: quantum_timeline [FIGURES_DIR]
//!
//! Controls:
//! - Left/Right: Highlight previous/next event
//! - Space: Tour all events
//! - Esc: Clear highlight
//! - Scroll: Zoom

use common::equations_ui::{draw_status_bar, Sidebar};
use common::{
    paint_labels, BatchCapacity, Camera2D, EguiOverlay, GraphicsContext, ShapeBatch,
    ShapeRenderer, Visualization, WorldLabel, WorldToUi,
};
use egui::Color32;
use glam::{Vec2, Vec3};
use std::path::PathBuf;
use timeline::equations::{era_section, TIMELINE_SECTIONS, TIMELINE_VARIABLES};
use timeline::events::quantum_history;
use timeline::layout::{Frame, TimelineLayout, TimelineStyle};
use timeline::portrait::{fit_within, Portrait, PLACEHOLDER_TEXT};
use winit::{event::ElementState, event::WindowEvent, keyboard::KeyCode, window::Window};

/// Seconds each card stays enlarged during a tour
const TOUR_STEP: f32 = 1.0;

const LINE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const CONNECTOR_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.7];
const CARD_FILL: [f32; 4] = [1.0, 1.0, 1.0, 0.1];
const PLACEHOLDER_FILL: [f32; 4] = [0.5, 0.5, 0.5, 0.3];
const PLACEHOLDER_EDGE: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
const HIGHLIGHT_EDGE: [f32; 4] = [1.0, 0.85, 0.2, 1.0];

const CLEAR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.04,
    a: 1.0,
};

/// Uploaded portrait and its pixel size
struct CardTexture {
    handle: egui::TextureHandle,
    size: Vec2,
}

struct App {
    shapes: ShapeRenderer,
    overlay: EguiOverlay,
    camera: Camera2D,
    batch: ShapeBatch,
    labels: Vec<WorldLabel>,
    /// Portrait placements for this frame in world coordinates
    images: Vec<(egui::TextureId, Frame)>,
    layout: TimelineLayout,
    textures: Vec<Option<CardTexture>>,
    /// Current display scale of each card
    scales: Vec<f32>,
    highlight: Option<usize>,
    /// Time left on the current tour stop
    tour: Option<f32>,
}

impl App {
    fn new(gfx: &GraphicsContext, figures_dir: PathBuf) -> Self {
        let mut camera = Camera2D::new(gfx.aspect_ratio());
        camera.zoom = 4.5;
        camera.position = Vec3::new(1.9, 0.3, 0.0);

        let overlay = EguiOverlay::new(gfx);
        let layout = TimelineLayout::build(&quantum_history(&figures_dir), TimelineStyle::default());

        let textures: Vec<Option<CardTexture>> = layout
            .cards
            .iter()
            .map(|card| match Portrait::load(&card.image) {
                Portrait::Image(image) => {
                    let size = Vec2::new(image.size[0] as f32, image.size[1] as f32);
                    let handle = overlay.ctx.load_texture(
                        format!("portrait-{}", card.year),
                        image,
                        egui::TextureOptions::LINEAR,
                    );
                    Some(CardTexture { handle, size })
                }
                Portrait::Placeholder => None,
            })
            .collect();

        let loaded = textures.iter().flatten().count();
        log::info!(
            "{loaded}/{} portraits loaded from {}",
            textures.len(),
            figures_dir.display()
        );

        Self {
            shapes: ShapeRenderer::new(gfx, BatchCapacity::default()),
            overlay,
            camera,
            batch: ShapeBatch::new(),
            labels: Vec::new(),
            images: Vec::new(),
            scales: vec![1.0; layout.cards.len()],
            layout,
            textures,
            highlight: None,
            tour: None,
        }
    }

    fn select(&mut self, index: Option<usize>) {
        self.highlight = index;
        if let Some(card) = index.and_then(|i| self.layout.cards.get(i)) {
            log::debug!("highlight {} {}", card.year, card.label);
        }
    }

    fn step_highlight(&mut self, forward: bool) {
        let count = self.layout.cards.len();
        if count == 0 {
            return;
        }
        let next = match (self.highlight, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        };
        self.select(Some(next));
    }

    fn build_scene(&mut self) {
        self.batch.clear();
        self.labels.clear();
        self.images.clear();

        let Some([start, end]) = self.layout.line() else {
            self.labels.push(
                WorldLabel::new(Vec2::ZERO, "No events")
                    .size(20.0)
                    .color(Color32::GRAY),
            );
            return;
        };
        let style = self.layout.style;

        self.batch.line(start, end, LINE_COLOR);
        self.labels.push(
            WorldLabel::new(Vec2::new(0.0, 3.6), "Quantum Mechanics Timeline")
                .size(28.0)
                .color(Color32::YELLOW),
        );

        for card in &self.layout.cards {
            let [from, to] = self.layout.connector(card);
            self.batch.line(from, to, CONNECTOR_COLOR);
            self.batch
                .filled_circle(card.marker, style.marker_radius, 24, LINE_COLOR);
            self.labels.push(
                WorldLabel::new(self.layout.year_label(card), card.year.to_string())
                    .size(16.0)
                    .color(Color32::WHITE),
            );
        }

        // Highlighted card last so it covers its neighbours
        let mut order: Vec<usize> = (0..self.layout.cards.len()).collect();
        order.sort_by(|&a, &b| self.scales[a].total_cmp(&self.scales[b]));

        for i in order {
            let card = &self.layout.cards[i];
            let g = self.layout.geometry(card, self.scales[i]);
            let edge = if self.highlight == Some(i) {
                HIGHLIGHT_EDGE
            } else {
                LINE_COLOR
            };

            self.batch.filled_rect(g.frame.min, g.frame.max, CARD_FILL);
            self.batch.rect_outline(g.frame.min, g.frame.max, edge);
            self.labels.push(
                WorldLabel::new(g.label, &card.label)
                    .size(14.0 * self.scales[i])
                    .color(Color32::WHITE),
            );

            match &self.textures[i] {
                Some(texture) => {
                    let fitted = fit_within(texture.size, g.image_slot.size());
                    self.images.push((
                        texture.handle.id(),
                        Frame::from_center(g.image_slot.center(), fitted),
                    ));
                }
                None => {
                    self.batch
                        .filled_rect(g.placeholder.min, g.placeholder.max, PLACEHOLDER_FILL);
                    self.batch
                        .rect_outline(g.placeholder.min, g.placeholder.max, PLACEHOLDER_EDGE);
                    self.labels.push(
                        WorldLabel::new(g.placeholder.center(), PLACEHOLDER_TEXT)
                            .size(12.0)
                            .color(Color32::GRAY),
                    );
                }
            }
        }
    }

    fn status_text(&self) -> String {
        let selected = self
            .highlight
            .and_then(|i| self.layout.cards.get(i))
            .map(|card| format!("{}: {}", card.year, card.label))
            .unwrap_or_else(|| "Left/Right to highlight an event".to_string());
        let missing = self.textures.iter().filter(|t| t.is_none()).count();
        format!(
            "{selected} | {} events | {missing} missing portraits",
            self.layout.cards.len()
        )
    }
}

impl Visualization for App {
    fn update(&mut self, dt: f32) {
        if let Some(remaining) = self.tour.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                let next = self.highlight.map_or(0, |i| i + 1);
                if next < self.layout.cards.len() {
                    self.select(Some(next));
                    self.tour = Some(TOUR_STEP);
                } else {
                    self.select(None);
                    self.tour = None;
                }
            }
        }

        let rate = (dt * 8.0).min(1.0);
        let highlight_scale = self.layout.style.highlight_scale;
        for (i, scale) in self.scales.iter_mut().enumerate() {
            let target = if self.highlight == Some(i) {
                highlight_scale
            } else {
                1.0
            };
            *scale += (target - *scale) * rate;
        }
    }

    fn render(&mut self, gfx: &GraphicsContext) -> Result<(), wgpu::SurfaceError> {
        self.build_scene();
        self.shapes.update_camera(&gfx.queue, &self.camera);

        let status = self.status_text();
        let viewport = gfx.viewport();
        let touring = self.tour.is_some();
        let era = self
            .highlight
            .and_then(|i| self.layout.cards.get(i))
            .map(|card| era_section(card.year));

        gfx.frame(|encoder, view| {
            self.shapes
                .draw(&gfx.queue, encoder, view, &self.batch, CLEAR);
            self.overlay.render(gfx, encoder, view, |ctx| {
                let sidebar =
                    Sidebar::new("Quantum Timeline", TIMELINE_SECTIONS).variables(TIMELINE_VARIABLES);
                match era {
                    Some(section) => sidebar.active(section).show(ctx),
                    None => sidebar.show(ctx),
                }
                draw_status_bar(ctx, false, |ui| {
                    ui.label(&status);
                    if touring {
                        ui.separator();
                        ui.label(egui::RichText::new("TOUR").color(Color32::LIGHT_BLUE));
                    }
                });

                let map = WorldToUi::new(ctx, &self.camera, viewport);
                let painter = ctx.layer_painter(egui::LayerId::background());
                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                for (id, frame) in &self.images {
                    painter.image(*id, map.rect(frame.min, frame.max), uv, Color32::WHITE);
                }
                paint_labels(ctx, &map, &self.labels);
            });
        })
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        if state != ElementState::Pressed {
            return;
        }

        match key {
            KeyCode::ArrowRight => {
                self.tour = None;
                self.step_highlight(true);
            }
            KeyCode::ArrowLeft => {
                self.tour = None;
                self.step_highlight(false);
            }
            KeyCode::Space => {
                if self.tour.is_some() {
                    self.tour = None;
                } else if !self.layout.is_empty() {
                    self.select(Some(0));
                    self.tour = Some(TOUR_STEP);
                }
            }
            KeyCode::Escape => {
                self.tour = None;
                self.select(None);
            }
            _ => {}
        }
    }

    fn handle_scroll(&mut self, delta: f32) {
        self.camera.zoom_by(1.0 - delta * 0.1);
    }

    fn resized(&mut self, gfx: &GraphicsContext) {
        self.camera.update_aspect_ratio(gfx.aspect_ratio());
    }

    fn handle_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.overlay.on_window_event(window, event)
    }
}

fn main() -> anyhow::Result<()> {
    let figures_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("figures"));

    println!("Quantum Timeline - From Planck to Schrödinger");
    println!();
    println!("Portraits: {}", figures_dir.display());
    println!();
    println!("Controls:");
    println!("  Left/Right - Highlight previous/next event");
    println!("  Space      - Tour all events");
    println!("  Esc        - Clear highlight");
    println!("  Scroll     - Zoom");
    println!();

    common::run(
        "Quantum Timeline - From Planck to Schrödinger",
        1280,
        720,
        move |gfx| App::new(gfx, figures_dir),
    )
}
