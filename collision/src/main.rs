//! Collision Visualization
//!
//! Walks through detecting and resolving overlapping circles, then lets the
//! circles move under velocity Verlet integration with collisions. A second
//! scene shows the EPR pair thrown apart along a number line.
//!
//! Controls:
//! - Right/Space: Next stage (throw the pair in the EPR scene)
//! - Left: Previous stage
//! - G: Toggle gravity (simulation stage)
//! - E: Switch between the lesson and the EPR scene
//! - R: Restart
//! - Scroll: Zoom

use collision::demo::{Demo, Section, Stage, CIRCLE_COLORS, RADIUS};
use collision::epr::{EprPair, Phase, CONDITIONS, LINE_LENGTH};
use collision::equations::{
    lesson_section, COLLISION_SECTIONS, COLLISION_VARIABLES, EPR_SECTION,
};
use collision::physics::{overlap, Body};
use common::equations_ui::{draw_status_bar, Sidebar};
use common::{
    paint_labels, rgb_hex, BatchCapacity, Camera2D, EguiOverlay, GraphicsContext, ShapeBatch,
    ShapeRenderer, Visualization, WorldLabel, WorldToUi,
};
use egui::{Align2, Color32, RichText};
use glam::{Vec2, Vec3};
use winit::{event::ElementState, event::WindowEvent, keyboard::KeyCode, window::Window};

const GRAVITY: Vec2 = Vec2::new(0.0, -9.8);
const BOUNDS: (Vec2, Vec2) = (Vec2::new(-5.5, -3.3), Vec2::new(3.5, 3.3));

const ARROW_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const HIGHLIGHT: u32 = 0xFFFF00;
const GOLD: u32 = 0xFFD700;
const EPR_COLORS: [u32; 2] = [0xFC6255, 0x58C4DD];

/// Arrow length per unit of momentum in the EPR scene
const MOMENTUM_SCALE: f32 = 0.6;

const CLEAR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.03,
    a: 1.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scene {
    Lesson,
    Epr,
}

struct App {
    shapes: ShapeRenderer,
    overlay: EguiOverlay,
    camera: Camera2D,
    batch: ShapeBatch,
    labels: Vec<WorldLabel>,
    scene: Scene,
    demo: Demo,
    epr: EprPair,
    gravity: bool,
}

impl App {
    fn new(gfx: &GraphicsContext) -> Self {
        let mut camera = Camera2D::new(gfx.aspect_ratio());
        camera.zoom = 4.0;
        camera.position = Vec3::new(1.0, 0.0, 0.0);

        let colors = CIRCLE_COLORS.map(|c| rgb_hex(c, 1.0));

        Self {
            shapes: ShapeRenderer::new(gfx, BatchCapacity::default()),
            overlay: EguiOverlay::new(gfx),
            camera,
            batch: ShapeBatch::new(),
            labels: Vec::new(),
            scene: Scene::Lesson,
            demo: Demo::new(colors, BOUNDS),
            epr: EprPair::new(EPR_COLORS.map(|c| rgb_hex(c, 1.0))),
            gravity: false,
        }
    }

    fn switch_scene(&mut self) {
        let (scene, zoom, center) = match self.scene {
            Scene::Lesson => (Scene::Epr, 4.5, Vec3::new(1.5, 0.5, 0.0)),
            Scene::Epr => (Scene::Lesson, 4.0, Vec3::new(1.0, 0.0, 0.0)),
        };
        self.scene = scene;
        self.camera.zoom = zoom;
        self.camera.position = center;
        log::info!("scene: {scene:?}");
    }

    fn build_scene(&mut self) {
        self.batch.clear();
        self.labels.clear();

        match self.scene {
            Scene::Lesson => self.build_lesson(),
            Scene::Epr => self.build_epr(),
        }
    }

    fn build_epr(&mut self) {
        let half = LINE_LENGTH / 2.0;
        let gold = rgb_hex(GOLD, 1.0);

        self.labels.push(
            WorldLabel::new(Vec2::new(0.0, 2.9), "EPR thought experiment")
                .size(26.0)
                .color(Color32::YELLOW),
        );

        self.batch
            .line(Vec2::new(-half, 0.0), Vec2::new(half, 0.0), ARROW_COLOR);
        for tick in -(half as i32)..=(half as i32) {
            let x = tick as f32;
            self.batch
                .line(Vec2::new(x, -0.08), Vec2::new(x, 0.08), ARROW_COLOR);
            self.labels.push(
                WorldLabel::new(Vec2::new(x, -0.15), tick.to_string())
                    .size(13.0)
                    .color(Color32::GRAY)
                    .anchor(Align2::CENTER_TOP),
            );
        }
        self.labels.push(
            WorldLabel::new(Vec2::new(half + 0.25, 0.0), "x")
                .size(18.0)
                .anchor(Align2::LEFT_CENTER),
        );

        let momenta = self.epr.momenta();
        let names = [("x₁", "p₁"), ("x₂", "p₂")];
        for ((body, p), (x_name, p_name)) in self.epr.bodies().iter().zip(momenta).zip(names) {
            let at = body.position;
            self.batch.filled_circle(at, body.radius, 32, body.color);
            self.labels.push(
                WorldLabel::new(at + Vec2::Y * 0.3, x_name)
                    .size(18.0)
                    .anchor(Align2::CENTER_BOTTOM),
            );

            if p != 0.0 {
                let base = at + Vec2::Y * 0.9;
                let tip = base + Vec2::X * p * MOMENTUM_SCALE;
                self.batch.arrow(base, tip, 0.12, gold);
                self.labels.push(
                    WorldLabel::new(tip + Vec2::Y * 0.15, p_name)
                        .size(18.0)
                        .color(Color32::GOLD)
                        .anchor(Align2::CENTER_BOTTOM),
                );
            }
        }

        if self.epr.phase == Phase::Apart {
            for (i, condition) in CONDITIONS.iter().enumerate() {
                self.labels.push(
                    WorldLabel::new(Vec2::new(-half, -1.2 - 0.45 * i as f32), *condition)
                        .size(20.0)
                        .color(Color32::WHITE)
                        .anchor(Align2::LEFT_TOP),
                );
            }
        }
    }

    fn build_lesson(&mut self) {
        let stage = self.demo.stage;
        let settled = !self.demo.is_transitioning();

        if stage == Stage::Simulation {
            self.batch
                .rect_outline(BOUNDS.0, BOUNDS.1, [0.5, 0.5, 0.6, 1.0]);
        }

        let bodies: Vec<Body> = self.demo.visible().to_vec();
        for (i, body) in bodies.iter().enumerate() {
            self.batch
                .filled_circle(body.position, body.radius, 64, body.color);
            self.labels.push(
                WorldLabel::new(body.position, format!("{}", i + 1))
                    .size(20.0)
                    .color(Color32::WHITE),
            );
        }

        let p1 = bodies[0].position;
        let p2 = bodies[1].position;

        match stage {
            Stage::Diameter if settled => {
                let r = Vec2::X * RADIUS;
                self.batch.double_arrow(p1 - r, p1 + r, 0.15, ARROW_COLOR);
                self.labels.push(
                    WorldLabel::new(p1 + Vec2::Y * 0.25, "2r").anchor(Align2::CENTER_BOTTOM),
                );
            }
            Stage::CenterDistance | Stage::Touching | Stage::Overlapping => {
                // Lifted above the circles once they touch
                let lift = if stage == Stage::CenterDistance {
                    Vec2::ZERO
                } else {
                    Vec2::Y * 1.6
                };
                self.batch
                    .double_arrow(p1 + lift, p2 + lift, 0.15, ARROW_COLOR);
                self.labels.push(
                    WorldLabel::new((p1 + p2) * 0.5 + lift + Vec2::Y * 0.2, "d")
                        .size(18.0)
                        .anchor(Align2::CENTER_BOTTOM),
                );
            }
            Stage::Intersection => {
                let outline = self.demo.intersection();
                self.batch.convex_polygon(&outline, rgb_hex(HIGHLIGHT, 1.0));
                let gap = overlap(&bodies[0], &bodies[1]);
                self.labels.push(
                    WorldLabel::new(
                        (p1 + p2) * 0.5 - Vec2::Y * (RADIUS + 0.3),
                        format!("2r − d = {gap:.2}"),
                    )
                    .color(Color32::YELLOW)
                    .anchor(Align2::CENTER_TOP),
                );
            }
            Stage::Resolved if settled => {
                let dir = (p2 - p1).normalize_or_zero();
                self.batch.arrow(p2, p2 + dir * 0.6, 0.12, ARROW_COLOR);
                self.batch.arrow(p1, p1 - dir * 0.6, 0.12, ARROW_COLOR);
                self.labels.push(
                    WorldLabel::new(p2 + dir * 0.7, "+a⃗").anchor(Align2::LEFT_CENTER),
                );
                self.labels.push(
                    WorldLabel::new(p1 - dir * 0.7, "−a⃗").anchor(Align2::RIGHT_CENTER),
                );
            }
            Stage::ThirdCircle | Stage::Relaxed if bodies.len() == 3 => {
                let p3 = bodies[2].position;
                for other in [p1, p2] {
                    let outline = collision::demo::lens(other, RADIUS, p3, RADIUS, 16);
                    self.batch.convex_polygon(&outline, rgb_hex(HIGHLIGHT, 0.9));
                }
            }
            Stage::Simulation => {
                for body in &bodies {
                    self.batch.arrow(
                        body.position,
                        body.position + body.velocity * 0.3,
                        0.1,
                        ARROW_COLOR,
                    );
                }
            }
            _ => {}
        }
    }

    fn status_text(&self) -> String {
        if self.scene == Scene::Epr {
            let [x1, x2] = self.epr.positions();
            let [p1, p2] = self.epr.momenta();
            return format!(
                "EPR ({:?}) | x₁ = {x1:.2}, x₂ = {x2:.2} | p₁ = {p1:.2}, p₂ = {p2:.2} | Σp = {:.2}",
                self.epr.phase,
                self.epr.total_momentum().x
            );
        }

        let stage = self.demo.stage;
        let bodies = self.demo.visible();
        let mut text = format!(
            "Stage {}/{}: {}",
            stage.index() + 1,
            Stage::ALL.len(),
            stage.title()
        );
        if let [a, b, ..] = bodies {
            text.push_str(&format!(
                " | d = {:.2} | 2r − d = {:.2}",
                a.position.distance(b.position),
                overlap(a, b)
            ));
        }
        if let Some(world) = &self.demo.world {
            text.push_str(&format!(
                " | KE = {:.3} | gravity {}",
                world.kinetic_energy(),
                if self.gravity { "on" } else { "off" }
            ));
        }
        text
    }
}

fn draw_plan(ctx: &egui::Context, current: Section) {
    egui::Window::new("Plan")
        .anchor(egui::Align2::LEFT_TOP, [10.0, 40.0])
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            for (i, section) in Section::PLAN.iter().enumerate() {
                let text = format!("{}. {}", i + 1, section.name());
                let rich = if *section == current {
                    RichText::new(text).strong().color(Color32::from_rgb(100, 200, 255))
                } else {
                    RichText::new(text).color(Color32::GRAY)
                };
                ui.label(rich);
            }
        });
}

impl Visualization for App {
    fn update(&mut self, dt: f32) {
        if self.scene == Scene::Epr {
            self.epr.update(dt);
            return;
        }
        if let Some(world) = &mut self.demo.world {
            world.gravity = if self.gravity { GRAVITY } else { Vec2::ZERO };
        }
        self.demo.update(dt);
    }

    fn render(&mut self, gfx: &GraphicsContext) -> Result<(), wgpu::SurfaceError> {
        self.build_scene();
        self.shapes.update_camera(&gfx.queue, &self.camera);

        let status = self.status_text();
        let plan = (self.scene == Scene::Lesson).then(|| self.demo.stage.section());
        let active = plan.map_or(EPR_SECTION, lesson_section);
        let viewport = gfx.viewport();

        gfx.frame(|encoder, view| {
            self.shapes
                .draw(&gfx.queue, encoder, view, &self.batch, CLEAR);
            self.overlay.render(gfx, encoder, view, |ctx| {
                Sidebar::new("Collision Simulation", COLLISION_SECTIONS)
                    .variables(COLLISION_VARIABLES)
                    .active(active)
                    .show(ctx);
                draw_status_bar(ctx, false, |ui| {
                    ui.label(&status);
                });
                if let Some(section) = plan {
                    draw_plan(ctx, section);
                }
                let map = WorldToUi::new(ctx, &self.camera, viewport);
                paint_labels(ctx, &map, &self.labels);
            });
        })
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        if state != ElementState::Pressed {
            return;
        }

        if key == KeyCode::KeyE {
            self.switch_scene();
            return;
        }
        if self.scene == Scene::Epr {
            match key {
                KeyCode::ArrowRight | KeyCode::Space => self.epr.throw(),
                KeyCode::KeyR => self.epr.reset(),
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::ArrowRight | KeyCode::Space => self.demo.advance(),
            KeyCode::ArrowLeft => self.demo.back(),
            KeyCode::KeyG => {
                self.gravity = !self.gravity;
                log::info!("gravity {}", if self.gravity { "on" } else { "off" });
            }
            KeyCode::KeyR => {
                self.demo.restart();
                self.gravity = false;
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
    println!("Collision Simulation - Detection and Resolution");
    println!();
    println!("Controls:");
    println!("  Right/Space - Next stage");
    println!("  Left        - Previous stage");
    println!("  G           - Toggle gravity");
    println!("  E           - EPR scene on/off");
    println!("  R           - Restart");
    println!("  Scroll      - Zoom");
    println!();

    common::run(
        "Collision Simulation - Detection and Resolution",
        1280,
        720,
        App::new,
    )
}
