//! Schrödinger Equation Visualization
//!
//! Separates the time-dependent equation into ψ(x)φ(t), builds the general
//! solution in an infinite well, then places an electron between charged
//! plates and diagonalizes the two-level Hamiltonian the field produces.
//!
//! Controls:
//! - Right/Space: Next stage
//! - Left: Previous stage
//! - 1/2/3/4: Quantum number of the stationary state
//! - Up/Down: Field strength
//! - P: Pause the clock
//! - R: Restart
//! - Scroll: Zoom

use blackbody::chart::{Axis, Chart};
use blackbody::plot::{draw_axes, draw_curve, draw_dashed_curve, AxesStyle};
use common::equations_ui::{draw_status_bar, Sidebar};
use common::{
    paint_labels, rgb_hex, BatchCapacity, Camera2D, EguiOverlay, GraphicsContext, ShapeBatch,
    ShapeRenderer, Visualization, WorldLabel, WorldToUi,
};
use egui::{Align2, Color32};
use glam::{DVec2, Vec2, Vec3};
use schrodinger::eigen::entries;
use schrodinger::equations::{SCHRODINGER_SECTIONS, SCHRODINGER_VARIABLES};
use schrodinger::field::{PLOT_X_RANGE, PLOT_Y_RANGE};
use schrodinger::lesson::{Lesson, Stage, FIELD_STEP, PLAN, WELL};
use schrodinger::separation::time_factor;
use winit::{event::ElementState, event::WindowEvent, keyboard::KeyCode, window::Window};

const CURVE_POINTS: usize = 201;
const SUBSCRIPTS: [char; 2] = ['₁', '₂'];

const RED: u32 = 0xFC6255;
const BLUE: u32 = 0x58C4DD;
const YELLOW: u32 = 0xFFFF00;
const GOLD: u32 = 0xF0AC5F;
const GREEN: u32 = 0x83C167;
const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const DIM: [f32; 4] = [0.5, 0.5, 0.6, 1.0];

const TDSE: &str = "iħ ∂Ψ/∂t = −ħ²/2m ∂²Ψ/∂x² + UΨ";

/// Where the stage charts sit
const WIDE_CHART: (Vec2, Vec2) = (Vec2::new(-5.0, -3.4), Vec2::new(9.6, 4.6));
const SIDE_CHART: (Vec2, Vec2) = (Vec2::new(0.4, -3.4), Vec2::new(4.6, 3.8));
const POTENTIAL_CHART: (Vec2, Vec2) = (Vec2::new(-3.0, -3.6), Vec2::new(6.0, 3.0));

/// Center and radius of the phasor and eigenvector diagrams
const DIAGRAM_CENTER: Vec2 = Vec2::new(2.4, -0.6);
const DIAGRAM_RADIUS: f32 = 2.0;

const CLEAR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.03,
    a: 1.0,
};

struct App {
    shapes: ShapeRenderer,
    overlay: EguiOverlay,
    camera: Camera2D,
    batch: ShapeBatch,
    labels: Vec<WorldLabel>,
    lesson: Lesson,
}

fn well_chart(frame: (Vec2, Vec2), y_min: f64, y_max: f64) -> Chart {
    let half = WELL.width / 2.0;
    Chart::new(
        Axis::linear(-half, half),
        Axis::linear(y_min, y_max),
        frame.0,
        frame.1,
    )
}

fn to_vec2(v: DVec2) -> Vec2 {
    Vec2::new(v.x as f32, v.y as f32)
}

impl App {
    fn new(gfx: &GraphicsContext) -> Self {
        let mut camera = Camera2D::new(gfx.aspect_ratio());
        camera.zoom = 4.2;
        camera.position = Vec3::new(1.5, 0.0, 0.0);

        Self {
            shapes: ShapeRenderer::new(gfx, BatchCapacity::default()),
            overlay: EguiOverlay::new(gfx),
            camera,
            batch: ShapeBatch::new(),
            labels: Vec::new(),
            lesson: Lesson::new(),
        }
    }

    fn text(&mut self, at: Vec2, text: impl Into<String>, size: f32, color: Color32) {
        self.labels.push(
            WorldLabel::new(at, text)
                .size(size)
                .color(color)
                .anchor(Align2::LEFT_CENTER),
        );
    }

    fn build_scene(&mut self) {
        self.batch.clear();
        self.labels.clear();

        let stage = self.lesson.stage;
        self.labels.push(
            WorldLabel::new(Vec2::new(-5.6, 3.9), stage.title())
                .size(26.0)
                .color(Color32::YELLOW)
                .anchor(Align2::LEFT_TOP),
        );

        match stage {
            Stage::Plan => self.build_plan(),
            Stage::Equation => self.build_equation(),
            Stage::Separation => self.build_separation(),
            Stage::Hamiltonian => self.build_hamiltonian(),
            Stage::GeneralSolution => self.build_general_solution(),
            Stage::Properties => self.build_properties(),
            Stage::Plates => self.build_plates(),
            Stage::Potential => {
                self.build_plates();
                self.build_potential();
            }
            Stage::Diagonalization => self.build_diagonalization(),
        }
    }

    fn build_plan(&mut self) {
        for (i, step) in PLAN.iter().enumerate() {
            self.text(
                Vec2::new(-4.5, 1.8 - 0.9 * i as f32),
                *step,
                26.0,
                Color32::WHITE,
            );
        }
    }

    fn build_equation(&mut self) {
        self.labels.push(WorldLabel::new(Vec2::new(0.0, 0.6), TDSE).size(34.0));
        self.labels.push(
            WorldLabel::new(Vec2::new(0.0, -0.8), "Ψ = Ψ(x, t)")
                .size(26.0)
                .color(Color32::LIGHT_BLUE),
        );
    }

    /// Re Ψ, Im Ψ and |Ψ|² of one stationary state on `chart`
    fn draw_stationary(&mut self, chart: &Chart) {
        let state = self.lesson.stationary();
        let psi = state.sample(WELL.grid(CURVE_POINTS), self.lesson.time);

        draw_axes(
            &mut self.batch,
            &mut self.labels,
            chart,
            &AxesStyle {
                x_title: "x",
                y_title: "Ψ(x, t)",
                x_step: 0.5,
                y_step: 0.5,
                grid: false,
            },
        );
        if let (Some(a), Some(b)) = (chart.to_world(-1.0, 0.0), chart.to_world(1.0, 0.0)) {
            self.batch.line(a, b, DIM);
        }
        draw_curve(&mut self.batch, chart, &psi.curve(|c| c.re), rgb_hex(BLUE, 1.0));
        draw_dashed_curve(&mut self.batch, chart, &psi.curve(|c| c.im), rgb_hex(RED, 1.0));
        draw_curve(
            &mut self.batch,
            chart,
            &psi.curve(|c| c.norm_sq()),
            rgb_hex(YELLOW, 1.0),
        );

        let corner = chart.top_right();
        let legend = [
            ("Re Ψ", Color32::from_rgb(0x58, 0xC4, 0xDD)),
            ("Im Ψ", Color32::from_rgb(0xFC, 0x62, 0x55)),
            ("|Ψ|²", Color32::YELLOW),
        ];
        for (i, (name, color)) in legend.into_iter().enumerate() {
            self.labels.push(
                WorldLabel::new(corner - Vec2::new(0.1, 0.25 + 0.35 * i as f32), name)
                    .size(15.0)
                    .color(color)
                    .anchor(Align2::RIGHT_CENTER),
            );
        }
    }

    fn build_separation(&mut self) {
        self.labels
            .push(WorldLabel::new(Vec2::new(0.0, 2.9), TDSE).size(22.0));
        let lines = [
            ("Ψ = Ψ(x, t)", Color32::WHITE),
            ("U = U(x)", Color32::WHITE),
            ("Ψ(x, t) = ψ(x)φ(t)", Color32::YELLOW),
        ];
        for (i, (line, color)) in lines.into_iter().enumerate() {
            self.text(Vec2::new(-5.6, 1.6 - 0.7 * i as f32), line, 22.0, color);
        }

        let state = self.lesson.stationary();
        self.text(
            Vec2::new(-5.6, -1.2),
            format!("n = {}, E = {:.3}", state.n, state.energy),
            18.0,
            Color32::LIGHT_GRAY,
        );

        let chart = well_chart(SIDE_CHART, -1.2, 1.2);
        self.draw_stationary(&chart);
    }

    fn build_hamiltonian(&mut self) {
        let lines = [
            "Ĥ = −ħ²/2m ∂²/∂x² + U",
            "Ĥψ = Eψ",
            "iħ dφ/dt = Eφ",
            "φ(t) = e^(−iEt/ħ)",
        ];
        for (i, line) in lines.into_iter().enumerate() {
            self.text(
                Vec2::new(-5.6, 2.2 - 0.75 * i as f32),
                line,
                22.0,
                Color32::WHITE,
            );
        }

        let state = self.lesson.stationary();
        let phase = time_factor(state.energy, self.lesson.time);
        self.text(
            Vec2::new(-5.6, -1.2),
            format!("E = {:.3}, ω = E/ħ = {:.3}", state.energy, state.energy),
            18.0,
            Color32::LIGHT_GRAY,
        );

        let c = DIAGRAM_CENTER;
        let r = DIAGRAM_RADIUS;
        self.batch
            .line(c - Vec2::X * (r + 0.3), c + Vec2::X * (r + 0.3), DIM);
        self.batch
            .line(c - Vec2::Y * (r + 0.3), c + Vec2::Y * (r + 0.3), DIM);
        self.batch.circle_outline(c, r, 96, WHITE);

        let tip = c + Vec2::new(phase.re as f32, phase.im as f32) * r;
        self.batch.arrow(c, tip, 0.18, rgb_hex(GOLD, 1.0));
        self.batch.filled_circle(tip, 0.06, 16, rgb_hex(GOLD, 1.0));
        self.labels.push(
            WorldLabel::new(tip + (tip - c).normalize_or_zero() * 0.35, "φ(t)")
                .size(18.0)
                .color(Color32::GOLD),
        );
        self.labels.push(
            WorldLabel::new(c + Vec2::new(r + 0.4, 0.0), "Re")
                .size(14.0)
                .color(Color32::GRAY)
                .anchor(Align2::LEFT_CENTER),
        );
        self.labels.push(
            WorldLabel::new(c + Vec2::new(0.0, r + 0.4), "Im")
                .size(14.0)
                .color(Color32::GRAY)
                .anchor(Align2::CENTER_BOTTOM),
        );
    }

    /// |Ψ|² of the two-level mix with its dashed components
    fn draw_superposition(&mut self, chart: &Chart) {
        let mix = self.lesson.superposition();
        let grid = WELL.grid(CURVE_POINTS);

        draw_axes(
            &mut self.batch,
            &mut self.labels,
            chart,
            &AxesStyle {
                x_title: "x",
                y_title: "|Ψ(x, t)|²",
                x_step: 0.5,
                y_step: 0.5,
                grid: false,
            },
        );

        let component_colors = [BLUE, GREEN];
        for (&(n, c), color) in mix.terms.iter().zip(component_colors) {
            let weight = c.norm_sq();
            let curve: Vec<[f64; 2]> = grid
                .points()
                .map(|x| [x, weight * WELL.psi(n, x).powi(2)])
                .collect();
            draw_dashed_curve(&mut self.batch, chart, &curve, rgb_hex(color, 0.8));
        }

        let psi = mix.sample(grid, self.lesson.time);
        draw_curve(
            &mut self.batch,
            chart,
            &psi.curve(|c| c.norm_sq()),
            rgb_hex(YELLOW, 1.0),
        );
    }

    fn build_general_solution(&mut self) {
        self.labels.push(
            WorldLabel::new(Vec2::new(0.0, 2.9), "Ψ(x, t) = Σ cₙ ψₙ(x) e^(−iEₙt/ħ)")
                .size(24.0),
        );
        self.text(
            Vec2::new(-5.0, 2.2),
            "c₁ = c₂ = 1/√2",
            18.0,
            Color32::LIGHT_GRAY,
        );

        let chart = well_chart(
            (WIDE_CHART.0, Vec2::new(WIDE_CHART.1.x, WIDE_CHART.1.y - 0.6)),
            0.0,
            2.0,
        );
        self.draw_superposition(&chart);
    }

    fn build_properties(&mut self) {
        let mix = self.lesson.superposition();
        let psi = mix.sample(WELL.grid(CURVE_POINTS), self.lesson.time);
        let norm = psi.norm_sq();
        let mean = mix.mean_energy();
        let period = mix.beat_period().unwrap_or(f64::INFINITY);
        let stationary = self.lesson.stationary();

        let lines = [
            format!("1. |ψₙe^(−iEₙt/ħ)|² = |ψₙ|², n = {}", stationary.n),
            format!("2. ∫|Ψ|²dx = {norm:.5}"),
            format!("3. ⟨E⟩ = Σ|cₙ|²Eₙ = {mean:.4}"),
            format!("4. |Ψ|² repeats every T = {period:.3}"),
            format!("   t mod T = {:.3}", self.lesson.time.rem_euclid(period)),
        ];
        for (i, line) in lines.into_iter().enumerate() {
            self.text(
                Vec2::new(-5.6, 2.4 - 0.6 * i as f32),
                line,
                18.0,
                Color32::WHITE,
            );
        }

        let chart = well_chart(SIDE_CHART, 0.0, 2.0);
        self.draw_superposition(&chart);

        // A single stationary density, constant in time
        let still = stationary.sample(WELL.grid(CURVE_POINTS), self.lesson.time);
        draw_dashed_curve(
            &mut self.batch,
            &chart,
            &still.curve(|c| c.norm_sq()),
            rgb_hex(RED, 0.9),
        );
    }

    fn build_plates(&mut self) {
        let scene = self.lesson.plate_scene();

        self.batch
            .filled_rect(scene.positive.min, scene.positive.max, rgb_hex(RED, 1.0));
        self.batch
            .filled_rect(scene.negative.min, scene.negative.max, rgb_hex(BLUE, 1.0));
        for (plate, sign) in [(scene.positive, "+"), (scene.negative, "−")] {
            self.labels.push(
                WorldLabel::new(plate.center(), sign)
                    .size(32.0 * scene.scale)
                    .color(Color32::WHITE),
            );
        }

        for arrow in scene.field_arrows() {
            self.batch
                .arrow(arrow.tail, arrow.tip, 0.12 * scene.scale, WHITE);
        }
        self.batch
            .filled_circle(scene.electron, 0.12, 24, WHITE);
        self.labels.push(
            WorldLabel::new(scene.electron + Vec2::Y * 0.2, "e⁻")
                .size(18.0)
                .anchor(Align2::CENTER_BOTTOM),
        );
    }

    fn build_potential(&mut self) {
        let field = self.lesson.field;
        let chart = Chart::new(
            Axis::linear(PLOT_X_RANGE[0], PLOT_X_RANGE[1]),
            Axis::linear(PLOT_Y_RANGE[0], PLOT_Y_RANGE[1]),
            POTENTIAL_CHART.0,
            POTENTIAL_CHART.1,
        );
        draw_axes(
            &mut self.batch,
            &mut self.labels,
            &chart,
            &AxesStyle {
                x_title: "x",
                y_title: "U(x)",
                x_step: 5.0,
                y_step: 0.5,
                grid: false,
            },
        );
        for (a, b) in [
            (chart.to_world(PLOT_X_RANGE[0], 0.0), chart.to_world(PLOT_X_RANGE[1], 0.0)),
            (chart.to_world(0.0, PLOT_Y_RANGE[0]), chart.to_world(0.0, PLOT_Y_RANGE[1])),
        ] {
            if let (Some(a), Some(b)) = (a, b) {
                self.batch.line(a, b, DIM);
            }
        }

        draw_curve(
            &mut self.batch,
            &chart,
            &field.potential_curve(CURVE_POINTS),
            rgb_hex(YELLOW, 1.0),
        );
        if let Some(at) = chart.to_world(0.0, field.potential_energy(0.0)) {
            self.batch.filled_circle(at, 0.08, 16, WHITE);
        }

        let corner = chart.top_right();
        self.labels.push(
            WorldLabel::new(corner + Vec2::new(0.2, -0.3), "U(x) = eEx")
                .size(18.0)
                .color(Color32::YELLOW)
                .anchor(Align2::LEFT_CENTER),
        );
        self.labels.push(
            WorldLabel::new(
                corner + Vec2::new(0.2, -0.75),
                format!("E = {:.2}, F = {:.2}", field.strength, field.force()),
            )
            .size(15.0)
            .color(Color32::LIGHT_GRAY)
            .anchor(Align2::LEFT_CENTER),
        );
    }

    fn build_diagonalization(&mut self) {
        let m = self.lesson.hamiltonian();
        let [a, b, c, d] = entries(&m);
        let lines = [
            "R = Mr".to_string(),
            format!("M = [[{a:.3}, {b:.3}], [{c:.3}, {d:.3}]]"),
            "Mr = λr".to_string(),
            "det(M − λI) = 0".to_string(),
        ];
        for (i, line) in lines.into_iter().enumerate() {
            self.text(
                Vec2::new(-5.6, 2.4 - 0.65 * i as f32),
                line,
                20.0,
                Color32::WHITE,
            );
        }

        let center = DIAGRAM_CENTER;
        let r = DIAGRAM_RADIUS;
        self.batch
            .line(center - Vec2::X * (r + 0.3), center + Vec2::X * (r + 0.3), DIM);
        self.batch
            .line(center - Vec2::Y * (r + 0.3), center + Vec2::Y * (r + 0.3), DIM);

        let Some(pairs) = self.lesson.eigenpairs() else {
            self.text(
                Vec2::new(-5.6, -0.6),
                "M is not diagonalizable",
                18.0,
                Color32::LIGHT_RED,
            );
            return;
        };

        // Mr is drawn at a scale where the larger |λ| fills the diagram
        let largest = pairs
            .iter()
            .fold(0.0f64, |s, p| s.max(p.value.abs()))
            .max(1e-12);
        let image_scale = r / largest as f32;

        let colors = [BLUE, GREEN];
        for (i, (pair, color)) in pairs.iter().zip(colors).enumerate() {
            self.text(
                Vec2::new(-5.6, -0.4 - 0.55 * i as f32),
                format!(
                    "λ{sub} = {:.4},  r{sub} = ({:.3}, {:.3})",
                    pair.value,
                    pair.vector.x,
                    pair.vector.y,
                    sub = SUBSCRIPTS[i]
                ),
                17.0,
                Color32::LIGHT_GRAY,
            );

            let image = to_vec2(m * pair.vector) * image_scale;
            self.batch
                .arrow(center, center + image, 0.16, rgb_hex(color, 0.5));
            let tip = center + to_vec2(pair.vector) * r * 0.6;
            self.batch.arrow(center, tip, 0.16, rgb_hex(color, 1.0));
            self.labels.push(
                WorldLabel::new(tip + to_vec2(pair.vector) * 0.3, format!("r{}", SUBSCRIPTS[i]))
                    .size(16.0),
            );
        }

        // A turning vector leaves its line under M except along r₁ and r₂
        let angle = self.lesson.time * 0.5;
        let turning = DVec2::new(angle.cos(), angle.sin());
        let image = to_vec2(m * turning) * image_scale;
        let tip = center + to_vec2(turning) * r * 0.6;
        self.batch.arrow(center, tip, 0.14, WHITE);
        self.batch
            .arrow(center, center + image, 0.14, rgb_hex(GOLD, 1.0));
        self.labels.push(
            WorldLabel::new(center + image + image.normalize_or_zero() * 0.3, "Mr")
                .size(16.0)
                .color(Color32::GOLD),
        );

        let ground = pairs[0].vector;
        self.text(
            Vec2::new(-5.6, -1.8),
            format!(
                "ground state: {:.0}% ψ₁, {:.0}% ψ₂",
                100.0 * ground.x * ground.x,
                100.0 * ground.y * ground.y
            ),
            17.0,
            Color32::LIGHT_GRAY,
        );
    }

    fn status_text(&self) -> String {
        let stage = self.lesson.stage;
        format!(
            "Stage {}/{}: {} | t = {:.2}{} | n = {} | E field = {:.2}",
            stage.index() + 1,
            Stage::ALL.len(),
            stage.title(),
            self.lesson.time,
            if self.lesson.paused { " (paused)" } else { "" },
            self.lesson.level,
            self.lesson.field.strength
        )
    }
}

impl Visualization for App {
    fn update(&mut self, dt: f32) {
        self.lesson.update(dt);
    }

    fn render(&mut self, gfx: &GraphicsContext) -> Result<(), wgpu::SurfaceError> {
        self.build_scene();
        self.shapes.update_camera(&gfx.queue, &self.camera);

        let status = self.status_text();
        let section = self.lesson.stage.section();
        let viewport = gfx.viewport();

        gfx.frame(|encoder, view| {
            self.shapes
                .draw(&gfx.queue, encoder, view, &self.batch, CLEAR);
            self.overlay.render(gfx, encoder, view, |ctx| {
                Sidebar::new("Schrödinger's Equation", SCHRODINGER_SECTIONS)
                    .variables(SCHRODINGER_VARIABLES)
                    .active(section)
                    .show(ctx);
                draw_status_bar(ctx, false, |ui| {
                    ui.label(&status);
                });
                let map = WorldToUi::new(ctx, &self.camera, viewport);
                paint_labels(ctx, &map, &self.labels);
            });
        })
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        if state != ElementState::Pressed {
            return;
        }

        match key {
            KeyCode::ArrowRight | KeyCode::Space => self.lesson.advance(),
            KeyCode::ArrowLeft => self.lesson.back(),
            KeyCode::Digit1 => self.lesson.set_level(1),
            KeyCode::Digit2 => self.lesson.set_level(2),
            KeyCode::Digit3 => self.lesson.set_level(3),
            KeyCode::Digit4 => self.lesson.set_level(4),
            KeyCode::ArrowUp => self.lesson.adjust_field(FIELD_STEP),
            KeyCode::ArrowDown => self.lesson.adjust_field(-FIELD_STEP),
            KeyCode::KeyP => {
                self.lesson.paused = !self.lesson.paused;
                log::info!("clock {}", if self.lesson.paused { "paused" } else { "running" });
            }
            KeyCode::KeyR => self.lesson.restart(),
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
    println!("Schrödinger's Equation - Separation of Variables");
    println!();
    println!("Controls:");
    println!("  Right/Space - Next stage");
    println!("  Left        - Previous stage");
    println!("  1/2/3/4     - Quantum number");
    println!("  Up/Down     - Field strength");
    println!("  P           - Pause");
    println!("  R           - Restart");
    println!("  Scroll      - Zoom");
    println!();

    common::run(
        "Schrödinger's Equation - Separation of Variables",
        1280,
        720,
        App::new,
    )
}
