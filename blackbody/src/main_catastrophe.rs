//! Ultraviolet Catastrophe Visualization
//!
//! Planck's law against the classical Rayleigh-Jeans law on a logarithmic
//! axis. The region where the classical prediction exceeds Planck's is
//! shaded red; it grows without bound toward short wavelengths.
//!
//! Controls:
//! - Up/Down: Raise/lower the temperature by 250 K
//! - M: Switch between energy density and spectral radiance
//! - R: Reset

use blackbody::chart::{Axis, Chart};
use blackbody::equations::{CATASTROPHE_SECTIONS, CATASTROPHE_VARIABLES};
use blackbody::plot::{draw_axes, draw_curve, fill_region, AxesStyle};
use blackbody::radiation::{wien_peak_nm, RADIANCE_SCALE_KW_NM};
use blackbody::spectrum::{linspace, Curve, Law, DEFAULT_POINTS, VISIBLE_RANGE_NM};
use common::equations_ui::{draw_status_bar, Sidebar};
use common::{
    paint_labels, rgb_hex, BatchCapacity, Camera2D, EguiOverlay, GraphicsContext, ShapeBatch,
    ShapeRenderer, Visualization, WorldLabel, WorldToUi,
};
use egui::{Align2, Color32};
use glam::{Vec2, Vec3};
use winit::{event::ElementState, event::WindowEvent, keyboard::KeyCode, window::Window};

const INITIAL_TEMPERATURE: f64 = 5000.0;
const TEMPERATURE_STEP: f64 = 250.0;
const TEMPERATURE_LIMITS: (f64, f64) = (1000.0, 10_000.0);

/// 0.1 µm to 3 µm
const RANGE_NM: (f64, f64) = (100.0, 3000.0);

const PLANCK_COLOR: u32 = 0x3DA8AD;
const CLASSICAL_COLOR: u32 = 0xFF7C00;
const CATASTROPHE_FILL: [f32; 4] = [1.0, 0.1, 0.1, 0.3];

const CLEAR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.04,
    a: 1.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quantity {
    EnergyDensity,
    Radiance,
}

impl Quantity {
    fn axis_title(self) -> &'static str {
        match self {
            Quantity::EnergyDensity => "Energy density u (J·m⁻⁴)",
            Quantity::Radiance => "Spectral radiance B (kW·sr⁻¹·m⁻²·nm⁻¹)",
        }
    }

    fn sample(self, law: Law, temperature: f64, grid: &[f64]) -> Curve {
        match (self, law) {
            (Quantity::EnergyDensity, _) => Curve::energy_density(law, temperature, grid),
            (Quantity::Radiance, Law::Planck) => {
                Curve::planck(temperature, grid, RADIANCE_SCALE_KW_NM)
            }
            (Quantity::Radiance, Law::RayleighJeans) => {
                Curve::rayleigh_jeans(temperature, grid, RADIANCE_SCALE_KW_NM)
            }
        }
    }
}

struct App {
    shapes: ShapeRenderer,
    overlay: EguiOverlay,
    camera: Camera2D,
    batch: ShapeBatch,
    labels: Vec<WorldLabel>,
    grid: Vec<f64>,
    temperature: f64,
    quantity: Quantity,
    planck: Curve,
    classical: Curve,
}

impl App {
    fn new(gfx: &GraphicsContext) -> Self {
        let mut camera = Camera2D::new(gfx.aspect_ratio());
        camera.zoom = 5.0;
        camera.position = Vec3::new(0.9, 0.0, 0.0);

        let grid = linspace(RANGE_NM.0, RANGE_NM.1, DEFAULT_POINTS);
        let quantity = Quantity::EnergyDensity;

        Self {
            shapes: ShapeRenderer::new(gfx, BatchCapacity::default()),
            overlay: EguiOverlay::new(gfx),
            camera,
            batch: ShapeBatch::new(),
            labels: Vec::new(),
            planck: quantity.sample(Law::Planck, INITIAL_TEMPERATURE, &grid),
            classical: quantity.sample(Law::RayleighJeans, INITIAL_TEMPERATURE, &grid),
            grid,
            temperature: INITIAL_TEMPERATURE,
            quantity,
        }
    }

    fn resample(&mut self) {
        self.planck = self
            .quantity
            .sample(Law::Planck, self.temperature, &self.grid);
        self.classical = self
            .quantity
            .sample(Law::RayleighJeans, self.temperature, &self.grid);
    }

    fn set_temperature(&mut self, temperature: f64) {
        self.temperature = temperature.clamp(TEMPERATURE_LIMITS.0, TEMPERATURE_LIMITS.1);
        self.resample();
        log::debug!("temperature set to {} K", self.temperature);
    }

    fn chart(&self) -> Chart {
        // Five decades below Planck's peak up to the classical value at the short end
        let peak = self.planck.peak().map_or(1.0, |p| p[1]).max(1e-12);
        let top = self
            .classical
            .values()
            .filter(|v| v.is_finite())
            .fold(peak, f64::max);

        Chart::new(
            Axis::linear(RANGE_NM.0, RANGE_NM.1),
            Axis::log10(peak * 1e-5, top * 3.0),
            Vec2::new(-7.0, -3.6),
            Vec2::new(10.5, 7.2),
        )
    }

    fn build_scene(&mut self) {
        self.batch.clear();
        self.labels.clear();

        let chart = self.chart();

        // Ultraviolet part of the range
        if let Some((min, max)) = chart.band(RANGE_NM.0, VISIBLE_RANGE_NM.0) {
            self.batch.filled_rect(min, max, [0.55, 0.25, 0.9, 0.12]);
            self.labels.push(
                WorldLabel::new(Vec2::new((min.x + max.x) * 0.5, min.y + 0.1), "UV")
                    .size(12.0)
                    .anchor(Align2::CENTER_BOTTOM),
            );
        }

        fill_region(
            &mut self.batch,
            &chart,
            &self.planck.points,
            &self.classical.points,
            CATASTROPHE_FILL,
        );

        let style = AxesStyle {
            x_title: "Wavelength λ (nm)",
            y_title: self.quantity.axis_title(),
            x_step: 500.0,
            y_step: 0.0,
            grid: true,
        };
        draw_axes(&mut self.batch, &mut self.labels, &chart, &style);

        draw_curve(
            &mut self.batch,
            &chart,
            &self.classical.points,
            rgb_hex(CLASSICAL_COLOR, 1.0),
        );
        draw_curve(
            &mut self.batch,
            &chart,
            &self.planck.points,
            rgb_hex(PLANCK_COLOR, 1.0),
        );

        if let Some(peak) = self.planck.peak().and_then(|p| chart.to_world(p[0], p[1])) {
            self.batch.disc(peak, 0.08, rgb_hex(0xFFFFFF, 1.0));
            self.labels.push(
                WorldLabel::new(peak + Vec2::new(0.2, 0.2), "Planck's law")
                    .color(Color32::from_rgb(0x3D, 0xA8, 0xAD))
                    .anchor(Align2::LEFT_BOTTOM),
            );
        }

        // Label the classical curve where it crosses the middle of the frame
        let mid_y = chart.origin.y + chart.size.y * 0.5;
        if let Some(p) = self
            .classical
            .points
            .iter()
            .filter_map(|p| chart.to_world(p[0], p[1]))
            .find(|p| p.y <= mid_y)
        {
            self.labels.push(
                WorldLabel::new(p + Vec2::new(0.2, 0.1), "Rayleigh-Jeans law")
                    .color(Color32::from_rgb(0xFF, 0x7C, 0x00))
                    .anchor(Align2::LEFT_BOTTOM),
            );
        }

        self.labels.push(
            WorldLabel::new(
                chart.origin + Vec2::new(0.3, chart.size.y - 0.3),
                "Ultraviolet catastrophe",
            )
            .size(16.0)
            .color(Color32::from_rgb(255, 90, 90))
            .anchor(Align2::LEFT_TOP),
        );
    }

    fn status_text(&self) -> String {
        // Ratio of the two laws at the short end of the range
        let ratio = match (self.classical.points.first(), self.planck.points.first()) {
            (Some(c), Some(p)) if p[1] > 0.0 => c[1] / p[1],
            _ => f64::INFINITY,
        };
        format!(
            "T = {:.0} K | Planck peak λ = {:.1} nm | Rayleigh-Jeans / Planck at {:.0} nm = {ratio:.2e} | {}",
            self.temperature,
            wien_peak_nm(self.temperature),
            RANGE_NM.0,
            match self.quantity {
                Quantity::EnergyDensity => "energy density",
                Quantity::Radiance => "spectral radiance",
            },
        )
    }
}

impl Visualization for App {
    fn update(&mut self, _dt: f32) {}

    fn render(&mut self, gfx: &GraphicsContext) -> Result<(), wgpu::SurfaceError> {
        self.build_scene();
        self.shapes.update_camera(&gfx.queue, &self.camera);

        let status = self.status_text();
        let viewport = gfx.viewport();

        gfx.frame(|encoder, view| {
            self.shapes
                .draw(&gfx.queue, encoder, view, &self.batch, CLEAR);
            self.overlay.render(gfx, encoder, view, |ctx| {
                Sidebar::new("Ultraviolet Catastrophe", CATASTROPHE_SECTIONS)
                    .variables(CATASTROPHE_VARIABLES)
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
            KeyCode::ArrowUp => self.set_temperature(self.temperature + TEMPERATURE_STEP),
            KeyCode::ArrowDown => self.set_temperature(self.temperature - TEMPERATURE_STEP),
            KeyCode::KeyM => {
                self.quantity = match self.quantity {
                    Quantity::EnergyDensity => Quantity::Radiance,
                    Quantity::Radiance => Quantity::EnergyDensity,
                };
                self.resample();
                log::info!("showing {:?}", self.quantity);
            }
            KeyCode::KeyR => {
                self.quantity = Quantity::EnergyDensity;
                self.set_temperature(INITIAL_TEMPERATURE);
            }
            _ => {}
        }
    }

    fn resized(&mut self, gfx: &GraphicsContext) {
        self.camera.update_aspect_ratio(gfx.aspect_ratio());
    }

    fn handle_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.overlay.on_window_event(window, event)
    }
}

fn main() -> anyhow::Result<()> {
    println!("Ultraviolet Catastrophe - Planck vs Rayleigh-Jeans");
    println!();
    println!("Controls:");
    println!("  Up/Down  - Adjust temperature");
    println!("  M        - Toggle energy density / spectral radiance");
    println!("  R        - Reset");
    println!();

    common::run(
        "Ultraviolet Catastrophe - Planck vs Rayleigh-Jeans",
        1280,
        720,
        App::new,
    )
}
