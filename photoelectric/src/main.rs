//! Photoelectric Effect Visualization
//!
//! Photons strike the emitter plate of a vacuum chamber. Above the threshold
//! frequency they eject electrons, which climb toward the collector against
//! the retarding voltage shown on the voltmeter.
//!
//! Controls:
//! - Left/Right: Shorter/longer wavelength
//! - Up/Down: Raise/lower the retarding voltage
//! - +/-: Light intensity
//! - M: Next metal
//! - F: Fire a single photon
//! - Space: Pause/resume
//! - R: Reset counters

use blackbody::spectrum::wavelength_to_rgb;
use common::equations_ui::{draw_status_bar, Sidebar};
use common::{
    paint_labels, rgb_hex, BatchCapacity, Camera2D, EguiOverlay, GraphicsContext, ShapeBatch,
    ShapeRenderer, Visualization, WorldLabel, WorldToUi,
};
use egui::{Align2, Color32};
use glam::{Vec2, Vec3};
use photoelectric::apparatus::Apparatus;
use photoelectric::equations::{PHOTOELECTRIC_SECTIONS, PHOTOELECTRIC_VARIABLES};
use photoelectric::experiment::{Experiment, Settings};
use photoelectric::physics::photon_frequency;
use winit::{event::ElementState, event::WindowEvent, keyboard::KeyCode, window::Window};

const WAVELENGTH_STEP: f64 = 10.0;
const VOLTAGE_STEP: f64 = 0.1;
const INTENSITY_STEP: f32 = 1.0;

const WIRE_COLOR: u32 = 0xFF4040;
const CHAMBER_COLOR: u32 = 0x4A90E2;
const ELECTRON_COLOR: [f32; 4] = [0.3, 0.55, 1.0, 1.0];

const CLEAR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.05,
    a: 1.0,
};

/// Display color of light; ultraviolet shows as violet and infrared as dark red
fn light_color(wavelength_nm: f64) -> [f32; 4] {
    if wavelength_nm < 380.0 {
        [0.65, 0.35, 1.0, 1.0]
    } else if wavelength_nm > 750.0 {
        [0.55, 0.1, 0.1, 1.0]
    } else {
        let [r, g, b] = wavelength_to_rgb(wavelength_nm);
        [r.max(0.25), g.max(0.25), b.max(0.25), 1.0]
    }
}

struct App {
    shapes: ShapeRenderer,
    overlay: EguiOverlay,
    camera: Camera2D,
    batch: ShapeBatch,
    labels: Vec<WorldLabel>,
    experiment: Experiment,
    /// Smoothed needle angle in degrees
    needle: f32,
    paused: bool,
    time: f32,
}

impl App {
    fn new(gfx: &GraphicsContext) -> Self {
        let mut camera = Camera2D::new(gfx.aspect_ratio());
        camera.zoom = 3.5;
        camera.position = Vec3::new(0.3, 0.0, 0.0);

        Self {
            shapes: ShapeRenderer::new(gfx, BatchCapacity::default()),
            overlay: EguiOverlay::new(gfx),
            camera,
            batch: ShapeBatch::new(),
            labels: Vec::new(),
            experiment: Experiment::new(Apparatus::default(), Settings::default()),
            needle: 0.0,
            paused: false,
            time: 0.0,
        }
    }

    fn build_scene(&mut self) {
        self.batch.clear();
        self.labels.clear();

        let a = &self.experiment.apparatus;
        let wire = rgb_hex(WIRE_COLOR, 1.0);

        // Chamber
        self.batch
            .filled_rect(a.chamber.min, a.chamber.max, rgb_hex(CHAMBER_COLOR, 0.06));
        self.batch
            .rect_outline(a.chamber.min, a.chamber.max, rgb_hex(CHAMBER_COLOR, 1.0));

        // Plates
        let metal = self.experiment.settings.metal;
        let mut emitter_color = metal.color();
        emitter_color[3] = 0.8;
        self.batch
            .filled_rect(a.emitter.min, a.emitter.max, emitter_color);
        self.batch
            .filled_rect(a.collector.min, a.collector.max, [0.55, 0.55, 0.6, 0.6]);

        // Circuit
        for [from, to] in a.plate_wires {
            self.batch.line(from, to, wire);
        }
        self.batch.polyline(&a.collector_circuit, wire);
        self.batch.polyline(&a.emitter_circuit, wire);
        self.batch.disc(a.emitter_terminal, a.style.terminal_radius, wire);
        self.batch
            .disc(a.collector_terminal, a.style.terminal_radius, wire);

        // Voltmeter
        self.batch.circle_outline(
            a.voltmeter_center,
            a.style.voltmeter_radius,
            48,
            [1.0, 1.0, 1.0, 1.0],
        );
        let tip = a.needle_end(self.needle);
        self.batch.arrow(a.voltmeter_center, tip, 0.1, wire);

        // Photons with a short wave trail
        let light = light_color(self.experiment.settings.wavelength_nm);
        for photon in &self.experiment.photons {
            let dir = (photon.target - photon.position).normalize_or_zero();
            let normal = dir.perp();
            let trail: Vec<Vec2> = (0..=24)
                .map(|i| {
                    let s = i as f32 / 24.0 * 0.8;
                    let wiggle = (s * 25.0 - self.time * 20.0).sin() * 0.06;
                    photon.position - dir * s + normal * wiggle
                })
                .collect();
            self.batch.polyline(&trail, [light[0], light[1], light[2], 0.7]);
            self.batch.disc(photon.position, 0.1, light);
        }

        for electron in &self.experiment.electrons {
            self.batch.disc(electron.position, 0.08, ELECTRON_COLOR);
        }

        // Labels
        self.labels.push(
            WorldLabel::new(a.emitter.bottom() - Vec2::Y * 0.3, "Emitter (Photocathode)")
                .anchor(Align2::CENTER_TOP),
        );
        self.labels.push(
            WorldLabel::new(a.collector.top() + Vec2::Y * 0.3, "Collector (Anode)")
                .anchor(Align2::CENTER_BOTTOM),
        );
        self.labels.push(
            WorldLabel::new(a.emitter.center(), metal.name())
                .size(12.0)
                .color(Color32::BLACK),
        );
        self.labels.push(
            WorldLabel::new(a.voltmeter_center - Vec2::Y * 0.25, "V")
                .size(18.0)
                .color(Color32::YELLOW),
        );
        self.labels.push(
            WorldLabel::new(
                a.voltmeter_center - Vec2::Y * (a.style.voltmeter_radius + 0.15),
                format!("{:+.2} V", self.experiment.settings.voltage),
            )
            .color(Color32::WHITE)
            .anchor(Align2::CENTER_TOP),
        );
        self.labels.push(
            WorldLabel::new(
                a.photon_spawn() + Vec2::Y * 0.35,
                format!("λ = {:.0} nm", self.experiment.settings.wavelength_nm),
            )
            .color(Color32::WHITE)
            .anchor(Align2::CENTER_BOTTOM),
        );
    }

    fn status_text(&self) -> String {
        let s = &self.experiment.settings;
        let k_max = match self.experiment.max_kinetic_energy() {
            Some(k) => format!("K_max = {k:.2} eV | V₀ = {k:.2} V"),
            None => "below threshold".to_string(),
        };
        let c = &self.experiment.counters;
        format!(
            "{} (W = {:.2} eV) | λ = {:.0} nm, ν = {:.3e} Hz, E = {:.2} eV | {k_max} | {:.0} photons/s | collected {} returned {} absorbed {} | current {}",
            s.metal.name(),
            s.metal.work_function(),
            s.wavelength_nm,
            photon_frequency(s.wavelength_nm),
            self.experiment.photon_energy(),
            s.intensity,
            c.collected,
            c.returned,
            c.absorbed,
            if self.experiment.current_flows() { "ON" } else { "OFF" },
        )
    }
}

impl Visualization for App {
    fn update(&mut self, dt: f32) {
        let target = self
            .experiment
            .apparatus
            .needle_angle(self.experiment.settings.voltage as f32);
        self.needle += (target - self.needle) * (dt * 10.0).min(1.0);

        if self.paused {
            return;
        }
        self.time += dt;
        self.experiment.step(dt);
    }

    fn render(&mut self, gfx: &GraphicsContext) -> Result<(), wgpu::SurfaceError> {
        self.build_scene();
        self.shapes.update_camera(&gfx.queue, &self.camera);

        let status = self.status_text();
        let viewport = gfx.viewport();
        let paused = self.paused;

        gfx.frame(|encoder, view| {
            self.shapes
                .draw(&gfx.queue, encoder, view, &self.batch, CLEAR);
            self.overlay.render(gfx, encoder, view, |ctx| {
                Sidebar::new("Photoelectric Effect", PHOTOELECTRIC_SECTIONS)
                    .variables(PHOTOELECTRIC_VARIABLES)
                    .show(ctx);
                draw_status_bar(ctx, paused, |ui| {
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

        let settings = self.experiment.settings;
        match key {
            KeyCode::Space => self.paused = !self.paused,
            KeyCode::ArrowLeft => self
                .experiment
                .set_wavelength(settings.wavelength_nm - WAVELENGTH_STEP),
            KeyCode::ArrowRight => self
                .experiment
                .set_wavelength(settings.wavelength_nm + WAVELENGTH_STEP),
            KeyCode::ArrowUp => self.experiment.set_voltage(settings.voltage + VOLTAGE_STEP),
            KeyCode::ArrowDown => self.experiment.set_voltage(settings.voltage - VOLTAGE_STEP),
            KeyCode::Equal | KeyCode::NumpadAdd => self
                .experiment
                .set_intensity(settings.intensity + INTENSITY_STEP),
            KeyCode::Minus | KeyCode::NumpadSubtract => self
                .experiment
                .set_intensity(settings.intensity - INTENSITY_STEP),
            KeyCode::KeyM => {
                let metal = settings.metal.next();
                self.experiment.set_metal(metal);
                log::info!(
                    "metal: {} (W = {:.2} eV, λ₀ = {:.0} nm)",
                    metal.name(),
                    metal.work_function(),
                    metal.threshold_wavelength_nm()
                );
            }
            KeyCode::KeyF => self.experiment.fire_photon(),
            KeyCode::KeyR => self.experiment.reset(),
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
    println!("Photoelectric Effect - Einstein's Photon Hypothesis");
    println!();
    println!("Controls:");
    println!("  Left/Right - Adjust wavelength");
    println!("  Up/Down    - Adjust retarding voltage");
    println!("  +/-        - Adjust intensity");
    println!("  M          - Next metal");
    println!("  F          - Fire one photon");
    println!("  Space      - Pause/Resume");
    println!("  R          - Reset counters");
    println!();

    common::run(
        "Photoelectric Effect - Einstein's Photon Hypothesis",
        1280,
        720,
        App::new,
    )
}
