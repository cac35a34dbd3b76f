//! Planck Spectrum Visualization
//!
//! Blackbody curves for several temperatures with their Wien peaks, the
//! visible band and a check of the Stefan-Boltzmann law.
//!
//! Controls:
//! - 1/2/3/4: Select a curve
//! - Up/Down: Raise/lower the selected temperature by 100 K
//! - S: Set the selected curve to the Sun's surface temperature
//! - L: Toggle linear/log radiance axis
//! - W: Toggle Wien peak markers
//! - V: Toggle visible band
//! - R: Reset temperatures

use blackbody::chart::{nice_step, Axis, Chart};
use blackbody::equations::{PLANCK_SECTIONS, PLANCK_VARIABLES};
use blackbody::plot::{draw_axes, draw_curve, draw_dashed_curve, AxesStyle};
use blackbody::radiation::{
    radiant_exitance_numeric, stefan_boltzmann, wien_peak_nm, RADIANCE_SCALE_KW_NM,
};
use blackbody::spectrum::{
    linspace, temperature_color, wavelength_grid_nm, wavelength_to_rgb, wien_marker, Band, Curve,
    DEFAULT_POINTS, DEFAULT_RANGE_NM, SUN_SURFACE_TEMPERATURE, VISIBLE_RANGE_NM,
};
use common::equations_ui::{draw_status_bar, Sidebar};
use common::{
    paint_labels, rgb_hex, BatchCapacity, Camera2D, EguiOverlay, GraphicsContext, ShapeBatch,
    ShapeRenderer, Visualization, WorldLabel, WorldToUi,
};
use egui::{Align2, Color32};
use glam::{Vec2, Vec3};
use winit::{event::ElementState, event::WindowEvent, keyboard::KeyCode, window::Window};

const INITIAL_TEMPERATURES: [f64; 4] = [3000.0, 4000.0, 5000.0, 6000.0];
const TEMPERATURE_STEP: f64 = 100.0;
const TEMPERATURE_LIMITS: (f64, f64) = (500.0, 12_000.0);
const INTEGRAL_STEPS: usize = 2000;

const CLEAR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.04,
    a: 1.0,
};

struct App {
    shapes: ShapeRenderer,
    overlay: EguiOverlay,
    camera: Camera2D,
    batch: ShapeBatch,
    labels: Vec<WorldLabel>,
    grid: Vec<f64>,
    targets: [f64; 4],
    displayed: [f64; 4],
    selected: usize,
    log_scale: bool,
    show_wien: bool,
    show_visible: bool,
    /// (temperature, numeric π∫B dλ) for the selected curve
    exitance: (f64, f64),
}

impl App {
    fn new(gfx: &GraphicsContext) -> Self {
        let mut camera = Camera2D::new(gfx.aspect_ratio());
        camera.zoom = 5.0;
        camera.position = Vec3::new(0.9, 0.0, 0.0);

        Self {
            shapes: ShapeRenderer::new(gfx, BatchCapacity::default()),
            overlay: EguiOverlay::new(gfx),
            camera,
            batch: ShapeBatch::new(),
            labels: Vec::new(),
            grid: wavelength_grid_nm(DEFAULT_RANGE_NM, DEFAULT_POINTS),
            targets: INITIAL_TEMPERATURES,
            displayed: INITIAL_TEMPERATURES,
            selected: 2,
            log_scale: false,
            show_wien: true,
            show_visible: true,
            exitance: (0.0, 0.0),
        }
    }

    fn chart(&self) -> Chart {
        // The hottest curve sets the vertical range
        let hottest = self.displayed.iter().copied().fold(0.0, f64::max);
        let peak = wien_marker(hottest, RADIANCE_SCALE_KW_NM)[1].max(1e-6);

        let y = if self.log_scale {
            Axis::log10(peak * 1e-4, peak * 2.0)
        } else {
            Axis::linear(0.0, peak * 1.1)
        };

        Chart::new(
            Axis::linear(DEFAULT_RANGE_NM.0, DEFAULT_RANGE_NM.1),
            y,
            Vec2::new(-7.0, -3.6),
            Vec2::new(10.5, 7.2),
        )
    }

    fn selected_temperature(&self) -> f64 {
        self.targets[self.selected]
    }

    fn set_selected(&mut self, temperature: f64) {
        let t = temperature.clamp(TEMPERATURE_LIMITS.0, TEMPERATURE_LIMITS.1);
        self.targets[self.selected] = t;
        log::debug!("curve {} set to {t} K", self.selected + 1);
    }

    fn build_scene(&mut self) {
        self.batch.clear();
        self.labels.clear();

        let chart = self.chart();

        if self.show_visible {
            self.draw_visible_band(&chart);
        }

        let style = AxesStyle {
            x_title: "Wavelength λ (nm)",
            y_title: "Spectral radiance B (kW·sr⁻¹·m⁻²·nm⁻¹)",
            x_step: 500.0,
            y_step: nice_step(chart.y.max - chart.y.min, 6),
            grid: true,
        };
        draw_axes(&mut self.batch, &mut self.labels, &chart, &style);

        if self.show_wien {
            // Locus of the peaks as the temperature varies
            let locus: Vec<[f64; 2]> = linspace(1000.0, TEMPERATURE_LIMITS.1, 200)
                .into_iter()
                .map(|t| wien_marker(t, RADIANCE_SCALE_KW_NM))
                .collect();
            draw_dashed_curve(&mut self.batch, &chart, &locus, [1.0, 1.0, 1.0, 0.35]);
        }

        for (i, &t) in self.displayed.iter().enumerate() {
            let selected = i == self.selected;
            let color = rgb_hex(temperature_color(t), if selected { 1.0 } else { 0.65 });
            let curve = Curve::planck(t, &self.grid, RADIANCE_SCALE_KW_NM);
            draw_curve(&mut self.batch, &chart, &curve.points, color);

            let Some(label_at) = curve
                .peak()
                .and_then(|p| chart.to_world(p[0], p[1]))
                .filter(|p| p.y <= chart.top_right().y)
            else {
                continue;
            };

            if self.show_wien {
                let [peak_nm, peak_b] = wien_marker(t, RADIANCE_SCALE_KW_NM);
                if let (Some(top), Some(foot)) =
                    (chart.to_world(peak_nm, peak_b), chart.x_on_axis(peak_nm))
                {
                    self.batch
                        .dashed_polyline(&[foot, top], 0.1, 0.08, rgb_hex(0xFFFFFF, 0.4));
                    self.batch.disc(top, 0.08, rgb_hex(0xFFFFFF, 1.0));
                }
            }

            self.labels.push(
                WorldLabel::new(label_at + Vec2::new(0.15, 0.15), format!("{t:.0} K"))
                    .color(to_color32(color))
                    .anchor(Align2::LEFT_BOTTOM),
            );
        }
    }

    fn draw_visible_band(&mut self, chart: &Chart) {
        let edges = linspace(VISIBLE_RANGE_NM.0, VISIBLE_RANGE_NM.1, 38);
        for pair in edges.windows(2) {
            let Some((min, max)) = chart.band(pair[0], pair[1]) else {
                continue;
            };
            let [lr, lg, lb] = wavelength_to_rgb(pair[0]);
            let [rr, rg, rb] = wavelength_to_rgb(pair[1]);
            self.batch
                .gradient_rect(min, max, [lr, lg, lb, 0.22], [rr, rg, rb, 0.22]);
        }

        if let Some((min, max)) = chart.band(VISIBLE_RANGE_NM.0, VISIBLE_RANGE_NM.1) {
            self.labels.push(
                WorldLabel::new(Vec2::new((min.x + max.x) * 0.5, max.y - 0.1), "Visible")
                    .size(12.0)
                    .anchor(Align2::CENTER_TOP),
            );
        }
    }

    fn status_text(&self) -> String {
        let t = self.selected_temperature();
        let peak = wien_peak_nm(t);
        let exact = stefan_boltzmann(t);
        let numeric = self.exitance.1;
        format!(
            "Curve {}: T = {t:.0} K | λ_max = {peak:.1} nm ({}) | σT⁴ = {exact:.4e} W/m² | π∫B dλ = {numeric:.4e} W/m² ({:+.3}%) | {} axis",
            self.selected + 1,
            Band::of(peak).name(),
            (numeric - exact) / exact * 100.0,
            if self.log_scale { "log" } else { "linear" },
        )
    }
}

fn to_color32(c: [f32; 4]) -> Color32 {
    Color32::from_rgba_unmultiplied(
        (c[0] * 255.0) as u8,
        (c[1] * 255.0) as u8,
        (c[2] * 255.0) as u8,
        (c[3] * 255.0) as u8,
    )
}

impl Visualization for App {
    fn update(&mut self, dt: f32) {
        // Curves glide toward their target temperatures
        let blend = (dt as f64 * 8.0).min(1.0);
        for (shown, target) in self.displayed.iter_mut().zip(self.targets) {
            *shown += (target - *shown) * blend;
            if (target - *shown).abs() < 0.5 {
                *shown = target;
            }
        }

        let t = self.selected_temperature();
        if self.exitance.0 != t {
            self.exitance = (t, radiant_exitance_numeric(t, INTEGRAL_STEPS));
        }
    }

    fn render(&mut self, gfx: &GraphicsContext) -> Result<(), wgpu::SurfaceError> {
        self.build_scene();
        self.shapes.update_camera(&gfx.queue, &self.camera);

        let status = self.status_text();
        let viewport = gfx.viewport();

        gfx.frame(|encoder, view| {
            self.shapes
                .draw(&gfx.queue, encoder, view, &self.batch, CLEAR);
            self.overlay.render(gfx, encoder, view, |ctx| {
                Sidebar::new("Blackbody Radiation", PLANCK_SECTIONS)
                    .variables(PLANCK_VARIABLES)
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
            KeyCode::Digit1 => self.selected = 0,
            KeyCode::Digit2 => self.selected = 1,
            KeyCode::Digit3 => self.selected = 2,
            KeyCode::Digit4 => self.selected = 3,
            KeyCode::ArrowUp => self.set_selected(self.selected_temperature() + TEMPERATURE_STEP),
            KeyCode::ArrowDown => {
                self.set_selected(self.selected_temperature() - TEMPERATURE_STEP)
            }
            KeyCode::KeyS => {
                self.set_selected(SUN_SURFACE_TEMPERATURE);
                log::info!("curve {} set to the Sun's surface", self.selected + 1);
            }
            KeyCode::KeyL => self.log_scale = !self.log_scale,
            KeyCode::KeyW => self.show_wien = !self.show_wien,
            KeyCode::KeyV => self.show_visible = !self.show_visible,
            KeyCode::KeyR => {
                self.targets = INITIAL_TEMPERATURES;
                log::info!("temperatures reset");
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

fn print_wien_table() {
    println!("Wien's displacement law, λ_max = b / T");
    for t in INITIAL_TEMPERATURES
        .iter()
        .copied()
        .chain(std::iter::once(SUN_SURFACE_TEMPERATURE))
    {
        let peak = wien_peak_nm(t);
        println!(
            "  {t:>6.0} K  λ_max = {peak:7.1} nm  {:<11}  σT⁴ = {:.3e} W/m²",
            Band::of(peak).name(),
            stefan_boltzmann(t)
        );
    }
    println!();
}

fn main() -> anyhow::Result<()> {
    println!("Planck Spectrum - Blackbody Radiation");
    println!();
    print_wien_table();
    println!("Controls:");
    println!("  1/2/3/4  - Select curve");
    println!("  Up/Down  - Adjust selected temperature");
    println!("  S        - Sun's surface temperature (5778 K)");
    println!("  L        - Toggle log scale");
    println!("  W        - Toggle Wien peaks");
    println!("  V        - Toggle visible band");
    println!("  R        - Reset");
    println!();

    common::run("Planck Spectrum - Blackbody Radiation", 1280, 720, App::new)
}
