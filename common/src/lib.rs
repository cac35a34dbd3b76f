//! Common utilities for the quantum visualizations
//!
//! This crate provides shared graphics setup, the 2D camera, an instanced shape
//! renderer, the egui overlay and the event loop used by every visualization.

pub mod app;
pub mod camera;
pub mod equations_ui;
pub mod graphics;
pub mod overlay;
pub mod renderer;

pub use app::{run, Visualization};
pub use camera::*;
pub use graphics::*;
pub use overlay::{paint_labels, world_label, EguiOverlay, WorldLabel, WorldToUi};
pub use renderer::{rgb_hex, BatchCapacity, PointInstance, ShapeBatch, ShapeRenderer};

/// Physical constants in SI units
pub mod constants {
    /// Planck constant (J·s)
    pub const H: f64 = 6.626_070_15e-34;

    /// Reduced Planck constant h/2π (J·s)
    pub const HBAR: f64 = 1.054_571_817e-34;

    /// Speed of light in m/s
    pub const C: f64 = 299_792_458.0;

    /// Boltzmann constant (J/K)
    pub const K_B: f64 = 1.380_649e-23;

    /// Wien's displacement constant (m·K)
    pub const WIEN_B: f64 = 2.897_771_955e-3;

    /// Stefan-Boltzmann constant (W·m⁻²·K⁻⁴)
    pub const SIGMA: f64 = 5.670_374_419e-8;

    /// Elementary charge (C)
    pub const E_CHARGE: f64 = 1.602_176_634e-19;

    /// Electron mass (kg)
    pub const M_E: f64 = 9.109_383_701_5e-31;

    /// One electronvolt in joules
    pub const EV: f64 = E_CHARGE;
}
