//! An electron between charged plates
//!
//! The left plate is positive (red) and the right one negative (blue), so
//! the field between them is uniform and points along +x. The electron is
//! pulled towards the red plate and its potential energy grows linearly
//! towards the blue one, U(x) = eE·x.

use crate::eigen::matrix;
use crate::separation::InfiniteWell;
use glam::{DMat2, Vec2};

/// Plate size and centers before the scene is raised
pub const PLATE_SIZE: Vec2 = Vec2::new(2.0, 6.0);
pub const PLATE_OFFSET: f32 = 4.0;

/// Spacing of the field arrow grid and the arrow length
pub const ARROW_SPACING: f32 = 1.0;
pub const ARROW_LENGTH: f32 = 0.5;

/// Raised layout: plates and field shrink to half size and move up
pub const RAISED_SCALE: f32 = 0.5;
pub const RAISED_LIFT: f32 = 1.8;
/// The electron is lifted a little further than the plates
pub const ELECTRON_LIFT: f32 = 2.3;

/// Axes for the potential plot
pub const PLOT_X_RANGE: [f64; 2] = [-10.0, 10.0];
pub const PLOT_Y_RANGE: [f64; 2] = [-1.5, 1.5];

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plate {
    pub min: Vec2,
    pub max: Vec2,
}

impl Plate {
    fn around(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size * 0.5,
            max: center + size * 0.5,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// Arrow from `tail` to `tip`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldArrow {
    pub tail: Vec2,
    pub tip: Vec2,
}

/// World geometry of the plates, field and electron
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateScene {
    pub positive: Plate,
    pub negative: Plate,
    pub electron: Vec2,
    /// Current size relative to the unraised layout
    pub scale: f32,
}

impl PlateScene {
    /// Layout part way between the full-size scene (`raise` = 0) and the
    /// raised one (`raise` = 1) that leaves room for the plot below
    pub fn at(raise: f32) -> Self {
        let raise = raise.clamp(0.0, 1.0);
        let scale = 1.0 + (RAISED_SCALE - 1.0) * raise;
        let lift = Vec2::Y * (RAISED_LIFT * raise);
        let size = PLATE_SIZE * scale;
        let offset = Vec2::X * (PLATE_OFFSET * scale);

        Self {
            positive: Plate::around(-offset + lift, size),
            negative: Plate::around(offset + lift, size),
            electron: Vec2::Y * (ELECTRON_LIFT * raise),
            scale,
        }
    }

    /// Inner edges of the plates, left then right
    pub fn gap(&self) -> (f32, f32) {
        (self.positive.max.x, self.negative.min.x)
    }

    /// Uniform +x arrows on a grid spanning the gap and the plate height
    pub fn field_arrows(&self) -> Vec<FieldArrow> {
        let (left, right) = self.gap();
        let step = ARROW_SPACING * self.scale;
        let length = ARROW_LENGTH * self.scale;
        let columns = ((right - left) / step).round() as usize + 1;
        let rows = ((self.positive.max.y - self.positive.min.y) / step).round() as usize + 1;

        let mut arrows = Vec::with_capacity(columns * rows);
        for row in 0..rows {
            for column in 0..columns {
                let center = Vec2::new(
                    left + column as f32 * step,
                    self.positive.min.y + row as f32 * step,
                );
                arrows.push(FieldArrow {
                    tail: center - Vec2::X * (length / 2.0),
                    tip: center + Vec2::X * (length / 2.0),
                });
            }
        }
        arrows
    }
}

/// A uniform field of strength `strength` along +x acting on an electron
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformField {
    pub strength: f64,
}

impl UniformField {
    pub fn new(strength: f64) -> Self {
        Self { strength }
    }

    /// Field strength that spans the plot's y range over its x range
    pub fn spanning_plot() -> Self {
        Self::new(PLOT_Y_RANGE[1] / PLOT_X_RANGE[1])
    }

    /// U(x) = eE·x with e = 1
    pub fn potential_energy(&self, x: f64) -> f64 {
        self.strength * x
    }

    /// F = −eE, towards the positive plate
    pub fn force(&self) -> f64 {
        -self.strength
    }

    /// `(x, U(x))` samples across the plot
    pub fn potential_curve(&self, samples: usize) -> Vec<[f64; 2]> {
        let samples = samples.max(2);
        let [lo, hi] = PLOT_X_RANGE;
        (0..samples)
            .map(|i| {
                let x = lo + (hi - lo) * i as f64 / (samples - 1) as f64;
                [x, self.potential_energy(x)]
            })
            .collect()
    }
}

/// ⟨m|x|n⟩ for the well's stationary states, by the trapezoid rule
pub fn position_element(well: &InfiniteWell, m: u32, n: u32, points: usize) -> f64 {
    let grid = well.grid(points);
    let values: Vec<f64> = grid
        .points()
        .map(|x| well.psi(m, x) * x * well.psi(n, x))
        .collect();
    let ends = values.first().copied().unwrap_or(0.0) + values.last().copied().unwrap_or(0.0);
    (values.iter().sum::<f64>() - 0.5 * ends) * grid.dx()
}

/// Hamiltonian of the two lowest well states with the field switched on
///
/// H = [[E₁, eE⟨1|x|2⟩], [eE⟨2|x|1⟩, E₂]]. Its eigenvalues are the shifted
/// levels and its eigenvectors the field-mixed states.
pub fn two_level_hamiltonian(well: &InfiniteWell, field: &UniformField) -> DMat2 {
    let coupling = field.strength * position_element(well, 1, 2, 2001);
    matrix(well.energy(1), coupling, coupling, well.energy(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eigen::{eigenpairs, residual};
    use std::f64::consts::PI;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_full_size_layout() {
        let scene = PlateScene::at(0.0);
        assert!((scene.positive.center() - Vec2::new(-4.0, 0.0)).length() < EPS);
        assert!((scene.negative.center() - Vec2::new(4.0, 0.0)).length() < EPS);
        assert!((scene.positive.max - scene.positive.min - PLATE_SIZE).length() < EPS);
        assert_eq!(scene.gap(), (-3.0, 3.0));
        assert_eq!(scene.electron, Vec2::ZERO);
    }

    #[test]
    fn test_raised_layout() {
        let scene = PlateScene::at(1.0);
        assert!((scene.positive.center() - Vec2::new(-2.0, 1.8)).length() < EPS);
        assert!((scene.negative.max - scene.negative.min - Vec2::new(1.0, 3.0)).length() < EPS);
        assert!((scene.electron.y - 2.3).abs() < EPS);
        assert_eq!(PlateScene::at(5.0), scene);
    }

    #[test]
    fn test_field_arrows_point_along_x_between_plates() {
        for raise in [0.0, 0.5, 1.0] {
            let scene = PlateScene::at(raise);
            let arrows = scene.field_arrows();
            assert_eq!(arrows.len(), 49, "raise {raise}");

            let (left, right) = scene.gap();
            for arrow in &arrows {
                let d = arrow.tip - arrow.tail;
                assert!(d.x > 0.0 && d.y.abs() < EPS);
                assert!((d.length() - ARROW_LENGTH * scene.scale).abs() < EPS);
                let mid = (arrow.tail + arrow.tip) * 0.5;
                assert!(mid.x >= left - EPS && mid.x <= right + EPS);
                assert!(mid.y >= scene.positive.min.y - EPS && mid.y <= scene.positive.max.y + EPS);
            }
        }
    }

    #[test]
    fn test_potential_rises_towards_negative_plate() {
        let field = UniformField::spanning_plot();
        let curve = field.potential_curve(41);
        assert_eq!(curve.len(), 41);
        assert_eq!(curve[0][0], -10.0);
        assert!((curve[0][1] + 1.5).abs() < 1e-12);
        assert!((curve[40][1] - 1.5).abs() < 1e-12);
        assert!(curve.windows(2).all(|w| w[1][1] > w[0][1]));
        assert!(field.force() < 0.0);
    }

    #[test]
    fn test_position_element_matches_closed_form() {
        // ⟨1|x|2⟩ = −16L/(9π²) for ψₙ = √(2/L) sin(nπ(x + L/2)/L)
        let well = InfiniteWell::new(2.0);
        let x12 = position_element(&well, 1, 2, 4001);
        assert!((x12 + 32.0 / (9.0 * PI * PI)).abs() < 1e-6, "{x12}");
        assert!(position_element(&well, 1, 1, 4001).abs() < 1e-9);
    }

    #[test]
    fn test_field_mixes_and_splits_levels() {
        let well = InfiniteWell::new(2.0);
        let (e1, e2) = (well.energy(1), well.energy(2));

        let off = two_level_hamiltonian(&well, &UniformField::new(0.0));
        let [low, high] = eigenpairs(&off).unwrap();
        assert!((low.value - e1).abs() < 1e-12 && (high.value - e2).abs() < 1e-12);

        let field = UniformField::new(0.5);
        let h = two_level_hamiltonian(&well, &field);
        let [low, high] = eigenpairs(&h).unwrap();
        for pair in [&low, &high] {
            assert!(residual(&h, pair) < 1e-10);
        }
        assert!(low.value < e1 && high.value > e2);

        // Second-order shift −(eE⟨1|x|2⟩)²/(E₂ − E₁)
        let coupling = 0.5 * position_element(&well, 1, 2, 2001);
        let expected = e1 - coupling * coupling / (e2 - e1);
        assert!((low.value - expected).abs() < 1e-3, "{} vs {expected}", low.value);
    }
}
