//! Complex amplitudes sampled on a 1D grid

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Complex number for wavefunction amplitudes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };
    pub const ONE: Complex = Complex { re: 1.0, im: 0.0 };
    pub const I: Complex = Complex { re: 0.0, im: 1.0 };

    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    pub const fn real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    /// e^(iθ)
    pub fn exp_i(theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self { re: cos, im: sin }
    }

    /// |z|², the probability density of an amplitude
    pub fn norm_sq(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    pub fn norm(&self) -> f64 {
        self.re.hypot(self.im)
    }

    pub fn arg(&self) -> f64 {
        self.im.atan2(self.re)
    }

    pub fn conj(&self) -> Self {
        Self::new(self.re, -self.im)
    }
}

impl Add for Complex {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Mul<f64> for Complex {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.re * rhs, self.im * rhs)
    }
}

impl Neg for Complex {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}

impl AddAssign for Complex {
    fn add_assign(&mut self, rhs: Self) {
        self.re += rhs.re;
        self.im += rhs.im;
    }
}

/// `n` evenly spaced points covering `[x_min, x_max]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub x_min: f64,
    pub x_max: f64,
    pub n: usize,
}

impl Grid {
    pub fn new(x_min: f64, x_max: f64, n: usize) -> Self {
        Self {
            x_min,
            x_max,
            n: n.max(2),
        }
    }

    pub fn dx(&self) -> f64 {
        (self.x_max - self.x_min) / (self.n - 1) as f64
    }

    pub fn x_at(&self, i: usize) -> f64 {
        self.x_min + i as f64 * self.dx()
    }

    pub fn points(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.n).map(|i| self.x_at(i))
    }
}

/// A wavefunction sampled on a [`Grid`]
#[derive(Debug, Clone)]
pub struct Wavefunction1D {
    pub grid: Grid,
    pub psi: Vec<Complex>,
}

impl Wavefunction1D {
    pub fn from_fn(grid: Grid, f: impl Fn(f64) -> Complex) -> Self {
        Self {
            grid,
            psi: grid.points().map(f).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.psi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.psi.is_empty()
    }

    pub fn probability_density(&self) -> Vec<f64> {
        self.psi.iter().map(Complex::norm_sq).collect()
    }

    /// ∫|ψ|² dx by the trapezoid rule
    pub fn norm_sq(&self) -> f64 {
        let density = self.probability_density();
        let Some((&first, &last)) = density.first().zip(density.last()) else {
            return 0.0;
        };
        let inner: f64 = density.iter().sum::<f64>() - 0.5 * (first + last);
        inner * self.grid.dx()
    }

    /// Scale to ∫|ψ|² dx = 1; an all-zero wavefunction is left alone
    pub fn normalize(&mut self) {
        let norm = self.norm_sq().sqrt();
        if norm > 1e-12 {
            for c in &mut self.psi {
                *c = *c * (1.0 / norm);
            }
        }
    }

    /// `(x, f(ψ(x)))` pairs for plotting
    pub fn curve(&self, f: impl Fn(Complex) -> f64) -> Vec<[f64; 2]> {
        self.grid
            .points()
            .zip(&self.psi)
            .map(|(x, &c)| [x, f(c)])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_complex_arithmetic() {
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, -1.0);
        assert_eq!(a * b, Complex::new(5.0, 5.0));
        assert_eq!(a + b, Complex::new(4.0, 1.0));
        assert_eq!(a - b, Complex::new(-2.0, 3.0));
        assert_eq!(-a, Complex::new(-1.0, -2.0));
        assert_eq!((a * a.conj()).im, 0.0);
        assert!((a.norm_sq() - 5.0).abs() < EPS);
        assert_eq!(Complex::I * Complex::I, -Complex::ONE);
    }

    #[test]
    fn test_exp_i_is_a_unit_phase() {
        for i in 0..16 {
            let theta = i as f64 * PI / 8.0 - PI + 0.01;
            let z = Complex::exp_i(theta);
            assert!((z.norm() - 1.0).abs() < EPS);
            assert!((z.arg() - theta).abs() < EPS);
        }
    }

    #[test]
    fn test_grid_spacing() {
        let grid = Grid::new(-1.0, 1.0, 5);
        assert!((grid.dx() - 0.5).abs() < EPS);
        let xs: Vec<f64> = grid.points().collect();
        assert_eq!(xs, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(Grid::new(0.0, 1.0, 0).n, 2);
    }

    #[test]
    fn test_sine_in_box_is_normalized() {
        // √2 sin(πx) on [0, 1] has unit norm
        let grid = Grid::new(0.0, 1.0, 1001);
        let psi = Wavefunction1D::from_fn(grid, |x| Complex::real(2f64.sqrt() * (PI * x).sin()));
        assert!((psi.norm_sq() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize() {
        let grid = Grid::new(-5.0, 5.0, 2001);
        let mut psi = Wavefunction1D::from_fn(grid, |x| {
            Complex::exp_i(3.0 * x) * (3.0 * (-x * x / 2.0).exp())
        });
        psi.normalize();
        assert!((psi.norm_sq() - 1.0).abs() < 1e-9);

        let mut zero = Wavefunction1D::from_fn(grid, |_| Complex::ZERO);
        zero.normalize();
        assert_eq!(zero.norm_sq(), 0.0);
    }
}
