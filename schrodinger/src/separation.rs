//! Separation of variables for the time-dependent Schrödinger equation
//!
//! iħ ∂Ψ/∂t = −ħ²/2m ∂²Ψ/∂x² + U(x)Ψ
//!
//! When U depends on x alone, the product Ψ(x,t) = ψ(x)φ(t) splits the
//! equation into −ħ²/2m ψ'' + Uψ = Eψ and iħ dφ/dt = Eφ, so that
//! φ(t) = e^(−iEt/ħ). Sums of such products are again solutions.
//!
//! Lengths, energies and times are scaled so that ħ = m = 1.

use crate::wavefunction::{Complex, Grid, Wavefunction1D};
use common::constants::{EV, HBAR as HBAR_SI, M_E};
use std::f64::consts::PI;

pub const HBAR: f64 = 1.0;
pub const MASS: f64 = 1.0;

/// The time factor φ(t) = e^(−iEt/ħ)
pub fn time_factor(energy: f64, t: f64) -> Complex {
    Complex::exp_i(-energy * t / HBAR)
}

/// Infinite square well of width `width` centered on the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InfiniteWell {
    pub width: f64,
}

impl InfiniteWell {
    pub fn new(width: f64) -> Self {
        Self { width }
    }

    pub fn contains(&self, x: f64) -> bool {
        x.abs() <= self.width / 2.0
    }

    /// Eₙ = n²π²ħ²/(2mL²); there is no state with n = 0
    pub fn energy(&self, n: u32) -> f64 {
        let k = n as f64 * PI / self.width;
        HBAR * HBAR * k * k / (2.0 * MASS)
    }

    /// ψₙ(x) = √(2/L) sin(nπ(x + L/2)/L) inside the well, zero outside
    pub fn psi(&self, n: u32, x: f64) -> f64 {
        if !self.contains(x) {
            return 0.0;
        }
        let l = self.width;
        (2.0 / l).sqrt() * (n as f64 * PI * (x + l / 2.0) / l).sin()
    }

    /// Grid spanning the well wall to wall
    pub fn grid(&self, points: usize) -> Grid {
        Grid::new(-self.width / 2.0, self.width / 2.0, points)
    }

    pub fn stationary(&self, n: u32) -> StationaryState {
        StationaryState {
            well: *self,
            n,
            energy: self.energy(n),
        }
    }
}

/// Eₙ in eV for an electron in a well `width_m` meters wide
pub fn electron_well_energy_ev(n: u32, width_m: f64) -> f64 {
    if !(width_m.is_finite() && width_m > 0.0) {
        return 0.0;
    }
    let k = n as f64 * PI / width_m;
    HBAR_SI * HBAR_SI * k * k / (2.0 * M_E) / EV
}

/// A single product ψₙ(x)φₙ(t)
#[derive(Debug, Clone, Copy)]
pub struct StationaryState {
    pub well: InfiniteWell,
    pub n: u32,
    pub energy: f64,
}

impl StationaryState {
    pub fn at(&self, x: f64, t: f64) -> Complex {
        time_factor(self.energy, t) * self.well.psi(self.n, x)
    }

    pub fn sample(&self, grid: Grid, t: f64) -> Wavefunction1D {
        Wavefunction1D::from_fn(grid, |x| self.at(x, t))
    }
}

/// The general solution Ψ(x,t) = Σ cₙ ψₙ(x) e^(−iEₙt/ħ)
#[derive(Debug, Clone)]
pub struct Superposition {
    pub well: InfiniteWell,
    /// Quantum number and coefficient, with Σ|cₙ|² = 1
    pub terms: Vec<(u32, Complex)>,
}

impl Superposition {
    /// Coefficients are rescaled so the total probability is one
    pub fn new(well: InfiniteWell, terms: Vec<(u32, Complex)>) -> Self {
        let total: f64 = terms.iter().map(|(_, c)| c.norm_sq()).sum();
        let scale = if total > 0.0 { 1.0 / total.sqrt() } else { 1.0 };
        Self {
            well,
            terms: terms.into_iter().map(|(n, c)| (n, c * scale)).collect(),
        }
    }

    /// Equal mix of the two lowest states
    pub fn lowest_pair(well: InfiniteWell) -> Self {
        Self::new(well, vec![(1, Complex::ONE), (2, Complex::ONE)])
    }

    pub fn at(&self, x: f64, t: f64) -> Complex {
        let mut sum = Complex::ZERO;
        for &(n, c) in &self.terms {
            sum += c * time_factor(self.well.energy(n), t) * self.well.psi(n, x);
        }
        sum
    }

    pub fn sample(&self, grid: Grid, t: f64) -> Wavefunction1D {
        Wavefunction1D::from_fn(grid, |x| self.at(x, t))
    }

    /// ⟨E⟩ = Σ|cₙ|²Eₙ, constant in time
    pub fn mean_energy(&self) -> f64 {
        self.terms
            .iter()
            .map(|&(n, c)| c.norm_sq() * self.well.energy(n))
            .sum()
    }

    /// Time after which |Ψ|² repeats, 2πħ/(E₂ − E₁), for two distinct levels
    pub fn beat_period(&self) -> Option<f64> {
        let [(a, _), (b, _)] = self.terms.as_slice() else {
            return None;
        };
        let gap = (self.well.energy(*a) - self.well.energy(*b)).abs();
        (gap > 0.0).then(|| 2.0 * PI * HBAR / gap)
    }
}

/// ĤΨ = −ħ²/2m Ψ'' + UΨ by central differences
///
/// The two end points have no neighbours and are left at zero.
pub fn apply_hamiltonian(psi: &Wavefunction1D, potential: impl Fn(f64) -> f64) -> Vec<Complex> {
    let n = psi.len();
    let dx = psi.grid.dx();
    let kinetic = -HBAR * HBAR / (2.0 * MASS * dx * dx);
    let mut out = vec![Complex::ZERO; n];

    for i in 1..n.saturating_sub(1) {
        let laplacian = psi.psi[i + 1] + psi.psi[i - 1] - psi.psi[i] * 2.0;
        out[i] = laplacian * kinetic + psi.psi[i] * potential(psi.grid.x_at(i));
    }
    out
}

/// Largest |iħ ∂Ψ/∂t − ĤΨ| over the interior of `grid` at time `t`
///
/// ∂Ψ/∂t is a central difference with step `dt`. Zero (up to discretization
/// error) when `state` solves the equation.
pub fn tdse_residual(
    state: impl Fn(f64, f64) -> Complex,
    grid: Grid,
    t: f64,
    dt: f64,
    potential: impl Fn(f64) -> f64,
) -> f64 {
    let now = Wavefunction1D::from_fn(grid, |x| state(x, t));
    let h_psi = apply_hamiltonian(&now, potential);

    (1..grid.n - 1)
        .map(|i| {
            let x = grid.x_at(i);
            let d_dt = (state(x, t + dt) - state(x, t - dt)) * (1.0 / (2.0 * dt));
            (Complex::I * d_dt * HBAR - h_psi[i]).norm()
        })
        .fold(0.0, f64::max)
}

/// Ĥψ/ψ at interior points where |ψ| is at least `floor` of its peak
///
/// For a product solution this is the separation constant E everywhere.
pub fn local_energy(psi: &Wavefunction1D, potential: impl Fn(f64) -> f64, floor: f64) -> Vec<f64> {
    let h_psi = apply_hamiltonian(psi, potential);
    let peak = psi.psi.iter().map(Complex::norm).fold(0.0, f64::max);

    (1..psi.len().saturating_sub(1))
        .filter(|&i| psi.psi[i].norm() >= floor * peak)
        .map(|i| {
            let z = psi.psi[i];
            // Real part of (Ĥψ)·ψ̄/|ψ|²
            (h_psi[i] * z.conj()).re / z.norm_sq()
        })
        .collect()
}

/// ⟨Ĥ⟩ = ∫Ψ̄ĤΨ dx
pub fn energy_expectation(psi: &Wavefunction1D, potential: impl Fn(f64) -> f64) -> f64 {
    let h_psi = apply_hamiltonian(psi, potential);
    let dx = psi.grid.dx();
    psi.psi
        .iter()
        .zip(&h_psi)
        .map(|(z, hz)| (z.conj() * *hz).re)
        .sum::<f64>()
        * dx
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL: InfiniteWell = InfiniteWell { width: 2.0 };
    const POINTS: usize = 801;

    fn free(_: f64) -> f64 {
        0.0
    }

    #[test]
    fn test_stationary_product_satisfies_tdse() {
        let grid = WELL.grid(POINTS);
        for n in 1..=3 {
            let state = WELL.stationary(n);
            let scale = state.energy * (2.0 / WELL.width).sqrt();
            for &t in &[0.0, 0.37, 2.5] {
                let residual = tdse_residual(|x, t| state.at(x, t), grid, t, 1e-4, free);
                assert!(residual < 1e-4 * scale, "n={n} t={t}: residual {residual}");
            }
        }
    }

    #[test]
    fn test_wrong_time_factor_fails_tdse() {
        let grid = WELL.grid(POINTS);
        let state = WELL.stationary(1);
        // e^(+iEt/ħ) solves the equation with the sign of i flipped
        let wrong = |x: f64, t: f64| Complex::exp_i(state.energy * t) * WELL.psi(1, x);
        let residual = tdse_residual(wrong, grid, 0.5, 1e-4, free);
        assert!(residual > state.energy, "residual {residual}");
    }

    #[test]
    fn test_superposition_satisfies_tdse() {
        let grid = WELL.grid(POINTS);
        let mix = Superposition::new(
            WELL,
            vec![(1, Complex::ONE), (2, Complex::new(0.0, 0.5)), (3, Complex::real(0.25))],
        );
        let residual = tdse_residual(|x, t| mix.at(x, t), grid, 0.8, 1e-4, free);
        assert!(residual < 1e-3, "residual {residual}");
    }

    #[test]
    fn test_separation_constant_is_the_energy() {
        let grid = WELL.grid(POINTS);
        for n in 1..=3 {
            let psi = WELL.stationary(n).sample(grid, 1.3);
            let energies = local_energy(&psi, free, 1e-2);
            assert!(energies.len() > POINTS / 2);
            let e = WELL.energy(n);
            for local in energies {
                assert!((local - e).abs() < 1e-3 * e, "n={n}: {local} vs {e}");
            }
        }
    }

    #[test]
    fn test_energy_levels() {
        let e1 = WELL.energy(1);
        assert!((e1 - PI * PI / 8.0).abs() < 1e-12);
        assert!((WELL.energy(2) - 4.0 * e1).abs() < 1e-12);
        assert!((WELL.energy(3) - 9.0 * e1).abs() < 1e-12);
    }

    #[test]
    fn test_electron_in_nanometer_well() {
        // ≈ 0.376 eV for a 1 nm well
        let e1 = electron_well_energy_ev(1, 1e-9);
        assert!((e1 - 0.376).abs() < 1e-3, "{e1}");
        assert!((electron_well_energy_ev(2, 1e-9) - 4.0 * e1).abs() < 1e-9);
        assert_eq!(electron_well_energy_ev(1, 0.0), 0.0);
    }

    #[test]
    fn test_stationary_states_are_orthonormal() {
        let grid = WELL.grid(2001);
        let dx = grid.dx();
        for m in 1..=3 {
            for n in 1..=3 {
                let overlap: f64 = grid.points().map(|x| WELL.psi(m, x) * WELL.psi(n, x)).sum::<f64>() * dx;
                let expected = if m == n { 1.0 } else { 0.0 };
                assert!((overlap - expected).abs() < 1e-6, "<{m}|{n}> = {overlap}");
            }
        }
        assert_eq!(WELL.psi(1, 1.5), 0.0);
    }

    #[test]
    fn test_stationary_density_does_not_change() {
        let grid = WELL.grid(201);
        let state = WELL.stationary(2);
        let before = state.sample(grid, 0.0).probability_density();
        let after = state.sample(grid, 3.7).probability_density();
        for (a, b) in before.iter().zip(&after) {
            assert!((a - b).abs() < 1e-12);
        }
        // The amplitude itself does rotate
        let x = 0.5;
        assert!((state.at(x, 0.0) - state.at(x, 1.0)).norm() > 0.1);
    }

    #[test]
    fn test_superposition_properties() {
        let grid = WELL.grid(POINTS);
        let mix = Superposition::lowest_pair(WELL);
        let period = mix.beat_period().expect("two levels");
        assert!((period - 2.0 * PI / (3.0 * WELL.energy(1))).abs() < 1e-12);

        // Norm and ⟨E⟩ stay put while |Ψ|² sloshes back and forth
        let start = mix.sample(grid, 0.0);
        let half = mix.sample(grid, period / 2.0);
        let full = mix.sample(grid, period);
        for psi in [&start, &half, &full] {
            assert!((psi.norm_sq() - 1.0).abs() < 1e-5);
            let e = energy_expectation(psi, free);
            assert!((e - mix.mean_energy()).abs() < 1e-3 * e, "{e}");
        }

        let rho0 = start.probability_density();
        let rho_half = half.probability_density();
        let rho_full = full.probability_density();
        let moved = rho0.iter().zip(&rho_half).map(|(a, b)| (a - b).abs()).fold(0.0, f64::max);
        let returned = rho0.iter().zip(&rho_full).map(|(a, b)| (a - b).abs()).fold(0.0, f64::max);
        assert!(moved > 0.1, "{moved}");
        assert!(returned < 1e-9, "{returned}");

        assert!(Superposition::new(WELL, vec![(1, Complex::ONE)]).beat_period().is_none());
    }

    #[test]
    fn test_coefficients_are_normalized() {
        let mix = Superposition::new(WELL, vec![(1, Complex::real(3.0)), (2, Complex::new(0.0, 4.0))]);
        let total: f64 = mix.terms.iter().map(|(_, c)| c.norm_sq()).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!((mix.mean_energy() - (9.0 * WELL.energy(1) + 16.0 * WELL.energy(2)) / 25.0).abs() < 1e-12);
    }
}
