//! Blackbody radiation laws
//!
//! All functions take SI inputs (wavelength in meters, temperature in kelvin)
//! and are total: a non-positive or non-finite input yields `0.0` instead of
//! NaN or infinity.

use common::constants::{C, H, K_B, SIGMA, WIEN_B};
use std::f64::consts::PI;

/// Largest Planck exponent hc/(λkT) evaluated directly; e^700 is close to the f64 limit
pub const MAX_EXPONENT: f64 = 700.0;

/// Converts W·sr⁻¹·m⁻³ to kW·sr⁻¹·m⁻²·nm⁻¹
pub const RADIANCE_SCALE_KW_NM: f64 = 1e-12;

fn valid(wavelength: f64, temperature: f64) -> bool {
    wavelength.is_finite() && temperature.is_finite() && wavelength > 0.0 && temperature > 0.0
}

/// The dimensionless Planck exponent hc/(λk_BT), clipped to `[0, MAX_EXPONENT]`
pub fn planck_exponent(wavelength: f64, temperature: f64) -> f64 {
    ((H * C) / (wavelength * K_B * temperature)).clamp(0.0, MAX_EXPONENT)
}

/// Planck spectral radiance B(λ,T) = (2hc²/λ⁵) · 1/(exp(hc/λkT) − 1) in W·sr⁻¹·m⁻³
///
/// `exp_m1` keeps the denominator accurate when the exponent is small. Past
/// `MAX_EXPONENT` the value is evaluated in log space using the Wien tail
/// e^x − 1 ≈ e^x, so the curve keeps falling towards λ → 0⁺ and stays a
/// positive, finite `f64` (at worst `f64::MIN_POSITIVE`).
pub fn planck_spectral_radiance(wavelength: f64, temperature: f64) -> f64 {
    if !valid(wavelength, temperature) {
        return 0.0;
    }

    let x = (H * C) / (wavelength * K_B * temperature);
    if x <= MAX_EXPONENT {
        let radiance = 2.0 * H * C * C / wavelength.powi(5) / x.exp_m1();
        if radiance.is_finite() && radiance > 0.0 {
            return radiance;
        }
    }

    let ln_radiance = if x > MAX_EXPONENT {
        (2.0 * H * C * C).ln() - 5.0 * wavelength.ln() - x
    } else if x < 1e-8 {
        // Rayleigh-Jeans limit, 1/(e^x − 1) ≈ 1/x
        (2.0 * C * K_B).ln() + temperature.ln() - 4.0 * wavelength.ln()
    } else {
        (2.0 * H * C * C).ln() - 5.0 * wavelength.ln() - x.exp_m1().ln()
    };
    ln_radiance.exp().clamp(f64::MIN_POSITIVE, f64::MAX)
}

/// Planck radiance multiplied by `scale`
pub fn planck_scaled(wavelength: f64, temperature: f64, scale: f64) -> f64 {
    planck_spectral_radiance(wavelength, temperature) * scale
}

/// Planck radiance for a wavelength given in nanometers
pub fn planck_nm(wavelength_nm: f64, temperature: f64, scale: f64) -> f64 {
    planck_scaled(wavelength_nm * 1e-9, temperature, scale)
}

/// Classical Rayleigh-Jeans radiance B(λ,T) = 2ck_BT/λ⁴ in W·sr⁻¹·m⁻³
///
/// Matches Planck's law at long wavelengths and diverges as λ → 0.
pub fn rayleigh_jeans(wavelength: f64, temperature: f64) -> f64 {
    if !valid(wavelength, temperature) {
        return 0.0;
    }
    2.0 * C * K_B * temperature / wavelength.powi(4)
}

/// Rayleigh-Jeans radiance for a wavelength in nanometers, multiplied by `scale`
pub fn rayleigh_jeans_nm(wavelength_nm: f64, temperature: f64, scale: f64) -> f64 {
    rayleigh_jeans(wavelength_nm * 1e-9, temperature) * scale
}

/// Spectral energy density u(λ,T) = (8πhc/λ⁵) · 1/(exp(hc/λkT) − 1) in J·m⁻⁴
pub fn planck_energy_density(wavelength: f64, temperature: f64) -> f64 {
    // u = 4π/c · B
    4.0 * PI / C * planck_spectral_radiance(wavelength, temperature)
}

/// Classical energy density u(λ,T) = 8πk_BT/λ⁴ in J·m⁻⁴
pub fn rayleigh_jeans_energy_density(wavelength: f64, temperature: f64) -> f64 {
    4.0 * PI / C * rayleigh_jeans(wavelength, temperature)
}

/// Wien's displacement law: wavelength of peak emission λ_max = b/T in meters
pub fn wien_peak(temperature: f64) -> f64 {
    if !(temperature.is_finite() && temperature > 0.0) {
        return 0.0;
    }
    WIEN_B / temperature
}

pub fn wien_peak_nm(temperature: f64) -> f64 {
    wien_peak(temperature) * 1e9
}

/// Stefan-Boltzmann law: total power radiated per unit area j = σT⁴ in W·m⁻²
pub fn stefan_boltzmann(temperature: f64) -> f64 {
    if !(temperature.is_finite() && temperature > 0.0) {
        return 0.0;
    }
    SIGMA * temperature.powi(4)
}

/// Radiant exitance π∫B(λ,T)dλ evaluated numerically
///
/// Simpson's rule over ln λ from 1 nm to 1 cm, where B·λ is smooth and the
/// whole peak region gets even coverage. `steps` is rounded up to an even
/// number.
pub fn radiant_exitance_numeric(temperature: f64, steps: usize) -> f64 {
    if !(temperature.is_finite() && temperature > 0.0) {
        return 0.0;
    }

    let n = (steps.max(2) + 1) & !1;
    let a = (1e-9f64).ln();
    let b = (1e-2f64).ln();
    let h = (b - a) / n as f64;

    // dλ = λ d(ln λ)
    let f = |u: f64| {
        let wavelength = u.exp();
        planck_spectral_radiance(wavelength, temperature) * wavelength
    };

    let mut sum = f(a) + f(b);
    for i in 1..n {
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * f(a + i as f64 * h);
    }

    PI * sum * h / 3.0
}

/// Photon energy hc/λ in joules
pub fn photon_energy(wavelength: f64) -> f64 {
    if !(wavelength.is_finite() && wavelength > 0.0) {
        return 0.0;
    }
    H * C / wavelength
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUN: f64 = 5778.0;

    #[test]
    fn test_reduces_to_rayleigh_jeans_at_long_wavelengths() {
        // hc/kT ≈ 2.5 µm at 5778 K; 1 cm is far into the classical regime
        for &wavelength in &[1e-2, 5e-2, 1.0] {
            let planck = planck_spectral_radiance(wavelength, SUN);
            let classical = rayleigh_jeans(wavelength, SUN);
            let rel = (planck - classical).abs() / classical;
            assert!(rel < 2e-4, "λ={wavelength}: relative difference {rel}");
        }
    }

    #[test]
    fn test_diverges_from_rayleigh_jeans_at_short_wavelengths() {
        let planck = planck_spectral_radiance(200e-9, SUN);
        let classical = rayleigh_jeans(200e-9, SUN);
        assert!(classical > 100.0 * planck);
    }

    #[test]
    fn test_wien_peak_for_the_sun() {
        let peak_nm = wien_peak_nm(SUN);
        assert!((peak_nm - 501.5).abs() < 1.0, "peak at {peak_nm} nm");
    }

    #[test]
    fn test_wien_peak_matches_curve_maximum() {
        for &t in &[3000.0, 4000.0, SUN, 10_000.0] {
            let expected = wien_peak_nm(t);
            // 0.05 nm grid around the expected peak
            let (best_nm, _) = (0..=40_000)
                .map(|i| {
                    let nm = expected * 0.5 + i as f64 * 0.05 * expected / 1000.0;
                    (nm, planck_nm(nm, t, 1.0))
                })
                .fold((0.0, f64::MIN), |best, cur| if cur.1 > best.1 { cur } else { best });
            assert!(
                (best_nm - expected).abs() / expected < 1e-3,
                "T={t}: numeric peak {best_nm} nm vs Wien {expected} nm"
            );
        }
    }

    #[test]
    fn test_integral_matches_stefan_boltzmann() {
        for &t in &[1000.0, SUN, 20_000.0] {
            let numeric = radiant_exitance_numeric(t, 4000);
            let exact = stefan_boltzmann(t);
            let rel = (numeric - exact).abs() / exact;
            assert!(rel < 1e-4, "T={t}: numeric {numeric} vs σT⁴ {exact}");
        }
    }

    #[test]
    fn test_planck_finite_and_positive_at_extremes() {
        for &wavelength in &[1e-300, 1e-200, 1e-100, 1e-60, 1e-15, 1e-12, 1e-9, 1e3, 1e6, 1e80] {
            let b = planck_spectral_radiance(wavelength, SUN);
            assert!(b.is_finite(), "λ={wavelength} gave {b}");
            assert!(b > 0.0, "λ={wavelength} gave {b}");
        }
    }

    #[test]
    fn test_planck_keeps_falling_towards_zero_wavelength() {
        // From 10 nm down to 1e-300 m, well past the direct-evaluation cutoff
        let mut previous = planck_spectral_radiance(1e-8, SUN);
        let mut wavelength = 1e-8;
        while wavelength > 1e-300 {
            wavelength *= 0.8;
            let b = planck_spectral_radiance(wavelength, SUN);
            assert!(b.is_finite() && b > 0.0, "λ={wavelength} gave {b}");
            assert!(b <= previous, "λ={wavelength}: {b} > {previous}");
            previous = b;
        }
    }

    #[test]
    fn test_planck_continuous_across_exponent_cutoff() {
        let at_cutoff = H * C / (MAX_EXPONENT * K_B * SUN);
        let inside = planck_spectral_radiance(at_cutoff * (1.0 + 1e-10), SUN);
        let outside = planck_spectral_radiance(at_cutoff * (1.0 - 1e-10), SUN);
        assert!(inside > 0.0 && outside > 0.0);
        assert!(outside < inside);
        assert!((inside - outside).abs() / inside < 1e-6, "{inside} vs {outside}");
    }

    #[test]
    fn test_wien_tail_strictly_decreasing_past_cutoff() {
        // Exponents 710..750 are past the cutoff but still above f64::MIN_POSITIVE
        let radiance_at = |x: f64| planck_spectral_radiance(H * C / (x * K_B * SUN), SUN);
        let (a, b, c) = (radiance_at(710.0), radiance_at(730.0), radiance_at(750.0));
        assert!(a > b && b > c, "{a} {b} {c}");
        assert!(c > f64::MIN_POSITIVE);
    }

    #[test]
    fn test_rayleigh_jeans_blows_up_towards_zero() {
        let near_zero = rayleigh_jeans(1e-15, SUN);
        assert!(near_zero > 1e40);
        assert!(rayleigh_jeans(1e-16, SUN) > near_zero);
        assert!(near_zero > 1e100 * planck_spectral_radiance(1e-15, SUN));
    }

    #[test]
    fn test_exponent_is_clipped() {
        assert_eq!(planck_exponent(1e-12, 300.0), MAX_EXPONENT);
        assert!(planck_exponent(1.0, 300.0) < 1e-3);
    }

    #[test]
    fn test_small_exponent_uses_accurate_denominator() {
        // At x = hc/λkT ≈ 1e-6 the naive exp(x) - 1 loses about ten digits
        let t = 5000.0;
        let wavelength = H * C / (1e-6 * K_B * t);
        let x = planck_exponent(wavelength, t);
        let reference = 2.0 * H * C * C / wavelength.powi(5) / (x + x * x / 2.0 + x * x * x / 6.0);
        let b = planck_spectral_radiance(wavelength, t);
        assert!((b - reference).abs() / reference < 1e-12);
    }

    #[test]
    fn test_invalid_inputs_yield_zero() {
        assert_eq!(planck_spectral_radiance(0.0, SUN), 0.0);
        assert_eq!(planck_spectral_radiance(-1e-6, SUN), 0.0);
        assert_eq!(planck_spectral_radiance(500e-9, 0.0), 0.0);
        assert_eq!(planck_spectral_radiance(f64::NAN, SUN), 0.0);
        assert_eq!(rayleigh_jeans(0.0, SUN), 0.0);
        assert_eq!(wien_peak(-5.0), 0.0);
        assert_eq!(stefan_boltzmann(0.0), 0.0);
    }

    #[test]
    fn test_energy_density_form() {
        let wavelength = 1e-6;
        let b = planck_spectral_radiance(wavelength, SUN);
        let u = planck_energy_density(wavelength, SUN);
        assert!((u - 4.0 * PI / C * b).abs() / u < 1e-12);

        let u_rj = rayleigh_jeans_energy_density(wavelength, SUN);
        let expected = 8.0 * PI * K_B * SUN / wavelength.powi(4);
        assert!((u_rj - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn test_scaled_units() {
        let w = planck_spectral_radiance(500e-9, SUN);
        let kw_nm = planck_nm(500.0, SUN, RADIANCE_SCALE_KW_NM);
        assert!((kw_nm - w * 1e-12).abs() / kw_nm < 1e-12);
        // The Sun peaks around 26 kW·sr⁻¹·m⁻²·nm⁻¹
        assert!(kw_nm > 20.0 && kw_nm < 30.0, "{kw_nm}");
    }
}
