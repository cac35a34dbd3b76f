//! Photoelectric effect physics
//!
//! Einstein's relation K_max = hν − W with the work function W = hν₀.
//! Wavelengths are in nanometers and energies in electronvolts; every
//! function is total and returns `0.0` or `None` outside its domain.

use common::constants::{C, EV, H, M_E};

/// hc in eV·nm
pub const HC_EV_NM: f64 = H * C / EV * 1e9;

/// Photocathode materials with their work functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metal {
    Cesium,
    Potassium,
    Sodium,
    Zinc,
    Copper,
    Platinum,
}

impl Metal {
    pub const ALL: [Metal; 6] = [
        Metal::Cesium,
        Metal::Potassium,
        Metal::Sodium,
        Metal::Zinc,
        Metal::Copper,
        Metal::Platinum,
    ];

    /// Work function W in eV
    pub fn work_function(&self) -> f64 {
        match self {
            Metal::Cesium => 2.10,
            Metal::Potassium => 2.30,
            Metal::Sodium => 2.28,
            Metal::Zinc => 4.30,
            Metal::Copper => 4.70,
            Metal::Platinum => 5.65,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Metal::Cesium => "Cesium",
            Metal::Potassium => "Potassium",
            Metal::Sodium => "Sodium",
            Metal::Zinc => "Zinc",
            Metal::Copper => "Copper",
            Metal::Platinum => "Platinum",
        }
    }

    pub fn color(&self) -> [f32; 4] {
        match self {
            Metal::Cesium => [0.85, 0.75, 0.45, 1.0],
            Metal::Potassium => [0.75, 0.75, 0.7, 1.0],
            Metal::Sodium => [0.8, 0.8, 0.75, 1.0],
            Metal::Zinc => [0.6, 0.65, 0.7, 1.0],
            Metal::Copper => [0.85, 0.5, 0.3, 1.0],
            Metal::Platinum => [0.9, 0.9, 0.92, 1.0],
        }
    }

    /// Next metal in [`Metal::ALL`], wrapping around
    pub fn next(&self) -> Metal {
        let i = Metal::ALL.iter().position(|m| m == self).unwrap_or(0);
        Metal::ALL[(i + 1) % Metal::ALL.len()]
    }

    pub fn threshold_frequency(&self) -> f64 {
        threshold_frequency(self.work_function())
    }

    pub fn threshold_wavelength_nm(&self) -> f64 {
        threshold_wavelength_nm(self.work_function())
    }
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Photon energy E = hc/λ in eV
pub fn photon_energy_ev(wavelength_nm: f64) -> f64 {
    if !positive(wavelength_nm) {
        return 0.0;
    }
    HC_EV_NM / wavelength_nm
}

/// Frequency ν = c/λ in Hz
pub fn photon_frequency(wavelength_nm: f64) -> f64 {
    if !positive(wavelength_nm) {
        return 0.0;
    }
    C / (wavelength_nm * 1e-9)
}

/// Threshold frequency ν₀ = W/h in Hz
pub fn threshold_frequency(work_function_ev: f64) -> f64 {
    if !positive(work_function_ev) {
        return 0.0;
    }
    work_function_ev * EV / H
}

/// Longest wavelength that can still eject electrons
pub fn threshold_wavelength_nm(work_function_ev: f64) -> f64 {
    if !positive(work_function_ev) {
        return 0.0;
    }
    HC_EV_NM / work_function_ev
}

/// K_max = hν − W in eV, `None` when the photon is below threshold
pub fn max_kinetic_energy(wavelength_nm: f64, work_function_ev: f64) -> Option<f64> {
    if !positive(wavelength_nm) || !work_function_ev.is_finite() {
        return None;
    }
    let k = photon_energy_ev(wavelength_nm) - work_function_ev;
    (k >= 0.0).then_some(k)
}

/// Retarding voltage V₀ = K_max/e that stops the fastest electrons
///
/// With K_max in eV the stopping voltage in volts has the same value.
pub fn stopping_voltage(wavelength_nm: f64, work_function_ev: f64) -> f64 {
    max_kinetic_energy(wavelength_nm, work_function_ev).unwrap_or(0.0)
}

/// Non-relativistic speed v = √(2K/m) of an electron with `kinetic_ev`, in m/s
pub fn electron_speed(kinetic_ev: f64) -> f64 {
    if !positive(kinetic_ev) {
        return 0.0;
    }
    (2.0 * kinetic_ev * EV / M_E).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photon_energy() {
        // 1239.84 eV·nm / 400 nm
        assert!((photon_energy_ev(400.0) - 3.0996).abs() < 1e-3);
        assert!((HC_EV_NM - 1239.84).abs() < 0.01);
        assert_eq!(photon_energy_ev(0.0), 0.0);
        assert_eq!(photon_energy_ev(-5.0), 0.0);
    }

    #[test]
    fn test_sodium_at_400_nm() {
        let k = max_kinetic_energy(400.0, Metal::Sodium.work_function()).unwrap();
        assert!((k - 0.82).abs() < 0.01, "K_max = {k}");
        assert!((stopping_voltage(400.0, Metal::Sodium.work_function()) - k).abs() < 1e-12);
    }

    #[test]
    fn test_below_threshold_ejects_nothing() {
        assert_eq!(max_kinetic_energy(400.0, Metal::Zinc.work_function()), None);
        assert_eq!(stopping_voltage(700.0, Metal::Cesium.work_function()), 0.0);
    }

    #[test]
    fn test_threshold_consistency() {
        for metal in Metal::ALL {
            let nu0 = metal.threshold_frequency();
            let lambda0 = metal.threshold_wavelength_nm();
            // ν₀ = c/λ₀
            let rel = (photon_frequency(lambda0) - nu0).abs() / nu0;
            assert!(rel < 1e-9, "{}", metal.name());
            // Just above the threshold wavelength there is no emission
            assert_eq!(max_kinetic_energy(lambda0 * 1.001, metal.work_function()), None);
            assert!(max_kinetic_energy(lambda0 * 0.999, metal.work_function()).is_some());
        }
    }

    #[test]
    fn test_cesium_threshold_in_visible() {
        let lambda0 = Metal::Cesium.threshold_wavelength_nm();
        assert!((lambda0 - 590.4).abs() < 0.5, "{lambda0}");
    }

    #[test]
    fn test_electron_speed() {
        // A 1 eV electron moves at about 593 km/s
        assert!((electron_speed(1.0) - 5.93e5).abs() < 1e3);
        assert_eq!(electron_speed(0.0), 0.0);
    }

    #[test]
    fn test_metal_cycle() {
        let mut metal = Metal::Cesium;
        for _ in 0..Metal::ALL.len() {
            metal = metal.next();
        }
        assert_eq!(metal, Metal::Cesium);
    }
}
