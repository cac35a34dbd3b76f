//! Wavelength grids and sampled radiation curves

use crate::radiation::{
    planck_energy_density, planck_nm, rayleigh_jeans_energy_density, rayleigh_jeans_nm,
    wien_peak_nm,
};

/// Visible light, in nanometers
pub const VISIBLE_RANGE_NM: (f64, f64) = (380.0, 750.0);

/// Effective surface temperature of the Sun in kelvin
pub const SUN_SURFACE_TEMPERATURE: f64 = 5778.0;

/// Default plotting range and resolution
pub const DEFAULT_RANGE_NM: (f64, f64) = (200.0, 3000.0);
pub const DEFAULT_POINTS: usize = 1000;

/// Temperatures and colors used to show a heating blackbody
pub const TEMPERATURE_PALETTE: [(f64, u32); 5] = [
    (2000.0, 0xFF0017),
    (3000.0, 0xFF7C00),
    (4000.0, 0xCEB04D),
    (5000.0, 0x83B28D),
    (5500.0, 0x3DA8AD),
];

/// `n` evenly spaced samples from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + i as f64 * step })
                .collect()
        }
    }
}

pub fn wavelength_grid_nm(range_nm: (f64, f64), n: usize) -> Vec<f64> {
    linspace(range_nm.0, range_nm.1, n)
}

/// Region of the electromagnetic spectrum a wavelength falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Ultraviolet,
    Visible,
    Infrared,
}

impl Band {
    pub fn of(wavelength_nm: f64) -> Self {
        if wavelength_nm < VISIBLE_RANGE_NM.0 {
            Band::Ultraviolet
        } else if wavelength_nm <= VISIBLE_RANGE_NM.1 {
            Band::Visible
        } else {
            Band::Infrared
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Band::Ultraviolet => "Ultraviolet",
            Band::Visible => "Visible",
            Band::Infrared => "Infrared",
        }
    }
}

/// Which radiation law a curve was sampled from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Law {
    Planck,
    RayleighJeans,
}

/// A radiation curve sampled on a wavelength grid, `points` are `[λ_nm, value]`
#[derive(Debug, Clone)]
pub struct Curve {
    pub law: Law,
    pub temperature: f64,
    pub points: Vec<[f64; 2]>,
}

impl Curve {
    /// Planck spectral radiance times `scale`
    pub fn planck(temperature: f64, grid_nm: &[f64], scale: f64) -> Self {
        Self::sample(Law::Planck, temperature, grid_nm, |nm| {
            planck_nm(nm, temperature, scale)
        })
    }

    /// Rayleigh-Jeans radiance times `scale`
    pub fn rayleigh_jeans(temperature: f64, grid_nm: &[f64], scale: f64) -> Self {
        Self::sample(Law::RayleighJeans, temperature, grid_nm, |nm| {
            rayleigh_jeans_nm(nm, temperature, scale)
        })
    }

    /// Spectral energy density (J·m⁻⁴) from either law
    pub fn energy_density(law: Law, temperature: f64, grid_nm: &[f64]) -> Self {
        Self::sample(law, temperature, grid_nm, |nm| match law {
            Law::Planck => planck_energy_density(nm * 1e-9, temperature),
            Law::RayleighJeans => rayleigh_jeans_energy_density(nm * 1e-9, temperature),
        })
    }

    fn sample(law: Law, temperature: f64, grid_nm: &[f64], f: impl Fn(f64) -> f64) -> Self {
        Self {
            law,
            temperature,
            points: grid_nm.iter().map(|&nm| [nm, f(nm)]).collect(),
        }
    }

    /// Sample with the largest value
    pub fn peak(&self) -> Option<[f64; 2]> {
        self.points
            .iter()
            .copied()
            .filter(|p| p[1].is_finite())
            .max_by(|a, b| a[1].total_cmp(&b[1]))
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p[1])
    }
}

/// Point on the Planck curve at Wien's peak wavelength, `[λ_nm, radiance·scale]`
pub fn wien_marker(temperature: f64, scale: f64) -> [f64; 2] {
    let peak_nm = wien_peak_nm(temperature);
    [peak_nm, planck_nm(peak_nm, temperature, scale)]
}

/// Palette color for a temperature: the entry with the nearest temperature
pub fn temperature_color(temperature: f64) -> u32 {
    TEMPERATURE_PALETTE
        .iter()
        .min_by(|a, b| {
            (a.0 - temperature)
                .abs()
                .total_cmp(&(b.0 - temperature).abs())
        })
        .map(|&(_, color)| color)
        .unwrap_or(0xFFFFFF)
}

/// Approximate RGB of a wavelength inside the visible band, black outside
pub fn wavelength_to_rgb(wavelength_nm: f64) -> [f32; 3] {
    let w = wavelength_nm;
    let (r, g, b) = if (380.0..440.0).contains(&w) {
        (-(w - 440.0) / 60.0, 0.0, 1.0)
    } else if (440.0..490.0).contains(&w) {
        (0.0, (w - 440.0) / 50.0, 1.0)
    } else if (490.0..510.0).contains(&w) {
        (0.0, 1.0, -(w - 510.0) / 20.0)
    } else if (510.0..580.0).contains(&w) {
        ((w - 510.0) / 70.0, 1.0, 0.0)
    } else if (580.0..645.0).contains(&w) {
        (1.0, -(w - 645.0) / 65.0, 0.0)
    } else if (645.0..=750.0).contains(&w) {
        (1.0, 0.0, 0.0)
    } else {
        (0.0, 0.0, 0.0)
    };

    // Intensity falls off near the edges of vision
    let factor = if (380.0..420.0).contains(&w) {
        0.3 + 0.7 * (w - 380.0) / 40.0
    } else if (700.0..=750.0).contains(&w) {
        0.3 + 0.7 * (750.0 - w) / 50.0
    } else {
        1.0
    };

    [(r * factor) as f32, (g * factor) as f32, (b * factor) as f32]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radiation::RADIANCE_SCALE_KW_NM;

    #[test]
    fn test_linspace_endpoints() {
        let xs = linspace(200.0, 3000.0, 1000);
        assert_eq!(xs.len(), 1000);
        assert_eq!(xs[0], 200.0);
        assert_eq!(xs[999], 3000.0);
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
    }

    #[test]
    fn test_band_classification() {
        assert_eq!(Band::of(250.0), Band::Ultraviolet);
        assert_eq!(Band::of(380.0), Band::Visible);
        assert_eq!(Band::of(750.0), Band::Visible);
        assert_eq!(Band::of(1200.0), Band::Infrared);
    }

    #[test]
    fn test_planck_curve_peak_near_wien() {
        let grid = wavelength_grid_nm(DEFAULT_RANGE_NM, 2801);
        for &(t, _) in &TEMPERATURE_PALETTE[1..] {
            let curve = Curve::planck(t, &grid, RADIANCE_SCALE_KW_NM);
            let peak = curve.peak().expect("curve has samples");
            assert!((peak[0] - wien_peak_nm(t)).abs() <= 1.0, "T={t}: {peak:?}");
        }
    }

    #[test]
    fn test_hotter_curve_is_higher_everywhere() {
        let grid = wavelength_grid_nm(DEFAULT_RANGE_NM, 200);
        let cool = Curve::planck(3000.0, &grid, RADIANCE_SCALE_KW_NM);
        let hot = Curve::planck(6000.0, &grid, RADIANCE_SCALE_KW_NM);
        assert!(hot.values().zip(cool.values()).all(|(h, c)| h > c));
    }

    #[test]
    fn test_wien_marker_lies_on_curve() {
        let marker = wien_marker(SUN_SURFACE_TEMPERATURE, RADIANCE_SCALE_KW_NM);
        let expected = planck_nm(marker[0], SUN_SURFACE_TEMPERATURE, RADIANCE_SCALE_KW_NM);
        assert_eq!(marker[1], expected);
        assert!((marker[0] - 501.5).abs() < 1.0);
    }

    #[test]
    fn test_energy_density_rayleigh_jeans_exceeds_planck() {
        let grid = linspace(100.0, 3000.0, 50);
        let planck = Curve::energy_density(Law::Planck, 5000.0, &grid);
        let classical = Curve::energy_density(Law::RayleighJeans, 5000.0, &grid);
        assert!(classical.values().zip(planck.values()).all(|(c, p)| c > p));
    }

    #[test]
    fn test_temperature_color_nearest() {
        assert_eq!(temperature_color(2100.0), 0xFF0017);
        assert_eq!(temperature_color(5400.0), 0x3DA8AD);
        assert_eq!(temperature_color(9000.0), 0x3DA8AD);
    }

    #[test]
    fn test_wavelength_to_rgb() {
        assert_eq!(wavelength_to_rgb(300.0), [0.0, 0.0, 0.0]);
        let green = wavelength_to_rgb(530.0);
        assert_eq!(green[1], 1.0);
        let red = wavelength_to_rgb(650.0);
        assert_eq!(red[0], 1.0);
    }
}
