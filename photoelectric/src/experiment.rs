//! Photoelectric experiment simulation
//!
//! Photons fly from the right of the chamber to the emitter. A photon above
//! the threshold ejects an electron with K_max = hν − W, which then climbs
//! toward the collector against the retarding voltage. An electron whose
//! kinetic energy exceeds eV reaches the collector; the rest fall back.

use crate::apparatus::Apparatus;
use crate::physics::{max_kinetic_energy, photon_energy_ev, Metal};
use glam::Vec2;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Photon flight speed in world units per second
pub const PHOTON_SPEED: f32 = 4.0;

/// Visual electron speed for 1 eV, in world units per second per √(2 eV)
pub const ELECTRON_SPEED_SCALE: f32 = 1.5;

/// Adjustable experiment settings
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub metal: Metal,
    pub wavelength_nm: f64,
    /// Retarding voltage in volts; negative values accelerate electrons
    pub voltage: f64,
    /// Photons per second
    pub intensity: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            metal: Metal::Sodium,
            wavelength_nm: 400.0,
            voltage: 0.0,
            intensity: 4.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Photon {
    pub position: Vec2,
    pub target: Vec2,
    pub wavelength_nm: f64,
}

#[derive(Debug, Clone)]
pub struct Electron {
    pub position: Vec2,
    /// Vertical velocity in world units per second
    pub velocity: f32,
    /// Kinetic energy at emission in eV
    pub kinetic_ev: f64,
}

/// Running totals since the last reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub photons: u64,
    /// Photons absorbed without ejecting an electron
    pub absorbed: u64,
    pub emitted: u64,
    pub collected: u64,
    pub returned: u64,
}

impl Counters {
    /// Fraction of finished electrons that reached the collector
    pub fn collection_ratio(&self) -> Option<f64> {
        let finished = self.collected + self.returned;
        (finished > 0).then(|| self.collected as f64 / finished as f64)
    }
}

pub struct Experiment {
    pub apparatus: Apparatus,
    pub settings: Settings,
    pub photons: Vec<Photon>,
    pub electrons: Vec<Electron>,
    pub counters: Counters,
    spawn_timer: f32,
    rng: StdRng,
}

impl Experiment {
    pub fn new(apparatus: Apparatus, settings: Settings) -> Self {
        Self::with_rng(apparatus, settings, StdRng::from_entropy())
    }

    /// Deterministic experiment for reproducible runs
    pub fn with_seed(apparatus: Apparatus, settings: Settings, seed: u64) -> Self {
        Self::with_rng(apparatus, settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(apparatus: Apparatus, settings: Settings, rng: StdRng) -> Self {
        Self {
            apparatus,
            settings,
            photons: Vec::new(),
            electrons: Vec::new(),
            counters: Counters::default(),
            spawn_timer: 0.0,
            rng,
        }
    }

    pub fn photon_energy(&self) -> f64 {
        photon_energy_ev(self.settings.wavelength_nm)
    }

    /// K_max for the current metal and wavelength
    pub fn max_kinetic_energy(&self) -> Option<f64> {
        max_kinetic_energy(
            self.settings.wavelength_nm,
            self.settings.metal.work_function(),
        )
    }

    /// Whether electrons emitted now can reach the collector
    pub fn current_flows(&self) -> bool {
        matches!(self.max_kinetic_energy(), Some(k) if k > 0.0 && k > self.settings.voltage)
    }

    /// Vertical acceleration of electrons between the plates
    ///
    /// The retarding field removes `voltage` eV over the full gap, so
    /// a = −S²V/d for the visual speed scale S.
    pub fn electron_acceleration(&self) -> f32 {
        let gap = self.apparatus.gap().max(f32::EPSILON);
        -ELECTRON_SPEED_SCALE * ELECTRON_SPEED_SCALE * self.settings.voltage as f32 / gap
    }

    /// Launch one photon at a random point of the emitter surface
    pub fn fire_photon(&mut self) {
        let surface = self.apparatus.emitter_surface();
        let half = self.apparatus.emitter.width() * 0.4;
        let x = surface.x + self.rng.gen_range(-half..=half);

        self.photons.push(Photon {
            position: self.apparatus.photon_spawn(),
            target: Vec2::new(x, surface.y),
            wavelength_nm: self.settings.wavelength_nm,
        });
        self.counters.photons += 1;
    }

    pub fn step(&mut self, dt: f32) {
        if self.settings.intensity > 0.0 {
            self.spawn_timer += dt;
            let interval = 1.0 / self.settings.intensity;
            while self.spawn_timer >= interval {
                self.spawn_timer -= interval;
                self.fire_photon();
            }
        }

        self.move_photons(dt);
        self.move_electrons(dt);
    }

    fn move_photons(&mut self, dt: f32) {
        let travel = PHOTON_SPEED * dt;
        let work_function = self.settings.metal.work_function();
        let mut arrived = Vec::new();

        self.photons.retain_mut(|photon| {
            let to_target = photon.target - photon.position;
            if to_target.length() <= travel {
                arrived.push((photon.target, photon.wavelength_nm));
                false
            } else {
                photon.position += to_target.normalize() * travel;
                true
            }
        });

        for (at, wavelength_nm) in arrived {
            match max_kinetic_energy(wavelength_nm, work_function) {
                Some(k) if k > 0.0 => {
                    self.electrons.push(Electron {
                        position: at,
                        velocity: ELECTRON_SPEED_SCALE * (2.0 * k as f32).sqrt(),
                        kinetic_ev: k,
                    });
                    self.counters.emitted += 1;
                }
                _ => self.counters.absorbed += 1,
            }
        }
    }

    fn move_electrons(&mut self, dt: f32) {
        let acceleration = self.electron_acceleration();
        let top = self.apparatus.collector_surface().y;
        let bottom = self.apparatus.emitter_surface().y;
        let mut collected = 0;
        let mut returned = 0;

        self.electrons.retain_mut(|electron| {
            electron.velocity += acceleration * dt;
            electron.position.y += electron.velocity * dt;

            if electron.position.y >= top {
                collected += 1;
                false
            } else if electron.position.y <= bottom && electron.velocity < 0.0 {
                returned += 1;
                false
            } else {
                true
            }
        });

        self.counters.collected += collected;
        self.counters.returned += returned;
    }

    pub fn set_wavelength(&mut self, wavelength_nm: f64) {
        self.settings.wavelength_nm = wavelength_nm.clamp(100.0, 1000.0);
    }

    pub fn set_voltage(&mut self, voltage: f64) {
        let limit = self.apparatus.style.voltmeter_full_scale as f64;
        self.settings.voltage = voltage.clamp(-limit, limit);
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.settings.intensity = intensity.clamp(0.0, 30.0);
    }

    pub fn set_metal(&mut self, metal: Metal) {
        self.settings.metal = metal;
        self.reset();
    }

    /// Clear particles and counters, keeping the settings
    pub fn reset(&mut self) {
        self.photons.clear();
        self.electrons.clear();
        self.counters = Counters::default();
        self.spawn_timer = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn run(settings: Settings, seconds: f32) -> Experiment {
        let mut experiment = Experiment::with_seed(Apparatus::default(), settings, 7);
        let steps = (seconds / DT) as usize;
        for _ in 0..steps {
            experiment.step(DT);
        }
        experiment
    }

    #[test]
    fn test_no_retarding_voltage_collects_everything() {
        let e = run(Settings::default(), 10.0);
        assert!(e.counters.collected > 20, "{:?}", e.counters);
        assert_eq!(e.counters.returned, 0);
        assert_eq!(e.counters.absorbed, 0);
        assert_eq!(e.counters.collection_ratio(), Some(1.0));
    }

    #[test]
    fn test_voltage_above_stopping_turns_electrons_back() {
        // Sodium at 400 nm: K_max ≈ 0.82 eV
        let settings = Settings {
            voltage: 1.0,
            ..Settings::default()
        };
        let e = run(settings, 15.0);
        assert_eq!(e.counters.collected, 0);
        assert!(e.counters.returned > 20, "{:?}", e.counters);
    }

    #[test]
    fn test_voltage_just_below_stopping_still_collects() {
        let settings = Settings {
            voltage: 0.75,
            ..Settings::default()
        };
        let e = run(settings, 10.0);
        assert!(e.counters.collected > 20, "{:?}", e.counters);
        assert_eq!(e.counters.returned, 0);
    }

    #[test]
    fn test_below_threshold_only_absorbs() {
        let settings = Settings {
            metal: Metal::Zinc,
            ..Settings::default()
        };
        let e = run(settings, 5.0);
        assert!(e.counters.absorbed > 10);
        assert_eq!(e.counters.emitted, 0);
        assert!(e.electrons.is_empty());
        assert_eq!(e.counters.collection_ratio(), None);
    }

    #[test]
    fn test_retarding_field_decelerates() {
        let settings = Settings {
            voltage: 2.0,
            intensity: 0.0,
            ..Settings::default()
        };
        let mut e = Experiment::with_seed(Apparatus::default(), settings, 1);
        e.electrons.push(Electron {
            position: e.apparatus.emitter_surface(),
            velocity: 2.0,
            kinetic_ev: 0.9,
        });
        e.step(0.1);
        assert!(e.electrons[0].velocity < 2.0);
        assert!(e.electron_acceleration() < 0.0);
    }

    #[test]
    fn test_current_flows_matches_stopping_voltage() {
        let mut e = Experiment::with_seed(Apparatus::default(), Settings::default(), 3);
        assert!(e.current_flows());
        e.set_voltage(0.9);
        assert!(!e.current_flows());
        e.set_voltage(-1.0);
        assert!(e.current_flows());
    }

    #[test]
    fn test_photons_land_on_emitter() {
        let settings = Settings {
            intensity: 0.0,
            ..Settings::default()
        };
        let mut e = Experiment::with_seed(Apparatus::default(), settings, 11);
        for _ in 0..50 {
            e.fire_photon();
        }
        let emitter = e.apparatus.emitter;
        assert!(e
            .photons
            .iter()
            .all(|p| p.target.x >= emitter.min.x && p.target.x <= emitter.max.x));
        assert_eq!(e.counters.photons, 50);
    }

    #[test]
    fn test_setters_clamp() {
        let mut e = Experiment::with_seed(Apparatus::default(), Settings::default(), 5);
        e.set_voltage(100.0);
        assert_eq!(e.settings.voltage, 5.0);
        e.set_wavelength(5.0);
        assert_eq!(e.settings.wavelength_nm, 100.0);
        e.set_intensity(-3.0);
        assert_eq!(e.settings.intensity, 0.0);
    }
}
