//! Einstein-Podolsky-Rosen thought experiment
//!
//! Two particles start together at the origin of a number line and are
//! thrown apart with opposite momenta. Measuring one fixes the other,
//! x₂ = −x₁ and p₂ = −p₁, while each particle on its own still obeys
//! Δx₁Δp₁ ≥ ħ/2.

use crate::physics::{Body, World};
use glam::Vec2;

/// Length of the number line, centered on the origin
pub const LINE_LENGTH: f32 = 10.0;

/// How far each particle travels from the origin
pub const THROW_DISTANCE: f32 = 3.0;

/// Seconds the throw takes
pub const THROW_TIME: f32 = 1.5;

pub const PARTICLE_RADIUS: f32 = 0.12;

/// Conditions shown beside the number line
pub const CONDITIONS: [&str; 3] = ["x₂ = −x₁", "p₂ = −p₁", "Δx₁Δp₁ ≥ ħ/2"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Together,
    Flying,
    Apart,
}

/// The two particles and the frictionless world they move in
pub struct EprPair {
    world: World,
    pub phase: Phase,
}

impl EprPair {
    pub fn new(colors: [[f32; 4]; 2]) -> Self {
        let half = LINE_LENGTH / 2.0;
        let mut world = World::new(Vec2::new(-half, -1.0), Vec2::new(half, 1.0));
        world.gravity = Vec2::ZERO;
        // Touching, so the pair starts at the origin without overlapping
        world.add(Body::new(Vec2::new(-PARTICLE_RADIUS, 0.0), PARTICLE_RADIUS, colors[0]));
        world.add(Body::new(Vec2::new(PARTICLE_RADIUS, 0.0), PARTICLE_RADIUS, colors[1]));
        Self {
            world,
            phase: Phase::Together,
        }
    }

    /// Speed that carries each particle to ±`THROW_DISTANCE` in `THROW_TIME`
    pub fn throw_speed() -> f32 {
        (THROW_DISTANCE - PARTICLE_RADIUS) / THROW_TIME
    }

    /// Launch the particles in opposite directions along the line
    pub fn throw(&mut self) {
        if self.phase != Phase::Together {
            return;
        }
        let v = Self::throw_speed();
        self.world.bodies[0].velocity = Vec2::new(-v, 0.0);
        self.world.bodies[1].velocity = Vec2::new(v, 0.0);
        self.phase = Phase::Flying;
        log::debug!("particles thrown at ±{v:.3}");
    }

    /// Put both particles back at the origin
    pub fn reset(&mut self) {
        let colors = [self.world.bodies[0].color, self.world.bodies[1].color];
        *self = Self::new(colors);
    }

    pub fn update(&mut self, dt: f32) {
        if self.phase != Phase::Flying {
            return;
        }
        self.world.step(dt);

        if self.world.bodies[1].position.x >= THROW_DISTANCE {
            self.world.bodies[0].position.x = -THROW_DISTANCE;
            self.world.bodies[1].position.x = THROW_DISTANCE;
            self.phase = Phase::Apart;
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.world.bodies
    }

    /// Positions x₁ and x₂ along the line
    pub fn positions(&self) -> [f32; 2] {
        [
            self.world.bodies[0].position.x,
            self.world.bodies[1].position.x,
        ]
    }

    /// Momenta p₁ and p₂ along the line
    pub fn momenta(&self) -> [f32; 2] {
        [
            self.world.bodies[0].velocity.x * self.world.bodies[0].mass,
            self.world.bodies[1].velocity.x * self.world.bodies[1].mass,
        ]
    }

    pub fn total_momentum(&self) -> Vec2 {
        self.world.momentum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLORS: [[f32; 4]; 2] = [[1.0, 0.0, 0.0, 1.0], [0.0, 0.0, 1.0, 1.0]];
    const EPS: f32 = 1e-5;

    fn assert_mirrored(pair: &EprPair) {
        let [x1, x2] = pair.positions();
        let [p1, p2] = pair.momenta();
        assert!((x2 + x1).abs() < EPS, "x₁={x1} x₂={x2}");
        assert!((p2 + p1).abs() < EPS, "p₁={p1} p₂={p2}");
        assert!(pair.total_momentum().length() < EPS);
    }

    #[test]
    fn test_starts_together_at_rest() {
        let pair = EprPair::new(COLORS);
        assert_eq!(pair.phase, Phase::Together);
        let [x1, x2] = pair.positions();
        assert!(x1 < 0.0 && x2 > 0.0);
        assert!((x2 - x1 - 2.0 * PARTICLE_RADIUS).abs() < EPS);
        assert_eq!(pair.momenta(), [0.0, 0.0]);
    }

    #[test]
    fn test_positions_and_momenta_stay_mirrored() {
        let mut pair = EprPair::new(COLORS);
        pair.throw();
        // Uneven frame times
        for i in 0..200 {
            pair.update(0.004 + 0.003 * (i % 5) as f32);
            assert_mirrored(&pair);
        }
    }

    #[test]
    fn test_throw_ends_at_three_units() {
        let mut pair = EprPair::new(COLORS);
        pair.update(0.1);
        assert_eq!(pair.phase, Phase::Together);

        pair.throw();
        let mut t = 0.0;
        while pair.phase == Phase::Flying && t < 10.0 {
            pair.update(1.0 / 60.0);
            t += 1.0 / 60.0;
        }

        assert_eq!(pair.phase, Phase::Apart);
        assert!((t - THROW_TIME).abs() < 0.05, "took {t}s");
        assert_eq!(pair.positions(), [-THROW_DISTANCE, THROW_DISTANCE]);
        let [p1, p2] = pair.momenta();
        assert!(p1 < 0.0 && p2 > 0.0);
        assert_mirrored(&pair);

        // Nothing moves once apart
        pair.update(1.0);
        assert_eq!(pair.positions(), [-THROW_DISTANCE, THROW_DISTANCE]);
    }

    #[test]
    fn test_reset_brings_particles_back() {
        let mut pair = EprPair::new(COLORS);
        pair.throw();
        pair.update(0.5);
        pair.reset();
        assert_eq!(pair.phase, Phase::Together);
        assert_eq!(pair.momenta(), [0.0, 0.0]);
        assert_eq!(pair.bodies()[1].color, COLORS[1]);
    }
}
