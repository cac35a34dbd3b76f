//! Circle collision physics
//!
//! Collision detection is a distance test, resolution moves overlapping
//! circles apart along the line through their centers. Motion uses
//! velocity Verlet integration of F = ma.

use glam::Vec2;

/// Overlaps below this are treated as resolved
pub const OVERLAP_EPSILON: f32 = 1e-5;

/// Divisor of the gentle nudge used when several circles relax together
pub const RELAXATION_DIVISOR: f32 = 3.5;

/// A circular body
#[derive(Debug, Clone)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub color: [f32; 4],
}

impl Body {
    pub fn new(position: Vec2, radius: f32, color: [f32; 4]) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            radius,
            mass: 1.0,
            color,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
    }
}

/// r_a + r_b − d; the bodies collide when this is positive
pub fn overlap(a: &Body, b: &Body) -> f32 {
    a.radius + b.radius - a.position.distance(b.position)
}

pub fn is_colliding(a: &Body, b: &Body) -> bool {
    overlap(a, b) > 0.0
}

/// Displacement a⃗ = (overlap/2) · (p₂ − p₁)/d
///
/// Moving `b` by `+a⃗` and `a` by `−a⃗` leaves the circles exactly touching.
/// Coincident centers separate along +x. Zero when the bodies do not overlap.
pub fn separation(a: &Body, b: &Body) -> Vec2 {
    let overlap = overlap(a, b);
    if overlap <= 0.0 {
        return Vec2::ZERO;
    }

    let delta = b.position - a.position;
    let d = delta.length();
    let direction = if d > f32::EPSILON { delta / d } else { Vec2::X };
    direction * overlap * 0.5
}

/// Push two bodies apart by half the overlap each
pub fn separate(a: &mut Body, b: &mut Body) {
    let displacement = separation(a, b);
    a.position -= displacement;
    b.position += displacement;
}

/// Nudge overlap · (p₂ − p₁) / 3.5 for two circles of radius `radius`
///
/// Not normalized by the distance, so it only partly resolves the overlap;
/// repeated application lets three or more touching circles settle. Zero
/// when the circles do not overlap.
pub fn relaxation_nudge(p1: Vec2, p2: Vec2, radius: f32) -> Vec2 {
    let overlap = 2.0 * radius - p1.distance(p2);
    if overlap <= 0.0 {
        return Vec2::ZERO;
    }
    overlap * (p2 - p1) / RELAXATION_DIVISOR
}

/// Largest pairwise overlap, 0 when nothing overlaps
pub fn max_overlap(bodies: &[Body]) -> f32 {
    let mut worst = 0.0f32;
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            worst = worst.max(overlap(&bodies[i], &bodies[j]));
        }
    }
    worst
}

/// Separate every overlapping pair, repeating up to `iterations` sweeps
///
/// Fixing one pair can push a body into a third, so sweeps repeat until no
/// overlap remains. Returns the largest overlap left afterwards.
pub fn resolve_overlaps(bodies: &mut [Body], iterations: usize) -> f32 {
    for _ in 0..iterations {
        let mut moved = false;
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let (head, tail) = bodies.split_at_mut(j);
                let (a, b) = (&mut head[i], &mut tail[0]);
                if overlap(a, b) > OVERLAP_EPSILON {
                    separate(a, b);
                    moved = true;
                }
            }
        }
        if !moved {
            break;
        }
    }
    max_overlap(bodies)
}

/// Exchange momentum along the contact normal when two bodies approach
///
/// `restitution` of 1 is perfectly elastic. Returns true when an impulse was applied.
pub fn collision_impulse(a: &mut Body, b: &mut Body, restitution: f32) -> bool {
    if !is_colliding(a, b) {
        return false;
    }

    let delta = b.position - a.position;
    let normal = delta.try_normalize().unwrap_or(Vec2::X);
    let approach = (a.velocity - b.velocity).dot(normal);
    if approach <= 0.0 {
        return false;
    }

    let inv_a = 1.0 / a.mass;
    let inv_b = 1.0 / b.mass;
    let j = (1.0 + restitution) * approach / (inv_a + inv_b);
    a.velocity -= normal * j * inv_a;
    b.velocity += normal * j * inv_b;
    true
}

/// Bodies in a walled box
#[derive(Debug, Clone)]
pub struct World {
    pub bodies: Vec<Body>,
    pub min: Vec2,
    pub max: Vec2,
    /// Constant acceleration applied to every body, zero by default
    pub gravity: Vec2,
    pub restitution: f32,
    pub resolve_iterations: usize,
}

impl World {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            bodies: Vec::new(),
            min,
            max,
            gravity: Vec2::ZERO,
            restitution: 1.0,
            resolve_iterations: 8,
        }
    }

    pub fn add(&mut self, mut body: Body) {
        body.acceleration = self.acceleration(&body);
        self.bodies.push(body);
    }

    /// Acceleration a = F/m from the external forces
    fn acceleration(&self, body: &Body) -> Vec2 {
        let force = self.gravity * body.mass;
        force / body.mass
    }

    /// Advance by `dt`: Verlet integration, wall bounces, then collisions
    pub fn step(&mut self, dt: f32) {
        for i in 0..self.bodies.len() {
            let new_acc = self.acceleration(&self.bodies[i]);
            let body = &mut self.bodies[i];
            body.position += body.velocity * dt + 0.5 * body.acceleration * dt * dt;
            body.velocity += 0.5 * (body.acceleration + new_acc) * dt;
            body.acceleration = new_acc;
        }

        self.bounce_off_walls();

        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let (head, tail) = self.bodies.split_at_mut(j);
                collision_impulse(&mut head[i], &mut tail[0], self.restitution);
            }
        }

        resolve_overlaps(&mut self.bodies, self.resolve_iterations);
        self.bounce_off_walls();
    }

    fn bounce_off_walls(&mut self) {
        let (min, max, e) = (self.min, self.max, self.restitution);
        for body in &mut self.bodies {
            let r = body.radius;
            if body.position.x - r < min.x {
                body.position.x = min.x + r;
                body.velocity.x = body.velocity.x.abs() * e;
            } else if body.position.x + r > max.x {
                body.position.x = max.x - r;
                body.velocity.x = -body.velocity.x.abs() * e;
            }
            if body.position.y - r < min.y {
                body.position.y = min.y + r;
                body.velocity.y = body.velocity.y.abs() * e;
            } else if body.position.y + r > max.y {
                body.position.y = max.y - r;
                body.velocity.y = -body.velocity.y.abs() * e;
            }
        }
    }

    pub fn kinetic_energy(&self) -> f32 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    pub fn momentum(&self) -> Vec2 {
        self.bodies.iter().map(|b| b.velocity * b.mass).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    fn body(x: f32, y: f32) -> Body {
        Body::new(Vec2::new(x, y), 1.0, WHITE)
    }

    #[test]
    fn test_overlap_detection() {
        assert!((overlap(&body(-2.0, 0.0), &body(2.0, 0.0)) + 2.0).abs() < 1e-6);
        assert!(!is_colliding(&body(-1.0, 0.0), &body(1.0, 0.0)));
        assert!(is_colliding(&body(-2.0, 0.0), &body(-0.5, 0.0)));
    }

    #[test]
    fn test_pair_separation_is_exact() {
        let mut a = body(-2.0, 0.0);
        let mut b = body(-0.5, 0.0);
        let d = separation(&a, &b);
        assert!((d - Vec2::new(0.25, 0.0)).length() < 1e-6);

        separate(&mut a, &mut b);
        assert!((a.position.x + 2.25).abs() < 1e-6);
        assert!((b.position.x + 0.25).abs() < 1e-6);
        assert!(overlap(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_coincident_centers_separate_along_x() {
        let mut a = body(0.0, 0.0);
        let mut b = body(0.0, 0.0);
        separate(&mut a, &mut b);
        assert!((a.position - Vec2::new(-1.0, 0.0)).length() < 1e-6);
        assert!((b.position - Vec2::new(1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_relaxation_nudge() {
        let p1 = Vec2::new(-2.25, 0.0);
        let p3 = Vec2::new(-1.25, 1.5);
        let overlap = 2.0 - (1.0f32 + 2.25).sqrt();
        let nudge = relaxation_nudge(p1, p3, 1.0);
        assert!((nudge - overlap * Vec2::new(1.0, 1.5) / 3.5).length() < 1e-6);
        assert_eq!(relaxation_nudge(Vec2::ZERO, Vec2::new(3.0, 0.0), 1.0), Vec2::ZERO);
    }

    #[test]
    fn test_resolve_three_bodies() {
        let mut bodies = vec![body(-2.25, 0.0), body(-0.25, 0.0), body(-1.25, 1.5)];
        let remaining = resolve_overlaps(&mut bodies, 50);
        assert!(remaining <= OVERLAP_EPSILON * 2.0, "left {remaining}");
    }

    #[test]
    fn test_resolve_returns_immediately_without_overlap() {
        let mut bodies = vec![body(-3.0, 0.0), body(3.0, 0.0)];
        let before: Vec<Vec2> = bodies.iter().map(|b| b.position).collect();
        assert_eq!(resolve_overlaps(&mut bodies, 10), 0.0);
        let after: Vec<Vec2> = bodies.iter().map(|b| b.position).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_free_fall_is_exact() {
        let mut world = World::new(Vec2::splat(-100.0), Vec2::splat(100.0));
        world.gravity = Vec2::new(0.0, -9.8);
        world.add(body(0.0, 50.0));
        let dt = 0.01;
        for _ in 0..100 {
            world.step(dt);
        }
        // Velocity Verlet integrates constant acceleration exactly
        let y = world.bodies[0].position.y;
        let expected = 50.0 - 0.5 * 9.8 * 1.0;
        assert!((y - expected).abs() < 1e-3, "y = {y}, expected {expected}");
        assert!((world.bodies[0].velocity.y + 9.8).abs() < 1e-3);
    }

    #[test]
    fn test_head_on_elastic_collision_swaps_velocities() {
        let mut a = body(-0.95, 0.0).with_velocity(Vec2::new(1.0, 0.0));
        let mut b = body(0.95, 0.0).with_velocity(Vec2::new(-1.0, 0.0));
        assert!(collision_impulse(&mut a, &mut b, 1.0));
        assert!((a.velocity.x + 1.0).abs() < 1e-6);
        assert!((b.velocity.x - 1.0).abs() < 1e-6);
        // Separating bodies are left alone
        assert!(!collision_impulse(&mut a, &mut b, 1.0));
    }

    #[test]
    fn test_world_conserves_energy_and_stays_inside() {
        let mut world = World::new(Vec2::new(-5.0, -4.0), Vec2::new(5.0, 4.0));
        world.add(body(-3.0, 0.0).with_velocity(Vec2::new(2.0, 0.5)));
        world.add(body(3.0, 0.2).with_velocity(Vec2::new(-2.0, 0.0)));
        world.add(body(0.0, 2.5).with_velocity(Vec2::new(0.3, -1.5)));
        let energy = world.kinetic_energy();

        for _ in 0..2000 {
            world.step(1.0 / 120.0);
        }

        let rel = (world.kinetic_energy() - energy).abs() / energy;
        assert!(rel < 1e-3, "energy drift {rel}");
        for b in &world.bodies {
            assert!(b.position.x - b.radius >= world.min.x - 1e-4);
            assert!(b.position.x + b.radius <= world.max.x + 1e-4);
            assert!(b.position.y - b.radius >= world.min.y - 1e-4);
            assert!(b.position.y + b.radius <= world.max.y + 1e-4);
        }
        assert!(max_overlap(&world.bodies) < 0.05);
    }
}
