//! Step-by-step collision lesson
//!
//! Each stage fixes where the three circles should be; the demo eases the
//! circles from wherever they were toward the new targets. The last stage
//! hands the circles to a [`World`] and lets them move freely.

use crate::physics::{relaxation_nudge, Body, World};
use glam::Vec2;
use std::f32::consts::{PI, TAU};

pub const RADIUS: f32 = 1.0;

/// Seconds a transition between stages takes
pub const TRANSITION_TIME: f32 = 0.8;

pub const CIRCLE_COLORS: [u32; 3] = [0xFC6255, 0x83C167, 0x58C4DD];

const START: [Vec2; 3] = [
    Vec2::new(-2.0, 0.0),
    Vec2::new(2.0, 0.0),
    Vec2::new(2.0, 0.0),
];

/// Overlap shown before resolving: the second circle sits this far inside the first
const SHOWN_OVERLAP: f32 = 0.5;

/// Height of the third circle above the pair's midpoint
const DROP_HEIGHT: f32 = 1.5;

/// Parts of the lesson plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    EquationsOfMotion,
    Detection,
    Resolution,
}

impl Section {
    pub const PLAN: [Section; 3] = [
        Section::EquationsOfMotion,
        Section::Detection,
        Section::Resolution,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Section::EquationsOfMotion => "Equations of motion",
            Section::Detection => "Collision detection",
            Section::Resolution => "Collision resolution",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Apart,
    Diameter,
    CenterDistance,
    Touching,
    Overlapping,
    Intersection,
    Resolved,
    ThirdCircle,
    Relaxed,
    Simulation,
}

impl Stage {
    pub const ALL: [Stage; 10] = [
        Stage::Apart,
        Stage::Diameter,
        Stage::CenterDistance,
        Stage::Touching,
        Stage::Overlapping,
        Stage::Intersection,
        Stage::Resolved,
        Stage::ThirdCircle,
        Stage::Relaxed,
        Stage::Simulation,
    ];

    pub fn index(&self) -> usize {
        Stage::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    pub fn next(&self) -> Stage {
        Stage::ALL[(self.index() + 1).min(Stage::ALL.len() - 1)]
    }

    pub fn previous(&self) -> Stage {
        Stage::ALL[self.index().saturating_sub(1)]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Stage::Apart => "Two circles",
            Stage::Diameter => "Each circle has radius r",
            Stage::CenterDistance => "Distance between centers d = |p₂ − p₁|",
            Stage::Touching => "Touching: d = 2r",
            Stage::Overlapping => "Collision when 2r − d > 0",
            Stage::Intersection => "The overlap 2r − d",
            Stage::Resolved => "Move each circle by half the overlap",
            Stage::ThirdCircle => "A third circle overlaps both",
            Stage::Relaxed => "Nudge apart: overlap · (p₂ − p₁) / 3.5",
            Stage::Simulation => "Equations of motion with collisions",
        }
    }

    pub fn section(&self) -> Section {
        match self {
            Stage::Apart
            | Stage::Diameter
            | Stage::CenterDistance
            | Stage::Touching
            | Stage::Overlapping
            | Stage::Intersection => Section::Detection,
            Stage::Resolved | Stage::ThirdCircle | Stage::Relaxed => Section::Resolution,
            Stage::Simulation => Section::EquationsOfMotion,
        }
    }

    /// Whether the third circle takes part in this stage
    pub fn has_third(&self) -> bool {
        matches!(
            self,
            Stage::ThirdCircle | Stage::Relaxed | Stage::Simulation
        )
    }

    /// Where the circles sit once this stage's transition has finished
    pub fn targets(&self) -> [Vec2; 3] {
        let touching = START[0] + Vec2::X * 2.0 * RADIUS;
        let overlapping = touching - Vec2::X * SHOWN_OVERLAP;
        let resolved = [
            START[0] - Vec2::X * SHOWN_OVERLAP * 0.5,
            overlapping + Vec2::X * SHOWN_OVERLAP * 0.5,
        ];
        let dropped = (resolved[0] + resolved[1]) * 0.5 + Vec2::Y * DROP_HEIGHT;

        match self {
            Stage::Apart | Stage::Diameter | Stage::CenterDistance => START,
            Stage::Touching => [START[0], touching, START[2]],
            Stage::Overlapping | Stage::Intersection => [START[0], overlapping, START[2]],
            Stage::Resolved => [resolved[0], resolved[1], START[2]],
            Stage::ThirdCircle => [resolved[0], resolved[1], dropped],
            Stage::Relaxed | Stage::Simulation => relaxed(resolved[0], resolved[1], dropped),
        }
    }
}

/// Apply the nudge between the third circle and each of the first two,
/// all computed from the positions before any of them moved
pub fn relaxed(p1: Vec2, p2: Vec2, p3: Vec2) -> [Vec2; 3] {
    let n13 = relaxation_nudge(p1, p3, RADIUS);
    let n23 = relaxation_nudge(p2, p3, RADIUS);
    [p1 - n13, p2 - n23, p3 + n13 + n23]
}

/// Smoothstep easing on [0, 1]
pub fn ease(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Outline of the region shared by two circles, counter-clockwise
///
/// Empty when the circles do not overlap; the smaller circle when one
/// contains the other.
pub fn lens(c1: Vec2, r1: f32, c2: Vec2, r2: f32, segments: usize) -> Vec<Vec2> {
    let d = c1.distance(c2);
    let segments = segments.max(2);

    if d >= r1 + r2 {
        return Vec::new();
    }
    if d <= (r1 - r2).abs() {
        let (c, r) = if r1 < r2 { (c1, r1) } else { (c2, r2) };
        return (0..segments * 2)
            .map(|i| {
                let a = i as f32 / (segments * 2) as f32 * TAU;
                c + Vec2::new(a.cos(), a.sin()) * r
            })
            .collect();
    }

    let dir = (c2 - c1) / d;
    let base = dir.y.atan2(dir.x);
    let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    let half1 = (a / r1).clamp(-1.0, 1.0).acos();
    let half2 = ((d - a) / r2).clamp(-1.0, 1.0).acos();

    let arc = |center: Vec2, r: f32, mid: f32, half: f32| {
        (0..=segments).map(move |i| {
            let t = mid - half + 2.0 * half * i as f32 / segments as f32;
            center + Vec2::new(t.cos(), t.sin()) * r
        })
    };

    // Arc of circle 1 facing circle 2, then arc of circle 2 facing circle 1
    // without the two shared corner points
    arc(c1, r1, base, half1)
        .chain(arc(c2, r2, base + PI, half2).skip(1).take(segments - 1))
        .collect()
}

/// The lesson state
pub struct Demo {
    pub stage: Stage,
    pub bodies: [Body; 3],
    from: [Vec2; 3],
    progress: f32,
    pub world: Option<World>,
    bounds: (Vec2, Vec2),
}

impl Demo {
    pub fn new(colors: [[f32; 4]; 3], bounds: (Vec2, Vec2)) -> Self {
        let bodies = [
            Body::new(START[0], RADIUS, colors[0]),
            Body::new(START[1], RADIUS, colors[1]),
            Body::new(START[2], RADIUS, colors[2]),
        ];
        Self {
            stage: Stage::Apart,
            bodies,
            from: START,
            progress: 1.0,
            world: None,
            bounds,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.progress < 1.0
    }

    pub fn go_to(&mut self, stage: Stage) {
        if stage == self.stage {
            return;
        }
        if let Some(world) = self.world.take() {
            for (body, moved) in self.bodies.iter_mut().zip(world.bodies) {
                body.position = moved.position;
            }
        }
        self.from = self.positions();
        self.stage = stage;
        self.progress = 0.0;
        log::debug!("stage: {:?}", stage);
    }

    pub fn advance(&mut self) {
        self.go_to(self.stage.next());
    }

    pub fn back(&mut self) {
        self.go_to(self.stage.previous());
    }

    pub fn restart(&mut self) {
        self.world = None;
        for (body, start) in self.bodies.iter_mut().zip(START) {
            body.position = start;
            body.velocity = Vec2::ZERO;
        }
        self.from = START;
        self.stage = Stage::Apart;
        self.progress = 1.0;
    }

    pub fn positions(&self) -> [Vec2; 3] {
        [
            self.bodies[0].position,
            self.bodies[1].position,
            self.bodies[2].position,
        ]
    }

    /// Bodies currently on screen
    pub fn visible(&self) -> &[Body] {
        if let Some(world) = &self.world {
            return &world.bodies;
        }
        if self.stage.has_third() {
            &self.bodies
        } else {
            &self.bodies[..2]
        }
    }

    pub fn update(&mut self, dt: f32) {
        if let Some(world) = &mut self.world {
            world.step(dt);
            return;
        }

        if self.is_transitioning() {
            self.progress = (self.progress + dt / TRANSITION_TIME).min(1.0);
            let s = ease(self.progress);
            for ((body, from), to) in self
                .bodies
                .iter_mut()
                .zip(self.from)
                .zip(self.stage.targets())
            {
                body.position = from.lerp(to, s);
            }
            if self.third_appears() {
                self.bodies[2].position = self.stage.targets()[2];
            }
        } else if self.stage == Stage::Simulation {
            self.world = Some(self.launch());
        }
    }

    /// The third circle pops in at its drop point instead of sliding there
    fn third_appears(&self) -> bool {
        self.stage == Stage::ThirdCircle && !self.from_has_third()
    }

    fn from_has_third(&self) -> bool {
        self.from[2] != START[2]
    }

    /// World seeded with the relaxed circles given a push
    fn launch(&self) -> World {
        let mut world = World::new(self.bounds.0, self.bounds.1);
        let kicks = [Vec2::new(1.5, 0.8), Vec2::new(-1.2, 1.0), Vec2::new(0.4, -2.0)];
        for (body, kick) in self.bodies.iter().zip(kicks) {
            world.add(body.clone().with_velocity(kick));
        }
        world
    }

    /// Intersection outline of the first two circles
    pub fn intersection(&self) -> Vec<Vec2> {
        lens(
            self.bodies[0].position,
            RADIUS,
            self.bodies[1].position,
            RADIUS,
            24,
        )
    }
}
