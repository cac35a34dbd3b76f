//! Step-by-step Schrödinger lesson
//!
//! Stages follow the plan: write down the equation, separate variables, use
//! the Hamiltonian, build the general solution and look at its properties,
//! then put an electron between charged plates and diagonalize the
//! Hamiltonian the field produces.

use crate::eigen::{eigenpairs, EigenPair};
use crate::field::{two_level_hamiltonian, PlateScene, UniformField};
use crate::separation::{InfiniteWell, StationaryState, Superposition};
use glam::DMat2;

/// The well the wave functions live in
pub const WELL: InfiniteWell = InfiniteWell { width: 2.0 };

/// Highest quantum number selectable for the stationary state
pub const MAX_LEVEL: u32 = 4;

/// Field strength range for Up/Down
pub const MAX_FIELD: f64 = 1.5;
pub const FIELD_STEP: f64 = 0.05;

/// Seconds the plates take to move up for the plot
pub const RAISE_TIME: f32 = 1.0;

/// Steps listed on the opening slide
pub const PLAN: [&str; 4] = [
    "1. Solve Schrödinger's PDE",
    "2. Using the Hamiltonian operator",
    "3. Find the general solution",
    "4. Some interesting properties",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Plan,
    Equation,
    Separation,
    Hamiltonian,
    GeneralSolution,
    Properties,
    Plates,
    Potential,
    Diagonalization,
}

impl Stage {
    pub const ALL: [Stage; 9] = [
        Stage::Plan,
        Stage::Equation,
        Stage::Separation,
        Stage::Hamiltonian,
        Stage::GeneralSolution,
        Stage::Properties,
        Stage::Plates,
        Stage::Potential,
        Stage::Diagonalization,
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
            Stage::Plan => "Solving the time-dependent Schrödinger equation",
            Stage::Equation => "Schrödinger's PDE",
            Stage::Separation => "Separation of variables",
            Stage::Hamiltonian => "Using the Hamiltonian operator",
            Stage::GeneralSolution => "The general solution",
            Stage::Properties => "Some interesting properties",
            Stage::Plates => "An e⁻ inside potential",
            Stage::Potential => "Potential energy of the electron",
            Stage::Diagonalization => "Diagonalizing the Hamiltonian",
        }
    }

    /// Index of the sidebar section that belongs to this stage
    pub fn section(&self) -> usize {
        match self {
            Stage::Plan | Stage::Equation => 0,
            Stage::Separation | Stage::Hamiltonian => 1,
            Stage::GeneralSolution | Stage::Properties => 2,
            Stage::Plates | Stage::Potential => 3,
            Stage::Diagonalization => 4,
        }
    }

    /// Whether the plates sit in their raised position
    pub fn raises_plates(&self) -> bool {
        matches!(self, Stage::Potential | Stage::Diagonalization)
    }
}

/// Smoothstep easing on [0, 1]
pub fn ease(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// The lesson state
pub struct Lesson {
    pub stage: Stage,
    /// Simulation clock in scaled units
    pub time: f64,
    pub paused: bool,
    /// Quantum number of the stationary state on show
    pub level: u32,
    pub field: UniformField,
    /// 0 with the plates full size, 1 once raised
    raise: f32,
}

impl Default for Lesson {
    fn default() -> Self {
        Self::new()
    }
}

impl Lesson {
    pub fn new() -> Self {
        Self {
            stage: Stage::Plan,
            time: 0.0,
            paused: false,
            level: 1,
            field: UniformField::spanning_plot(),
            raise: 0.0,
        }
    }

    pub fn go_to(&mut self, stage: Stage) {
        if stage != self.stage {
            self.stage = stage;
            log::debug!("stage: {stage:?}");
        }
    }

    pub fn advance(&mut self) {
        self.go_to(self.stage.next());
    }

    pub fn back(&mut self) {
        self.go_to(self.stage.previous());
    }

    pub fn restart(&mut self) {
        *self = Self::new();
    }

    pub fn update(&mut self, dt: f32) {
        if !self.paused {
            self.time += dt as f64;
        }
        let target = if self.stage.raises_plates() { 1.0 } else { 0.0 };
        let step = dt / RAISE_TIME;
        self.raise = if self.raise < target {
            (self.raise + step).min(target)
        } else {
            (self.raise - step).max(target)
        };
    }

    /// Quantum number, clamped to 1..=`MAX_LEVEL`
    pub fn set_level(&mut self, level: u32) {
        self.level = level.clamp(1, MAX_LEVEL);
    }

    pub fn adjust_field(&mut self, delta: f64) {
        self.field.strength = (self.field.strength + delta).clamp(0.0, MAX_FIELD);
    }

    pub fn plate_scene(&self) -> PlateScene {
        PlateScene::at(ease(self.raise))
    }

    pub fn stationary(&self) -> StationaryState {
        WELL.stationary(self.level)
    }

    pub fn superposition(&self) -> Superposition {
        Superposition::lowest_pair(WELL)
    }

    pub fn hamiltonian(&self) -> DMat2 {
        two_level_hamiltonian(&WELL, &self.field)
    }

    pub fn eigenpairs(&self) -> Option<[EigenPair; 2]> {
        eigenpairs(&self.hamiltonian())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_navigation_clamps() {
        assert_eq!(Stage::Plan.previous(), Stage::Plan);
        assert_eq!(Stage::Diagonalization.next(), Stage::Diagonalization);
        for (i, stage) in Stage::ALL.iter().enumerate() {
            assert_eq!(stage.index(), i);
        }
    }

    #[test]
    fn test_sections_follow_the_plan() {
        let sections: Vec<usize> = Stage::ALL.iter().map(Stage::section).collect();
        assert!(sections.windows(2).all(|w| w[1] >= w[0]));
        assert_eq!(sections.first(), Some(&0));
        assert_eq!(sections.last(), Some(&4));
    }

    #[test]
    fn test_plates_raise_and_lower() {
        let mut lesson = Lesson::new();
        lesson.go_to(Stage::Plates);
        lesson.update(0.5);
        assert_eq!(lesson.plate_scene(), PlateScene::at(0.0));

        lesson.advance();
        assert_eq!(lesson.stage, Stage::Potential);
        for _ in 0..30 {
            lesson.update(0.05);
        }
        assert_eq!(lesson.plate_scene(), PlateScene::at(1.0));

        lesson.back();
        for _ in 0..30 {
            lesson.update(0.05);
        }
        assert_eq!(lesson.plate_scene(), PlateScene::at(0.0));
    }

    #[test]
    fn test_pause_stops_the_clock() {
        let mut lesson = Lesson::new();
        lesson.update(0.25);
        assert!((lesson.time - 0.25).abs() < 1e-9);
        lesson.paused = true;
        lesson.update(0.25);
        assert!((lesson.time - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_level_and_field_are_clamped() {
        let mut lesson = Lesson::new();
        lesson.set_level(0);
        assert_eq!(lesson.level, 1);
        lesson.set_level(9);
        assert_eq!(lesson.level, MAX_LEVEL);

        lesson.adjust_field(-10.0);
        assert_eq!(lesson.field.strength, 0.0);
        lesson.adjust_field(10.0);
        assert_eq!(lesson.field.strength, MAX_FIELD);
    }

    #[test]
    fn test_field_free_hamiltonian_is_diagonal() {
        let mut lesson = Lesson::new();
        lesson.adjust_field(-10.0);
        let [low, high] = lesson.eigenpairs().expect("real symmetric");
        assert!((low.value - WELL.energy(1)).abs() < 1e-12);
        assert!((high.value - WELL.energy(2)).abs() < 1e-12);
        assert!(low.vector.x.abs() > 0.999);
    }

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease(0.0), 0.0);
        assert_eq!(ease(1.0), 1.0);
        assert_eq!(ease(2.0), 1.0);
        assert!((ease(0.5) - 0.5).abs() < 1e-6);
    }
}
