//! Equation tables for the collision sidebar

use crate::demo::Section;
use common::equations_ui::{Equation, EquationSection};

const MOTION: &[Equation] = &[
    Equation {
        name: "Newton's Second Law",
        formula: "F = ma",
        description: "Mx''(t) = F(x(t)) = −∇V(x(t))",
    },
    Equation {
        name: "Velocity Verlet",
        formula: "x' = x + vΔt + ½aΔt²\nv' = v + ½(a + a')Δt",
        description: "Time-reversible integration step",
    },
];

const DETECTION: &[Equation] = &[Equation {
    name: "Collision Test",
    formula: "2r − d > 0,  d = |p₂ − p₁|",
    description: "Circles overlap when closer than 2r",
}];

const RESOLUTION: &[Equation] = &[
    Equation {
        name: "Resolution",
        formula: "a⃗ = (2r − d)/2 · (p₂ − p₁)/d",
        description: "Move p₂ by +a⃗ and p₁ by −a⃗",
    },
    Equation {
        name: "Relaxation",
        formula: "Δ = (2r − d) · (p₂ − p₁) / 3.5",
        description: "Gentle nudge for several touching circles",
    },
];

const EPR: &[Equation] = &[
    Equation {
        name: "Mirrored Positions",
        formula: "x₂ = −x₁",
        description: "Both particles left the origin together",
    },
    Equation {
        name: "Opposite Momenta",
        formula: "p₂ = −p₁",
        description: "Total momentum stays zero",
    },
    Equation {
        name: "Uncertainty",
        formula: "Δx₁Δp₁ ≥ ħ/2",
        description: "Still holds for each particle alone",
    },
];

pub const COLLISION_SECTIONS: &[EquationSection] = &[
    EquationSection {
        heading: "Equations of Motion",
        equations: MOTION,
    },
    EquationSection {
        heading: "Collision Detection",
        equations: DETECTION,
    },
    EquationSection {
        heading: "Collision Resolution",
        equations: RESOLUTION,
    },
    EquationSection {
        heading: "EPR Thought Experiment",
        equations: EPR,
    },
];

/// Sidebar section for the EPR scene
pub const EPR_SECTION: usize = 3;

/// Sidebar section matching a part of the lesson plan
pub fn lesson_section(section: Section) -> usize {
    match section {
        Section::EquationsOfMotion => 0,
        Section::Detection => 1,
        Section::Resolution => 2,
    }
}

pub const COLLISION_VARIABLES: &[(&str, &str)] = &[
    ("r", "Circle radius"),
    ("p₁, p₂", "Circle centers, or momenta in the EPR scene"),
    ("d", "Distance between centers"),
    ("a⃗", "Separation displacement"),
    ("x, v, a", "Position, velocity, acceleration"),
    ("Δt", "Time step"),
    ("ħ", "Reduced Planck constant"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_plan_section_has_a_sidebar_section() {
        for section in Section::PLAN {
            let heading = COLLISION_SECTIONS[lesson_section(section)].heading;
            assert!(
                heading.eq_ignore_ascii_case(section.name()),
                "{heading} vs {}",
                section.name()
            );
        }
        assert!(COLLISION_SECTIONS[EPR_SECTION].heading.starts_with("EPR"));
    }
}
