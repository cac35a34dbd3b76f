//! Equation table for the timeline sidebar

use common::equations_ui::{Equation, EquationSection};

const OLD_QUANTUM_THEORY: &[Equation] = &[
    Equation {
        name: "Planck (1900)",
        formula: "E = nhν",
        description: "Oscillator energy comes in whole quanta",
    },
    Equation {
        name: "Einstein (1905)",
        formula: "K_max = hν − W",
        description: "Light is absorbed one photon at a time",
    },
    Equation {
        name: "Bohr (1913)",
        formula: "Eₙ = −13.6 eV / n²",
        description: "Stationary orbits of hydrogen",
    },
];

const WAVE_MECHANICS: &[Equation] = &[Equation {
    name: "Schrödinger (1926)",
    formula: "iħ ∂ψ/∂t = Ĥψ",
    description: "Wave equation for matter",
}];

pub const TIMELINE_SECTIONS: &[EquationSection] = &[
    EquationSection {
        heading: "Old Quantum Theory",
        equations: OLD_QUANTUM_THEORY,
    },
    EquationSection {
        heading: "Wave Mechanics",
        equations: WAVE_MECHANICS,
    },
];

/// Wave mechanics dates from 1925 (Heisenberg) and 1926 (Schrödinger)
const WAVE_MECHANICS_FROM: i32 = 1925;

/// Index into `TIMELINE_SECTIONS` for an event year
pub fn era_section(year: i32) -> usize {
    usize::from(year >= WAVE_MECHANICS_FROM)
}

pub const TIMELINE_VARIABLES: &[(&str, &str)] = &[
    ("h", "Planck constant"),
    ("ħ", "h / 2π"),
    ("ν", "Frequency"),
    ("W", "Work function"),
    ("n", "Quantum number"),
    ("ψ", "Wave function"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_era_section_by_year() {
        assert_eq!(TIMELINE_SECTIONS[era_section(1900)].heading, "Old Quantum Theory");
        assert_eq!(TIMELINE_SECTIONS[era_section(1913)].heading, "Old Quantum Theory");
        assert_eq!(TIMELINE_SECTIONS[era_section(1926)].heading, "Wave Mechanics");
    }
}
