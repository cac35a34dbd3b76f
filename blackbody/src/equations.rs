//! Equation tables for the blackbody sidebars

use common::equations_ui::{Equation, EquationSection};

// ============================================
// Planck spectrum
// ============================================

const PLANCK_LAW: &[Equation] = &[
    Equation {
        name: "Planck's Law",
        formula: "B(λ,T) = 2hc²/λ⁵ · 1/(e^(hc/λkT) − 1)",
        description: "Spectral radiance of a blackbody",
    },
    Equation {
        name: "Quantized Energy",
        formula: "E = hν = hc/λ",
        description: "Oscillators exchange energy in quanta",
    },
];

const PEAK_AND_POWER: &[Equation] = &[
    Equation {
        name: "Wien's Displacement Law",
        formula: "λ_max = b / T",
        description: "Peak wavelength shifts shorter as T rises",
    },
    Equation {
        name: "Stefan-Boltzmann Law",
        formula: "j = σT⁴ = π∫B(λ,T) dλ",
        description: "Total power radiated per unit area",
    },
];

pub const PLANCK_SECTIONS: &[EquationSection] = &[
    EquationSection {
        heading: "Planck's Law",
        equations: PLANCK_LAW,
    },
    EquationSection {
        heading: "Peak and Total Power",
        equations: PEAK_AND_POWER,
    },
];

pub const PLANCK_VARIABLES: &[(&str, &str)] = &[
    ("λ", "Wavelength"),
    ("T", "Temperature (K)"),
    ("h", "Planck constant 6.626e-34 J·s"),
    ("c", "Speed of light"),
    ("k", "Boltzmann constant"),
    ("b", "Wien constant 2.898e-3 m·K"),
    ("σ", "Stefan-Boltzmann constant"),
];

// ============================================
// Ultraviolet catastrophe
// ============================================

const CLASSICAL: &[Equation] = &[Equation {
    name: "Rayleigh-Jeans Law",
    formula: "u(λ,T) = 8πkT/λ⁴",
    description: "Classical equipartition, diverges as λ → 0",
}];

const QUANTUM: &[Equation] = &[
    Equation {
        name: "Planck's Law",
        formula: "u(λ,T) = 8πhc/λ⁵ · 1/(e^(hc/λkT) − 1)",
        description: "Quantized oscillators suppress short wavelengths",
    },
    Equation {
        name: "Classical Limit",
        formula: "hc/λkT ≪ 1 ⇒ e^x − 1 ≈ x",
        description: "Planck reduces to Rayleigh-Jeans at long λ",
    },
];

pub const CATASTROPHE_SECTIONS: &[EquationSection] = &[
    EquationSection {
        heading: "Classical Prediction",
        equations: CLASSICAL,
    },
    EquationSection {
        heading: "Quantum Resolution",
        equations: QUANTUM,
    },
];

pub const CATASTROPHE_VARIABLES: &[(&str, &str)] = &[
    ("u", "Spectral energy density"),
    ("B", "Spectral radiance = c·u/4π"),
    ("λ", "Wavelength"),
    ("T", "Temperature (K)"),
    ("k", "Boltzmann constant"),
    ("h", "Planck constant"),
];
