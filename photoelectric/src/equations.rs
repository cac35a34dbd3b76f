//! Equation table for the photoelectric sidebar

use common::equations_ui::{Equation, EquationSection};

const LIGHT_QUANTA: &[Equation] = &[Equation {
    name: "Photon Energy",
    formula: "E = hν = hc/λ",
    description: "Light arrives in quanta",
}];

const EMISSION: &[Equation] = &[
    Equation {
        name: "Work Function",
        formula: "W = hν₀",
        description: "Minimum energy to free an electron",
    },
    Equation {
        name: "Einstein's Relation",
        formula: "K_max = hν − W",
        description: "Energy left over after escaping the metal",
    },
    Equation {
        name: "Stopping Voltage",
        formula: "eV₀ = K_max",
        description: "Retarding voltage that halts the fastest electrons",
    },
];

pub const PHOTOELECTRIC_SECTIONS: &[EquationSection] = &[
    EquationSection {
        heading: "Light Quanta",
        equations: LIGHT_QUANTA,
    },
    EquationSection {
        heading: "Electron Emission",
        equations: EMISSION,
    },
];

pub const PHOTOELECTRIC_VARIABLES: &[(&str, &str)] = &[
    ("h", "Planck constant"),
    ("ν", "Light frequency"),
    ("ν₀", "Threshold frequency"),
    ("λ", "Wavelength"),
    ("W", "Work function (eV)"),
    ("K_max", "Maximum kinetic energy"),
    ("V₀", "Stopping voltage"),
    ("e", "Elementary charge"),
];
