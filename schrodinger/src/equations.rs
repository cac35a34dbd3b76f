//! Equation tables for the Schrödinger sidebar

use common::equations_ui::{Equation, EquationSection};

const EQUATION: &[Equation] = &[
    Equation {
        name: "Time-Dependent Schrödinger",
        formula: "iħ ∂Ψ/∂t = −ħ²/2m ∂²Ψ/∂x² + UΨ",
        description: "Governs how Ψ(x,t) evolves",
    },
    Equation {
        name: "Probability Density",
        formula: "ρ(x,t) = |Ψ(x,t)|²",
        description: "Where the particle is likely to be found",
    },
];

const SEPARATION: &[Equation] = &[
    Equation {
        name: "Product Ansatz",
        formula: "Ψ(x,t) = ψ(x)φ(t),  U = U(x)",
        description: "Works when the potential does not depend on t",
    },
    Equation {
        name: "Time-Independent Equation",
        formula: "Ĥψ = −ħ²/2m ψ'' + Uψ = Eψ",
        description: "The Hamiltonian operator's eigenvalue problem",
    },
    Equation {
        name: "Time Factor",
        formula: "iħ dφ/dt = Eφ  ⇒  φ = e^(−iEt/ħ)",
        description: "A pure phase rotating at E/ħ",
    },
];

const GENERAL: &[Equation] = &[
    Equation {
        name: "General Solution",
        formula: "Ψ = Σ cₙ ψₙ(x) e^(−iEₙt/ħ)",
        description: "Any sum of stationary states is a solution",
    },
    Equation {
        name: "Infinite Well",
        formula: "Eₙ = n²π²ħ²/2mL²",
        description: "ψₙ = √(2/L) sin(nπ(x + L/2)/L)",
    },
    Equation {
        name: "Conserved Quantities",
        formula: "∫|Ψ|²dx = 1,  ⟨E⟩ = Σ|cₙ|²Eₙ",
        description: "Neither changes with time",
    },
    Equation {
        name: "Beat Period",
        formula: "T = 2πħ / (E₂ − E₁)",
        description: "|Ψ|² of two mixed levels repeats",
    },
];

const PLATES: &[Equation] = &[
    Equation {
        name: "Uniform Field",
        formula: "E⃗ = E x̂",
        description: "Points from the positive to the negative plate",
    },
    Equation {
        name: "Potential Energy",
        formula: "U(x) = eEx",
        description: "Rises towards the negative plate",
    },
    Equation {
        name: "Force on the Electron",
        formula: "F = −dU/dx = −eE",
        description: "Pulls towards the positive plate",
    },
];

const DIAGONALIZATION: &[Equation] = &[
    Equation {
        name: "Transformation",
        formula: "R = Mr,  M = [[a, b], [c, d]]",
        description: "",
    },
    Equation {
        name: "Eigenvalue Condition",
        formula: "Mr = λr",
        description: "det(M − λI) = λ² − (a + d)λ + (ad − bc) = 0",
    },
    Equation {
        name: "Two-Level Hamiltonian",
        formula: "H = [[E₁, eE⟨1|x|2⟩], [eE⟨2|x|1⟩, E₂]]",
        description: "The field mixes the two lowest well states",
    },
];

pub const SCHRODINGER_SECTIONS: &[EquationSection] = &[
    EquationSection {
        heading: "Schrödinger's Equation",
        equations: EQUATION,
    },
    EquationSection {
        heading: "Separation of Variables",
        equations: SEPARATION,
    },
    EquationSection {
        heading: "General Solution",
        equations: GENERAL,
    },
    EquationSection {
        heading: "Electron in a Potential",
        equations: PLATES,
    },
    EquationSection {
        heading: "Diagonalization",
        equations: DIAGONALIZATION,
    },
];

pub const SCHRODINGER_VARIABLES: &[(&str, &str)] = &[
    ("Ψ", "Wave function Ψ(x,t)"),
    ("ψ, φ", "Spatial and time factors"),
    ("ħ", "Reduced Planck constant (1 here)"),
    ("m", "Particle mass (1 here)"),
    ("U", "Potential energy"),
    ("E", "Separation constant, the energy"),
    ("L", "Well width"),
    ("λ, r", "Eigenvalue and eigenvector"),
];
