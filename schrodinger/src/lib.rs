//! Schrödinger's Equation
//!
//! Separation of variables for the time-dependent equation, stationary
//! states and their superpositions in a well, an electron between charged
//! plates, and the 2×2 diagonalization that the field's Hamiltonian calls
//! for.

pub mod eigen;
pub mod equations;
pub mod field;
pub mod lesson;
pub mod separation;
pub mod wavefunction;
