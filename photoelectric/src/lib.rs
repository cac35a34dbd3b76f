//! Photoelectric Effect
//!
//! Light ejects electrons from a metal only above a threshold frequency, and
//! the electrons' maximum kinetic energy grows with frequency, not intensity.
//!
//! - [`physics`]: photon energy, work functions, K_max and stopping voltage
//! - [`apparatus`]: chamber, plates and voltmeter geometry
//! - [`experiment`]: photons and electrons moving through the apparatus

pub mod apparatus;
pub mod equations;
pub mod experiment;
pub mod physics;
