//! Blackbody Radiation
//!
//! Radiation laws and plotting helpers for two visualizations:
//!
//! - **Planck Spectrum**: blackbody curves, Wien peaks and the visible band
//! - **Ultraviolet Catastrophe**: Planck against the classical Rayleigh-Jeans law

pub mod chart;
pub mod equations;
pub mod plot;
pub mod radiation;
pub mod spectrum;
