//! Circle Collisions
//!
//! Detection and resolution of overlapping circles, from a two-circle lesson
//! to a small Verlet-integrated world, plus the EPR pair thrown apart on a
//! number line.

pub mod demo;
pub mod epr;
pub mod equations;
pub mod physics;
