//! Terrain shaping.
//!
//! Turns noise settings into displaced planet positions, tracks the
//! elevation range of a pass and orchestrates whole-planet generation.

mod elevation;
mod planet;
mod shape;

pub use elevation::{ElevationRange, ElevationTracker};
pub use planet::{Planet, PlanetOutput};
pub use shape::{NoiseLayer, ShapeGenerator, ShapeSettings};
