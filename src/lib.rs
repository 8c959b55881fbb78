//! Procedural cube-sphere planet generator.
//!
//! A planet is six cube faces, each a vertex grid projected onto the unit
//! sphere and pushed outward by layered fractal noise. Every generation pass
//! also records the range of radii it produced and samples a colour gradient
//! into a ramp that shading normalises against that range.

pub mod color;
pub mod config;
pub mod export;
pub mod geometry;
pub mod noise;
pub mod terrain;

pub use color::{Color, ColorMapper, ColorRamp, ColorSettings, Gradient, GradientMode, GradientStop};
pub use config::{ConfigError, PlanetSettings};
pub use geometry::{CubeFaceId, CubeSphereFace, FaceMask, FaceMesh};
pub use noise::{FilterKind, NoiseFilter, NoiseSettings, NoiseSource, SimplexNoise};
pub use terrain::{
    ElevationRange, ElevationTracker, NoiseLayer, Planet, PlanetOutput, ShapeGenerator,
    ShapeSettings,
};
