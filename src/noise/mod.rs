//! Noise sampling for terrain elevation.
//!
//! The raw primitive comes from simdnoise behind the [`NoiseSource`] trait;
//! [`NoiseFilter`] layers it into octaves.

mod filter;
mod source;

pub use filter::{
    FilterKind, NoiseFilter, NoiseSettings, DEFAULT_WEIGHT_MULTIPLIER, MAX_OCTAVES,
};
pub use source::{NoiseSource, SimplexNoise};
