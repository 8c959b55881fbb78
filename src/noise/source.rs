//! Raw 3D noise primitive used by the noise filters.

use glam::Vec3;
use simdnoise::NoiseBuilder;

/// A deterministic, continuous 3D scalar noise function.
///
/// Values are expected to lie approximately in [-1, 1]. Implementations must
/// be pure: the same point always yields the same value.
pub trait NoiseSource: Send + Sync {
    /// Samples the noise field at `point`.
    fn sample(&self, point: Vec3) -> f32;
}

/// simdnoise leaves out the usual `32 *` scale of 3D simplex, so raw single
/// octave samples only reach about +-0.031.
const SIMPLEX_3D_SCALE: f32 = 32.0;

/// Single-octave 3D simplex noise backed by simdnoise, scaled to [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimplexNoise {
    seed: i32,
}

impl SimplexNoise {
    /// Creates a simplex source using the given permutation seed.
    pub fn new(seed: i32) -> Self {
        Self { seed }
    }

    /// Returns the seed of this source.
    pub fn seed(&self) -> i32 {
        self.seed
    }
}

impl Default for SimplexNoise {
    fn default() -> Self {
        Self::new(0)
    }
}

impl NoiseSource for SimplexNoise {
    fn sample(&self, point: Vec3) -> f32 {
        // A 1x1x1 block at the requested offset yields exactly one sample.
        let raw = NoiseBuilder::fbm_3d_offset(point.x, 1, point.y, 1, point.z, 1)
            .with_seed(self.seed)
            .with_freq(1.0)
            .with_octaves(1)
            .generate()
            .0[0];
        (raw * SIMPLEX_3D_SCALE).clamp(-1.0, 1.0)
    }
}
