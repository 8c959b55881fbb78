//! Layered noise filters turning a direction into a non-negative displacement.

use std::fmt;
use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::source::NoiseSource;
use crate::config::ConfigError;

/// Maximum number of octaves a single noise layer may accumulate.
pub const MAX_OCTAVES: u8 = 8;

/// Default weight multiplier used by rigid layers built through [`NoiseSettings::rigid`].
pub const DEFAULT_WEIGHT_MULTIPLIER: f32 = 0.8;

/// Selects how a noise layer interprets raw noise samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Smooth fBm remapped to [0, 1] per octave.
    #[default]
    Simple,
    /// Ridged noise with weight feedback between octaves.
    Rigid,
}

/// Configuration for one noise filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSettings {
    /// Filter variant.
    pub filter_kind: FilterKind,
    /// Number of octaves, 1 to [`MAX_OCTAVES`].
    pub num_layers: u8,
    /// Multiplier applied to the final value.
    pub strength: f32,
    /// Frequency of the first octave.
    pub base_roughness: f32,
    /// Frequency multiplier per octave.
    pub roughness: f32,
    /// Amplitude multiplier per octave.
    pub persistence: f32,
    /// Floor subtracted from the accumulated value before clamping at zero.
    pub min_value: f32,
    /// Offset added to every sample point, moving the noise field.
    pub center: Vec3,
    /// Weight feedback factor. Required for [`FilterKind::Rigid`].
    pub weight_multiplier: Option<f32>,
    /// Seed of the underlying noise primitive.
    pub seed: i32,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            filter_kind: FilterKind::Simple,
            num_layers: 1,
            strength: 1.0,
            base_roughness: 1.0,
            roughness: 2.0,
            persistence: 0.5,
            min_value: 0.0,
            center: Vec3::ZERO,
            weight_multiplier: None,
            seed: 0,
        }
    }
}

impl NoiseSettings {
    /// Simple filter settings with default parameters.
    pub fn simple() -> Self {
        Self::default()
    }

    /// Rigid filter settings with default parameters.
    pub fn rigid() -> Self {
        Self {
            filter_kind: FilterKind::Rigid,
            weight_multiplier: Some(DEFAULT_WEIGHT_MULTIPLIER),
            ..Default::default()
        }
    }

    /// Checks the settings of the layer at index `layer`.
    pub fn validate(&self, layer: usize) -> Result<(), ConfigError> {
        if self.num_layers == 0 || self.num_layers > MAX_OCTAVES {
            return Err(ConfigError::LayerCountOutOfRange {
                layer,
                num_layers: self.num_layers,
            });
        }

        let scalars = [
            ("strength", self.strength),
            ("base_roughness", self.base_roughness),
            ("roughness", self.roughness),
            ("persistence", self.persistence),
            ("min_value", self.min_value),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteParameter { layer, name });
            }
        }
        if !self.center.is_finite() {
            return Err(ConfigError::NonFiniteParameter { layer, name: "center" });
        }
        if self.strength < 0.0 {
            return Err(ConfigError::NegativeStrength {
                layer,
                strength: self.strength,
            });
        }

        if self.filter_kind == FilterKind::Rigid {
            match self.weight_multiplier {
                None => return Err(ConfigError::MissingWeightMultiplier { layer }),
                Some(w) if !w.is_finite() => {
                    return Err(ConfigError::NonFiniteParameter {
                        layer,
                        name: "weight_multiplier",
                    })
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}

/// Octave parameters shared by both filter variants.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Octaves {
    count: u8,
    strength: f32,
    base_roughness: f32,
    roughness: f32,
    persistence: f32,
    min_value: f32,
    center: Vec3,
}

impl Octaves {
    fn from_settings(settings: &NoiseSettings) -> Self {
        Self {
            count: settings.num_layers,
            strength: settings.strength,
            base_roughness: settings.base_roughness,
            roughness: settings.roughness,
            persistence: settings.persistence,
            min_value: settings.min_value,
            center: settings.center,
        }
    }

    /// Applies the floor and strength to an accumulated value.
    #[inline]
    fn finish(&self, accumulated: f32) -> f32 {
        (accumulated - self.min_value).max(0.0) * self.strength
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Variant {
    Simple,
    Rigid { weight_multiplier: f32 },
}

/// A noise filter, selected once from its [`NoiseSettings`].
#[derive(Clone)]
pub struct NoiseFilter {
    octaves: Octaves,
    variant: Variant,
    noise: Arc<dyn NoiseSource>,
}

impl NoiseFilter {
    /// Builds the filter for the layer at index `layer`.
    ///
    /// The settings are validated first; a rigid layer without a weight
    /// multiplier is rejected.
    pub fn new(
        layer: usize,
        settings: &NoiseSettings,
        noise: Arc<dyn NoiseSource>,
    ) -> Result<Self, ConfigError> {
        settings.validate(layer)?;

        let variant = match settings.filter_kind {
            FilterKind::Simple => Variant::Simple,
            FilterKind::Rigid => Variant::Rigid {
                weight_multiplier: settings
                    .weight_multiplier
                    .ok_or(ConfigError::MissingWeightMultiplier { layer })?,
            },
        };

        Ok(Self {
            octaves: Octaves::from_settings(settings),
            variant,
            noise,
        })
    }

    /// Returns the variant of this filter.
    pub fn kind(&self) -> FilterKind {
        match self.variant {
            Variant::Simple => FilterKind::Simple,
            Variant::Rigid { .. } => FilterKind::Rigid,
        }
    }

    /// Evaluates the filter in `direction`. The result is never negative.
    pub fn evaluate(&self, direction: Vec3) -> f32 {
        let noise = self.noise.as_ref();
        match self.variant {
            Variant::Simple => evaluate_simple(&self.octaves, noise, direction),
            Variant::Rigid { weight_multiplier } => {
                evaluate_rigid(&self.octaves, weight_multiplier, noise, direction)
            }
        }
    }
}

impl fmt::Debug for NoiseFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseFilter")
            .field("octaves", &self.octaves)
            .field("variant", &self.variant)
            .finish_non_exhaustive()
    }
}

fn evaluate_simple(octaves: &Octaves, noise: &dyn NoiseSource, point: Vec3) -> f32 {
    let mut total = 0.0f32;
    let mut frequency = octaves.base_roughness;
    let mut amplitude = 1.0f32;

    for _ in 0..octaves.count {
        let v = noise.sample(point * frequency + octaves.center);
        // [-1, 1] -> [0, 1]
        total += (v + 1.0) * 0.5 * amplitude;

        frequency *= octaves.roughness;
        amplitude *= octaves.persistence;
    }

    octaves.finish(total)
}

fn evaluate_rigid(
    octaves: &Octaves,
    weight_multiplier: f32,
    noise: &dyn NoiseSource,
    point: Vec3,
) -> f32 {
    let mut total = 0.0f32;
    let mut frequency = octaves.base_roughness;
    let mut amplitude = 1.0f32;
    let mut weight = 1.0f32;

    for _ in 0..octaves.count {
        let mut v = 1.0 - noise.sample(point * frequency + octaves.center).abs();
        v *= v;

        // Low octaves suppress detail in the octaves that follow.
        v *= weight;
        weight = v * weight_multiplier;

        total += (v * 0.5 * amplitude).clamp(0.0, 1.0);

        frequency *= octaves.roughness;
        amplitude *= octaves.persistence;
    }

    octaves.finish(total)
}
