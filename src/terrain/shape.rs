//! Shape settings and the generator that displaces unit-sphere points.

use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::elevation::{ElevationRange, ElevationTracker};
use crate::config::ConfigError;
use crate::noise::{FilterKind, NoiseFilter, NoiseSettings, NoiseSource, SimplexNoise};

/// One weighted noise layer of a planet shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseLayer {
    /// Whether the layer contributes to the elevation sum.
    pub enabled: bool,
    /// Scale this layer by the first layer's evaluated value.
    pub use_first_layer_mask: bool,
    /// Filter configuration.
    pub noise_settings: NoiseSettings,
}

impl Default for NoiseLayer {
    fn default() -> Self {
        Self {
            enabled: true,
            use_first_layer_mask: false,
            noise_settings: NoiseSettings::default(),
        }
    }
}

impl NoiseLayer {
    /// An enabled, unmasked layer using `noise_settings`.
    pub fn new(noise_settings: NoiseSettings) -> Self {
        Self {
            noise_settings,
            ..Default::default()
        }
    }

    /// Returns this layer with first-layer masking switched on.
    pub fn masked(mut self) -> Self {
        self.use_first_layer_mask = true;
        self
    }

    /// Returns this layer with `enabled` set.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Planet radius plus the ordered noise layers displacing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeSettings {
    /// Radius of the undisplaced sphere. Must be positive.
    pub planet_radius: f32,
    /// Noise layers; layer 0 doubles as the mask source.
    pub noise_layers: Vec<NoiseLayer>,
}

impl Default for ShapeSettings {
    fn default() -> Self {
        Self {
            planet_radius: 1.0,
            noise_layers: Vec::new(),
        }
    }
}

impl ShapeSettings {
    /// A smooth sphere of the given radius.
    pub fn sphere(planet_radius: f32) -> Self {
        Self {
            planet_radius,
            noise_layers: Vec::new(),
        }
    }

    /// Continents from simple noise with ridged mountains confined to land.
    pub fn earth_like(seed: i32) -> Self {
        let continents = NoiseSettings {
            num_layers: 5,
            strength: 0.12,
            base_roughness: 0.71,
            roughness: 1.83,
            persistence: 0.54,
            min_value: 0.98,
            seed,
            ..NoiseSettings::simple()
        };
        let mountains = NoiseSettings {
            num_layers: 5,
            strength: 4.0,
            base_roughness: 1.08,
            roughness: 2.34,
            persistence: 0.6,
            min_value: 0.37,
            seed: seed.wrapping_add(1),
            ..NoiseSettings::rigid()
        };

        Self {
            planet_radius: 1.0,
            noise_layers: vec![
                NoiseLayer::new(continents),
                NoiseLayer::new(mountains).masked(),
            ],
        }
    }

    /// Checks the radius and every layer.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.planet_radius.is_finite() && self.planet_radius > 0.0) {
            return Err(ConfigError::InvalidRadius(self.planet_radius));
        }
        for (i, layer) in self.noise_layers.iter().enumerate() {
            layer.noise_settings.validate(i)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct ShapeLayer {
    enabled: bool,
    use_first_layer_mask: bool,
    filter: NoiseFilter,
}

/// Computes displaced planet positions from [`ShapeSettings`].
///
/// Every call to [`ShapeGenerator::elevate`] records the resulting radius in
/// an internal [`ElevationTracker`], so one generator corresponds to one
/// generation pass.
#[derive(Debug)]
pub struct ShapeGenerator {
    planet_radius: f32,
    layers: Vec<ShapeLayer>,
    tracker: ElevationTracker,
}

impl ShapeGenerator {
    /// Builds a generator with a simplex noise source per layer, seeded from
    /// each layer's settings.
    pub fn new(settings: &ShapeSettings) -> Result<Self, ConfigError> {
        Self::with_noise(settings, |noise| {
            Arc::new(SimplexNoise::new(noise.seed)) as Arc<dyn NoiseSource>
        })
    }

    /// Builds a generator, asking `make_noise` for each layer's noise source.
    pub fn with_noise<F>(settings: &ShapeSettings, mut make_noise: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&NoiseSettings) -> Arc<dyn NoiseSource>,
    {
        settings.validate()?;

        let layers = settings
            .noise_layers
            .iter()
            .enumerate()
            .map(|(i, layer)| {
                let filter =
                    NoiseFilter::new(i, &layer.noise_settings, make_noise(&layer.noise_settings))?;
                Ok(ShapeLayer {
                    enabled: layer.enabled,
                    use_first_layer_mask: layer.use_first_layer_mask,
                    filter,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        log::debug!(
            "shape generator: radius {}, {} layers ({} rigid)",
            settings.planet_radius,
            layers.len(),
            layers
                .iter()
                .filter(|l| l.filter.kind() == FilterKind::Rigid)
                .count()
        );

        Ok(Self {
            planet_radius: settings.planet_radius,
            layers,
            tracker: ElevationTracker::new(),
        })
    }

    /// Returns the undisplaced radius.
    pub fn planet_radius(&self) -> f32 {
        self.planet_radius
    }

    /// Returns the number of configured layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Sums the layer contributions at `point_on_unit_sphere`.
    ///
    /// Layer 0 is always evaluated because later layers may use it as a mask,
    /// but it only contributes when enabled.
    pub fn elevation(&self, point_on_unit_sphere: Vec3) -> f32 {
        let Some((first, rest)) = self.layers.split_first() else {
            return 0.0;
        };

        let first_layer_value = first.filter.evaluate(point_on_unit_sphere);
        let mut elevation = if first.enabled { first_layer_value } else { 0.0 };

        for layer in rest.iter().filter(|l| l.enabled) {
            let mask = if layer.use_first_layer_mask {
                first_layer_value
            } else {
                1.0
            };
            elevation += layer.filter.evaluate(point_on_unit_sphere) * mask;
        }

        elevation
    }

    /// Displaces a unit-sphere point and records its radius.
    pub fn elevate(&self, point_on_unit_sphere: Vec3) -> Vec3 {
        let radius = self.planet_radius * (1.0 + self.elevation(point_on_unit_sphere));
        self.tracker.observe(radius);
        point_on_unit_sphere * radius
    }

    /// Returns the range of radii produced so far.
    pub fn elevation_range(&self) -> ElevationRange {
        self.tracker.range()
    }
}
