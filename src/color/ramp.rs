//! Height-to-colour ramp built from a gradient and the pass elevation range.

use serde::{Deserialize, Serialize};

use super::gradient::{Color, Gradient};
use crate::config::ConfigError;
use crate::terrain::ElevationRange;

/// Default number of ramp samples.
pub const DEFAULT_RAMP_RESOLUTION: u32 = 50;

/// Colour configuration of a planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSettings {
    /// Gradient sampled from lowest (0) to highest (1) elevation.
    pub gradient: Gradient,
    /// Number of samples in the generated ramp. At least 2.
    pub ramp_resolution: u32,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            gradient: Gradient::default(),
            ramp_resolution: DEFAULT_RAMP_RESOLUTION,
        }
    }
}

impl ColorSettings {
    /// Earth-like gradient at the default resolution.
    pub fn earth_like() -> Self {
        Self {
            gradient: Gradient::earth_like(),
            ..Default::default()
        }
    }

    /// Checks the gradient and that the ramp has at least two samples.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gradient.validate()?;
        if self.ramp_resolution < 2 {
            return Err(ConfigError::RampResolutionTooSmall(self.ramp_resolution));
        }
        Ok(())
    }
}

/// Fixed-resolution 1D colour lookup plus the elevation range it maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRamp {
    samples: Vec<Color>,
    elevation: ElevationRange,
    fallback: bool,
}

impl ColorRamp {
    /// Number of samples.
    pub fn resolution(&self) -> usize {
        self.samples.len()
    }

    /// The colour samples, lowest elevation first.
    pub fn samples(&self) -> &[Color] {
        &self.samples
    }

    /// Elevation range used by consumers to normalise heights.
    pub fn elevation_range(&self) -> ElevationRange {
        self.elevation
    }

    /// True if the ramp was built without any observed elevation and
    /// carries [`ElevationRange::FALLBACK`].
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Samples the ramp at `t` in [0, 1], interpolating between entries.
    pub fn sample(&self, t: f32) -> Color {
        let last = self.samples.len().saturating_sub(1);
        if last == 0 {
            return self.samples.first().copied().unwrap_or(Color::BLACK);
        }
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let x = t * last as f32;
        let i = (x.floor() as usize).min(last - 1);
        self.samples[i].lerp(self.samples[i + 1], x - i as f32)
    }

    /// Colour for a displaced radius, normalised against the stored range.
    pub fn sample_height(&self, height: f32) -> Color {
        self.sample(self.elevation.normalize(height))
    }

    /// Samples quantised to 8-bit RGBA.
    pub fn to_rgba8(&self) -> Vec<[u8; 4]> {
        self.samples.iter().map(|c| c.to_rgba8()).collect()
    }

}

fn resolve_range(elevation: ElevationRange) -> (ElevationRange, bool) {
    if elevation.is_empty() {
        log::warn!(
            "no elevation observed; colour ramp uses fallback range [{}, {}]",
            ElevationRange::FALLBACK.min,
            ElevationRange::FALLBACK.max
        );
        (ElevationRange::FALLBACK, true)
    } else {
        (elevation, false)
    }
}

/// Samples `gradient` at `resolution` evenly spaced points in [0, 1].
///
/// An empty `elevation` (nothing observed) is replaced by
/// [`ElevationRange::FALLBACK`] and flagged on the ramp.
pub fn build_ramp(gradient: &Gradient, resolution: u32, elevation: ElevationRange) -> ColorRamp {
    debug_assert!(resolution >= 2, "ramp resolution must be at least 2");
    let denom = resolution.max(2) - 1;
    let samples = (0..resolution)
        .map(|i| gradient.evaluate(i as f32 / denom as f32))
        .collect();
    let (elevation, fallback) = resolve_range(elevation);

    ColorRamp {
        samples,
        elevation,
        fallback,
    }
}

/// Holds colour settings and the latest elevation range, producing ramps on
/// demand.
#[derive(Debug, Clone)]
pub struct ColorMapper {
    settings: ColorSettings,
    elevation: ElevationRange,
}

impl ColorMapper {
    /// Creates a mapper with no elevation observed yet.
    pub fn new(settings: ColorSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            settings,
            elevation: ElevationRange::EMPTY,
        })
    }

    /// Replaces the colour settings.
    pub fn update_settings(&mut self, settings: ColorSettings) -> Result<(), ConfigError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// Records the finished elevation range of a pass.
    pub fn update_elevation(&mut self, elevation: ElevationRange) {
        self.elevation = elevation;
    }

    /// Current colour settings.
    pub fn settings(&self) -> &ColorSettings {
        &self.settings
    }

    /// Last recorded elevation range, empty until a pass reports one.
    pub fn elevation_range(&self) -> ElevationRange {
        self.elevation
    }

    /// Builds the ramp for the current settings and elevation.
    pub fn build_ramp(&self) -> ColorRamp {
        build_ramp(
            &self.settings.gradient,
            self.settings.ramp_resolution,
            self.elevation,
        )
    }
}
