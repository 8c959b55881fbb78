//! Planet configuration, presets and validation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::ColorSettings;
use crate::geometry::{validate_resolution, FaceMask};
use crate::terrain::ShapeSettings;

/// Errors raised while loading or validating planet settings.
///
/// A generation pass checks every setting before building any mesh, so a
/// rejected configuration never produces partial output.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("shape settings are not assigned")]
    MissingShapeSettings,
    #[error("color settings are not assigned")]
    MissingColorSettings,
    #[error("planet radius must be finite and positive, got {0}")]
    InvalidRadius(f32),
    #[error("resolution {resolution} outside [{min}, {max}]")]
    ResolutionOutOfRange { resolution: u32, min: u32, max: u32 },
    #[error("noise layer {layer}: rigid filter needs a weight multiplier")]
    MissingWeightMultiplier { layer: usize },
    #[error("noise layer {layer}: octave count {num_layers} outside [1, 8]")]
    LayerCountOutOfRange { layer: usize, num_layers: u8 },
    #[error("noise layer {layer}: {name} is not finite")]
    NonFiniteParameter { layer: usize, name: &'static str },
    #[error("noise layer {layer}: strength must not be negative, got {strength}")]
    NegativeStrength { layer: usize, strength: f32 },
    #[error("gradient has no color stops")]
    EmptyGradient,
    #[error("gradient stop {index} at {position} is outside [0, 1] or out of order")]
    InvalidGradientStop { index: usize, position: f32 },
    #[error("ramp resolution must be at least 2, got {0}")]
    RampResolutionTooSmall(u32),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Default per-face vertex count along each edge.
pub const DEFAULT_RESOLUTION: u32 = 10;

/// Complete configuration of a generation pass.
///
/// `shape` and `color` are optional so that a configuration with either one
/// unassigned can be represented and rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetSettings {
    /// Vertices along each face edge.
    pub resolution: u32,
    /// Which faces to build.
    pub face_mask: FaceMask,
    pub shape: Option<ShapeSettings>,
    pub color: Option<ColorSettings>,
}

impl Default for PlanetSettings {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            face_mask: FaceMask::All,
            shape: Some(ShapeSettings::default()),
            color: Some(ColorSettings::default()),
        }
    }
}

impl PlanetSettings {
    /// Continents with masked ridged mountains and an earth-like palette.
    pub fn earth_like(seed: i32) -> Self {
        Self {
            resolution: 64,
            shape: Some(ShapeSettings::earth_like(seed)),
            color: Some(ColorSettings::earth_like()),
            ..Default::default()
        }
    }

    /// Checks every setting and returns the assigned shape and colour settings.
    pub fn validate(&self) -> Result<(&ShapeSettings, &ColorSettings), ConfigError> {
        let shape = self.shape.as_ref().ok_or(ConfigError::MissingShapeSettings)?;
        let color = self.color.as_ref().ok_or(ConfigError::MissingColorSettings)?;
        validate_resolution(self.resolution)?;
        shape.validate()?;
        color.validate()?;
        Ok((shape, color))
    }

    /// Parses settings from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads settings from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serializes the settings as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{FilterKind, NoiseSettings};
    use crate::terrain::NoiseLayer;

    #[test]
    fn test_defaults_are_valid() {
        let settings = PlanetSettings::default();
        assert_eq!(settings.resolution, DEFAULT_RESOLUTION);
        assert_eq!(settings.face_mask, FaceMask::All);
        assert!(settings.validate().is_ok());
        assert!(PlanetSettings::earth_like(7).validate().is_ok());
    }

    #[test]
    fn test_missing_sections() {
        let no_shape = PlanetSettings {
            shape: None,
            ..Default::default()
        };
        assert!(matches!(
            no_shape.validate(),
            Err(ConfigError::MissingShapeSettings)
        ));

        let no_color = PlanetSettings {
            color: None,
            ..Default::default()
        };
        assert!(matches!(
            no_color.validate(),
            Err(ConfigError::MissingColorSettings)
        ));
    }

    #[test]
    fn test_resolution_bounds() {
        for resolution in [0, 1, 257] {
            let settings = PlanetSettings {
                resolution,
                ..Default::default()
            };
            assert!(
                matches!(
                    settings.validate(),
                    Err(ConfigError::ResolutionOutOfRange { min: 2, max: 256, .. })
                ),
                "resolution {} should be rejected",
                resolution
            );
        }
    }

    #[test]
    fn test_nested_errors_surface() {
        let mut rigid = NoiseSettings::rigid();
        rigid.weight_multiplier = None;
        let settings = PlanetSettings {
            shape: Some(ShapeSettings {
                planet_radius: 2.0,
                noise_layers: vec![NoiseLayer::default(), NoiseLayer::new(rigid)],
            }),
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::MissingWeightMultiplier { layer: 1 })
        ));
    }

    #[test]
    fn test_json_partial_document() {
        let json = r#"{
            "resolution": 24,
            "face_mask": "front",
            "shape": {
                "planet_radius": 3.0,
                "noise_layers": [
                    { "noise_settings": { "filter_kind": "rigid", "num_layers": 4, "weight_multiplier": 0.5 } }
                ]
            }
        }"#;
        let settings = PlanetSettings::from_json_str(json).unwrap();
        assert_eq!(settings.resolution, 24);
        assert_eq!(settings.face_mask, FaceMask::Front);
        assert_eq!(settings.color, Some(ColorSettings::default()));

        let shape = settings.shape.as_ref().unwrap();
        assert_eq!(shape.planet_radius, 3.0);
        let layer = &shape.noise_layers[0];
        assert!(layer.enabled);
        assert_eq!(layer.noise_settings.filter_kind, FilterKind::Rigid);
        assert_eq!(layer.noise_settings.num_layers, 4);
        assert_eq!(layer.noise_settings.roughness, 2.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_json_null_section_is_missing() {
        let settings = PlanetSettings::from_json_str(r#"{ "color": null }"#).unwrap();
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::MissingColorSettings)
        ));
        assert!(matches!(
            PlanetSettings::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_json_round_trip_preset() {
        let settings = PlanetSettings::earth_like(3);
        let json = settings.to_json_pretty().unwrap();
        assert_eq!(PlanetSettings::from_json_str(&json).unwrap(), settings);
    }
}
