//! Colour gradients sampled along normalised elevation.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Linear RGBA colour with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates an opaque colour from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Component-wise interpolation; `t` is not clamped.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Quantises to 8-bit RGBA.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

/// A colour key at a position in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub position: f32,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(position: f32, color: Color) -> Self {
        Self { position, color }
    }
}

/// How a gradient fills the space between stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientMode {
    /// Linear interpolation between neighbouring stops.
    #[default]
    Blend,
    /// Each stop's colour holds up to and including its position.
    Fixed,
}

/// Ordered colour stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub stops: Vec<GradientStop>,
    #[serde(default)]
    pub mode: GradientMode,
}

impl Default for Gradient {
    fn default() -> Self {
        Self::new(vec![
            GradientStop::new(0.0, Color::BLACK),
            GradientStop::new(1.0, Color::WHITE),
        ])
    }
}

impl Gradient {
    /// Creates a blending gradient, sorting the stops by position.
    pub fn new(mut stops: Vec<GradientStop>) -> Self {
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        Self {
            stops,
            mode: GradientMode::Blend,
        }
    }

    /// Returns this gradient with `mode` set.
    pub fn with_mode(mut self, mode: GradientMode) -> Self {
        self.mode = mode;
        self
    }

    /// Ocean through beach, lowland, highland and rock to snow.
    pub fn earth_like() -> Self {
        Self::new(vec![
            GradientStop::new(0.0, Color::from_rgb8(10, 30, 90)),
            GradientStop::new(0.08, Color::from_rgb8(30, 90, 170)),
            GradientStop::new(0.12, Color::from_rgb8(220, 205, 150)),
            GradientStop::new(0.2, Color::from_rgb8(70, 140, 60)),
            GradientStop::new(0.45, Color::from_rgb8(35, 90, 40)),
            GradientStop::new(0.7, Color::from_rgb8(110, 95, 85)),
            GradientStop::new(0.9, Color::from_rgb8(240, 240, 245)),
        ])
    }

    /// Checks that the gradient has stops with finite, ordered positions in [0, 1].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stops.is_empty() {
            return Err(ConfigError::EmptyGradient);
        }
        let mut previous = f32::NEG_INFINITY;
        for (index, stop) in self.stops.iter().enumerate() {
            let p = stop.position;
            if !(0.0..=1.0).contains(&p) || p < previous || !stop.color.is_finite() {
                return Err(ConfigError::InvalidGradientStop { index, position: p });
            }
            previous = p;
        }
        Ok(())
    }

    /// Samples the gradient at `t`, clamped to [0, 1].
    ///
    /// Outside the stop range the nearest end colour is returned. An empty
    /// gradient evaluates to black.
    pub fn evaluate(&self, t: f32) -> Color {
        let Some(first) = self.stops.first() else {
            return Color::BLACK;
        };
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        // First stop at or after t.
        let next = self.stops.partition_point(|s| s.position < t);
        if next == self.stops.len() {
            return self.stops[next - 1].color;
        }
        if next == 0 {
            return first.color;
        }

        let hi = self.stops[next];
        match self.mode {
            GradientMode::Fixed => hi.color,
            GradientMode::Blend => {
                let lo = self.stops[next - 1];
                let span = hi.position - lo.position;
                if span <= 0.0 {
                    return hi.color;
                }
                lo.color.lerp(hi.color, (t - lo.position) / span)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-5
            && (a.g - b.g).abs() < 1e-5
            && (a.b - b.b).abs() < 1e-5
            && (a.a - b.a).abs() < 1e-5
    }

    #[test]
    fn test_blend_interpolates() {
        let gradient = Gradient::default();
        assert!(close(gradient.evaluate(0.0), Color::BLACK));
        assert!(close(gradient.evaluate(1.0), Color::WHITE));
        assert!(close(gradient.evaluate(0.25), Color::rgb(0.25, 0.25, 0.25)));
    }

    #[test]
    fn test_clamps_outside_stops() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let blue = Color::rgb(0.0, 0.0, 1.0);
        let gradient = Gradient::new(vec![
            GradientStop::new(0.3, red),
            GradientStop::new(0.6, blue),
        ]);
        assert!(close(gradient.evaluate(0.0), red));
        assert!(close(gradient.evaluate(-4.0), red));
        assert!(close(gradient.evaluate(0.9), blue));
        assert!(close(gradient.evaluate(f32::NAN), red));
        assert!(close(gradient.evaluate(0.45), Color::rgb(0.5, 0.0, 0.5)));
    }

    #[test]
    fn test_fixed_mode_steps() {
        let a = Color::rgb(1.0, 0.0, 0.0);
        let b = Color::rgb(0.0, 1.0, 0.0);
        let c = Color::rgb(0.0, 0.0, 1.0);
        let gradient = Gradient::new(vec![
            GradientStop::new(0.0, a),
            GradientStop::new(0.5, b),
            GradientStop::new(1.0, c),
        ])
        .with_mode(GradientMode::Fixed);

        assert!(close(gradient.evaluate(0.0), a));
        assert!(close(gradient.evaluate(0.2), b));
        assert!(close(gradient.evaluate(0.5), b));
        assert!(close(gradient.evaluate(0.51), c));
    }

    #[test]
    fn test_new_sorts_stops() {
        let gradient = Gradient::new(vec![
            GradientStop::new(1.0, Color::WHITE),
            GradientStop::new(0.0, Color::BLACK),
        ]);
        assert_eq!(gradient.stops[0].position, 0.0);
        assert!(gradient.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let empty = Gradient {
            stops: Vec::new(),
            mode: GradientMode::Blend,
        };
        assert!(matches!(empty.validate(), Err(ConfigError::EmptyGradient)));
        assert!(close(empty.evaluate(0.5), Color::BLACK));

        let unsorted = Gradient {
            stops: vec![
                GradientStop::new(0.8, Color::WHITE),
                GradientStop::new(0.2, Color::BLACK),
            ],
            mode: GradientMode::Blend,
        };
        assert!(matches!(
            unsorted.validate(),
            Err(ConfigError::InvalidGradientStop { index: 1, .. })
        ));

        let outside = Gradient::new(vec![GradientStop::new(1.5, Color::WHITE)]);
        assert!(outside.validate().is_err());
        assert!(Gradient::earth_like().validate().is_ok());
    }

    #[test]
    fn test_rgba8_quantisation() {
        assert_eq!(Color::rgba(1.0, 0.5, 0.0, 2.0).to_rgba8(), [255, 128, 0, 255]);
        assert_eq!(Color::from_rgb8(12, 34, 56).to_rgba8(), [12, 34, 56, 255]);
    }
}
