//! Height-based colouring: gradients and the colour ramp handed to shading.

mod gradient;
mod ramp;

pub use gradient::{Color, Gradient, GradientMode, GradientStop};
pub use ramp::{build_ramp, ColorMapper, ColorRamp, ColorSettings, DEFAULT_RAMP_RESOLUTION};
