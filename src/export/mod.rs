//! Export helpers for saving generated planets to disk.
//!
//! Wavefront OBJ for meshes with per-vertex ramp colours, and PNG for the
//! colour ramp itself.

mod obj;
mod png;

use thiserror::Error;

pub use obj::{export_face_obj, export_planet_obj, write_face_obj};
pub use png::{export_ramp_png, write_ramp_png};

/// Errors that can occur while exporting.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}
