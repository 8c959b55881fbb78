//! Cube-sphere geometry module.
//!
//! Each of the six cube faces is a regular vertex grid projected onto the
//! unit sphere and displaced by a [`crate::terrain::ShapeGenerator`].

mod face;
mod mesh;

pub use face::{face_axes, CubeFaceId, FaceMask};
pub use mesh::{
    build_face_mesh, triangulate, validate_resolution, CubeSphereFace, FaceMesh,
    MAX_RESOLUTION, MIN_RESOLUTION,
};
