//! Mesh construction for one face of the cube-sphere.

use glam::{Vec2, Vec3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::face::CubeFaceId;
use crate::config::ConfigError;
use crate::terrain::ShapeGenerator;

/// Smallest supported grid resolution per face.
pub const MIN_RESOLUTION: u32 = 2;
/// Largest supported grid resolution per face (256² vertices).
pub const MAX_RESOLUTION: u32 = 256;

/// Checks that `resolution` lies in [`MIN_RESOLUTION`, `MAX_RESOLUTION`].
pub fn validate_resolution(resolution: u32) -> Result<(), ConfigError> {
    if (MIN_RESOLUTION..=MAX_RESOLUTION).contains(&resolution) {
        Ok(())
    } else {
        Err(ConfigError::ResolutionOutOfRange {
            resolution,
            min: MIN_RESOLUTION,
            max: MAX_RESOLUTION,
        })
    }
}

/// Vertex and triangle buffers for one cube face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceMesh {
    /// Face this mesh was built for.
    pub face: CubeFaceId,
    /// Grid resolution (vertices per side).
    pub resolution: u32,
    /// Displaced vertex positions, row-major (`x + y * resolution`).
    pub vertices: Vec<Vec3>,
    /// Triangle list, three indices per triangle.
    pub indices: Vec<u32>,
}

impl FaceMesh {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Returns the vertex at grid coordinate `(x, y)`.
    pub fn vertex(&self, x: u32, y: u32) -> Vec3 {
        debug_assert!(x < self.resolution && y < self.resolution);
        self.vertices[(x + y * self.resolution) as usize]
    }

    /// Area-weighted vertex normals recomputed from the triangles.
    pub fn compute_normals(&self) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];

        for [a, b, c] in self.triangles() {
            let (a, b, c) = (a as usize, b as usize, c as usize);
            let pa = self.vertices[a];
            // Unnormalised: length is twice the triangle area.
            let n = (self.vertices[b] - pa).cross(self.vertices[c] - pa);
            normals[a] += n;
            normals[b] += n;
            normals[c] += n;
        }

        normals.iter_mut().for_each(|n| *n = n.normalize_or_zero());
        normals
    }
}

/// Triangle indices for a `resolution × resolution` vertex grid.
///
/// Each cell `(x, y)` with flat index `i = x + y * resolution` becomes
/// `(i, i + r + 1, i + r)` and `(i, i + 1, i + r + 1)`. Both share the
/// winding whose geometric normal points along the face normal.
pub fn triangulate(resolution: u32) -> Vec<u32> {
    let r = resolution;
    let cells = r.saturating_sub(1) as usize;
    let mut indices = Vec::with_capacity(cells * cells * 6);

    for y in 0..r.saturating_sub(1) {
        for x in 0..r - 1 {
            let i = x + y * r;
            indices.extend_from_slice(&[i, i + r + 1, i + r, i, i + 1, i + r + 1]);
        }
    }

    indices
}

/// One face of the cube-sphere, bound to the shape generator of a pass.
#[derive(Debug, Clone, Copy)]
pub struct CubeSphereFace<'a> {
    face: CubeFaceId,
    resolution: u32,
    local_up: Vec3,
    axis_a: Vec3,
    axis_b: Vec3,
    shape: &'a ShapeGenerator,
}

impl<'a> CubeSphereFace<'a> {
    /// Prepares a face for construction.
    pub fn new(
        shape: &'a ShapeGenerator,
        resolution: u32,
        face: CubeFaceId,
    ) -> Result<Self, ConfigError> {
        validate_resolution(resolution)?;
        let (axis_a, axis_b) = face.axes();
        Ok(Self {
            face,
            resolution,
            local_up: face.normal(),
            axis_a,
            axis_b,
            shape,
        })
    }

    /// Face identifier.
    pub fn face(&self) -> CubeFaceId {
        self.face
    }

    /// Projects grid coordinate `(x, y)` from the cube face onto the unit sphere.
    pub fn point_on_unit_sphere(&self, x: u32, y: u32) -> Vec3 {
        let percent = Vec2::new(x as f32, y as f32) / (self.resolution - 1) as f32;
        let point_on_unit_cube = self.local_up
            + (percent.x - 0.5) * 2.0 * self.axis_a
            + (percent.y - 0.5) * 2.0 * self.axis_b;
        point_on_unit_cube.normalize()
    }

    /// Builds the displaced vertex grid and its triangles.
    ///
    /// Vertices are elevated in parallel; the buffer is collected in grid
    /// order, so the result does not depend on scheduling.
    pub fn construct_mesh(&self) -> FaceMesh {
        let r = self.resolution;
        let vertices: Vec<Vec3> = (0..r * r)
            .into_par_iter()
            .map(|i| self.shape.elevate(self.point_on_unit_sphere(i % r, i / r)))
            .collect();
        let indices = triangulate(r);

        log::debug!(
            "face {}: {} vertices, {} triangles",
            self.face.short_name(),
            vertices.len(),
            indices.len() / 3
        );

        FaceMesh {
            face: self.face,
            resolution: r,
            vertices,
            indices,
        }
    }
}

/// Builds the mesh of `face` at `resolution` using `shape`.
pub fn build_face_mesh(
    face: CubeFaceId,
    resolution: u32,
    shape: &ShapeGenerator,
) -> Result<FaceMesh, ConfigError> {
    Ok(CubeSphereFace::new(shape, resolution, face)?.construct_mesh())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::noise::NoiseSettings;
    use crate::terrain::{NoiseLayer, ShapeSettings};

    fn sphere(radius: f32) -> ShapeGenerator {
        ShapeGenerator::new(&ShapeSettings::sphere(radius)).unwrap()
    }

    fn gentle_hills() -> ShapeGenerator {
        let settings = ShapeSettings {
            planet_radius: 1.0,
            noise_layers: vec![NoiseLayer::new(NoiseSettings {
                num_layers: 3,
                strength: 0.1,
                seed: 9,
                ..NoiseSettings::simple()
            })],
        };
        ShapeGenerator::new(&settings).unwrap()
    }

    #[test]
    fn test_vertex_and_index_counts() {
        let shape = sphere(1.0);
        for r in [2u32, 3, 7, 32, 255, 256] {
            let mesh = build_face_mesh(CubeFaceId::Front, r, &shape).unwrap();
            let n = r as usize;
            assert_eq!(mesh.vertex_count(), n * n, "resolution {r}");
            assert_eq!(mesh.indices.len(), (n - 1) * (n - 1) * 6, "resolution {r}");
            assert!(mesh.indices.iter().all(|&i| (i as usize) < n * n));
        }
    }

    #[test]
    fn test_resolution_out_of_range() {
        let shape = sphere(1.0);
        for r in [0u32, 1, 257, 1024] {
            let err = build_face_mesh(CubeFaceId::Top, r, &shape).unwrap_err();
            assert!(matches!(err, ConfigError::ResolutionOutOfRange { resolution, .. } if resolution == r));
        }
        assert_eq!(
            shape.elevation_range(),
            crate::terrain::ElevationRange::EMPTY,
            "rejected faces must not touch the tracker"
        );
    }

    #[test]
    fn test_triangulate_small_grid() {
        // 0 1 2
        // 3 4 5
        // 6 7 8
        let indices = triangulate(3);
        assert_eq!(&indices[..6], &[0, 4, 3, 0, 1, 4]);
        assert_eq!(&indices[18..], &[4, 8, 7, 4, 5, 8]);
    }

    #[test]
    fn test_corner_vertex_projection() {
        let shape = sphere(1.0);
        let face = CubeSphereFace::new(&shape, 2, CubeFaceId::Top).unwrap();
        // up - axis_a - axis_b = (0,1,0) - (1,0,0) - (0,0,-1)
        let expected = Vec3::new(-1.0, 1.0, 1.0).normalize();
        assert!((face.point_on_unit_sphere(0, 0) - expected).length() < 1e-6);
    }

    #[test]
    fn test_plain_sphere_vertices_lie_on_radius() {
        let shape = sphere(3.0);
        for face in CubeFaceId::all() {
            let mesh = build_face_mesh(face, 9, &shape).unwrap();
            for v in &mesh.vertices {
                assert!((v.length() - 3.0).abs() < 1e-5, "{:?} vertex {:?}", face, v);
            }
            let center = mesh.vertex(4, 4);
            assert!((center.normalize() - face.normal()).length() < 1e-6);
        }
    }

    #[test]
    fn test_triangles_face_outward() {
        for shape in [sphere(1.0), gentle_hills()] {
            for face in CubeFaceId::all() {
                let mesh = build_face_mesh(face, 16, &shape).unwrap();
                for [a, b, c] in mesh.triangles() {
                    let (pa, pb, pc) = (
                        mesh.vertices[a as usize],
                        mesh.vertices[b as usize],
                        mesh.vertices[c as usize],
                    );
                    let normal = (pb - pa).cross(pc - pa);
                    let centroid = (pa + pb + pc) / 3.0;
                    assert!(
                        normal.dot(centroid) > 0.0,
                        "{:?}: triangle ({a},{b},{c}) faces inward",
                        face
                    );
                }
            }
        }
    }

    #[test]
    fn test_face_is_watertight_with_consistent_winding() {
        let r = 6u32;
        let indices = triangulate(r);
        let mut directed: HashMap<(u32, u32), usize> = HashMap::new();
        for t in indices.chunks_exact(3) {
            for (a, b) in [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])] {
                *directed.entry((a, b)).or_default() += 1;
            }
        }

        assert!(
            directed.values().all(|&count| count == 1),
            "a directed edge used twice means flipped winding"
        );
        let boundary = directed
            .keys()
            .filter(|(a, b)| !directed.contains_key(&(*b, *a)))
            .count();
        assert_eq!(boundary, 4 * (r as usize - 1), "only the grid border is open");
    }

    #[test]
    fn test_vertex_normals_point_outward() {
        let mesh = build_face_mesh(CubeFaceId::Back, 12, &sphere(1.0)).unwrap();
        let normals = mesh.compute_normals();
        assert_eq!(normals.len(), mesh.vertex_count());
        for (n, v) in normals.iter().zip(&mesh.vertices) {
            assert!((n.length() - 1.0).abs() < 1e-4);
            assert!(n.dot(v.normalize()) > 0.9, "normal {:?} at {:?}", n, v);
        }
    }

    #[test]
    fn test_construction_is_deterministic() {
        let a = build_face_mesh(CubeFaceId::Right, 40, &gentle_hills()).unwrap();
        let b = build_face_mesh(CubeFaceId::Right, 40, &gentle_hills()).unwrap();
        assert_eq!(a.indices, b.indices);
        for (va, vb) in a.vertices.iter().zip(&b.vertices) {
            assert_eq!(va.to_array().map(f32::to_bits), vb.to_array().map(f32::to_bits));
        }
    }

    #[test]
    fn test_single_simple_layer_at_minimum_resolution() {
        let settings = ShapeSettings {
            planet_radius: 1.0,
            noise_layers: vec![NoiseLayer::new(NoiseSettings {
                num_layers: 1,
                strength: 1.0,
                base_roughness: 1.0,
                roughness: 2.0,
                persistence: 0.5,
                min_value: 0.0,
                center: Vec3::ZERO,
                ..NoiseSettings::simple()
            })],
        };
        let shape = ShapeGenerator::new(&settings).unwrap();
        let mesh = build_face_mesh(CubeFaceId::Top, 2, &shape).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices.len(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        for v in &mesh.vertices {
            assert!(v.length() >= 1.0 - 1e-6, "vertex {:?} below the radius", v);
        }
    }
}
