//! Wavefront OBJ export of face meshes.
//!
//! Vertices carry the ramp colour of their radius as the widely supported
//! `v x y z r g b` extension. Indices in OBJ are 1-based.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::ExportError;
use crate::color::ColorRamp;
use crate::geometry::FaceMesh;
use crate::terrain::PlanetOutput;

/// Writes one face mesh as an OBJ object named after the face.
pub fn write_face_obj<W: Write>(
    mesh: &FaceMesh,
    ramp: &ColorRamp,
    writer: &mut W,
) -> Result<(), ExportError> {
    writeln!(
        writer,
        "# planetgen {} face, resolution {}, {} vertices, {} triangles",
        mesh.face.short_name(),
        mesh.resolution,
        mesh.vertex_count(),
        mesh.triangle_count()
    )?;
    writeln!(writer, "o {}", mesh.face.short_name())?;

    for v in &mesh.vertices {
        let c = ramp.sample_height(v.length());
        writeln!(
            writer,
            "v {} {} {} {:.4} {:.4} {:.4}",
            v.x, v.y, v.z, c.r, c.g, c.b
        )?;
    }
    for n in mesh.compute_normals() {
        writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for [a, b, c] in mesh.triangles() {
        let (a, b, c) = (a + 1, b + 1, c + 1);
        writeln!(writer, "f {a}//{a} {b}//{b} {c}//{c}")?;
    }

    Ok(())
}

/// Exports a single face mesh to `path`.
pub fn export_face_obj(mesh: &FaceMesh, ramp: &ColorRamp, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_face_obj(mesh, ramp, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Exports every generated face as its own OBJ file.
///
/// Files are named `{base_name}_{face_name}.obj`, e.g. `planet_top.obj`.
/// Returns the written paths in face order.
pub fn export_planet_obj(
    output: &PlanetOutput,
    output_dir: &Path,
    base_name: &str,
) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(output_dir)?;

    let mut paths = Vec::with_capacity(output.faces.len());
    for mesh in &output.faces {
        let path = output_dir.join(format!("{}_{}.obj", base_name, mesh.face.short_name()));
        export_face_obj(mesh, &output.ramp, &path)?;
        paths.push(path);
    }

    Ok(paths)
}
