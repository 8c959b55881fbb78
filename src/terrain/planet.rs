//! Generation passes: shape, mesh and colour ramp for a whole planet.

use std::time::Instant;

use rayon::prelude::*;

use super::elevation::ElevationRange;
use super::shape::{ShapeGenerator, ShapeSettings};
use crate::color::{ColorMapper, ColorRamp, ColorSettings};
use crate::config::{ConfigError, PlanetSettings};
use crate::geometry::{CubeFaceId, CubeSphereFace, FaceMask, FaceMesh};

/// Result of a full generation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetOutput {
    /// One mesh per face selected by the mask, in face order.
    pub faces: Vec<FaceMesh>,
    /// Colour ramp normalised against the elevation range of the pass.
    pub ramp: ColorRamp,
}

impl PlanetOutput {
    /// Elevation range shading should use for this output.
    pub fn elevation_range(&self) -> ElevationRange {
        self.ramp.elevation_range()
    }

    /// Returns the mesh of `face` if it was generated.
    pub fn face(&self, face: CubeFaceId) -> Option<&FaceMesh> {
        self.faces.iter().find(|mesh| mesh.face == face)
    }

    /// Total vertices across all generated faces.
    pub fn vertex_count(&self) -> usize {
        self.faces.iter().map(FaceMesh::vertex_count).sum()
    }

    /// Total triangles across all generated faces.
    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(FaceMesh::triangle_count).sum()
    }
}

/// A planet and the products of its last generation passes.
///
/// Every update validates first and only replaces state when the whole pass
/// succeeds, so a rejected configuration leaves the previous output intact.
#[derive(Debug, Clone)]
pub struct Planet {
    settings: PlanetSettings,
    faces: Vec<FaceMesh>,
    colors: Option<ColorMapper>,
    ramp: Option<ColorRamp>,
}

impl Planet {
    /// Creates a planet with `settings`. Nothing is generated until
    /// [`Planet::rebuild`] or one of the update methods runs.
    pub fn new(settings: PlanetSettings) -> Self {
        Self {
            settings,
            faces: Vec::new(),
            colors: None,
            ramp: None,
        }
    }

    /// Runs a complete generation pass without keeping any state.
    ///
    /// Validates `settings`, builds every face selected by the face mask in
    /// parallel, then builds the colour ramp from the finished elevation
    /// range.
    ///
    /// ```
    /// use planetgen::{FaceMask, Planet, PlanetSettings};
    ///
    /// let settings = PlanetSettings {
    ///     resolution: 4,
    ///     face_mask: FaceMask::Top,
    ///     ..PlanetSettings::earth_like(1)
    /// };
    /// let output = Planet::generate(&settings).unwrap();
    /// assert_eq!(output.faces.len(), 1);
    /// assert_eq!(output.faces[0].vertex_count(), 16);
    /// assert_eq!(output.faces[0].triangle_count(), 18);
    /// ```
    pub fn generate(settings: &PlanetSettings) -> Result<PlanetOutput, ConfigError> {
        let (faces, colors) = full_pass(settings)?;
        Ok(PlanetOutput {
            faces,
            ramp: colors.build_ramp(),
        })
    }

    /// Full pass with the current settings.
    pub fn rebuild(&mut self) -> Result<(), ConfigError> {
        let (faces, colors) = full_pass(&self.settings)?;
        self.ramp = Some(colors.build_ramp());
        self.faces = faces;
        self.colors = Some(colors);
        Ok(())
    }

    /// Replaces all settings and runs a full pass.
    pub fn update_settings(&mut self, settings: PlanetSettings) -> Result<(), ConfigError> {
        let previous = std::mem::replace(&mut self.settings, settings);
        if let Err(err) = self.rebuild() {
            self.settings = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Regenerates the meshes with new shape settings and re-targets the
    /// colour ramp at the new elevation range.
    pub fn update_shape(&mut self, shape: ShapeSettings) -> Result<(), ConfigError> {
        let candidate = PlanetSettings {
            shape: Some(shape),
            ..self.settings.clone()
        };
        let (shape, color) = candidate.validate()?;
        let mut colors = match &self.colors {
            Some(colors) => colors.clone(),
            None => ColorMapper::new(color.clone())?,
        };

        let (faces, elevation) = build_faces(candidate.resolution, candidate.face_mask, shape)?;
        colors.update_elevation(elevation);
        log::info!(
            "shape update: {} face(s), radius range [{}, {}]",
            faces.len(),
            elevation.min,
            elevation.max
        );

        self.ramp = Some(colors.build_ramp());
        self.settings = candidate;
        self.faces = faces;
        self.colors = Some(colors);
        Ok(())
    }

    /// Rebuilds the colour ramp against the last known elevation range.
    ///
    /// Meshes are untouched. Before any shape pass the range is unknown and
    /// the ramp falls back to [`ElevationRange::FALLBACK`].
    pub fn update_colors(&mut self, color: ColorSettings) -> Result<(), ConfigError> {
        let mut colors = ColorMapper::new(color.clone())?;
        colors.update_elevation(self.elevation_range());
        let ramp = colors.build_ramp();
        log::info!("color update: {} ramp samples", ramp.resolution());

        self.settings.color = Some(color);
        self.colors = Some(colors);
        self.ramp = Some(ramp);
        Ok(())
    }

    /// Settings of the last successful pass, or the initial ones.
    pub fn settings(&self) -> &PlanetSettings {
        &self.settings
    }

    /// Meshes of the last shape pass.
    pub fn faces(&self) -> &[FaceMesh] {
        &self.faces
    }

    /// Elevation range of the last shape pass, empty if none ran.
    pub fn elevation_range(&self) -> ElevationRange {
        self.colors
            .as_ref()
            .map_or(ElevationRange::EMPTY, ColorMapper::elevation_range)
    }

    /// Colour ramp of the last colour or full pass.
    pub fn ramp(&self) -> Option<&ColorRamp> {
        self.ramp.as_ref()
    }

    /// Snapshot of the current faces and ramp, if a ramp exists.
    pub fn output(&self) -> Option<PlanetOutput> {
        self.ramp.as_ref().map(|ramp| PlanetOutput {
            faces: self.faces.clone(),
            ramp: ramp.clone(),
        })
    }
}

/// Validates `settings`, builds the masked faces and hands the finished
/// elevation range to a colour mapper.
fn full_pass(settings: &PlanetSettings) -> Result<(Vec<FaceMesh>, ColorMapper), ConfigError> {
    let (shape, color) = settings.validate()?;
    let mut colors = ColorMapper::new(color.clone())?;
    let start = Instant::now();

    let (faces, elevation) = build_faces(settings.resolution, settings.face_mask, shape)?;
    colors.update_elevation(elevation);

    log::info!(
        "generated {} face(s) at resolution {} in {:.2?}, radius range [{}, {}]",
        faces.len(),
        settings.resolution,
        start.elapsed(),
        elevation.min,
        elevation.max
    );

    Ok((faces, colors))
}

/// Builds the masked faces with one shared generator and returns them with
/// the elevation range observed across all of them.
fn build_faces(
    resolution: u32,
    mask: FaceMask,
    shape: &ShapeSettings,
) -> Result<(Vec<FaceMesh>, ElevationRange), ConfigError> {
    let generator = ShapeGenerator::new(shape)?;
    let faces = mask
        .faces()
        .into_iter()
        .map(|face| CubeSphereFace::new(&generator, resolution, face))
        .collect::<Result<Vec<_>, ConfigError>>()?;

    let meshes: Vec<FaceMesh> = faces.par_iter().map(|face| face.construct_mesh()).collect();

    // All face jobs have joined; the range is final.
    Ok((meshes, generator.elevation_range()))
}
