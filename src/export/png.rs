//! PNG export of the colour ramp.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};

use super::ExportError;
use crate::color::ColorRamp;

/// Encodes `ramp` as a `resolution x 1` RGBA8 PNG.
pub fn write_ramp_png<W: Write>(ramp: &ColorRamp, writer: W) -> Result<(), ExportError> {
    let pixels = ramp.to_rgba8();
    let bytes: &[u8] = bytemuck::cast_slice(&pixels);

    let encoder =
        PngEncoder::new_with_quality(writer, CompressionType::Default, FilterType::Adaptive);
    encoder.write_image(bytes, pixels.len() as u32, 1, ExtendedColorType::Rgba8)?;
    Ok(())
}

/// Writes the ramp PNG to `path`.
pub fn export_ramp_png(ramp: &ColorRamp, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_ramp_png(ramp, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{build_ramp, Gradient};
    use crate::terrain::ElevationRange;
    use tempfile::tempdir;

    #[test]
    fn test_ramp_png_pixels() {
        let ramp = build_ramp(&Gradient::default(), 3, ElevationRange::new(0.0, 1.0));
        let mut bytes = Vec::new();
        write_ramp_png(&ramp, &mut bytes).unwrap();

        let image = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(image.dimensions(), (3, 1));
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(1, 0).0, [128, 128, 128, 255]);
        assert_eq!(image.get_pixel(2, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_export_ramp_file() {
        let ramp = build_ramp(&Gradient::earth_like(), 50, ElevationRange::new(1.0, 1.2));
        let dir = tempdir().unwrap();
        let path = dir.path().join("ramp.png");

        export_ramp_png(&ramp, &path).unwrap();
        let image = image::open(&path).unwrap();
        assert_eq!(image.width(), 50);
        assert_eq!(image.height(), 1);
    }
}
