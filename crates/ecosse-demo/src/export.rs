//! PNG export for synthesized rasters.

use std::path::Path;

use ecosse_surface::{PixelFormat, SurfaceRaster};

/// Errors from writing a raster to disk.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Failed to create the output directory.
    #[error("failed to create output directory: {0}")]
    CreateDir(#[source] std::io::Error),

    /// Failed to encode or write the PNG file.
    #[error("failed to write PNG: {0}")]
    Encode(#[source] image::ImageError),
}

/// Write a raster as a PNG file, creating parent directories as needed.
pub fn save_raster(raster: &SurfaceRaster, path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(ExportError::CreateDir)?;
    }

    let color = match raster.format() {
        PixelFormat::Rgb8 => image::ExtendedColorType::Rgb8,
        PixelFormat::Grey8 => image::ExtendedColorType::L8,
    };
    image::save_buffer(path, raster.pixels(), raster.width(), raster.height(), color)
        .map_err(ExportError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecosse_surface::{SurfaceSynthesizer, TerrainClass};

    #[test]
    fn test_exports_color_and_bump_png() {
        let dir = tempfile::tempdir().unwrap();
        let synth = SurfaceSynthesizer::new(0.42).unwrap();

        let color = synth
            .synthesize_color(TerrainClass::Terrestrial, 16, 8)
            .unwrap();
        let color_path = dir.path().join("terrestrial_color.png");
        save_raster(&color, &color_path).unwrap();
        assert!(color_path.exists());

        let bump = synth
            .synthesize_bump(TerrainClass::Terrestrial, 16, 8)
            .unwrap();
        let bump_path = dir.path().join("terrestrial_bump.png");
        save_raster(&bump, &bump_path).unwrap();
        assert!(bump_path.exists());
    }

    #[test]
    fn test_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let synth = SurfaceSynthesizer::new(0.42).unwrap();
        let raster = synth.synthesize_color(TerrainClass::Gas, 8, 8).unwrap();

        let nested = dir.path().join("a").join("b").join("gas_color.png");
        save_raster(&raster, &nested).unwrap();
        assert!(nested.exists());
    }
}
