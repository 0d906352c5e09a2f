//! Planet surface texture synthesis.
//!
//! Maps fractal sums of seeded simplex noise through per-classification
//! color policies to produce packed RGB color textures and single-channel
//! bump (height) textures, either synchronously or through a background
//! worker pool.

mod async_synthesis;
mod classification;
mod error;
mod palette;
mod raster;
mod synthesizer;

pub use async_synthesis::{
    AsyncSurfaceGenerator, CompletedTexture, SubmitError, SynthesisTask, TextureKey, TextureKind,
};
pub use classification::{ClassificationError, TerrainClass};
pub use error::SurfaceError;
pub use palette::{
    BASALT, ColorRule, DESERT_SAND, GAS_BAND_DARK, GAS_BAND_LIGHT, LAND, Rgb, WATER,
};
pub use raster::{PixelFormat, SurfaceRaster};
pub use synthesizer::{SurfaceSynthesizer, SynthesisParams};
