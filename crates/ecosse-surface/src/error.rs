//! Surface synthesis error types.

use ecosse_noise::NoiseError;

/// Errors produced by the synthesis operations.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// Raster dimensions must be at least one texel on each axis.
    #[error("invalid raster dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// The noise seed was rejected at field construction.
    #[error(transparent)]
    InvalidSeed(#[from] NoiseError),
}
