//! Color and bump texture synthesis over fractal noise.

use ecosse_noise::{FractalParams, NoiseField};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::classification::TerrainClass;
use crate::error::SurfaceError;
use crate::palette::{self, ColorRule, Rgb};
use crate::raster::{PixelFormat, SurfaceRaster};

/// Tunable parameters for the two synthesis passes.
///
/// The defaults reproduce the shipped visual behavior; callers that change
/// them forfeit compatibility with previously rendered planets.
#[derive(Clone, Debug)]
pub struct SynthesisParams {
    /// Fractal parameters for the color pass.
    pub color: FractalParams,
    /// Base cutoff for the threshold color rules.
    pub threshold: f64,
    /// Fractal parameters for the bump pass. Higher frequency and more
    /// octaves than the color pass; the bump map carries the fine detail.
    pub bump: FractalParams,
    /// Vertical frequency of the gas-giant band noise.
    pub band_scale: f64,
}

impl Default for SynthesisParams {
    fn default() -> Self {
        Self {
            color: FractalParams {
                octaves: 4,
                base_scale: 0.02,
                ..FractalParams::default()
            },
            threshold: 0.1,
            bump: FractalParams {
                octaves: 6,
                base_scale: 0.05,
                ..FractalParams::default()
            },
            band_scale: 0.05,
        }
    }
}

/// Synthesizes color and bump rasters for a terrain classification from one
/// seeded noise field.
///
/// Both operations are pure transformations over their inputs; the field's
/// tables are read-only after construction, so one synthesizer can serve
/// concurrent calls. Each call allocates exactly one output buffer and
/// returns it by value.
pub struct SurfaceSynthesizer {
    field: NoiseField,
    params: SynthesisParams,
}

impl SurfaceSynthesizer {
    /// Create a synthesizer with the default pass parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::InvalidSeed`] if `seed` is not finite.
    pub fn new(seed: f64) -> Result<Self, SurfaceError> {
        Self::with_params(seed, SynthesisParams::default())
    }

    /// Create a synthesizer with explicit pass parameters.
    pub fn with_params(seed: f64, params: SynthesisParams) -> Result<Self, SurfaceError> {
        let field = NoiseField::new(seed)?;
        Ok(Self { field, params })
    }

    /// Borrow the pass parameters.
    pub fn params(&self) -> &SynthesisParams {
        &self.params
    }

    /// Synthesize the packed RGB color texture for a classification.
    ///
    /// Every texel receives a 4-octave (by default) fractal sum normalized
    /// to ~[0, 1] and mapped through the classification's color rule.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::InvalidDimension`] if either dimension is
    /// zero; nothing is allocated in that case.
    pub fn synthesize_color(
        &self,
        classification: TerrainClass,
        width: u32,
        height: u32,
    ) -> Result<SurfaceRaster, SurfaceError> {
        validate_dimensions(width, height)?;
        debug!(
            class = classification.name(),
            width, height, "synthesizing color texture"
        );
        Ok(self.fill_color(classification.color_rule(), width, height))
    }

    /// Synthesize the color texture for a classification given by name.
    ///
    /// Unrecognized names paint the uniform fallback land color and emit a
    /// warning: the mismatch signals caller/config drift and must stay
    /// observable.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::InvalidDimension`] if either dimension is zero.
    pub fn synthesize_color_named(
        &self,
        name: &str,
        width: u32,
        height: u32,
    ) -> Result<SurfaceRaster, SurfaceError> {
        validate_dimensions(width, height)?;
        let rule = match TerrainClass::from_name(name) {
            Ok(class) => class.color_rule(),
            Err(err) => {
                warn!(%err, "falling back to uniform land color");
                ColorRule::Uniform(palette::LAND)
            }
        };
        Ok(self.fill_color(rule, width, height))
    }

    /// Synthesize the greyscale bump (height) texture.
    ///
    /// The classification is accepted so color and bump requests look alike,
    /// but the output depends only on the seed and bump parameters: surface
    /// roughness is the same for every classification.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::InvalidDimension`] if either dimension is
    /// zero; nothing is allocated in that case.
    pub fn synthesize_bump(
        &self,
        classification: TerrainClass,
        width: u32,
        height: u32,
    ) -> Result<SurfaceRaster, SurfaceError> {
        validate_dimensions(width, height)?;
        debug!(
            class = classification.name(),
            width, height, "synthesizing bump texture"
        );

        let mut raster = SurfaceRaster::new(width, height, PixelFormat::Grey8);
        let stride = width as usize;
        raster
            .pixels_mut()
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, texel) in row.iter_mut().enumerate() {
                    let value =
                        self.field
                            .fractal_normalized(x as f64, y as f64, &self.params.bump);
                    // Float-to-int casts saturate, clamping the overshoot
                    // outside [0, 1] to the byte range.
                    *texel = (value * 255.0).floor() as u8;
                }
            });
        Ok(raster)
    }

    fn fill_color(&self, rule: ColorRule, width: u32, height: u32) -> SurfaceRaster {
        match rule {
            ColorRule::Threshold {
                offset,
                below,
                above,
            } => {
                let cutoff = self.params.threshold + offset;
                self.fill_fractal(width, height, |value| {
                    if value < cutoff { below } else { above }
                })
            }
            // The noise value is still computed per texel and ignored, so
            // every rule runs the identical loop.
            ColorRule::Uniform(color) => self.fill_fractal(width, height, |_| color),
            ColorRule::Bands { positive, negative } => {
                self.fill_bands(positive, negative, width, height)
            }
        }
    }

    /// Row-parallel fill mapping the normalized fractal value at each texel
    /// through `pick`. Rows are disjoint slices, so no synchronization is
    /// needed and the output matches the serial order.
    fn fill_fractal(
        &self,
        width: u32,
        height: u32,
        pick: impl Fn(f64) -> Rgb + Sync,
    ) -> SurfaceRaster {
        let mut raster = SurfaceRaster::new(width, height, PixelFormat::Rgb8);
        let stride = width as usize * 3;
        raster
            .pixels_mut()
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, texel) in row.chunks_exact_mut(3).enumerate() {
                    let value =
                        self.field
                            .fractal_normalized(x as f64, y as f64, &self.params.color);
                    texel.copy_from_slice(&pick(value));
                }
            });
        raster
    }

    /// Horizontal gas-giant bands. The band sample is independent of x, so
    /// one noise query colors the whole row.
    fn fill_bands(&self, positive: Rgb, negative: Rgb, width: u32, height: u32) -> SurfaceRaster {
        let mut raster = SurfaceRaster::new(width, height, PixelFormat::Rgb8);
        let stride = width as usize * 3;
        let band_scale = self.params.band_scale;
        raster
            .pixels_mut()
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| {
                let band = self.field.noise2d(0.0, y as f64 * band_scale);
                let color = if band > 0.0 { positive } else { negative };
                for texel in row.chunks_exact_mut(3) {
                    texel.copy_from_slice(&color);
                }
            });
        raster
    }
}

/// Reject empty rasters before any allocation happens.
fn validate_dimensions(width: u32, height: u32) -> Result<(), SurfaceError> {
    if width == 0 || height == 0 {
        return Err(SurfaceError::InvalidDimension { width, height });
    }
    Ok(())
}
