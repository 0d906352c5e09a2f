//! Multi-octave fractal Brownian motion accumulation.
//!
//! Composites several octaves of simplex noise at doubling frequency and
//! halving amplitude to add fine detail on top of coarse shape.

use crate::NoiseField;

/// Parameters for a multi-octave fractal noise pass.
#[derive(Clone, Debug, PartialEq)]
pub struct FractalParams {
    /// Number of octaves to composite. More octaves add finer detail at the
    /// cost of additional computation.
    pub octaves: u32,
    /// Coordinate scale applied before the first octave. Controls the
    /// spatial size of the broadest features.
    pub base_scale: f64,
    /// Frequency multiplier between successive octaves. Default: 2.0.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves. Default: 0.5.
    pub persistence: f64,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            octaves: 4,
            base_scale: 1.0,
            lacunarity: 2.0,
            persistence: 0.5,
        }
    }
}

impl FractalParams {
    /// Theoretical maximum absolute amplitude of the sum (geometric series
    /// over the octave amplitudes), assuming unit noise range per octave.
    pub fn max_amplitude(&self) -> f64 {
        let mut sum = 0.0;
        let mut amp = 1.0;
        for _ in 0..self.octaves {
            sum += amp;
            amp *= self.persistence;
        }
        sum
    }
}

impl NoiseField {
    /// Fractal sum of `params.octaves` noise samples at `(x, y)`.
    ///
    /// Frequency starts at 1 and amplitude at 1; each octave accumulates
    /// `noise2d(x * base_scale * freq, y * base_scale * freq) * amp` before
    /// multiplying frequency by the lacunarity and amplitude by the
    /// persistence.
    pub fn fractal(&self, x: f64, y: f64, params: &FractalParams) -> f64 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;

        for _ in 0..params.octaves {
            total += self.noise2d(
                x * params.base_scale * frequency,
                y * params.base_scale * frequency,
            ) * amplitude;

            frequency *= params.lacunarity;
            amplitude *= params.persistence;
        }

        total
    }

    /// Fractal sum remapped from its natural ~[-1, 1] range to ~[0, 1]
    /// via `(value + 1) / 2`.
    pub fn fractal_normalized(&self, x: f64, y: f64, params: &FractalParams) -> f64 {
        (self.fractal(x, y, params) + 1.0) / 2.0
    }
}
