//! Seeded 2D simplex noise kernel over a shuffled permutation table.

use crate::NoiseError;

/// Skew factor mapping input coordinates onto the simplex grid, (√3 − 1) / 2.
const F2: f64 = 0.3660254037844386;
/// Unskew factor mapping simplex cells back to input space, (3 − √3) / 6.
const G2: f64 = 0.21132486540518713;

/// Deterministic, seeded 2D simplex-style noise field.
///
/// The permutation table is a bijection on `[0, 256)` fixed at construction
/// from a single seed and never mutated afterward. Two fields built from the
/// same seed produce identical output for identical queries, and a field can
/// be queried concurrently from any number of threads.
pub struct NoiseField {
    /// 256-entry permutation doubled to 512 entries so corner lookups never
    /// wrap an index.
    perm: [u8; 512],
}

impl NoiseField {
    /// Build a noise field from a seed.
    ///
    /// Seeds are folded into `[0, 1)` via `seed - floor(seed)`, which leaves
    /// values already in that range untouched.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseError::InvalidSeed`] if `seed` is NaN or infinite.
    pub fn new(seed: f64) -> Result<Self, NoiseError> {
        if !seed.is_finite() {
            return Err(NoiseError::InvalidSeed(seed));
        }
        let seed = seed - libm::floor(seed);

        let mut table = [0u8; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = i as u8;
        }
        // The swap index is a fixed function of the seed rather than of
        // per-step randomness, so distinct seeds can yield correlated
        // tables. Kept as-is for output compatibility with existing worlds.
        for i in (1..256usize).rev() {
            let r = libm::floor(seed * (i + 1) as f64) as usize;
            table.swap(i, r);
        }

        let mut perm = [0u8; 512];
        for (i, entry) in perm.iter_mut().enumerate() {
            *entry = table[i & 255];
        }
        Ok(Self { perm })
    }

    /// Sample the field at `(x, y)`.
    ///
    /// Pure function of the permutation state and the coordinates; the
    /// nominal output range is roughly `[-1, 1]` with overshoot from the
    /// doubled-component gradient set (observed maximum ≈ 1.55).
    pub fn noise2d(&self, x: f64, y: f64) -> f64 {
        let s = (x + y) * F2;
        let i = libm::floor(x + s);
        let j = libm::floor(y + s);
        let t = (i + j) * G2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        // Lower-right triangle of the cell when x0 > y0, upper-left otherwise.
        let (i1, j1) = if x0 > y0 { (1usize, 0usize) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = (i as i64 & 255) as usize;
        let jj = (j as i64 & 255) as usize;

        let g0 = self.perm[ii + self.perm[jj] as usize];
        let g1 = self.perm[ii + i1 + self.perm[jj + j1] as usize];
        let g2 = self.perm[ii + 1 + self.perm[jj + 1] as usize];

        let n0 = corner(x0, y0, g0);
        let n1 = corner(x1, y1, g1);
        let n2 = corner(x2, y2, g2);

        70.0 * (n0 + n1 + n2)
    }
}

/// Falloff-weighted gradient contribution of one simplex corner.
fn corner(dx: f64, dy: f64, hash: u8) -> f64 {
    let mut t = 0.5 - dx * dx - dy * dy;
    if t < 0.0 {
        return 0.0;
    }
    t *= t;
    t * t * grad(hash, dx, dy)
}

/// Dot product with one of 8 fixed gradient directions selected by the low
/// three bits of the hash.
fn grad(hash: u8, x: f64, y: f64) -> f64 {
    let h = hash & 7;
    let (u, v) = if h < 4 { (x, y) } else { (y, x) };
    let a = if h & 1 != 0 { -u } else { u };
    let b = if h & 2 != 0 { -2.0 * v } else { 2.0 * v };
    a + b
}
