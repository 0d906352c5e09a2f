//! Noise construction error types.

/// Errors that can occur when constructing a noise field.
#[derive(Debug, thiserror::Error)]
pub enum NoiseError {
    /// The seed is NaN or infinite.
    #[error("invalid noise seed: {0} is not finite")]
    InvalidSeed(f64),
}
