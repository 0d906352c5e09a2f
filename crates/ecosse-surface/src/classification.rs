//! Terrain classification for planet surfaces.

use std::fmt;

/// Errors from resolving a classification name.
#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    /// The name does not match any known classification.
    #[error("unrecognized terrain classification: {0:?}")]
    Unrecognized(String),
}

/// The closed set of planet surface classifications.
///
/// Each variant selects a fixed color policy for the color synthesis pass;
/// the bump pass is classification-independent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerrainClass {
    /// Continents and oceans.
    Terrestrial,
    /// Sand flats broken by scattered water.
    Desert,
    /// Global ocean.
    Aquatic,
    /// Basalt plains with low-lying water.
    Volcanic,
    /// Banded gas giant.
    Gas,
}

impl TerrainClass {
    /// All classifications, in declaration order.
    pub const ALL: [TerrainClass; 5] = [
        TerrainClass::Terrestrial,
        TerrainClass::Desert,
        TerrainClass::Aquatic,
        TerrainClass::Volcanic,
        TerrainClass::Gas,
    ];

    /// The lowercase name used in configuration and file names.
    pub fn name(self) -> &'static str {
        match self {
            TerrainClass::Terrestrial => "terrestrial",
            TerrainClass::Desert => "desert",
            TerrainClass::Aquatic => "aquatic",
            TerrainClass::Volcanic => "volcanic",
            TerrainClass::Gas => "gas",
        }
    }

    /// Resolve a configuration name to a classification.
    ///
    /// # Errors
    ///
    /// Returns [`ClassificationError::Unrecognized`] for names outside the
    /// known set; callers decide whether to fail or fall back.
    pub fn from_name(name: &str) -> Result<Self, ClassificationError> {
        match name {
            "terrestrial" => Ok(TerrainClass::Terrestrial),
            "desert" => Ok(TerrainClass::Desert),
            "aquatic" => Ok(TerrainClass::Aquatic),
            "volcanic" => Ok(TerrainClass::Volcanic),
            "gas" => Ok(TerrainClass::Gas),
            other => Err(ClassificationError::Unrecognized(other.to_string())),
        }
    }
}

impl fmt::Display for TerrainClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
