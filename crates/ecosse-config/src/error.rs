//! Configuration error types.

use std::path::PathBuf;

/// Errors that can occur while loading or persisting configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading or writing a config path failed.
    #[error("config io failed for {path}: {source}")]
    Io {
        /// The file or directory the operation touched.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file's RON content did not deserialize into a config.
    #[error("malformed config {path}: {source}")]
    Malformed {
        /// The file that failed to parse.
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    /// The in-memory config failed to serialize to RON.
    #[error("could not serialize config: {0}")]
    Serialize(#[from] ron::Error),
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| ConfigError::Io { path, source }
    }

    pub(crate) fn malformed(
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(ron::error::SpannedError) -> Self {
        let path = path.into();
        move |source| ConfigError::Malformed { path, source }
    }
}
