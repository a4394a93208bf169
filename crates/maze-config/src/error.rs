use std::path::PathBuf;

use maze_model::{Dimension, ModelError};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {origin}: {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("config defines no bounds profiles")]
    NoProfiles,

    #[error("invalid {field} bounds in profile `{profile}`: {source}")]
    InvalidBounds {
        profile: String,
        field: Dimension,
        #[source]
        source: ModelError,
    },

    #[error("unknown bounds profile `{name}` (available: {available})")]
    UnknownProfile { name: String, available: String },

    #[error("invalid sizing tier #{index}: {message}")]
    InvalidTier { index: usize, message: String },

    #[error(
        "profile `{profile}` allows {width}x{height} but no sizing tier covers it; \
         add a tier or a [sizing.fallback]"
    )]
    SizingGap {
        profile: String,
        width: u32,
        height: u32,
    },

    #[error("generator timeout must be at least one second")]
    ZeroTimeout,
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
