//! Startup error types
//!
//! The simulation itself never fails; only configuration and sprite
//! catalog loading can.

use std::path::PathBuf;

/// Errors raised while setting up a game session
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid JSON for the expected shape
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A setting is outside its usable range
    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting {
        name: &'static str,
        reason: String,
    },

    /// The sprite catalog has no meteor sprites to pick from
    #[error("sprite catalog contains no meteor sprites")]
    EmptySpriteCatalog,
}

pub type Result<T> = std::result::Result<T, Error>;
