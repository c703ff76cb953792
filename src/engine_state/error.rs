//! # Engine Error Types
//!
//! All errors that can surface from the engine. World maintenance never
//! propagates these; they are logged and the affected chunk falls back to a
//! no-op or to regeneration. Only engine construction returns them.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing a world directory.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Underlying file system failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The world directory to open does not exist.
    #[error("world '{0}' does not exist")]
    WorldNotFound(String),

    /// `world.info` could not be parsed.
    #[error("malformed world info at {path}: {reason}")]
    MalformedWorldInfo {
        /// Path of the offending file.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// A chunk record held fewer bytes than a full chunk.
    #[error("chunk record {path} is truncated: expected {expected} bytes, found {found}")]
    TruncatedChunk {
        /// Path of the offending file.
        path: PathBuf,
        /// Size of a complete record.
        expected: usize,
        /// Size actually read.
        found: usize,
    },

    /// A chunk record contained an integer that names no block type.
    #[error("chunk record {path} holds unknown block ordinal {ordinal}")]
    UnknownBlockType {
        /// Path of the offending file.
        path: PathBuf,
        /// The undecodable ordinal.
        ordinal: i32,
    },
}

/// Errors raised while loading the texture atlas.
#[derive(Error, Debug)]
pub enum AssetError {
    /// The atlas file is absent.
    #[error("texture atlas not found at {0}")]
    Missing(PathBuf),

    /// The atlas exists but could not be decoded.
    #[error("could not read texture atlas: {0}")]
    Image(#[from] image::ImageError),

    /// The atlas or its cell size has a zero dimension.
    #[error("texture atlas has invalid dimensions {width}x{height} (cell size {cell_size})")]
    InvalidDimensions {
        /// Atlas width in pixels.
        width: u32,
        /// Atlas height in pixels.
        height: u32,
        /// Cell edge length in pixels.
        cell_size: u32,
    },
}

/// Errors raised while loading the engine configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid JSON for `EngineConfig`.
    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors that prevent the engine from starting.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The world could not be created or opened.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// A required asset is missing or unusable.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// The configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
