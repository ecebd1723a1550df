use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons a configuration file or override set cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid color '{0}', expected #RRGGBB")]
    InvalidColor(String),
    #[error("grid must be at least 3x3, got {width}x{height}")]
    GridTooSmall { width: u16, height: u16 },
    #[error("palette must contain at least one color pair")]
    EmptyPalette,
    #[error("max_foods must be at least 1")]
    NoFoodCapacity,
    #[error("burst range {min}..={max} is invalid; need 1 <= min <= max")]
    InvalidBurstRange { min: u8, max: u8 },
    #[error("spawn_retry_limit must be at least 1")]
    NoSpawnRetries,
    #[error("base_speed must be at least 1")]
    ZeroBaseSpeed,
    #[error("segments_per_speed_level must be at least 1")]
    ZeroSpeedStep,
}

/// Food placement failures. Both are recoverable: the spawn is deferred.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum SpawnError {
    #[error("grid has no interior cells for food")]
    NoInterior,
    #[error("no free interior cell found after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

/// Top-level failures surfaced by the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to initialise logger: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("failed to encode config: {0}")]
    Encode(#[from] serde_json::Error),
}
