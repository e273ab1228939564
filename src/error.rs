//! Error types for assetcache.
//!
//! Uses `thiserror` for ergonomic error definitions.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the asset cache store.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to open database {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to create scanned assets cache: {0}")]
    Schema(#[source] rusqlite::Error),

    #[error("no file found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to retrieve assets from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to begin transaction: {0}")]
    Transaction(#[source] rusqlite::Error),

    #[error("failed to commit transaction: {0}")]
    Commit(#[source] rusqlite::Error),
}

/// Result type alias for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine home directory")]
    DirectoryNotFound,

    #[error("failed to read {}: {reason}", path.display())]
    ReadFailed { path: PathBuf, reason: String },

    #[error("failed to write {}: {reason}", path.display())]
    WriteFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level error for command execution.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid asset input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
