//! Configuration error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::pattern::PatternError;

/// Result type for store operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Backing store failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for gate operations
pub type GateResult<T> = Result<T, GateError>;

/// Failures while loading or mutating through the persistence gate
#[derive(Debug, Error)]
pub enum GateError {
    /// A stored or supplied entry does not match the grammar
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// The backing store could not be read or written
    #[error(transparent)]
    Store(#[from] ConfigError),
}
