//! Session error types
//!
//! Mutation rejections are reported, never fatal: the whitelist is
//! unchanged and the message is surfaced verbatim at the command
//! surface. Lifecycle errors indicate a host bug (events delivered in an
//! impossible order) and are surfaced without any automatic recovery.

use thiserror::Error;

use crate::config::{ConfigError, GateError};
use crate::pattern::PatternError;

/// Result type for whitelist mutations
pub type MutationResult<T> = Result<T, MutationError>;

/// Rejection of a locally-originated whitelist mutation
#[derive(Debug, Error)]
pub enum MutationError {
    /// Entry text does not match the grammar
    #[error(transparent)]
    Invalid(#[from] PatternError),

    /// Add of an already-present entry
    #[error("'{0}' already on whitelist")]
    Duplicate(String),

    /// Remove of an absent entry
    #[error("'{0}' not found in whitelist")]
    Missing(String),

    /// Enable when already enabled
    #[error("Whitelist already enabled")]
    AlreadyEnabled,

    /// Disable when already disabled
    #[error("Whitelist already disabled")]
    AlreadyDisabled,

    /// The backing store write failed
    #[error("Failed to persist whitelist: {0}")]
    Persistence(#[from] ConfigError),
}

impl From<GateError> for MutationError {
    fn from(e: GateError) -> Self {
        match e {
            GateError::Pattern(pattern) => Self::Invalid(pattern),
            GateError::Store(store) => Self::Persistence(store),
        }
    }
}

/// Result type for session lifecycle operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Session lifecycle failures
#[derive(Debug, Error)]
pub enum SessionError {
    /// Lifecycle notification arrived in an impossible order
    #[error("Illegal session transition: {0}")]
    IllegalTransition(String),

    /// A replicated entry does not match the grammar
    #[error(transparent)]
    Invalid(#[from] PatternError),

    /// The local configuration could not be restored
    #[error("Failed to restore local configuration: {0}")]
    Restore(#[from] GateError),
}
