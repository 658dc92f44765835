//! Pattern error types
//!
//! A malformed entry is surfaced to the caller, never retried, and never
//! partially applied.

use thiserror::Error;

/// Result type for pattern operations
pub type PatternResult<T> = Result<T, PatternError>;

/// Pattern compilation and query-parse errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Entry text does not match the whitelist grammar
    #[error("Invalid whitelist entry: '{0}'")]
    InvalidEntry(String),

    /// State query text does not match the grammar
    #[error("Invalid state query: '{0}'")]
    InvalidQuery(String),

    /// State queries name one concrete state; wildcards have no meaning there
    #[error("Wildcard not allowed in state query: '{0}'")]
    WildcardQuery(String),
}
