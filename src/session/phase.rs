//! Session phase state machine
//!
//! Phases:
//! - Standalone: this process's local data is live; saving is active.
//! - ConnectingRemote: joined a non-local session; saving is suppressed,
//!   but the locally-loaded whitelist stays visible until the snapshot
//!   lands. The window is part of the observed protocol, not corrected
//!   here.
//! - ConnectedRemote: the authoritative snapshot is installed; the
//!   whitelist is pure replicated state from here on.
//!
//! Transitions are explicit and checked; a notification arriving in an
//! impossible order is an error, never silently absorbed.

use super::errors::{SessionError, SessionResult};

/// Phase of the session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Local data live, saving active
    Standalone,

    /// Remote session joined, snapshot not yet received
    ConnectingRemote,

    /// Remote snapshot installed, pure replication
    ConnectedRemote,
}

impl SessionPhase {
    /// Transition on "joined a non-local session".
    pub fn join_remote(self) -> SessionResult<Self> {
        match self {
            Self::Standalone => Ok(Self::ConnectingRemote),
            Self::ConnectingRemote | Self::ConnectedRemote => Err(
                SessionError::IllegalTransition("already in a remote session".to_string()),
            ),
        }
    }

    /// Transition on snapshot receipt.
    ///
    /// A repeated snapshot while connected is idempotent; one outside a
    /// remote session is a protocol violation.
    pub fn snapshot_received(self) -> SessionResult<Self> {
        match self {
            Self::ConnectingRemote | Self::ConnectedRemote => Ok(Self::ConnectedRemote),
            Self::Standalone => Err(SessionError::IllegalTransition(
                "snapshot received outside a remote session".to_string(),
            )),
        }
    }

    /// Transition on disconnect. Valid from any phase: the host fires
    /// the notification for local sessions too, and restoring an
    /// already-standalone session is harmless.
    pub fn disconnect(self) -> Self {
        Self::Standalone
    }

    /// Whether the session is currently remote (either remote phase).
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::ConnectingRemote | Self::ConnectedRemote)
    }
}
