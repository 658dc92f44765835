//! Session Lifecycle
//!
//! Replication model:
//! - Exactly one authoritative side per session; only it persists
//!   mutations and broadcasts deltas.
//! - A joining peer receives one snapshot before any delta.
//! - Inbound deltas apply directly to the whitelist: no persistence, no
//!   re-broadcast.
//! - Disconnecting discards everything the authoritative side pushed and
//!   restores the locally persisted configuration.
//! - Server-pushed state is never written to the local store; saving is
//!   suppressed for the entire remote phase.

mod controller;
mod errors;
mod phase;

pub use controller::{Actor, SessionController};
pub use errors::{MutationError, MutationResult, SessionError, SessionResult};
pub use phase::SessionPhase;
