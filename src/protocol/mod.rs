//! Replication Wire Protocol
//!
//! Two message shapes, pure data:
//! - [`Snapshot`]: the full whitelist, sent exactly once, immediately
//!   after a peer joins an authoritative session and before any delta
//!   for that session.
//! - [`MutationOp`] delta: one incremental mutation, broadcast in the
//!   order the originating mutation was applied on the authoritative
//!   side.
//!
//! Transport concerns are delegated: the channel is assumed reliable,
//! ordered, and session-scoped, and message types are distinguished by
//! an out-of-band channel tag, not by this layer. Decoding is strict:
//! a malformed message fails decoding and means the session is corrupt;
//! nothing is defaulted or skipped.

mod delta;
mod errors;
mod snapshot;
mod wire;

pub use delta::MutationOp;
pub use errors::{ProtocolError, ProtocolErrorKind, ProtocolResult};
pub use snapshot::Snapshot;
pub use wire::{MAX_ENTRY_BYTES, MAX_SNAPSHOT_ENTRIES};
