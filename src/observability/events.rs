//! Observable events
//!
//! Every log line names one of these. Events are explicit and typed so
//! log consumers can match on stable strings.

use std::fmt;

/// Observable events in the whitelist engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Backing store read at startup or restore
    ConfigLoaded,
    /// Whitelist state written back to the backing store
    ConfigSaved,

    // Session lifecycle
    /// Joined a non-local session; local saving suppressed
    SessionJoinRemote,
    /// Disconnected; local configuration restored
    SessionRestored,

    // Replication
    /// Snapshot produced for a joining peer
    SnapshotProduced,
    /// Snapshot received and installed
    SnapshotInstalled,
    /// Inbound delta applied
    DeltaApplied,
    /// Peer joined the authoritative session
    PeerJoined,
    /// Peer left the authoritative session
    PeerLeft,

    // Whitelist
    /// Locally-originated mutation applied
    WhitelistMutated,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ConfigSaved => "CONFIG_SAVED",
            Event::SessionJoinRemote => "SESSION_JOIN_REMOTE",
            Event::SessionRestored => "SESSION_RESTORED",
            Event::SnapshotProduced => "SNAPSHOT_PRODUCED",
            Event::SnapshotInstalled => "SNAPSHOT_INSTALLED",
            Event::DeltaApplied => "DELTA_APPLIED",
            Event::PeerJoined => "PEER_JOINED",
            Event::PeerLeft => "PEER_LEFT",
            Event::WhitelistMutated => "WHITELIST_MUTATED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
