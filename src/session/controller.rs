//! Session lifecycle orchestration
//!
//! The controller owns the persistence gate and funnels every mutation
//! and query through one place. All calls execute on the session's
//! single logical world thread; the host marshals network arrivals onto
//! it before calling in. Nothing here blocks or suspends.

use std::collections::BTreeSet;
use std::path::PathBuf;

use uuid::Uuid;

use crate::config::{GateResult, PersistenceGate};
use crate::observability::{log_event, Event};
use crate::pattern::{AttributeState, Identifier};
use crate::protocol::{MutationOp, Snapshot};
use crate::whitelist::WhitelistSet;

use super::errors::{MutationError, MutationResult, SessionResult};
use super::phase::SessionPhase;

/// Requester context for the query hook.
///
/// The host resolves these two facts about the requester before asking
/// for a verdict; both bypasses are policy of the hosting process, not
/// of the whitelist itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Actor {
    /// Requester is in an unrestricted creative-equivalent mode
    pub creative: bool,
    /// Requester is a non-interactive synthetic actor (a fake player)
    pub fake: bool,
}

impl Actor {
    /// An ordinary survival player.
    pub fn player() -> Self {
        Self::default()
    }

    /// A creative-mode player.
    pub fn creative_player() -> Self {
        Self {
            creative: true,
            fake: false,
        }
    }

    /// A synthetic (fake) player, e.g. a machine acting as one.
    pub fn fake_player() -> Self {
        Self {
            creative: false,
            fake: true,
        }
    }
}

/// Orchestrates one session's whitelist lifecycle.
pub struct SessionController {
    gate: PersistenceGate,
    phase: SessionPhase,
    authoritative: bool,
    peers: BTreeSet<Uuid>,
}

impl SessionController {
    /// Load the locally persisted configuration and start standalone.
    ///
    /// `authoritative` marks the side whose mutations are persisted and
    /// broadcast (the server). A client process passes `false`.
    pub fn load(path: impl Into<PathBuf>, authoritative: bool) -> GateResult<Self> {
        Ok(Self {
            gate: PersistenceGate::load(path)?,
            phase: SessionPhase::Standalone,
            authoritative,
            peers: BTreeSet::new(),
        })
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Whether this process is the authoritative side.
    pub fn is_authoritative(&self) -> bool {
        self.authoritative
    }

    /// The active whitelist.
    pub fn whitelist(&self) -> &WhitelistSet {
        self.gate.whitelist()
    }

    /// The persistence gate (policy flags, suppression state).
    pub fn gate(&self) -> &PersistenceGate {
        &self.gate
    }

    // --- receiving-side lifecycle -------------------------------------

    /// Notification: this process joined a non-local session.
    ///
    /// Suppresses local saving immediately. The whitelist keeps its
    /// locally-loaded contents until the snapshot arrives; that window
    /// is part of the observed protocol.
    pub fn remote_join(&mut self) -> SessionResult<()> {
        self.phase = self.phase.join_remote()?;
        self.gate.suppress_saving(true);

        log_event(Event::SessionJoinRemote, &[]);
        Ok(())
    }

    /// Install a received snapshot: clear, then add every carried entry,
    /// all under the suppression that has been active since the join.
    ///
    /// The enabled flag is untouched; it replicates via deltas.
    pub fn install_snapshot(&mut self, snapshot: &Snapshot) -> SessionResult<()> {
        self.phase = self.phase.snapshot_received()?;

        let set = self.gate.whitelist_mut();
        set.clear();
        for entry in snapshot.entries() {
            set.add(entry)?;
        }

        let entries = snapshot.len().to_string();
        log_event(Event::SnapshotInstalled, &[("entries", entries.as_str())]);
        Ok(())
    }

    /// Notification: this process disconnected.
    ///
    /// Discards whatever the authoritative side pushed, reloads the
    /// local backing store, and re-enables saving.
    pub fn disconnect(&mut self) -> SessionResult<()> {
        self.phase = self.phase.disconnect();
        self.gate.restore()?;

        let entries = self.gate.whitelist().len().to_string();
        log_event(Event::SessionRestored, &[("entries", entries.as_str())]);
        Ok(())
    }

    /// Apply an inbound delta from the authoritative side.
    ///
    /// Pure replication: the mutation goes straight to the whitelist,
    /// bypassing persistence, and is never re-broadcast. No-op deltas
    /// (duplicate add, absent remove, unchanged toggle) are ignored;
    /// the authoritative side already validated the mutation.
    pub fn apply_remote(&mut self, op: &MutationOp) -> SessionResult<()> {
        let set = self.gate.whitelist_mut();
        match op {
            MutationOp::Add(entry) => {
                set.add(entry)?;
            }
            MutationOp::Remove(entry) => {
                set.remove(entry)?;
            }
            MutationOp::Clear => set.clear(),
            MutationOp::Enable => {
                set.set_enabled(true);
            }
            MutationOp::Disable => {
                set.set_enabled(false);
            }
        }

        log_event(Event::DeltaApplied, &[("op", op.name())]);
        Ok(())
    }

    // --- authoritative-side lifecycle ---------------------------------

    /// A peer joined this authoritative session. Returns the snapshot to
    /// send to that peer, exactly once, before any delta it will see.
    pub fn peer_joined(&mut self, peer: Uuid) -> Snapshot {
        self.peers.insert(peer);
        let peer_id = peer.to_string();
        log_event(Event::PeerJoined, &[("peer", peer_id.as_str())]);

        let snapshot = Snapshot::new(self.gate.whitelist().render());
        let entries = snapshot.len().to_string();
        log_event(
            Event::SnapshotProduced,
            &[("entries", entries.as_str()), ("peer", peer_id.as_str())],
        );
        snapshot
    }

    /// A peer left this authoritative session.
    pub fn peer_left(&mut self, peer: Uuid) {
        if self.peers.remove(&peer) {
            let peer_id = peer.to_string();
            log_event(Event::PeerLeft, &[("peer", peer_id.as_str())]);
        }
    }

    /// Peers currently connected to this authoritative session.
    pub fn peers(&self) -> impl Iterator<Item = &Uuid> {
        self.peers.iter()
    }

    /// Apply a locally-originated mutation.
    ///
    /// The mutation goes through the persistence gate (so it writes
    /// through unless saving is suppressed). On success, returns the op
    /// to broadcast when this process is authoritative; the host sends
    /// it to every connected peer. A no-op is a rejection and is never
    /// broadcast.
    pub fn apply_local(&mut self, op: &MutationOp) -> MutationResult<Option<MutationOp>> {
        match op {
            MutationOp::Add(entry) => {
                if !self.gate.add(entry)? {
                    return Err(MutationError::Duplicate(entry.clone()));
                }
            }
            MutationOp::Remove(entry) => {
                if !self.gate.remove(entry)? {
                    return Err(MutationError::Missing(entry.clone()));
                }
            }
            MutationOp::Clear => self.gate.clear()?,
            MutationOp::Enable => {
                if !self.gate.set_enabled(true)? {
                    return Err(MutationError::AlreadyEnabled);
                }
            }
            MutationOp::Disable => {
                if !self.gate.set_enabled(false)? {
                    return Err(MutationError::AlreadyDisabled);
                }
            }
        }

        log_event(
            Event::WhitelistMutated,
            &[("entry", op.entry().unwrap_or("")), ("op", op.name())],
        );

        Ok(self.authoritative.then(|| op.clone()))
    }

    // --- query hook ---------------------------------------------------

    /// The authorization predicate consulted by every event hook.
    ///
    /// The creative and fake-actor bypasses are evaluated first; only
    /// then is the whitelist itself consulted.
    pub fn permits(&self, actor: &Actor, id: &Identifier, state: &AttributeState) -> bool {
        if actor.creative && !self.gate.apply_in_creative() {
            return true;
        }
        if actor.fake && self.gate.allow_fake_players() {
            return true;
        }
        self.gate.whitelist().test(id, state)
    }

    /// Does the whitelist also gate right-click interaction?
    pub fn prevent_interact(&self) -> bool {
        self.gate.prevent_interact()
    }
}
