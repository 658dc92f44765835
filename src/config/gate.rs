//! Save-suppressed write-through persistence
//!
//! Invariants:
//! - `saving_suppressed` gates every store write; suppressed mutations
//!   still apply in memory.
//! - Toggling suppression never writes by itself; a write happens only
//!   as a side effect of the next mutation while suppression is off.
//! - The initial load replays stored entries with suppression forced on,
//!   so loading never re-persists the store's own contents.
//! - Only `whitelist` and `whitelist_enabled` are ever written back.
//! - The store file belongs to the local session; a remote session must
//!   never write it (the session controller enforces this by keeping
//!   suppression active for the whole remote phase).

use std::path::{Path, PathBuf};

use crate::observability::{Event, Logger, Severity};
use crate::whitelist::WhitelistSet;

use super::errors::{ConfigResult, GateResult};
use super::store::StoredConfig;

/// Write-through wrapper around [`WhitelistSet`] and the backing store.
#[derive(Debug)]
pub struct PersistenceGate {
    path: PathBuf,
    stored: StoredConfig,
    set: WhitelistSet,
    saving_suppressed: bool,
}

impl PersistenceGate {
    /// Read the backing store (creating it with defaults when absent)
    /// and replay its entries into a fresh whitelist.
    pub fn load(path: impl Into<PathBuf>) -> GateResult<Self> {
        let path = path.into();
        let stored = StoredConfig::load_or_init(&path)?;

        let mut gate = Self {
            path,
            stored,
            set: WhitelistSet::new(),
            saving_suppressed: true,
        };
        gate.replay_stored()?;
        gate.saving_suppressed = false;

        let entries = gate.set.len().to_string();
        let path = gate.path.display().to_string();
        Logger::log(
            Severity::Info,
            Event::ConfigLoaded.as_str(),
            &[("entries", entries.as_str()), ("path", path.as_str())],
        );

        Ok(gate)
    }

    /// Rebuild the in-memory whitelist from the stored document by
    /// replaying its entries as `add` calls.
    ///
    /// Callers force suppression on first: the replayed adds go through
    /// the normal write-through path, and suppression is what keeps the
    /// load from re-persisting the store's own contents.
    fn replay_stored(&mut self) -> GateResult<()> {
        debug_assert!(self.saving_suppressed);

        self.set.clear();
        let entries = self.stored.whitelist.clone();
        for entry in &entries {
            self.add(entry)?;
        }
        self.set.set_enabled(self.stored.whitelist_enabled);
        Ok(())
    }

    /// Add an entry, writing through unless suppressed.
    pub fn add(&mut self, entry: &str) -> GateResult<bool> {
        let changed = self.set.add(entry)?;
        self.persist()?;
        Ok(changed)
    }

    /// Remove an entry, writing through unless suppressed.
    pub fn remove(&mut self, entry: &str) -> GateResult<bool> {
        let changed = self.set.remove(entry)?;
        self.persist()?;
        Ok(changed)
    }

    /// Clear the whitelist, writing through unless suppressed.
    pub fn clear(&mut self) -> GateResult<()> {
        self.set.clear();
        self.persist()?;
        Ok(())
    }

    /// Set the enabled gate. Returns `false` on no-op; writes through
    /// only when the value changed.
    pub fn set_enabled(&mut self, enabled: bool) -> GateResult<bool> {
        if !self.set.set_enabled(enabled) {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Toggle save suppression. Never writes by itself.
    pub fn suppress_saving(&mut self, suppress: bool) {
        self.saving_suppressed = suppress;
    }

    /// Whether store writes are currently suppressed.
    pub fn saving_suppressed(&self) -> bool {
        self.saving_suppressed
    }

    /// Discard the in-memory whitelist, reload it from the backing
    /// store, and re-enable saving.
    pub fn restore(&mut self) -> GateResult<()> {
        self.stored = StoredConfig::load_or_init(&self.path)?;
        self.saving_suppressed = true;
        self.replay_stored()?;
        self.saving_suppressed = false;
        Ok(())
    }

    fn persist(&mut self) -> ConfigResult<()> {
        if self.saving_suppressed {
            return Ok(());
        }

        self.stored.whitelist = self.set.render();
        self.stored.whitelist_enabled = self.set.is_enabled();
        self.stored.save(&self.path)?;

        let entries = self.stored.whitelist.len().to_string();
        Logger::log(
            Severity::Trace,
            Event::ConfigSaved.as_str(),
            &[("entries", entries.as_str())],
        );

        Ok(())
    }

    /// The active whitelist.
    pub fn whitelist(&self) -> &WhitelistSet {
        &self.set
    }

    /// Mutable whitelist access that bypasses persistence entirely.
    ///
    /// This is the inbound-replication path: deltas and snapshots from
    /// the authoritative side apply here and must never touch the store.
    pub fn whitelist_mut(&mut self) -> &mut WhitelistSet {
        &mut self.set
    }

    /// Should the whitelist apply to creative players?
    pub fn apply_in_creative(&self) -> bool {
        self.stored.apply_in_creative
    }

    /// Does the whitelist also prevent interacting with blocks?
    pub fn prevent_interact(&self) -> bool {
        self.stored.prevent_interact
    }

    /// Should fake players bypass protection checks?
    pub fn allow_fake_players(&self) -> bool {
        self.stored.allow_fake_players
    }

    /// Path of the backing store document.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
