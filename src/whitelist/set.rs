//! The active whitelist

use std::collections::BTreeSet;

use crate::pattern::{compile, AttributeState, Identifier, Matcher, PatternResult};

/// Ordered set of compiled matchers plus the enabled gate.
///
/// `test` is the single authorization predicate consumed by every event
/// hook. The backing set is ordered by matcher identity, which makes
/// [`render`](Self::render) (and therefore the snapshot payload and the
/// persisted entry list) deterministic.
#[derive(Debug, Default)]
pub struct WhitelistSet {
    entries: BTreeSet<Matcher>,
    enabled: bool,
}

impl WhitelistSet {
    /// An empty, enabled whitelist.
    pub fn new() -> Self {
        Self {
            entries: BTreeSet::new(),
            enabled: true,
        }
    }

    /// Compile `entry` and insert it.
    ///
    /// Returns `false` if an equal matcher was already present (no-op,
    /// not an error), `true` if newly inserted.
    pub fn add(&mut self, entry: &str) -> PatternResult<bool> {
        Ok(self.entries.insert(compile(entry)?))
    }

    /// Compile `entry` and remove the equal matcher.
    ///
    /// Returns `true` if one was present and removed, `false` otherwise.
    pub fn remove(&mut self, entry: &str) -> PatternResult<bool> {
        let matcher = compile(entry)?;
        Ok(self.entries.remove(&matcher))
    }

    /// Empty the set unconditionally.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Set the enabled gate.
    ///
    /// Returns `false` when the value is unchanged (no-op), `true` when
    /// the change was applied.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        if self.enabled == enabled {
            return false;
        }
        self.enabled = enabled;
        true
    }

    /// Whether the gate is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `true` iff the gate is disabled OR any contained matcher matches.
    pub fn test(&self, id: &Identifier, state: &AttributeState) -> bool {
        !self.enabled || self.entries.iter().any(|m| m.matches(id, state))
    }

    /// Canonical textual form of every entry, in deterministic order.
    pub fn render(&self) -> Vec<String> {
        self.entries.iter().map(Matcher::to_string).collect()
    }
}
