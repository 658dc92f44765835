//! Match result memoization
//!
//! Attribute enumeration dominates the cost of a state match, and the
//! same queried state is re-tested on every tick of a continuous action
//! (holding the mouse on a block). Each state matcher therefore memoizes
//! its constraint result per queried state.
//!
//! The table is keyed by the state's value: queried states are immutable
//! after construction, so value identity is stable. Whitelists and the
//! set of distinct states seen in a session are both small, so the table
//! is unbounded and never evicted; it lives as long as the matcher.
//!
//! All access happens on the session's single logical world thread,
//! which is what makes the interior mutability sound. Matchers are
//! consequently not `Sync`.

use std::cell::RefCell;
use std::collections::HashMap;

use super::matcher::AttributeState;

/// Per-matcher memo table from queried state to match result.
#[derive(Debug, Default)]
pub struct MatchCache {
    results: RefCell<HashMap<AttributeState, bool>>,
}

impl MatchCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the memoized result for `state`, computing and storing it
    /// on first sight.
    pub fn get_or_insert_with(
        &self,
        state: &AttributeState,
        compute: impl FnOnce() -> bool,
    ) -> bool {
        if let Some(hit) = self.results.borrow().get(state) {
            return *hit;
        }
        let result = compute();
        self.results.borrow_mut().insert(state.clone(), result);
        result
    }

    /// Number of memoized states.
    pub fn len(&self) -> usize {
        self.results.borrow().len()
    }

    /// Whether anything has been memoized yet.
    pub fn is_empty(&self) -> bool {
        self.results.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computes_once_per_state() {
        let cache = MatchCache::new();
        let state = AttributeState::new([("variant", "oak")]);
        let mut calls = 0;

        let first = cache.get_or_insert_with(&state, || {
            calls += 1;
            true
        });
        let second = cache.get_or_insert_with(&state, || {
            calls += 1;
            false // must not be consulted
        });

        assert!(first);
        assert!(second);
        assert_eq!(calls, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_states_memoized_separately() {
        let cache = MatchCache::new();
        let oak = AttributeState::new([("variant", "oak")]);
        let birch = AttributeState::new([("variant", "birch")]);

        assert!(cache.get_or_insert_with(&oak, || true));
        assert!(!cache.get_or_insert_with(&birch, || false));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_equal_value_states_share_an_entry() {
        let cache = MatchCache::new();
        let a = AttributeState::new([("axis", "y"), ("variant", "oak")]);
        let b = AttributeState::new([("variant", "oak"), ("axis", "y")]);

        assert!(cache.get_or_insert_with(&a, || true));
        assert!(cache.get_or_insert_with(&b, || false));
        assert_eq!(cache.len(), 1);
    }
}
