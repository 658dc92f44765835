//! Compiled whitelist matchers
//!
//! A whitelist entry compiles into one of two matcher variants:
//! - an identifier matcher, testing `(namespace, name)` with `*` as a
//!   per-slot wildcard
//! - a state matcher, which runs the identifier test and then constrains
//!   attribute values (permissive subset: only attributes present in both
//!   the queried state and the constraint map must be equal)
//!
//! Matcher identity is `(namespace, name, constraints)`. The memo cache a
//! state matcher carries never participates in equality, ordering, or
//! rendering, so `compile(render(m))` yields a matcher equal to `m`.

use std::collections::BTreeMap;
use std::fmt;

use super::cache::MatchCache;

/// Namespace substituted when an entry or query omits one.
///
/// An omitted namespace is NOT a wildcard; only an explicit `*` is.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Two-part resource identifier `(namespace, name)`.
///
/// Identifies the protected resource type under test (e.g. a block type).
/// Both parts are non-empty words; identifiers built from untrusted text
/// come through [`parse_query`](super::parse_query), which enforces the
/// grammar.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier {
    namespace: String,
    name: String,
}

impl Identifier {
    /// Create an identifier from trusted parts.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// The namespace part.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The name part.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

/// Instance-specific attribute values attached to an [`Identifier`] at
/// query time.
///
/// Supplied by the host per query, never stored by the engine. Immutable
/// after construction, which is what makes it usable as a memo key.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttributeState {
    attributes: BTreeMap<String, String>,
}

impl AttributeState {
    /// A state with no attributes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a state from attribute pairs.
    pub fn new<K, V>(attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up one attribute value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Iterate attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the state carries no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// One slot of an entry pattern: a literal word or the `*` wildcard.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment {
    /// Matches any value in this slot
    Wildcard,
    /// Matches exactly this value
    Literal(String),
}

impl Segment {
    /// Test one slot value.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Wildcard => true,
            Self::Literal(literal) => literal == value,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => f.write_str("*"),
            Self::Literal(literal) => f.write_str(literal),
        }
    }
}

/// Matcher over `(namespace, name)` only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct IdentifierPattern {
    namespace: Segment,
    name: Segment,
}

impl IdentifierPattern {
    pub(crate) fn new(namespace: Segment, name: Segment) -> Self {
        Self { namespace, name }
    }

    /// Test an identifier against both slots.
    pub fn matches(&self, id: &Identifier) -> bool {
        self.namespace.matches(id.namespace()) && self.name.matches(id.name())
    }
}

impl fmt::Display for IdentifierPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

/// Matcher over `(namespace, name)` plus attribute constraints.
///
/// The constraint check is a permissive subset match over the queried
/// state's attributes, memoized per state in a private [`MatchCache`].
#[derive(Debug)]
pub struct StatePattern {
    ident: IdentifierPattern,
    constraints: BTreeMap<String, String>,
    cache: MatchCache,
}

impl StatePattern {
    /// Grammar guarantees at least one constraint.
    pub(crate) fn new(ident: IdentifierPattern, constraints: BTreeMap<String, String>) -> Self {
        Self {
            ident,
            constraints,
            cache: MatchCache::new(),
        }
    }

    /// The identifier slots of this pattern.
    pub fn ident(&self) -> &IdentifierPattern {
        &self.ident
    }

    /// The attribute constraints, keyed by attribute name.
    pub fn constraints(&self) -> &BTreeMap<String, String> {
        &self.constraints
    }

    /// Test identifier slots first, then the memoized constraint check.
    pub fn matches(&self, id: &Identifier, state: &AttributeState) -> bool {
        if !self.ident.matches(id) {
            return false;
        }
        self.cache
            .get_or_insert_with(state, || self.constraints_hold(state))
    }

    /// Every attribute present in both the state and the constraint map
    /// must be string-equal; attributes without a constraint are ignored,
    /// as are constraints on attributes the state does not carry.
    fn constraints_hold(&self, state: &AttributeState) -> bool {
        state
            .iter()
            .all(|(key, value)| match self.constraints.get(key) {
                Some(required) => required == value,
                None => true,
            })
    }
}

impl Clone for StatePattern {
    /// Clones share pattern identity but never memoized results.
    fn clone(&self) -> Self {
        Self::new(self.ident.clone(), self.constraints.clone())
    }
}

impl PartialEq for StatePattern {
    fn eq(&self, other: &Self) -> bool {
        self.ident == other.ident && self.constraints == other.constraints
    }
}

impl Eq for StatePattern {}

impl PartialOrd for StatePattern {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StatePattern {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (&self.ident, &self.constraints).cmp(&(&other.ident, &other.constraints))
    }
}

impl fmt::Display for StatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.ident)?;
        for (i, (key, value)) in self.constraints.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        f.write_str("]")
    }
}

/// Compiled, immutable whitelist entry predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// `(namespace, name)` only
    Identifier(IdentifierPattern),
    /// `(namespace, name)` plus attribute constraints
    State(StatePattern),
}

impl Matcher {
    /// Test a queried `(Identifier, AttributeState)` pair.
    pub fn matches(&self, id: &Identifier, state: &AttributeState) -> bool {
        match self {
            Self::Identifier(pattern) => pattern.matches(id),
            Self::State(pattern) => pattern.matches(id, state),
        }
    }

    /// Ordering key: identifier slots first, then constraints.
    ///
    /// A plain entry and a constrained entry for the same identifier sort
    /// adjacently (plain first) instead of grouping by variant, so the
    /// rendered list reads in namespace/name order.
    fn sort_key(&self) -> (&IdentifierPattern, Option<&BTreeMap<String, String>>) {
        match self {
            Self::Identifier(pattern) => (pattern, None),
            Self::State(pattern) => (pattern.ident(), Some(pattern.constraints())),
        }
    }
}

impl PartialOrd for Matcher {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Matcher {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(pattern) => pattern.fmt(f),
            Self::State(pattern) => pattern.fmt(f),
        }
    }
}
