//! Whitelist Pattern Engine
//!
//! Whitelist entries are a small pattern language over typed resource
//! identifiers:
//!
//! ```text
//! entry      := [namespace ':'] name ['[' constraint (',' constraint)* ']']
//! namespace  := word | '*'
//! name       := word | '*'
//! constraint := word '=' word
//! word       := [A-Za-z0-9_]+
//! ```
//!
//! Entries compile into immutable [`Matcher`] predicates. Compilation is
//! pure: the same text always yields an equal matcher, and every matcher
//! renders back to the text it compiles from (canonical form, default
//! namespace filled in, constraints sorted).

mod cache;
mod compile;
mod errors;
mod matcher;

pub use cache::MatchCache;
pub use compile::{compile, parse_query};
pub use errors::{PatternError, PatternResult};
pub use matcher::{
    AttributeState, Identifier, IdentifierPattern, Matcher, Segment, StatePattern,
    DEFAULT_NAMESPACE,
};
