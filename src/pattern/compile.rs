//! Whitelist entry compilation
//!
//! `compile` turns entry text into a [`Matcher`]; `parse_query` turns a
//! concrete state string into the `(Identifier, AttributeState)` pair the
//! query hook consumes. Both share one anchored grammar:
//!
//! ```text
//! [namespace ':'] name ['[' word '=' word (',' word '=' word)* ']']
//! ```
//!
//! The word class is explicit ASCII `[A-Za-z0-9_]`. An omitted namespace
//! becomes [`DEFAULT_NAMESPACE`]; only an explicit `*` wildcards a slot.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::errors::{PatternError, PatternResult};
use super::matcher::{
    AttributeState, Identifier, IdentifierPattern, Matcher, Segment, StatePattern,
    DEFAULT_NAMESPACE,
};

static ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?P<namespace>[A-Za-z0-9_]+|\*):)?(?P<name>[A-Za-z0-9_]+|\*)(?:\[(?P<constraints>(?:[A-Za-z0-9_]+=[A-Za-z0-9_]+,)*[A-Za-z0-9_]+=[A-Za-z0-9_]+)\])?$",
    )
    .expect("entry grammar is a valid regex")
});

/// Compile entry text into a matcher.
///
/// Compilation is pure and side-effect-free; equal text yields an equal
/// matcher.
pub fn compile(text: &str) -> PatternResult<Matcher> {
    let invalid = || PatternError::InvalidEntry(text.to_string());
    let caps = ENTRY.captures(text).ok_or_else(invalid)?;

    let namespace = caps
        .name("namespace")
        .map(|m| m.as_str())
        .unwrap_or(DEFAULT_NAMESPACE);
    let name = caps.name("name").map(|m| m.as_str()).ok_or_else(invalid)?;
    let ident = IdentifierPattern::new(segment(namespace), segment(name));

    match caps.name("constraints") {
        Some(constraints) => {
            let mut map = BTreeMap::new();
            for pair in constraints.as_str().split(',') {
                let (key, value) = pair.split_once('=').ok_or_else(invalid)?;
                map.insert(key.to_string(), value.to_string());
            }
            Ok(Matcher::State(StatePattern::new(ident, map)))
        }
        None => Ok(Matcher::Identifier(ident)),
    }
}

/// Parse a concrete state query, e.g. `minecraft:log[variant=oak,axis=y]`.
///
/// Queries name exactly one state, so wildcards are rejected.
pub fn parse_query(text: &str) -> PatternResult<(Identifier, AttributeState)> {
    let invalid = || PatternError::InvalidQuery(text.to_string());
    let caps = ENTRY.captures(text).ok_or_else(invalid)?;

    let namespace = caps
        .name("namespace")
        .map(|m| m.as_str())
        .unwrap_or(DEFAULT_NAMESPACE);
    let name = caps.name("name").map(|m| m.as_str()).ok_or_else(invalid)?;
    if namespace == "*" || name == "*" {
        return Err(PatternError::WildcardQuery(text.to_string()));
    }

    let mut attributes = Vec::new();
    if let Some(constraints) = caps.name("constraints") {
        for pair in constraints.as_str().split(',') {
            let (key, value) = pair.split_once('=').ok_or_else(invalid)?;
            attributes.push((key.to_string(), value.to_string()));
        }
    }

    Ok((
        Identifier::new(namespace, name),
        AttributeState::new(attributes),
    ))
}

fn segment(text: &str) -> Segment {
    if text == "*" {
        Segment::Wildcard
    } else {
        Segment::Literal(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_omitted_namespace_is_default_not_wildcard() {
        let matcher = compile("log").unwrap();
        assert_eq!(matcher.to_string(), "minecraft:log");

        let id = Identifier::new("minecraft", "log");
        let other = Identifier::new("othermod", "log");
        assert!(matcher.matches(&id, &AttributeState::empty()));
        assert!(!matcher.matches(&other, &AttributeState::empty()));
    }

    #[test]
    fn test_explicit_wildcards() {
        let everything = compile("*:*").unwrap();
        assert!(everything.matches(
            &Identifier::new("anything", "at_all"),
            &AttributeState::new([("k", "v")])
        ));

        let any_namespace = compile("*:planks").unwrap();
        assert!(any_namespace.matches(
            &Identifier::new("othermod", "planks"),
            &AttributeState::empty()
        ));
        assert!(!any_namespace.matches(
            &Identifier::new("othermod", "log"),
            &AttributeState::empty()
        ));
    }

    #[test]
    fn test_constraint_entry_compiles_to_state_matcher() {
        let matcher = compile("minecraft:log[variant=oak]").unwrap();
        assert!(matches!(matcher, Matcher::State(_)));

        let id = Identifier::new("minecraft", "log");
        assert!(matcher.matches(&id, &AttributeState::new([("variant", "oak")])));
        assert!(!matcher.matches(&id, &AttributeState::new([("variant", "birch")])));
    }

    #[test]
    fn test_same_text_compiles_equal() {
        let a = compile("minecraft:log[variant=oak,axis=y]").unwrap();
        let b = compile("minecraft:log[variant=oak,axis=y]").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_canonical_round_trip() {
        for text in [
            "minecraft:*",
            "computercraft:*",
            "minecraft:log[axis=y,variant=oak]",
            "*:planks",
            "*:*",
        ] {
            let matcher = compile(text).unwrap();
            assert_eq!(matcher.to_string(), text);
            assert_eq!(compile(&matcher.to_string()).unwrap(), matcher);
        }

        // Non-canonical input renders canonically and still round-trips
        let matcher = compile("log[variant=oak]").unwrap();
        assert_eq!(matcher.to_string(), "minecraft:log[variant=oak]");
        assert_eq!(compile(&matcher.to_string()).unwrap(), matcher);
    }

    #[test]
    fn test_invalid_entries_rejected() {
        for text in [
            "",
            ":",
            "a:",
            ":b",
            "a:b:c",
            "a b",
            "mine-craft:log",
            "minecraft:log[]",
            "minecraft:log[variant]",
            "minecraft:log[variant=oak,]",
            "minecraft:log[variant=oak",
            "minecraft:log[=oak]",
            "[variant=oak]",
        ] {
            assert!(
                matches!(compile(text), Err(PatternError::InvalidEntry(_))),
                "expected rejection of {:?}",
                text
            );
        }
    }

    #[test]
    fn test_query_parse() {
        let (id, state) = parse_query("minecraft:log[variant=oak,axis=y]").unwrap();
        assert_eq!(id, Identifier::new("minecraft", "log"));
        assert_eq!(state.get("variant"), Some("oak"));
        assert_eq!(state.get("axis"), Some("y"));

        let (id, state) = parse_query("stone").unwrap();
        assert_eq!(id, Identifier::new("minecraft", "stone"));
        assert!(state.is_empty());
    }

    #[test]
    fn test_query_rejects_wildcards() {
        assert!(matches!(
            parse_query("*:stone"),
            Err(PatternError::WildcardQuery(_))
        ));
        assert!(matches!(
            parse_query("minecraft:*"),
            Err(PatternError::WildcardQuery(_))
        ));
    }
}
