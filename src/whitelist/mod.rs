//! Whitelist Set
//!
//! The mutable set of compiled matchers for the active session.
//!
//! Invariants:
//! - Entry identity is `(namespace, name, constraints)`; inserting an
//!   equal matcher twice is a no-op reported via the return value.
//! - Every mutating call reports whether it changed anything; callers
//!   turn unchanged calls into user-visible rejections.
//! - A disabled whitelist permits everything.

mod set;

pub use set::WhitelistSet;
