//! Subcommand parsing and dispatch

use std::fmt;

use crate::protocol::MutationOp;
use crate::session::SessionController;

use super::errors::{CommandError, CommandResult};

const HELP_TEXT: &str = "Use protect add|remove <pattern> to modify the whitelist.\n\
Pattern examples:\n\
  computercraft:* (matches all blocks from computercraft)\n\
  minecraft:grass (matches grass blocks)\n\
  *:planks (matches blocks named planks from any mod)\n\
  minecraft:log[variant=oak] (matches any rotation of oak logs)\n\
  *:* (matches everything)";

/// The `protect` subcommands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subcommand {
    Help,
    List,
    Add,
    Remove,
    Clear,
    Enable,
    Disable,
}

impl Subcommand {
    /// All subcommands, in help order.
    pub const ALL: [Subcommand; 7] = [
        Subcommand::Help,
        Subcommand::List,
        Subcommand::Add,
        Subcommand::Remove,
        Subcommand::Clear,
        Subcommand::Enable,
        Subcommand::Disable,
    ];

    /// Parse one subcommand word, case-insensitively.
    pub fn parse(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|sub| word.eq_ignore_ascii_case(sub.name()))
    }

    /// The subcommand word.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::List => "list",
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Clear => "clear",
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }
}

impl fmt::Display for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Usage string listing every subcommand.
pub fn usage() -> String {
    let words: Vec<&str> = Subcommand::ALL.iter().map(|s| s.name()).collect();
    format!("protect <{}> [entry]", words.join("|"))
}

/// Outcome of a successfully dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReply {
    /// Text shown to the caller
    pub text: String,
    /// Delta to broadcast to connected peers, when the mutation was
    /// applied on the authoritative side
    pub broadcast: Option<MutationOp>,
}

impl CommandReply {
    fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            broadcast: None,
        }
    }
}

/// Parse and execute one command line against the session.
///
/// `operator` is the host's authorization decision; the whole command
/// family is operator-gated.
pub fn dispatch(
    controller: &mut SessionController,
    line: &str,
    operator: bool,
) -> CommandResult<CommandReply> {
    if !operator {
        return Err(CommandError::permission_denied());
    }

    let mut parts = line.trim().splitn(2, char::is_whitespace);
    let word = match parts.next() {
        Some(word) if !word.is_empty() => word,
        _ => return Err(CommandError::usage(&usage())),
    };
    let subcommand =
        Subcommand::parse(word).ok_or_else(|| CommandError::unknown_subcommand(word))?;
    let arg = parts.next().map(str::trim).filter(|arg| !arg.is_empty());

    match subcommand {
        Subcommand::Help => Ok(CommandReply::text_only(HELP_TEXT)),

        Subcommand::List => {
            let entries = controller.whitelist().render();
            if entries.is_empty() {
                Ok(CommandReply::text_only("Whitelist empty!"))
            } else {
                Ok(CommandReply::text_only(entries.join(", ")))
            }
        }

        Subcommand::Add => {
            let entry = arg
                .ok_or_else(|| CommandError::missing_argument("Missing value to add to whitelist"))?;
            let broadcast = controller
                .apply_local(&MutationOp::Add(entry.to_string()))
                .map_err(CommandError::rejected)?;
            Ok(CommandReply {
                text: format!("Added '{}' to whitelist", entry),
                broadcast,
            })
        }

        Subcommand::Remove => {
            let entry = arg.ok_or_else(|| {
                CommandError::missing_argument("Missing value to remove from whitelist")
            })?;
            let broadcast = controller
                .apply_local(&MutationOp::Remove(entry.to_string()))
                .map_err(CommandError::rejected)?;
            Ok(CommandReply {
                text: format!("Removed '{}' from whitelist", entry),
                broadcast,
            })
        }

        Subcommand::Clear => {
            let broadcast = controller
                .apply_local(&MutationOp::Clear)
                .map_err(CommandError::rejected)?;
            Ok(CommandReply {
                text: "Cleared whitelist".to_string(),
                broadcast,
            })
        }

        Subcommand::Enable => {
            let broadcast = controller
                .apply_local(&MutationOp::Enable)
                .map_err(CommandError::rejected)?;
            Ok(CommandReply {
                text: "Whitelist enabled".to_string(),
                broadcast,
            })
        }

        Subcommand::Disable => {
            let broadcast = controller
                .apply_local(&MutationOp::Disable)
                .map_err(CommandError::rejected)?;
            Ok(CommandReply {
                text: "Whitelist disabled".to_string(),
                broadcast,
            })
        }
    }
}
