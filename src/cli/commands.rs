//! CLI command implementations
//!
//! The console runs a plain authoritative session: command lines go
//! through the same dispatch path the in-game command surface uses, so
//! every reply and rejection text matches what a connected operator
//! would see.

use std::path::Path;

use crate::command::{dispatch, usage};
use crate::config::StoredConfig;
use crate::pattern::parse_query;
use crate::session::{Actor, SessionController};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{prompt, read_line, write_line};

/// Parse arguments and dispatch to a command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    match cli.command {
        Command::Init { config } => init(&config),
        Command::Console { config } => console(&config),
        Command::Check { config, state } => check(&config, &state),
    }
}

/// Create a default configuration document.
///
/// Refuses to overwrite an existing one.
pub fn init(config: &Path) -> CliResult<()> {
    if config.exists() {
        return Err(CliError::already_initialized(config.display().to_string()));
    }

    StoredConfig::default().save(config)?;
    write_line(&format!("Created {}", config.display()))
}

/// Run an interactive authoritative session over stdin.
pub fn console(config: &Path) -> CliResult<()> {
    let mut controller = SessionController::load(config, true)?;

    write_line(&format!("Usage: {}", usage()))?;
    write_line("Type 'exit' to quit.")?;

    loop {
        prompt()?;
        let line = match read_line()? {
            Some(line) => line,
            None => break,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        // Console sessions have no connected peers; the broadcast op is
        // dropped here, not suppressed at the session layer.
        match dispatch(&mut controller, line, true) {
            Ok(reply) => write_line(&reply.text)?,
            Err(e) => write_line(&e.to_string())?,
        }
    }

    Ok(())
}

/// Test one concrete state against the stored whitelist.
pub fn check(config: &Path, state_text: &str) -> CliResult<()> {
    let controller = SessionController::load(config, true)?;

    let (id, state) =
        parse_query(state_text).map_err(|e| CliError::invalid_query(e.to_string()))?;
    let allowed = controller.permits(&Actor::player(), &id, &state);

    write_line(if allowed { "allowed" } else { "denied" })
}
