//! Command surface error types
//!
//! Every failure maps to a human-readable rejection message; none are
//! retried and none crash the process.

use std::fmt;

use crate::session::MutationError;

/// Command error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandErrorCode {
    /// No subcommand given
    Usage,
    /// Unrecognized subcommand word
    UnknownSubcommand,
    /// Subcommand requires an argument that was not given
    MissingArgument,
    /// Caller is not an operator
    PermissionDenied,
    /// The session rejected the mutation
    Rejected,
}

impl CommandErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usage => "WARD_CMD_USAGE",
            Self::UnknownSubcommand => "WARD_CMD_UNKNOWN_SUBCOMMAND",
            Self::MissingArgument => "WARD_CMD_MISSING_ARGUMENT",
            Self::PermissionDenied => "WARD_CMD_PERMISSION_DENIED",
            Self::Rejected => "WARD_CMD_REJECTED",
        }
    }
}

/// Command error
#[derive(Debug)]
pub struct CommandError {
    code: CommandErrorCode,
    message: String,
}

impl CommandError {
    /// Create a new command error
    pub fn new(code: CommandErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// No subcommand given
    pub fn usage(usage: &str) -> Self {
        Self::new(CommandErrorCode::Usage, format!("Usage: {}", usage))
    }

    /// Unrecognized subcommand
    pub fn unknown_subcommand(word: &str) -> Self {
        Self::new(
            CommandErrorCode::UnknownSubcommand,
            format!("Invalid sub-command: {}", word),
        )
    }

    /// Missing required argument
    pub fn missing_argument(message: impl Into<String>) -> Self {
        Self::new(CommandErrorCode::MissingArgument, message)
    }

    /// Caller is not an operator
    pub fn permission_denied() -> Self {
        Self::new(
            CommandErrorCode::PermissionDenied,
            "You do not have permission to use this command",
        )
    }

    /// The session rejected the mutation; the rejection message is shown
    /// verbatim
    pub fn rejected(error: MutationError) -> Self {
        Self::new(CommandErrorCode::Rejected, error.to_string())
    }

    /// Get the error code
    pub fn code(&self) -> CommandErrorCode {
        self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CommandError {}

/// Command result type
pub type CommandResult<T> = Result<T, CommandError>;
