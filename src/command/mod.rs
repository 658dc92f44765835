//! In-Session Command Surface
//!
//! The `protect` command family: `help`, `list`, `add <entry>`,
//! `remove <entry>`, `clear`, `enable`, `disable`. Each subcommand maps
//! 1:1 onto a session operation; this layer only parses, checks the
//! operator gate the host already decided, and formats replies and
//! rejections. Successful authoritative mutations carry the delta to
//! broadcast back to the caller.

mod dispatch;
mod errors;

pub use dispatch::{dispatch, usage, CommandReply, Subcommand};
pub use errors::{CommandError, CommandErrorCode, CommandResult};
