//! The [`Command`] trait implemented by every bsmapstats subcommand.

use anyhow::Result;
use enum_dispatch::enum_dispatch;

/// Trait implemented by all bsmapstats CLI commands.
///
/// `command_line` is the full invocation, logged for provenance.
#[enum_dispatch]
pub trait Command {
    #[allow(clippy::missing_errors_doc)]
    fn execute(&self, command_line: &str) -> Result<()>;
}
