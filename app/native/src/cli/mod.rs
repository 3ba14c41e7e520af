//! Command-line interface for Panes.
//!
//! The CLI drives the library directly: it builds a [`crate::manager::WindowManager`]
//! from the loaded configuration, runs one command and exits.

mod commands;
mod output;

use clap::Parser;
pub use commands::{Cli, Commands, ConfigCommands};

use crate::error::PanesResult;

/// Parses command-line arguments and executes the selected command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> PanesResult<()> {
    let cli = Cli::parse();
    cli.execute()
}
