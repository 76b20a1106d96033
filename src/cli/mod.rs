//! Command-line interface for sonority.
//!
//! Without a subcommand the GUI launches. Subcommands inspect the
//! configuration and offline library files without opening a window.

mod commands;

pub use commands::{Cli, Commands, run_command};
