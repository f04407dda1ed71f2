// CLI module
// Command-line interface, argument parsing, and command handlers

mod args;
mod commands;

pub use args::{AdminAuth, AdminCommand, CliArgs, Command, OpenArgs};
pub use commands::run;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// On invalid arguments, missing required arguments, or `--help`, clap
/// prints the appropriate message and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
