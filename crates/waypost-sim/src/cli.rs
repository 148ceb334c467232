//! Command-line interface definitions for waypost-sim.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use logging::LogArgs;

/// Command-line interface for the `waypost-sim` binary.
#[derive(Parser, Debug)]
#[command(
    name = "waypost-sim",
    about = "Drive waypost navigation from a RON script",
    version
)]
pub struct Cli {
    /// Logging controls shared across waypost binaries.
    #[command(flatten)]
    pub log: LogArgs,

    /// What to do with the script.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level simulator commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a script, printing the stack and modals after each step.
    Run {
        /// Path to the script (RON).
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,
    },
    /// Parse a script and validate its routes without running it.
    Check {
        /// Path to the script (RON).
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,
    },
}
