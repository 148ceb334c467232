#![warn(missing_docs)]

//! Entry point for the `waypost-sim` binary.

mod cli;
mod console;
mod error;
mod runner;
mod script;

use std::process;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, registry};

use crate::{
    cli::{Cli, Commands},
    error::Result,
    script::Script,
};

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, and dispatch to the chosen subcommand.
fn run() -> Result<()> {
    let Cli { log, command } = Cli::parse();
    let env_filter = logging::env_filter_from_spec(&log.spec());
    registry()
        .with(env_filter)
        .with(fmt::layer().without_time())
        .try_init()
        .ok();

    match command {
        Commands::Run { script } => {
            let loaded = Script::load(&script)?;
            for (index, report) in runner::run(&loaded)?.iter().enumerate() {
                println!("{:>3}. {report}", index + 1);
            }
            Ok(())
        }
        Commands::Check { script } => {
            let loaded = Script::load(&script)?;
            loaded.validate()?;
            info!(
                routes = loaded.routes.len(),
                steps = loaded.steps.len(),
                "script_ok"
            );
            println!(
                "{}: {} routes, {} steps",
                script.display(),
                loaded.routes.len(),
                loaded.steps.len()
            );
            Ok(())
        }
    }
}
