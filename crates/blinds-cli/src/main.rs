//! BlindLink CLI — terminal front end for discovering and controlling
//! window-blind modules over UDP.
//!
//! Enables scripted and headless use of the `blinds-core` session layer:
//! `discover` scans for announcements, `get` reads one module's state, and
//! `set` commands its id and/or servo position.

mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::{exit_codes, CliError};

fn main() {
    // Initialise structured logging on stderr so stdout stays parseable.
    // Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Discover(args) => commands::run_discover(args, cli.port, cli.json),
        Commands::Get(args) => commands::run_get(args, cli.port, cli.timeout, cli.json),
        Commands::Set(args) => commands::run_set(args, cli.port, cli.timeout, cli.json),
    }
}
