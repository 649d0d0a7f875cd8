//! Discover command implementation.

use std::time::Duration;

use blinds_core::discover;

use crate::cli::DiscoverArgs;
use crate::error::CliError;
use crate::output;

/// Run the discover command
pub fn run_discover(args: DiscoverArgs, port: u16, json: bool) -> Result<(), CliError> {
    let window = Duration::from_millis(args.wait);

    if !json {
        println!("Scanning for modules for {} ms...", args.wait);
    }

    let registry = discover(port, window)?;
    let modules = registry.to_sorted_vec();

    println!("{}", output::render_modules(&modules, json));

    if modules.is_empty() {
        return Err(CliError::NoModulesFound);
    }

    Ok(())
}
