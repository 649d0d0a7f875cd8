//! Get command implementation.

use std::net::UdpSocket;
use std::time::Duration;

use blinds_core::{Module, Requester, RequesterConfig};

use crate::cli::GetArgs;
use crate::error::CliError;
use crate::output;

/// Run the get command
pub fn run_get(args: GetArgs, port: u16, timeout_ms: u64, json: bool) -> Result<(), CliError> {
    let socket = UdpSocket::bind("0.0.0.0:0")?;
    let requester = Requester::with_config(
        &socket,
        RequesterConfig {
            port,
            timeout: Duration::from_millis(timeout_ms),
        },
    );

    // Zeroed placeholder: an unchanged result means the module never replied.
    let placeholder = Module::new(args.target, 0, 0, 0);
    let module = requester.get(&placeholder)?;

    if module == placeholder {
        return Err(CliError::NoReply(args.target));
    }

    println!("{}", output::render_module(&module, json));
    Ok(())
}
