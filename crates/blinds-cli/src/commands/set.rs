//! Set command implementation.

use std::net::UdpSocket;
use std::time::Duration;

use blinds_core::{Module, Requester, RequesterConfig, SetCommand};

use crate::cli::SetArgs;
use crate::error::CliError;
use crate::output;

/// Run the set command
pub fn run_set(args: SetArgs, port: u16, timeout_ms: u64, json: bool) -> Result<(), CliError> {
    if args.id.is_none() && args.servo.is_none() {
        return Err(CliError::InvalidArgument(
            "at least one of --id or --servo is required".to_string(),
        ));
    }

    let socket = UdpSocket::bind("0.0.0.0:0")?;
    let requester = Requester::with_config(
        &socket,
        RequesterConfig {
            port,
            timeout: Duration::from_millis(timeout_ms),
        },
    );
    let module = Module::new(args.target, 0, 0, 0);

    let mut command = SetCommand::new();
    if let Some(id) = args.id {
        command = command.with_id(id);
    }
    if let Some(servo) = args.servo {
        command = command.with_servo_position(servo);
    }

    requester.set(&module, &command)?;

    if !json {
        println!("Set request sent to {}.", args.target);
    }

    if args.verify {
        // The set is fire-and-forget; only a follow-up get can confirm it.
        let confirmed = requester.get(&module)?;
        if confirmed == module {
            return Err(CliError::NoReply(args.target));
        }
        println!("{}", output::render_module(&confirmed, json));
    } else if json {
        println!(
            "{}",
            serde_json::json!({ "sent": true, "target": args.target })
        );
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::exit_codes;

    #[test]
    fn test_run_set_rejects_command_with_no_fields() {
        // Arrange
        let args = SetArgs {
            target: "192.168.1.50".parse().unwrap(),
            id: None,
            servo: None,
            verify: false,
        };

        // Act
        let result = run_set(args, 4210, 100, false);

        // Assert – validation fails before any socket is touched
        match result {
            Err(CliError::InvalidArgument(msg)) => {
                assert!(msg.contains("--id"));
                assert_eq!(
                    CliError::InvalidArgument(msg).exit_code(),
                    exit_codes::INVALID_ARGS
                );
            }
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }
}
