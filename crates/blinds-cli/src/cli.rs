//! CLI argument definitions using clap.

use std::net::IpAddr;

use clap::{Args, Parser, Subcommand};

/// BlindLink CLI - discover and control window-blind modules over UDP
#[derive(Parser, Debug)]
#[command(name = "blinds-cli")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// UDP port modules announce on and listen to
    #[arg(long, global = true, default_value = "4210", env = "BLINDS_PORT")]
    pub port: u16,

    /// Request timeout in milliseconds
    #[arg(long, global = true, default_value = "1000", env = "BLINDS_TIMEOUT")]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover modules on the network
    Discover(DiscoverArgs),

    /// Read a module's current state
    Get(GetArgs),

    /// Command a module's id and/or servo position
    Set(SetArgs),
}

// ==================== Discover ====================

#[derive(Args, Debug)]
pub struct DiscoverArgs {
    /// Listening window in milliseconds
    #[arg(short, long, default_value = "1000")]
    pub wait: u64,
}

// ==================== Get ====================

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Module IP address
    pub target: IpAddr,
}

// ==================== Set ====================

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Module IP address
    pub target: IpAddr,

    /// New 16-bit device id (decimal or 0x-prefixed hex)
    #[arg(long, value_parser = parse_device_id)]
    pub id: Option<u16>,

    /// New servo position (0-255)
    #[arg(long)]
    pub servo: Option<u8>,

    /// Confirm the change with a follow-up get
    #[arg(long)]
    pub verify: bool,
}

/// Parses a device id given as decimal or `0x`-prefixed hex.
pub fn parse_device_id(s: &str) -> Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|_| format!("'{s}' is not a valid 16-bit device id"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_device_id_accepts_decimal_and_hex() {
        assert_eq!(parse_device_id("4660"), Ok(0x1234));
        assert_eq!(parse_device_id("0x1234"), Ok(0x1234));
        assert_eq!(parse_device_id("0XFFFF"), Ok(0xFFFF));
        assert_eq!(parse_device_id("0"), Ok(0));
    }

    #[test]
    fn test_parse_device_id_rejects_out_of_range_and_garbage() {
        assert!(parse_device_id("65536").is_err());
        assert!(parse_device_id("0x10000").is_err());
        assert!(parse_device_id("blinds").is_err());
        assert!(parse_device_id("").is_err());
    }

    #[test]
    fn test_cli_parses_discover_with_defaults() {
        // Arrange / Act
        let cli = Cli::try_parse_from(["blinds-cli", "discover"]).expect("parse");

        // Assert
        assert_eq!(cli.port, 4210);
        assert_eq!(cli.timeout, 1000);
        assert!(!cli.json);
        match cli.command {
            Commands::Discover(args) => assert_eq!(args.wait, 1000),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parses_set_with_hex_id_and_servo() {
        // Arrange / Act
        let cli = Cli::try_parse_from([
            "blinds-cli",
            "set",
            "192.168.1.50",
            "--id",
            "0x1234",
            "--servo",
            "171",
            "--verify",
        ])
        .expect("parse");

        // Assert
        match cli.command {
            Commands::Set(args) => {
                assert_eq!(args.target, "192.168.1.50".parse::<IpAddr>().unwrap());
                assert_eq!(args.id, Some(0x1234));
                assert_eq!(args.servo, Some(171));
                assert!(args.verify);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_invalid_target_address() {
        let result = Cli::try_parse_from(["blinds-cli", "get", "not-an-ip"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_global_flags_apply_after_subcommand() {
        let cli = Cli::try_parse_from(["blinds-cli", "discover", "--json", "--port", "5000"])
            .expect("parse");
        assert!(cli.json);
        assert_eq!(cli.port, 5000);
    }
}
