//! Error types for the BlindLink CLI.
//!
//! `CliError` wraps the session-layer errors from `blinds-core` and adds
//! CLI-specific variants, each mapped to a process exit code.

use std::net::IpAddr;

use blinds_core::{DiscoveryError, RequestError};
use thiserror::Error;

/// Exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NETWORK_ERROR: i32 = 2;
    pub const INVALID_ARGS: i32 = 3;
}

/// Main error type for the CLI
#[derive(Debug, Error)]
pub enum CliError {
    #[error("discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("request failed: {0}")]
    Request(#[from] RequestError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no modules found")]
    NoModulesFound,

    #[error("no response from {0} within the timeout")]
    NoReply(IpAddr),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Discovery(_) | CliError::Request(_) | CliError::NoReply(_) => {
                exit_codes::NETWORK_ERROR
            }
            CliError::Io(_) | CliError::NoModulesFound => exit_codes::GENERAL_ERROR,
            CliError::InvalidArgument(_) => exit_codes::INVALID_ARGS,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
