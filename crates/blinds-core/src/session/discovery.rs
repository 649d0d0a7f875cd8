//! Broadcast-discovery listener.
//!
//! Modules advertise themselves by broadcasting a 5-byte announce frame on
//! the well-known port.  Discovery binds (or borrows) a UDP socket, collects
//! announcements for a bounded window, and returns the resulting
//! [`ModuleRegistry`].
//!
//! # How announcement discovery works
//!
//! UDP broadcast reaches every host on the LAN segment, which makes it the
//! natural channel for "who is out there":
//!
//! 1. Each module periodically sends its announce frame to the LAN broadcast
//!    address on port 4210.
//! 2. The listener receives whatever arrives on that port during the window
//!    and records the *sender address* of each valid announce frame — the
//!    address, not the payload, is a module's identity.
//! 3. Repeat announcements from a known address are ignored; the first
//!    heard state wins for the lifetime of the registry.
//!
//! The window is a hard deadline: the remaining budget is attached to every
//! blocking receive as a read timeout, so a silent network ends the scan on
//! time with an empty registry.

use std::net::UdpSocket;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::module::{Module, ModuleRegistry};
use crate::protocol::codec::decode;
use crate::protocol::packet::{Packet, FRAME_SIZE};

use super::{create_broadcast_socket, is_timeout_error};

/// Error type for discovery operations.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The UDP socket could not be bound.
    #[error("failed to bind discovery socket on port {port}: {source}")]
    BindFailed {
        port: u16,
        #[source]
        source: std::io::Error,
    },
    /// An I/O error occurred while receiving a datagram.
    #[error("recv error: {0}")]
    Recv(std::io::Error),
}

/// Listens for module announcements on `port` for the given window and
/// returns the populated registry (empty if nothing was heard).
///
/// Opens its own broadcast-capable socket and releases it on every exit
/// path; use [`discover_on`] to run the same loop over an existing socket.
///
/// # Errors
///
/// [`DiscoveryError::BindFailed`] when the socket cannot be bound;
/// [`DiscoveryError::Recv`] on transport errors other than a timeout.
pub fn discover(port: u16, window: Duration) -> Result<ModuleRegistry, DiscoveryError> {
    let socket =
        create_broadcast_socket(port).map_err(|source| DiscoveryError::BindFailed { port, source })?;
    info!("listening for module announcements on UDP {port}");
    collect_announcements(&socket, window)
}

/// Runs the discovery loop over a caller-provided socket.
///
/// The socket's read timeout is adjusted while the loop runs.
pub fn discover_on(socket: &UdpSocket, window: Duration) -> Result<ModuleRegistry, DiscoveryError> {
    collect_announcements(socket, window)
}

fn collect_announcements(
    socket: &UdpSocket,
    window: Duration,
) -> Result<ModuleRegistry, DiscoveryError> {
    let mut registry = ModuleRegistry::new();
    let mut buf = [0u8; 64];
    let deadline = Instant::now() + window;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        socket
            .set_read_timeout(Some(remaining))
            .map_err(DiscoveryError::Recv)?;

        let (len, src) = match socket.recv_from(&mut buf) {
            Ok(pair) => pair,
            Err(ref e) if is_timeout_error(e) => break,
            Err(e) => return Err(DiscoveryError::Recv(e)),
        };

        let frame: &[u8; FRAME_SIZE] = match buf[..len].try_into() {
            Ok(frame) => frame,
            Err(_) => {
                debug!("discarding {len}-byte datagram from {src}");
                continue;
            }
        };

        match decode(frame) {
            Packet::Announce {
                id,
                photoresistance,
                servo_position,
            } => {
                let module = Module::new(src.ip(), id, photoresistance, servo_position);
                if registry.insert_if_absent(module) {
                    info!("discovered module {id:#06x} at {}", src.ip());
                } else {
                    debug!("repeat announcement from {} ignored", src.ip());
                }
            }
            other => {
                debug!(
                    "ignoring frame with opcode {:#04x} from {src} on the discovery port",
                    other.opcode()
                );
            }
        }
    }

    info!(
        "discovery window elapsed; {} module(s) found",
        registry.len()
    );
    Ok(registry)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_binds_well_known_style_socket() {
        // Port 0 keeps the test free of port conflicts; the bind path is the
        // same one the well-known port takes.
        let registry = discover(0, Duration::from_millis(50)).expect("discover");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_discover_on_empty_window_returns_immediately() {
        // Arrange
        let socket = UdpSocket::bind("127.0.0.1:0").expect("bind");

        // Act
        let start = Instant::now();
        let registry = discover_on(&socket, Duration::ZERO).expect("discover");

        // Assert – a zero window never blocks
        assert!(registry.is_empty());
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
