//! Blocking UDP session layer: discovery and the get/set exchanges.
//!
//! One logical session drives one socket sequentially; there is no internal
//! parallelism and nothing to lock.  Timeouts are true deadlines: before
//! every blocking receive the socket read timeout is set to the remaining
//! budget, so the nominal window bounds the actual wait even when no
//! datagram ever arrives.

use std::io;
use std::net::{SocketAddr, UdpSocket};

use socket2::{Domain, Protocol, Socket, Type};

pub mod discovery;
pub mod requester;

/// Well-known UDP port modules announce on and listen to.
pub const DISCOVERY_PORT: u16 = 4210;

/// Creates the discovery socket: bound to the well-known port on all
/// interfaces, broadcast-capable, with address reuse so a listener can
/// coexist with other tooling on the same port.
pub(crate) fn create_broadcast_socket(port: u16) -> io::Result<UdpSocket> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;

    socket.set_reuse_address(true)?;

    #[cfg(unix)]
    socket.set_reuse_port(true)?;

    socket.set_broadcast(true)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    socket.bind(&addr.into())?;

    Ok(socket.into())
}

/// Returns `true` for OS timeout / would-block errors on a socket whose read
/// timeout has expired.
pub(crate) fn is_timeout_error(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_timeout_error_recognises_timed_out() {
        let e = io::Error::new(io::ErrorKind::TimedOut, "timed out");
        assert!(is_timeout_error(&e));
    }

    #[test]
    fn test_is_timeout_error_recognises_would_block() {
        let e = io::Error::new(io::ErrorKind::WouldBlock, "would block");
        assert!(is_timeout_error(&e));
    }

    #[test]
    fn test_is_timeout_error_returns_false_for_other_errors() {
        let e = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        assert!(!is_timeout_error(&e));
    }

    #[test]
    fn test_create_broadcast_socket_binds_ephemeral_port() {
        // Port 0 lets the OS pick a free port; bind must succeed and the
        // socket must report broadcast capability.
        let socket = create_broadcast_socket(0).expect("bind");
        assert!(socket.broadcast().expect("broadcast flag"));
        assert_ne!(socket.local_addr().expect("local addr").port(), 0);
    }
}
