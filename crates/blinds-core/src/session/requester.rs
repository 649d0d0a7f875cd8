//! Unicast get/set exchanges with a single module.
//!
//! A get exchange is request-response: the get-request frame goes to the
//! module's address and the requester listens until a matching get-response
//! arrives or the deadline passes.  Listening starts immediately after the
//! send, so a module that replies fast is never missed.  A set request is
//! fire-and-forget: nothing is awaited, and the only way to observe the
//! effect is a follow-up get.
//!
//! Per exchange the protocol state is `IDLE → SENT → {MATCHED → APPLIED} |
//! TIMED_OUT`; for a set it collapses to `IDLE → SENT → TERMINAL`.

use std::net::{SocketAddr, UdpSocket};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::module::Module;
use crate::protocol::codec::{decode, encode};
use crate::protocol::packet::{Packet, FRAME_SIZE};

use super::{is_timeout_error, DISCOVERY_PORT};

/// Errors that can occur while exchanging frames with a module.
///
/// A get that hears no reply is *not* an error; it returns the input module
/// unchanged.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request frame could not be sent.
    #[error("failed to send request to {dest}: {source}")]
    SendFailed {
        dest: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    /// An I/O error occurred while waiting for the response.
    #[error("recv error: {0}")]
    Recv(std::io::Error),
}

/// Configuration for a [`Requester`].
#[derive(Debug, Clone)]
pub struct RequesterConfig {
    /// Destination port requests are sent to on the module's address.
    pub port: u16,
    /// Deadline for the receive phase of a get exchange.
    pub timeout: Duration,
}

impl Default for RequesterConfig {
    fn default() -> Self {
        Self {
            port: DISCOVERY_PORT,
            timeout: Duration::from_millis(1000),
        }
    }
}

/// The fields a set request carries.
///
/// Each field is an explicit present/absent choice; the wire flags byte is
/// derived from which fields are populated, and a module ignores the slots
/// of absent fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetCommand {
    pub id: Option<u16>,
    pub servo_position: Option<u8>,
}

impl SetCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: u16) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_servo_position(mut self, position: u8) -> Self {
        self.servo_position = Some(position);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.servo_position.is_none()
    }
}

/// Drives get/set exchanges against modules over a borrowed socket.
///
/// The socket's read timeout is adjusted during a get exchange.
pub struct Requester<'a> {
    socket: &'a UdpSocket,
    config: RequesterConfig,
}

impl<'a> Requester<'a> {
    /// Creates a requester with the default port and timeout.
    pub fn new(socket: &'a UdpSocket) -> Self {
        Self::with_config(socket, RequesterConfig::default())
    }

    pub fn with_config(socket: &'a UdpSocket, config: RequesterConfig) -> Self {
        Self { socket, config }
    }

    /// Sends a get-request to `module` and waits for its reply.
    ///
    /// A datagram is accepted as the answer only when its sender IP equals
    /// the module's address and its opcode is get-response; everything else
    /// is discarded and the wait continues.  On a match, returns a new
    /// [`Module`] carrying the reported state (the caller rebinds).  When
    /// the deadline passes without a match, returns the input module
    /// unchanged — no update occurred.
    ///
    /// # Errors
    ///
    /// Only transport failures: [`RequestError::SendFailed`] /
    /// [`RequestError::Recv`].
    pub fn get(&self, module: &Module) -> Result<Module, RequestError> {
        let dest = SocketAddr::new(module.address, self.config.port);
        let frame = encode(&Packet::GetRequest);
        self.socket
            .send_to(&frame, dest)
            .map_err(|source| RequestError::SendFailed { dest, source })?;
        debug!("get-request sent to {dest}");

        let deadline = Instant::now() + self.config.timeout;
        let mut buf = [0u8; 64];

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                debug!("no response from {} within {:?}", module.address, self.config.timeout);
                return Ok(module.clone());
            }
            self.socket
                .set_read_timeout(Some(remaining))
                .map_err(RequestError::Recv)?;

            let (len, src) = match self.socket.recv_from(&mut buf) {
                Ok(pair) => pair,
                Err(ref e) if is_timeout_error(e) => {
                    debug!("no response from {} within {:?}", module.address, self.config.timeout);
                    return Ok(module.clone());
                }
                Err(e) => return Err(RequestError::Recv(e)),
            };

            // Modules reply from an arbitrary source port; the address
            // identity is the IP alone.
            if src.ip() != module.address {
                debug!("discarding datagram from unexpected sender {src}");
                continue;
            }

            let frame: &[u8; FRAME_SIZE] = match buf[..len].try_into() {
                Ok(frame) => frame,
                Err(_) => {
                    debug!("discarding {len}-byte datagram from {src}");
                    continue;
                }
            };

            match decode(frame) {
                Packet::GetResponse {
                    id,
                    photoresistance,
                    servo_position,
                } => {
                    debug!(
                        "get-response from {}: id {id:#06x}, photoresistance {photoresistance}, servo {servo_position}",
                        module.address
                    );
                    return Ok(module.with_state(id, photoresistance, servo_position));
                }
                other => {
                    debug!(
                        "ignoring frame with opcode {:#04x} while awaiting get-response",
                        other.opcode()
                    );
                }
            }
        }
    }

    /// Builds the set-request frame from `command` and sends it once.
    ///
    /// No acknowledgment is solicited and none is awaited; whether the
    /// module applied the change can only be confirmed by a follow-up
    /// [`get`](Self::get).
    ///
    /// # Errors
    ///
    /// [`RequestError::SendFailed`] on a transport-level send failure.
    pub fn set(&self, module: &Module, command: &SetCommand) -> Result<(), RequestError> {
        if command.is_empty() {
            warn!("set-request to {} carries no fields", module.address);
        }
        let dest = SocketAddr::new(module.address, self.config.port);
        let frame = encode(&Packet::SetRequest {
            id: command.id,
            servo_position: command.servo_position,
        });
        self.socket
            .send_to(&frame, dest)
            .map_err(|source| RequestError::SendFailed { dest, source })?;
        debug!(
            "set-request sent to {dest} (id: {:?}, servo: {:?})",
            command.id, command.servo_position
        );
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
