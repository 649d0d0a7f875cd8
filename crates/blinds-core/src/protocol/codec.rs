//! Codec for the fixed 5-byte module frames.
//!
//! Frames are fixed-length with no length prefix and no escaping, so both
//! directions are infallible: [`encode`] always produces exactly
//! [`FRAME_SIZE`] bytes, and [`decode`] accepts any [`FRAME_SIZE`] bytes.
//! Frames with an unrecognised opcode decode to [`Packet::Unknown`] so the
//! receive loops can reject them by opcode rather than the codec guessing.

use crate::protocol::packet::{set_flags, Opcode, Packet, FRAME_SIZE};

// ── Device id helpers ─────────────────────────────────────────────────────────

/// Composes a 16-bit device id from its high and low wire bytes (big-endian).
pub fn build_id(hi: u8, lo: u8) -> u16 {
    u16::from_be_bytes([hi, lo])
}

/// Splits a 16-bit device id into its `(high, low)` wire bytes.
///
/// Inverse of [`build_id`]: the pair round-trips exactly for all 65536 ids.
pub fn split_id(id: u16) -> (u8, u8) {
    let [hi, lo] = id.to_be_bytes();
    (hi, lo)
}

// ── Encode / decode ───────────────────────────────────────────────────────────

/// Encodes a [`Packet`] into its 5-byte wire frame.
///
/// Absent set-request fields contribute zero bytes in their slot; the flags
/// byte records which fields are populated.
pub fn encode(packet: &Packet) -> [u8; FRAME_SIZE] {
    let mut frame = [0u8; FRAME_SIZE];
    match *packet {
        Packet::Announce {
            id,
            photoresistance,
            servo_position,
        } => {
            frame[0] = Opcode::Announce as u8;
            let (hi, lo) = split_id(id);
            frame[1] = hi;
            frame[2] = lo;
            frame[3] = photoresistance;
            frame[4] = servo_position;
        }
        Packet::SetRequest { id, servo_position } => {
            frame[0] = Opcode::SetRequest as u8;
            if let Some(id) = id {
                frame[1] |= set_flags::ID_PRESENT;
                let (hi, lo) = split_id(id);
                frame[2] = hi;
                frame[3] = lo;
            }
            if let Some(position) = servo_position {
                frame[1] |= set_flags::SERVO_PRESENT;
                frame[4] = position;
            }
        }
        Packet::GetRequest => {
            frame[0] = Opcode::GetRequest as u8;
        }
        Packet::GetResponse {
            id,
            photoresistance,
            servo_position,
        } => {
            frame[0] = Opcode::GetResponse as u8;
            let (hi, lo) = split_id(id);
            frame[1] = hi;
            frame[2] = lo;
            frame[3] = photoresistance;
            frame[4] = servo_position;
        }
        Packet::Unknown { opcode, payload } => {
            frame[0] = opcode;
            frame[1..].copy_from_slice(&payload);
        }
    }
    frame
}

/// Decodes a 5-byte wire frame into a [`Packet`].  Never fails.
pub fn decode(frame: &[u8; FRAME_SIZE]) -> Packet {
    match Opcode::try_from(frame[0]) {
        Ok(Opcode::Announce) => Packet::Announce {
            id: build_id(frame[1], frame[2]),
            photoresistance: frame[3],
            servo_position: frame[4],
        },
        Ok(Opcode::SetRequest) => {
            let flags = frame[1];
            Packet::SetRequest {
                id: (flags & set_flags::ID_PRESENT != 0).then(|| build_id(frame[2], frame[3])),
                servo_position: (flags & set_flags::SERVO_PRESENT != 0).then_some(frame[4]),
            }
        }
        Ok(Opcode::GetRequest) => Packet::GetRequest,
        Ok(Opcode::GetResponse) => Packet::GetResponse {
            id: build_id(frame[1], frame[2]),
            photoresistance: frame[3],
            servo_position: frame[4],
        },
        Err(()) => Packet::Unknown {
            opcode: frame[0],
            payload: [frame[1], frame[2], frame[3], frame[4]],
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
