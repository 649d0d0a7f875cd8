//! Frame types for the module wire protocol.
//!
//! Every datagram is exactly [`FRAME_SIZE`] bytes: one opcode byte followed
//! by four payload bytes, interpreted per opcode.  Multi-byte fields are
//! big-endian.
//!
//! ```text
//! byte      0        1        2        3        4
//! announce  0x00     id_hi    id_lo    photo    servo
//! set       0x01     flags    id_hi    id_lo    servo
//! get       0x02     0        0        0        0
//! get-resp  0x10     id_hi    id_lo    photo    servo
//! ```

/// Total size of every frame on the wire, in bytes.
pub const FRAME_SIZE: usize = 5;

// ── Opcodes ───────────────────────────────────────────────────────────────────

/// Opcode byte at frame offset 0, identifying the frame's purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    /// Unsolicited broadcast a module emits to advertise its presence/state.
    Announce = 0x00,
    /// Fire-and-forget command changing a module's id and/or servo position.
    SetRequest = 0x01,
    /// Unicast request for a module's current state.
    GetRequest = 0x02,
    /// A module's reply to a get-request.
    GetResponse = 0x10,
}

impl TryFrom<u8> for Opcode {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        match value {
            0x00 => Ok(Opcode::Announce),
            0x01 => Ok(Opcode::SetRequest),
            0x02 => Ok(Opcode::GetRequest),
            0x10 => Ok(Opcode::GetResponse),
            _ => Err(()),
        }
    }
}

// ── Set-request flags ─────────────────────────────────────────────────────────

/// Bitmask flags at byte 1 of a set-request frame, indicating which optional
/// payload fields are populated.  Absent fields encode as zero and must be
/// ignored by the receiving module.
pub mod set_flags {
    pub const ID_PRESENT: u8 = 0x10;
    pub const SERVO_PRESENT: u8 = 0x01;
}

// ── Frames ────────────────────────────────────────────────────────────────────

/// A decoded 5-byte frame.
///
/// Decoding is total: any 5 bytes are structurally valid, and frames whose
/// opcode byte is not recognised decode to [`Packet::Unknown`].  Deciding
/// which frames to act on is the receive loop's job, not the codec's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Packet {
    /// Broadcast announcement of a module's identity and state.
    Announce {
        id: u16,
        photoresistance: u8,
        servo_position: u8,
    },
    /// Command to change a module's id and/or servo position.  The flags
    /// byte on the wire is derived from which options are populated.
    SetRequest {
        id: Option<u16>,
        servo_position: Option<u8>,
    },
    /// State read request; all payload bytes are zero.
    GetRequest,
    /// State read reply, mirroring the announce payload.
    GetResponse {
        id: u16,
        photoresistance: u8,
        servo_position: u8,
    },
    /// A frame with an unrecognised opcode, preserved byte-for-byte.
    Unknown { opcode: u8, payload: [u8; 4] },
}

impl Packet {
    /// The opcode byte this frame carries at offset 0.
    pub fn opcode(&self) -> u8 {
        match self {
            Packet::Announce { .. } => Opcode::Announce as u8,
            Packet::SetRequest { .. } => Opcode::SetRequest as u8,
            Packet::GetRequest => Opcode::GetRequest as u8,
            Packet::GetResponse { .. } => Opcode::GetResponse as u8,
            Packet::Unknown { opcode, .. } => *opcode,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_try_from_known_values() {
        assert_eq!(Opcode::try_from(0x00), Ok(Opcode::Announce));
        assert_eq!(Opcode::try_from(0x01), Ok(Opcode::SetRequest));
        assert_eq!(Opcode::try_from(0x02), Ok(Opcode::GetRequest));
        assert_eq!(Opcode::try_from(0x10), Ok(Opcode::GetResponse));
    }

    #[test]
    fn test_opcode_try_from_rejects_unknown_values() {
        assert_eq!(Opcode::try_from(0x03), Err(()));
        assert_eq!(Opcode::try_from(0xFF), Err(()));
    }

    #[test]
    fn test_packet_opcode_matches_wire_values() {
        // Arrange
        let get = Packet::GetRequest;
        let unknown = Packet::Unknown {
            opcode: 0x7F,
            payload: [0; 4],
        };

        // Assert
        assert_eq!(get.opcode(), 0x02);
        assert_eq!(unknown.opcode(), 0x7F);
    }

    #[test]
    fn test_set_flags_are_independent_bits() {
        assert_eq!(set_flags::ID_PRESENT & set_flags::SERVO_PRESENT, 0);
        assert_eq!(set_flags::ID_PRESENT | set_flags::SERVO_PRESENT, 0x11);
    }
}
