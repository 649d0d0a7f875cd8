//! Wire protocol for module communication.
//!
//! This module defines the 5-byte frame types and the codec that maps them
//! to and from raw datagram bytes.

pub mod codec;
pub mod packet;
