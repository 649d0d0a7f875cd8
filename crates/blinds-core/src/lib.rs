//! # blinds-core
//!
//! Shared library for BlindLink containing the wire protocol codec, the
//! module registry, and the blocking UDP session layer used to talk to
//! window-blind controller modules on the local network.
//!
//! A *module* is a small embedded device driving one set of blinds: it
//! carries a 16-bit identifier, a photoresistor reading, and a servo
//! position, and speaks a fixed 5-byte datagram protocol on UDP port 4210.
//!
//! The crate is organised in three layers:
//!
//! - **`protocol`** – How bytes travel over the network.  Every datagram is
//!   exactly five bytes: an opcode followed by four payload bytes.  The
//!   codec maps those frames to and from the typed [`Packet`] enum.
//!
//! - **`domain`** – The in-memory read model: [`Module`] (one device's
//!   address and last-known state) and [`ModuleRegistry`] (the
//!   address-keyed collection built during discovery).
//!
//! - **`session`** – Socket-level operations: [`discover`] collects
//!   broadcast announcements for a bounded window, and [`Requester`] drives
//!   the unicast get/set exchanges against a single module.
//!
//! All socket I/O is synchronous and single-threaded: one logical session
//! drives one socket sequentially, and every blocking receive carries a
//! deadline so the nominal timeout bounds the actual wait.

pub mod domain;
pub mod protocol;
pub mod session;

// Re-export the most-used types at the crate root so callers can write
// `blinds_core::Module` instead of `blinds_core::domain::module::Module`.
pub use domain::module::{Module, ModuleRegistry};
pub use protocol::codec::{build_id, decode, encode, split_id};
pub use protocol::packet::{Opcode, Packet, FRAME_SIZE};
pub use session::discovery::{discover, discover_on, DiscoveryError};
pub use session::requester::{RequestError, Requester, RequesterConfig, SetCommand};
pub use session::DISCOVERY_PORT;
