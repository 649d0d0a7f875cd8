//! The module read model and the address-keyed registry built by discovery.

use std::collections::HashMap;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

// ── Module ────────────────────────────────────────────────────────────────────

/// One physical window-blind controller on the network.
///
/// The address is the device's identity and never changes once the value is
/// created; the remaining fields are the last state heard from the device.
/// State updates produce a *new* `Module` (see [`Module::with_state`]) so
/// every mutation site is an explicit rebind, never an aliased write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Network endpoint identity; the registry's dedup key.
    pub address: IpAddr,
    /// 16-bit device identifier, big-endian on the wire.
    pub id: u16,
    /// 8-bit light-sensor reading.
    pub photoresistance: u8,
    /// 8-bit actuator position.
    pub servo_position: u8,
}

impl Module {
    pub fn new(address: IpAddr, id: u16, photoresistance: u8, servo_position: u8) -> Self {
        Self {
            address,
            id,
            photoresistance,
            servo_position,
        }
    }

    /// Returns a copy of this module carrying the given state.
    ///
    /// The address is preserved; it is immutable for the life of the value.
    pub fn with_state(&self, id: u16, photoresistance: u8, servo_position: u8) -> Self {
        Self {
            address: self.address,
            id,
            photoresistance,
            servo_position,
        }
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

/// Deduplicating collection of [`Module`]s keyed by network address.
///
/// Exactly one entry exists per distinct address.  Insertion is
/// first-write-wins: the state recorded for an address is the first
/// announcement heard from it, and entries are never removed while the
/// registry lives.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: HashMap<IpAddr, Module>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `module` if its address is not yet known.
    ///
    /// Returns `true` when the module was inserted, `false` when the address
    /// was already present (the stored state is left untouched).
    pub fn insert_if_absent(&mut self, module: Module) -> bool {
        use std::collections::hash_map::Entry;
        match self.modules.entry(module.address) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(module);
                true
            }
        }
    }

    /// Replaces the stored state for an already-known address.
    ///
    /// This is the explicit path for folding a get-response back into the
    /// registry.  Returns `false` (and stores nothing) when the address was
    /// never discovered; the registry only ever grows through
    /// [`insert_if_absent`](Self::insert_if_absent).
    pub fn apply_update(&mut self, module: &Module) -> bool {
        match self.modules.get_mut(&module.address) {
            Some(stored) => {
                *stored = module.clone();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, address: &IpAddr) -> Option<&Module> {
        self.modules.get(address)
    }

    pub fn contains(&self, address: &IpAddr) -> bool {
        self.modules.contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// All modules sorted by address, for stable listing.
    pub fn to_sorted_vec(&self) -> Vec<Module> {
        let mut modules: Vec<Module> = self.modules.values().cloned().collect();
        modules.sort_by_key(|m| m.address);
        modules
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
