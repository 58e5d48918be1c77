//! Memory Address types.
//!
//! This module defines the strong address type used by the cache model and the
//! fields an address splits into once a cache geometry is known. It provides the following:
//! 1. **Type Safety:** Keeps raw trace values apart from derived tags and set indices.
//! 2. **Range Checking:** Enforces the 48-bit width of the simulated address space.
//! 3. **Decomposition Output:** The tag / set index / block offset triple.

use std::fmt;

use super::constants::{ADDRESS_BITS, ADDRESS_MASK};

/// A byte address in the simulated 48-bit address space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(pub u64);

impl Address {
    /// Creates an address from a raw value, or `None` if the value does not fit
    /// in [`ADDRESS_BITS`] bits.
    ///
    /// # Arguments
    ///
    /// * `addr` - The raw address value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Option<Self> {
        if addr & !ADDRESS_MASK == 0 {
            Some(Self(addr))
        } else {
            None
        }
    }

    /// Returns the raw address value.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }

    /// Returns the address `bytes` past this one, or `None` when the result
    /// would leave the 48-bit address space.
    ///
    /// Used by the prefetcher to step to the following block; a block past
    /// the top of memory is simply not prefetched.
    pub fn checked_add(&self, bytes: u64) -> Option<Self> {
        self.0.checked_add(bytes).and_then(Self::new)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#0width$x}", self.0, width = (ADDRESS_BITS / 4 + 2) as usize)
    }
}

/// The fields of an [`Address`] under a particular cache geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressFields {
    /// High-order bits identifying the memory block.
    pub tag: u64,
    /// Set the block maps to.
    pub set_index: usize,
    /// Byte within the block. Irrelevant to hit/miss decisions.
    pub block_offset: u64,
}
