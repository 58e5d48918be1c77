//! Hardware Prefetcher implementations.
//!
//! This module contains the interface and implementations for prefetchers
//! that speculatively bring blocks into the cache ahead of demand.

/// Next-line prefetcher (prefetches the blocks following a miss).
pub mod next_line;

pub use self::next_line::NextLinePrefetcher;

use std::fmt;

use crate::common::addr::Address;

/// Trait for cache prefetcher implementations.
///
/// Prefetchers observe demand accesses and generate prefetch requests.
/// The cache probes each returned address without counting it as a hit or
/// a miss, and a probe never feeds back into the prefetcher.
pub trait Prefetcher: fmt::Debug + Send + Sync {
    /// Observes a demand access and generates prefetch addresses.
    ///
    /// # Arguments
    ///
    /// * `addr` - The address that was accessed
    /// * `hit` - Whether the access was a cache hit
    ///
    /// # Returns
    ///
    /// The addresses to prefetch, in order. Empty if no prefetches are needed.
    fn observe(&mut self, addr: Address, hit: bool) -> Vec<Address>;
}
