//! Cache Replacement Policies.
//!
//! Implements the age-update rules applied to the lines of a set on fills and hits.
//! Both policies share one primitive, [`touch`], and differ only in whether a
//! hit triggers it. Victim selection lives in the cache itself and is the same
//! for every policy: the line with the largest `order` goes first.
//!
//! # Policies
//!
//! - `Fifo`: First-In, First-Out.
//! - `Lru`: Least Recently Used.

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;

use std::fmt;

use super::CacheLine;
use crate::config::ReplacementPolicy as PolicyType;

/// Trait for cache replacement policies.
///
/// Policies are stateless; all of their bookkeeping lives in the `order`
/// field of each [`CacheLine`].
pub trait ReplacementPolicy: fmt::Debug + Send + Sync {
    /// Updates line ages after a new block was installed in `way`.
    ///
    /// # Arguments
    ///
    /// * `set` - The lines of the set that received the block.
    /// * `way` - The way index within the set that was filled.
    fn on_fill(&self, set: &mut [CacheLine], way: usize);

    /// Updates line ages after a demand access hit `way`.
    ///
    /// # Arguments
    ///
    /// * `set` - The lines of the set that was hit.
    /// * `way` - The way index within the set that was hit.
    fn on_hit(&self, set: &mut [CacheLine], way: usize);
}

/// Ages every line in `set` by one and makes `way` the youngest.
///
/// # Panics
///
/// Panics if `way` is outside the set.
pub fn touch(set: &mut [CacheLine], way: usize) {
    for line in set.iter_mut() {
        line.order = line.order.saturating_add(1);
    }
    set[way].order = 0;
}

/// Builds the policy object for a configured policy type.
pub fn build(policy: PolicyType) -> Box<dyn ReplacementPolicy> {
    match policy {
        PolicyType::Fifo => Box::new(FifoPolicy),
        PolicyType::Lru => Box::new(LruPolicy),
    }
}
