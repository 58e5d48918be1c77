//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the oldest block in a set, regardless of how recently
//! it was accessed. A line's `order` counts the fills the set has seen since
//! the line was installed; hits leave it alone.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_fill()`: O(W) where W is the number of ways
//!   - `on_hit()`: O(1)
//! - **Best Case:** Streaming accesses where all lines have equal importance
//! - **Worst Case:** Workloads with strong temporal locality (may evict frequently-used lines)

use super::{ReplacementPolicy, touch};
use crate::cache::CacheLine;

/// FIFO Policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct FifoPolicy;

impl ReplacementPolicy for FifoPolicy {
    fn on_fill(&self, set: &mut [CacheLine], way: usize) {
        touch(set, way);
    }

    /// Residency time is all that matters, so hits change nothing.
    fn on_hit(&self, _set: &mut [CacheLine], _way: usize) {}
}
