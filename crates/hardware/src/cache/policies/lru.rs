//! Least Recently Used (LRU) Replacement Policy.
//!
//! This policy evicts the block that has not been accessed for the longest time.
//! Every fill and every hit makes the touched line the youngest in its set, so
//! `order` ranks lines by recency of last use.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_fill()`: O(W) where W is the number of ways
//!   - `on_hit()`: O(W)
//! - **Best Case:** Working sets that fit in a set's ways
//! - **Worst Case:** Scanning patterns larger than cache capacity (thrashing)

use super::{ReplacementPolicy, touch};
use crate::cache::CacheLine;

/// LRU Policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    fn on_fill(&self, set: &mut [CacheLine], way: usize) {
        touch(set, way);
    }

    fn on_hit(&self, set: &mut [CacheLine], way: usize) {
        touch(set, way);
    }
}
