//! Next-Line Prefetcher.
//!
//! A spatial prefetcher that fetches the block(s) immediately following a
//! block that missed. Hits never trigger it. Targets past the top of the
//! 48-bit address space are dropped.

use super::Prefetcher;
use crate::common::addr::Address;

/// Next-Line Prefetcher state.
#[derive(Debug, Clone)]
pub struct NextLinePrefetcher {
    /// Size of a cache block in bytes.
    line_bytes: u64,
    /// Number of subsequent blocks to prefetch (prefetch degree).
    degree: usize,
}

impl NextLinePrefetcher {
    /// Creates a new Next-Line prefetcher.
    ///
    /// # Arguments
    ///
    /// * `line_bytes` - The size of a cache block in bytes; a power of two.
    /// * `degree` - The number of blocks to prefetch ahead. Zero is treated as one.
    pub fn new(line_bytes: usize, degree: usize) -> Self {
        Self {
            line_bytes: line_bytes as u64,
            degree: degree.max(1),
        }
    }

    /// Returns the effective prefetch degree.
    pub const fn degree(&self) -> usize {
        self.degree
    }
}

impl Prefetcher for NextLinePrefetcher {
    /// Returns the start addresses of the next `degree` blocks after a miss.
    fn observe(&mut self, addr: Address, hit: bool) -> Vec<Address> {
        if hit {
            return Vec::new();
        }

        let block = Address(addr.val() & !(self.line_bytes - 1));
        (1..=self.degree as u64)
            .map_while(|k| {
                self.line_bytes
                    .checked_mul(k)
                    .and_then(|offset| block.checked_add(offset))
            })
            .collect()
    }
}
