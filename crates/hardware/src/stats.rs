//! Simulation statistics collection and reporting.
//!
//! This module tracks the outcome of one replay pass. It provides:
//! 1. **Counters:** Demand hits and misses, memory reads and memory writes.
//! 2. **Derived metrics:** Access count, hit rate and miss rate.
//! 3. **Reports:** A pass label paired with its counters, rendered as text or JSON.

use std::fmt;

use serde::Serialize;

/// Whether a pass runs with the next-line prefetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PrefetchMode {
    /// Demand fills only.
    #[serde(rename = "no-prefetch")]
    Disabled,
    /// Every demand miss also fetches the following block(s).
    #[serde(rename = "with-prefetch")]
    Enabled,
}

impl PrefetchMode {
    /// Both modes, in report order.
    pub const ALL: [Self; 2] = [Self::Disabled, Self::Enabled];

    /// Returns `true` for [`PrefetchMode::Enabled`].
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

impl fmt::Display for PrefetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Disabled => "no-prefetch",
            Self::Enabled => "with-prefetch",
        })
    }
}

/// Counters for a single replay pass.
///
/// Prefetch probes add to `memory_reads` only; `hits` and `misses` count
/// demand accesses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Demand accesses found in the cache.
    pub hits: u64,
    /// Demand accesses not found in the cache.
    pub misses: u64,
    /// Blocks fetched from memory, by demand misses and prefetches.
    pub memory_reads: u64,
    /// Write accesses, each forwarded to memory.
    pub memory_writes: u64,
}

impl RunStats {
    /// Number of demand accesses.
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of demand accesses that hit, or 0.0 for an empty pass.
    pub fn hit_rate(&self) -> f64 {
        match self.accesses() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    /// Fraction of demand accesses that missed, or 0.0 for an empty pass.
    pub fn miss_rate(&self) -> f64 {
        match self.accesses() {
            0 => 0.0,
            total => self.misses as f64 / total as f64,
        }
    }
}

/// Statistics of one pass, labelled with its prefetch mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PassReport {
    /// Pass label.
    pub mode: PrefetchMode,
    /// Counters.
    #[serde(flatten)]
    pub stats: RunStats,
}

impl PassReport {
    /// Prints the report to stdout.
    pub fn print(&self) {
        print!("{self}");
    }
}

impl fmt::Display for PassReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.mode)?;
        writeln!(f, "Cache hits: {}", self.stats.hits)?;
        writeln!(f, "Cache misses: {}", self.stats.misses)?;
        writeln!(f, "Memory reads: {}", self.stats.memory_reads)?;
        writeln!(f, "Memory writes: {}", self.stats.memory_writes)
    }
}
