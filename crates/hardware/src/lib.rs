//! Trace-driven cache simulator library.
//!
//! This crate models a single set-associative cache replaying a memory-access trace:
//! 1. **Configuration:** Cache size, block size, associativity and replacement policy,
//!    validated into a [`cache::Geometry`] before anything is simulated.
//! 2. **Cache:** Tag/set/offset decomposition, per-set lookup and FIFO/LRU bookkeeping.
//! 3. **Prefetch:** A next-line prefetcher triggered by demand misses.
//! 4. **Simulation:** Trace decoding and the two replay passes (without and with prefetch).
//! 5. **Statistics:** Hit, miss, memory-read and memory-write counters per pass.
//!
//! ```
//! use cachesim_core::{CacheConfig, Trace, simulate};
//!
//! let trace: Trace = "0x0: R 0x0\n0x4: R 0x20\n#eof".parse().unwrap();
//! let [plain, prefetched] = simulate(&CacheConfig::default(), &trace).unwrap();
//! assert_eq!(plain.stats.misses, 2);
//! assert_eq!(prefetched.stats.hits, 1);
//! ```

/// Set-associative cache model (geometry, lines, replacement policies).
pub mod cache;
/// Common types and constants (addresses, access types, errors).
pub mod common;
/// Simulator configuration (defaults, enums, cache configuration).
pub mod config;
/// Prefetchers (next-line).
pub mod prefetch;
/// Trace decoding and replay.
pub mod sim;
/// Per-pass statistics and reports.
pub mod stats;

/// Cache configuration; use `CacheConfig::default()` or deserialize from JSON.
pub use crate::config::CacheConfig;
/// Top-level error type for front ends.
pub use crate::common::error::SimError;
/// Trace types and pass drivers.
pub use crate::sim::{Trace, TraceEntry, TraceSimulator, simulate, simulate_parallel};
/// Report types.
pub use crate::stats::{PassReport, PrefetchMode, RunStats};
