//! Trace loading and replay.
//!
//! Provides the trace reader and the simulator that replays a trace against
//! a cache, once without and once with prefetching.

/// Trace replay against a single cache.
pub mod simulator;

/// Trace decoding.
pub mod trace;

pub use self::simulator::{TraceSimulator, run_pass, simulate, simulate_parallel};
pub use self::trace::{Trace, TraceEntry};
