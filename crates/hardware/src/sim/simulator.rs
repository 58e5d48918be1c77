//! Trace Simulator: replays a trace against one cache instance.
//!
//! Each pass owns its own cache, prefetcher and counters. The two-pass
//! drivers build a fresh simulator per [`PrefetchMode`], so nothing is shared
//! between passes and they can just as well run on separate threads.

use std::panic;
use std::thread;

use tracing::{debug, trace};

use super::trace::{Trace, TraceEntry};
use crate::cache::{CacheSim, Geometry};
use crate::common::error::ConfigError;
use crate::config::CacheConfig;
use crate::prefetch::{NextLinePrefetcher, Prefetcher};
use crate::stats::{PassReport, PrefetchMode, RunStats};

/// A single replay pass: cache state, optional prefetcher and counters.
#[derive(Debug)]
pub struct TraceSimulator {
    cache: CacheSim,
    prefetcher: Option<Box<dyn Prefetcher>>,
    stats: RunStats,
    mode: PrefetchMode,
}

impl TraceSimulator {
    /// Creates a simulator for one pass.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configured geometry is invalid.
    pub fn new(config: &CacheConfig, mode: PrefetchMode) -> Result<Self, ConfigError> {
        let geometry = config.geometry()?;
        Ok(Self::with_geometry(geometry, config, mode))
    }

    /// Creates a simulator from an already resolved geometry.
    pub fn with_geometry(geometry: Geometry, config: &CacheConfig, mode: PrefetchMode) -> Self {
        let prefetcher: Option<Box<dyn Prefetcher>> = match mode {
            PrefetchMode::Enabled => Some(Box::new(NextLinePrefetcher::new(
                geometry.line_bytes,
                config.prefetch_degree,
            ))),
            PrefetchMode::Disabled => None,
        };

        Self {
            cache: CacheSim::new(geometry, config.policy),
            prefetcher,
            stats: RunStats::default(),
            mode,
        }
    }

    /// Replays one access.
    ///
    /// A demand hit or miss is counted first (a miss also costs a memory
    /// read). A miss then lets the prefetcher probe the following block(s):
    /// every probe that has to fetch adds a memory read, and none counts as
    /// a hit or a miss. Writes always add a memory write.
    pub fn step(&mut self, entry: &TraceEntry) {
        let fields = self.cache.geometry().decompose(entry.address);
        let hit = self.cache.access(entry.address);
        if hit {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
            self.stats.memory_reads += 1;
        }
        trace!(
            address = %entry.address,
            access = ?entry.access,
            set = fields.set_index,
            tag = fields.tag,
            hit,
            "demand access"
        );

        if let Some(prefetcher) = self.prefetcher.as_mut() {
            for target in prefetcher.observe(entry.address, hit) {
                if self.cache.fill(target) {
                    self.stats.memory_reads += 1;
                    trace!(address = %target, "prefetch fill");
                }
            }
        }

        if entry.access.is_write() {
            self.stats.memory_writes += 1;
        }
    }

    /// Replays a sequence of accesses in order.
    pub fn run<'a>(&mut self, entries: impl IntoIterator<Item = &'a TraceEntry>) {
        for entry in entries {
            self.step(entry);
        }
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// The cache being replayed against.
    pub const fn cache(&self) -> &CacheSim {
        &self.cache
    }

    /// The prefetch mode of this pass.
    pub const fn mode(&self) -> PrefetchMode {
        self.mode
    }

    /// Ends the pass, labelling its counters.
    pub fn into_report(self) -> PassReport {
        PassReport {
            mode: self.mode,
            stats: self.stats,
        }
    }
}

/// Runs one full pass over `trace` on a fresh cache.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the configured geometry is invalid.
pub fn run_pass(
    config: &CacheConfig,
    trace: &Trace,
    mode: PrefetchMode,
) -> Result<PassReport, ConfigError> {
    let geometry = config.geometry()?;
    Ok(replay(geometry, config, trace, mode))
}

/// Runs the prefetch-disabled and prefetch-enabled passes one after the other.
///
/// The geometry is validated once, before either pass touches the trace.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the configured geometry is invalid.
pub fn simulate(config: &CacheConfig, trace: &Trace) -> Result<[PassReport; 2], ConfigError> {
    let geometry = config.geometry()?;
    Ok(PrefetchMode::ALL.map(|mode| replay(geometry, config, trace, mode)))
}

/// Runs both passes concurrently on scoped threads.
///
/// Results come back in the same order as [`simulate`].
///
/// # Errors
///
/// Returns a [`ConfigError`] if the configured geometry is invalid.
pub fn simulate_parallel(
    config: &CacheConfig,
    trace: &Trace,
) -> Result<[PassReport; 2], ConfigError> {
    let geometry = config.geometry()?;
    let reports = thread::scope(|scope| {
        PrefetchMode::ALL
            .map(|mode| scope.spawn(move || replay(geometry, config, trace, mode)))
            .map(|handle| handle.join().unwrap_or_else(|payload| panic::resume_unwind(payload)))
    });
    Ok(reports)
}

fn replay(geometry: Geometry, config: &CacheConfig, trace: &Trace, mode: PrefetchMode) -> PassReport {
    debug!(%mode, accesses = trace.len(), "starting pass");
    let mut sim = TraceSimulator::with_geometry(geometry, config, mode);
    sim.run(trace);
    let report = sim.into_report();
    debug!(%mode, hits = report.stats.hits, misses = report.stats.misses, "finished pass");
    report
}
