//! Global Simulator Constants.
//!
//! This module defines constants shared by the cache model and the trace reader. It includes:
//! 1. **Address Constants:** Width and mask of the simulated address space.
//! 2. **Trace Constants:** Markers recognized while tokenizing a trace.

/// Width of a simulated memory address in bits.
pub const ADDRESS_BITS: u32 = 48;

/// Mask covering every valid bit of a 48-bit address.
pub const ADDRESS_MASK: u64 = (1 << ADDRESS_BITS) - 1;

/// Largest number of lines a cache may have. Every line is allocated up
/// front, so larger geometries are rejected at resolution time.
pub const MAX_CACHE_LINES: usize = 1 << 24;

/// Word that terminates a trace, wherever it appears.
pub const TRACE_EOF_MARKER: &str = "#eof";

