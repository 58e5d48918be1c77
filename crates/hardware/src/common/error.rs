//! Simulator error definitions.
//!
//! This module defines every failure the simulator can report. It provides:
//! 1. **Configuration Errors:** Invalid cache geometry or unknown parameter names, raised before
//!    any trace is replayed.
//! 2. **Trace Errors:** Address words that cannot be decoded.
//! 3. **Top-level Errors:** A single type for front ends, adding I/O failures on input files.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid cache configuration.
///
/// Always reported before simulation starts; a geometry that fails these
/// checks would silently corrupt address decomposition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Total cache size is zero or not a power of two.
    #[error("cache size {0} is not a positive power of two")]
    CacheSizeNotPowerOfTwo(usize),

    /// Block (line) size is zero or not a power of two.
    #[error("block size {0} is not a positive power of two")]
    BlockSizeNotPowerOfTwo(usize),

    /// Lines per set is zero or not a power of two.
    #[error("associativity {0} is not a positive power of two")]
    AssociativityNotPowerOfTwo(usize),

    /// `ways * line_bytes` does not evenly divide the cache size.
    #[error("cache size {size_bytes} is not divisible into {ways}-way sets of {line_bytes}-byte blocks")]
    Indivisible {
        /// Total cache size in bytes.
        size_bytes: usize,
        /// Block size in bytes.
        line_bytes: usize,
        /// Lines per set.
        ways: usize,
    },

    /// Offset and index fields leave no room in the address.
    #[error("{offset_bits} offset bits and {index_bits} index bits exceed the 48-bit address")]
    AddressTooNarrow {
        /// Bits needed for the block offset.
        offset_bits: u32,
        /// Bits needed for the set index.
        index_bits: u32,
    },

    /// The cache would hold more lines than the simulator allocates.
    #[error("cache of {lines} lines exceeds the limit of {max} lines")]
    TooManyLines {
        /// Lines the geometry asks for.
        lines: usize,
        /// Upper bound on the line count.
        max: usize,
    },

    /// Associativity word is not `direct`, `assoc` or `assoc:N`.
    #[error("unknown associativity '{0}' (expected direct, assoc or assoc:N)")]
    UnknownAssociativity(String),

    /// Replacement policy word is not `fifo` or `lru`.
    #[error("unknown replacement policy '{0}' (expected fifo or lru)")]
    UnknownPolicy(String),
}

/// Malformed trace content.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// The address word is not hexadecimal.
    #[error("record {record}: invalid address '{token}'")]
    InvalidAddress {
        /// Zero-based index of the record within the trace.
        record: usize,
        /// The offending word.
        token: String,
    },

    /// The address does not fit in the simulated address space.
    #[error("record {record}: address {value:#x} exceeds 48 bits")]
    AddressOutOfRange {
        /// Zero-based index of the record within the trace.
        record: usize,
        /// The decoded value.
        value: u64,
    },
}

/// Any failure surfaced to a simulator front end.
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid cache configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Malformed trace.
    #[error("malformed trace: {0}")]
    Trace(#[from] TraceError),

    /// An input file could not be read.
    #[error("could not read '{}': {source}", .path.display())]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A configuration file is not valid JSON for [`CacheConfig`](crate::config::CacheConfig).
    #[error("could not parse configuration '{}': {source}", .path.display())]
    ConfigFormat {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}
