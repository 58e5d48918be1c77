//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures and enums used to parameterize
//! a simulation run. It provides:
//! 1. **Defaults:** Baseline cache parameters used when a field is omitted.
//! 2. **Structures:** The single-level cache configuration.
//! 3. **Enums:** Associativity mode and replacement policy, parsable from command-line words.
//!
//! Configuration is supplied either as JSON (`CacheConfig::from_json_str`) or assembled
//! field by field from the command line.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::Geometry;
use crate::common::error::{ConfigError, SimError};

/// Default configuration constants for the simulator.
mod defaults {
    /// Default cache size in bytes (1 KiB).
    pub const CACHE_SIZE: usize = 1024;

    /// Default block size in bytes (32 bytes).
    pub const CACHE_LINE: usize = 32;

    /// Default prefetch degree (1 block per triggering miss).
    pub const PREFETCH_DEGREE: usize = 1;
}

/// How lines are grouped into sets.
///
/// Parsed from the command-line words `direct`, `assoc` and `assoc:N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum Associativity {
    /// One line per set.
    #[default]
    Direct,
    /// A single set holding every line.
    Full,
    /// `N` lines per set.
    Ways(usize),
}

impl FromStr for Associativity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "direct" => Ok(Self::Direct),
            "assoc" => Ok(Self::Full),
            _ => s
                .strip_prefix("assoc:")
                .and_then(|n| n.parse().ok())
                .map(Self::Ways)
                .ok_or_else(|| ConfigError::UnknownAssociativity(s.to_string())),
        }
    }
}

impl TryFrom<String> for Associativity {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Associativity> for String {
    fn from(assoc: Associativity) -> Self {
        assoc.to_string()
    }
}

impl fmt::Display for Associativity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => f.write_str("direct"),
            Self::Full => f.write_str("assoc"),
            Self::Ways(n) => write!(f, "assoc:{n}"),
        }
    }
}

/// Cache replacement policy algorithms.
///
/// Specifies how line ages are updated, and therefore which line is evicted
/// when a new block must be installed in a full set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplacementPolicy {
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the line that was accessed least recently.
    #[default]
    #[serde(alias = "LRU", alias = "Lru")]
    Lru,
    /// First In First Out replacement policy.
    ///
    /// Evicts the line that was installed earliest, ignoring hits.
    #[serde(alias = "FIFO", alias = "Fifo")]
    Fifo,
}

impl FromStr for ReplacementPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lru" => Ok(Self::Lru),
            "fifo" => Ok(Self::Fifo),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lru => "lru",
            Self::Fifo => "fifo",
        })
    }
}

/// Cache configuration.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{Associativity, CacheConfig, ReplacementPolicy};
///
/// let json = r#"{
///     "size_bytes": 2048,
///     "line_bytes": 64,
///     "associativity": "assoc:4",
///     "policy": "fifo"
/// }"#;
///
/// let config = CacheConfig::from_json_str(json).unwrap();
/// assert_eq!(config.associativity, Associativity::Ways(4));
/// assert_eq!(config.policy, ReplacementPolicy::Fifo);
/// assert_eq!(config.geometry().unwrap().num_sets, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Total cache size in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,

    /// Block (line) size in bytes
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: usize,

    /// Lines per set
    #[serde(default)]
    pub associativity: Associativity,

    /// Replacement policy
    #[serde(default)]
    pub policy: ReplacementPolicy,

    /// Blocks fetched past a missing block when prefetching is enabled
    #[serde(default = "CacheConfig::default_prefetch_degree")]
    pub prefetch_degree: usize,
}

impl CacheConfig {
    /// Returns the default cache size in bytes.
    fn default_size() -> usize {
        defaults::CACHE_SIZE
    }

    /// Returns the default block size in bytes.
    fn default_line() -> usize {
        defaults::CACHE_LINE
    }

    /// Returns the default prefetch degree.
    fn default_prefetch_degree() -> usize {
        defaults::PREFETCH_DEGREE
    }

    /// Resolves and validates the set/way layout described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the sizes are not powers of two or do not
    /// divide evenly.
    pub fn geometry(&self) -> Result<Geometry, ConfigError> {
        Geometry::resolve(self.size_bytes, self.line_bytes, self.associativity)
    }

    /// Parses a configuration from JSON text. Omitted fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error on malformed input.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the file cannot be read and
    /// [`SimError::ConfigFormat`] if it is not a valid configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| SimError::ConfigFormat {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Default for CacheConfig {
    /// Creates a default cache configuration.
    ///
    /// 1 KiB, 32-byte blocks, direct-mapped, LRU, one-block prefetch.
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            line_bytes: defaults::CACHE_LINE,
            associativity: Associativity::default(),
            policy: ReplacementPolicy::default(),
            prefetch_degree: defaults::PREFETCH_DEGREE,
        }
    }
}
