//! Error message tests.

use std::io;
use std::path::PathBuf;

use cachesim_core::SimError;
use cachesim_core::common::{ConfigError, TraceError};

#[test]
fn config_errors_name_the_bad_value() {
    assert_eq!(
        ConfigError::CacheSizeNotPowerOfTwo(1000).to_string(),
        "cache size 1000 is not a positive power of two"
    );
    assert_eq!(
        ConfigError::Indivisible {
            size_bytes: 1024,
            line_bytes: 32,
            ways: 64
        }
        .to_string(),
        "cache size 1024 is not divisible into 64-way sets of 32-byte blocks"
    );
    assert_eq!(
        ConfigError::TooManyLines {
            lines: 1 << 25,
            max: 1 << 24
        }
        .to_string(),
        "cache of 33554432 lines exceeds the limit of 16777216 lines"
    );
}

#[test]
fn trace_errors_carry_the_record_number() {
    let err = TraceError::InvalidAddress {
        record: 7,
        token: "0xzz".to_string(),
    };
    assert_eq!(err.to_string(), "record 7: invalid address '0xzz'");
}

#[test]
fn sim_error_wraps_config_error() {
    let err: SimError = ConfigError::UnknownPolicy("mru".to_string()).into();
    assert!(matches!(err, SimError::Config(ConfigError::UnknownPolicy(_))));
    assert_eq!(
        err.to_string(),
        "invalid configuration: unknown replacement policy 'mru' (expected fifo or lru)"
    );
}

#[test]
fn io_error_mentions_the_path() {
    let err = SimError::Io {
        path: PathBuf::from("missing.trace"),
        source: io::Error::new(io::ErrorKind::NotFound, "not found"),
    };
    assert_eq!(err.to_string(), "could not read 'missing.trace': not found");
}
