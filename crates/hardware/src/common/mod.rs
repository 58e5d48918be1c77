//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides the building blocks shared by every other component. It includes:
//! 1. **Address Types:** A strong 48-bit address type and its decomposed fields.
//! 2. **Constants:** Address width and trace markers.
//! 3. **Memory Access:** Read/write classification of trace records.
//! 4. **Error Handling:** Configuration, trace and I/O error types.

/// Address type definitions.
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::{Address, AddressFields};
pub use constants::{ADDRESS_BITS, ADDRESS_MASK, MAX_CACHE_LINES};
pub use data::AccessType;
pub use error::{ConfigError, SimError, TraceError};
