//! Memory Access Types.
//!
//! This module defines the classification of the accesses found in a trace.
//! These types are used for the following:
//! 1. **Traffic Accounting:** Writes add to the memory-write counter regardless of outcome.
//! 2. **Trace Decoding:** Mapping the operation word of a trace record to an access kind.

use serde::Serialize;

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    /// Data read access (`R` in a trace).
    Read,

    /// Data write access (`W` in a trace).
    Write,
}

impl AccessType {
    /// Decodes the operation word of a trace record.
    ///
    /// Only a leading `R` denotes a read. Every other word, including
    /// unexpected ones, is taken as a write.
    pub fn from_token(token: &str) -> Self {
        if token.starts_with('R') {
            Self::Read
        } else {
            Self::Write
        }
    }

    /// Returns `true` for [`AccessType::Write`].
    #[inline(always)]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }
}
