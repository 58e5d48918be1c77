//! Memory Trace Loading.
//!
//! This module reads memory-access traces from disk or text. It performs:
//! 1. **Tokenizing:** Splits the input into whitespace-separated words.
//! 2. **Record decoding:** Groups words into `<pc>: <op> <address>` triples; the
//!    program counter is ignored, the operation is read or write, the address is hex.
//! 3. **Termination:** Stops at the `#eof` marker or at end of input. A trailing
//!    partial record is dropped.
//!
//! ```text
//! 0x804ae19: R 0x9cb3d40
//! 0x804ae19: W 0x9cb3d40
//! #eof
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use crate::common::addr::Address;
use crate::common::constants::TRACE_EOF_MARKER;
use crate::common::data::AccessType;
use crate::common::error::{SimError, TraceError};

/// One memory access from a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceEntry {
    /// Read or write.
    pub access: AccessType,
    /// Byte address accessed.
    pub address: Address,
}

impl TraceEntry {
    /// Creates a read of `address`.
    pub const fn read(address: Address) -> Self {
        Self {
            access: AccessType::Read,
            address,
        }
    }

    /// Creates a write of `address`.
    pub const fn write(address: Address) -> Self {
        Self {
            access: AccessType::Write,
            address,
        }
    }
}

/// A fully decoded trace.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    /// Wraps already decoded entries.
    pub const fn new(entries: Vec<TraceEntry>) -> Self {
        Self { entries }
    }

    /// Decodes trace text.
    ///
    /// # Errors
    ///
    /// Returns a [`TraceError`] for the first record whose address is not
    /// hexadecimal or does not fit in 48 bits.
    pub fn parse(text: &str) -> Result<Self, TraceError> {
        let mut words = text
            .split_whitespace()
            .take_while(|word| *word != TRACE_EOF_MARKER);

        let mut entries = Vec::new();
        while let (Some(_pc), Some(op), Some(addr)) = (words.next(), words.next(), words.next()) {
            let address = parse_address(entries.len(), addr)?;
            entries.push(TraceEntry {
                access: AccessType::from_token(op),
                address,
            });
        }
        Ok(Self { entries })
    }

    /// Reads a whole trace from any byte source and decodes it.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if reading fails or the input is not UTF-8, and
    /// an `InvalidData` error wrapping the [`TraceError`] if decoding fails.
    pub fn from_reader(mut reader: impl Read) -> io::Result<Self> {
        let mut text = String::new();
        let _ = reader.read_to_string(&mut text)?;
        Self::parse(&text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Reads and decodes a trace file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the file cannot be read and
    /// [`SimError::Trace`] if its content is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text)?)
    }

    /// Returns the decoded entries.
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    /// Number of accesses in the trace.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the trace holds no accesses.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the accesses in order.
    pub fn iter(&self) -> std::slice::Iter<'_, TraceEntry> {
        self.entries.iter()
    }
}

impl FromStr for Trace {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TraceEntry;
    type IntoIter = std::slice::Iter<'a, TraceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<TraceEntry> for Trace {
    fn from_iter<I: IntoIterator<Item = TraceEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Decodes a hexadecimal address word, with or without a `0x` prefix.
fn parse_address(record: usize, token: &str) -> Result<Address, TraceError> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    let value = u64::from_str_radix(digits, 16).map_err(|_| TraceError::InvalidAddress {
        record,
        token: token.to_string(),
    })?;
    Address::new(value).ok_or(TraceError::AddressOutOfRange { record, value })
}
