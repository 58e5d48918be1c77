//! Cache Geometry Resolution.
//!
//! Turns the three independent size parameters (total size, block size and
//! associativity mode) into a validated set/way layout and the bit-field
//! widths used to split an address into tag, set index and block offset.
//!
//! The cache model trusts a `Geometry` to have power-of-two dimensions and a
//! bounded line count. Outside this crate one can only be obtained through
//! [`Geometry::resolve`].

use crate::common::addr::{Address, AddressFields};
use crate::common::constants::{ADDRESS_BITS, MAX_CACHE_LINES};
use crate::common::error::ConfigError;
use crate::config::Associativity;

/// Validated set/way layout of a cache.
///
/// Fields are readable but the struct cannot be built outside this crate:
///
/// ```compile_fail
/// use cachesim_core::cache::Geometry;
///
/// let g = Geometry {
///     size_bytes: 1024,
///     line_bytes: 32,
///     ways: 1,
///     num_sets: 0,
///     offset_bits: 5,
///     index_bits: 0,
///     tag_bits: 43,
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct Geometry {
    /// Total cache size in bytes.
    pub size_bytes: usize,
    /// Block size in bytes.
    pub line_bytes: usize,
    /// Lines per set.
    pub ways: usize,
    /// Number of sets.
    pub num_sets: usize,
    /// Width of the block-offset field.
    pub offset_bits: u32,
    /// Width of the set-index field.
    pub index_bits: u32,
    /// Width of the tag field; the three widths always sum to [`ADDRESS_BITS`].
    pub tag_bits: u32,
}

impl Geometry {
    /// Resolves the lines-per-set and set count for a cache.
    ///
    /// * `Direct`: one line per set, `size / line` sets.
    /// * `Full`: one set of `size / line` lines.
    /// * `Ways(n)`: `n` lines per set, `size / (n * line)` sets.
    ///
    /// # Arguments
    ///
    /// * `size_bytes` - Total cache size in bytes.
    /// * `line_bytes` - Block size in bytes.
    /// * `associativity` - How lines are grouped into sets.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the size, block size or resulting
    /// associativity is not a positive power of two, if the cache cannot be
    /// split into whole sets, if the offset and index fields do not fit in
    /// a 48-bit address, or if the cache holds more than [`MAX_CACHE_LINES`]
    /// lines.
    pub fn resolve(
        size_bytes: usize,
        line_bytes: usize,
        associativity: Associativity,
    ) -> Result<Self, ConfigError> {
        if !size_bytes.is_power_of_two() {
            return Err(ConfigError::CacheSizeNotPowerOfTwo(size_bytes));
        }
        if !line_bytes.is_power_of_two() {
            return Err(ConfigError::BlockSizeNotPowerOfTwo(line_bytes));
        }

        let ways = match associativity {
            Associativity::Direct => 1,
            Associativity::Full => size_bytes / line_bytes,
            Associativity::Ways(n) => n,
        };
        let indivisible = ConfigError::Indivisible {
            size_bytes,
            line_bytes,
            ways,
        };
        if size_bytes < line_bytes {
            return Err(indivisible);
        }
        if !ways.is_power_of_two() {
            return Err(ConfigError::AssociativityNotPowerOfTwo(ways));
        }

        // Both factors are powers of two, so divisibility reduces to size >= set size.
        let set_bytes = ways.checked_mul(line_bytes).ok_or_else(|| indivisible.clone())?;
        if size_bytes < set_bytes {
            return Err(indivisible);
        }
        let num_sets = size_bytes / set_bytes;

        let offset_bits = line_bytes.trailing_zeros();
        let index_bits = num_sets.trailing_zeros();
        if offset_bits + index_bits > ADDRESS_BITS {
            return Err(ConfigError::AddressTooNarrow {
                offset_bits,
                index_bits,
            });
        }

        let lines = size_bytes / line_bytes;
        if lines > MAX_CACHE_LINES {
            return Err(ConfigError::TooManyLines {
                lines,
                max: MAX_CACHE_LINES,
            });
        }

        Ok(Self {
            size_bytes,
            line_bytes,
            ways,
            num_sets,
            offset_bits,
            index_bits,
            tag_bits: ADDRESS_BITS - offset_bits - index_bits,
        })
    }

    /// Splits an address into its tag, set index and block offset.
    #[inline(always)]
    pub const fn decompose(&self, addr: Address) -> AddressFields {
        let raw = addr.val();
        AddressFields {
            tag: raw >> (self.offset_bits + self.index_bits),
            set_index: (raw >> self.offset_bits) as usize & (self.num_sets - 1),
            block_offset: raw & (self.line_bytes as u64 - 1),
        }
    }

    /// Total number of lines in the cache.
    pub const fn num_lines(&self) -> usize {
        self.num_sets * self.ways
    }
}
