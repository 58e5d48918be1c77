//! Geometry Resolution Tests.
//!
//! Verifies set/way derivation for the three associativity modes, rejection of
//! invalid geometries, and the tag/set/offset split of an address.

use cachesim_core::cache::Geometry;
use cachesim_core::common::{ADDRESS_BITS, Address, ConfigError, MAX_CACHE_LINES};
use cachesim_core::config::Associativity;
use proptest::prelude::*;
use rstest::rstest;

// ══════════════════════════════════════════════════════════
// 1. Layout
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(1024, 32, Associativity::Direct, 1, 32)]
#[case(1024, 32, Associativity::Full, 32, 1)]
#[case(1024, 32, Associativity::Ways(4), 4, 8)]
#[case(2048, 64, Associativity::Ways(2), 2, 16)]
#[case(64, 64, Associativity::Direct, 1, 1)]
fn resolves_ways_and_sets(
    #[case] size: usize,
    #[case] line: usize,
    #[case] assoc: Associativity,
    #[case] ways: usize,
    #[case] sets: usize,
) {
    let g = Geometry::resolve(size, line, assoc).unwrap();
    assert_eq!(g.ways, ways);
    assert_eq!(g.num_sets, sets);
    assert_eq!(g.num_lines() * line, size);
}

#[test]
fn bit_widths_for_four_way_cache() {
    // 8 sets of 4 x 32-byte lines.
    let g = Geometry::resolve(1024, 32, Associativity::Ways(4)).unwrap();
    assert_eq!(g.offset_bits, 5);
    assert_eq!(g.index_bits, 3);
    assert_eq!(g.tag_bits, 40);
}

// ══════════════════════════════════════════════════════════
// 2. Validation
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(1000, 32, Associativity::Direct, ConfigError::CacheSizeNotPowerOfTwo(1000))]
#[case(0, 32, Associativity::Direct, ConfigError::CacheSizeNotPowerOfTwo(0))]
#[case(1024, 24, Associativity::Direct, ConfigError::BlockSizeNotPowerOfTwo(24))]
#[case(1024, 0, Associativity::Direct, ConfigError::BlockSizeNotPowerOfTwo(0))]
#[case(1024, 32, Associativity::Ways(3), ConfigError::AssociativityNotPowerOfTwo(3))]
#[case(1024, 32, Associativity::Ways(0), ConfigError::AssociativityNotPowerOfTwo(0))]
fn rejects_non_power_of_two(
    #[case] size: usize,
    #[case] line: usize,
    #[case] assoc: Associativity,
    #[case] expected: ConfigError,
) {
    assert_eq!(Geometry::resolve(size, line, assoc), Err(expected));
}

#[test]
fn rejects_block_larger_than_cache() {
    assert!(matches!(
        Geometry::resolve(32, 64, Associativity::Direct),
        Err(ConfigError::Indivisible { .. })
    ));
    assert!(matches!(
        Geometry::resolve(32, 64, Associativity::Full),
        Err(ConfigError::Indivisible { .. })
    ));
}

#[test]
fn rejects_more_ways_than_lines() {
    assert_eq!(
        Geometry::resolve(256, 32, Associativity::Ways(16)),
        Err(ConfigError::Indivisible {
            size_bytes: 256,
            line_bytes: 32,
            ways: 16
        })
    );
}

#[test]
fn rejects_geometry_wider_than_address() {
    // 2^40-byte blocks in 2^10 sets need 50 bits of offset and index.
    let line = 1usize << 40;
    let err = Geometry::resolve(line << 10, line, Associativity::Direct).unwrap_err();
    assert_eq!(
        err,
        ConfigError::AddressTooNarrow {
            offset_bits: 40,
            index_bits: 10
        }
    );
}

#[test]
fn rejects_line_count_beyond_limit() {
    // 2^44 one-byte lines fit the address but not in memory.
    assert_eq!(
        Geometry::resolve(1 << 44, 1, Associativity::Full),
        Err(ConfigError::TooManyLines {
            lines: 1 << 44,
            max: MAX_CACHE_LINES,
        })
    );
    assert!(matches!(
        Geometry::resolve(MAX_CACHE_LINES * 2, 1, Associativity::Direct),
        Err(ConfigError::TooManyLines { .. })
    ));
}

#[test]
fn accepts_line_count_at_limit() {
    let g = Geometry::resolve(MAX_CACHE_LINES * 64, 64, Associativity::Ways(8)).unwrap();
    assert_eq!(g.num_lines(), MAX_CACHE_LINES);
}

// ══════════════════════════════════════════════════════════
// 3. Decomposition
// ══════════════════════════════════════════════════════════

#[test]
fn decomposes_direct_mapped_address() {
    let g = Geometry::resolve(1024, 32, Associativity::Direct).unwrap();
    let f = g.decompose(Address(0x1234));
    // 0x1234 = tag 0b100 | set 0b10001 | offset 0b10100
    assert_eq!(f.block_offset, 0x14);
    assert_eq!(f.set_index, 0x11);
    assert_eq!(f.tag, 0x4);
}

#[test]
fn fully_associative_always_uses_set_zero() {
    let g = Geometry::resolve(1024, 32, Associativity::Full).unwrap();
    for addr in [0u64, 0x20, 0xdead_beef, 0xffff_ffff_ffff] {
        let f = g.decompose(Address(addr));
        assert_eq!(f.set_index, 0);
        assert_eq!(f.tag, addr >> 5);
    }
}

fn valid_geometry() -> impl Strategy<Value = Geometry> {
    (0u32..=20, 0u32..=8, 0u32..=6).prop_filter_map(
        "cache must hold at least one set",
        |(size_log, line_log, ways_log)| {
            Geometry::resolve(
                1 << size_log,
                1 << line_log,
                Associativity::Ways(1 << ways_log),
            )
            .ok()
        },
    )
}

proptest! {
    #[test]
    fn field_widths_cover_the_address(g in valid_geometry()) {
        prop_assert_eq!(g.offset_bits + g.index_bits + g.tag_bits, ADDRESS_BITS);
        prop_assert_eq!(g.num_sets, g.size_bytes / (g.ways * g.line_bytes));
    }

    #[test]
    fn fields_reassemble_the_address(g in valid_geometry(), raw in 0u64..(1 << 48)) {
        let f = g.decompose(Address(raw));
        prop_assert!(f.set_index < g.num_sets);
        prop_assert!(f.block_offset < g.line_bytes as u64);
        let rebuilt = (f.tag << (g.offset_bits + g.index_bits))
            | ((f.set_index as u64) << g.offset_bits)
            | f.block_offset;
        prop_assert_eq!(rebuilt, raw);
        prop_assert!(f.tag < (1u64 << g.tag_bits));
    }
}
