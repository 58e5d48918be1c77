//! Replay invariants over random traces and geometries.

use cachesim_core::common::Address;
use cachesim_core::config::{Associativity, CacheConfig, ReplacementPolicy};
use cachesim_core::{Trace, TraceEntry, simulate};
use proptest::prelude::*;

fn arb_config() -> impl Strategy<Value = CacheConfig> {
    (
        6u32..=12,
        4u32..=6,
        prop_oneof![
            Just(Associativity::Direct),
            Just(Associativity::Full),
            (0u32..=3).prop_map(|w| Associativity::Ways(1 << w)),
        ],
        prop_oneof![Just(ReplacementPolicy::Lru), Just(ReplacementPolicy::Fifo)],
        1usize..=4,
    )
        .prop_map(|(size, line, associativity, policy, prefetch_degree)| CacheConfig {
            size_bytes: 1 << size,
            line_bytes: 1 << line,
            associativity,
            policy,
            prefetch_degree,
        })
        .prop_filter("geometry must resolve", |c| c.geometry().is_ok())
}

fn arb_trace() -> impl Strategy<Value = Trace> {
    prop::collection::vec((any::<bool>(), 0u64..0x2000), 0..200).prop_map(|accesses| {
        accesses
            .into_iter()
            .map(|(write, addr)| {
                if write {
                    TraceEntry::write(Address(addr))
                } else {
                    TraceEntry::read(Address(addr))
                }
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn demand_counts_cover_the_trace(config in arb_config(), trace in arb_trace()) {
        let reports = simulate(&config, &trace).unwrap();
        for report in &reports {
            prop_assert_eq!(report.stats.accesses(), trace.len() as u64);
        }
    }

    #[test]
    fn writes_are_independent_of_prefetch(config in arb_config(), trace in arb_trace()) {
        let [plain, prefetched] = simulate(&config, &trace).unwrap();
        let writes = trace.iter().filter(|e| e.access.is_write()).count() as u64;
        prop_assert_eq!(plain.stats.memory_writes, writes);
        prop_assert_eq!(prefetched.stats.memory_writes, writes);
    }

    #[test]
    fn plain_pass_reads_only_on_misses(config in arb_config(), trace in arb_trace()) {
        let [plain, _] = simulate(&config, &trace).unwrap();
        prop_assert_eq!(plain.stats.memory_reads, plain.stats.misses);
    }

    #[test]
    fn prefetch_reads_are_bounded(config in arb_config(), trace in arb_trace()) {
        let [_, prefetched] = simulate(&config, &trace).unwrap();
        let degree = config.prefetch_degree as u64;
        prop_assert!(prefetched.stats.memory_reads >= prefetched.stats.misses);
        prop_assert!(prefetched.stats.memory_reads <= prefetched.stats.misses * (1 + degree));
    }

    // FIFO sets of two or more ways can show Belady-style anomalies where a
    // prefetch eviction saves a later demand miss; LRU and direct mapping cannot.
    #[test]
    fn prefetch_never_reads_less(
        config in arb_config().prop_filter("lru or direct-mapped", |c| {
            c.policy == ReplacementPolicy::Lru || c.associativity == Associativity::Direct
        }),
        trace in arb_trace(),
    ) {
        let [plain, prefetched] = simulate(&config, &trace).unwrap();
        prop_assert!(prefetched.stats.memory_reads >= plain.stats.memory_reads);
    }

    #[test]
    fn replay_is_deterministic(config in arb_config(), trace in arb_trace()) {
        prop_assert_eq!(simulate(&config, &trace).unwrap(), simulate(&config, &trace).unwrap());
    }
}
