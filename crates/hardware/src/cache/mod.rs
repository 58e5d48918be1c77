//! Set-Associative Cache Model.
//!
//! This module implements the cache state replayed by the trace simulator.
//! It holds `sets * ways` lines in one flat arena, answers lookups, picks fill
//! targets and applies the configured replacement policy. It models presence
//! only: no data, no dirty bits, no latency.

/// Address decomposition and set/way layout.
pub mod geometry;

/// Cache replacement policy implementations (FIFO, LRU).
pub mod policies;

pub use self::geometry::Geometry;

use tracing::debug;

use self::policies::ReplacementPolicy;
use crate::common::addr::Address;
use crate::config::ReplacementPolicy as PolicyType;

/// Cache line entry containing tag, validity, and age.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Block tag; meaningful only while `valid`.
    pub tag: u64,
    /// Whether the line holds a block.
    pub valid: bool,
    /// Age rank within the set. Smaller is younger; the largest valid
    /// `order` is evicted next.
    pub order: u64,
}

/// Set-associative cache with a fixed number of sets and ways.
#[derive(Debug)]
pub struct CacheSim {
    geometry: Geometry,
    lines: Vec<CacheLine>,
    policy: Box<dyn ReplacementPolicy>,
}

impl CacheSim {
    /// Creates an empty cache.
    ///
    /// Every line starts invalid; each set's ages are seeded with the set's
    /// own index.
    ///
    /// # Arguments
    ///
    /// * `geometry` - Validated set/way layout.
    /// * `policy` - Replacement policy applied to every set.
    pub fn new(geometry: Geometry, policy: PolicyType) -> Self {
        debug!(
            policy = %policy,
            size_bytes = geometry.size_bytes,
            line_bytes = geometry.line_bytes,
            sets = geometry.num_sets,
            ways = geometry.ways,
            offset_bits = geometry.offset_bits,
            index_bits = geometry.index_bits,
            tag_bits = geometry.tag_bits,
            "cache geometry"
        );

        let lines = (0..geometry.num_sets)
            .flat_map(|set| {
                std::iter::repeat_n(
                    CacheLine {
                        order: set as u64,
                        ..CacheLine::default()
                    },
                    geometry.ways,
                )
            })
            .collect();

        Self {
            geometry,
            lines,
            policy: policies::build(policy),
        }
    }

    /// Returns the layout this cache was built with.
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Returns the lines of one set.
    ///
    /// # Panics
    ///
    /// Panics if `set_index` is not below the set count.
    pub fn set(&self, set_index: usize) -> &[CacheLine] {
        let base = set_index * self.geometry.ways;
        &self.lines[base..base + self.geometry.ways]
    }

    /// Finds the way holding `tag` in a set.
    ///
    /// Only valid lines match; the first match wins.
    pub fn locate(&self, set_index: usize, tag: u64) -> Option<usize> {
        self.set(set_index)
            .iter()
            .position(|line| line.valid && line.tag == tag)
    }

    /// Chooses the way a new block in this set should go to.
    ///
    /// The lowest-indexed invalid line if there is one, otherwise the line
    /// with the strictly largest `order` (the lowest index on ties).
    pub fn select_victim(&self, set_index: usize) -> usize {
        let set = self.set(set_index);
        if let Some(way) = set.iter().position(|line| !line.valid) {
            return way;
        }

        let mut victim = 0;
        let mut oldest = 0;
        for (way, line) in set.iter().enumerate() {
            if line.order > oldest {
                oldest = line.order;
                victim = way;
            }
        }
        victim
    }

    /// Places a block in a way and updates ages per the policy.
    ///
    /// This is the only path that makes a line valid.
    pub fn install(&mut self, set_index: usize, way: usize, tag: u64) {
        let policy = &*self.policy;
        let ways = self.geometry.ways;
        let base = set_index * ways;
        let set = &mut self.lines[base..base + ways];
        set[way].tag = tag;
        set[way].valid = true;
        policy.on_fill(set, way);
    }

    /// Checks if the cache holds the block containing `addr`.
    pub fn contains(&self, addr: Address) -> bool {
        let fields = self.geometry.decompose(addr);
        self.locate(fields.set_index, fields.tag).is_some()
    }

    /// Performs a demand access.
    ///
    /// On a hit the policy sees the hit; on a miss the block is installed
    /// over the selected victim.
    ///
    /// # Returns
    ///
    /// `true` on a hit.
    pub fn access(&mut self, addr: Address) -> bool {
        let fields = self.geometry.decompose(addr);
        if let Some(way) = self.locate(fields.set_index, fields.tag) {
            let policy = &*self.policy;
            let base = fields.set_index * self.geometry.ways;
            policy.on_hit(&mut self.lines[base..base + self.geometry.ways], way);
            return true;
        }

        let victim = self.select_victim(fields.set_index);
        self.install(fields.set_index, victim, fields.tag);
        false
    }

    /// Brings the block containing `addr` in without a demand access.
    ///
    /// A block already present is left as is, ages included.
    ///
    /// # Returns
    ///
    /// `true` if the block had to be fetched.
    pub fn fill(&mut self, addr: Address) -> bool {
        let fields = self.geometry.decompose(addr);
        if self.locate(fields.set_index, fields.tag).is_some() {
            return false;
        }
        let victim = self.select_victim(fields.set_index);
        self.install(fields.set_index, victim, fields.tag);
        true
    }

    /// Number of valid lines in a set.
    pub fn occupancy(&self, set_index: usize) -> usize {
        self.set(set_index).iter().filter(|line| line.valid).count()
    }
}
