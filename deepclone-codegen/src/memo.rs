//! Content-hash memoization for pipeline stages.
//!
//! Each stage caches its outputs under a [`Fingerprint`] of its inputs. A
//! pass that sees the same input fingerprint reuses the previous output
//! instead of recomputing it. Entries that a successful pass did not touch
//! are evicted when the pass completes.

use std::{
    collections::{HashMap, HashSet},
    fmt,
    hash::{Hash, Hasher},
};

use eyre::Result;
use serde::Serialize;

/// A 32-byte blake3 digest of a value's `Hash` stream.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprint any hashable value.
    pub fn of<T: Hash + ?Sized>(value: &T) -> Self {
        let mut hasher = FingerprintHasher(blake3::Hasher::new());
        value.hash(&mut hasher);
        Self(*hasher.0.finalize().as_bytes())
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", &self.to_hex()[..16])
    }
}

/// Adapter feeding `std::hash::Hash` output into blake3.
struct FingerprintHasher(blake3::Hasher);

impl Hasher for FingerprintHasher {
    fn write(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    fn finish(&self) -> u64 {
        let digest = self.0.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest.as_bytes()[..8]);
        u64::from_le_bytes(head)
    }
}

/// Hit and miss counts of one stage for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageStats {
    pub hits: usize,
    pub misses: usize,
}

/// Memoized outputs of one stage.
#[derive(Debug)]
pub struct StageCache<V> {
    entries: HashMap<Fingerprint, V>,
    live: HashSet<Fingerprint>,
    stats: StageStats,
}

impl<V> Default for StageCache<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            live: HashSet::new(),
            stats: StageStats::default(),
        }
    }
}

impl<V: Clone> StageCache<V> {
    /// Return the cached value for `key`, computing and storing it on a miss.
    ///
    /// A failed computation stores nothing.
    pub fn get_or_compute<F>(&mut self, key: Fingerprint, compute: F) -> Result<V>
    where
        F: FnOnce() -> Result<V>,
    {
        self.live.insert(key);
        if let Some(value) = self.entries.get(&key) {
            self.stats.hits += 1;
            return Ok(value.clone());
        }

        self.stats.misses += 1;
        let value = compute()?;
        self.entries.insert(key, value.clone());
        Ok(value)
    }

    fn begin_pass(&mut self) {
        self.live.clear();
        self.stats = StageStats::default();
    }

    fn evict_unused(&mut self) {
        let live = &self.live;
        self.entries.retain(|key, _| live.contains(key));
    }

    pub fn stats(&self) -> StageStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-stage hit/miss counts of one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassStats {
    pub scan: StageStats,
    pub resolve: StageStats,
    pub closure: StageStats,
    pub plan: StageStats,
    pub emit: StageStats,
}

/// The caches of every stage, owned by the incremental driver across passes.
#[derive(Debug, Default)]
pub struct StageCaches {
    pub scan: StageCache<bool>,
    pub resolve: StageCache<crate::pipeline::Resolution>,
    pub closure: StageCache<deepclone_ir::ClosureSet>,
    pub plan: StageCache<deepclone_ir::ClonePlan>,
    pub emit: StageCache<deepclone_ir::GeneratedUnit>,
}

impl StageCaches {
    pub fn begin_pass(&mut self) {
        self.scan.begin_pass();
        self.resolve.begin_pass();
        self.closure.begin_pass();
        self.plan.begin_pass();
        self.emit.begin_pass();
    }

    /// Drop every entry the last pass did not use.
    pub fn evict_unused(&mut self) {
        self.scan.evict_unused();
        self.resolve.evict_unused();
        self.closure.evict_unused();
        self.plan.evict_unused();
        self.emit.evict_unused();
    }

    pub fn stats(&self) -> PassStats {
        PassStats {
            scan: self.scan.stats(),
            resolve: self.resolve.stats(),
            closure: self.closure.stats(),
            plan: self.plan.stats(),
            emit: self.emit.stats(),
        }
    }
}
