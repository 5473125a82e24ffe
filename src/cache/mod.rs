//! Kernel cache
//!
//! The SMO solver asks for the same few kernel entries over and over (the
//! diagonal for every step, plus the rows of the pair being updated). Entries
//! are memoised in an LRU keyed on the unordered index pair, since K(i,j) = K(j,i).

use lru::LruCache;
use std::num::NonZeroUsize;

/// Bytes charged per cached entry (key, value and LRU bookkeeping)
const ENTRY_BYTES: usize = 48;

type PairKey = (usize, usize);

fn pair_key(i: usize, j: usize) -> PairKey {
    if i <= j {
        (i, j)
    } else {
        (j, i)
    }
}

/// LRU cache for kernel matrix values
pub struct KernelCache {
    entries: LruCache<PairKey, f64>,
    hits: u64,
    misses: u64,
}

impl KernelCache {
    /// Cache holding at most `capacity` entries (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Cache sized from a memory budget in bytes
    pub fn with_memory_limit(memory_bytes: usize) -> Self {
        Self::new(memory_bytes / ENTRY_BYTES)
    }

    /// Return K(i, j), computing and storing it on a miss
    pub fn get_or_compute<F>(&mut self, i: usize, j: usize, compute: F) -> f64
    where
        F: FnOnce() -> f64,
    {
        let key = pair_key(i, j);
        if let Some(&value) = self.entries.get(&key) {
            self.hits += 1;
            return value;
        }
        self.misses += 1;
        let value = compute();
        self.entries.put(key, value);
        value
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            capacity: self.entries.cap().get(),
            size: self.entries.len(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub capacity: usize,
    pub size: usize,
}
