//! Parse/compile cache keyed by exact line text
//!
//! Typing only ever changes one line at a time, so nearly every line of a
//! pass has been seen before. The cache keeps the parsed and compiled forms
//! for each distinct line text, bounded by an LRU policy. Failures are never
//! stored, so a line that failed is retried when it reappears.

use lru::LruCache;
use std::num::NonZeroUsize;
use tally_interpreter::{Compiled, Oracle, OracleError, Parsed};

/// Capacity used when none, or zero, is requested
const DEFAULT_CAPACITY: usize = 4096;

/// Cached forms of one line of code
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub parsed: Parsed,
    pub compiled: Compiled,
}

/// Cache performance statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub cache_hits: usize,
    pub cache_misses: usize,
    pub evictions: usize,
    pub total_queries: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        if self.total_queries == 0 {
            0.0
        } else {
            self.cache_hits as f64 / self.total_queries as f64
        }
    }
}

pub struct ParseCache {
    entries: LruCache<String, CacheEntry>,
    stats: CacheStats,
}

impl std::fmt::Debug for ParseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.entries.cap())
            .field("stats", &self.stats)
            .finish()
    }
}

impl Default for ParseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(max_size: usize) -> Self {
        let capacity = NonZeroUsize::new(max_size)
            .or(NonZeroUsize::new(DEFAULT_CAPACITY))
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            stats: CacheStats::default(),
        }
    }

    /// Look up the cached forms for a line of code
    pub fn get(&mut self, code: &str) -> Option<CacheEntry> {
        self.stats.total_queries += 1;

        if let Some(entry) = self.entries.get(code) {
            self.stats.cache_hits += 1;
            Some(entry.clone())
        } else {
            self.stats.cache_misses += 1;
            None
        }
    }

    pub fn insert(&mut self, code: &str, entry: CacheEntry) {
        // `push` also hands back the old value when the key was present
        if let Some((evicted, _)) = self.entries.push(code.to_string(), entry) {
            if evicted != code {
                self.stats.evictions += 1;
            }
        }
    }

    /// Cached forms for `code`, parsing and compiling through the oracle on
    /// a miss
    pub fn get_or_compile<O>(&mut self, code: &str, oracle: &O) -> Result<CacheEntry, OracleError>
    where
        O: Oracle + ?Sized,
    {
        if let Some(entry) = self.get(code) {
            return Ok(entry);
        }

        let parsed = oracle.parse(code)?;
        let compiled = oracle.compile(&parsed)?;
        let entry = CacheEntry { parsed, compiled };
        self.insert(code, entry.clone());
        tracing::trace!(code, "cached line");
        Ok(entry)
    }

    /// Whether `code` is cached, without touching recency or statistics
    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
