//! Query embedding cache
//!
//! Suggestion queries repeat heavily ("quick vegetarian dinner" and friends),
//! so the retriever caches text-to-vector results. Uses the moka crate for
//! thread-safe LRU caching with TTL support.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use serde::{Deserialize, Serialize};

use mealmap_core::RetrievalConfig;
use mealmap_embed::hashing::fnv1a64;

// ============================================================================
// Embedding Cache
// ============================================================================

/// Cache for query text embeddings
///
/// Keyed by a stable 64-bit hash of the query text. Thread-safe; clones
/// share the underlying cache.
#[derive(Clone)]
pub struct EmbeddingCache {
    cache: Cache<u64, Arc<Vec<f32>>>,
    stats: Arc<CacheStats>,
}

impl EmbeddingCache {
    /// Create a cache with default configuration
    pub fn new() -> Self {
        Self::with_config(&RetrievalConfig::default())
    }

    /// Create a cache sized and aged per the retrieval config
    pub fn with_config(config: &RetrievalConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.cache_max_capacity)
            .time_to_live(Duration::from_secs(config.cache_ttl_seconds))
            .build();

        Self {
            cache,
            stats: Arc::new(CacheStats::default()),
        }
    }

    /// Get a cached embedding for a query text
    pub fn get(&self, text: &str) -> Option<Arc<Vec<f32>>> {
        let result = self.cache.get(&fnv1a64(text.as_bytes()));

        if result.is_some() {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }

        result
    }

    /// Store an embedding for a query text
    pub fn put(&self, text: &str, embedding: Vec<f32>) -> Arc<Vec<f32>> {
        let embedding = Arc::new(embedding);
        self.cache
            .insert(fnv1a64(text.as_bytes()), Arc::clone(&embedding));
        self.stats.record_write();
        embedding
    }

    /// Drop all cached embeddings
    pub fn clear(&self) {
        self.cache.invalidate_all();
        self.stats.reset();
    }

    /// Cache statistics handle
    pub fn stats(&self) -> Arc<CacheStats> {
        Arc::clone(&self.stats)
    }

    /// Current entry count
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

impl Default for EmbeddingCache {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Cache Statistics
// ============================================================================

/// Hit/miss counters for cache monitoring
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    writes: AtomicU64,
}

impl CacheStats {
    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.writes.store(0, Ordering::Relaxed);
    }

    /// Total hits
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Total misses
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Total writes
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Hit rate in [0.0, 1.0]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits() + self.misses();
        if total == 0 {
            0.0
        } else {
            self.hits() as f64 / total as f64
        }
    }

    /// Snapshot for reporting
    pub fn report(&self) -> CacheStatsReport {
        CacheStatsReport {
            hits: self.hits(),
            misses: self.misses(),
            writes: self.writes(),
            hit_rate: self.hit_rate(),
        }
    }
}

/// Serializable cache statistics snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStatsReport {
    /// Total hits
    pub hits: u64,
    /// Total misses
    pub misses: u64,
    /// Total writes
    pub writes: u64,
    /// Hit rate in [0.0, 1.0]
    pub hit_rate: f64,
}

// ============================================================================
// Tests
// ============================================================================
