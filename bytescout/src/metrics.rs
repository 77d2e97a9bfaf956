use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

use crate::search::dispatch::EngineKind;

/// Tracks how searches were executed
///
/// Cloning shares the underlying counters, so one instance can be handed to a
/// dispatcher and a chunked coordinator and read back afterwards.
#[derive(Debug, Clone)]
pub struct SearchMetrics {
    // Searches per engine
    byte_scan: Arc<AtomicU64>,
    bit_parallel: Arc<AtomicU64>,
    hash_pair: Arc<AtomicU64>,
    hash_triple: Arc<AtomicU64>,
    skip_table: Arc<AtomicU64>,

    // Chunked search metrics
    chunk_workers: Arc<AtomicU64>,
    deferred_workers: Arc<AtomicU64>,

    matches: Arc<AtomicU64>,
}

impl SearchMetrics {
    /// Creates a new SearchMetrics instance
    pub fn new() -> Self {
        Self {
            byte_scan: Arc::new(AtomicU64::new(0)),
            bit_parallel: Arc::new(AtomicU64::new(0)),
            hash_pair: Arc::new(AtomicU64::new(0)),
            hash_triple: Arc::new(AtomicU64::new(0)),
            skip_table: Arc::new(AtomicU64::new(0)),
            chunk_workers: Arc::new(AtomicU64::new(0)),
            deferred_workers: Arc::new(AtomicU64::new(0)),
            matches: Arc::new(AtomicU64::new(0)),
        }
    }

    fn engine_counter(&self, engine: EngineKind) -> &Arc<AtomicU64> {
        match engine {
            EngineKind::ByteScan => &self.byte_scan,
            EngineKind::BitParallel => &self.bit_parallel,
            EngineKind::HashPair => &self.hash_pair,
            EngineKind::HashTriple => &self.hash_triple,
            EngineKind::SkipTable => &self.skip_table,
        }
    }

    /// Records one search routed to `engine`
    pub fn record_search(&self, engine: EngineKind) {
        let total = self.engine_counter(engine).fetch_add(1, Ordering::Relaxed) + 1;
        debug!("Search routed to {}, {} so far", engine.name(), total);
    }

    /// Records chunk workers spawned by one chunked search
    pub fn record_workers(&self, spawned: u64, deferred: u64) {
        self.chunk_workers.fetch_add(spawned, Ordering::Relaxed);
        self.deferred_workers.fetch_add(deferred, Ordering::Relaxed);
        debug!("Chunk workers: {} spawned, {} deferred", spawned, deferred);
    }

    /// Records reported matches
    pub fn record_matches(&self, count: u64) {
        self.matches.fetch_add(count, Ordering::Relaxed);
    }

    /// Gets a snapshot of the counters
    pub fn get_stats(&self) -> SearchStats {
        SearchStats {
            byte_scan: self.byte_scan.load(Ordering::Relaxed),
            bit_parallel: self.bit_parallel.load(Ordering::Relaxed),
            hash_pair: self.hash_pair.load(Ordering::Relaxed),
            hash_triple: self.hash_triple.load(Ordering::Relaxed),
            skip_table: self.skip_table.load(Ordering::Relaxed),
            chunk_workers: self.chunk_workers.load(Ordering::Relaxed),
            deferred_workers: self.deferred_workers.load(Ordering::Relaxed),
            matches: self.matches.load(Ordering::Relaxed),
        }
    }

    /// Logs the current counters
    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Search stats:\n\
             Searches (byte-scan/bit-parallel/hash-pair/hash-triple/skip-table): {}/{}/{}/{}/{}\n\
             Chunk workers spawned/deferred: {}/{}\n\
             Matches reported: {}",
            stats.byte_scan,
            stats.bit_parallel,
            stats.hash_pair,
            stats.hash_triple,
            stats.skip_table,
            stats.chunk_workers,
            stats.deferred_workers,
            stats.matches
        );
    }
}

impl Default for SearchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of [`SearchMetrics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub byte_scan: u64,
    pub bit_parallel: u64,
    pub hash_pair: u64,
    pub hash_triple: u64,
    pub skip_table: u64,
    pub chunk_workers: u64,
    pub deferred_workers: u64,
    pub matches: u64,
}

impl SearchStats {
    pub fn total_searches(&self) -> u64 {
        self.byte_scan + self.bit_parallel + self.hash_pair + self.hash_triple + self.skip_table
    }
}
