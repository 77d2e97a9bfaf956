//! Exact byte-pattern search engines.
//!
//! # Engines
//!
//! | engine            | pattern length | idea                                         |
//! |-------------------|----------------|----------------------------------------------|
//! | [`ByteScanner`]   | 1              | word-parallel zero-byte detection            |
//! | [`BitParallel`]   | ≥ 2            | per-byte occurrence bitmaps, backward walk   |
//! | [`PairHash`]      | ≥ 2            | skip table keyed on hashed byte pairs        |
//! | [`TripleHash`]    | ≥ 3            | skip table keyed on hashed byte triples      |
//! | [`SkipTable`]     | ≥ 2            | single-byte skip table with look-ahead       |
//!
//! All engines implement [`Scanner`], whose one scan loop is generic over a
//! [`MatchSink`]; first-match, all-matches and count are different sinks over
//! the same loop. Tables are built from the pattern on every call and dropped
//! with the engine.
//!
//! # Choosing an engine
//!
//! [`Dispatcher`] maps pattern length to an engine through a
//! [`DispatchTable`]. The crossover points are empirical and depend on the
//! alphabet, so the table is data, not code.
//!
//! # Concurrency
//!
//! [`chunked`] splits one haystack into overlapping chunks and runs an engine
//! per chunk on a bounded pool of worker threads.
pub mod bit_parallel;
pub mod byte_scan;
pub mod chunked;
pub mod dispatch;
pub mod hash_skip;
pub mod sink;
pub mod skip_table;
pub mod verify;

pub use bit_parallel::BitParallel;
pub use byte_scan::ByteScanner;
pub use chunked::{CancellationToken, ChunkSpec, ChunkedSearch, CompletionGuard};
pub use dispatch::{Band, DispatchTable, Dispatcher, Engine, EngineKind};
pub use hash_skip::{HashSkip, PairHash, TripleHash};
pub use sink::{AllMatches, FirstMatch, MatchCount, MatchSink, ScanEnd};
pub use skip_table::SkipTable;

/// Number of distinct byte values; every skip table has this many entries.
pub const ALPHABET: usize = 256;

/// A single-pattern scanning algorithm.
pub trait Scanner {
    /// Short name used in logs, metrics and errors
    const NAME: &'static str;
    /// Shortest pattern the engine accepts
    const MIN_PATTERN_LEN: usize;

    /// Reports every occurrence of the engine's pattern in `haystack` to
    /// `sink`, in ascending order, until the haystack is exhausted or the
    /// sink stops or aborts the scan. Offsets are relative to `haystack`.
    fn scan<S: MatchSink>(&self, haystack: &[u8], sink: &mut S) -> ScanEnd;
}
