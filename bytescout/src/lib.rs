//! Exact byte-pattern search with several engines and concurrent chunking.
//!
//! ```rust
//! use bytescout::{count_occurrences, locate_all, locate_first};
//!
//! assert_eq!(locate_all(b"abracadabra", b"abra").unwrap(), vec![0, 7]);
//! assert_eq!(count_occurrences(b"aaaa", b"aa").unwrap(), 3);
//! assert_eq!(locate_first(b"hello", b"xyz").unwrap(), None);
//! ```
//!
//! The free functions use the large-alphabet [`DispatchTable`]. Build a
//! [`Dispatcher`] for other thresholds or metrics, and a [`ChunkedSearch`] to
//! split one haystack across worker threads.
use once_cell::sync::Lazy;

pub mod config;
pub mod errors;
pub mod logging;
pub mod metrics;
pub mod results;
pub mod search;

pub use config::{AlphabetProfile, SearchConfig};
pub use errors::{SearchError, SearchResult};
pub use logging::init_tracing;
pub use metrics::{SearchMetrics, SearchStats};
pub use results::{ChunkMatches, ChunkOutcome};
pub use search::chunked::{
    count_in_chunk, locate_all_in_chunk, locate_first_in_chunk, partition, ChunkSpec,
    ChunkedSearch,
};
pub use search::{DispatchTable, Dispatcher, EngineKind};

static DEFAULT_DISPATCHER: Lazy<Dispatcher> = Lazy::new(Dispatcher::default);

/// Offset of the first occurrence of `pattern` in `haystack`, or `None`.
pub fn locate_first(haystack: &[u8], pattern: &[u8]) -> SearchResult<Option<usize>> {
    DEFAULT_DISPATCHER.locate_first(haystack, pattern)
}

/// Offsets of every occurrence of `pattern`, ascending, overlaps included.
pub fn locate_all(haystack: &[u8], pattern: &[u8]) -> SearchResult<Vec<usize>> {
    DEFAULT_DISPATCHER.locate_all(haystack, pattern)
}

/// Number of occurrences of `pattern`, overlaps included.
pub fn count_occurrences(haystack: &[u8], pattern: &[u8]) -> SearchResult<usize> {
    DEFAULT_DISPATCHER.count(haystack, pattern)
}
