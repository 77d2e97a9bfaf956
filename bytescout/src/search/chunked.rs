//! Concurrent search over one haystack split into chunks.
//!
//! A chunk `(base_offset, len)` owns every occurrence whose *last* byte falls
//! inside it. To see those occurrences a worker scans from `m - 1` bytes before
//! the chunk, so an occurrence straddling a boundary is found exactly once, by
//! the chunk holding its end.
//!
//! For all-matches and count the per-chunk answers are simply merged. First
//! match needs coordination: every worker that finds an occurrence offers it to
//! a shared [`CancellationToken`], and a worker whose scanned range starts
//! after the best offer so far gives up with [`ChunkOutcome::Deferred`]. The
//! caller waits for one [`Completion`] per worker before reducing, so the
//! answer is final only once every chunk has reported.
use crossbeam_channel::{Receiver, Sender};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::num::NonZeroUsize;
use std::ops::{ControlFlow, Range};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, trace};

use super::dispatch::{Dispatcher, Engine};
use super::sink::{capacity_hint, AllMatches, FirstMatch, MatchCount, MatchSink, ScanEnd};
use crate::config::SearchConfig;
use crate::errors::{check_lengths, SearchError, SearchResult};
use crate::results::{merge_ordered, reduce_first, ChunkMatches, ChunkOutcome};

/// Haystacks are not split into chunks shorter than this by default
pub const DEFAULT_MIN_CHUNK_LEN: usize = 64 * 1024;

/// One contiguous piece of a haystack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSpec {
    pub base_offset: usize,
    pub len: usize,
}

impl ChunkSpec {
    pub fn new(base_offset: usize, len: usize) -> Self {
        Self { base_offset, len }
    }

    /// One past the chunk's last byte
    pub fn end(&self) -> usize {
        self.base_offset.saturating_add(self.len)
    }

    /// Bytes a worker must scan to find every occurrence of a `pattern_len`
    /// byte pattern that ends inside this chunk.
    pub fn scanned_range(&self, pattern_len: usize) -> Range<usize> {
        self.base_offset.saturating_sub(pattern_len.saturating_sub(1))..self.end()
    }

    fn check(&self, haystack_len: usize) -> SearchResult<()> {
        match self.base_offset.checked_add(self.len) {
            Some(end) if end <= haystack_len => Ok(()),
            _ => Err(SearchError::invalid_chunk(
                self.base_offset,
                self.len,
                haystack_len,
            )),
        }
    }
}

/// Splits `haystack_len` bytes into at most `chunk_count` contiguous chunks of
/// near-equal length, none shorter than `min_chunk_len` unless the whole
/// haystack is. Always returns at least one chunk.
pub fn partition(haystack_len: usize, chunk_count: usize, min_chunk_len: usize) -> Vec<ChunkSpec> {
    let fits = (haystack_len / min_chunk_len.max(1)).max(1);
    let count = chunk_count.clamp(1, fits);
    let (base_len, extra) = (haystack_len / count, haystack_len % count);

    let mut offset = 0;
    (0..count)
        .map(|i| {
            let len = base_len + usize::from(i < extra);
            let chunk = ChunkSpec::new(offset, len);
            offset += len;
            chunk
        })
        .collect()
}

/// Checks that `chunks` are in order, contiguous and cover exactly
/// `haystack_len` bytes.
pub fn validate_partition(chunks: &[ChunkSpec], haystack_len: usize) -> SearchResult<()> {
    let last = chunks
        .last()
        .ok_or_else(|| SearchError::config_error("chunk partition is empty"))?;

    let mut expected = 0;
    for chunk in chunks {
        if chunk.base_offset != expected {
            return Err(SearchError::invalid_chunk(
                chunk.base_offset,
                chunk.len,
                haystack_len,
            ));
        }
        chunk.check(haystack_len)?;
        expected = chunk.end();
    }
    if expected != haystack_len {
        return Err(SearchError::invalid_chunk(
            last.base_offset,
            last.len,
            haystack_len,
        ));
    }
    Ok(())
}

/// Best first-match offset known so far, shared by the workers of one search
#[derive(Debug)]
pub struct CancellationToken {
    best: AtomicUsize,
}

impl CancellationToken {
    const UNSET: usize = usize::MAX;

    pub fn new() -> Self {
        Self {
            best: AtomicUsize::new(Self::UNSET),
        }
    }

    /// Publishes a found offset. Returns true if it improved the best one.
    pub fn offer(&self, offset: usize) -> bool {
        self.best.fetch_min(offset, Ordering::AcqRel) > offset
    }

    pub fn best(&self) -> Option<usize> {
        match self.best.load(Ordering::Acquire) {
            Self::UNSET => None,
            best => Some(best),
        }
    }

    /// True once an offset strictly below `start` has been offered.
    #[inline]
    pub fn beats(&self, start: usize) -> bool {
        self.best.load(Ordering::Relaxed) < start
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Completion signal of one worker. `result` is `None` if the worker unwound
/// before reporting.
#[derive(Debug)]
pub struct Completion<T> {
    pub index: usize,
    pub result: Option<T>,
}

/// Sends exactly one [`Completion`] for worker `index`: the value passed to
/// [`complete`](Self::complete), or `None` when dropped without one.
#[derive(Debug)]
pub struct CompletionGuard<T> {
    index: usize,
    tx: Sender<Completion<T>>,
    sent: bool,
}

impl<T> CompletionGuard<T> {
    pub fn new(index: usize, tx: Sender<Completion<T>>) -> Self {
        Self {
            index,
            tx,
            sent: false,
        }
    }

    pub fn complete(mut self, result: T) {
        self.send(Some(result));
    }

    fn send(&mut self, result: Option<T>) {
        if self.sent {
            return;
        }
        self.sent = true;
        // The receiver only goes away once it stopped waiting.
        let _ = self.tx.send(Completion {
            index: self.index,
            result,
        });
    }
}

impl<T> Drop for CompletionGuard<T> {
    fn drop(&mut self) {
        self.send(None);
    }
}

/// Blocks until `expected` completions arrived or every sender is gone.
/// Completions are returned in arrival order.
pub fn await_completions<T>(rx: &Receiver<Completion<T>>, expected: usize) -> Vec<Completion<T>> {
    rx.iter().take(expected).collect()
}

/// Shifts chunk-relative offsets to haystack offsets and, for first-match
/// workers, abandons the scan once another chunk has a better answer.
struct ChunkSink<'t, S> {
    inner: S,
    origin: usize,
    token: Option<&'t CancellationToken>,
}

impl<'t, S> ChunkSink<'t, S> {
    fn new(inner: S, origin: usize, token: Option<&'t CancellationToken>) -> Self {
        Self {
            inner,
            origin,
            token,
        }
    }
}

impl<S: MatchSink> MatchSink for ChunkSink<'_, S> {
    #[inline]
    fn on_match(&mut self, offset: usize) -> ControlFlow<()> {
        self.inner.on_match(self.origin + offset)
    }

    #[inline]
    fn should_abort(&mut self) -> bool {
        self.token.is_some_and(|token| token.beats(self.origin)) || self.inner.should_abort()
    }
}

fn prepare_chunk<'p>(
    dispatcher: &Dispatcher,
    haystack: &[u8],
    pattern: &'p [u8],
    chunk: ChunkSpec,
) -> SearchResult<(Engine<'p>, Range<usize>)> {
    check_lengths(haystack.len(), pattern.len())?;
    chunk.check(haystack.len())?;
    let engine = dispatcher.prepare(pattern)?;
    Ok((engine, chunk.scanned_range(pattern.len())))
}

/// First occurrence ending inside `chunk`.
///
/// Returns [`ChunkOutcome::Deferred`] when `token` already holds an offset
/// smaller than anything this chunk could report. A found offset is offered to
/// `token` before returning.
pub fn locate_first_in_chunk(
    dispatcher: &Dispatcher,
    haystack: &[u8],
    pattern: &[u8],
    chunk: ChunkSpec,
    token: &CancellationToken,
) -> SearchResult<ChunkOutcome> {
    let (engine, range) = prepare_chunk(dispatcher, haystack, pattern, chunk)?;
    let mut sink = ChunkSink::new(FirstMatch::default(), range.start, Some(token));
    let end = engine.scan(&haystack[range], &mut sink);

    Ok(match (end, sink.inner.offset) {
        (ScanEnd::Aborted, _) => ChunkOutcome::Deferred,
        (_, Some(offset)) => {
            token.offer(offset);
            ChunkOutcome::Found(offset)
        }
        (_, None) => ChunkOutcome::NotFound,
    })
}

/// Every occurrence ending inside `chunk`, as ascending haystack offsets.
/// `capacity` defaults to a hint derived from the chunk and pattern lengths.
pub fn locate_all_in_chunk(
    dispatcher: &Dispatcher,
    haystack: &[u8],
    pattern: &[u8],
    chunk: ChunkSpec,
    capacity: Option<usize>,
) -> SearchResult<Vec<usize>> {
    let (engine, range) = prepare_chunk(dispatcher, haystack, pattern, chunk)?;
    let capacity = capacity.unwrap_or_else(|| capacity_hint(chunk.len, pattern.len()));
    let mut sink = ChunkSink::new(AllMatches::with_capacity(capacity), range.start, None);
    engine.scan(&haystack[range], &mut sink);
    Ok(sink.inner.offsets)
}

/// Number of occurrences ending inside `chunk`.
pub fn count_in_chunk(
    dispatcher: &Dispatcher,
    haystack: &[u8],
    pattern: &[u8],
    chunk: ChunkSpec,
) -> SearchResult<usize> {
    let (engine, range) = prepare_chunk(dispatcher, haystack, pattern, chunk)?;
    let mut sink = ChunkSink::new(MatchCount::default(), range.start, None);
    engine.scan(&haystack[range], &mut sink);
    Ok(sink.inner.count)
}

/// Runs one engine per chunk on a bounded pool of worker threads
///
/// Each chunk is scanned start to finish by a single pool thread.
#[derive(Debug)]
pub struct ChunkedSearch {
    dispatcher: Dispatcher,
    pool: ThreadPool,
    chunk_count: NonZeroUsize,
    min_chunk_len: usize,
}

impl ChunkedSearch {
    /// Creates a coordinator with `thread_count` workers and as many chunks.
    pub fn new(dispatcher: Dispatcher, thread_count: NonZeroUsize) -> SearchResult<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(thread_count.get())
            .thread_name(|i| format!("bytescout-chunk-{i}"))
            .build()
            .map_err(|e| SearchError::thread_pool(e.to_string()))?;
        Ok(Self {
            dispatcher,
            pool,
            chunk_count: thread_count,
            min_chunk_len: DEFAULT_MIN_CHUNK_LEN,
        })
    }

    pub fn from_config(config: &SearchConfig) -> SearchResult<Self> {
        let dispatcher = Dispatcher::new(config.dispatch_table());
        Ok(Self::new(dispatcher, config.thread_count)?
            .with_chunking(config.chunk_count(), config.min_chunk_len))
    }

    pub fn with_chunking(mut self, chunk_count: NonZeroUsize, min_chunk_len: usize) -> Self {
        self.chunk_count = chunk_count;
        self.min_chunk_len = min_chunk_len;
        self
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn thread_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// The partition used for a haystack of `haystack_len` bytes
    pub fn partition(&self, haystack_len: usize) -> Vec<ChunkSpec> {
        partition(haystack_len, self.chunk_count.get(), self.min_chunk_len)
    }

    pub fn locate_first(&self, haystack: &[u8], pattern: &[u8]) -> SearchResult<Option<usize>> {
        self.locate_first_with_chunks(haystack, pattern, &self.partition(haystack.len()))
    }

    pub fn locate_all(&self, haystack: &[u8], pattern: &[u8]) -> SearchResult<Vec<usize>> {
        self.locate_all_with_chunks(haystack, pattern, &self.partition(haystack.len()))
    }

    pub fn count(&self, haystack: &[u8], pattern: &[u8]) -> SearchResult<usize> {
        self.count_with_chunks(haystack, pattern, &self.partition(haystack.len()))
    }

    pub fn locate_first_with_chunks(
        &self,
        haystack: &[u8],
        pattern: &[u8],
        chunks: &[ChunkSpec],
    ) -> SearchResult<Option<usize>> {
        self.begin(haystack, pattern, chunks)?;
        let token = CancellationToken::new();
        let outcomes = self.run(chunks, |_, chunk| {
            locate_first_in_chunk(&self.dispatcher, haystack, pattern, chunk, &token)
        })?;

        let deferred = outcomes.iter().filter(|o| o.is_deferred()).count();
        let first = reduce_first(outcomes);
        self.finish(chunks.len(), deferred, usize::from(first.is_some()));
        Ok(first)
    }

    pub fn locate_all_with_chunks(
        &self,
        haystack: &[u8],
        pattern: &[u8],
        chunks: &[ChunkSpec],
    ) -> SearchResult<Vec<usize>> {
        self.begin(haystack, pattern, chunks)?;
        let parts = self.run(chunks, |chunk_index, chunk| {
            let offsets = locate_all_in_chunk(&self.dispatcher, haystack, pattern, chunk, None)?;
            Ok(ChunkMatches {
                chunk_index,
                offsets,
            })
        })?;

        let offsets = merge_ordered(parts);
        self.finish(chunks.len(), 0, offsets.len());
        Ok(offsets)
    }

    pub fn count_with_chunks(
        &self,
        haystack: &[u8],
        pattern: &[u8],
        chunks: &[ChunkSpec],
    ) -> SearchResult<usize> {
        self.begin(haystack, pattern, chunks)?;
        let counts = self.run(chunks, |_, chunk| {
            count_in_chunk(&self.dispatcher, haystack, pattern, chunk)
        })?;

        let total: usize = counts.into_iter().sum();
        self.finish(chunks.len(), 0, total);
        Ok(total)
    }

    /// Validates the whole request up front so workers cannot fail.
    fn begin(&self, haystack: &[u8], pattern: &[u8], chunks: &[ChunkSpec]) -> SearchResult<()> {
        check_lengths(haystack.len(), pattern.len())?;
        validate_partition(chunks, haystack.len())?;
        let kind = self.dispatcher.table().select(pattern.len());
        debug!(
            "Searching {} bytes in {} chunks for a {} byte pattern with {}",
            haystack.len(),
            chunks.len(),
            pattern.len(),
            kind
        );
        if let Some(metrics) = self.dispatcher.metrics() {
            metrics.record_search(kind);
        }
        Ok(())
    }

    fn finish(&self, spawned: usize, deferred: usize, matches: usize) {
        debug!(
            "Chunked search done: {} workers, {} deferred, {} matches",
            spawned, deferred, matches
        );
        if let Some(metrics) = self.dispatcher.metrics() {
            metrics.record_workers(spawned as u64, deferred as u64);
            metrics.record_matches(matches as u64);
        }
    }

    /// Runs `work` once per chunk on the pool and waits for every worker.
    /// Results come back in completion order.
    fn run<T, F>(&self, chunks: &[ChunkSpec], work: F) -> SearchResult<Vec<T>>
    where
        T: Send,
        F: Fn(usize, ChunkSpec) -> SearchResult<T> + Sync,
    {
        let (tx, rx) = crossbeam_channel::unbounded();
        let completions = self.pool.in_place_scope(|scope| {
            for (index, &chunk) in chunks.iter().enumerate() {
                let guard = CompletionGuard::new(index, tx.clone());
                let work = &work;
                scope.spawn(move |_| {
                    trace!(
                        "Chunk {} started: {} bytes at offset {}",
                        index,
                        chunk.len,
                        chunk.base_offset
                    );
                    let result = work(index, chunk);
                    trace!("Chunk {} finished", index);
                    guard.complete(result);
                });
            }
            drop(tx);
            await_completions(&rx, chunks.len())
        });

        if completions.len() != chunks.len() {
            return Err(SearchError::thread_pool(format!(
                "{} of {} chunk workers reported",
                completions.len(),
                chunks.len()
            )));
        }
        completions
            .into_iter()
            .map(|completion| {
                completion.result.unwrap_or_else(|| {
                    Err(SearchError::thread_pool(format!(
                        "chunk worker {} exited without a result",
                        completion.index
                    )))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(haystack: &[u8], pattern: &[u8]) -> Vec<usize> {
        haystack
            .windows(pattern.len())
            .enumerate()
            .filter(|(_, w)| *w == pattern)
            .map(|(i, _)| i)
            .collect()
    }

    fn coordinator(threads: usize) -> ChunkedSearch {
        ChunkedSearch::new(Dispatcher::default(), NonZeroUsize::new(threads).unwrap()).unwrap()
    }

    #[test]
    fn test_partition_covers_haystack() {
        let chunks = partition(10, 3, 1);
        assert_eq!(
            chunks,
            vec![ChunkSpec::new(0, 4), ChunkSpec::new(4, 3), ChunkSpec::new(7, 3)]
        );
        assert!(validate_partition(&chunks, 10).is_ok());

        assert_eq!(partition(0, 4, 16), vec![ChunkSpec::new(0, 0)]);
        assert_eq!(partition(100, 8, 40), vec![ChunkSpec::new(0, 50), ChunkSpec::new(50, 50)]);
        assert_eq!(partition(5, 0, 0), vec![ChunkSpec::new(0, 5)]);
    }

    #[test]
    fn test_scanned_range_extends_backwards() {
        let chunk = ChunkSpec::new(10, 5);
        assert_eq!(chunk.scanned_range(1), 10..15);
        assert_eq!(chunk.scanned_range(4), 7..15);
        assert_eq!(chunk.scanned_range(30), 0..15);
    }

    #[test]
    fn test_validate_partition_rejects_gaps_and_overruns() {
        assert!(validate_partition(&[], 4).is_err());
        assert_eq!(
            validate_partition(&[ChunkSpec::new(0, 2), ChunkSpec::new(3, 1)], 4),
            Err(SearchError::invalid_chunk(3, 1, 4))
        );
        assert_eq!(
            validate_partition(&[ChunkSpec::new(0, 5)], 4),
            Err(SearchError::invalid_chunk(0, 5, 4))
        );
        assert_eq!(
            validate_partition(&[ChunkSpec::new(0, 3)], 4),
            Err(SearchError::invalid_chunk(0, 3, 4))
        );
        assert!(validate_partition(&[ChunkSpec::new(0, 0), ChunkSpec::new(0, 4)], 4).is_ok());
    }

    #[test]
    fn test_token_keeps_minimum() {
        let token = CancellationToken::new();
        assert_eq!(token.best(), None);
        assert!(!token.beats(0));
        assert!(!token.beats(usize::MAX - 1));

        assert!(token.offer(40));
        assert!(!token.offer(50));
        assert!(token.offer(12));
        assert_eq!(token.best(), Some(12));
        assert!(token.beats(13));
        assert!(!token.beats(12));
    }

    #[test]
    fn test_completion_guard_signals_once() {
        let (tx, rx) = crossbeam_channel::unbounded();
        CompletionGuard::new(0, tx.clone()).complete("done");
        drop(CompletionGuard::<&str>::new(1, tx.clone()));
        drop(tx);

        let completions = await_completions(&rx, 5);
        assert_eq!(completions.len(), 2);
        assert_eq!(completions[0].index, 0);
        assert_eq!(completions[0].result, Some("done"));
        assert_eq!(completions[1].index, 1);
        assert_eq!(completions[1].result, None);
    }

    #[test]
    fn test_boundary_straddling_match_belongs_to_its_last_byte() {
        let dispatcher = Dispatcher::default();
        let haystack = b"xxxxabcdxxxx";
        let token = CancellationToken::new();

        let left = ChunkSpec::new(0, 6);
        let right = ChunkSpec::new(6, 6);
        assert_eq!(
            locate_first_in_chunk(&dispatcher, haystack, b"abcd", left, &token).unwrap(),
            ChunkOutcome::NotFound
        );
        assert_eq!(
            locate_first_in_chunk(&dispatcher, haystack, b"abcd", right, &token).unwrap(),
            ChunkOutcome::Found(4)
        );
        assert_eq!(token.best(), Some(4));

        assert_eq!(locate_all_in_chunk(&dispatcher, haystack, b"abcd", left, None).unwrap(), Vec::<usize>::new());
        assert_eq!(locate_all_in_chunk(&dispatcher, haystack, b"abcd", right, Some(1)).unwrap(), vec![4]);
        assert_eq!(count_in_chunk(&dispatcher, haystack, b"abcd", right).unwrap(), 1);
    }

    #[test]
    fn test_worker_defers_to_earlier_match() {
        let dispatcher = Dispatcher::default();
        let haystack = vec![b'a'; 256];
        let chunk = ChunkSpec::new(128, 128);

        let token = CancellationToken::new();
        token.offer(3);
        assert_eq!(
            locate_first_in_chunk(&dispatcher, &haystack, b"a", chunk, &token).unwrap(),
            ChunkOutcome::Deferred
        );
        assert_eq!(
            locate_first_in_chunk(&dispatcher, &haystack, b"aaaa", chunk, &token).unwrap(),
            ChunkOutcome::Deferred
        );

        // A later best offset does not stop an earlier chunk.
        let token = CancellationToken::new();
        token.offer(200);
        assert_eq!(
            locate_first_in_chunk(&dispatcher, &haystack, b"aaaa", chunk, &token).unwrap(),
            ChunkOutcome::Found(125)
        );
        assert_eq!(token.best(), Some(125));
    }

    #[test]
    fn test_chunk_inputs_are_validated() {
        let dispatcher = Dispatcher::default();
        let token = CancellationToken::new();
        assert_eq!(
            locate_first_in_chunk(&dispatcher, b"abc", b"b", ChunkSpec::new(2, 5), &token),
            Err(SearchError::invalid_chunk(2, 5, 3))
        );
        assert_eq!(
            count_in_chunk(&dispatcher, b"abc", b"abcd", ChunkSpec::new(0, 3)),
            Err(SearchError::pattern_too_long(4, 3))
        );
        assert_eq!(
            locate_all_in_chunk(&dispatcher, b"abc", b"", ChunkSpec::new(0, 3), None),
            Err(SearchError::EmptyPattern)
        );
    }

    #[test]
    fn test_chunked_matches_single_threaded() {
        let haystack: Vec<u8> = b"the cat sat on the mat with the hat "
            .iter()
            .copied()
            .cycle()
            .take(5_000)
            .collect();
        let search = coordinator(4).with_chunking(NonZeroUsize::new(7).unwrap(), 1);
        assert_eq!(search.partition(haystack.len()).len(), 7);

        for pattern in [&b"t"[..], b"at", b"the ", b"hat the cat"] {
            let expected = naive(&haystack, pattern);
            assert_eq!(search.locate_all(&haystack, pattern).unwrap(), expected);
            assert_eq!(search.count(&haystack, pattern).unwrap(), expected.len());
            assert_eq!(
                search.locate_first(&haystack, pattern).unwrap(),
                expected.first().copied()
            );
        }
        assert_eq!(search.locate_first(&haystack, b"dog").unwrap(), None);
    }

    #[test]
    fn test_first_match_in_last_chunk() {
        let mut haystack = vec![b'.'; 1_000];
        haystack[990..994].copy_from_slice(b"find");
        let search = coordinator(3).with_chunking(NonZeroUsize::new(10).unwrap(), 1);
        assert_eq!(search.locate_first(&haystack, b"find").unwrap(), Some(990));
    }

    #[test]
    fn test_explicit_chunks() {
        let haystack = b"abababababab";
        let search = coordinator(2);
        let chunks = [ChunkSpec::new(0, 3), ChunkSpec::new(3, 1), ChunkSpec::new(4, 8)];
        assert_eq!(
            search.locate_all_with_chunks(haystack, b"aba", &chunks).unwrap(),
            vec![0, 2, 4, 6, 8]
        );
        assert_eq!(search.count_with_chunks(haystack, b"bab", &chunks).unwrap(), 5);
        assert_eq!(
            search.locate_first_with_chunks(haystack, b"bab", &chunks).unwrap(),
            Some(1)
        );
        assert!(search
            .count_with_chunks(haystack, b"ab", &[ChunkSpec::new(0, 6)])
            .is_err());
    }

    #[test]
    fn test_metrics_are_recorded() {
        let metrics = crate::metrics::SearchMetrics::new();
        let search = ChunkedSearch::new(
            Dispatcher::default().with_metrics(metrics.clone()),
            NonZeroUsize::new(2).unwrap(),
        )
        .unwrap()
        .with_chunking(NonZeroUsize::new(4).unwrap(), 1);

        assert_eq!(search.count(b"banana bandana", b"an").unwrap(), 4);
        let stats = metrics.get_stats();
        assert_eq!(stats.bit_parallel, 1);
        assert_eq!(stats.chunk_workers, 4);
        assert_eq!(stats.matches, 4);
    }
}
