//! Match delivery for the scan loops.
//!
//! Every engine runs one scan loop that is generic over a [`MatchSink`]. The
//! three operation modes (first match, all matches, count) are just different
//! sinks, so each engine's index arithmetic exists exactly once.
use std::ops::ControlFlow;

/// Receives verified occurrences from a scan loop.
pub trait MatchSink {
    /// Called for every verified occurrence, in ascending offset order.
    /// Returning `ControlFlow::Break` stops the scan.
    fn on_match(&mut self, offset: usize) -> ControlFlow<()>;

    /// Polled once per scan-loop iteration. Returning `true` abandons the scan.
    #[inline]
    fn should_abort(&mut self) -> bool {
        false
    }
}

/// How a scan loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEnd {
    /// The whole haystack was examined
    Exhausted,
    /// The sink asked to stop after a match
    Stopped,
    /// `should_abort` returned true
    Aborted,
}

/// Keeps the first occurrence and stops.
#[derive(Debug, Default)]
pub struct FirstMatch {
    pub offset: Option<usize>,
}

impl MatchSink for FirstMatch {
    #[inline]
    fn on_match(&mut self, offset: usize) -> ControlFlow<()> {
        self.offset = Some(offset);
        ControlFlow::Break(())
    }
}

/// Collects every occurrence.
#[derive(Debug, Default)]
pub struct AllMatches {
    pub offsets: Vec<usize>,
}

impl AllMatches {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            offsets: Vec::with_capacity(capacity),
        }
    }
}

impl MatchSink for AllMatches {
    #[inline]
    fn on_match(&mut self, offset: usize) -> ControlFlow<()> {
        self.offsets.push(offset);
        ControlFlow::Continue(())
    }
}

/// Counts occurrences without storing them.
#[derive(Debug, Default)]
pub struct MatchCount {
    pub count: usize,
}

impl MatchSink for MatchCount {
    #[inline]
    fn on_match(&mut self, _offset: usize) -> ControlFlow<()> {
        self.count += 1;
        ControlFlow::Continue(())
    }
}

/// Initial capacity for an all-matches result over `haystack_len` bytes.
pub fn capacity_hint(haystack_len: usize, pattern_len: usize) -> usize {
    100 + ((haystack_len / (1 + pattern_len)) >> 8)
}
