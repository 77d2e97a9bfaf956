//! Result types produced by chunked searches and the reductions that turn
//! per-chunk answers back into whole-haystack answers.

/// What a single first-match worker learned about its chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkOutcome {
    /// The first occurrence whose last byte lies inside the chunk, as an
    /// absolute haystack offset.
    Found(usize),
    /// The chunk was scanned to its end without an occurrence.
    NotFound,
    /// The worker stopped because an earlier chunk already reported a match
    /// that this chunk can never beat. Not the same as `NotFound`.
    Deferred,
}

impl ChunkOutcome {
    /// The reported offset, if any
    pub fn offset(&self) -> Option<usize> {
        match *self {
            ChunkOutcome::Found(offset) => Some(offset),
            ChunkOutcome::NotFound | ChunkOutcome::Deferred => None,
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, ChunkOutcome::Deferred)
    }
}

/// Matches reported by one all-matches worker, tagged with the chunk's
/// position in the partition so the caller can restore ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkMatches {
    /// Index of the chunk within its partition
    pub chunk_index: usize,
    /// Absolute, strictly ascending match offsets
    pub offsets: Vec<usize>,
}

/// Reduces first-match outcomes to the final answer.
///
/// Only meaningful once every worker has finished: the minimum of all `Found`
/// offsets is authoritative because any chunk that deferred did so in favour of
/// a strictly smaller offset that is itself among the outcomes.
pub fn reduce_first<I>(outcomes: I) -> Option<usize>
where
    I: IntoIterator<Item = ChunkOutcome>,
{
    outcomes.into_iter().filter_map(|o| o.offset()).min()
}

/// Concatenates per-chunk match lists in chunk order.
///
/// Workers finish in arbitrary order; sorting by chunk index restores the
/// global ascending order because chunk ranges never report the same
/// occurrence twice.
pub fn merge_ordered(mut parts: Vec<ChunkMatches>) -> Vec<usize> {
    parts.sort_unstable_by_key(|part| part.chunk_index);
    let total = parts.iter().map(|part| part.offsets.len()).sum();
    let mut merged = Vec::with_capacity(total);
    for part in parts {
        merged.extend(part.offsets);
    }
    merged
}
