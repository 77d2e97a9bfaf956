//! Bit-parallel backward scanner (forward-simplified BNDM).
//!
//! Every byte value owns one `u64` occurrence bitmap. Bit `p - i` is set in
//! the bitmap of the byte at position `i` of the filtered window, and bit 0 is
//! set everywhere as a sentinel standing for "the byte just past the window".
//!
//! At window end `j` the pair `hay[j], hay[j + 1]` is tested with one
//! shift-and-AND. A zero result proves no occurrence ends anywhere in
//! `[j, j + p)` and the window jumps by `p`. Otherwise the scan walks backwards,
//! shifting and ANDing in one preceding byte per step while any alignment is
//! still alive. If the walk survives `p - 1` steps the window is an occurrence
//! of the filtered bytes; otherwise it restarts from the leftmost position that
//! could still begin one.
//!
//! Patterns longer than [`MAX_WINDOW`] bytes filter on their last `MAX_WINDOW`
//! bytes only, so the bitmaps fit in a word and preprocessing stays constant.
//! Those candidates are confirmed with a full comparison.
use super::sink::{MatchSink, ScanEnd};
use super::{Scanner, ALPHABET};
use crate::errors::{SearchError, SearchResult};

/// Longest pattern suffix encoded in the bitmaps
pub const MAX_WINDOW: usize = 62;

/// Per-byte bitmask scanner
#[derive(Debug, Clone)]
pub struct BitParallel<'p> {
    pattern: &'p [u8],
    masks: [u64; ALPHABET],
    window: usize,
}

impl<'p> BitParallel<'p> {
    pub fn new(pattern: &'p [u8]) -> SearchResult<Self> {
        let m = pattern.len();
        if m < Self::MIN_PATTERN_LEN {
            return Err(SearchError::pattern_too_short(
                Self::NAME,
                Self::MIN_PATTERN_LEN,
                m,
            ));
        }

        let window = m.min(MAX_WINDOW);
        let mut masks = [1u64; ALPHABET];
        for (i, &b) in pattern[m - window..].iter().enumerate() {
            masks[b as usize] |= 1 << (window - i);
        }
        Ok(Self {
            pattern,
            masks,
            window,
        })
    }

    /// True when only a suffix of the pattern is encoded in the bitmaps.
    pub fn is_long(&self) -> bool {
        self.window < self.pattern.len()
    }

    #[inline(always)]
    fn mask(&self, byte: u8) -> u64 {
        self.masks[byte as usize]
    }
}

impl Scanner for BitParallel<'_> {
    const NAME: &'static str = "bit-parallel";
    const MIN_PATTERN_LEN: usize = 2;

    fn scan<S: MatchSink>(&self, haystack: &[u8], sink: &mut S) -> ScanEnd {
        let n = haystack.len();
        let m = self.pattern.len();
        let p = self.window;
        if n < m {
            return ScanEnd::Exhausted;
        }
        if n == m {
            if haystack == self.pattern && sink.on_match(0).is_break() {
                return ScanEnd::Stopped;
            }
            return ScanEnd::Exhausted;
        }

        let long = self.is_long();
        let mut j = m - 1;
        while j < n {
            if sink.should_abort() {
                return ScanEnd::Aborted;
            }

            // Past the haystack end only the sentinel bit can line up.
            let ahead = haystack.get(j + 1).map_or(1, |&b| self.mask(b));
            let mut bits = (ahead << 1) & self.mask(haystack[j]);
            if bits == 0 {
                j += p;
                continue;
            }

            let last = j;
            while j > 0 {
                bits = (bits << 1) & self.mask(haystack[j - 1]);
                if bits == 0 {
                    break;
                }
                j -= 1;
            }
            j += p - 1;

            if j == last {
                let start = last + 1 - m;
                let confirmed = !long || &haystack[start..=last] == self.pattern;
                if confirmed && sink.on_match(start).is_break() {
                    return ScanEnd::Stopped;
                }
                j += 1;
            }
        }
        ScanEnd::Exhausted
    }
}
