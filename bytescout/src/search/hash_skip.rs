//! Hashed q-gram bad-character scanner.
//!
//! Instead of keying the skip table on a single byte, the last `Q` bytes under
//! the cursor are folded into one table index. Adjacent-pair hashing (`Q = 2`)
//! serves medium patterns; triple hashing (`Q = 3`) trades a little more work
//! per step for far fewer false candidates on very long patterns, whose pair
//! table would otherwise fill up with small shifts.
//!
//! Preprocessing stores, for each q-gram ending at pattern position `i`, the
//! shift `m - 1 - i` (default `m - Q + 1`). The pattern's final q-gram maps to
//! zero, so the scan spins through "many small shifts" until it lands on a
//! window whose last q-gram hashes like the pattern's, then verifies it.
//!
//! After verification the next jump is never a blind `+1`:
//! * full match or trailing-side mismatch: the shift the final q-gram had
//!   before it was zeroed,
//! * leading-side mismatch at inner position `j`: the larger of that shift
//!   and the border shift of the matched prefix `pattern[..j]`.
//!
//! Both shifts are individually safe, so taking their maximum is too.
use super::sink::{MatchSink, ScanEnd};
use super::verify::{prefix_shifts, zigzag, Verdict};
use super::{Scanner, ALPHABET};
use crate::errors::{SearchError, SearchResult};

/// Adjacent byte-pair variant
pub type PairHash<'p> = HashSkip<'p, 2>;
/// Byte-triple variant for very long patterns
pub type TripleHash<'p> = HashSkip<'p, 3>;

/// Q-gram hashed bad-character scanner
#[derive(Debug, Clone)]
pub struct HashSkip<'p, const Q: usize> {
    pattern: &'p [u8],
    shift: [usize; ALPHABET],
    tail_shift: usize,
    prefix_shift: Vec<usize>,
}

/// Folds the `Q` bytes ending at `end` into a table index.
#[inline(always)]
fn fingerprint<const Q: usize>(bytes: &[u8], end: usize) -> usize {
    let h = if Q == 2 {
        bytes[end - 1].wrapping_add(bytes[end] << 2)
    } else {
        (bytes[end - 2] << 2)
            .wrapping_add(bytes[end - 1] << 1)
            .wrapping_add(bytes[end])
    };
    h as usize
}

impl<'p, const Q: usize> HashSkip<'p, Q> {
    pub fn new(pattern: &'p [u8]) -> SearchResult<Self> {
        let m = pattern.len();
        if m < Self::MIN_PATTERN_LEN {
            return Err(SearchError::pattern_too_short(
                Self::NAME,
                Self::MIN_PATTERN_LEN,
                m,
            ));
        }

        let mut shift = [m - Q + 1; ALPHABET];
        for i in Q - 1..m - 1 {
            shift[fingerprint::<Q>(pattern, i)] = m - 1 - i;
        }
        let last = fingerprint::<Q>(pattern, m - 1);
        let tail_shift = shift[last];
        shift[last] = 0;

        Ok(Self {
            pattern,
            shift,
            tail_shift,
            prefix_shift: prefix_shifts(pattern),
        })
    }
}

impl<const Q: usize> Scanner for HashSkip<'_, Q> {
    const NAME: &'static str = if Q == 2 { "hash-pair" } else { "hash-triple" };
    const MIN_PATTERN_LEN: usize = Q;

    fn scan<S: MatchSink>(&self, haystack: &[u8], sink: &mut S) -> ScanEnd {
        let n = haystack.len();
        let m = self.pattern.len();
        if n < m {
            return ScanEnd::Exhausted;
        }

        let mut end = m - 1;
        while end < n {
            if sink.should_abort() {
                return ScanEnd::Aborted;
            }

            loop {
                let step = self.shift[fingerprint::<Q>(haystack, end)];
                if step == 0 {
                    break;
                }
                end += step;
                if end >= n {
                    return ScanEnd::Exhausted;
                }
            }

            let start = end + 1 - m;
            end += match zigzag(&haystack[start..=end], self.pattern) {
                Verdict::Match => {
                    if sink.on_match(start).is_break() {
                        return ScanEnd::Stopped;
                    }
                    self.tail_shift
                }
                Verdict::Leading(j) => self.tail_shift.max(self.prefix_shift[j]),
                Verdict::Edges | Verdict::Trailing(_) => self.tail_shift,
            };
        }
        ScanEnd::Exhausted
    }
}
