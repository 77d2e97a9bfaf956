//! Horspool-style skip-table scanner with a quick-search look-ahead.
//!
//! Preprocessing maps every byte to its distance from the pattern's end
//! (`m - 1 - i` for its rightmost position `i`, `m` when absent). The last
//! pattern byte therefore maps to zero, which is what marks a candidate.
//!
//! Per candidate window ending at `end` the loop:
//! 1. peeks at `hay[end + 1]` to compute the quick-search jump,
//! 2. zigzag-verifies the window,
//! 3. advances through the table until the byte under the cursor maps to
//!    zero (a new candidate) or the cursor leaves the haystack.
use super::sink::{MatchSink, ScanEnd};
use super::verify::{zigzag, Verdict};
use super::{Scanner, ALPHABET};
use crate::errors::{SearchError, SearchResult};

/// Single-byte bad-character scanner
#[derive(Debug, Clone)]
pub struct SkipTable<'p> {
    pattern: &'p [u8],
    shift: [usize; ALPHABET],
}

impl<'p> SkipTable<'p> {
    pub fn new(pattern: &'p [u8]) -> SearchResult<Self> {
        let m = pattern.len();
        if m < Self::MIN_PATTERN_LEN {
            return Err(SearchError::pattern_too_short(
                Self::NAME,
                Self::MIN_PATTERN_LEN,
                m,
            ));
        }

        let mut shift = [m; ALPHABET];
        for (i, &b) in pattern.iter().enumerate() {
            shift[b as usize] = m - 1 - i;
        }
        Ok(Self { pattern, shift })
    }

    /// Moves `end` forward until it sits on a byte equal to the pattern's last
    /// byte, or runs past `n`.
    #[inline(always)]
    fn advance(&self, haystack: &[u8], mut end: usize) -> usize {
        while end < haystack.len() {
            let step = self.shift[haystack[end] as usize];
            if step == 0 {
                break;
            }
            end += step;
        }
        end
    }
}

impl Scanner for SkipTable<'_> {
    const NAME: &'static str = "skip-table";
    const MIN_PATTERN_LEN: usize = 2;

    fn scan<S: MatchSink>(&self, haystack: &[u8], sink: &mut S) -> ScanEnd {
        let n = haystack.len();
        let m = self.pattern.len();
        if n < m {
            return ScanEnd::Exhausted;
        }

        let mut end = self.advance(haystack, m - 1);
        while end < n {
            if sink.should_abort() {
                return ScanEnd::Aborted;
            }

            let look_ahead = match haystack.get(end + 1) {
                Some(&next) => end + 1 + self.shift[next as usize],
                None => n,
            };

            let start = end + 1 - m;
            if zigzag(&haystack[start..=end], self.pattern) == Verdict::Match
                && sink.on_match(start).is_break()
            {
                return ScanEnd::Stopped;
            }

            end = self.advance(haystack, look_ahead);
        }
        ScanEnd::Exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::sink::{AllMatches, FirstMatch, MatchCount};

    fn all(haystack: &[u8], pattern: &[u8]) -> Vec<usize> {
        let mut sink = AllMatches::default();
        SkipTable::new(pattern).unwrap().scan(haystack, &mut sink);
        sink.offsets
    }

    #[test]
    fn test_table_layout() {
        let engine = SkipTable::new(b"abcab").unwrap();
        assert_eq!(engine.shift[b'b' as usize], 0);
        assert_eq!(engine.shift[b'a' as usize], 1);
        assert_eq!(engine.shift[b'c' as usize], 2);
        assert_eq!(engine.shift[b'z' as usize], 5);
    }

    #[test]
    fn test_rejects_single_byte() {
        assert_eq!(
            SkipTable::new(b"a").unwrap_err(),
            SearchError::pattern_too_short("skip-table", 2, 1)
        );
    }

    #[test]
    fn test_find_all() {
        assert_eq!(all(b"abracadabra", b"abra"), vec![0, 7]);
        assert_eq!(all(b"aaaa", b"aa"), vec![0, 1, 2]);
        assert_eq!(all(b"hello", b"xyz"), Vec::<usize>::new());
        assert_eq!(all(b"needle", b"needle"), vec![0]);
        assert_eq!(all(b"xxabcabcabc", b"abcabc"), vec![2, 5]);
    }

    #[test]
    fn test_match_at_last_offset() {
        assert_eq!(all(b"zzzzzzzab", b"ab"), vec![7]);
        assert_eq!(all(b"abzzzzzzz", b"ab"), vec![0]);
    }

    #[test]
    fn test_first_and_count() {
        let engine = SkipTable::new(b"ana").unwrap();
        let mut first = FirstMatch::default();
        assert_eq!(engine.scan(b"bananas", &mut first), ScanEnd::Stopped);
        assert_eq!(first.offset, Some(1));

        let mut count = MatchCount::default();
        assert_eq!(engine.scan(b"bananas", &mut count), ScanEnd::Exhausted);
        assert_eq!(count.count, 2);
    }
}
