//! Word-parallel single-byte search.
//!
//! The haystack is read eight bytes at a time through `chunks_exact`, so every
//! load is a bounds-checked slice and nothing past the buffer is ever touched.
//! Each word is XORed with the target byte splatted across all lanes, which
//! turns matching bytes into zero bytes, and a carry trick flags words that
//! may contain a zero byte without branching per byte:
//!
//! ```text
//! ((w + MAGIC) ^ !w) & !MAGIC != 0
//! ```
//!
//! The test has no false negatives. It can raise false positives, which the
//! per-lane confirmation of a flagged word filters out. The tail (fewer than
//! eight bytes) is compared one byte at a time.
use super::sink::{MatchSink, ScanEnd};
use super::Scanner;

const WORD: usize = std::mem::size_of::<u64>();
const MAGIC: u64 = 0x7efe_fefe_fefe_feff;
const HOLES: u64 = !MAGIC;

/// Single-byte scanner for length-1 patterns
#[derive(Debug, Clone, Copy)]
pub struct ByteScanner {
    needle: u8,
    splat: u64,
}

impl ByteScanner {
    pub fn new(needle: u8) -> Self {
        Self {
            needle,
            splat: u64::from_ne_bytes([needle; WORD]),
        }
    }

    pub fn needle(&self) -> u8 {
        self.needle
    }
}

/// True when `word` may contain a zero byte. Never false for a word that has one.
#[inline(always)]
fn may_have_zero_byte(word: u64) -> bool {
    (word.wrapping_add(MAGIC) ^ !word) & HOLES != 0
}

impl Scanner for ByteScanner {
    const NAME: &'static str = "byte-scan";
    const MIN_PATTERN_LEN: usize = 1;

    fn scan<S: MatchSink>(&self, haystack: &[u8], sink: &mut S) -> ScanEnd {
        let mut words = haystack.chunks_exact(WORD);
        let mut base = 0;

        for chunk in &mut words {
            if sink.should_abort() {
                return ScanEnd::Aborted;
            }
            let mut lanes = [0u8; WORD];
            lanes.copy_from_slice(chunk);
            let word = u64::from_le_bytes(lanes) ^ self.splat;
            if may_have_zero_byte(word) {
                for lane in 0..WORD {
                    if (word >> (lane * 8)) & 0xff == 0 && sink.on_match(base + lane).is_break() {
                        return ScanEnd::Stopped;
                    }
                }
            }
            base += WORD;
        }

        for (i, &byte) in words.remainder().iter().enumerate() {
            if byte == self.needle && sink.on_match(base + i).is_break() {
                return ScanEnd::Stopped;
            }
        }
        ScanEnd::Exhausted
    }
}
