//! Candidate verification shared by the skip-table and hashed engines.
//!
//! A candidate window is checked from both ends at once ("zigzag"): the first
//! and last bytes in one branch, then symmetric inner pairs `(j, m-1-j)`
//! walking inward. Each pair test folds two byte comparisons into a single
//! `(a ^ b) | (c ^ d) == 0` check.

/// Outcome of verifying one candidate window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The window equals the pattern
    Match,
    /// The first or last byte differs
    Edges,
    /// The leading side differs at inner position `j`; `pattern[..j]` matched
    Leading(usize),
    /// The trailing side differs at inner position `m-1-j`
    Trailing(usize),
}

/// Compares `window` against `pattern` from both ends.
///
/// `window` and `pattern` must have the same length, at least 1.
#[inline]
pub fn zigzag(window: &[u8], pattern: &[u8]) -> Verdict {
    debug_assert_eq!(window.len(), pattern.len());
    let last = pattern.len() - 1;
    if (window[0] ^ pattern[0]) | (window[last] ^ pattern[last]) != 0 {
        return Verdict::Edges;
    }
    let lim = (pattern.len() + 1) / 2;
    for j in 1..lim {
        let lead = window[j] ^ pattern[j];
        let trail = window[last - j] ^ pattern[last - j];
        if lead | trail == 0 {
            continue;
        }
        return if lead != 0 {
            Verdict::Leading(j)
        } else {
            Verdict::Trailing(j)
        };
    }
    Verdict::Match
}

/// Shift table for leading-side mismatches.
///
/// Entry `j` is the smallest shift consistent with `pattern[..j]` having
/// matched: `j` minus the longest proper border of `pattern[..j]`, and 1 for
/// `j == 0`. Only prefixes shorter than `(m + 1) / 2` are ever consulted.
pub fn prefix_shifts(pattern: &[u8]) -> Vec<usize> {
    let lim = (pattern.len() + 1) / 2;
    let mut border = vec![0usize; lim];
    let mut k = 0;
    for i in 1..lim {
        while k > 0 && pattern[i] != pattern[k] {
            k = border[k - 1];
        }
        if pattern[i] == pattern[k] {
            k += 1;
        }
        border[i] = k;
    }

    let mut shifts = Vec::with_capacity(lim.max(1));
    shifts.push(1);
    for j in 1..lim {
        shifts.push(j - border[j - 1]);
    }
    shifts
}
