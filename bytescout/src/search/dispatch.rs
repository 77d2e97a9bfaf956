//! Length-based engine selection.
//!
//! A [`DispatchTable`] is an ordered list of bands. Band `k` covers pattern
//! lengths `[min_len_k, min_len_{k+1})`; the last band is open-ended. The
//! crossover points are empirical, so two profiles ship: one tuned for large
//! (byte-oriented) alphabets and one for small alphabets such as nucleotide or
//! amino-acid sequences, where long patterns need the stronger filters sooner.
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::bit_parallel::BitParallel;
use super::byte_scan::ByteScanner;
use super::hash_skip::{PairHash, TripleHash};
use super::sink::{capacity_hint, AllMatches, FirstMatch, MatchCount, MatchSink, ScanEnd};
use super::skip_table::SkipTable;
use super::Scanner;
use crate::errors::{check_lengths, SearchError, SearchResult};
use crate::metrics::SearchMetrics;

/// Identifies one search engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    ByteScan,
    BitParallel,
    HashPair,
    HashTriple,
    SkipTable,
}

impl EngineKind {
    pub const ALL: [EngineKind; 5] = [
        EngineKind::ByteScan,
        EngineKind::BitParallel,
        EngineKind::HashPair,
        EngineKind::HashTriple,
        EngineKind::SkipTable,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EngineKind::ByteScan => ByteScanner::NAME,
            EngineKind::BitParallel => BitParallel::NAME,
            EngineKind::HashPair => PairHash::NAME,
            EngineKind::HashTriple => TripleHash::NAME,
            EngineKind::SkipTable => SkipTable::NAME,
        }
    }

    /// Shortest pattern the engine accepts
    pub fn min_pattern_len(self) -> usize {
        match self {
            EngineKind::ByteScan => ByteScanner::MIN_PATTERN_LEN,
            EngineKind::BitParallel => BitParallel::MIN_PATTERN_LEN,
            EngineKind::HashPair => PairHash::MIN_PATTERN_LEN,
            EngineKind::HashTriple => TripleHash::MIN_PATTERN_LEN,
            EngineKind::SkipTable => SkipTable::MIN_PATTERN_LEN,
        }
    }

    /// Longest pattern the engine accepts, if bounded
    pub fn max_pattern_len(self) -> Option<usize> {
        match self {
            EngineKind::ByteScan => Some(1),
            _ => None,
        }
    }

    fn accepts(self, pattern_len: usize) -> bool {
        pattern_len >= self.min_pattern_len()
            && self.max_pattern_len().map_or(true, |max| pattern_len <= max)
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pattern lengths from `min_len` up to the next band are routed to `engine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub min_len: usize,
    pub engine: EngineKind,
}

impl Band {
    pub const fn new(min_len: usize, engine: EngineKind) -> Self {
        Self { min_len, engine }
    }
}

/// Validated mapping from pattern length to engine
///
/// Deserializes from a list of bands and rejects lists that would leave a
/// pattern length unrouted or route it to an engine that cannot handle it.
///
/// ```yaml
/// dispatch:
///   - { min_len: 1, engine: byte_scan }
///   - { min_len: 2, engine: bit_parallel }
///   - { min_len: 64, engine: hash_pair }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Band>", into = "Vec<Band>")]
pub struct DispatchTable {
    bands: Vec<Band>,
}

impl DispatchTable {
    /// Builds a table, checking that every pattern length `>= 1` lands on an
    /// engine able to search for it.
    pub fn new(bands: Vec<Band>) -> SearchResult<Self> {
        let first = bands
            .first()
            .ok_or_else(|| SearchError::config_error("dispatch table has no bands"))?;
        if first.min_len != 1 {
            return Err(SearchError::config_error(format!(
                "dispatch table must start at pattern length 1, starts at {}",
                first.min_len
            )));
        }

        for (i, band) in bands.iter().enumerate() {
            let upper = bands.get(i + 1).map(|next| next.min_len);
            if let Some(upper) = upper {
                if upper <= band.min_len {
                    return Err(SearchError::config_error(format!(
                        "dispatch bands must be strictly ascending: {} follows {}",
                        upper, band.min_len
                    )));
                }
            }

            // Both ends of the band must be acceptable; engine limits are ranges.
            let last_len = upper.map_or(usize::MAX, |upper| upper - 1);
            if !band.engine.accepts(band.min_len) || !band.engine.accepts(last_len) {
                return Err(SearchError::config_error(format!(
                    "{} cannot search patterns of length {} to {}",
                    band.engine,
                    band.min_len,
                    upper.map_or_else(|| "unbounded".to_string(), |u| (u - 1).to_string())
                )));
            }
        }

        Ok(Self { bands })
    }

    /// Crossover points tuned for byte-oriented data
    pub fn large_alphabet() -> Self {
        Self {
            bands: vec![
                Band::new(1, EngineKind::ByteScan),
                Band::new(2, EngineKind::BitParallel),
                Band::new(50, EngineKind::HashPair),
                Band::new(12_000, EngineKind::HashTriple),
                Band::new(350_000, EngineKind::BitParallel),
            ],
        }
    }

    /// Crossover points tuned for alphabets of around 20 symbols
    pub fn small_alphabet() -> Self {
        Self {
            bands: vec![
                Band::new(1, EngineKind::ByteScan),
                Band::new(2, EngineKind::BitParallel),
                Band::new(3_000, EngineKind::HashPair),
                Band::new(16_000, EngineKind::HashTriple),
                Band::new(350_000, EngineKind::SkipTable),
            ],
        }
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Engine for a pattern of `pattern_len` bytes (`pattern_len >= 1`)
    pub fn select(&self, pattern_len: usize) -> EngineKind {
        let idx = self.bands.partition_point(|band| band.min_len <= pattern_len);
        self.bands[idx.saturating_sub(1)].engine
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::large_alphabet()
    }
}

impl TryFrom<Vec<Band>> for DispatchTable {
    type Error = SearchError;

    fn try_from(bands: Vec<Band>) -> SearchResult<Self> {
        Self::new(bands)
    }
}

impl From<DispatchTable> for Vec<Band> {
    fn from(table: DispatchTable) -> Self {
        table.bands
    }
}

/// An engine prepared for one pattern
#[derive(Debug, Clone)]
#[allow(clippy::large_enum_variant)]
pub enum Engine<'p> {
    ByteScan(ByteScanner),
    BitParallel(BitParallel<'p>),
    HashPair(PairHash<'p>),
    HashTriple(TripleHash<'p>),
    SkipTable(SkipTable<'p>),
}

impl<'p> Engine<'p> {
    /// Preprocesses `pattern` for `kind`.
    pub fn new(kind: EngineKind, pattern: &'p [u8]) -> SearchResult<Self> {
        let engine = match kind {
            EngineKind::ByteScan => match *pattern {
                [needle] => Engine::ByteScan(ByteScanner::new(needle)),
                [] => return Err(SearchError::EmptyPattern),
                _ => {
                    return Err(SearchError::config_error(format!(
                        "{} searches single bytes only, got a {} byte pattern",
                        kind,
                        pattern.len()
                    )))
                }
            },
            EngineKind::BitParallel => Engine::BitParallel(BitParallel::new(pattern)?),
            EngineKind::HashPair => Engine::HashPair(PairHash::new(pattern)?),
            EngineKind::HashTriple => Engine::HashTriple(TripleHash::new(pattern)?),
            EngineKind::SkipTable => Engine::SkipTable(SkipTable::new(pattern)?),
        };
        Ok(engine)
    }

    pub fn kind(&self) -> EngineKind {
        match self {
            Engine::ByteScan(_) => EngineKind::ByteScan,
            Engine::BitParallel(_) => EngineKind::BitParallel,
            Engine::HashPair(_) => EngineKind::HashPair,
            Engine::HashTriple(_) => EngineKind::HashTriple,
            Engine::SkipTable(_) => EngineKind::SkipTable,
        }
    }

    /// Runs the prepared engine over `haystack`.
    pub fn scan<S: MatchSink>(&self, haystack: &[u8], sink: &mut S) -> ScanEnd {
        match self {
            Engine::ByteScan(e) => e.scan(haystack, sink),
            Engine::BitParallel(e) => e.scan(haystack, sink),
            Engine::HashPair(e) => e.scan(haystack, sink),
            Engine::HashTriple(e) => e.scan(haystack, sink),
            Engine::SkipTable(e) => e.scan(haystack, sink),
        }
    }
}

/// Routes whole-haystack searches to engines by pattern length
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    table: DispatchTable,
    metrics: Option<SearchMetrics>,
}

impl Dispatcher {
    pub fn new(table: DispatchTable) -> Self {
        Self {
            table,
            metrics: None,
        }
    }

    /// Records every search in `metrics`
    pub fn with_metrics(mut self, metrics: SearchMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    pub fn metrics(&self) -> Option<&SearchMetrics> {
        self.metrics.as_ref()
    }

    /// Picks and prepares the engine for `pattern`. Does not record metrics.
    pub fn prepare<'p>(&self, pattern: &'p [u8]) -> SearchResult<Engine<'p>> {
        if pattern.is_empty() {
            return Err(SearchError::EmptyPattern);
        }
        let kind = self.table.select(pattern.len());
        Engine::new(kind, pattern)
    }

    fn engine_for<'p>(&self, haystack: &[u8], pattern: &'p [u8]) -> SearchResult<Engine<'p>> {
        check_lengths(haystack.len(), pattern.len())?;
        let engine = self.prepare(pattern)?;
        debug!(
            "Searching {} bytes for a {} byte pattern with {}",
            haystack.len(),
            pattern.len(),
            engine.kind()
        );
        if let Some(metrics) = &self.metrics {
            metrics.record_search(engine.kind());
        }
        Ok(engine)
    }

    fn record_matches(&self, count: usize) {
        if let Some(metrics) = &self.metrics {
            metrics.record_matches(count as u64);
        }
    }

    /// Offset of the first occurrence of `pattern`, or `None`
    pub fn locate_first(&self, haystack: &[u8], pattern: &[u8]) -> SearchResult<Option<usize>> {
        let engine = self.engine_for(haystack, pattern)?;
        let mut sink = FirstMatch::default();
        engine.scan(haystack, &mut sink);
        self.record_matches(usize::from(sink.offset.is_some()));
        Ok(sink.offset)
    }

    /// Every occurrence of `pattern` in ascending order, overlaps included
    pub fn locate_all(&self, haystack: &[u8], pattern: &[u8]) -> SearchResult<Vec<usize>> {
        let engine = self.engine_for(haystack, pattern)?;
        let mut sink = AllMatches::with_capacity(capacity_hint(haystack.len(), pattern.len()));
        engine.scan(haystack, &mut sink);
        self.record_matches(sink.offsets.len());
        Ok(sink.offsets)
    }

    /// Number of occurrences of `pattern`, overlaps included
    pub fn count(&self, haystack: &[u8], pattern: &[u8]) -> SearchResult<usize> {
        let engine = self.engine_for(haystack, pattern)?;
        let mut sink = MatchCount::default();
        engine.scan(haystack, &mut sink);
        self.record_matches(sink.count);
        Ok(sink.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_alphabet_bands() {
        let table = DispatchTable::large_alphabet();
        assert_eq!(table.select(1), EngineKind::ByteScan);
        assert_eq!(table.select(2), EngineKind::BitParallel);
        assert_eq!(table.select(49), EngineKind::BitParallel);
        assert_eq!(table.select(50), EngineKind::HashPair);
        assert_eq!(table.select(11_999), EngineKind::HashPair);
        assert_eq!(table.select(12_000), EngineKind::HashTriple);
        assert_eq!(table.select(349_999), EngineKind::HashTriple);
        assert_eq!(table.select(350_000), EngineKind::BitParallel);
        assert_eq!(table.select(usize::MAX), EngineKind::BitParallel);
    }

    #[test]
    fn test_small_alphabet_bands() {
        let table = DispatchTable::small_alphabet();
        assert_eq!(table.select(1), EngineKind::ByteScan);
        assert_eq!(table.select(2_999), EngineKind::BitParallel);
        assert_eq!(table.select(3_000), EngineKind::HashPair);
        assert_eq!(table.select(16_000), EngineKind::HashTriple);
        assert_eq!(table.select(400_000), EngineKind::SkipTable);
    }

    #[test]
    fn test_builtin_tables_validate() {
        for table in [DispatchTable::large_alphabet(), DispatchTable::small_alphabet()] {
            assert_eq!(DispatchTable::new(table.bands().to_vec()), Ok(table));
        }
    }

    #[test]
    fn test_table_validation() {
        assert!(DispatchTable::new(vec![]).is_err());

        // Does not start at 1
        let err = DispatchTable::new(vec![Band::new(2, EngineKind::BitParallel)]).unwrap_err();
        assert!(err.to_string().contains("must start at pattern length 1"));

        // Byte scan cannot cover lengths above 1
        assert!(DispatchTable::new(vec![Band::new(1, EngineKind::ByteScan)]).is_err());
        assert!(DispatchTable::new(vec![
            Band::new(1, EngineKind::ByteScan),
            Band::new(3, EngineKind::BitParallel),
        ])
        .is_err());

        // Triple hash cannot take length 2
        assert!(DispatchTable::new(vec![
            Band::new(1, EngineKind::ByteScan),
            Band::new(2, EngineKind::HashTriple),
        ])
        .is_err());

        // Not ascending
        assert!(DispatchTable::new(vec![
            Band::new(1, EngineKind::ByteScan),
            Band::new(2, EngineKind::BitParallel),
            Band::new(2, EngineKind::HashPair),
        ])
        .is_err());

        // Skip table cannot take single bytes
        assert!(DispatchTable::new(vec![Band::new(1, EngineKind::SkipTable)]).is_err());

        assert!(DispatchTable::new(vec![
            Band::new(1, EngineKind::ByteScan),
            Band::new(2, EngineKind::SkipTable),
            Band::new(3, EngineKind::HashTriple),
        ])
        .is_ok());
    }

    #[test]
    fn test_engine_construction() {
        assert_eq!(Engine::new(EngineKind::ByteScan, b"x").unwrap().kind(), EngineKind::ByteScan);
        assert!(Engine::new(EngineKind::ByteScan, b"xy").is_err());
        assert_eq!(
            Engine::new(EngineKind::HashTriple, b"ab").unwrap_err(),
            SearchError::pattern_too_short("hash-triple", 3, 2)
        );
        for kind in EngineKind::ALL {
            if kind != EngineKind::ByteScan {
                assert_eq!(Engine::new(kind, b"abcd").unwrap().kind(), kind);
            }
        }
    }

    #[test]
    fn test_every_engine_agrees() {
        let haystack = b"she sells sea shells by the sea shore, sea sea";
        for kind in EngineKind::ALL {
            let pattern: &[u8] = if kind == EngineKind::ByteScan { b"s" } else { b"sea" };
            let engine = Engine::new(kind, pattern).unwrap();
            let mut sink = AllMatches::default();
            assert_eq!(engine.scan(haystack, &mut sink), ScanEnd::Exhausted);
            let expected: Vec<usize> = haystack
                .windows(pattern.len())
                .enumerate()
                .filter(|(_, w)| *w == pattern)
                .map(|(i, _)| i)
                .collect();
            assert_eq!(sink.offsets, expected, "{kind}");
        }
    }

    #[test]
    fn test_dispatcher_operations() {
        let dispatcher = Dispatcher::default();
        assert_eq!(dispatcher.locate_all(b"abracadabra", b"abra").unwrap(), vec![0, 7]);
        assert_eq!(dispatcher.count(b"abracadabra", b"abra").unwrap(), 2);
        assert_eq!(dispatcher.locate_first(b"abracadabra", b"cad").unwrap(), Some(4));
        assert_eq!(dispatcher.locate_first(b"hello", b"xyz").unwrap(), None);
        assert_eq!(dispatcher.locate_all(b"aaaa", b"aa").unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_dispatcher_errors() {
        let dispatcher = Dispatcher::default();
        assert_eq!(dispatcher.count(b"abc", b""), Err(SearchError::EmptyPattern));
        assert_eq!(
            dispatcher.locate_first(b"abc", b"abcd"),
            Err(SearchError::pattern_too_long(4, 3))
        );
        assert_eq!(dispatcher.locate_all(b"", b""), Err(SearchError::EmptyPattern));
    }

    #[test]
    fn test_dispatcher_records_metrics() {
        let metrics = SearchMetrics::new();
        let dispatcher = Dispatcher::default().with_metrics(metrics.clone());

        dispatcher.count(b"banana", b"a").unwrap();
        dispatcher.locate_all(b"banana", b"ana").unwrap();
        dispatcher.locate_first(b"banana", b"zz").unwrap();
        let _ = dispatcher.count(b"banana", b"");

        let stats = metrics.get_stats();
        assert_eq!(stats.byte_scan, 1);
        assert_eq!(stats.bit_parallel, 2);
        assert_eq!(stats.matches, 5);
    }

    #[test]
    fn test_engine_kind_serde_names() {
        let yaml = serde_yaml::to_string(&EngineKind::HashTriple).unwrap();
        assert_eq!(yaml.trim(), "hash_triple");
        let kind: EngineKind = serde_yaml::from_str("bit_parallel").unwrap();
        assert_eq!(kind, EngineKind::BitParallel);
    }

    #[test]
    fn test_table_deserialization_validates() {
        let yaml = "- { min_len: 1, engine: byte_scan }\n- { min_len: 2, engine: skip_table }\n";
        let table: DispatchTable = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(table.select(10), EngineKind::SkipTable);

        let bad = "- { min_len: 1, engine: hash_pair }\n";
        assert!(serde_yaml::from_str::<DispatchTable>(bad).is_err());
    }
}
