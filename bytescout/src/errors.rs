//! Error types for bytescout.
//!
//! Every failure is an explicit [`SearchError`] value. The taxonomy is small on
//! purpose: degenerate pattern lengths, chunk descriptors that do not fit the
//! haystack, and configuration problems.
//!
//! ```rust
//! use bytescout::{locate_first, SearchError};
//!
//! match locate_first(b"hello", b"") {
//!     Err(SearchError::EmptyPattern) => {}
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```
//!
//! Chunked-search workers never produce errors once they start scanning;
//! "no authoritative answer" is a [`crate::results::ChunkOutcome`] value, not an error.
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur while preparing or running a search
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Pattern is empty")]
    EmptyPattern,
    #[error("Pattern too short for {engine}: need at least {min} bytes, got {actual}")]
    PatternTooShort {
        engine: &'static str,
        min: usize,
        actual: usize,
    },
    #[error("Pattern of {pattern_len} bytes is longer than haystack of {haystack_len} bytes")]
    PatternTooLong {
        pattern_len: usize,
        haystack_len: usize,
    },
    #[error("Chunk at {base_offset} with length {len} does not fit haystack of {haystack_len} bytes")]
    InvalidChunk {
        base_offset: usize,
        len: usize,
        haystack_len: usize,
    },
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

impl SearchError {
    pub fn pattern_too_short(engine: &'static str, min: usize, actual: usize) -> Self {
        Self::PatternTooShort {
            engine,
            min,
            actual,
        }
    }

    pub fn pattern_too_long(pattern_len: usize, haystack_len: usize) -> Self {
        Self::PatternTooLong {
            pattern_len,
            haystack_len,
        }
    }

    pub fn invalid_chunk(base_offset: usize, len: usize, haystack_len: usize) -> Self {
        Self::InvalidChunk {
            base_offset,
            len,
            haystack_len,
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn thread_pool(msg: impl Into<String>) -> Self {
        Self::ThreadPool(msg.into())
    }
}

impl From<config::ConfigError> for SearchError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}

/// Checks the length preconditions shared by every search entry point.
pub(crate) fn check_lengths(haystack_len: usize, pattern_len: usize) -> SearchResult<()> {
    if pattern_len == 0 {
        return Err(SearchError::EmptyPattern);
    }
    if pattern_len > haystack_len {
        return Err(SearchError::pattern_too_long(pattern_len, haystack_len));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = SearchError::pattern_too_short("hash-triple", 3, 2);
        assert!(matches!(err, SearchError::PatternTooShort { min: 3, .. }));

        let err = SearchError::pattern_too_long(10, 4);
        assert!(matches!(err, SearchError::PatternTooLong { .. }));

        let err = SearchError::invalid_chunk(8, 16, 12);
        assert!(matches!(err, SearchError::InvalidChunk { .. }));

        let err = SearchError::config_error("bad table");
        assert!(matches!(err, SearchError::ConfigError(_)));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(SearchError::EmptyPattern.to_string(), "Pattern is empty");

        let err = SearchError::pattern_too_short("bit-parallel", 2, 1);
        assert_eq!(
            err.to_string(),
            "Pattern too short for bit-parallel: need at least 2 bytes, got 1"
        );

        let err = SearchError::pattern_too_long(6, 5);
        assert_eq!(
            err.to_string(),
            "Pattern of 6 bytes is longer than haystack of 5 bytes"
        );

        let err = SearchError::invalid_chunk(4, 8, 10);
        assert_eq!(
            err.to_string(),
            "Chunk at 4 with length 8 does not fit haystack of 10 bytes"
        );

        let err = SearchError::config_error("Missing required field");
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required field"
        );
    }

    #[test]
    fn test_check_lengths() {
        assert_eq!(check_lengths(5, 0), Err(SearchError::EmptyPattern));
        assert_eq!(
            check_lengths(2, 3),
            Err(SearchError::pattern_too_long(3, 2))
        );
        assert!(check_lengths(3, 3).is_ok());
        assert!(check_lengths(0, 0).is_err());
    }
}
