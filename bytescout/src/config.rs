use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::errors::{SearchError, SearchResult};
use crate::search::chunked::DEFAULT_MIN_CHUNK_LEN;
use crate::search::dispatch::DispatchTable;

/// Alphabet the dispatch thresholds are tuned for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlphabetProfile {
    /// Byte-oriented data: text, binaries
    #[default]
    Large,
    /// Around 20 symbols: nucleotide or amino-acid sequences
    Small,
}

impl AlphabetProfile {
    pub fn dispatch_table(self) -> DispatchTable {
        match self {
            AlphabetProfile::Large => DispatchTable::large_alphabet(),
            AlphabetProfile::Small => DispatchTable::small_alphabet(),
        }
    }
}

/// Configuration for dispatching and chunked searching.
///
/// # Configuration Locations
///
/// Sources are merged in this order, later ones overriding earlier ones:
/// 1. Global `$CONFIG_DIR/bytescout/config.yaml`
/// 2. Local `.bytescout.yaml` in the current directory
/// 3. An explicit file passed to [`SearchConfig::load_from`]
///
/// # Configuration Format
///
/// ```yaml
/// # Threshold profile (large, small)
/// alphabet: small
///
/// # Explicit bands, overriding the profile
/// dispatch:
///   - { min_len: 1, engine: byte_scan }
///   - { min_len: 2, engine: bit_parallel }
///   - { min_len: 400, engine: hash_pair }
///
/// # Worker threads (default: CPU cores)
/// thread_count: 8
///
/// # Chunks per haystack (default: thread_count)
/// chunk_count: 16
///
/// # Smallest chunk worth a worker, in bytes
/// min_chunk_len: 65536
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "info"
/// ```
///
/// A `dispatch` list is validated while loading; a list that leaves some
/// pattern length without a capable engine is a configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Built-in threshold profile, used when `dispatch` is absent
    #[serde(default)]
    pub alphabet: AlphabetProfile,

    /// Explicit dispatch bands
    #[serde(default)]
    pub dispatch: Option<DispatchTable>,

    /// Number of worker threads for chunked searches
    /// Defaults to number of CPU cores if not specified
    #[serde(default = "default_thread_count")]
    pub thread_count: NonZeroUsize,

    /// Number of chunks a haystack is split into
    #[serde(default)]
    pub chunk_count: Option<NonZeroUsize>,

    /// Chunks are never shorter than this unless the haystack is
    #[serde(default = "default_min_chunk_len")]
    pub min_chunk_len: usize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

fn default_min_chunk_len() -> usize {
    DEFAULT_MIN_CHUNK_LEN
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            alphabet: AlphabetProfile::default(),
            dispatch: None,
            thread_count: default_thread_count(),
            chunk_count: None,
            min_chunk_len: default_min_chunk_len(),
            log_level: default_log_level(),
        }
    }
}

impl SearchConfig {
    /// Loads configuration from the default locations
    pub fn load() -> SearchResult<Self> {
        Self::load_from(None)
    }

    /// Loads configuration from the default locations plus `config_path`,
    /// which must exist if given
    pub fn load_from(config_path: Option<&Path>) -> SearchResult<Self> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(SearchError::config_error(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
        }

        let mut builder = ConfigBuilder::builder();

        let config_files = [
            // Global config
            dirs::config_dir().map(|p| p.join("bytescout/config.yaml")),
            // Local config
            Some(PathBuf::from(".bytescout.yaml")),
            // Custom config
            config_path.map(PathBuf::from),
        ];

        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Explicit bands if configured, otherwise the alphabet profile's table
    pub fn dispatch_table(&self) -> DispatchTable {
        self.dispatch
            .clone()
            .unwrap_or_else(|| self.alphabet.dispatch_table())
    }

    pub fn chunk_count(&self) -> NonZeroUsize {
        self.chunk_count.unwrap_or(self.thread_count)
    }
}
