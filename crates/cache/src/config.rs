//! Cache configuration

use std::path::PathBuf;
use std::time::Duration;
use taskpick_core::constants::{CACHE_FILENAME, CACHE_MAX_AGE_SECS, CACHE_MAX_ENTRIES};
use taskpick_utils::xdg::XdgPaths;

/// Configuration for the discovery cache store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Directory holding the store file
    pub base_dir: PathBuf,
    /// Store file name inside `base_dir`
    pub file_name: String,
    /// Records older than this are never reused
    pub max_age: Duration,
    /// Maximum number of records kept; the oldest are evicted first
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        // Respects XDG_CACHE_HOME and TASKPICK_CACHE_DIR
        Self {
            base_dir: XdgPaths::script_cache_dir(),
            file_name: CACHE_FILENAME.to_string(),
            max_age: Duration::from_secs(CACHE_MAX_AGE_SECS),
            max_entries: CACHE_MAX_ENTRIES,
        }
    }
}

impl CacheConfig {
    /// Configuration rooted at an explicit directory, other settings default
    pub fn in_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Full path of the store file
    pub fn store_path(&self) -> PathBuf {
        self.base_dir.join(&self.file_name)
    }
}
