//! Persistent JSON store of discovery results
//!
//! The whole store lives in a single file that is read on every lookup and
//! rewritten wholesale on every update. There is no locking between
//! concurrent processes; a lost write only costs a later cache miss.

use crate::config::CacheConfig;
use crate::record::CacheRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use taskpick_core::constants::CACHE_FORMAT_VERSION;
use taskpick_core::{Error, Result, Task};
use taskpick_utils::{write_atomic, FileTimes};
use tracing::{debug, warn};

#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    #[serde(default)]
    entries: BTreeMap<String, CacheRecord>,
}

impl Default for StoreFile {
    fn default() -> Self {
        Self {
            version: CACHE_FORMAT_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

/// Counters for one cache handle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStatistics {
    pub hits: u64,
    pub misses: u64,
    pub writes: u64,
    pub errors: u64,
}

/// Modification-time validated cache of discovered tasks
#[derive(Debug)]
pub struct ScriptCache {
    config: CacheConfig,
    hits: AtomicU64,
    misses: AtomicU64,
    writes: AtomicU64,
    errors: AtomicU64,
}

impl ScriptCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            writes: AtomicU64::new(0),
            errors: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Return the cached tasks for `key` if the record is still valid for `files`
    ///
    /// Any failure (vanished file, unreadable or corrupt store) is a miss.
    pub fn lookup<P: AsRef<Path>>(&self, key: &str, files: &[P]) -> Option<Vec<Task>> {
        match self.lookup_at(key, files, now_millis()) {
            Ok(Some(tasks)) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(key, tasks = tasks.len(), "Cache hit");
                Some(tasks)
            }
            Ok(None) => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(key, "Cache miss");
                None
            }
            Err(e) => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                self.errors.fetch_add(1, Ordering::Relaxed);
                debug!(key, "Cache lookup failed, treating as miss: {e}");
                None
            }
        }
    }

    /// Record `tasks` under `key`, stamped with the current times of `files`
    ///
    /// Failures are logged and swallowed.
    pub fn store<P: AsRef<Path>>(&self, key: &str, tasks: &[Task], files: &[P]) {
        match self.store_at(key, tasks, files, now_millis()) {
            Ok(()) => {
                self.writes.fetch_add(1, Ordering::Relaxed);
                debug!(key, tasks = tasks.len(), "Cached discovery result");
            }
            Err(e) => {
                self.errors.fetch_add(1, Ordering::Relaxed);
                warn!("Failed to write discovery cache: {e}");
            }
        }
    }

    /// Empty the whole store
    pub fn clear(&self) -> Result<()> {
        self.persist(&StoreFile::default())
    }

    /// Number of records currently persisted
    pub fn len(&self) -> usize {
        self.load().map(|store| store.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn statistics(&self) -> CacheStatistics {
        CacheStatistics {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }

    fn lookup_at<P: AsRef<Path>>(
        &self,
        key: &str,
        files: &[P],
        now: i64,
    ) -> Result<Option<Vec<Task>>> {
        let store = self.load()?;
        let Some(record) = store.entries.get(key) else {
            return Ok(None);
        };

        if !record.is_fresh(now, self.config.max_age) {
            debug!(key, computed_at = record.computed_at, "Cache record expired");
            return Ok(None);
        }

        let current = FileTimes::capture(files)
            .map_err(|e| Error::cache_store(self.config.store_path(), e.to_string()))?;
        if !record.matches_files(&current) {
            debug!(
                key,
                changed = ?record.file_timestamps.changed_files(&current),
                "Definition files changed since cache record"
            );
            return Ok(None);
        }

        Ok(Some(record.task_list.clone()))
    }

    fn store_at<P: AsRef<Path>>(
        &self,
        key: &str,
        tasks: &[Task],
        files: &[P],
        now: i64,
    ) -> Result<()> {
        let file_timestamps = FileTimes::capture(files)
            .map_err(|e| Error::cache_store(self.config.store_path(), e.to_string()))?;

        // A corrupt store is replaced rather than blocking the write
        let mut store = self.load().unwrap_or_default();
        store.entries.insert(
            key.to_string(),
            CacheRecord::new(tasks.to_vec(), file_timestamps, now),
        );
        evict_oldest(&mut store.entries, self.config.max_entries);

        self.persist(&store)
    }

    fn load(&self) -> Result<StoreFile> {
        let path = self.config.store_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoreFile::default()),
            Err(e) => return Err(Error::file_system(&path, "read cache store", e)),
        };

        let store: StoreFile = serde_json::from_str(&content)
            .map_err(|e| Error::cache_store(&path, format!("corrupt store: {e}")))?;

        if store.version != CACHE_FORMAT_VERSION {
            debug!(
                found = store.version,
                expected = CACHE_FORMAT_VERSION,
                "Ignoring cache store with unknown version"
            );
            return Ok(StoreFile::default());
        }

        Ok(store)
    }

    fn persist(&self, store: &StoreFile) -> Result<()> {
        let content = serde_json::to_vec(store)?;
        write_atomic(&self.config.store_path(), &content)
    }
}

/// Drop the records with the oldest `computed_at` until at most `max_entries` remain
fn evict_oldest(entries: &mut BTreeMap<String, CacheRecord>, max_entries: usize) {
    if entries.len() <= max_entries {
        return;
    }

    let mut by_age: Vec<(i64, String)> = entries
        .iter()
        .map(|(key, record)| (record.computed_at, key.clone()))
        .collect();
    by_age.sort();

    let excess = entries.len() - max_entries;
    for (_, key) in by_age.into_iter().take(excess) {
        debug!(key = %key, "Evicting cache record");
        entries.remove(&key);
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
