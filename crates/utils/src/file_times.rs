use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Modification time of `path` in milliseconds since the Unix epoch
pub fn modified_millis(path: &Path) -> io::Result<i64> {
    let modified = fs::metadata(path)?.modified()?;
    let millis = match modified.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_millis()).unwrap_or(i64::MAX),
        Err(before) => -i64::try_from(before.duration().as_millis()).unwrap_or(i64::MAX),
    };
    Ok(millis)
}

/// Snapshot of modification times for a set of files
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct FileTimes {
    files: BTreeMap<PathBuf, i64>,
}

impl FileTimes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current modification time of every path
    ///
    /// Fails if any file cannot be stat'ed.
    pub fn capture<P: AsRef<Path>>(paths: &[P]) -> io::Result<Self> {
        let mut files = BTreeMap::new();
        for path in paths {
            let path = path.as_ref();
            files.insert(path.to_path_buf(), modified_millis(path)?);
        }
        Ok(Self { files })
    }

    /// Record an explicit timestamp for a path
    pub fn insert(&mut self, path: impl Into<PathBuf>, millis: i64) {
        self.files.insert(path.into(), millis);
    }

    /// Paths whose recorded time differs from `current`, or that exist on only one side
    pub fn changed_files<'a>(&'a self, current: &'a FileTimes) -> Vec<&'a Path> {
        let mut changed: Vec<&Path> = self
            .files
            .iter()
            .filter(|(path, millis)| current.files.get(*path) != Some(millis))
            .map(|(path, _)| path.as_path())
            .collect();
        changed.extend(
            current
                .files
                .keys()
                .filter(|path| !self.files.contains_key(*path))
                .map(PathBuf::as_path),
        );
        changed
    }

    pub fn get(&self, path: &Path) -> Option<i64> {
        self.files.get(path).copied()
    }

    /// Get the number of tracked files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
