use serde::{Deserialize, Serialize};
use std::time::Duration;
use taskpick_core::Task;
use taskpick_utils::FileTimes;

/// A persisted discovery result and the file timestamps that validate it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheRecord {
    pub task_list: Vec<Task>,
    /// Definition file path -> modification time in milliseconds
    pub file_timestamps: FileTimes,
    /// Milliseconds since the Unix epoch
    pub computed_at: i64,
}

impl CacheRecord {
    pub fn new(task_list: Vec<Task>, file_timestamps: FileTimes, computed_at: i64) -> Self {
        Self {
            task_list,
            file_timestamps,
            computed_at,
        }
    }

    /// Whether the record was computed within `max_age` of `now_millis`
    pub fn is_fresh(&self, now_millis: i64, max_age: Duration) -> bool {
        let max_age = i64::try_from(max_age.as_millis()).unwrap_or(i64::MAX);
        let age = now_millis.saturating_sub(self.computed_at);
        (0..=max_age).contains(&age)
    }

    /// Whether the recorded files are exactly `current`: same paths, same times
    pub fn matches_files(&self, current: &FileTimes) -> bool {
        self.file_timestamps == *current
    }
}
