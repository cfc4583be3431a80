//! Discovery configuration

use std::env;
use taskpick_cache::CacheConfig;
use taskpick_core::constants::{DEFAULT_MAX_DEPTH, EXCLUDED_DIRECTORIES, TASKPICK_NO_CACHE_VAR};
use taskpick_core::TaskSource;

/// Settings fixed for the lifetime of a [`crate::TaskDiscovery`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Which kind of definition file is read
    pub source: TaskSource,
    /// Deepest directory level visited below a workspace root
    pub max_depth: usize,
    /// Directory names pruned from the workspace walk
    pub excluded_dirs: Vec<String>,
    /// Cache settings, or `None` to always rediscover
    pub cache: Option<CacheConfig>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            source: TaskSource::Manifest,
            max_depth: DEFAULT_MAX_DEPTH,
            excluded_dirs: EXCLUDED_DIRECTORIES.iter().map(|s| s.to_string()).collect(),
            cache: Some(CacheConfig::default()),
        }
    }
}

impl DiscoveryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults adjusted by `TASKPICK_NO_CACHE`
    pub fn from_env() -> Self {
        let config = Self::default();
        match env::var(TASKPICK_NO_CACHE_VAR) {
            Ok(value) if is_truthy(&value) => config.without_cache(),
            _ => config,
        }
    }

    pub fn source(mut self, source: TaskSource) -> Self {
        self.source = source;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Prune an additional directory name from workspace walks
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.excluded_dirs.push(name.into());
        self
    }

    pub fn cache(mut self, cache: CacheConfig) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn without_cache(mut self) -> Self {
        self.cache = None;
        self
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.source, TaskSource::Manifest);
        assert_eq!(config.max_depth, 32);
        assert!(config.excluded_dirs.iter().any(|d| d == "node_modules"));
        assert!(config.cache.is_some());
    }

    #[test]
    #[serial]
    fn test_no_cache_env() {
        let previous = env::var(TASKPICK_NO_CACHE_VAR).ok();

        env::set_var(TASKPICK_NO_CACHE_VAR, "true");
        assert!(DiscoveryConfig::from_env().cache.is_none());

        env::set_var(TASKPICK_NO_CACHE_VAR, "0");
        assert!(DiscoveryConfig::from_env().cache.is_some());

        match previous {
            Some(value) => env::set_var(TASKPICK_NO_CACHE_VAR, value),
            None => env::remove_var(TASKPICK_NO_CACHE_VAR),
        }
    }
}
