use std::env;
use std::path::PathBuf;
use taskpick_core::constants::{CACHE_FILENAME, TASKPICK_CACHE_DIR_VAR};

/// XDG Base Directory paths for taskpick
pub struct XdgPaths;

impl XdgPaths {
    /// Get XDG_CACHE_HOME/taskpick or fallback
    pub fn cache_dir() -> PathBuf {
        env::var("XDG_CACHE_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .map(|home| home.join(".cache"))
                    .unwrap_or_else(|| PathBuf::from(".cache"))
            })
            .join("taskpick")
    }

    /// Cache directory, honouring the `TASKPICK_CACHE_DIR` override
    pub fn script_cache_dir() -> PathBuf {
        match env::var(TASKPICK_CACHE_DIR_VAR) {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => Self::cache_dir(),
        }
    }

    /// Get the discovery cache store file path
    pub fn script_cache_file() -> PathBuf {
        Self::script_cache_dir().join(CACHE_FILENAME)
    }
}
