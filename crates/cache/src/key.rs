//! Cache key construction

use std::path::Path;
use taskpick_core::{DiscoveryMode, TaskSource};

/// Key identifying one discovery context shape
///
/// `path` is the definition file in single mode and the workspace root in
/// workspace mode.
pub fn cache_key(mode: DiscoveryMode, source: TaskSource, path: &Path) -> String {
    format!("{}:{}:{}", mode.as_str(), source.as_str(), path.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_differ_by_mode_and_source() {
        let path = Path::new("/work/repo");
        let single = cache_key(DiscoveryMode::Single, TaskSource::Manifest, path);
        let workspace = cache_key(DiscoveryMode::Workspace, TaskSource::Manifest, path);
        let build = cache_key(DiscoveryMode::Workspace, TaskSource::BuildFile, path);

        assert_eq!(single, "single:manifest:/work/repo");
        assert_eq!(workspace, "workspace:manifest:/work/repo");
        assert_eq!(build, "workspace:build:/work/repo");
    }
}
