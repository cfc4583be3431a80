//! Workspace root resolution

use crate::parser::manifest_declares_workspace;
use std::path::{Path, PathBuf};
use taskpick_core::constants::{MANIFEST_FILENAME, WORKSPACE_DECLARATION_FILENAME};
use taskpick_utils::walk_up;
use tracing::debug;

/// Find the workspace root containing `start`
///
/// Walks up from `start` (inclusive) and returns the first directory holding a
/// package.json that either declares `workspaces` or sits next to a
/// pnpm-workspace.yaml.
pub fn find_workspace_root(start: &Path) -> Option<PathBuf> {
    let root = walk_up(start, is_workspace_root);
    match &root {
        Some(root) => debug!(root = %root.display(), "Resolved workspace root"),
        None => debug!(start = %start.display(), "No workspace root above directory"),
    }
    root
}

/// Whether `dir` is itself a workspace root
pub fn is_workspace_root(dir: &Path) -> bool {
    let manifest = dir.join(MANIFEST_FILENAME);
    if !manifest.is_file() {
        return false;
    }
    dir.join(WORKSPACE_DECLARATION_FILENAME).is_file() || manifest_declares_workspace(&manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_manifest_workspaces_mark_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(
            root.join("package.json"),
            r#"{"private":true,"workspaces":["packages/*"]}"#,
        )
        .unwrap();
        let member = root.join("packages/app/src");
        fs::create_dir_all(&member).unwrap();
        fs::write(root.join("packages/app/package.json"), r#"{"name":"app"}"#).unwrap();

        assert_eq!(find_workspace_root(&member), Some(root.to_path_buf()));
    }

    #[test]
    fn test_declaration_file_marks_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("package.json"), r#"{"name":"mono"}"#).unwrap();
        fs::write(root.join("pnpm-workspace.yaml"), "packages:\n  - 'apps/*'\n").unwrap();

        assert_eq!(find_workspace_root(root), Some(root.to_path_buf()));
    }

    #[test]
    fn test_declaration_file_without_manifest_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("pnpm-workspace.yaml"), "packages: []\n").unwrap();

        assert!(!is_workspace_root(root));
    }

    #[test]
    fn test_nearest_root_wins() {
        let temp_dir = TempDir::new().unwrap();
        let outer = temp_dir.path();
        let inner = outer.join("nested");
        fs::create_dir_all(&inner).unwrap();
        fs::write(outer.join("package.json"), r#"{"workspaces":["*"]}"#).unwrap();
        fs::write(inner.join("package.json"), r#"{"workspaces":["libs/*"]}"#).unwrap();

        assert_eq!(find_workspace_root(&inner), Some(inner.clone()));
    }

    #[test]
    fn test_plain_project_is_not_a_workspace() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("package.json"),
            r#"{"scripts":{"build":"tsc"}}"#,
        )
        .unwrap();

        assert!(!is_workspace_root(temp_dir.path()));
    }
}
