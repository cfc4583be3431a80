//! Upward and downward directory walks

use std::path::{Path, PathBuf};
use taskpick_core::Error;
use walkdir::WalkDir;

/// First directory, starting at `start` and moving towards the filesystem root,
/// for which `predicate` holds
pub fn walk_up<F>(start: &Path, mut predicate: F) -> Option<PathBuf>
where
    F: FnMut(&Path) -> bool,
{
    find_up(start, |dir| predicate(dir).then(|| dir.to_path_buf()))
}

/// Like [`walk_up`], but returns the first value produced by `probe`
pub fn find_up<T, F>(start: &Path, probe: F) -> Option<T>
where
    F: FnMut(&Path) -> Option<T>,
{
    start.ancestors().find_map(probe)
}

/// Lazily enumerate `root` and every directory below it
///
/// Directories whose name is in `excluded` are pruned together with their
/// subtrees. Symbolic links are not followed, so link cycles cannot occur.
/// Unreadable entries are logged and skipped; the walk carries on elsewhere.
pub fn walk_dirs<'a>(
    root: &Path,
    max_depth: usize,
    excluded: &'a [String],
) -> impl Iterator<Item = PathBuf> + 'a {
    let root_dir = root.to_path_buf();
    WalkDir::new(root)
        .max_depth(max_depth)
        .follow_links(false)
        .into_iter()
        .filter_entry(move |entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !excluded
                    .iter()
                    .any(|name| entry.file_name().to_str() == Some(name.as_str()))
        })
        .filter_map(move |entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                let path = err.path().unwrap_or(root_dir.as_path()).to_path_buf();
                let error = Error::walk(path, err.to_string());
                tracing::warn!("Skipping unreadable directory: {error}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir())
        .map(walkdir::DirEntry::into_path)
}
