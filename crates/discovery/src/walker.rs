//! Downward search for definition files below a workspace root

use crate::parser::DefinitionParser;
use std::path::{Path, PathBuf};
use taskpick_utils::walk_dirs;

/// Every definition file at or below `root`, at most one per directory
///
/// Excluded directories are pruned with their whole subtree, so a manifest
/// inside `node_modules` is never reported. The order follows the walk and is
/// not meaningful; callers sort their results.
pub fn find_definition_files(
    root: &Path,
    parser: &dyn DefinitionParser,
    max_depth: usize,
    excluded: &[String],
) -> Vec<PathBuf> {
    walk_dirs(root, max_depth, excluded)
        .filter_map(|dir| parser.find_in(&dir))
        .collect()
}
