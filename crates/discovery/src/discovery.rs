//! Discovery orchestration
//!
//! Combines workspace resolution, the tree walk, the parsers and the cache
//! into the single `discover` entry point.

use crate::config::DiscoveryConfig;
use crate::parser::{parser_for, DefinitionParser};
use crate::walker::find_definition_files;
use crate::workspace::find_workspace_root;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use taskpick_cache::{cache_key, ScriptCache};
use taskpick_core::{sort_tasks, DiscoveryMode, PackageLabel, Task};
use taskpick_utils::find_up;
use tracing::{debug, warn};

/// Finds every runnable task visible from one working directory
#[derive(Debug)]
pub struct TaskDiscovery {
    working_dir: PathBuf,
    config: DiscoveryConfig,
    cache: Option<ScriptCache>,
    files_parsed: AtomicUsize,
}

impl TaskDiscovery {
    pub fn new(working_dir: impl Into<PathBuf>, config: DiscoveryConfig) -> Self {
        let cache = config.cache.clone().map(ScriptCache::new);
        Self {
            working_dir: working_dir.into(),
            config,
            cache,
            files_parsed: AtomicUsize::new(0),
        }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// The cache backing this discovery, if caching is enabled
    pub fn cache(&self) -> Option<&ScriptCache> {
        self.cache.as_ref()
    }

    /// Number of definition files actually read and parsed so far
    ///
    /// Cache hits do not count.
    pub fn files_parsed(&self) -> usize {
        self.files_parsed.load(Ordering::Relaxed)
    }

    /// Return the tasks for the requested mode, sorted when in workspace mode
    ///
    /// Never fails: missing definition files produce an empty list and a
    /// warning, broken files contribute nothing.
    pub fn discover(&self, workspace: bool) -> Vec<Task> {
        match DiscoveryMode::from_workspace_flag(workspace) {
            DiscoveryMode::Single => self.discover_single(),
            DiscoveryMode::Workspace => self.discover_workspace(),
        }
    }

    /// Directory of the nearest definition file above the working directory
    ///
    /// Single-mode tasks carry no package directory; this is where they run.
    pub fn nearest_definition_dir(&self) -> Option<PathBuf> {
        self.nearest_definition_file()
            .and_then(|file| file.parent().map(Path::to_path_buf))
    }

    fn parser(&self) -> &'static dyn DefinitionParser {
        parser_for(self.config.source)
    }

    fn nearest_definition_file(&self) -> Option<PathBuf> {
        let parser = self.parser();
        find_up(&self.working_dir, |dir| parser.find_in(dir))
    }

    fn discover_single(&self) -> Vec<Task> {
        let source = self.parser().source();
        let Some(file) = self.nearest_definition_file() else {
            warn!(
                dir = %self.working_dir.display(),
                "No {} found in this directory or any parent",
                self.parser().file_names().join(" or ")
            );
            return Vec::new();
        };
        debug!(file = %file.display(), "Using nearest definition file");

        let key = cache_key(DiscoveryMode::Single, source, &file);
        let files = [file.as_path()];
        let tasks = self.cached_or_else(&key, &files, || self.parse_file(&file));

        if tasks.is_empty() {
            warn!(file = %file.display(), "No scripts defined");
        }
        tasks
    }

    fn discover_workspace(&self) -> Vec<Task> {
        let Some(root) = find_workspace_root(&self.working_dir) else {
            warn!(
                dir = %self.working_dir.display(),
                "No workspace root found, falling back to single project discovery"
            );
            return self.discover_single();
        };

        let parser = self.parser();
        let files = find_definition_files(
            &root,
            parser,
            self.config.max_depth,
            &self.config.excluded_dirs,
        );
        if files.is_empty() {
            warn!(
                root = %root.display(),
                "No {} found in workspace",
                parser.file_names().join(" or ")
            );
            return Vec::new();
        }
        debug!(root = %root.display(), files = files.len(), "Collected workspace definition files");

        let key = cache_key(DiscoveryMode::Workspace, parser.source(), &root);
        let tasks = self.cached_or_else(&key, &files, || {
            let mut tasks: Vec<Task> = files
                .iter()
                .flat_map(|file| self.parse_package(&root, file))
                .collect();
            sort_tasks(&mut tasks);
            tasks
        });

        if tasks.is_empty() {
            warn!(root = %root.display(), "No scripts defined anywhere in workspace");
        }
        tasks
    }

    fn cached_or_else<P, F>(&self, key: &str, files: &[P], compute: F) -> Vec<Task>
    where
        P: AsRef<Path>,
        F: FnOnce() -> Vec<Task>,
    {
        if let Some(cache) = &self.cache {
            if let Some(tasks) = cache.lookup(key, files) {
                return tasks;
            }
        }

        let tasks = compute();
        if let Some(cache) = &self.cache {
            cache.store(key, &tasks, files);
        }
        tasks
    }

    fn parse_file(&self, file: &Path) -> Vec<Task> {
        self.files_parsed.fetch_add(1, Ordering::Relaxed);
        self.parser().parse(file)
    }

    fn parse_package(&self, root: &Path, file: &Path) -> Vec<Task> {
        let Some(dir) = file.parent() else {
            return Vec::new();
        };
        let label = PackageLabel::from_relative(dir.strip_prefix(root).unwrap_or(dir));
        self.parse_file(file)
            .into_iter()
            .map(|task| task.in_package(label.clone(), dir))
            .collect()
    }
}
