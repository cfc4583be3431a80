//! Definition file parsers
//!
//! Both parsers share one contract: `parse` never fails. Read or structural
//! errors are logged and the file contributes no tasks.

mod build_file;
mod manifest;

pub use build_file::BuildFileParser;
pub use manifest::{manifest_declares_workspace, Manifest, ManifestParser};

use std::path::{Path, PathBuf};
use taskpick_core::{Result, Task, TaskSource};
use tracing::warn;

/// Extracts tasks from one kind of definition file
pub trait DefinitionParser: Send + Sync {
    /// Kind of task this parser produces
    fn source(&self) -> TaskSource;

    /// Conventional file names, in lookup priority order
    fn file_names(&self) -> &'static [&'static str];

    /// Parse `path`, reporting failures to the caller
    fn try_parse(&self, path: &Path) -> Result<Vec<Task>>;

    /// Parse `path`; any failure is logged and yields no tasks
    fn parse(&self, path: &Path) -> Vec<Task> {
        match self.try_parse(path) {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!("{e}");
                Vec::new()
            }
        }
    }

    /// The definition file inside `dir`, if there is one
    fn find_in(&self, dir: &Path) -> Option<PathBuf> {
        self.file_names()
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }
}

static MANIFEST_PARSER: ManifestParser = ManifestParser;
static BUILD_FILE_PARSER: BuildFileParser = BuildFileParser;

/// Parser for the given source kind
pub fn parser_for(source: TaskSource) -> &'static dyn DefinitionParser {
    match source {
        TaskSource::Manifest => &MANIFEST_PARSER,
        TaskSource::BuildFile => &BUILD_FILE_PARSER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_in_prefers_gnumakefile() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("GNUmakefile"), "all:\n").unwrap();
        fs::write(temp_dir.path().join("Makefile"), "all:\n").unwrap();

        let found = parser_for(TaskSource::BuildFile).find_in(temp_dir.path());
        assert_eq!(found, Some(temp_dir.path().join("GNUmakefile")));
    }

    #[test]
    fn test_parser_for_reports_its_source() {
        for source in [TaskSource::Manifest, TaskSource::BuildFile] {
            assert_eq!(parser_for(source).source(), source);
        }
    }

    #[test]
    fn test_find_in_ignores_directories() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("package.json")).unwrap();

        assert_eq!(
            parser_for(TaskSource::Manifest).find_in(temp_dir.path()),
            None
        );
    }
}
