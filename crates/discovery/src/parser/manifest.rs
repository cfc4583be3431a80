use super::DefinitionParser;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use taskpick_core::constants::MANIFEST_FILENAME;
use taskpick_core::{Error, Result, Task, TaskSource};
use tracing::debug;

/// The parts of a package.json that discovery cares about
#[derive(Debug, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub scripts: Option<Value>,
    #[serde(default)]
    pub workspaces: Option<Value>,
}

impl Manifest {
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::file_system(path, "read manifest", e))?;
        serde_json::from_str(&content).map_err(|e| {
            let message = format!("invalid JSON: {e}");
            Error::manifest_parse_with_source(path, message, e)
        })
    }

    /// Scripts in declaration order; non-string commands are skipped
    pub fn scripts(&self) -> Vec<(&str, &str)> {
        let Some(Value::Object(scripts)) = &self.scripts else {
            return Vec::new();
        };

        scripts
            .iter()
            .filter_map(|(name, command)| match command {
                Value::String(command) => Some((name.as_str(), command.as_str())),
                other => {
                    debug!(script = %name, "Skipping script with non-string command: {other}");
                    None
                }
            })
            .collect()
    }

    /// Member globs from `workspaces`, in either the array or `{ packages }` form
    pub fn workspace_globs(&self) -> Vec<&str> {
        let globs = match &self.workspaces {
            Some(Value::Array(globs)) => globs,
            Some(Value::Object(fields)) => match fields.get("packages") {
                Some(Value::Array(globs)) => globs,
                _ => return Vec::new(),
            },
            _ => return Vec::new(),
        };
        globs.iter().filter_map(Value::as_str).collect()
    }
}

/// Whether the manifest at `path` declares a non-empty workspace member list
///
/// Unreadable or malformed manifests never declare a workspace.
pub fn manifest_declares_workspace(path: &Path) -> bool {
    match Manifest::read(path) {
        Ok(manifest) => !manifest.workspace_globs().is_empty(),
        Err(e) => {
            debug!("Ignoring manifest while resolving workspace: {e}");
            false
        }
    }
}

/// Reads `scripts` from package.json files
#[derive(Debug, Default, Clone, Copy)]
pub struct ManifestParser;

impl DefinitionParser for ManifestParser {
    fn source(&self) -> TaskSource {
        TaskSource::Manifest
    }

    fn file_names(&self) -> &'static [&'static str] {
        &[MANIFEST_FILENAME]
    }

    fn try_parse(&self, path: &Path) -> Result<Vec<Task>> {
        let manifest = Manifest::read(path)?;
        let tasks: Vec<Task> = manifest
            .scripts()
            .into_iter()
            .map(|(name, command)| Task::new(name, command, TaskSource::Manifest))
            .collect();

        debug!(path = %path.display(), count = tasks.len(), "Parsed manifest");
        Ok(tasks)
    }
}
