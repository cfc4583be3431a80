//! Shared data model for discovered tasks

use crate::constants::{BUILD_PROGRAM, ROOT_PACKAGE_LABEL};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::path::PathBuf;

/// Where a task was defined, which also decides how it is executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSource {
    /// A `scripts` entry of a package.json, run through the detected package manager
    Manifest,
    /// A Makefile target, run through `make`
    BuildFile,
}

impl TaskSource {
    /// Short stable identifier, used in cache keys
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskSource::Manifest => "manifest",
            TaskSource::BuildFile => "build",
        }
    }
}

impl Display for TaskSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether discovery looks at one project or a whole workspace tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DiscoveryMode {
    #[default]
    Single,
    Workspace,
}

impl DiscoveryMode {
    pub fn from_workspace_flag(workspace: bool) -> Self {
        if workspace {
            DiscoveryMode::Workspace
        } else {
            DiscoveryMode::Single
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoveryMode::Single => "single",
            DiscoveryMode::Workspace => "workspace",
        }
    }
}

/// Display path of a workspace package relative to the workspace root
///
/// The root package itself carries the `(root)` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageLabel(String);

impl PackageLabel {
    /// Label for the package at the workspace root
    pub fn root() -> Self {
        Self(ROOT_PACKAGE_LABEL.to_string())
    }

    /// Label for a member package, given its path relative to the root
    ///
    /// An empty relative path maps to the root sentinel.
    pub fn from_relative(relative: &std::path::Path) -> Self {
        let components: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                std::path::Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        if components.is_empty() {
            Self::root()
        } else {
            Self(components.join("/"))
        }
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT_PACKAGE_LABEL
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PackageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named, runnable command discovered from a definition file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    /// Literal or synthesized command text, never interpreted
    pub command: String,
    pub source: TaskSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_label: Option<PackageLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_directory: Option<PathBuf>,
}

impl Task {
    pub fn new(name: impl Into<String>, command: impl Into<String>, source: TaskSource) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            source,
            package_label: None,
            package_directory: None,
        }
    }

    /// Attach the owning workspace package
    #[must_use]
    pub fn in_package(mut self, label: PackageLabel, directory: impl Into<PathBuf>) -> Self {
        self.package_label = Some(label);
        self.package_directory = Some(directory.into());
        self
    }

    /// Sort key used for deterministic ordering; an absent label sorts as ""
    pub fn sort_key(&self) -> (&str, &str) {
        (
            self.package_label.as_ref().map_or("", PackageLabel::as_str),
            &self.name,
        )
    }

    /// Name unique within one discovery result: `label:name`, or just `name`
    pub fn qualified_name(&self) -> String {
        match &self.package_label {
            Some(label) => format!("{label}:{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Program and arguments that run this task
    ///
    /// `runner` is the package manager used for manifest tasks.
    pub fn invocation(&self, runner: &str) -> (String, Vec<String>) {
        match self.source {
            TaskSource::Manifest => (
                runner.to_string(),
                vec!["run".to_string(), self.name.clone()],
            ),
            TaskSource::BuildFile => (BUILD_PROGRAM.to_string(), vec![self.name.clone()]),
        }
    }
}

/// Sort tasks by `(package label, name)`
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}
