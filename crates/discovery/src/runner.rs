//! Package manager detection for manifest tasks

use std::fmt::{self, Display};
use std::path::{Path, PathBuf};
use taskpick_utils::find_up;
use tracing::debug;

/// JavaScript package manager used to run `scripts` entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManager {
    /// Executable name
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        }
    }

    /// Package manager owning the lockfile in `dir`, if any
    pub fn from_lockfile_in(dir: &Path) -> Option<Self> {
        const LOCKFILES: &[(&str, PackageManager)] = &[
            ("pnpm-lock.yaml", PackageManager::Pnpm),
            ("yarn.lock", PackageManager::Yarn),
            ("bun.lockb", PackageManager::Bun),
            ("bun.lock", PackageManager::Bun),
            ("package-lock.json", PackageManager::Npm),
        ];

        LOCKFILES
            .iter()
            .find(|(name, _)| dir.join(name).is_file())
            .map(|(_, manager)| *manager)
    }
}

impl Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// Detects the package manager for a directory, remembering the last answer
///
/// Consecutive tasks usually run from the same package, so a single slot is
/// enough. Call [`RunnerResolver::invalidate`] after lockfiles may have changed.
#[derive(Debug, Default)]
pub struct RunnerResolver {
    last: Option<(PathBuf, PackageManager)>,
}

impl RunnerResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Package manager for `dir`, from the nearest lockfile at or above it
    pub fn resolve(&mut self, dir: &Path) -> PackageManager {
        if let Some((cached_dir, manager)) = &self.last {
            if cached_dir == dir {
                return *manager;
            }
        }

        let manager = find_up(dir, PackageManager::from_lockfile_in).unwrap_or_default();
        debug!(dir = %dir.display(), manager = %manager, "Detected package manager");
        self.last = Some((dir.to_path_buf(), manager));
        manager
    }

    /// Drop the remembered answer
    pub fn invalidate(&mut self) {
        self.last = None;
    }
}
