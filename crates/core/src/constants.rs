/// Constants used throughout the taskpick codebase
// Definition files
pub const MANIFEST_FILENAME: &str = "package.json";
pub const MANIFEST_SCRIPTS_KEY: &str = "scripts";
pub const MANIFEST_WORKSPACES_KEY: &str = "workspaces";
pub const WORKSPACE_DECLARATION_FILENAME: &str = "pnpm-workspace.yaml";

// Checked in this order inside a single directory; the first one present wins
pub const BUILD_FILENAMES: &[&str] = &["GNUmakefile", "makefile", "Makefile"];

// Build tool used for build-file tasks and for synthesized empty recipes
pub const BUILD_PROGRAM: &str = "make";

// Joins recipe lines of a build target into one command string
pub const SEQUENTIAL_SEPARATOR: &str = " && ";

// Package label given to tasks defined at the workspace root
pub const ROOT_PACKAGE_LABEL: &str = "(root)";

// Directories never descended into when walking a workspace
pub const EXCLUDED_DIRECTORIES: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "bower_components",
    ".pnpm-store",
    "dist",
    "build",
    "out",
    "target",
    "coverage",
    ".next",
    ".nuxt",
    ".turbo",
    ".cache",
    ".github",
    ".gitlab",
    ".circleci",
];

pub const DEFAULT_MAX_DEPTH: usize = 32;

// Cache store
pub const CACHE_FILENAME: &str = "scripts.json";
pub const CACHE_FORMAT_VERSION: u32 = 1;
pub const CACHE_MAX_AGE_SECS: u64 = 24 * 60 * 60;
pub const CACHE_MAX_ENTRIES: usize = 64;

// Environment variable names
pub const TASKPICK_LOG_VAR: &str = "TASKPICK_LOG";
pub const TASKPICK_CACHE_DIR_VAR: &str = "TASKPICK_CACHE_DIR";
pub const TASKPICK_NO_CACHE_VAR: &str = "TASKPICK_NO_CACHE";
