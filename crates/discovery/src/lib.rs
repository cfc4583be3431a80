//! Task discovery for taskpick
//!
//! Finds package.json scripts or Makefile targets for a single project or a
//! whole workspace, caches the result, and filters it against search input.
//!
//! ```no_run
//! use taskpick_discovery::{filter, DiscoveryConfig, TaskDiscovery};
//!
//! let discovery = TaskDiscovery::new(".", DiscoveryConfig::default());
//! let tasks = discovery.discover(true);
//! for task in filter(&tasks, "test watch") {
//!     println!("{}", task.qualified_name());
//! }
//! ```

pub mod config;
pub mod discovery;
pub mod matcher;
pub mod parser;
pub mod runner;
pub mod walker;
pub mod workspace;

pub use config::DiscoveryConfig;
pub use discovery::TaskDiscovery;
pub use matcher::{filter, filter_indices, Query, Searchable};
pub use parser::{parser_for, BuildFileParser, DefinitionParser, ManifestParser};
pub use runner::{PackageManager, RunnerResolver};
pub use walker::find_definition_files;
pub use workspace::{find_workspace_root, is_workspace_root};
