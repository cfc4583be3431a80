//! Shared utilities and pure functions for taskpick
//!
//! Filesystem helpers used by discovery and the cache: XDG locations,
//! atomic writes, modification-time snapshots and directory walks.

pub mod atomic_file;
pub mod file_times;
pub mod paths;
pub mod tracing;
pub mod xdg;

pub use atomic_file::*;
pub use file_times::*;
pub use paths::*;
pub use xdg::*;
