//! Core domain types, errors, and constants for `taskpick`.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias,
//!   centralizing all possible failure modes for predictable error handling.
//! - **`types`**: The `Task` model shared by discovery, caching, selection and
//!   execution, plus `PackageLabel` and the mode/source tags.
//! - **`constants`**: Definition file names, excluded directories, cache limits
//!   and environment variable names.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result, ResultExt},
    types::*,
};
