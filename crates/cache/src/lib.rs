//! Discovery cache for taskpick
//!
//! Stores previously discovered task lists keyed by discovery context, and
//! reuses them only while every contributing definition file still has the
//! modification time it had when the record was written. Caching is best
//! effort: every failure degrades to a miss or a skipped write.

pub mod config;
pub mod key;
pub mod record;
pub mod store;

pub use config::CacheConfig;
pub use key::cache_key;
pub use record::CacheRecord;
pub use store::{CacheStatistics, ScriptCache};
