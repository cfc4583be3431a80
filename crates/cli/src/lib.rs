pub mod commands;
pub mod executor;
pub mod picker;

pub use commands::Commands;
