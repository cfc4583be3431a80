use std::io::IsTerminal;
use taskpick_core::constants::TASKPICK_LOG_VAR;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `TASKPICK_LOG` is unset; warnings are the user-facing messages
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Initialize the tracing system
///
/// Logs go to stderr so they never mix with task output or `--list` results.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_from_env(TASKPICK_LOG_VAR)
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .without_time()
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Check if we're running in a TTY environment
pub fn is_tty() -> bool {
    std::io::stderr().is_terminal()
}
