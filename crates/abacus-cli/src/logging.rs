//! Log subscriber setup

use crate::config::Verbosity;
use tracing_subscriber::EnvFilter;

/// Builds the log filter: `RUST_LOG` wins, otherwise the verbosity level
#[must_use]
pub fn filter_for(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.log_directive()))
}

/// Installs a stderr subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(verbosity: Verbosity, use_color: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(verbosity))
        .with_writer(std::io::stderr)
        .with_ansi(use_color)
        .with_target(false)
        .try_init();
}
