//! Logging init: human-readable tracing output on stderr.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,disconnect_content=debug";

/// Filter from `RUST_LOG`, or [`DEFAULT_FILTER`] when unset or invalid.
/// `quiet` lowers the fallback to warnings only.
pub fn env_filter(quiet: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if quiet { "warn" } else { DEFAULT_FILTER })
    })
}

/// Installs the global subscriber. Stdout stays reserved for command output.
pub fn init_logging(quiet: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(quiet))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
